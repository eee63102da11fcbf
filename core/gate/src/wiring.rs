//! 配線: 標準アダプタで GateUseCase を組み立てる

use std::sync::Arc;

use common::adapter::{
    EnvResolver, FileJsonLog, FileSystem, Log, MultiLog, StdEnvResolver, StdFileSystem, StderrLog,
};
use common::domain::Dirs;
use common::error::Error;
use common::ports::outbound::{LogLevel, LogRecord};

use crate::adapter::{
    CliInteraction, CliRetryPrompt, FileConsentStore, FileGateConfigLoader, FileGrantPlatform,
    NoRetryPrompt, PromptInterrupt, StderrResultSink,
};
use crate::cli::Config;
use crate::ports::outbound::{GateConfigLoader, InterruptChecker, RetryPrompt};
use crate::usecase::app::GateUseCase;
use crate::usecase::context::GateContext;

const LOG_FILENAME: &str = "capgate.jsonl";

/// 配線済みのアプリ
pub struct App {
    pub logger: Arc<dyn Log>,
    pub gate_use_case: GateUseCase,
}

/// 環境変数からディレクトリを解決して組み立てる
pub fn wire_gate(config: &Config) -> Result<App, Error> {
    let dirs = StdEnvResolver.resolve_dirs()?;
    wire_gate_in(&dirs, config)
}

/// 指定ディレクトリで組み立てる（テストでは一時ディレクトリを渡す）
pub fn wire_gate_in(dirs: &Dirs, config: &Config) -> Result<App, Error> {
    let fs: Arc<dyn FileSystem> = Arc::new(StdFileSystem);

    let file_log: Arc<dyn Log> = Arc::new(FileJsonLog::new(
        Arc::clone(&fs),
        dirs.logs_dir().join(LOG_FILENAME),
    ));
    let logger: Arc<dyn Log> = if config.verbose {
        Arc::new(MultiLog::new(vec![file_log, Arc::new(StderrLog::default())]))
    } else {
        file_log
    };

    let loader = match &config.config_path {
        Some(path) => FileGateConfigLoader::new(Arc::clone(&fs), path, true),
        None => FileGateConfigLoader::new(Arc::clone(&fs), dirs.gate_config_path(), false),
    };
    let gate_config = loader.load()?;

    let platform = Arc::new(FileGrantPlatform::load(
        Arc::clone(&fs),
        dirs.platform_path(),
    )?);
    let consent_store = Arc::new(FileConsentStore::new(Arc::clone(&fs), dirs.consent_path()));

    let interrupt_checker: Option<Arc<dyn InterruptChecker>> = if config.non_interactive {
        None
    } else {
        let interrupt = PromptInterrupt::new();
        match interrupt.install() {
            Ok(()) => {
                let checker: Arc<dyn InterruptChecker> = Arc::new(interrupt);
                Some(checker)
            }
            Err(e) => {
                let _ = logger.log(
                    &LogRecord::new(LogLevel::Warn, e.to_string())
                        .layer("wiring")
                        .kind("signal"),
                );
                None
            }
        }
    };
    let interaction = Arc::new(CliInteraction::new(
        Arc::clone(&platform) as _,
        interrupt_checker,
        config.non_interactive,
    ));
    let retry_prompt: Arc<dyn RetryPrompt> = if config.non_interactive {
        Arc::new(NoRetryPrompt::new())
    } else {
        Arc::new(CliRetryPrompt::new())
    };

    let ctx = GateContext {
        consent_store,
        platform,
        surface: Arc::clone(&interaction) as _,
        log: Arc::clone(&logger),
    };
    let gate_use_case = GateUseCase::new(
        ctx,
        gate_config,
        interaction,
        Arc::new(StderrResultSink::new()),
        retry_prompt,
    );

    Ok(App {
        logger,
        gate_use_case,
    })
}
