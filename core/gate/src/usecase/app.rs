//! GateUseCase: パイプラインを組み立て、外部インタラクションの結果を流し込むホスト側ループ
//!
//! on_start の後、パイプラインが待機している間は InteractionEvents から結果を取り出して
//! dispatch する。拒否で終わったら RetryPrompt に再試行を問い合わせ、はいなら on_start から
//! やり直す。

use crate::domain::GateConfig;
use crate::ports::outbound::{InteractionEvents, ResultSink, RetryPrompt};
use crate::usecase::checkers::build_checkers;
use crate::usecase::context::GateContext;
use crate::usecase::pipeline::{CheckerStatus, GatePipeline};
use common::error::Error;
use common::ports::outbound::{LogLevel, LogRecord};
use std::sync::Arc;

/// 実行の最終結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateOutcome {
    /// すべての能力を取得済み
    Granted,
    /// 拒否・エラーで終わった（再試行しなかった）
    Denied(Vec<String>),
}

impl GateOutcome {
    pub fn exit_code(&self) -> i32 {
        match self {
            GateOutcome::Granted => 0,
            GateOutcome::Denied(_) => 1,
        }
    }
}

pub struct GateUseCase {
    ctx: GateContext,
    config: GateConfig,
    events: Arc<dyn InteractionEvents>,
    sink: Arc<dyn ResultSink>,
    retry_prompt: Arc<dyn RetryPrompt>,
}

impl GateUseCase {
    pub fn new(
        ctx: GateContext,
        config: GateConfig,
        events: Arc<dyn InteractionEvents>,
        sink: Arc<dyn ResultSink>,
        retry_prompt: Arc<dyn RetryPrompt>,
    ) -> Self {
        Self {
            ctx,
            config,
            events,
            sink,
            retry_prompt,
        }
    }

    fn build_pipeline(&self) -> Result<GatePipeline, Error> {
        let checkers = build_checkers(&self.config, self.ctx.platform.level())?;
        Ok(GatePipeline::new(
            self.ctx.clone(),
            checkers,
            Arc::clone(&self.sink),
        ))
    }

    /// パイプラインを最後まで実行する。
    ///
    /// 入力が尽きた・Ctrl+C で中断された場合は実行を放棄して Err を返す。
    pub fn run(&self) -> Result<GateOutcome, Error> {
        let mut pipeline = self.build_pipeline()?;
        let mut attempt = 1usize;
        loop {
            pipeline.on_start();
            while pipeline.is_awaiting() {
                match self.events.next_event()? {
                    Some(event) => pipeline.dispatch(event),
                    None => {
                        return Err(Error::system(format!(
                            "no result arrived for the pending {} request",
                            pipeline
                                .pending_kind()
                                .map(|k| k.as_str())
                                .unwrap_or("unknown")
                        )))
                    }
                }
            }

            let errors = pipeline.errors().to_vec();
            if errors.is_empty() {
                return Ok(GateOutcome::Granted);
            }
            if !self.retry_prompt.ask_retry(&errors)? {
                return Ok(GateOutcome::Denied(errors));
            }
            attempt += 1;
            let _ = self.ctx.log.log(
                &LogRecord::new(LogLevel::Info, "retrying gate")
                    .layer("usecase")
                    .kind("lifecycle")
                    .field("attempt", attempt),
            );
        }
    }

    /// 各 checker の状態を返す（プロンプトは出さない）
    pub fn status(&self) -> Result<Vec<CheckerStatus>, Error> {
        Ok(self.build_pipeline()?.status())
    }
}
