use crate::domain::GateCommand;
use clap::builder::ArgAction;
use clap::value_parser;
use clap_complete::Shell;
use common::error::Error;
use std::path::PathBuf;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Config {
    pub help: bool,
    /// --no-interactive: プロンプトを出さず、すべて「いいえ」と答える（再試行もしない）
    pub non_interactive: bool,
    /// -v / --verbose: 構造化ログを stderr にも出す
    pub verbose: bool,
    /// --config: gate.json の場所（省略時は設定ディレクトリの gate.json）
    pub config_path: Option<PathBuf>,
    /// run / status（省略時は run）
    pub command: Option<String>,
}

/// 解析結果: 通常の Config / 補完スクリプト生成
#[derive(Debug, Clone)]
pub enum ParseOutcome {
    Config(Config),
    GenerateCompletion(Shell),
}

fn build_clap_command() -> clap::Command {
    clap::Command::new("capgate")
        .about("Acquire every prerequisite capability before the protected feature runs")
        .disable_help_flag(true)
        .arg(
            clap::Arg::new("help")
                .short('h')
                .long("help")
                .help("Show this help message")
                .action(ArgAction::SetTrue),
        )
        .arg(
            clap::Arg::new("no-interactive")
                .long("no-interactive")
                .help("Do not prompt (CI-friendly: every prompt is declined, no retry)")
                .action(ArgAction::SetTrue),
        )
        .arg(
            clap::Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Also print structured logs to stderr")
                .action(ArgAction::SetTrue),
        )
        .arg(
            clap::Arg::new("config")
                .long("config")
                .value_name("path")
                .help("Path to gate.json")
                .value_parser(value_parser!(PathBuf))
                .num_args(1),
        )
        .arg(
            clap::Arg::new("generate")
                .long("generate")
                .value_name("shell")
                .help("Generate shell completion script")
                .value_parser(value_parser!(Shell))
                .num_args(1),
        )
        .arg(
            clap::Arg::new("command")
                .index(1)
                .value_name("command")
                .help("run (default) or status")
                .num_args(1),
        )
}

fn matches_to_config(matches: &clap::ArgMatches) -> Config {
    Config {
        help: matches.get_flag("help"),
        non_interactive: matches.get_flag("no-interactive"),
        verbose: matches.get_flag("verbose"),
        config_path: matches.get_one::<PathBuf>("config").cloned(),
        command: matches.get_one::<String>("command").cloned(),
    }
}

/// コマンドラインを解析する。補完生成が要求された場合は ParseOutcome::GenerateCompletion を返す。
pub fn parse_args() -> Result<ParseOutcome, Error> {
    let matches = build_clap_command()
        .try_get_matches()
        .map_err(|e| Error::invalid_argument(e.to_string()))?;

    if let Some(&shell) = matches.get_one::<Shell>("generate") {
        return Ok(ParseOutcome::GenerateCompletion(shell));
    }

    Ok(ParseOutcome::Config(matches_to_config(&matches)))
}

/// テスト用: 引数スライスから解析する
#[cfg(test)]
pub fn parse_args_from(args: &[&str]) -> Result<Config, Error> {
    let matches = build_clap_command()
        .try_get_matches_from(args)
        .map_err(|e| Error::invalid_argument(e.to_string()))?;
    Ok(matches_to_config(&matches))
}

/// 補完スクリプトを標準出力に出力する。
pub fn print_completion(shell: Shell) {
    let mut cmd = build_clap_command();
    clap_complete::generate(shell, &mut cmd, "capgate", &mut std::io::stdout());
}

/// Config を GateCommand に変換する
pub fn config_to_command(config: &Config) -> Result<GateCommand, Error> {
    if config.help {
        return Ok(GateCommand::Help);
    }
    match config.command.as_deref() {
        None | Some("run") => Ok(GateCommand::Run),
        Some("status") => Ok(GateCommand::Status),
        Some(other) => Err(Error::invalid_argument(format!(
            "unknown command '{}' (expected run or status)",
            other
        ))),
    }
}
