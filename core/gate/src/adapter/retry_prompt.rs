//! 拒否で終わったときの「再試行しますか？」CLI 実装
//!
//! usecase は RetryPrompt trait 経由でのみ利用する。

use crate::ports::outbound::RetryPrompt;
use common::error::Error;
use std::io::{self, BufRead, Write};

/// 非対話用: 常に再試行しない（CI 等でプロンプトを出さない）
pub struct NoRetryPrompt;

impl NoRetryPrompt {
    pub fn new() -> Self {
        Self
    }
}

impl Default for NoRetryPrompt {
    fn default() -> Self {
        Self::new()
    }
}

impl RetryPrompt for NoRetryPrompt {
    fn ask_retry(&self, _errors: &[String]) -> Result<bool, Error> {
        Ok(false)
    }
}

/// CLI で「再試行しますか？」を標準入出力で問い合わせる実装
pub struct CliRetryPrompt;

impl CliRetryPrompt {
    pub fn new() -> Self {
        Self
    }
}

impl Default for CliRetryPrompt {
    fn default() -> Self {
        Self::new()
    }
}

impl RetryPrompt for CliRetryPrompt {
    fn ask_retry(&self, _errors: &[String]) -> Result<bool, Error> {
        eprint!("Retry? [y/N]: ");
        let _ = io::stderr().flush();

        let mut line = String::new();
        io::stdin()
            .lock()
            .read_line(&mut line)
            .map_err(|e| Error::io_msg(e.to_string()))?;

        let input = line.trim().to_lowercase();
        Ok(input == "y" || input == "yes")
    }
}
