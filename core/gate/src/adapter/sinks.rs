//! 実行結果の表示（ResultSink の CLI 実装）
//!
//! 空リストは「前回の表示を消す」合図なので何も出さない。成功の表示は CLI 側で行う。

use crate::ports::outbound::ResultSink;

/// 拒否メッセージを stderr に出す
pub struct StderrResultSink;

impl StderrResultSink {
    pub fn new() -> Self {
        Self
    }

    fn format(errors: &[String]) -> Option<String> {
        if errors.is_empty() {
            return None;
        }
        let mut out = String::from("Access was not granted:");
        for e in errors {
            out.push_str("\n  - ");
            out.push_str(e);
        }
        Some(out)
    }
}

impl Default for StderrResultSink {
    fn default() -> Self {
        Self::new()
    }
}

impl ResultSink for StderrResultSink {
    fn report_errors(&self, errors: &[String]) {
        if let Some(text) = Self::format(errors) {
            eprintln!("{}", text);
        }
    }
}
