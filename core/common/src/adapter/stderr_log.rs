//! 人間向けログ（LogRecord → stderr に要点のみ出力）
//!
//! --verbose 指定時に FileJsonLog と並べて使う。fields の全量は出さず要点のみ。

use crate::error::Error;
use crate::ports::outbound::{Log, LogLevel, LogRecord};

const FIELDS_SUMMARY_MAX: usize = 200;

fn fields_summary(record: &LogRecord) -> String {
    let Some(fields) = record.fields.as_ref().filter(|f| !f.is_empty()) else {
        return String::new();
    };
    let s = serde_json::Value::Object(fields.clone().into_iter().collect()).to_string();
    if s.len() <= FIELDS_SUMMARY_MAX {
        return s;
    }
    let truncated = s.chars().take(FIELDS_SUMMARY_MAX).collect::<String>();
    format!("{}... (len={})", truncated, s.len())
}

/// 指定レベル以上を stderr に 1 行で出す Log 実装
pub struct StderrLog {
    max_level: LogLevel,
}

impl StderrLog {
    pub fn new(max_level: LogLevel) -> Self {
        Self { max_level }
    }

    fn format(record: &LogRecord) -> String {
        let kind = record.kind.as_deref().unwrap_or("-");
        let summary = fields_summary(record);
        if summary.is_empty() {
            format!("[{}] {}: {}", record.level.as_str(), kind, record.message)
        } else {
            format!(
                "[{}] {}: {} {}",
                record.level.as_str(),
                kind,
                record.message,
                summary
            )
        }
    }
}

impl Default for StderrLog {
    fn default() -> Self {
        Self::new(LogLevel::Debug)
    }
}

impl Log for StderrLog {
    fn log(&self, record: &LogRecord) -> Result<(), Error> {
        if record.level <= self.max_level {
            eprintln!("{}", Self::format(record));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_with_fields() {
        let rec = LogRecord::new(LogLevel::Warn, "ignored resume")
            .kind("resume")
            .field("cursor", 1);
        assert_eq!(
            StderrLog::format(&rec),
            "[warn] resume: ignored resume {\"cursor\":1}"
        );
    }

    #[test]
    fn test_format_without_fields() {
        let rec = LogRecord::new(LogLevel::Info, "run finished");
        assert_eq!(StderrLog::format(&rec), "[info] -: run finished");
    }
}
