//! 能力名と checker の種別

use common::error::Error;
use regex::Regex;
use std::sync::OnceLock;

fn name_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[A-Za-z][A-Za-z0-9_.-]*$").expect("static capability name pattern")
    })
}

/// 英字始まりの識別子か（能力名・権限名・ロール名に共通の制約）
pub fn is_valid_name(s: &str) -> bool {
    name_pattern().is_match(s)
}

/// 同意を求める能力の名前（例: recognizeCall）
///
/// 同意記録のキー `agree-<name>` に使うため、英字始まりの識別子に限る。
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CapabilityName(String);

impl CapabilityName {
    pub fn parse(s: &str) -> Result<Self, Error> {
        if is_valid_name(s) {
            Ok(Self(s.to_string()))
        } else {
            Err(Error::config(format!("invalid capability name '{}'", s)))
        }
    }

    /// 同意記録のキー
    pub fn consent_key(&self) -> String {
        format!("agree-{}", self.0)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CapabilityName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// checker の種別。再開イベントの宛先照合に使う安定した識別子。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckerKind {
    /// 永続化されたユーザー同意
    Consent,
    /// プラットフォーム権限（システムの許可ダイアログ）
    Permission,
    /// プラットフォームのロール（外部アクティビティの結果で再開）
    Role,
}

impl CheckerKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            CheckerKind::Consent => "consent",
            CheckerKind::Permission => "permission",
            CheckerKind::Role => "role",
        }
    }
}

impl std::fmt::Display for CheckerKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_consent_key() {
        let name = CapabilityName::parse("recognizeCall").unwrap();
        assert_eq!(name.consent_key(), "agree-recognizeCall");
    }

    #[test]
    fn test_parse_rejects_bad_names() {
        assert!(CapabilityName::parse("").is_err());
        assert!(CapabilityName::parse("1abc").is_err());
        assert!(CapabilityName::parse("has space").is_err());
        assert!(CapabilityName::parse("android.permission.READ_CALL_LOG").is_ok());
    }
}
