//! ゲート設定（config/gate.json）
//!
//! すべての項目に既定値があり、ファイルが無くても通話フィルタ用の構成で動く。

use super::capability::{is_valid_name, CapabilityName};
use common::error::Error;
use serde::{Deserialize, Serialize};

fn default_consent_capability() -> String {
    "recognizeCall".to_string()
}

fn default_consent_message() -> String {
    "This feature inspects incoming calls to decide whether to block them. \
     Call details never leave this device."
        .to_string()
}

fn default_permissions() -> Vec<String> {
    vec![
        "READ_CALL_LOG".to_string(),
        "READ_PHONE_STATE".to_string(),
        "CALL_PHONE".to_string(),
    ]
}

fn default_role() -> Option<String> {
    Some("call_screening".to_string())
}

fn default_role_min_level() -> u32 {
    29
}

/// ゲート設定
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GateConfig {
    /// 同意を記録する能力名（`agree-<name>` のキーになる）
    #[serde(default = "default_consent_capability")]
    pub consent_capability: String,
    /// 同意プロンプトに出す説明文
    #[serde(default = "default_consent_message")]
    pub consent_message: String,
    /// 要求するプラットフォーム権限（空なら Permission checker を置かない）
    #[serde(default = "default_permissions")]
    pub permissions: Vec<String>,
    /// 要求するロール（null なら Role checker を置かない）
    #[serde(default = "default_role")]
    pub role: Option<String>,
    /// Role checker を置く最低プラットフォームレベル
    #[serde(default = "default_role_min_level")]
    pub role_min_level: u32,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            consent_capability: default_consent_capability(),
            consent_message: default_consent_message(),
            permissions: default_permissions(),
            role: default_role(),
            role_min_level: default_role_min_level(),
        }
    }
}

impl GateConfig {
    /// 名前の形式を検査し、同意対象の能力名を返す
    pub fn validate(&self) -> Result<CapabilityName, Error> {
        let capability = CapabilityName::parse(&self.consent_capability)?;
        if let Some(bad) = self.permissions.iter().find(|p| !is_valid_name(p)) {
            return Err(Error::config(format!("invalid permission name '{}'", bad)));
        }
        if let Some(role) = self.role.as_deref().filter(|r| !is_valid_name(r)) {
            return Err(Error::config(format!("invalid role name '{}'", role)));
        }
        Ok(capability)
    }

    /// 指定のプラットフォームレベルで Role checker を置くか
    pub fn role_for_level(&self, level: u32) -> Option<&str> {
        self.role
            .as_deref()
            .filter(|_| level >= self.role_min_level)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_json_uses_defaults() {
        let config: GateConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, GateConfig::default());
        assert_eq!(config.consent_capability, "recognizeCall");
        assert_eq!(config.role_min_level, 29);
    }

    #[test]
    fn test_role_can_be_disabled() {
        let config: GateConfig = serde_json::from_str(r#"{"role": null}"#).unwrap();
        assert_eq!(config.role_for_level(40), None);
    }

    #[test]
    fn test_role_for_level_threshold() {
        let config = GateConfig::default();
        assert_eq!(config.role_for_level(28), None);
        assert_eq!(config.role_for_level(29), Some("call_screening"));
    }

    #[test]
    fn test_validate_rejects_bad_permission() {
        let config = GateConfig {
            permissions: vec!["OK".to_string(), "no spaces".to_string()],
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("no spaces"));
    }
}
