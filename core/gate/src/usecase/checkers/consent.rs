//! 永続化されたユーザー同意で能力を判定する checker
//!
//! 未同意なら はい / いいえ のプロンプトを起動し、回答はパイプラインが
//! 次へ進む前に record_answer で `agree-<name>` に保存される。

use super::CapabilityChecker;
use crate::domain::{CapabilityName, CheckerKind};
use crate::usecase::context::GateContext;
use common::ports::outbound::{LogLevel, LogRecord};

pub struct ConsentChecker {
    capability: CapabilityName,
    message: String,
}

impl ConsentChecker {
    pub fn new(capability: CapabilityName, message: impl Into<String>) -> Self {
        Self {
            capability,
            message: message.into(),
        }
    }

    /// プロンプトの回答を保存する。
    ///
    /// 保存に失敗しても回答自体はこの実行で有効（警告ログのみ）。
    pub fn record_answer(&self, ctx: &GateContext, agree: bool) {
        let key = self.capability.consent_key();
        if let Err(e) = ctx.consent_store.put(&key, agree) {
            let _ = ctx.log.log(
                &LogRecord::new(LogLevel::Warn, format!("failed to persist consent: {}", e))
                    .layer("usecase")
                    .kind("checker")
                    .field("key", key),
            );
        }
    }
}

impl CapabilityChecker for ConsentChecker {
    fn kind(&self) -> CheckerKind {
        CheckerKind::Consent
    }

    fn label(&self) -> String {
        format!("consent:{}", self.capability)
    }

    fn has_access(&self, ctx: &GateContext) -> bool {
        let key = self.capability.consent_key();
        match ctx.consent_store.get(&key) {
            Ok(v) => v.unwrap_or(false),
            Err(e) => {
                let _ = ctx.log.log(
                    &LogRecord::new(LogLevel::Warn, format!("failed to read consent: {}", e))
                        .layer("usecase")
                        .kind("checker")
                        .field("key", key),
                );
                false
            }
        }
    }

    fn request_access(&mut self, ctx: &GateContext, _force_attempt: bool) -> bool {
        if self.has_access(ctx) {
            return false;
        }
        ctx.surface.show_consent_prompt(&self.capability, &self.message);
        true
    }
}
