//! プラットフォーム権限の checker
//!
//! 足りない権限をまとめて 1 回のシステムリクエストで要求する。
//! 「今後表示しない」で拒否済みの権限はシステムがダイアログを出さないため、
//! force_attempt でない限り要求せず同期エラーで知らせる。

use super::{CapabilityChecker, CheckerWithErrors};
use crate::domain::{CheckerKind, PIPELINE_REQUEST_ID};
use crate::ports::outbound::PermissionState;
use crate::usecase::context::GateContext;

pub struct PermissionChecker {
    permissions: Vec<String>,
    errors: Vec<String>,
}

impl PermissionChecker {
    pub fn new(permissions: Vec<String>) -> Self {
        Self {
            permissions,
            errors: Vec::new(),
        }
    }

    fn missing(&self, ctx: &GateContext) -> Vec<(String, PermissionState)> {
        self.permissions
            .iter()
            .map(|p| (p.clone(), ctx.platform.permission_state(p)))
            .filter(|(_, state)| *state != PermissionState::Granted)
            .collect()
    }
}

impl CapabilityChecker for PermissionChecker {
    fn kind(&self) -> CheckerKind {
        CheckerKind::Permission
    }

    fn label(&self) -> String {
        format!("permission:{}", self.permissions.join(","))
    }

    fn has_access(&self, ctx: &GateContext) -> bool {
        self.permissions
            .iter()
            .all(|p| ctx.platform.permission_state(p) == PermissionState::Granted)
    }

    fn request_access(&mut self, ctx: &GateContext, force_attempt: bool) -> bool {
        self.errors.clear();
        let missing = self.missing(ctx);
        if missing.is_empty() {
            return false;
        }

        if !force_attempt {
            self.errors = missing
                .iter()
                .filter(|(_, state)| *state == PermissionState::DeniedPermanently)
                .map(|(p, _)| {
                    format!(
                        "Permission {} was permanently denied; enable it in the system settings.",
                        p
                    )
                })
                .collect();
            if !self.errors.is_empty() {
                return false;
            }
        }

        let names: Vec<String> = missing.into_iter().map(|(p, _)| p).collect();
        ctx.surface.request_permissions(PIPELINE_REQUEST_ID, &names);
        true
    }

    fn as_error_source(&self) -> Option<&dyn CheckerWithErrors> {
        Some(self)
    }
}

impl CheckerWithErrors for PermissionChecker {
    fn errors(&self) -> Vec<String> {
        self.errors.clone()
    }
}
