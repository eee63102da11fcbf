//! プラットフォームのロール checker
//!
//! ロールを提供しないプラットフォームでは取得を試みず、同期エラーを返す。

use super::{CapabilityChecker, CheckerWithErrors};
use crate::domain::{CheckerKind, PIPELINE_REQUEST_ID};
use crate::usecase::context::GateContext;

pub struct RoleChecker {
    role: String,
    errors: Vec<String>,
}

impl RoleChecker {
    pub fn new(role: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            errors: Vec::new(),
        }
    }
}

impl CapabilityChecker for RoleChecker {
    fn kind(&self) -> CheckerKind {
        CheckerKind::Role
    }

    fn label(&self) -> String {
        format!("role:{}", self.role)
    }

    fn has_access(&self, ctx: &GateContext) -> bool {
        ctx.platform.is_role_available(&self.role) && ctx.platform.is_role_held(&self.role)
    }

    fn request_access(&mut self, ctx: &GateContext, _force_attempt: bool) -> bool {
        self.errors.clear();
        if self.has_access(ctx) {
            return false;
        }
        if !ctx.platform.is_role_available(&self.role) {
            self.errors.push(format!(
                "Role '{}' is not available on this platform.",
                self.role
            ));
            return false;
        }
        ctx.surface.start_role_request(PIPELINE_REQUEST_ID, &self.role);
        true
    }

    fn as_error_source(&self) -> Option<&dyn CheckerWithErrors> {
        Some(self)
    }
}

impl CheckerWithErrors for RoleChecker {
    fn errors(&self) -> Vec<String> {
        self.errors.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::support::Harness;

    #[test]
    fn test_unavailable_role_reports_error_without_launch() {
        let h = Harness::new();
        let mut c = RoleChecker::new("call_screening");
        assert!(!c.request_access(&h.ctx(), false));
        assert!(h.surface.launched().is_empty());
        assert_eq!(
            c.errors(),
            vec!["Role 'call_screening' is not available on this platform.".to_string()]
        );
    }

    #[test]
    fn test_available_role_launches_request() {
        let h = Harness::new();
        h.platform.offer_role("call_screening");
        let mut c = RoleChecker::new("call_screening");
        assert!(!c.has_access(&h.ctx()));
        assert!(c.request_access(&h.ctx(), false));
        assert_eq!(h.surface.launched(), vec!["role:call_screening".to_string()]);
    }

    #[test]
    fn test_held_role_is_noop() {
        let h = Harness::new();
        h.platform.offer_role("call_screening");
        h.platform.hold_role("call_screening");
        let mut c = RoleChecker::new("call_screening");
        assert!(c.has_access(&h.ctx()));
        assert!(!c.request_access(&h.ctx(), false));
        assert!(c.errors().is_empty());
    }
}
