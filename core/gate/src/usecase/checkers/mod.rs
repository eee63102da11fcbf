//! 能力 checker の契約と、閉じた種類の集合
//!
//! パイプラインは CapabilityChecker 経由でのみ checker を扱う。
//! 同期エラーを返せる checker は CheckerWithErrors を as_error_source で公開する。

pub mod consent;
pub mod permission;
pub mod role;

pub use consent::ConsentChecker;
pub use permission::PermissionChecker;
pub use role::RoleChecker;

use crate::domain::{CheckerKind, GateConfig};
use crate::usecase::context::GateContext;
use common::error::Error;

/// 1 つの能力を確認・取得する単位
pub trait CapabilityChecker {
    /// 再開イベントの宛先照合に使う種別
    fn kind(&self) -> CheckerKind;

    /// 表示用の名前（例: consent:recognizeCall）
    fn label(&self) -> String;

    /// 能力を今持っているか。副作用なし、何度呼んでもよい。
    fn has_access(&self, ctx: &GateContext) -> bool;

    /// 能力の取得を試みる。
    ///
    /// * `false` - 同期的に完了した（既に保持・即時取得・同期エラー）。パイプラインはすぐ次へ進む。
    /// * `true` - 外部インタラクションを起動した。再開イベントが来るまでパイプラインは止まる。
    fn request_access(&mut self, ctx: &GateContext, force_attempt: bool) -> bool;

    /// 同期エラーを返せる checker なら Some
    fn as_error_source(&self) -> Option<&dyn CheckerWithErrors> {
        None
    }
}

/// 直前の request_access で起きた同期エラーを返す拡張
pub trait CheckerWithErrors {
    fn errors(&self) -> Vec<String>;
}

/// パイプラインが持つ checker の閉じた集合
pub enum Checker {
    Consent(ConsentChecker),
    Permission(PermissionChecker),
    Role(RoleChecker),
}

impl Checker {
    fn inner(&self) -> &dyn CapabilityChecker {
        match self {
            Checker::Consent(c) => c,
            Checker::Permission(c) => c,
            Checker::Role(c) => c,
        }
    }

    fn inner_mut(&mut self) -> &mut dyn CapabilityChecker {
        match self {
            Checker::Consent(c) => c,
            Checker::Permission(c) => c,
            Checker::Role(c) => c,
        }
    }
}

impl CapabilityChecker for Checker {
    fn kind(&self) -> CheckerKind {
        self.inner().kind()
    }

    fn label(&self) -> String {
        self.inner().label()
    }

    fn has_access(&self, ctx: &GateContext) -> bool {
        self.inner().has_access(ctx)
    }

    fn request_access(&mut self, ctx: &GateContext, force_attempt: bool) -> bool {
        self.inner_mut().request_access(ctx, force_attempt)
    }

    fn as_error_source(&self) -> Option<&dyn CheckerWithErrors> {
        self.inner().as_error_source()
    }
}

/// 設定とプラットフォームレベルから評価順の checker 列を組み立てる
///
/// 順序: 同意 → 権限 → ロール。ロールは `role_min_level` 以上のときのみ。
pub fn build_checkers(config: &GateConfig, platform_level: u32) -> Result<Vec<Checker>, Error> {
    let capability = config.validate()?;
    let mut checkers = vec![Checker::Consent(ConsentChecker::new(
        capability,
        config.consent_message.clone(),
    ))];
    if !config.permissions.is_empty() {
        checkers.push(Checker::Permission(PermissionChecker::new(
            config.permissions.clone(),
        )));
    }
    if let Some(role) = config.role_for_level(platform_level) {
        checkers.push(Checker::Role(RoleChecker::new(role)));
    }
    Ok(checkers)
}
