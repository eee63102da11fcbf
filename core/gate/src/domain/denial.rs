//! ゲートの拒否理由
//!
//! プロセスを止めるエラーではなく、利用者に見せる文字列として RunState に積む。

/// 1 回の実行を打ち切る拒否の種類
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Denial {
    #[error("Consent was declined, so the protected feature stays disabled.")]
    ConsentDenied,
    #[error("Required permissions were denied.")]
    PermissionDenied,
    #[error("The required role was not granted.")]
    ExternalGrantDenied,
    /// checker が同期的に返したエラー（プラットフォームで利用不可など）
    #[error("{0}")]
    CheckerSynchronous(String),
}
