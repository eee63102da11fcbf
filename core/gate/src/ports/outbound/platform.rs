//! プラットフォーム（OS）の権限・ロール状態 Outbound ポート

use common::error::Error;
use serde::{Deserialize, Serialize};

/// 1 つの権限の状態
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PermissionState {
    Granted,
    #[default]
    Denied,
    /// 「今後表示しない」付きで拒否された。システムはもうダイアログを出さない。
    DeniedPermanently,
}

/// 権限・ロールの現在値を問い合わせる（読み取り専用・副作用なし）
pub trait GrantPlatform: Send + Sync {
    /// プラットフォームのバージョンレベル（Role checker を置くかの判定に使う）
    fn level(&self) -> u32;
    fn permission_state(&self, permission: &str) -> PermissionState;
    /// このプラットフォームがロールを提供しているか
    fn is_role_available(&self, role: &str) -> bool;
    fn is_role_held(&self, role: &str) -> bool;
}

/// システムダイアログの回答をプラットフォームへ書き戻す（OS 側の永続化に相当）
pub trait GrantRecorder: Send + Sync {
    fn record_permission(&self, permission: &str, granted: bool) -> Result<(), Error>;
    fn record_role(&self, role: &str, held: bool) -> Result<(), Error>;
}
