//! 外部インタラクション Outbound ポート
//!
//! checker は InteractionSurface でプロンプトやシステムダイアログを「起動」するだけで、
//! 結果は待たない。ホストは InteractionEvents から結果を受け取り、再開イベントとして
//! パイプラインに渡す。

use crate::domain::{CapabilityName, RequestId, ResumeEvent};
use common::error::Error;

/// 外部インタラクションを起動する面（UI を持つ側が実装）
///
/// 起動は失敗しない前提。結果は後で InteractionEvents から届く。
pub trait InteractionSurface: Send + Sync {
    /// はい / いいえ の同意プロンプトを表示する
    fn show_consent_prompt(&self, capability: &CapabilityName, message: &str);
    /// システムの権限リクエストを起動する
    fn request_permissions(&self, request_id: RequestId, permissions: &[String]);
    /// ロール取得の外部アクティビティを起動する
    fn start_role_request(&self, request_id: RequestId, role: &str);
}

/// 起動済みインタラクションの結果を取り出す（ホストのイベントループが使う）
pub trait InteractionEvents: Send + Sync {
    /// 次の結果を返す。待っているインタラクションが無ければ Ok(None)。
    /// Ctrl+C で中断された場合は Err。
    fn next_event(&self) -> Result<Option<ResumeEvent>, Error>;
}
