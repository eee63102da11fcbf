//! checker に渡すコンテキスト（Outbound ポートの束）

use crate::ports::outbound::{ConsentStore, GrantPlatform, InteractionSurface};
use common::ports::outbound::Log;
use std::sync::Arc;

/// checker が状態問い合わせと取得要求に使うポート一式
#[derive(Clone)]
pub struct GateContext {
    pub consent_store: Arc<dyn ConsentStore>,
    pub platform: Arc<dyn GrantPlatform>,
    pub surface: Arc<dyn InteractionSurface>,
    pub log: Arc<dyn Log>,
}
