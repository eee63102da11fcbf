//! Ports & Adapters のポート定義
//!
//! - inbound: CLI がアプリを呼び出す入口
//! - outbound: パイプラインと checker が外界（同意記録・プラットフォーム・プロンプト）に依頼する trait

pub mod inbound;
pub mod outbound;
