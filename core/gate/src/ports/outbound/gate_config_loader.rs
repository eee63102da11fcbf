//! ゲート設定を読み込む Outbound ポート

use crate::domain::GateConfig;
use common::error::Error;

pub trait GateConfigLoader: Send + Sync {
    /// 設定ファイルが無ければ既定値を返す。内容が不正なら Err。
    fn load(&self) -> Result<GateConfig, Error>;
}
