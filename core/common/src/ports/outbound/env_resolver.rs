//! 環境変数解決 Outbound ポート
//!
//! 設定・状態ディレクトリを環境変数から解決する。
//! usecase はこの trait 経由でのみ環境変数にアクセスする。

use crate::domain::{Dirs, HomeDir};
use crate::error::Error;

/// 環境変数解決抽象（Outbound ポート）
///
/// 実装は `common::adapter::StdEnvResolver` やテスト用のモックなど。
pub trait EnvResolver: Send + Sync {
    /// CAPGATE_HOME が設定されていれば返す
    fn home_dir_from_env(&self) -> Option<HomeDir>;

    /// config / state ディレクトリを解決する
    ///
    /// 優先順位:
    /// 1. CAPGATE_HOME（config = $CAPGATE_HOME/config, state = $CAPGATE_HOME/state）
    /// 2. $XDG_CONFIG_HOME/capgate と $XDG_STATE_HOME/capgate
    /// 3. $HOME/.config/capgate と $HOME/.local/state/capgate
    fn resolve_dirs(&self) -> Result<Dirs, Error>;
}
