//! 実行時ディレクトリ（XDG / CAPGATE_HOME 解決結果）
//!
//! EnvResolver::resolve_dirs() で取得し、設定・同意記録・ログのパス計算に使う。

use std::path::PathBuf;

/// 解決済みの config / state ディレクトリ
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dirs {
    pub config_dir: PathBuf,
    pub state_dir: PathBuf,
}

impl Dirs {
    /// ゲート設定ファイル（config/gate.json）
    pub fn gate_config_path(&self) -> PathBuf {
        self.config_dir.join("gate.json")
    }

    /// 同意記録（state/consent.json）
    pub fn consent_path(&self) -> PathBuf {
        self.state_dir.join("consent.json")
    }

    /// 擬似プラットフォームの権限状態（state/platform.json）
    pub fn platform_path(&self) -> PathBuf {
        self.state_dir.join("platform.json")
    }

    /// ログ格納ディレクトリ
    pub fn logs_dir(&self) -> PathBuf {
        self.state_dir.join("logs")
    }
}
