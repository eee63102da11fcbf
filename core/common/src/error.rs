//! エラーハンドリング
//!
//! インフラ層の失敗（I/O・JSON・設定・割り込み）を 1 つの型にまとめ、
//! main で終了コードへ変換する。ゲートの拒否理由はここではなくメッセージ文字列で運ぶ。

/// エラー型
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// ファイル I/O の失敗
    #[error("{0}")]
    Io(String),
    /// JSON のシリアライズ・パース失敗
    #[error("JSON error: {0}")]
    Json(String),
    /// 環境変数が解決できない
    #[error("{0}")]
    Env(String),
    /// 引数不正（usage を表示する）
    #[error("{0}")]
    InvalidArgument(String),
    /// 設定ファイルの内容が不正
    #[error("Invalid configuration: {0}")]
    Config(String),
    /// その他のシステムエラー
    #[error("{0}")]
    System(String),
    /// Ctrl+C でプロンプトが中断された
    #[error("{0}")]
    Interrupted(String),
}

impl Error {
    pub fn io_msg(msg: impl Into<String>) -> Self {
        Self::Io(msg.into())
    }

    pub fn json(msg: impl Into<String>) -> Self {
        Self::Json(msg.into())
    }

    pub fn env(msg: impl Into<String>) -> Self {
        Self::Env(msg.into())
    }

    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn system(msg: impl Into<String>) -> Self {
        Self::System(msg.into())
    }

    pub fn interrupted(msg: impl Into<String>) -> Self {
        Self::Interrupted(msg.into())
    }

    /// usage を表示すべきエラーか
    pub fn is_usage(&self) -> bool {
        matches!(self, Self::InvalidArgument(_))
    }

    /// プロセス終了コード（sysexits.h に準拠）
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::InvalidArgument(_) => 64,
            Self::Config(_) | Self::Json(_) => 65,
            Self::Env(_) => 78,
            Self::Interrupted(_) => 130,
            Self::Io(_) | Self::System(_) => 70,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e.to_string())
    }
}
