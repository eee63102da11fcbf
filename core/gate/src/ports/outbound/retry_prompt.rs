//! 拒否で終わった実行を再試行するかをユーザーに問い合わせる Outbound ポート

use common::error::Error;

pub trait RetryPrompt: Send + Sync {
    /// 再試行するなら true
    fn ask_retry(&self, errors: &[String]) -> Result<bool, Error>;
}
