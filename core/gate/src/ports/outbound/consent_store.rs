//! 同意記録の永続キー・バリュー Outbound ポート
//!
//! キーは `agree-<capabilityName>`、値は bool。アプリ専用の名前空間に置く。
//! 呼び出しはパイプラインで直列化されるのでロックは持たない。

use common::error::Error;

/// 同意記録ストア（adapter で実装）
pub trait ConsentStore: Send + Sync {
    /// 記録が無ければ Ok(None)
    fn get(&self, key: &str) -> Result<Option<bool>, Error>;
    /// 既存の値は上書きする
    fn put(&self, key: &str, value: bool) -> Result<(), Error>;
}
