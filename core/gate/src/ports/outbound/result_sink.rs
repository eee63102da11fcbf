//! 実行結果の通知先 Outbound ポート

/// パイプラインの結果を受け取る
///
/// 実行開始時に空リスト（前回の表示を消す合図）、終了時に集めたメッセージで呼ばれる。
/// 終了時の空リストは全能力の取得成功を意味する。
pub trait ResultSink: Send + Sync {
    fn report_errors(&self, errors: &[String]);
}
