//! プロンプト待ちの中断を知らせる Outbound ポート

/// プロンプト待ちの区間と、その間に中断されたかを扱う
///
/// CliInteraction は問い合わせの前後で begin_prompt / end_prompt を呼び、
/// 待っている間 is_interrupted をポーリングする。
pub trait InterruptChecker: Send + Sync {
    /// 問い合わせを始める。前の問い合わせの中断は持ち越さない。
    fn begin_prompt(&self);

    /// 問い合わせを終える
    fn end_prompt(&self);

    /// 現在の問い合わせ中に中断されたか
    fn is_interrupted(&self) -> bool;
}
