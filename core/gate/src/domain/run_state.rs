//! パイプラインの状態機械

/// パイプラインの状態
///
/// Idle → Evaluating → (AwaitingExternal → Evaluating)* → Finished。
/// Finished から抜けるのは on_start のみ。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState {
    Idle,
    /// 評価中（None は開始直後でまだどの checker も見ていない）
    Evaluating(Option<usize>),
    /// cursor の checker が外部インタラクションの結果を待っている
    AwaitingExternal(usize),
    Finished,
}

/// 1 回の実行ごとの状態。on_start でのみ作り直す。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunState {
    /// 評価中の checker の位置（None = 未開始）。実行中は前にしか進まない。
    pub cursor: Option<usize>,
    /// 拒否・失敗メッセージ（発生順）
    pub errors: Vec<String>,
}

impl RunState {
    /// 次に走査を始める位置
    pub fn next_index(&self) -> usize {
        self.cursor.map_or(0, |c| c + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_index() {
        let mut run = RunState::default();
        assert_eq!(run.next_index(), 0);
        run.cursor = Some(2);
        assert_eq!(run.next_index(), 3);
    }
}
