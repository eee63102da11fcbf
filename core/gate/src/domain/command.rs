//! CLI から解釈したコマンド

/// capgate が実行するコマンド
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateCommand {
    Help,
    /// パイプラインを最後まで実行する（拒否時は再試行を問い合わせる）
    Run,
    /// 各 checker の現在の状態を表示する（プロンプトは出さない）
    Status,
}
