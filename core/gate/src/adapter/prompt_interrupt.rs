//! Ctrl+C をプロンプトの中断として扱う InterruptChecker 実装
//!
//! プロンプト待ちの間に押されたら中断フラグを立て、CliInteraction が実行を放棄する
//! （終了コード 130）。プロンプト外で押されたら待つものが無いので、その場で 130 で終了する。

use crate::ports::outbound::InterruptChecker;
use common::error::Error;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// 割り込み時の終了コード
const INTERRUPTED_EXIT_CODE: i32 = 130;

#[derive(Debug, Default)]
struct PromptState {
    prompting: AtomicBool,
    interrupted: AtomicBool,
}

impl PromptState {
    /// シグナルを受けた。プロンプト中なら中断を記録して false、そうでなければ true（即終了）。
    fn on_signal(&self) -> bool {
        if self.prompting.load(Ordering::SeqCst) {
            self.interrupted.store(true, Ordering::SeqCst);
            false
        } else {
            true
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct PromptInterrupt {
    state: Arc<PromptState>,
}

impl PromptInterrupt {
    pub fn new() -> Self {
        Self::default()
    }

    /// プロセスの Ctrl+C ハンドラとして登録する（プロセスにつき 1 回だけ成功する）
    pub fn install(&self) -> Result<(), Error> {
        let state = Arc::clone(&self.state);
        ctrlc::set_handler(move || {
            if state.on_signal() {
                eprintln!();
                std::process::exit(INTERRUPTED_EXIT_CODE);
            }
        })
        .map_err(|e| Error::system(format!("failed to install Ctrl+C handler: {}", e)))
    }
}

impl InterruptChecker for PromptInterrupt {
    fn begin_prompt(&self) {
        self.state.interrupted.store(false, Ordering::SeqCst);
        self.state.prompting.store(true, Ordering::SeqCst);
    }

    fn end_prompt(&self) {
        self.state.prompting.store(false, Ordering::SeqCst);
    }

    fn is_interrupted(&self) -> bool {
        self.state.interrupted.load(Ordering::SeqCst)
    }
}
