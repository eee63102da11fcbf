//! 端末上の外部インタラクション実装（CLI 境界）
//!
//! checker が起動したプロンプト・システムダイアログはキューに積むだけで、
//! ホストのループが next_event を呼んだときに stdin で問い合わせて再開イベントにする。
//! 権限・ロールの回答は OS と同じく GrantRecorder へ書き戻す。
//! 問い合わせ中は InterruptChecker をポーリングし、Ctrl+C または入力の終端で
//! Error::Interrupted を返す（実行を放棄して終了コード 130）。

use crate::domain::{CapabilityName, GrantResult, RequestId, ResultCode, ResumeEvent};
use crate::ports::outbound::{GrantRecorder, InteractionEvents, InteractionSurface, InterruptChecker};
use common::error::Error;
use std::collections::VecDeque;
use std::io::{self, BufRead, BufReader, Write};
use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// 起動済みで結果待ちのインタラクション
#[derive(Debug, Clone, PartialEq, Eq)]
enum PendingInteraction {
    Consent {
        capability: CapabilityName,
        message: String,
    },
    Permissions {
        request_id: RequestId,
        permissions: Vec<String>,
    },
    Role {
        request_id: RequestId,
        role: String,
    },
}

/// 回答を読む入力（通常は stdin）
type SharedInput = Arc<Mutex<Box<dyn BufRead + Send>>>;

pub struct CliInteraction {
    pending: Mutex<VecDeque<PendingInteraction>>,
    input: SharedInput,
    recorder: Arc<dyn GrantRecorder>,
    interrupt_checker: Option<Arc<dyn InterruptChecker>>,
    /// true ならプロンプトを出さず常に「いいえ」と答える（CI 用）
    non_interactive: bool,
}

impl CliInteraction {
    pub fn new(
        recorder: Arc<dyn GrantRecorder>,
        interrupt_checker: Option<Arc<dyn InterruptChecker>>,
        non_interactive: bool,
    ) -> Self {
        Self::with_input(
            Box::new(BufReader::new(io::stdin())),
            recorder,
            interrupt_checker,
            non_interactive,
        )
    }

    /// 回答を任意の入力から読む
    pub fn with_input(
        input: Box<dyn BufRead + Send>,
        recorder: Arc<dyn GrantRecorder>,
        interrupt_checker: Option<Arc<dyn InterruptChecker>>,
        non_interactive: bool,
    ) -> Self {
        Self {
            pending: Mutex::new(VecDeque::new()),
            input: Arc::new(Mutex::new(input)),
            recorder,
            interrupt_checker,
            non_interactive,
        }
    }

    fn push(&self, interaction: PendingInteraction) {
        self.pending
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push_back(interaction);
    }

    fn pop(&self) -> Option<PendingInteraction> {
        self.pending
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .pop_front()
    }

    /// [y/N] を問い合わせる。
    ///
    /// 入力の終端や Ctrl+C は回答ではなく中断として Err を返す。
    fn ask_yes_no(&self, question: &str) -> Result<bool, Error> {
        eprint!("{} [y/N]: ", question);
        let _ = io::stderr().flush();
        if self.non_interactive {
            eprintln!("n (non-interactive)");
            return Ok(false);
        }

        if let Some(c) = &self.interrupt_checker {
            c.begin_prompt();
        }
        let answer = self.wait_for_line();
        if let Some(c) = &self.interrupt_checker {
            c.end_prompt();
        }

        let line = answer?.ok_or_else(|| {
            eprintln!();
            Error::interrupted("Input ended before the prompt was answered.")
        })?;
        let input = line.trim().to_lowercase();
        Ok(input == "y" || input == "yes")
    }

    /// 入力を別スレッドで 1 行読み、待つ間は割り込みをポーリングする。終端なら None。
    fn wait_for_line(&self) -> Result<Option<String>, Error> {
        let (tx, rx) = mpsc::channel();
        let input = Arc::clone(&self.input);
        std::thread::spawn(move || {
            let mut line = String::new();
            let read = input
                .lock()
                .unwrap_or_else(|e| e.into_inner())
                .read_line(&mut line);
            let _ = tx.send(read.map(|n| (n > 0).then_some(line)));
        });

        let timeout = Duration::from_millis(100);
        loop {
            match rx.recv_timeout(timeout) {
                Ok(read) => return read.map_err(Error::from),
                Err(mpsc::RecvTimeoutError::Timeout) => {
                    if self
                        .interrupt_checker
                        .as_ref()
                        .map_or(false, |c| c.is_interrupted())
                    {
                        eprintln!();
                        return Err(Error::interrupted(
                            "Interrupted by user (Ctrl+C) during prompt.",
                        ));
                    }
                }
                Err(mpsc::RecvTimeoutError::Disconnected) => {
                    return Err(Error::system("prompt reader stopped unexpectedly"))
                }
            }
        }
    }
}

impl InteractionSurface for CliInteraction {
    fn show_consent_prompt(&self, capability: &CapabilityName, message: &str) {
        self.push(PendingInteraction::Consent {
            capability: capability.clone(),
            message: message.to_string(),
        });
    }

    fn request_permissions(&self, request_id: RequestId, permissions: &[String]) {
        self.push(PendingInteraction::Permissions {
            request_id,
            permissions: permissions.to_vec(),
        });
    }

    fn start_role_request(&self, request_id: RequestId, role: &str) {
        self.push(PendingInteraction::Role {
            request_id,
            role: role.to_string(),
        });
    }
}

impl InteractionEvents for CliInteraction {
    fn next_event(&self) -> Result<Option<ResumeEvent>, Error> {
        let Some(interaction) = self.pop() else {
            return Ok(None);
        };
        let event = match interaction {
            PendingInteraction::Consent {
                capability,
                message,
            } => {
                eprintln!("============ Consent =============");
                eprintln!("  {}", message);
                let agree = self.ask_yes_no(&format!("Agree to '{}'?", capability))?;
                ResumeEvent::Consent { agree }
            }
            PendingInteraction::Permissions {
                request_id,
                permissions,
            } => {
                eprintln!("========== Permissions ===========");
                let mut grant_results = Vec::with_capacity(permissions.len());
                for p in &permissions {
                    let granted = self.ask_yes_no(&format!("Allow permission {}?", p))?;
                    self.recorder.record_permission(p, granted)?;
                    grant_results.push(if granted {
                        GrantResult::Granted
                    } else {
                        GrantResult::Denied
                    });
                }
                ResumeEvent::PermissionGrant {
                    request_id,
                    permissions,
                    grant_results,
                }
            }
            PendingInteraction::Role { request_id, role } => {
                eprintln!("============== Role ==============");
                let held = self.ask_yes_no(&format!("Assign the '{}' role to capgate?", role))?;
                self.recorder.record_role(&role, held)?;
                ResumeEvent::ExternalResult {
                    request_id,
                    result_code: if held {
                        ResultCode::Ok
                    } else {
                        ResultCode::Canceled
                    },
                }
            }
        };
        Ok(Some(event))
    }
}
