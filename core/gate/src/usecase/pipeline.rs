//! GatePipeline: 能力 checker を順に評価する状態機械
//!
//! 先頭から能力を持っていない最初の checker を探して取得を要求し、
//! 外部インタラクションが起動されたら再開イベントが来るまで止まる。
//! 最初の拒否・同期エラーで実行全体を打ち切り（fail-fast）、集めたメッセージを
//! ResultSink に 1 回だけ渡す。再試行は on_start からやり直すだけでよい
//! （取得済みの checker はプロンプトなしで飛ばされる）。
//!
//! すべての遷移は &mut self で行い、スレッド間で共有しない。

use crate::domain::{
    CheckerKind, Denial, GrantResult, PipelineState, RequestId, ResultCode, ResumeEvent,
    RunState, PIPELINE_REQUEST_ID,
};
use crate::ports::outbound::ResultSink;
use crate::usecase::checkers::{CapabilityChecker, Checker};
use crate::usecase::context::GateContext;
use common::ports::outbound::{LogLevel, LogRecord};
use std::sync::Arc;

/// status 表示用の 1 行
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckerStatus {
    pub kind: CheckerKind,
    pub label: String,
    pub granted: bool,
}

pub struct GatePipeline {
    ctx: GateContext,
    checkers: Vec<Checker>,
    sink: Arc<dyn ResultSink>,
    state: PipelineState,
    run: RunState,
}

impl GatePipeline {
    pub fn new(ctx: GateContext, checkers: Vec<Checker>, sink: Arc<dyn ResultSink>) -> Self {
        Self {
            ctx,
            checkers,
            sink,
            state: PipelineState::Idle,
            run: RunState::default(),
        }
    }

    pub fn state(&self) -> PipelineState {
        self.state
    }

    pub fn errors(&self) -> &[String] {
        &self.run.errors
    }

    pub fn is_awaiting(&self) -> bool {
        matches!(self.state, PipelineState::AwaitingExternal(_))
    }

    /// 再開を待っている checker の種別
    pub fn pending_kind(&self) -> Option<CheckerKind> {
        match self.state {
            PipelineState::AwaitingExternal(i) => self.checkers.get(i).map(|c| c.kind()),
            _ => None,
        }
    }

    /// 各 checker の現在の状態（取得要求はしない）
    pub fn status(&self) -> Vec<CheckerStatus> {
        self.checkers
            .iter()
            .map(|c| CheckerStatus {
                kind: c.kind(),
                label: c.label(),
                granted: c.has_access(&self.ctx),
            })
            .collect()
    }

    /// 新しい実行を始める。待機中の実行があっても無条件にリセットする。
    pub fn on_start(&mut self) {
        if self.is_awaiting() {
            self.log(LogLevel::Info, "previous run abandoned by a new start", "pipeline");
        }
        self.run = RunState::default();
        self.state = PipelineState::Evaluating(None);
        self.sink.report_errors(&[]);
        let _ = self.ctx.log.log(
            &LogRecord::new(LogLevel::Info, "run started")
                .layer("usecase")
                .kind("pipeline")
                .field("checkers", self.checkers.len()),
        );
        self.advance();
    }

    /// 同意プロンプトの回答。回答は次へ進む前に保存する。
    pub fn on_consent_result(&mut self, agree: bool) {
        let Some(cursor) = self.pending_cursor(CheckerKind::Consent, "consent") else {
            return;
        };
        if let Some(Checker::Consent(checker)) = self.checkers.get(cursor) {
            checker.record_answer(&self.ctx, agree);
        }
        self.log_resume(cursor, agree);
        if agree {
            self.advance();
        } else {
            self.fail(Denial::ConsentDenied);
        }
    }

    /// 権限リクエストの結果。拒否が 1 つでもあれば拒否、なければ次へ進む。
    pub fn on_permission_result(
        &mut self,
        request_id: RequestId,
        permissions: &[String],
        grant_results: &[GrantResult],
    ) {
        if !self.is_pipeline_request(request_id, "permission_grant") {
            return;
        }
        let Some(cursor) = self.pending_cursor(CheckerKind::Permission, "permission_grant") else {
            return;
        };
        let all_granted = grant_results.iter().all(|r| *r == GrantResult::Granted);
        let _ = self.ctx.log.log(
            &LogRecord::new(LogLevel::Info, "permission result received")
                .layer("usecase")
                .kind("resume")
                .field("cursor", cursor)
                .field("permissions", permissions.to_vec())
                .field("granted", all_granted),
        );
        if all_granted {
            self.advance();
        } else {
            self.fail(Denial::PermissionDenied);
        }
    }

    /// ロール要求など外部アクティビティの結果
    pub fn on_external_result(&mut self, request_id: RequestId, result_code: ResultCode) {
        if !self.is_pipeline_request(request_id, "external_result") {
            return;
        }
        let Some(cursor) = self.pending_cursor(CheckerKind::Role, "external_result") else {
            return;
        };
        self.log_resume(cursor, result_code.is_ok());
        if result_code.is_ok() {
            self.advance();
        } else {
            self.fail(Denial::ExternalGrantDenied);
        }
    }

    /// 再開イベントを種類ごとの入口へ振り分ける
    pub fn dispatch(&mut self, event: ResumeEvent) {
        match event {
            ResumeEvent::Consent { agree } => self.on_consent_result(agree),
            ResumeEvent::PermissionGrant {
                request_id,
                permissions,
                grant_results,
            } => self.on_permission_result(request_id, &permissions, &grant_results),
            ResumeEvent::ExternalResult {
                request_id,
                result_code,
            } => self.on_external_result(request_id, result_code),
        }
    }

    /// cursor の次から、能力を持っていない最初の checker に取得を要求する。
    /// 同期的に片付いた checker はこのループ内でそのまま次へ進む。
    fn advance(&mut self) {
        loop {
            let start = self.run.next_index();
            let next = (start..self.checkers.len()).find(|&i| !self.checkers[i].has_access(&self.ctx));
            let Some(index) = next else {
                self.finish();
                return;
            };

            self.run.cursor = Some(index);
            self.state = PipelineState::Evaluating(Some(index));
            let handled = self.checkers[index].request_access(&self.ctx, false);
            let sync_errors = self.checkers[index]
                .as_error_source()
                .map(|source| source.errors())
                .unwrap_or_default();

            let _ = self.ctx.log.log(
                &LogRecord::new(LogLevel::Debug, "access requested")
                    .layer("usecase")
                    .kind("checker")
                    .field("cursor", index)
                    .field("checker", self.checkers[index].label())
                    .field("handled", handled)
                    .field("sync_errors", sync_errors.len()),
            );

            if !sync_errors.is_empty() {
                self.run.errors.extend(
                    sync_errors
                        .into_iter()
                        .map(|m| Denial::CheckerSynchronous(m).to_string()),
                );
                self.finish();
                return;
            }
            if handled {
                self.state = PipelineState::AwaitingExternal(index);
                return;
            }
        }
    }

    fn fail(&mut self, denial: Denial) {
        self.run.errors.push(denial.to_string());
        self.finish();
    }

    fn finish(&mut self) {
        self.state = PipelineState::Finished;
        let _ = self.ctx.log.log(
            &LogRecord::new(LogLevel::Info, "run finished")
                .layer("usecase")
                .kind("pipeline")
                .field("granted", self.run.errors.is_empty())
                .field("errors", self.run.errors.clone()),
        );
        self.sink.report_errors(&self.run.errors);
    }

    fn is_pipeline_request(&self, request_id: RequestId, event: &str) -> bool {
        if request_id == PIPELINE_REQUEST_ID {
            return true;
        }
        self.log_ignored(event, &format!("unexpected request id {}", request_id.0));
        false
    }

    /// 再開イベントが待機中の checker 宛てなら、その位置を返す
    fn pending_cursor(&self, expected: CheckerKind, event: &str) -> Option<usize> {
        let PipelineState::AwaitingExternal(cursor) = self.state else {
            self.log_ignored(event, "pipeline is not awaiting a result");
            return None;
        };
        match self.checkers.get(cursor) {
            Some(checker) if checker.kind() == expected => Some(cursor),
            Some(checker) => {
                self.log_ignored(event, &format!("pending checker is {}", checker.label()));
                None
            }
            None => {
                self.log(
                    LogLevel::Warn,
                    &format!("{} event for missing checker index {}", event, cursor),
                    "resume",
                );
                None
            }
        }
    }

    fn log_ignored(&self, event: &str, reason: &str) {
        if cfg!(debug_assertions) {
            let _ = self.ctx.log.log(
                &LogRecord::new(LogLevel::Debug, "resume event ignored")
                    .layer("usecase")
                    .kind("resume")
                    .field("event", event)
                    .field("reason", reason),
            );
        }
    }

    fn log_resume(&self, cursor: usize, granted: bool) {
        let _ = self.ctx.log.log(
            &LogRecord::new(LogLevel::Info, "resume received")
                .layer("usecase")
                .kind("resume")
                .field("cursor", cursor)
                .field("granted", granted),
        );
    }

    fn log(&self, level: LogLevel, message: &str, kind: &str) {
        let _ = self
            .ctx
            .log
            .log(&LogRecord::new(level, message).layer("usecase").kind(kind));
    }
}
