//! テスト用のメモリ実装（Outbound ポートのスタブ）

use crate::domain::{CapabilityName, RequestId, ResumeEvent};
use crate::ports::outbound::{
    ConsentStore, GrantPlatform, GrantRecorder, InteractionEvents, InteractionSurface,
    PermissionState, ResultSink, RetryPrompt,
};
use crate::usecase::checkers::{Checker, ConsentChecker, PermissionChecker, RoleChecker};
use crate::usecase::context::GateContext;
use crate::usecase::pipeline::GatePipeline;
use common::error::Error;
use common::ports::outbound::{Log, LogRecord};
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

#[derive(Default)]
pub struct MemoryConsentStore {
    values: Mutex<HashMap<String, bool>>,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
}

impl MemoryConsentStore {
    pub fn set(&self, key: &str, value: bool) {
        self.values.lock().unwrap().insert(key.to_string(), value);
    }

    pub fn value(&self, key: &str) -> Option<bool> {
        self.values.lock().unwrap().get(key).copied()
    }

    pub fn fail_reads(&self) {
        self.fail_reads.store(true, Ordering::SeqCst);
    }

    pub fn fail_writes(&self) {
        self.fail_writes.store(true, Ordering::SeqCst);
    }
}

impl ConsentStore for MemoryConsentStore {
    fn get(&self, key: &str) -> Result<Option<bool>, Error> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(Error::io_msg("read failed"));
        }
        Ok(self.value(key))
    }

    fn put(&self, key: &str, value: bool) -> Result<(), Error> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(Error::io_msg("disk full"));
        }
        self.set(key, value);
        Ok(())
    }
}

/// 問い合わせを記録するプラットフォーム。既定はレベル 34・権限なし・ロール提供なし。
pub struct StubPlatform {
    level: Mutex<u32>,
    permissions: Mutex<HashMap<String, PermissionState>>,
    available_roles: Mutex<Vec<String>>,
    held_roles: Mutex<Vec<String>>,
    queries: Mutex<Vec<String>>,
    recorded: Mutex<Vec<String>>,
}

impl StubPlatform {
    pub fn new() -> Self {
        Self {
            level: Mutex::new(34),
            permissions: Mutex::new(HashMap::new()),
            available_roles: Mutex::new(Vec::new()),
            held_roles: Mutex::new(Vec::new()),
            queries: Mutex::new(Vec::new()),
            recorded: Mutex::new(Vec::new()),
        }
    }

    pub fn set_level(&self, level: u32) {
        *self.level.lock().unwrap() = level;
    }

    pub fn set_permission(&self, name: &str, state: PermissionState) {
        self.permissions
            .lock()
            .unwrap()
            .insert(name.to_string(), state);
    }

    pub fn offer_role(&self, role: &str) {
        self.available_roles.lock().unwrap().push(role.to_string());
    }

    pub fn hold_role(&self, role: &str) {
        self.held_roles.lock().unwrap().push(role.to_string());
    }

    /// has_access 等で問い合わせられた対象（"permission:X" / "role:Y"）
    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().unwrap().clone()
    }

    /// GrantRecorder に書き戻された回答
    pub fn recorded(&self) -> Vec<String> {
        self.recorded.lock().unwrap().clone()
    }
}

impl GrantPlatform for StubPlatform {
    fn level(&self) -> u32 {
        *self.level.lock().unwrap()
    }

    fn permission_state(&self, permission: &str) -> PermissionState {
        self.queries
            .lock()
            .unwrap()
            .push(format!("permission:{}", permission));
        self.permissions
            .lock()
            .unwrap()
            .get(permission)
            .copied()
            .unwrap_or_default()
    }

    fn is_role_available(&self, role: &str) -> bool {
        self.queries.lock().unwrap().push(format!("role:{}", role));
        self.available_roles.lock().unwrap().iter().any(|r| r == role)
    }

    fn is_role_held(&self, role: &str) -> bool {
        self.held_roles.lock().unwrap().iter().any(|r| r == role)
    }
}

impl GrantRecorder for StubPlatform {
    fn record_permission(&self, permission: &str, granted: bool) -> Result<(), Error> {
        self.recorded
            .lock()
            .unwrap()
            .push(format!("{}={}", permission, granted));
        let state = if granted {
            PermissionState::Granted
        } else {
            PermissionState::Denied
        };
        self.set_permission(permission, state);
        Ok(())
    }

    fn record_role(&self, role: &str, held: bool) -> Result<(), Error> {
        self.recorded
            .lock()
            .unwrap()
            .push(format!("role:{}={}", role, held));
        if held {
            self.hold_role(role);
        }
        Ok(())
    }
}

/// 起動されたインタラクションを "consent:X" / "permissions:A,B" / "role:Y" で記録する
#[derive(Default)]
pub struct RecordingSurface {
    launched: Mutex<Vec<String>>,
}

impl RecordingSurface {
    pub fn launched(&self) -> Vec<String> {
        self.launched.lock().unwrap().clone()
    }
}

impl InteractionSurface for RecordingSurface {
    fn show_consent_prompt(&self, capability: &CapabilityName, _message: &str) {
        self.launched
            .lock()
            .unwrap()
            .push(format!("consent:{}", capability));
    }

    fn request_permissions(&self, _request_id: RequestId, permissions: &[String]) {
        self.launched
            .lock()
            .unwrap()
            .push(format!("permissions:{}", permissions.join(",")));
    }

    fn start_role_request(&self, _request_id: RequestId, role: &str) {
        self.launched.lock().unwrap().push(format!("role:{}", role));
    }
}

#[derive(Default)]
pub struct RecordingSink {
    reports: Mutex<Vec<Vec<String>>>,
}

impl RecordingSink {
    pub fn reports(&self) -> Vec<Vec<String>> {
        self.reports.lock().unwrap().clone()
    }

    pub fn last(&self) -> Option<Vec<String>> {
        self.reports.lock().unwrap().last().cloned()
    }
}

impl ResultSink for RecordingSink {
    fn report_errors(&self, errors: &[String]) {
        self.reports.lock().unwrap().push(errors.to_vec());
    }
}

#[derive(Default)]
pub struct RecordingLog {
    records: Mutex<Vec<LogRecord>>,
}

impl RecordingLog {
    pub fn messages(&self) -> Vec<String> {
        self.records
            .lock()
            .unwrap()
            .iter()
            .map(|r| r.message.clone())
            .collect()
    }
}

impl Log for RecordingLog {
    fn log(&self, record: &LogRecord) -> Result<(), Error> {
        self.records.lock().unwrap().push(record.clone());
        Ok(())
    }
}

/// 決められた順に再開イベントを返す
pub struct ScriptedEvents {
    events: Mutex<VecDeque<ResumeEvent>>,
}

impl ScriptedEvents {
    pub fn new(events: Vec<ResumeEvent>) -> Self {
        Self {
            events: Mutex::new(events.into()),
        }
    }

    pub fn remaining(&self) -> usize {
        self.events.lock().unwrap().len()
    }
}

impl InteractionEvents for ScriptedEvents {
    fn next_event(&self) -> Result<Option<ResumeEvent>, Error> {
        Ok(self.events.lock().unwrap().pop_front())
    }
}

/// 決められた順に再試行の回答を返す（尽きたら false）
#[derive(Default)]
pub struct ScriptedRetry {
    answers: Mutex<VecDeque<bool>>,
    asked: AtomicUsize,
}

impl ScriptedRetry {
    pub fn new(answers: Vec<bool>) -> Self {
        Self {
            answers: Mutex::new(answers.into()),
            asked: AtomicUsize::new(0),
        }
    }

    pub fn asked(&self) -> usize {
        self.asked.load(Ordering::SeqCst)
    }
}

impl RetryPrompt for ScriptedRetry {
    fn ask_retry(&self, _errors: &[String]) -> Result<bool, Error> {
        self.asked.fetch_add(1, Ordering::SeqCst);
        Ok(self.answers.lock().unwrap().pop_front().unwrap_or(false))
    }
}

/// スタブ一式
pub struct Harness {
    pub consent: Arc<MemoryConsentStore>,
    pub platform: Arc<StubPlatform>,
    pub surface: Arc<RecordingSurface>,
    pub sink: Arc<RecordingSink>,
    pub log: Arc<RecordingLog>,
}

impl Harness {
    pub fn new() -> Self {
        Self {
            consent: Arc::new(MemoryConsentStore::default()),
            platform: Arc::new(StubPlatform::new()),
            surface: Arc::new(RecordingSurface::default()),
            sink: Arc::new(RecordingSink::default()),
            log: Arc::new(RecordingLog::default()),
        }
    }

    pub fn ctx(&self) -> GateContext {
        GateContext {
            consent_store: Arc::clone(&self.consent) as _,
            platform: Arc::clone(&self.platform) as _,
            surface: Arc::clone(&self.surface) as _,
            log: Arc::clone(&self.log) as _,
        }
    }

    pub fn pipeline(&self, checkers: Vec<Checker>) -> GatePipeline {
        GatePipeline::new(self.ctx(), checkers, Arc::clone(&self.sink) as _)
    }
}

pub fn consent(name: &str) -> Checker {
    Checker::Consent(ConsentChecker::new(
        CapabilityName::parse(name).unwrap(),
        "explanation",
    ))
}

pub fn permission(names: &[&str]) -> Checker {
    Checker::Permission(PermissionChecker::new(
        names.iter().map(|s| s.to_string()).collect(),
    ))
}

pub fn role(name: &str) -> Checker {
    Checker::Role(RoleChecker::new(name))
}
