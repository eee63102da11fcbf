//! Outbound ポート: パイプラインが外界を使うための trait

pub mod consent_store;
pub mod gate_config_loader;
pub mod interaction;
pub mod interrupt_checker;
pub mod platform;
pub mod result_sink;
pub mod retry_prompt;

pub use consent_store::ConsentStore;
pub use gate_config_loader::GateConfigLoader;
pub use interaction::{InteractionEvents, InteractionSurface};
pub use interrupt_checker::InterruptChecker;
pub use platform::{GrantPlatform, GrantRecorder, PermissionState};
pub use result_sink::ResultSink;
pub use retry_prompt::RetryPrompt;
