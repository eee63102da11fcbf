//! アダプター: Outbound ポートの標準実装（ファイル・標準入出力・シグナル）

pub(crate) mod cli_interaction;
pub(crate) mod file_consent_store;
pub(crate) mod file_grant_platform;
pub(crate) mod gate_config_loader;
pub(crate) mod prompt_interrupt;
pub(crate) mod retry_prompt;
pub(crate) mod sinks;

pub(crate) use cli_interaction::CliInteraction;
pub(crate) use file_consent_store::FileConsentStore;
pub(crate) use file_grant_platform::FileGrantPlatform;
pub(crate) use gate_config_loader::FileGateConfigLoader;
pub(crate) use prompt_interrupt::PromptInterrupt;
pub(crate) use retry_prompt::{CliRetryPrompt, NoRetryPrompt};
pub(crate) use sinks::StderrResultSink;
