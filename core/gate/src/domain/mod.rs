//! capgate 固有のドメイン型（型と不変条件）

pub mod capability;
pub mod command;
pub mod denial;
pub mod gate_config;
pub mod resume;
pub mod run_state;

pub use capability::{CapabilityName, CheckerKind};
pub use command::GateCommand;
pub use denial::Denial;
pub use gate_config::GateConfig;
pub use resume::{GrantResult, RequestId, ResultCode, ResumeEvent, PIPELINE_REQUEST_ID};
pub use run_state::{PipelineState, RunState};
