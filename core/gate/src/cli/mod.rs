//! CLI 境界（引数解析）

mod args;

pub use args::{config_to_command, parse_args, print_completion, Config, ParseOutcome};
#[cfg(test)]
pub use args::parse_args_from;
