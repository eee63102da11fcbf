mod adapter;
mod cli;
mod domain;
mod ports;
mod usecase;
mod wiring;

#[cfg(test)]
mod tests;

use std::process;
use common::error::Error;
use common::ports::outbound::{LogLevel, LogRecord};
use cli::{config_to_command, parse_args, print_completion, Config, ParseOutcome};
use domain::GateCommand;
use ports::inbound::UseCaseRunner;
use usecase::app::GateOutcome;
use wiring::{wire_gate, App};

/// Command をディスパッチする Runner（match は main レイヤーに集約）
struct Runner {
    app: App,
}

impl UseCaseRunner for Runner {
    fn run(&self, config: Config) -> Result<i32, Error> {
        let cmd = config_to_command(&config)?;
        let command_name = cmd_name_for_log(&cmd);
        let _ = self.app.logger.log(
            &LogRecord::new(LogLevel::Info, "command started")
                .layer("cli")
                .kind("lifecycle")
                .field("command", command_name),
        );

        let result = match cmd {
            GateCommand::Help => {
                print_help();
                Ok(0)
            }
            GateCommand::Status => {
                for s in self.app.gate_use_case.status()? {
                    let mark = if s.granted { "granted" } else { "missing" };
                    println!("{:<8} {}", mark, s.label);
                }
                Ok(0)
            }
            GateCommand::Run => self.app.gate_use_case.run().map(|outcome| {
                if outcome == GateOutcome::Granted {
                    println!("All capabilities granted.");
                }
                outcome.exit_code()
            }),
        };

        let code = result.as_ref().copied().unwrap_or_else(|e| e.exit_code());
        let _ = self.app.logger.log(
            &LogRecord::new(LogLevel::Info, "command finished")
                .layer("cli")
                .kind("lifecycle")
                .field("command", command_name)
                .field("exit_code", code),
        );
        if let Err(ref e) = result {
            let _ = self.app.logger.log(
                &LogRecord::new(LogLevel::Error, e.to_string())
                    .layer("cli")
                    .kind("error"),
            );
        }
        result
    }
}

fn cmd_name_for_log(cmd: &GateCommand) -> &'static str {
    match cmd {
        GateCommand::Help => "help",
        GateCommand::Run => "run",
        GateCommand::Status => "status",
    }
}

fn main() {
    let exit_code = match run() {
        Ok(code) => code,
        Err(e) => {
            if e.is_usage() {
                print_usage();
            }
            eprintln!("capgate: {}", e);
            e.exit_code()
        }
    };
    process::exit(exit_code);
}

pub fn run() -> Result<i32, Error> {
    let config = match parse_args()? {
        ParseOutcome::Config(c) => c,
        ParseOutcome::GenerateCompletion(shell) => {
            print_completion(shell);
            return Ok(0);
        }
    };
    if config.help {
        print_help();
        return Ok(0);
    }
    let app = wire_gate(&config)?;
    let runner = Runner { app };
    runner.run(config)
}

fn print_usage() {
    eprintln!("Usage: capgate [options] [run|status]");
}

fn print_help() {
    println!("Usage: capgate [options] [run|status]");
    println!("Commands:");
    println!("  run (default)          Walk every capability checker in order, prompting for the first missing one");
    println!("  status                 Show whether each capability is currently held (no prompts)");
    println!("Options:");
    println!("  -h, --help             Show this help message");
    println!("  --no-interactive       Do not prompt (CI-friendly: every prompt is declined, no retry)");
    println!("  -v, --verbose          Also print structured logs to stderr");
    println!("  --config <path>        Path to gate.json (default: <config dir>/gate.json)");
    println!("  --generate <shell>     Generate shell completion script (bash, zsh, fish)");
    println!();
    println!("Environment:");
    println!("  CAPGATE_HOME    Home directory. Config: $CAPGATE_HOME/config, state: $CAPGATE_HOME/state");
    println!("                  If unset, $XDG_CONFIG_HOME/capgate and $XDG_STATE_HOME/capgate are used.");
    println!();
    println!("State files:");
    println!("  consent.json    Recorded consent answers (agree-<capability>)");
    println!("  platform.json   Simulated platform permissions and roles");
    println!("  logs/capgate.jsonl");
    println!();
    println!("Exit status:");
    println!("  0 granted, 1 denied, 64 usage, 65 bad config, 130 interrupted");
}
