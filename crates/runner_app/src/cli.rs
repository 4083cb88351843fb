use std::path::PathBuf;

use clap::{Parser, Subcommand};
use runner_core::Stage;
use runner_engine::{DEFAULT_ACTOR_ID, DEFAULT_BASE_URL, ENV_ACTOR_ID, ENV_BASE_URL};

use crate::platform::logging::LogDestination;

#[derive(Parser, Debug)]
#[command(
    name = "actor-runner",
    version,
    about = "Launch scraper actor runs and collect their datasets into local JSON files"
)]
pub struct Cli {
    /// Directory holding run.json and the per-run files.
    #[arg(long, global = true, default_value = ".")]
    pub data_dir: PathBuf,

    #[arg(long, global = true, value_enum, default_value_t = LogDestination::Terminal)]
    pub log: LogDestination,

    /// Log at debug level.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, env = ENV_ACTOR_ID, default_value = DEFAULT_ACTOR_ID)]
    pub actor: String,

    #[arg(long, global = true, env = ENV_BASE_URL, default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Start a new actor run and append it to run.json.
    Launch {
        /// RON file with the actor input; defaults apply to missing keys.
        #[arg(long)]
        input: Option<PathBuf>,
        /// Profile to scrape; repeat for several. Replaces the file's list.
        #[arg(long = "profile")]
        profiles: Vec<String>,
    },
    /// Fetch a run's current state once and append it to run-result-<id>.json.
    Inspect {
        /// Defaults to the latest run in run.json.
        #[arg(long)]
        run_id: Option<String>,
    },
    /// Download a logged run's dataset items into dataset-<id>.json.
    Fetch {
        /// Defaults to the latest run in run.json.
        #[arg(long)]
        run_id: Option<String>,
    },
}

impl Command {
    pub fn stage(&self) -> Stage {
        match self {
            Command::Launch { .. } => Stage::Launch,
            Command::Inspect { .. } => Stage::Inspect,
            Command::Fetch { .. } => Stage::Fetch,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn launch_collects_repeated_profiles() {
        let cli = Cli::try_parse_from([
            "actor-runner",
            "launch",
            "--profile",
            "alice",
            "--profile",
            "@bob",
            "--data-dir",
            "out",
        ])
        .unwrap();

        assert_eq!(cli.data_dir, PathBuf::from("out"));
        assert_eq!(
            cli.command,
            Command::Launch {
                input: None,
                profiles: vec!["alice".to_string(), "@bob".to_string()],
            }
        );
        assert_eq!(cli.command.stage(), Stage::Launch);
    }

    #[test]
    fn fetch_takes_optional_run_id() {
        let cli = Cli::try_parse_from(["actor-runner", "fetch"]).unwrap();
        assert_eq!(cli.command, Command::Fetch { run_id: None });

        let cli = Cli::try_parse_from(["actor-runner", "--log", "both", "fetch", "--run-id", "r1"])
            .unwrap();
        assert_eq!(cli.log, LogDestination::Both);
        assert_eq!(cli.command.stage(), Stage::Fetch);
        assert_eq!(
            cli.command,
            Command::Fetch {
                run_id: Some("r1".to_string())
            }
        );
    }

    #[test]
    fn a_stage_is_required() {
        assert!(Cli::try_parse_from(["actor-runner"]).is_err());
    }
}
