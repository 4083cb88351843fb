use std::io::{self, Write};

use anyhow::Context;
use runner_engine::{
    fetch_dataset, inspect_run, launch_run, ApiToken, ApifyClient, ClientSettings, RunStore,
    ENV_API_TOKEN,
};
use runner_logging::{runner_debug, runner_info};
use serde_json::Value;

use super::input::load_run_input;
use crate::cli::{Cli, Command};

/// Run the one stage the operator picked, then exit.
pub fn run_app(cli: Cli) -> anyhow::Result<()> {
    run_with_token(cli, std::env::var(ENV_API_TOKEN).ok())
}

fn run_with_token(cli: Cli, raw_token: Option<String>) -> anyhow::Result<()> {
    runner_logging::set_stage(cli.command.stage().label());

    // Missing credentials fail here, before any request is built.
    let token = ApiToken::new(raw_token)?;

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("building tokio runtime")?;
    runtime.block_on(run_stage(cli, token))
}

async fn run_stage(cli: Cli, token: ApiToken) -> anyhow::Result<()> {
    let settings = ClientSettings::default().with_base_url(cli.base_url.clone());
    let client = ApifyClient::new(settings, token).context("configuring API client")?;
    let store = RunStore::new(cli.data_dir.clone());
    runner_debug!("Data directory {}", store.dir().display());

    match cli.command {
        Command::Launch { input, profiles } => {
            let input = load_run_input(input.as_deref(), &profiles)?;
            let outcome = launch_run(&client, &store, &cli.actor, &input)
                .await
                .with_context(|| format!("launching actor {}", cli.actor))?;
            runner_info!(
                "Recorded run {} ({} run(s) in {})",
                outcome.run.id(),
                outcome.logged_runs,
                store.run_log().path().display()
            );
            print_json(&Value::from(outcome.run))
        }
        Command::Inspect { run_id } => {
            let outcome = inspect_run(&client, &store, run_id.as_deref())
                .await
                .context("inspecting run")?;
            runner_info!("Saved run state to {}", outcome.results_path.display());
            print_json(&Value::from(outcome.run))
        }
        Command::Fetch { run_id } => {
            let outcome = fetch_dataset(&client, &store, run_id.as_deref())
                .await
                .context("fetching dataset items")?;
            runner_info!(
                "Dataset {} of run {} saved to {}",
                outcome.dataset_id,
                outcome.run_id,
                outcome.dataset_path.display()
            );
            print_json(&Value::Array(outcome.items))
        }
    }
}

fn print_json(value: &Value) -> anyhow::Result<()> {
    let text = serde_json::to_string_pretty(value)?;
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{text}").context("writing to stdout")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use runner_engine::ConfigError;
    use tempfile::TempDir;
    use wiremock::matchers::any;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn missing_token_sends_no_request() {
        let rt = tokio::runtime::Runtime::new().unwrap();
        let server = rt.block_on(MockServer::start());
        rt.block_on(
            Mock::given(any())
                .respond_with(ResponseTemplate::new(200))
                .expect(0)
                .mount(&server),
        );
        let temp = TempDir::new().unwrap();
        let data_dir = temp.path().to_str().unwrap();
        let base_url = server.uri();

        for (stage, token) in [("launch", None), ("fetch", Some("  ".to_string()))] {
            let mut args = vec!["actor-runner", "--data-dir", data_dir];
            args.extend(["--base-url", base_url.as_str(), stage]);
            if stage == "launch" {
                args.extend(["--profile", "a"]);
            }
            let cli = Cli::try_parse_from(args).unwrap();

            let err = run_with_token(cli, token).unwrap_err();
            assert_eq!(
                err.downcast_ref::<ConfigError>(),
                Some(&ConfigError::MissingToken),
                "{err:#}"
            );
        }

        rt.block_on(server.verify());
        assert!(!temp.path().join("run.json").exists());
    }
}
