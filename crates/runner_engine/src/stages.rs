use std::fmt::Display;
use std::path::PathBuf;

use runner_core::{InputError, RunDescriptor, RunInput};
use runner_logging::{runner_debug, runner_info, runner_warn};
use serde_json::Value;
use thiserror::Error;

use crate::{ensure_output_dir, ActorApi, ClientError, PersistError, RunStore};

#[derive(Debug, Error)]
pub enum StageError {
    #[error("invalid run input: {0}")]
    Input(#[from] InputError),
    #[error("remote call failed: {0}")]
    Client(#[from] ClientError),
    #[error("local store: {0}")]
    Persist(#[from] PersistError),
}

#[derive(Debug, Clone)]
pub struct LaunchOutcome {
    pub run: RunDescriptor,
    pub logged_runs: usize,
}

#[derive(Debug, Clone)]
pub struct InspectOutcome {
    pub run: RunDescriptor,
    pub results_path: PathBuf,
}

#[derive(Debug, Clone)]
pub struct FetchOutcome {
    pub run_id: String,
    pub dataset_id: String,
    pub items: Vec<Value>,
    pub dataset_path: PathBuf,
    pub stored_items: usize,
}

/// Start an actor run and append its descriptor to the run log.
///
/// The data directory and the existing run log are checked before the remote
/// call, so a started run is never left unrecorded because of a bad path or a
/// corrupt log. The run id is logged before it is written.
pub async fn launch_run(
    api: &dyn ActorApi,
    store: &RunStore,
    actor_id: &str,
    input: &RunInput,
) -> Result<LaunchOutcome, StageError> {
    input.validate()?;
    ensure_output_dir(store.dir())?;
    store.runs()?;

    let run = api.start_run(actor_id, input).await?;
    runner_info!(
        "Run {} started (status {}), dataset {}",
        run.id(),
        run.status().unwrap_or("unknown"),
        run.default_dataset_id()
    );
    let logged_runs = store.record_run(&run)?;
    Ok(LaunchOutcome { run, logged_runs })
}

/// Fetch the current state of a run once and append it to its run-result file.
///
/// The file is keyed on the requested id, whatever id the service answers with.
pub async fn inspect_run(
    api: &dyn ActorApi,
    store: &RunStore,
    run_id: Option<&str>,
) -> Result<InspectOutcome, StageError> {
    let run_id = match run_id {
        Some(id) => id.to_string(),
        None => store.latest_run()?.id().to_string(),
    };
    let results = store.run_result_file(&run_id)?;
    results.read()?;

    let run = api.get_run(&run_id).await?;
    if run.id() != run_id {
        runner_warn!("Asked for run {} but the service returned {}", run_id, run.id());
    }
    runner_info!(
        "Run {} of actor {} is {}{} (started {}, finished {})",
        run.id(),
        run.act_id().unwrap_or("unknown"),
        run.status().unwrap_or("unknown"),
        if run.is_terminal() { " (finished)" } else { "" },
        timestamp(run.started_at()),
        timestamp(run.finished_at())
    );
    results.append(std::slice::from_ref(&run))?;
    Ok(InspectOutcome {
        run,
        results_path: results.path().to_path_buf(),
    })
}

fn timestamp(at: Option<impl Display>) -> String {
    at.map(|t| t.to_string()).unwrap_or_else(|| "-".to_string())
}

/// Pull the items of a logged run's default dataset and append them to the
/// run's dataset file.
///
/// An unreadable dataset file fails before the download; the downloaded items
/// are logged before they are written.
pub async fn fetch_dataset(
    api: &dyn ActorApi,
    store: &RunStore,
    run_id: Option<&str>,
) -> Result<FetchOutcome, StageError> {
    let run = store.resolve_run(run_id)?;
    let dataset = store.dataset_file(run.id())?;
    dataset.read()?;
    let dataset_id = run.default_dataset_id().to_string();

    runner_info!("Fetching dataset {} for run {}", dataset_id, run.id());
    let items = api.list_items(&dataset_id).await?;
    runner_info!(
        "Fetched {} item(s): {}",
        items.len(),
        Value::Array(items.clone())
    );
    let stored_items = dataset.append(items.as_slice())?;
    runner_debug!("{} now holds {} item(s)", dataset.path().display(), stored_items);

    Ok(FetchOutcome {
        run_id: run.id().to_string(),
        dataset_id,
        items,
        dataset_path: dataset.path().to_path_buf(),
        stored_items,
    })
}
