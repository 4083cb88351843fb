//! Runner engine: remote API client, local JSON stores and the operator stages.
mod client;
mod persist;
mod settings;
mod stages;
mod store;
mod types;

pub use client::{ActorApi, ApifyClient};
pub use persist::{ensure_output_dir, AtomicFileWriter, PersistError};
pub use settings::{
    ApiToken, ClientSettings, ConfigError, DEFAULT_ACTOR_ID, DEFAULT_BASE_URL, ENV_ACTOR_ID,
    ENV_API_TOKEN, ENV_BASE_URL,
};
pub use stages::{
    fetch_dataset, inspect_run, launch_run, FetchOutcome, InspectOutcome, LaunchOutcome,
    StageError,
};
pub use store::{JsonListFile, RunStore};
pub use types::{ClientError, FailureKind};
