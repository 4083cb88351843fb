//! Runner core: job input, run descriptors and local naming rules. No IO.
mod input;
mod naming;
mod run;
mod stage;

pub use input::{InputError, ProfileSorting, RunInput};
pub use naming::{
    dataset_filename, file_safe_id, run_result_filename, sanitize_run_id, RUN_LOG_FILENAME,
};
pub use run::{find_run, latest_run, DescriptorError, RunDescriptor, TERMINAL_STATUSES};
pub use stage::Stage;
