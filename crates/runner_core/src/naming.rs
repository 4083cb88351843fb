/// Append-only list of every launched run.
pub const RUN_LOG_FILENAME: &str = "run.json";

/// `dataset-{run_id}.json`, or `None` when the id is not [`file_safe_id`].
pub fn dataset_filename(run_id: &str) -> Option<String> {
    file_safe_id(run_id).map(|id| format!("dataset-{id}.json"))
}

/// `run-result-{run_id}.json`, or `None` when the id is not [`file_safe_id`].
pub fn run_result_filename(run_id: &str) -> Option<String> {
    file_safe_id(run_id).map(|id| format!("run-result-{id}.json"))
}

/// The id itself when sanitizing leaves it unchanged.
///
/// Sanitizing is lossy (`a/b`, `a:b` and `a_b` all become `a_b`), so an id
/// that would change is refused rather than sharing another run's files.
pub fn file_safe_id(run_id: &str) -> Option<&str> {
    sanitize_run_id(run_id)
        .filter(|safe| safe == run_id)
        .map(|_| run_id)
}

/// Make a run id safe to embed in a file name.
///
/// Forbidden characters become `_`, runs of `_` collapse, and leading or
/// trailing `_`, `.` and spaces are stripped so an id can never name a parent
/// directory.
pub fn sanitize_run_id(run_id: &str) -> Option<String> {
    let replaced: String = run_id
        .chars()
        .map(|c| if is_forbidden(c) { '_' } else { c })
        .collect();

    let mut compacted = String::with_capacity(replaced.len());
    let mut prev_underscore = false;
    for c in replaced.chars() {
        if c == '_' {
            if !prev_underscore {
                compacted.push(c);
            }
            prev_underscore = true;
        } else {
            compacted.push(c);
            prev_underscore = false;
        }
    }

    let trimmed = compacted.trim_matches(&['_', ' ', '.'][..]);
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn is_forbidden(c: char) -> bool {
    matches!(c,
        '\\' | '/' | ':' | '*' | '?' | '"' | '<' | '>' | '|' | '\0'..='\u{1F}'
    )
}
