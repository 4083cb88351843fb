use std::fs;
use std::path::Path;

use anyhow::Context;
use runner_core::RunInput;
use runner_logging::runner_info;

/// Build the actor input from an optional RON file plus command-line profiles.
///
/// Unlike run state, an input file the operator named must exist and parse.
pub(crate) fn load_run_input(path: Option<&Path>, profiles: &[String]) -> anyhow::Result<RunInput> {
    let mut input = match path {
        Some(path) => {
            let content = fs::read_to_string(path)
                .with_context(|| format!("reading run input {}", path.display()))?;
            let input: RunInput = ron::from_str(&content)
                .with_context(|| format!("parsing run input {}", path.display()))?;
            runner_info!("Loaded run input from {}", path.display());
            input
        }
        None => RunInput::default(),
    };

    if profiles.is_empty() {
        input.normalize_profiles();
    } else {
        input = input.with_profiles(profiles);
    }
    Ok(input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use runner_core::ProfileSorting;
    use tempfile::TempDir;

    #[test]
    fn ron_file_overrides_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("input.ron");
        fs::write(
            &path,
            r#"(
                profiles: ["@swarecito", "other"],
                profileSorting: popular,
                resultsPerPage: 20,
                shouldDownloadCovers: true,
            )"#,
        )
        .unwrap();

        let input = load_run_input(Some(&path), &[]).unwrap();
        assert_eq!(input.profiles, vec!["swarecito".to_string(), "other".to_string()]);
        assert_eq!(input.profile_sorting, ProfileSorting::Popular);
        assert_eq!(input.results_per_page, 20);
        assert!(input.should_download_covers);
        assert_eq!(input.max_profiles_per_query, 10);
    }

    #[test]
    fn command_line_profiles_replace_file_profiles() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("input.ron");
        fs::write(&path, r#"(profiles: ["from-file"], resultsPerPage: 5)"#).unwrap();

        let input = load_run_input(Some(&path), &["cli".to_string()]).unwrap();
        assert_eq!(input.profiles, vec!["cli".to_string()]);
        assert_eq!(input.results_per_page, 5);
    }

    #[test]
    fn no_file_uses_defaults() {
        let input = load_run_input(None, &["a".to_string()]).unwrap();
        assert_eq!(input, RunInput::default().with_profiles(["a"]));
    }

    #[test]
    fn missing_or_invalid_file_is_an_error() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("nope.ron");
        let err = load_run_input(Some(&missing), &[]).unwrap_err();
        assert!(err.to_string().contains("reading run input"));

        let bad = temp.path().join("bad.ron");
        fs::write(&bad, "(profiles: [").unwrap();
        let err = load_run_input(Some(&bad), &[]).unwrap_err();
        assert!(err.to_string().contains("parsing run input"));
    }
}
