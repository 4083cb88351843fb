use pretty_assertions::assert_eq;
use runner_core::{InputError, ProfileSorting, RunInput};
use serde_json::json;

#[test]
fn default_input_serializes_with_actor_keys() {
    let input = RunInput::default().with_profiles(["swarecito"]);
    let value = serde_json::to_value(&input).unwrap();

    assert_eq!(
        value,
        json!({
            "profiles": ["swarecito"],
            "profileSorting": "latest",
            "excludePinnedPosts": false,
            "resultsPerPage": 50,
            "maxProfilesPerQuery": 10,
            "shouldDownloadVideos": false,
            "shouldDownloadCovers": false,
            "shouldDownloadSubtitles": false,
            "shouldDownloadSlideshowImages": false,
            "shouldDownloadAvatars": false,
            "shouldDownloadMusicCovers": false,
            "proxyCountryCode": "None"
        })
    );
}

#[test]
fn partial_input_fills_in_defaults() {
    let input: RunInput =
        serde_json::from_value(json!({"profiles": ["a"], "profileSorting": "popular"})).unwrap();
    assert_eq!(input.profile_sorting, ProfileSorting::Popular);
    assert_eq!(input.results_per_page, 50);
    assert_eq!(input.proxy_country_code, "None");
}

#[test]
fn profiles_are_trimmed_and_lose_leading_at() {
    let input = RunInput::default().with_profiles([" @alice ", "", "bob", "@"]);
    assert_eq!(input.profiles, vec!["alice".to_string(), "bob".to_string()]);
}

#[test]
fn validate_rejects_empty_profiles_and_zero_page_size() {
    assert_eq!(RunInput::default().validate(), Err(InputError::NoProfiles));

    let mut input = RunInput::default().with_profiles(["a"]);
    input.results_per_page = 0;
    assert_eq!(input.validate(), Err(InputError::ZeroResultsPerPage));

    input.results_per_page = 1;
    assert_eq!(input.validate(), Ok(()));
}
