use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProfileSorting {
    #[default]
    Latest,
    Popular,
    Oldest,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("run input lists no profiles")]
    NoProfiles,
    #[error("resultsPerPage must be at least 1")]
    ZeroResultsPerPage,
}

/// Actor input for the profile scraper. Keys serialize in the camelCase form
/// the actor expects, both on the wire and in RON input files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RunInput {
    pub profiles: Vec<String>,
    pub profile_sorting: ProfileSorting,
    pub exclude_pinned_posts: bool,
    pub results_per_page: u32,
    pub max_profiles_per_query: u32,
    pub should_download_videos: bool,
    pub should_download_covers: bool,
    pub should_download_subtitles: bool,
    pub should_download_slideshow_images: bool,
    pub should_download_avatars: bool,
    pub should_download_music_covers: bool,
    pub proxy_country_code: String,
}

impl Default for RunInput {
    fn default() -> Self {
        Self {
            profiles: Vec::new(),
            profile_sorting: ProfileSorting::Latest,
            exclude_pinned_posts: false,
            results_per_page: 50,
            max_profiles_per_query: 10,
            should_download_videos: false,
            should_download_covers: false,
            should_download_subtitles: false,
            should_download_slideshow_images: false,
            should_download_avatars: false,
            should_download_music_covers: false,
            proxy_country_code: "None".to_string(),
        }
    }
}

impl RunInput {
    /// Replace the profile list, normalizing each entry.
    pub fn with_profiles<I, S>(mut self, profiles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.profiles = profiles
            .into_iter()
            .map(|p| p.as_ref().to_string())
            .collect();
        self.normalize_profiles();
        self
    }

    /// Trim whitespace and a leading `@`, then drop empty entries.
    pub fn normalize_profiles(&mut self) {
        self.profiles = self
            .profiles
            .iter()
            .map(|p| p.trim().trim_start_matches('@').trim().to_string())
            .filter(|p| !p.is_empty())
            .collect();
    }

    pub fn validate(&self) -> Result<(), InputError> {
        if self.profiles.is_empty() {
            return Err(InputError::NoProfiles);
        }
        if self.results_per_page == 0 {
            return Err(InputError::ZeroResultsPerPage);
        }
        Ok(())
    }
}
