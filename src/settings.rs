use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

/// Environment variable holding the API base url
pub const BASE_URL_VAR: &str = "BASE_URL";

#[derive(Clone, Debug, Deserialize)]
pub struct Settings {
    /// Location of the page, fragment included
    pub page_url: String,
    /// Base that relative endpoint selections are resolved against, defaults to the page url
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default)]
    pub render_policy: RenderPolicy,
    #[serde(default)]
    pub failure_display: FailureDisplay,
}

/// Which of several overlapping responses is allowed to reach the output area
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RenderPolicy {
    /// Every response renders, the one resolving last stays visible
    LastResolved,
    /// Only the response of the most recently issued request renders
    LatestIssued,
}

impl Default for RenderPolicy {
    fn default() -> Self {
        RenderPolicy::LastResolved
    }
}

/// What the user sees when a call fails
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureDisplay {
    /// The failure is only logged, the output area keeps its content
    Silent,
    /// The failure is logged and rendered into the output area
    Visible,
}

impl Default for FailureDisplay {
    fn default() -> Self {
        FailureDisplay::Silent
    }
}

impl Settings {
    pub fn new(page_url: impl Into<String>) -> Self {
        Settings {
            page_url: page_url.into(),
            base_url: None,
            render_policy: RenderPolicy::default(),
            failure_display: FailureDisplay::default(),
        }
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings from '{}'", path.display()))?;

        serde_json::from_str(&raw)
            .with_context(|| format!("Invalid settings in '{}'", path.display()))
    }

    /// Fill in the base url from the environment when none is configured
    pub fn with_base_url_from_env(mut self) -> Self {
        if self.base_url.is_none() {
            self.base_url = std::env::var(BASE_URL_VAR)
                .ok()
                .filter(|value| !value.trim().is_empty());
        }
        self
    }
}
