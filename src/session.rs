//! Blocking HTTP session against the recipe site.

use std::time::Duration;

use log::debug;
use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, CONNECTION};

use crate::config::Settings;
use crate::error::ImportError;

/// Path of the random-recipe redirect page.
pub const RANDOM_RECIPE_PATH: &str = "recettes/recette-hasard.aspx";

pub struct MarmitonSession {
    client: Client,
    base_url: String,
}

impl MarmitonSession {
    pub fn new() -> Result<Self, ImportError> {
        Self::from_settings(&Settings::default())
    }

    pub fn from_settings(settings: &Settings) -> Result<Self, ImportError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("text/html"));
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.5"));
        headers.insert(CONNECTION, HeaderValue::from_static("keep-alive"));
        headers.insert("Upgrade-Insecure-Requests", HeaderValue::from_static("1"));
        headers.insert("Sec-GPC", HeaderValue::from_static("1"));

        let client = Client::builder()
            .user_agent(settings.user_agent.parse::<HeaderValue>()?)
            .default_headers(headers)
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()?;

        Ok(MarmitonSession {
            client,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Fetch a path relative to the configured base URL.
    pub fn fetch(&self, path: &str) -> Result<String, ImportError> {
        let url = format!("{}/{}", self.base_url, path.trim_start_matches('/'));
        self.fetch_url(&url)
    }

    /// Fetch the page of a random recipe.
    pub fn fetch_random(&self) -> Result<String, ImportError> {
        self.fetch(RANDOM_RECIPE_PATH)
    }

    /// Fetch an absolute URL.
    pub fn fetch_url(&self, url: &str) -> Result<String, ImportError> {
        debug!("GET {url}");
        let body = self.client.get(url).send()?.error_for_status()?.text()?;
        Ok(body)
    }
}
