use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, info};
use url::Url;
use vocabot_core::Translator;

use crate::retry::retry_with_backoff;

const LOOKUP_URL: &str = "https://dictionary.yandex.net/api/v1/dicservice.json/lookup";

/// Read the first translation out of a dictionary lookup response.
///
/// The lookup answers `{"def": [{"tr": [{"text": "..."}]}]}`; any other shape
/// yields `None`.
#[must_use]
pub fn extract_translation(response: &serde_json::Value) -> Option<String> {
    response["def"][0]["tr"][0]["text"]
        .as_str()
        .filter(|t| !t.is_empty())
        .map(ToString::to_string)
}

/// Yandex Dictionary lookup client.
pub struct YandexTranslator {
    client: Client,
    api_key: String,
    lang: String,
    base_url: String,
    retry_delays: Vec<Duration>,
}

impl YandexTranslator {
    pub fn new(api_key: String, lang: String, timeout: Duration) -> anyhow::Result<Self> {
        info!("Creating YandexTranslator for {lang}");
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            api_key,
            lang,
            base_url: LOOKUP_URL.to_string(),
            retry_delays: Vec::new(),
        })
    }

    #[must_use]
    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url;
        self
    }

    #[must_use]
    pub fn with_retry_delays(mut self, delays: Vec<Duration>) -> Self {
        self.retry_delays = delays;
        self
    }

    fn lookup_url(&self, text: &str) -> anyhow::Result<Url> {
        Ok(Url::parse_with_params(
            &self.base_url,
            &[
                ("key", self.api_key.as_str()),
                ("lang", self.lang.as_str()),
                ("text", text),
            ],
        )?)
    }

    /// Helper method to send a single lookup
    async fn try_lookup(&self, url: &Url) -> anyhow::Result<String> {
        let response = self
            .client
            .get(url.clone())
            .send()
            .await?
            .error_for_status()?
            .json::<serde_json::Value>()
            .await?;

        extract_translation(&response)
            .ok_or_else(|| anyhow::anyhow!("Invalid response format: missing translation"))
    }
}

#[async_trait]
impl Translator for YandexTranslator {
    async fn translate(&self, source_text: &str) -> anyhow::Result<String> {
        let url = self.lookup_url(source_text)?;

        debug!("Looking up \"{source_text}\" ({})", self.lang);
        let translation =
            retry_with_backoff(|| self.try_lookup(&url), &self.retry_delays).await?;

        debug!("\"{source_text}\" -> \"{translation}\"");
        Ok(translation)
    }
}
