use crate::config::Config;
use crate::models::{
    BackendRecommendation, BackendSong, ClustersResponse, RecommendRequest, RecommendResponse,
};
use anyhow::Result;
use std::time::Duration;
use ureq::Agent;
use urlencoding::encode;

/// Calls made against the recommendation service
#[cfg_attr(test, mockall::automock)]
pub trait RecommendationApi {
    /// `GET /clusters?random_sample=<bool>`
    fn fetch_catalog(&self, random_sample: bool) -> Result<Vec<BackendSong>>;

    /// `GET /song/{id}`
    fn fetch_song(&self, id: &str) -> Result<BackendSong>;

    /// `POST /recommend`
    fn recommend(&self, request: &RecommendRequest) -> Result<Vec<BackendRecommendation>>;
}

/// A simple blocking client for the recommendation REST service
pub struct RecommendationClient {
    agent: Agent,
    base_url: String,
}

impl RecommendationClient {
    /// Create a new client with configuration from environment
    pub fn new(config: &Config) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build();

        RecommendationClient {
            agent,
            base_url: config.api_url.trim_end_matches('/').to_string(),
        }
    }

    /// Test the API connection with the service root
    pub fn ping(&self) -> Result<String> {
        let url = format!("{}/", self.base_url);
        let response = self
            .agent
            .get(&url)
            .call()
            .map_err(|e| anyhow::anyhow!("Ping failed: {}", e))?;

        Ok(response.into_string()?)
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

impl RecommendationApi for RecommendationClient {
    fn fetch_catalog(&self, random_sample: bool) -> Result<Vec<BackendSong>> {
        let url = self.endpoint("clusters");
        tracing::info!(%url, random_sample, "Fetching catalog");

        let response = self
            .agent
            .get(&url)
            .query("random_sample", if random_sample { "true" } else { "false" })
            .call()
            .map_err(|e| anyhow::anyhow!("HTTP request failed: {}", e))?;

        let parsed: ClustersResponse = response
            .into_json()
            .map_err(|e| anyhow::anyhow!("Failed to parse catalog response: {}", e))?;

        tracing::debug!(songs = parsed.songs.len(), "Catalog received");
        Ok(parsed.songs)
    }

    fn fetch_song(&self, id: &str) -> Result<BackendSong> {
        let url = self.endpoint(&format!("song/{}", encode(id)));
        tracing::info!(%url, "Fetching song");

        let response = match self.agent.get(&url).call() {
            Ok(response) => response,
            Err(ureq::Error::Status(404, _)) => {
                return Err(anyhow::anyhow!("Song '{}' not found", id));
            }
            Err(e) => return Err(anyhow::anyhow!("HTTP request failed: {}", e)),
        };

        response
            .into_json()
            .map_err(|e| anyhow::anyhow!("Failed to parse song '{}': {}", id, e))
    }

    fn recommend(&self, request: &RecommendRequest) -> Result<Vec<BackendRecommendation>> {
        let url = self.endpoint("recommend");
        tracing::info!(%url, track_id = %request.track_id, n = request.n, mode = ?request.mode, "Requesting recommendations");

        let response = self
            .agent
            .post(&url)
            .send_json(request)
            .map_err(|e| anyhow::anyhow!("Recommendation request failed: {}", e))?;

        let parsed: RecommendResponse = response
            .into_json()
            .map_err(|e| anyhow::anyhow!("Failed to parse recommendations: {}", e))?;

        Ok(parsed.recommendations)
    }
}
