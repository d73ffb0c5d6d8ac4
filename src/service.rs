use crate::analysis::FeatureComparison;
use crate::catalog::{RecommendationSet, TrackNormalizer};
use crate::client::RecommendationApi;
use crate::models::{RecommendRequest, RecommendationType, Track};
use anyhow::{Context, Result};

/// Front door for the views: fetches from the backend and hands back
/// normalized tracks, recommendation sets and comparisons
pub struct SoundScope<A: RecommendationApi> {
    api: A,
    recommendation_count: u32,
}

impl<A: RecommendationApi> SoundScope<A> {
    pub fn new(api: A, recommendation_count: u32) -> Self {
        Self {
            api,
            recommendation_count,
        }
    }

    pub fn load_catalog(&self, random_sample: bool) -> Result<Vec<Track>> {
        let songs = self
            .api
            .fetch_catalog(random_sample)
            .context("Failed to fetch songs")?;
        Ok(TrackNormalizer::normalize_all(songs))
    }

    pub fn song(&self, id: &str) -> Result<Track> {
        let song = self.api.fetch_song(id)?;
        TrackNormalizer::normalize(song)
            .ok_or_else(|| anyhow::anyhow!("Backend returned song '{}' without an id", id))
    }

    /// Ask every recommendation method for `n` neighbours of `query`
    pub fn recommendations_for(&self, query: &Track) -> Result<RecommendationSet> {
        let mut responses = Vec::with_capacity(RecommendationType::ALL.len());
        for recommendation_type in RecommendationType::ALL {
            let request = RecommendRequest {
                track_id: query.id.clone(),
                n: self.recommendation_count,
                mode: Some(recommendation_type.mode()),
            };
            let recommendations = self.api.recommend(&request).with_context(|| {
                format!(
                    "Failed to load {} recommendations for '{}'",
                    recommendation_type.label(),
                    query.id
                )
            })?;
            responses.push((recommendation_type, recommendations));
        }

        let set = RecommendationSet::from_responses(query, responses);
        tracing::info!(
            track_id = %query.id,
            cluster = set.cluster.len(),
            knn = set.knn.len(),
            hybrid = set.hybrid.len(),
            "Recommendations loaded"
        );
        Ok(set)
    }

    pub fn compare(&self, original_id: &str, comparison_id: &str) -> Result<FeatureComparison> {
        let original = self.song(original_id)?;
        let comparison = self.song(comparison_id)?;
        Ok(FeatureComparison::between(&original, &comparison))
    }
}
