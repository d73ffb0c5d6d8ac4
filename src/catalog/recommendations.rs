use super::normalize::TrackNormalizer;
use crate::models::{BackendRecommendation, Recommendation, RecommendationType, Track};
use std::collections::HashSet;

/// Recommendations for one query track, grouped by the method that produced them
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecommendationSet {
    pub cluster: Vec<Recommendation>,
    pub knn: Vec<Recommendation>,
    pub hybrid: Vec<Recommendation>,
}

impl RecommendationSet {
    /// Build from raw backend answers, one per recommendation method
    pub fn from_responses(
        query: &Track,
        responses: impl IntoIterator<Item = (RecommendationType, Vec<BackendRecommendation>)>,
    ) -> Self {
        let mut set = Self::default();
        for (recommendation_type, recommendations) in responses {
            for recommendation in recommendations {
                if let Some(rec) = TrackNormalizer::normalize_recommendation(
                    query,
                    recommendation,
                    recommendation_type,
                ) {
                    set.push(rec);
                }
            }
        }
        set
    }

    /// Append to the list matching the recommendation's own type
    pub fn push(&mut self, recommendation: Recommendation) {
        match recommendation.meta.recommendation_type {
            RecommendationType::Cluster => self.cluster.push(recommendation),
            RecommendationType::Knn => self.knn.push(recommendation),
            RecommendationType::Hybrid => self.hybrid.push(recommendation),
        }
    }

    pub fn get(&self, recommendation_type: RecommendationType) -> &[Recommendation] {
        match recommendation_type {
            RecommendationType::Cluster => &self.cluster,
            RecommendationType::Knn => &self.knn,
            RecommendationType::Hybrid => &self.hybrid,
        }
    }

    /// Cluster, then knn, then hybrid results
    pub fn iter(&self) -> impl Iterator<Item = &Recommendation> {
        self.cluster.iter().chain(&self.knn).chain(&self.hybrid)
    }

    pub fn len(&self) -> usize {
        self.cluster.len() + self.knn.len() + self.hybrid.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Highest scoring recommendation across all methods
    pub fn best(&self) -> Option<&Recommendation> {
        self.iter().max_by(|a, b| {
            a.meta
                .similarity_score
                .partial_cmp(&b.meta.similarity_score)
                .unwrap_or(std::cmp::Ordering::Equal)
        })
    }

    /// Playlist for the preview player: the query track followed by every
    /// recommendation, each id at most once
    pub fn playlist(&self, query: &Track) -> Vec<Track> {
        let mut seen = HashSet::new();
        std::iter::once(query)
            .chain(self.iter().map(|rec| &rec.track))
            .filter(|track| seen.insert(track.id.clone()))
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{mock_catalog, mock_recommendations, track};
    use serde_json::json;

    fn raw(value: serde_json::Value) -> Vec<BackendRecommendation> {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_from_responses_groups_and_excludes_query() {
        let query = track("q", "Query", Some("https://example.com/q.mp3"));
        let set = RecommendationSet::from_responses(
            &query,
            vec![
                (
                    RecommendationType::Cluster,
                    raw(json!([{ "id": "a", "cluster": 1 }, { "id": "q" }])),
                ),
                (
                    RecommendationType::Knn,
                    raw(json!([{ "id": "b", "similarity": 0.9 }])),
                ),
                (
                    RecommendationType::Hybrid,
                    raw(json!([{ "id": "c", "similarity": 0.95 }, { "id": "a", "similarity": 0.5 }])),
                ),
            ],
        );

        assert_eq!(set.cluster.len(), 1);
        assert_eq!(set.knn.len(), 1);
        assert_eq!(set.hybrid.len(), 2);
        assert!(set.iter().all(|rec| rec.track.id != query.id));
        assert_eq!(set.best().unwrap().track.id, "c");
    }

    #[test]
    fn test_playlist_starts_with_query_and_dedups() {
        let query = track("q", "Query", Some("https://example.com/q.mp3"));
        let set = RecommendationSet::from_responses(
            &query,
            vec![
                (RecommendationType::Knn, raw(json!([{ "id": "a" }, { "id": "b" }]))),
                (RecommendationType::Hybrid, raw(json!([{ "id": "b" }, { "id": "c" }]))),
            ],
        );

        let ids: Vec<String> = set.playlist(&query).into_iter().map(|t| t.id).collect();
        assert_eq!(ids, vec!["q", "a", "b", "c"]);
    }

    #[test]
    fn test_mock_generator_slices_by_method() {
        let catalog = mock_catalog(42, 60);
        let selected = catalog[0].clone();
        let set = mock_recommendations(&selected, &catalog);

        assert_eq!(set.cluster.len(), 6);
        assert_eq!(set.knn.len(), 6);
        assert_eq!(set.hybrid.len(), 6);
        assert!(set.iter().all(|rec| rec.track.id != selected.id));

        let cluster_ids: Vec<Option<u32>> =
            set.cluster.iter().map(|rec| rec.meta.cluster_id).collect();
        assert_eq!(
            cluster_ids,
            vec![Some(1), Some(1), Some(2), Some(2), Some(3), Some(3)]
        );
        assert!(set.knn.iter().all(|rec| rec.meta.cluster_id.is_none()));

        // Ranked slices: every cluster pick scores at least as high as any knn pick
        let worst_cluster = set
            .cluster
            .iter()
            .map(|rec| rec.meta.similarity_score)
            .fold(f64::INFINITY, f64::min);
        assert!(set.knn.iter().all(|rec| rec.meta.similarity_score <= worst_cluster));
    }
}
