use crate::models::{AudioFeatures, Feature};

/// Feature based similarity between two tracks
pub struct FeatureSimilarity;

impl FeatureSimilarity {
    /// Similarity over the bounded mood/texture features: `1 - mean(|a[k] - b[k]|)`.
    ///
    /// Tempo and duration are left out so an unbounded value cannot dominate.
    /// Result is in [0, 1] when every input is in [0, 1].
    pub fn score(a: &AudioFeatures, b: &AudioFeatures) -> f64 {
        Self::score_over(a, b, &Feature::BOUNDED)
    }

    /// Same average over an explicit feature list. An empty list compares nothing and scores 1.
    pub fn score_over(a: &AudioFeatures, b: &AudioFeatures, features: &[Feature]) -> f64 {
        if features.is_empty() {
            return 1.0;
        }

        let total_difference: f64 = features
            .iter()
            .map(|&feature| (a.get(feature) - b.get(feature)).abs())
            .sum();

        1.0 - total_difference / features.len() as f64
    }

    /// Rounded percentage for display
    pub fn as_percent(score: f64) -> i64 {
        if score.is_finite() {
            (score * 100.0).round() as i64
        } else {
            0
        }
    }
}
