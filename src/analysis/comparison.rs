use super::scoring::FeatureSimilarity;
use crate::models::{AudioFeatures, Feature, Track};

/// Display-only scaling used by the comparison charts.
///
/// Tempo and duration are divided by the larger of the two compared values
/// (floored at 1); bounded features pass through unchanged.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureNormalizer {
    max_tempo: f64,
    max_duration: f64,
}

impl FeatureNormalizer {
    pub fn for_pair(a: &AudioFeatures, b: &AudioFeatures) -> Self {
        Self {
            max_tempo: a.get(Feature::Tempo).max(b.get(Feature::Tempo)).max(1.0),
            max_duration: a
                .get(Feature::DurationMs)
                .max(b.get(Feature::DurationMs))
                .max(1.0),
        }
    }

    pub fn normalize(&self, feature: Feature, value: f64) -> f64 {
        match feature {
            Feature::Tempo => value / self.max_tempo,
            Feature::DurationMs => value / self.max_duration,
            _ => value,
        }
    }
}

/// Coarse badge for how far apart two values of one feature are
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum DifferenceLevel {
    VerySimilar,
    Similar,
    Different,
    VeryDifferent,
}

impl DifferenceLevel {
    /// Bounded features compare in percentage points (5 / 15 / 30),
    /// tempo in BPM (10 / 25 / 50). Duration has no badge.
    pub fn classify(feature: Feature, a: f64, b: f64) -> Option<Self> {
        let (diff, thresholds) = match feature {
            Feature::DurationMs => return None,
            _ if feature.is_bounded() => ((a - b).abs() * 100.0, [5.0, 15.0, 30.0]),
            _ => ((a - b).abs(), [10.0, 25.0, 50.0]),
        };

        Some(if diff < thresholds[0] {
            DifferenceLevel::VerySimilar
        } else if diff < thresholds[1] {
            DifferenceLevel::Similar
        } else if diff < thresholds[2] {
            DifferenceLevel::Different
        } else {
            DifferenceLevel::VeryDifferent
        })
    }

    pub fn label(self) -> &'static str {
        match self {
            DifferenceLevel::VerySimilar => "Very Similar",
            DifferenceLevel::Similar => "Similar",
            DifferenceLevel::Different => "Different",
            DifferenceLevel::VeryDifferent => "Very Different",
        }
    }
}

/// Human readable value: percentage, BPM or m:ss
pub fn format_feature_value(feature: Feature, value: f64) -> String {
    match feature {
        Feature::Tempo => format!("{value:.0} BPM"),
        Feature::DurationMs => {
            let total_secs = (value / 1000.0).round().max(0.0) as u64;
            format!("{}:{:02}", total_secs / 60, total_secs % 60)
        }
        _ => format!("{:.1}%", value * 100.0),
    }
}

/// One line of the comparison table
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureRow {
    pub feature: Feature,
    pub original: f64,
    pub comparison: f64,
    /// Chart values after display normalization
    pub original_scaled: f64,
    pub comparison_scaled: f64,
    pub difference: Option<DifferenceLevel>,
}

impl FeatureRow {
    pub fn original_display(&self) -> String {
        format_feature_value(self.feature, self.original)
    }

    pub fn comparison_display(&self) -> String {
        format_feature_value(self.feature, self.comparison)
    }
}

/// Side by side feature comparison of two tracks
#[derive(Debug, Clone)]
pub struct FeatureComparison {
    pub original: Track,
    pub comparison: Track,
    pub rows: Vec<FeatureRow>,
    pub similarity: f64,
}

impl FeatureComparison {
    pub fn between(original: &Track, comparison: &Track) -> Self {
        let a = &original.features;
        let b = &comparison.features;
        let normalizer = FeatureNormalizer::for_pair(a, b);

        let with_duration = a.duration_ms.is_some() || b.duration_ms.is_some();
        let rows = Feature::ALL
            .iter()
            .copied()
            .filter(|&feature| feature != Feature::DurationMs || with_duration)
            .map(|feature| {
                let original = a.get(feature);
                let comparison = b.get(feature);
                FeatureRow {
                    feature,
                    original,
                    comparison,
                    original_scaled: normalizer.normalize(feature, original),
                    comparison_scaled: normalizer.normalize(feature, comparison),
                    difference: DifferenceLevel::classify(feature, original, comparison),
                }
            })
            .collect();

        Self {
            original: original.clone(),
            comparison: comparison.clone(),
            rows,
            similarity: FeatureSimilarity::score(a, b),
        }
    }

    pub fn similarity_percent(&self) -> i64 {
        FeatureSimilarity::as_percent(self.similarity)
    }

    pub fn row(&self, feature: Feature) -> Option<&FeatureRow> {
        self.rows.iter().find(|row| row.feature == feature)
    }
}
