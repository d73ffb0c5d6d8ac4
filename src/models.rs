use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

pub const UNKNOWN_TITLE: &str = "Unknown Title";
pub const UNKNOWN_ARTIST: &str = "Unknown Artist";
pub const UNKNOWN_ALBUM: &str = "Unknown Album";
pub const PLACEHOLDER_ART: &str = "/placeholder.svg";

/// Named audio attributes carried by every track
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Feature {
    Danceability,
    Energy,
    Valence,
    Speechiness,
    Instrumentalness,
    Acousticness,
    Liveness,
    Tempo,
    DurationMs,
}

impl Feature {
    /// Mood/texture attributes, conventionally in [0, 1]
    pub const BOUNDED: [Feature; 7] = [
        Feature::Danceability,
        Feature::Energy,
        Feature::Valence,
        Feature::Speechiness,
        Feature::Instrumentalness,
        Feature::Acousticness,
        Feature::Liveness,
    ];

    pub const ALL: [Feature; 9] = [
        Feature::Danceability,
        Feature::Energy,
        Feature::Valence,
        Feature::Speechiness,
        Feature::Instrumentalness,
        Feature::Acousticness,
        Feature::Liveness,
        Feature::Tempo,
        Feature::DurationMs,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Feature::Danceability => "Danceability",
            Feature::Energy => "Energy",
            Feature::Valence => "Valence",
            Feature::Speechiness => "Speechiness",
            Feature::Instrumentalness => "Instrumentalness",
            Feature::Acousticness => "Acousticness",
            Feature::Liveness => "Liveness",
            Feature::Tempo => "Tempo",
            Feature::DurationMs => "Duration",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Feature::Danceability => "How suitable a track is for dancing",
            Feature::Energy => "Perceptual measure of intensity and power",
            Feature::Valence => "Musical positiveness conveyed by a track",
            Feature::Speechiness => "Presence of spoken words in a track",
            Feature::Instrumentalness => "Predicts whether a track contains no vocals",
            Feature::Acousticness => "Confidence measure of whether the track is acoustic",
            Feature::Liveness => "Detects the presence of an audience in the recording",
            Feature::Tempo => "Overall estimated tempo of a track in BPM",
            Feature::DurationMs => "Length of the track",
        }
    }

    pub fn is_bounded(self) -> bool {
        !matches!(self, Feature::Tempo | Feature::DurationMs)
    }
}

/// Audio feature vector of a track. Absent or non-numeric values are 0.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct AudioFeatures {
    #[serde(deserialize_with = "lenient_f64")]
    pub danceability: f64,
    #[serde(deserialize_with = "lenient_f64")]
    pub energy: f64,
    #[serde(deserialize_with = "lenient_f64")]
    pub valence: f64,
    #[serde(deserialize_with = "lenient_f64")]
    pub speechiness: f64,
    #[serde(deserialize_with = "lenient_f64")]
    pub instrumentalness: f64,
    #[serde(deserialize_with = "lenient_f64")]
    pub acousticness: f64,
    #[serde(deserialize_with = "lenient_f64")]
    pub liveness: f64,
    #[serde(deserialize_with = "lenient_f64")]
    pub tempo: f64,
    #[serde(deserialize_with = "lenient_duration")]
    pub duration_ms: Option<u64>,
}

impl AudioFeatures {
    /// Value of a single feature; NaN and infinities read as 0
    pub fn get(&self, feature: Feature) -> f64 {
        let raw = match feature {
            Feature::Danceability => self.danceability,
            Feature::Energy => self.energy,
            Feature::Valence => self.valence,
            Feature::Speechiness => self.speechiness,
            Feature::Instrumentalness => self.instrumentalness,
            Feature::Acousticness => self.acousticness,
            Feature::Liveness => self.liveness,
            Feature::Tempo => self.tempo,
            Feature::DurationMs => self.duration_ms.unwrap_or(0) as f64,
        };
        if raw.is_finite() { raw } else { 0.0 }
    }
}

/// A song as shown to the user: identity, display strings and features
#[derive(Debug, Clone, PartialEq)]
pub struct Track {
    pub id: String,
    pub name: String,
    pub artist: String,
    pub album: String,
    pub album_art_url: String,
    pub preview_url: Option<String>,
    pub features: AudioFeatures,
}

impl Track {
    /// Tracks without a preview clip cannot be handed to the player
    pub fn is_playable(&self) -> bool {
        self.preview_url.is_some()
    }
}

/// Which backend method produced a recommendation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecommendationType {
    Cluster,
    Knn,
    Hybrid,
}

impl RecommendationType {
    pub const ALL: [RecommendationType; 3] = [
        RecommendationType::Cluster,
        RecommendationType::Knn,
        RecommendationType::Hybrid,
    ];

    /// Mode string sent to `POST /recommend`
    pub fn mode(self) -> RecommendMode {
        match self {
            RecommendationType::Cluster => RecommendMode::Cluster,
            RecommendationType::Knn => RecommendMode::Knn,
            RecommendationType::Hybrid => RecommendMode::ClusterKnn,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            RecommendationType::Cluster => "cluster",
            RecommendationType::Knn => "knn",
            RecommendationType::Hybrid => "hybrid",
        }
    }
}

/// Extra data attached to a track when it comes back as a recommendation
#[derive(Debug, Clone, PartialEq)]
pub struct RecommendationMeta {
    /// Only comparable with scores for the same query track
    pub similarity_score: f64,
    pub recommendation_type: RecommendationType,
    pub cluster_id: Option<u32>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Recommendation {
    pub track: Track,
    pub meta: RecommendationMeta,
}

impl AsRef<Track> for Recommendation {
    fn as_ref(&self) -> &Track {
        &self.track
    }
}

/// Artist credit as sent by the backend: a list of names or a single string
#[derive(Debug, Clone, PartialEq)]
pub enum ArtistCredit {
    Many(Vec<String>),
    One(String),
}

/// Song record shared by `GET /clusters`, `GET /song/{id}` and `POST /recommend`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BackendSong {
    #[serde(default, deserialize_with = "lenient_id")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient_artists")]
    pub artists: Option<ArtistCredit>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub album: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub album_art: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub preview_url: Option<String>,
    #[serde(default)]
    pub features: Option<AudioFeatures>,
    #[serde(default, deserialize_with = "lenient_cluster")]
    pub cluster: Option<u32>,
    #[serde(default, deserialize_with = "lenient_cluster")]
    pub cluster_spectral: Option<u32>,
}

impl BackendSong {
    /// Cluster label from whichever cluster column the dataset carries
    pub fn cluster_id(&self) -> Option<u32> {
        self.cluster.or(self.cluster_spectral)
    }
}

/// Response structure for `GET /clusters`
#[derive(Debug, Deserialize)]
pub struct ClustersResponse {
    #[serde(default)]
    pub songs: Vec<BackendSong>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendMode {
    Cluster,
    Knn,
    ClusterKnn,
}

/// Request body for `POST /recommend`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecommendRequest {
    pub track_id: String,
    pub n: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<RecommendMode>,
}

/// Response structure for `POST /recommend`
#[derive(Debug, Deserialize)]
pub struct RecommendResponse {
    #[serde(default)]
    pub recommendations: Vec<BackendRecommendation>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct BackendRecommendation {
    #[serde(flatten)]
    pub song: BackendSong,
    #[serde(default, deserialize_with = "lenient_score")]
    pub similarity: Option<f64>,
}

fn coerce_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
    .filter(|v: &f64| v.is_finite())
}

fn lenient_f64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    Ok(coerce_number(&Value::deserialize(deserializer)?).unwrap_or(0.0))
}

fn lenient_score<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
    Ok(coerce_number(&Value::deserialize(deserializer)?))
}

fn lenient_duration<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<u64>, D::Error> {
    Ok(coerce_number(&Value::deserialize(deserializer)?)
        .filter(|ms| *ms > 0.0)
        .map(|ms| ms.round() as u64))
}

fn lenient_cluster<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<u32>, D::Error> {
    Ok(coerce_number(&Value::deserialize(deserializer)?)
        .filter(|id| *id >= 1.0 && id.fract() == 0.0 && *id <= u32::MAX as f64)
        .map(|id| id as u32))
}

fn lenient_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        _ => String::new(),
    })
}

fn lenient_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

fn lenient_artists<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<ArtistCredit>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(ArtistCredit::One(s)),
        Value::Array(items) => Some(ArtistCredit::Many(
            items
                .into_iter()
                .filter_map(|item| match item {
                    Value::String(s) => Some(s),
                    _ => None,
                })
                .collect(),
        )),
        _ => None,
    })
}
