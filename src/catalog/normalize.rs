use crate::analysis::scoring::FeatureSimilarity;
use crate::models::{
    ArtistCredit, BackendRecommendation, BackendSong, PLACEHOLDER_ART, Recommendation,
    RecommendationMeta, RecommendationType, Track, UNKNOWN_ALBUM, UNKNOWN_ARTIST, UNKNOWN_TITLE,
};

/// Maps backend records into display tracks. Every ingestion path goes through here.
pub struct TrackNormalizer;

impl TrackNormalizer {
    /// Normalize a backend song, filling display defaults.
    /// Returns `None` only for records without an id.
    pub fn normalize(song: BackendSong) -> Option<Track> {
        if song.id.is_empty() {
            tracing::warn!(name = ?song.name, "Dropping song without an id");
            return None;
        }

        Some(Track {
            id: song.id,
            name: non_blank(song.name).unwrap_or_else(|| UNKNOWN_TITLE.to_string()),
            artist: song
                .artists
                .and_then(Self::join_artists)
                .unwrap_or_else(|| UNKNOWN_ARTIST.to_string()),
            album: non_blank(song.album).unwrap_or_else(|| UNKNOWN_ALBUM.to_string()),
            album_art_url: non_blank(song.album_art).unwrap_or_else(|| PLACEHOLDER_ART.to_string()),
            preview_url: non_blank(song.preview_url),
            features: song.features.unwrap_or_default(),
        })
    }

    /// Normalize a whole catalog response, skipping unusable rows
    pub fn normalize_all(songs: Vec<BackendSong>) -> Vec<Track> {
        songs.into_iter().filter_map(Self::normalize).collect()
    }

    /// Normalize a recommendation for the given query track.
    ///
    /// Self-recommendations are rejected. A missing backend score falls back to
    /// the feature similarity against the query.
    pub fn normalize_recommendation(
        query: &Track,
        recommendation: BackendRecommendation,
        recommendation_type: RecommendationType,
    ) -> Option<Recommendation> {
        let cluster_id = match recommendation_type {
            RecommendationType::Cluster | RecommendationType::Hybrid => {
                recommendation.song.cluster_id()
            }
            RecommendationType::Knn => None,
        };
        let track = Self::normalize(recommendation.song)?;

        if track.id == query.id {
            tracing::warn!(id = %track.id, "Backend recommended the query track itself, skipping");
            return None;
        }

        let similarity_score = recommendation
            .similarity
            .unwrap_or_else(|| FeatureSimilarity::score(&query.features, &track.features));

        Some(Recommendation {
            track,
            meta: RecommendationMeta {
                similarity_score,
                recommendation_type,
                cluster_id,
            },
        })
    }

    /// Artists join into one comma separated display string
    fn join_artists(credit: ArtistCredit) -> Option<String> {
        match credit {
            ArtistCredit::One(name) => non_blank(Some(name)),
            ArtistCredit::Many(names) => {
                let names: Vec<String> = names
                    .into_iter()
                    .map(|n| n.trim().to_string())
                    .filter(|n| !n.is_empty())
                    .collect();
                if names.is_empty() {
                    None
                } else {
                    Some(names.join(", "))
                }
            }
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
