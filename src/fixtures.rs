//! Test data: a deterministic mock catalog and a feature-ranked mock recommender
//! standing in for the backend.

use crate::analysis::scoring::FeatureSimilarity;
use crate::catalog::RecommendationSet;
use crate::models::{AudioFeatures, Recommendation, RecommendationMeta, RecommendationType, Track};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub fn features() -> AudioFeatures {
    AudioFeatures {
        danceability: 0.6,
        energy: 0.7,
        valence: 0.5,
        speechiness: 0.05,
        instrumentalness: 0.0,
        acousticness: 0.2,
        liveness: 0.1,
        tempo: 120.0,
        duration_ms: None,
    }
}

/// Track with fixed features
pub fn track(id: &str, name: &str, preview_url: Option<&str>) -> Track {
    Track {
        id: id.to_string(),
        name: name.to_string(),
        artist: "Test Artist".to_string(),
        album: "Test Album".to_string(),
        album_art_url: "/placeholder.svg".to_string(),
        preview_url: preview_url.map(str::to_string),
        features: features(),
    }
}

/// Playable track whose preview url is derived from the id
pub fn playable(id: &str) -> Track {
    track(id, &format!("Song {id}"), Some(&format!("https://example.com/preview{id}.mp3")))
}

fn seeded(id: &str, name: &str, artist: &str, album: &str, features: AudioFeatures) -> Track {
    Track {
        id: id.to_string(),
        name: name.to_string(),
        artist: artist.to_string(),
        album: album.to_string(),
        album_art_url: "/placeholder.svg".to_string(),
        preview_url: Some(format!("https://example.com/preview{id}.mp3")),
        features,
    }
}

/// Five real songs followed by generated ones, `count` tracks in total
pub fn mock_catalog(seed: u64, count: usize) -> Vec<Track> {
    let mut songs = vec![
        seeded(
            "1",
            "Blinding Lights",
            "The Weeknd",
            "After Hours",
            AudioFeatures {
                danceability: 0.514,
                energy: 0.73,
                valence: 0.334,
                speechiness: 0.0598,
                instrumentalness: 0.00242,
                acousticness: 0.00146,
                liveness: 0.0897,
                tempo: 171.005,
                duration_ms: Some(200_040),
            },
        ),
        seeded(
            "2",
            "Watermelon Sugar",
            "Harry Styles",
            "Fine Line",
            AudioFeatures {
                danceability: 0.548,
                energy: 0.816,
                valence: 0.557,
                speechiness: 0.0465,
                instrumentalness: 0.000000856,
                acousticness: 0.122,
                liveness: 0.0931,
                tempo: 95.39,
                duration_ms: Some(174_000),
            },
        ),
        seeded(
            "3",
            "Good 4 U",
            "Olivia Rodrigo",
            "SOUR",
            AudioFeatures {
                danceability: 0.563,
                energy: 0.664,
                valence: 0.688,
                speechiness: 0.154,
                instrumentalness: 0.0000000613,
                acousticness: 0.105,
                liveness: 0.0849,
                tempo: 178.086,
                duration_ms: None,
            },
        ),
        seeded(
            "4",
            "Levitating",
            "Dua Lipa",
            "Future Nostalgia",
            AudioFeatures {
                danceability: 0.702,
                energy: 0.825,
                valence: 0.915,
                speechiness: 0.0601,
                instrumentalness: 0.00000191,
                acousticness: 0.00883,
                liveness: 0.0674,
                tempo: 103.0,
                duration_ms: None,
            },
        ),
        seeded(
            "5",
            "Stay",
            "The Kid LAROI, Justin Bieber",
            "F*CK LOVE 3: OVER YOU",
            AudioFeatures {
                danceability: 0.591,
                energy: 0.764,
                valence: 0.478,
                speechiness: 0.037,
                instrumentalness: 0.0000000124,
                acousticness: 0.0119,
                liveness: 0.103,
                tempo: 169.928,
                duration_ms: None,
            },
        ),
    ];
    songs.truncate(count);

    let artists = ["Adele", "Bruno Mars", "Lorde", "SZA", "Frank Ocean", "Mac Miller"];
    let titles = ["Midnight Dreams", "Golden Hour", "Neon Lights", "City Rain", "Velvet Sky"];
    let albums = ["Midnight Collection", "Summer Sessions", "Ocean Deep", "Sky High"];

    let mut rng = StdRng::seed_from_u64(seed);
    for i in songs.len() + 1..=count {
        let title = titles[rng.gen_range(0..titles.len())];
        let name = if i > 50 {
            format!("{title} (Remix)")
        } else {
            title.to_string()
        };
        let features = AudioFeatures {
            danceability: rng.r#gen(),
            energy: rng.r#gen(),
            valence: rng.r#gen(),
            speechiness: rng.r#gen::<f64>() * 0.5,
            instrumentalness: rng.r#gen::<f64>() * 0.3,
            acousticness: rng.r#gen(),
            liveness: rng.r#gen::<f64>() * 0.5,
            tempo: 60.0 + rng.r#gen::<f64>() * 140.0,
            duration_ms: None,
        };
        songs.push(seeded(
            &i.to_string(),
            &name,
            artists[rng.gen_range(0..artists.len())],
            albums[rng.gen_range(0..albums.len())],
            features,
        ));
    }

    songs
}

/// Rank the catalog against `selected` and hand out slices of six per method
pub fn mock_recommendations(selected: &Track, catalog: &[Track]) -> RecommendationSet {
    let mut ranked: Vec<(f64, &Track)> = catalog
        .iter()
        .filter(|song| song.id != selected.id)
        .map(|song| (FeatureSimilarity::score(&selected.features, &song.features), song))
        .collect();
    ranked.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));

    let recommend = |(score, song): &(f64, &Track),
                     recommendation_type: RecommendationType,
                     cluster_id: Option<u32>| Recommendation {
        track: (*song).clone(),
        meta: RecommendationMeta {
            similarity_score: *score,
            recommendation_type,
            cluster_id,
        },
    };

    let mut set = RecommendationSet::default();
    for (index, entry) in ranked.iter().take(6).enumerate() {
        set.push(recommend(entry, RecommendationType::Cluster, Some(index as u32 / 2 + 1)));
    }
    for entry in ranked.iter().skip(6).take(6) {
        set.push(recommend(entry, RecommendationType::Knn, None));
    }
    for (index, entry) in ranked.iter().skip(12).take(6).enumerate() {
        let cluster_id = (index % 2 == 0).then_some(index as u32 / 2 + 1);
        set.push(recommend(entry, RecommendationType::Hybrid, cluster_id));
    }
    set
}
