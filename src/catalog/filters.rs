use crate::models::Track;

/// Number of tracks shown per "load more" page
pub const RECORDS_PER_PAGE: usize = 500;

/// User selected catalog filters
#[derive(Debug, Clone, Default)]
pub struct CatalogFilter {
    /// Case-insensitive substring matched against name, artist and album
    pub query: Option<String>,
    /// Exact artist display strings; empty means any artist
    pub artists: Vec<String>,
    pub playable_only: bool,
}

/// Catalog filtering functionality using static helper functions
pub struct CatalogFilters;

impl CatalogFilters {
    /// Check whether a track matches the search query
    pub fn matches_query(track: &Track, query: &str) -> bool {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return true;
        }

        [&track.name, &track.artist, &track.album]
            .iter()
            .any(|field| field.to_lowercase().contains(&query))
    }

    pub fn should_include_track(track: &Track, filter: &CatalogFilter) -> bool {
        if filter.playable_only && !track.is_playable() {
            return false;
        }

        if let Some(query) = &filter.query {
            if !Self::matches_query(track, query) {
                return false;
            }
        }

        filter.artists.is_empty() || filter.artists.iter().any(|a| *a == track.artist)
    }

    pub fn apply(tracks: &[Track], filter: &CatalogFilter) -> Vec<Track> {
        tracks
            .iter()
            .filter(|track| Self::should_include_track(track, filter))
            .cloned()
            .collect()
    }

    /// Sorted unique artist names for the artist picker
    pub fn available_artists(tracks: &[Track]) -> Vec<String> {
        let mut artists: Vec<String> = tracks.iter().map(|t| t.artist.clone()).collect();
        artists.sort();
        artists.dedup();
        artists
    }

    /// Tracks visible after `page` pages have been loaded (1-based; 0 counts as 1)
    pub fn loaded_pages(tracks: &[Track], page: usize, per_page: usize) -> &[Track] {
        let end = page.max(1).saturating_mul(per_page).min(tracks.len());
        &tracks[..end]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::track;

    fn library() -> Vec<Track> {
        let mut a = track("1", "Blinding Lights", Some("https://example.com/1.mp3"));
        a.artist = "The Weeknd".to_string();
        a.album = "After Hours".to_string();
        let mut b = track("2", "Watermelon Sugar", None);
        b.artist = "Harry Styles".to_string();
        b.album = "Fine Line".to_string();
        let mut c = track("3", "Save Your Tears", Some("https://example.com/3.mp3"));
        c.artist = "The Weeknd".to_string();
        c.album = "After Hours".to_string();
        vec![a, b, c]
    }

    #[test]
    fn test_search_matches_name_artist_and_album() {
        let tracks = library();
        let by_name = CatalogFilter {
            query: Some("sugar".to_string()),
            ..Default::default()
        };
        let by_album = CatalogFilter {
            query: Some("AFTER".to_string()),
            ..Default::default()
        };
        let blank = CatalogFilter {
            query: Some("   ".to_string()),
            ..Default::default()
        };

        assert_eq!(CatalogFilters::apply(&tracks, &by_name).len(), 1);
        assert_eq!(CatalogFilters::apply(&tracks, &by_album).len(), 2);
        assert_eq!(CatalogFilters::apply(&tracks, &blank).len(), 3);
    }

    #[test]
    fn test_artist_and_playable_filters_combine() {
        let tracks = library();
        let filter = CatalogFilter {
            query: None,
            artists: vec!["The Weeknd".to_string(), "Harry Styles".to_string()],
            playable_only: true,
        };
        let ids: Vec<String> = CatalogFilters::apply(&tracks, &filter)
            .into_iter()
            .map(|t| t.id)
            .collect();
        assert_eq!(ids, vec!["1", "3"]);
    }

    #[test]
    fn test_available_artists_sorted_unique() {
        assert_eq!(
            CatalogFilters::available_artists(&library()),
            vec!["Harry Styles".to_string(), "The Weeknd".to_string()]
        );
    }

    #[test]
    fn test_loaded_pages() {
        let tracks = library();
        assert_eq!(CatalogFilters::loaded_pages(&tracks, 1, 2).len(), 2);
        assert_eq!(CatalogFilters::loaded_pages(&tracks, 2, 2).len(), 3);
        assert_eq!(CatalogFilters::loaded_pages(&tracks, 0, 2).len(), 2);
        assert_eq!(CatalogFilters::loaded_pages(&[], 3, RECORDS_PER_PAGE).len(), 0);
    }
}
