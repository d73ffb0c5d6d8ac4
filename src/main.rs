use anyhow::Result;
use clap::{Parser, Subcommand};
use std::io::{self, BufRead, Write};
use tracing_subscriber::EnvFilter;

mod analysis;
mod catalog;
mod client;
mod config;
mod models;
mod player;
mod service;

#[cfg(test)]
mod fixtures;

use crate::analysis::FeatureSimilarity;
use crate::catalog::{CatalogFilter, CatalogFilters, RECORDS_PER_PAGE};
use crate::client::{RecommendationApi, RecommendationClient};
use crate::config::load_config;
use crate::models::{RecommendationType, Track};
use crate::player::{PlaybackSequencer, PlayerStatus};
use crate::service::SoundScope;

#[derive(Parser)]
#[command(name = "soundscope")]
#[command(about = "Music discovery client for the SoundScope recommendation service")]
#[command(version)]
struct Args {
    /// Base URL of the recommendation service (overrides SOUNDSCOPE_API_URL)
    #[arg(long = "api-url", global = true)]
    api_url: Option<String>,

    /// Recommendations to request per method (overrides SOUNDSCOPE_RECOMMENDATIONS)
    #[arg(short = 'n', long = "count", global = true)]
    count: Option<u32>,

    /// Quiet mode - only log warnings
    #[arg(short = 'q', long = "quiet", global = true, conflicts_with = "verbose")]
    quiet: bool,

    /// Verbose mode - log debug details
    #[arg(short = 'v', long = "verbose", global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Browse the song catalog
    Songs {
        /// Case-insensitive search over title, artist and album
        #[arg(short = 's', long = "search")]
        search: Option<String>,

        /// Only show these artists (repeatable)
        #[arg(short = 'a', long = "artist")]
        artists: Vec<String>,

        /// Only show songs with a preview clip
        #[arg(long = "playable")]
        playable: bool,

        /// Ask the backend for a random sample instead of the full dataset
        #[arg(long = "random-sample")]
        random_sample: bool,

        /// Number of 500-song pages to show
        #[arg(short = 'p', long = "page", default_value_t = 1)]
        page: usize,
    },
    /// List the artists present in the catalog
    Artists {
        #[arg(long = "random-sample")]
        random_sample: bool,
    },
    /// Show cluster, knn and hybrid recommendations for a song
    Recommend { id: String },
    /// Compare the audio features of two songs
    Compare {
        id: String,
        other_id: String,

        /// Describe what each feature measures
        #[arg(long = "explain")]
        explain: bool,
    },
    /// Step through a song and its recommendations in the preview player
    Preview { id: String },
}

fn init_logging(args: &Args) {
    let level = if args.quiet {
        tracing::Level::WARN
    } else if args.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(level.into()))
        .with_writer(io::stderr)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args);

    // Load configuration from .env, then apply flags
    let config = load_config()?.with_overrides(args.api_url.clone(), args.count);
    tracing::debug!(?config, "Configuration loaded");

    let client = RecommendationClient::new(&config);

    // Test connection first
    if !args.quiet {
        println!("Testing API connection to {}...", config.api_url);
    }
    match client.ping() {
        Ok(_) if !args.quiet => println!("✓ API connection successful\n"),
        Ok(_) => {}
        Err(e) => {
            eprintln!("✗ API connection failed: {e}");
            return Err(e);
        }
    }

    let service = SoundScope::new(client, config.recommendation_count);

    match args.command {
        Command::Songs {
            search,
            artists,
            playable,
            random_sample,
            page,
        } => {
            let filter = CatalogFilter {
                query: search,
                artists,
                playable_only: playable,
            };
            list_songs(&service, &filter, random_sample, page)
        }
        Command::Artists { random_sample } => list_artists(&service, random_sample),
        Command::Recommend { id } => show_recommendations(&service, &id),
        Command::Compare {
            id,
            other_id,
            explain,
        } => show_comparison(&service, &id, &other_id, explain),
        Command::Preview { id } => run_preview(&service, &id),
    }
}

fn list_songs<A: RecommendationApi>(
    service: &SoundScope<A>,
    filter: &CatalogFilter,
    random_sample: bool,
    page: usize,
) -> Result<()> {
    let tracks = service.load_catalog(random_sample)?;
    let filtered = CatalogFilters::apply(&tracks, filter);
    let visible = CatalogFilters::loaded_pages(&filtered, page, RECORDS_PER_PAGE);

    for track in visible {
        let playable = if track.is_playable() { "▶" } else { " " };
        println!(
            "{} {} by {} [{}] (id: {})",
            playable, track.name, track.artist, track.album, track.id
        );
    }

    println!(
        "\nShowing {} of {} matching songs ({} in catalog)",
        visible.len(),
        filtered.len(),
        tracks.len()
    );
    if visible.len() < filtered.len() {
        println!("Use --page {} to load more.", page.max(1) + 1);
    }
    Ok(())
}

fn list_artists<A: RecommendationApi>(service: &SoundScope<A>, random_sample: bool) -> Result<()> {
    let tracks = service.load_catalog(random_sample)?;
    let artists = CatalogFilters::available_artists(&tracks);
    for artist in &artists {
        println!("{artist}");
    }
    println!("\n{} artists", artists.len());
    Ok(())
}

fn print_track_header(track: &Track) {
    println!("{} by {}", track.name, track.artist);
    println!("{}", "=".repeat(track.name.len() + track.artist.len() + 4));
    println!("Album: {} | ID: {}", track.album, track.id);
    match &track.preview_url {
        Some(url) => println!("Preview: {url}"),
        None => println!("Preview: not available"),
    }
}

fn show_recommendations<A: RecommendationApi>(service: &SoundScope<A>, id: &str) -> Result<()> {
    let track = service.song(id)?;
    let recommendations = service.recommendations_for(&track)?;

    print_track_header(&track);

    for recommendation_type in RecommendationType::ALL {
        let list = recommendations.get(recommendation_type);
        println!("\n📊 {} recommendations ({})", recommendation_type.label(), list.len());
        if list.is_empty() {
            println!("   No songs returned.");
            continue;
        }

        for (i, rec) in list.iter().enumerate() {
            let cluster = rec
                .meta
                .cluster_id
                .map(|c| format!(" | cluster {c}"))
                .unwrap_or_default();
            println!(
                "   {}. \"{}\" by {} | {}% match{}",
                i + 1,
                rec.track.name,
                rec.track.artist,
                FeatureSimilarity::as_percent(rec.meta.similarity_score),
                cluster
            );
        }
    }

    if let Some(best) = recommendations.best() {
        println!(
            "\nTop pick: \"{}\" by {} ({}% match)",
            best.track.name,
            best.track.artist,
            FeatureSimilarity::as_percent(best.meta.similarity_score)
        );
    }
    Ok(())
}

fn show_comparison<A: RecommendationApi>(
    service: &SoundScope<A>,
    id: &str,
    other_id: &str,
    explain: bool,
) -> Result<()> {
    let comparison = service.compare(id, other_id)?;

    println!(
        "\"{}\" vs \"{}\"\n",
        comparison.original.name, comparison.comparison.name
    );
    println!(
        "{:<18} {:>12} {:>12} {:>8} {:>8}  {}",
        "Feature", "Original", "Comparison", "Chart A", "Chart B", "Similarity"
    );
    for row in &comparison.rows {
        println!(
            "{:<18} {:>12} {:>12} {:>8.2} {:>8.2}  {}",
            row.feature.label(),
            row.original_display(),
            row.comparison_display(),
            row.original_scaled,
            row.comparison_scaled,
            row.difference.map(|d| d.label()).unwrap_or("-")
        );
        if explain {
            println!("{:<18} {}", "", row.feature.description());
        }
    }
    println!(
        "\nOverall similarity: {}%",
        comparison.similarity_percent()
    );
    Ok(())
}

fn print_player(player: &PlaybackSequencer) {
    let state = player.state();
    let status = match state.status() {
        PlayerStatus::Idle => "⏹ idle",
        _ if state.is_playing() => "▶ playing",
        _ => "⏸ paused",
    };

    match state.current_track() {
        Some(track) => {
            let position = state
                .current_index()
                .map(|i| format!(" [{}/{}]", i + 1, state.playlist().len()))
                .unwrap_or_default();
            println!(
                "{} \"{}\" by {}{}",
                status, track.name, track.artist, position
            );
            if let Some(url) = &track.preview_url {
                println!("   {url}");
            }
        }
        None => println!("{status}"),
    }

    let mut controls = Vec::new();
    if player.has_previous() {
        controls.push("prev");
    }
    if player.has_next() {
        controls.push("next");
    }
    if !controls.is_empty() {
        println!("   available: {}", controls.join(", "));
    }
}

fn print_playlist(player: &PlaybackSequencer) {
    let state = player.state();
    for (i, track) in state.playlist().iter().enumerate() {
        let marker = if state.current_track().is_some() && state.current_index() == Some(i) {
            ">"
        } else {
            " "
        };
        let playable = if track.is_playable() { "" } else { " (no preview)" };
        println!("{} {}. {} by {}{}", marker, i + 1, track.name, track.artist, playable);
    }
}

fn run_preview<A: RecommendationApi>(service: &SoundScope<A>, id: &str) -> Result<()> {
    let track = service.song(id)?;
    let recommendations = service.recommendations_for(&track)?;
    let playlist = recommendations.playlist(&track);

    let mut player = PlaybackSequencer::new();
    let started = player.start(track.clone(), playlist);
    if !track.is_playable() {
        if started {
            println!(
                "\"{}\" has no preview clip, starting with the next playable song.",
                track.name
            );
        } else {
            println!("No song in this session has a preview clip.");
        }
    }

    println!("🎵 Preview session: {} songs", player.state().playlist().len());
    println!("Commands: pause, resume, next, prev, stop, end, play <n>, list, status, quit\n");
    print_player(&player);

    let stdin = io::stdin();
    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }

        let mut words = line.split_whitespace();
        match (words.next(), words.next()) {
            (None, _) => continue,
            (Some("pause"), _) => player.pause(),
            (Some("resume"), _) => player.resume(),
            (Some("next"), _) => {
                player.next();
            }
            (Some("prev" | "previous"), _) => {
                player.previous();
            }
            (Some("stop"), _) => player.stop(),
            (Some("end"), _) => player.track_ended(),
            (Some("play"), None) => player.resume(),
            (Some("play"), Some(n)) => {
                let played = n
                    .parse::<usize>()
                    .ok()
                    .filter(|&entry| entry >= 1)
                    .is_some_and(|entry| player.play_at(entry - 1));
                if !played {
                    println!("Cannot play entry '{n}'");
                }
            }
            (Some("list"), _) => {
                print_playlist(&player);
                continue;
            }
            (Some("status"), _) => {}
            (Some("quit" | "exit"), _) => break,
            (Some(other), _) => {
                println!("Unknown command '{other}'");
                continue;
            }
        }
        print_player(&player);
    }

    Ok(())
}
