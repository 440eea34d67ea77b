use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use cinescout_core::{Config, FetchError, Movie, MovieDetail};
use cinescout_metadata::Discovery;

#[derive(Parser, Debug)]
#[command(name = "cinescout")]
#[command(about = "Movie discovery from the command line", long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show the vendor's default list of popular movies.
    Popular,
    /// Search movies by title.
    Search { query: String },
    /// Show one movie in full, with similar-movie recommendations.
    Show { id: String },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let args = Args::parse();
    let config = Config::from_env();
    let discovery = Discovery::from_config(&config);
    info!(vendor = %discovery.provider_name(), "vendor selected");

    // One fetch per invocation, so nothing can supersede it; a Superseded
    // outcome would mean a bug in the guard and is simply not rendered.
    match args.command {
        Command::Popular => {
            if let Some(result) = discovery.list(None).await.into_latest() {
                render_list(result)?;
            }
        }
        Command::Search { query } => {
            if let Some(result) = discovery.list(Some(&query)).await.into_latest() {
                render_list(result)?;
            }
        }
        Command::Show { id } => {
            if let Some(result) = discovery.detail(&id).await.into_latest() {
                render_detail(result)?;
            }
        }
    }

    Ok(())
}

fn render_list(result: Result<Vec<Movie>, FetchError>) -> anyhow::Result<()> {
    let movies = result.map_err(report)?;

    if movies.is_empty() {
        println!("No movies found. Try a different search term.");
        return Ok(());
    }

    for movie in &movies {
        println!("{}", summary_line(movie));
    }
    Ok(())
}

fn render_detail(result: Result<MovieDetail, FetchError>) -> anyhow::Result<()> {
    let detail = result.map_err(report)?;
    let movie = &detail.movie;

    match movie.year() {
        Some(year) => println!("{} ({year})", movie.title),
        None => println!("{}", movie.title),
    }
    if let Some(rating) = movie.rating {
        println!("Rating:   {rating:.1} / 10");
    }
    if let Some(poster) = &movie.poster_url {
        println!("Poster:   {poster}");
    }
    for line in extended_lines(movie) {
        println!("{line}");
    }
    println!();
    match &movie.overview {
        Some(overview) => println!("{overview}"),
        None => println!("No overview available."),
    }

    if !detail.similar.is_empty() {
        println!("\nSimilar movies:");
        for similar in &detail.similar {
            println!("  {}", summary_line(similar));
        }
    }
    Ok(())
}

/// Descriptive lines from the vendor-shaped `extended` fields.
///
/// The map is vendor-shaped, so both spellings are handled: the catalog
/// vendor's `runtime`/`genres`/`tagline`, and the title-search vendor's
/// flat `Genre`/`Runtime`/`Director`/`Actors`/`Awards` strings. Every
/// field is optional.
fn extended_lines(movie: &Movie) -> Vec<String> {
    let mut lines = Vec::new();
    let extended = &movie.extended;

    if let Some(runtime) = extended.get("runtime").and_then(|v| v.as_u64()) {
        lines.push(format!("{:<9} {runtime} min", "Runtime:"));
    }
    if let Some(genres) = extended.get("genres").and_then(|v| v.as_array()) {
        let names: Vec<&str> = genres.iter().filter_map(|g| g["name"].as_str()).collect();
        if !names.is_empty() {
            lines.push(format!("{:<9} {}", "Genre:", names.join(", ")));
        }
    }
    if let Some(tagline) = extended
        .get("tagline")
        .and_then(|v| v.as_str())
        .filter(|s| !s.is_empty())
    {
        lines.push(format!("{:<9} {tagline}", "Tagline:"));
    }

    for key in ["Genre", "Runtime", "Director", "Actors", "Awards"] {
        if let Some(value) = extended.get(key).and_then(|v| v.as_str()) {
            lines.push(format!("{:<9} {value}", format!("{key}:")));
        }
    }

    lines
}

fn summary_line(movie: &Movie) -> String {
    let mut line = format!("{:<12} {}", movie.id, movie.title);
    if let Some(year) = movie.year() {
        line.push_str(&format!(" ({year})"));
    }
    if let Some(rating) = movie.rating {
        line.push_str(&format!("  [{rating:.1}]"));
    }
    line
}

/// Turn a classified fetch failure into the process error, after printing
/// the manual retry hint. Nothing here retries on its own.
fn report(err: FetchError) -> anyhow::Error {
    if let FetchError::RateLimited {
        retry_after: Some(seconds),
        ..
    } = &err
    {
        eprintln!("The vendor asked for a {seconds}s wait.");
    }
    eprintln!("Run the command again to retry.");
    err.into()
}
