use anyhow::{Context, Result};
use clap::Parser;

use ubcf::config::CliArgs;
use ubcf::ingest::read_observations;
use ubcf::{predict, RatingMatrix};

fn main() -> Result<()> {
    let args = CliArgs::parse();

    // stdout carries the report only
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&args.log_level)),
        )
        .init();

    let observations = read_observations(&args.data, args.malformed_policy())
        .with_context(|| format!("Could not read ratings from {}", args.data.display()))?;
    tracing::info!(path = %args.data.display(), count = observations.len(), "Loaded observations");

    let matrix = RatingMatrix::build(&observations)?;
    println!("{}", matrix.stats());

    let prediction = predict(&matrix, args.user, args.item, args.k)?;
    for neighbor in prediction.neighbors.iter() {
        tracing::debug!(
            neighbor = neighbor.user_id(),
            similarity = neighbor.similarity,
            rating = neighbor.rating,
            "Neighbor"
        );
    }
    if !prediction.has_basis() {
        tracing::warn!(
            user = args.user,
            item = args.item,
            candidates = prediction.candidates,
            "No similar user rated the item, reporting 0"
        );
    }

    println!(
        "Predicted Rating for User {} on Item {}: {}",
        args.user, args.item, prediction.rating
    );

    Ok(())
}
