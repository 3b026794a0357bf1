use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use wayfinder::campus::CampusData;

#[derive(Debug, Parser)]
#[command(
    author,
    version,
    about = "Print the walking route between two campus locations as JSON"
)]
struct Args {
    /// Id of the starting location (e.g. welcome-center)
    #[arg(long)]
    from: String,

    /// Id of the destination location
    #[arg(long)]
    to: String,

    /// Campus data JSON file; the built-in campus is used when absent
    #[arg(long)]
    data: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();
    let campus = match &args.data {
        Some(path) => CampusData::from_file(path)?,
        None => CampusData::builtin(),
    };

    let route = campus.route_between(&args.from, &args.to)?;
    tracing::info!(
        "{} -> {}: {} m",
        route.start.name,
        route.end.name,
        route.route.distance
    );
    println!("{}", serde_json::to_string_pretty(&route)?);
    Ok(())
}
