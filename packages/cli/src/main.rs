#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Command-line front end for the rent map.
//!
//! Lists and filters the apartment catalog, summarizes rent trends, and
//! renders heatmap frames from a headless map, either for a single view or
//! by replaying a scripted session.

mod config;
mod export;
mod report;
mod simulate;

use std::{path::PathBuf, sync::Arc};

use clap::{Parser, Subcommand, ValueEnum};
use rent_map_heatmap::{MapSession, VirtualMap};
use rent_map_heatmap_models::{MapConfig, ViewportBounds};
use rent_map_listing::{ListingCatalog, trends::summarize};
use rent_map_listing_models::{Coordinates, Currency, ListingFilter, ListingId};

#[derive(Parser)]
#[command(name = "rent_map", about = "Off-campus rent listings and heatmap")]
struct Cli {
    /// Map configuration TOML (defaults to `$RENT_MAP_CONFIG`)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Listing catalog TOML (defaults to the built-in Hanover listings)
    #[arg(long, global = true)]
    listings: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print every listing
    Listings {
        #[arg(long, default_value_t = Currency::Usd)]
        currency: Currency,
    },
    /// Print listings matching a rent range and room counts
    Compare {
        #[arg(long, default_value_t = 0.0)]
        min: f64,
        #[arg(long, default_value_t = 3000.0)]
        max: f64,
        #[arg(long)]
        bedrooms: Option<u8>,
        #[arg(long)]
        bathrooms: Option<u8>,
        /// Only listings inside `west,south,east,north`
        #[arg(long, allow_hyphen_values = true)]
        bounds: Option<ViewportBounds>,
        #[arg(long, default_value_t = Currency::Usd)]
        currency: Currency,
    },
    /// Print rent statistics
    Trends {
        #[arg(long, default_value_t = Currency::Usd)]
        currency: Currency,
    },
    /// Render one heatmap frame
    Heatmap {
        /// Zoom level (defaults to the configured initial zoom)
        #[arg(long)]
        zoom: Option<f64>,
        /// Map center as `lat,lng` (defaults to the campus)
        #[arg(long, value_parser = config::parse_center, allow_hyphen_values = true)]
        center: Option<Coordinates>,
        /// Listing to select before rendering
        #[arg(long)]
        select: Option<ListingId>,
        #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,
    },
    /// Replay a scripted session and print one JSON frame per line
    Simulate {
        script: PathBuf,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Json,
    Geojson,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init_custom_env("RUST_LOG");
    let cli = Cli::parse();

    let map_config = config::load_config(cli.config.as_deref())?;
    let catalog = Arc::new(config::load_catalog(cli.listings.as_deref())?);

    match cli.command {
        Commands::Listings { currency } => {
            print!("{}", report::listing_table(&*catalog, currency));
        }
        Commands::Compare {
            min,
            max,
            bedrooms,
            bathrooms,
            bounds,
            currency,
        } => {
            let filter = ListingFilter {
                rent_min: min,
                rent_max: max,
                bedrooms,
                bathrooms,
            };
            let matches: Vec<_> = catalog
                .filter(&filter)
                .into_iter()
                .filter(|l| bounds.is_none_or(|b| b.contains(&l.coordinates)))
                .collect();

            log::info!("{} of {} listings match", matches.len(), catalog.len());
            print!("{}", report::listing_table(matches, currency));
        }
        Commands::Trends { currency } => {
            print!("{}", report::trends_report(&summarize(&*catalog), currency));
        }
        Commands::Heatmap {
            zoom,
            center,
            select,
            format,
        } => heatmap(catalog, map_config, zoom, center, select, format)?,
        Commands::Simulate { script } => {
            let script = simulate::Script::load(&script)?;
            for frame in simulate::run(&script, catalog, map_config) {
                println!("{}", serde_json::to_string(&frame)?);
            }
        }
    }

    Ok(())
}

fn heatmap(
    catalog: Arc<ListingCatalog>,
    map_config: MapConfig,
    zoom: Option<f64>,
    center: Option<Coordinates>,
    select: Option<ListingId>,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(id) = select
        && catalog.get(id).is_none()
    {
        return Err(format!("Unknown listing id {id}").into());
    }

    let map = VirtualMap::new(
        center.unwrap_or(map_config.campus),
        zoom.unwrap_or(map_config.initial_zoom),
        map_config.width,
        map_config.height,
    );
    let mut session = MapSession::mount(map, catalog, map_config);

    if let Some(id) = select {
        session.select(id);
    }

    let frame = session.frame();
    log::info!(
        "Rendered {} overlays for {} visible listings",
        frame.overlays.len(),
        frame.visible.len()
    );

    let output = match format {
        OutputFormat::Json => serde_json::to_string_pretty(&frame)?,
        OutputFormat::Geojson => serde_json::to_string_pretty(&export::frame_to_geojson(&frame))?,
    };
    println!("{output}");

    Ok(())
}
