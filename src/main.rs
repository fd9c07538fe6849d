//! choropleth - render a classified GeoJSON property as a map
//!
//! This is the main entry point for the choropleth command-line tool.

use std::process::ExitCode;
use tracing::{error, info};

use choropleth::data_loader::load_geojson;
use choropleth::{choropleth, init_tracing, log_error, log_timed_operation, Canvas, Config, Result};

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log_error(&e, "choropleth");
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    // Load configuration
    let (config, input_path) = Config::load()?;

    init_tracing(&config.log_level);
    info!("Starting choropleth v{}", env!("CARGO_PKG_VERSION"));

    // Validate configuration
    config.validate().map_err(|e| {
        error!("Invalid configuration: {}", e);
        e
    })?;
    let column = config.column()?;

    info!("Loading GeoJSON file: {:?}", input_path);
    let table = log_timed_operation("load_geojson", || load_geojson(&input_path))?;
    info!("Found {} features", table.len());

    let target = Canvas::new(config.canvas.width, config.canvas.height, config.canvas.dpi)?;
    let canvas = log_timed_operation("render", || {
        choropleth(
            &table,
            column,
            &config.classification.scheme,
            config.classification.k,
            &config.style,
            Some(target),
            config.classification.label_int,
        )
    })?;

    canvas.save(&config.canvas.output)?;
    info!("Map written to {:?}", config.canvas.output);

    // Legend entries go to stdout for downstream tooling
    let legend = canvas.legend().unwrap_or_default();
    println!("{}", serde_json::to_string_pretty(legend)?);

    Ok(())
}
