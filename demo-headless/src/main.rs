use clap::Parser;
use firegrid_core::export::Exporter;
use firegrid_core::{
    ConfigError, ExportOptions, Fleet, Point, SimulationConfig, SpreadModel, TerrainDescription,
    TileType, Wind, DEFAULT_GRID_SIZE,
};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Tile-grid wildfire simulation, run headless
#[derive(Parser, Debug)]
#[command(name = "firegrid")]
#[command(about = "Tile-grid wildfire spread simulation", long_about = None)]
struct Args {
    /// Spread model (0 uniform direct, 1 uniform with diagonals, 2 vegetation and wind, 3 slope and wind)
    #[arg(short, long, default_value_t = 0)]
    model: u8,

    /// Number of independent grids
    #[arg(short, long, default_value_t = 1)]
    grids: usize,

    /// Side length of each grid in tiles
    #[arg(short, long, default_value_t = DEFAULT_GRID_SIZE)]
    size: usize,

    /// Stop each grid after this many ticks
    #[arg(long)]
    max_iterations: Option<u32>,

    /// Pause between ticks in milliseconds
    #[arg(short, long, default_value_t = 0)]
    interval_ms: u64,

    /// Wind direction in degrees (0=North, 90=East), the way the wind blows towards
    #[arg(long, default_value_t = 0.0)]
    wind_direction: f64,

    /// Wind speed in m/s
    #[arg(short, long, default_value_t = 0.0)]
    wind_speed: f64,

    /// Terrain description (JSON); random terrain when missing
    #[arg(short, long, default_value = "terrain.json")]
    terrain: PathBuf,

    /// Append every finished grid to grids.csv
    #[arg(long)]
    csv: bool,

    /// Write a PNG of every finished grid
    #[arg(long)]
    png: bool,

    /// Directory for exports
    #[arg(short, long, default_value = "output")]
    out_dir: PathBuf,

    /// Random seed (OS entropy when omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Ignition tile as X,Y (defaults to the grid center; model 3 lights its own)
    #[arg(long, value_parser = parse_point)]
    ignite: Option<Point>,
}

#[derive(Debug, Error)]
enum RunError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("failed to create output directory {path:?}: {source}")]
    OutDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

fn parse_point(s: &str) -> Result<Point, String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected X,Y, got '{s}'"))?;
    let parse = |v: &str| {
        v.trim()
            .parse::<i32>()
            .map_err(|e| format!("bad coordinate '{v}': {e}"))
    };
    Ok(Point::new(parse(x)?, parse(y)?))
}

fn build_config(args: &Args) -> Result<SimulationConfig, ConfigError> {
    let mut config = SimulationConfig::for_model_index(args.model)?;
    config.grid_count = args.grids;
    config.grid_size = args.size;
    config.max_iterations = args.max_iterations;
    config.tick_interval = Duration::from_millis(args.interval_ms);
    config.wind = Wind {
        direction: args.wind_direction,
        speed: args.wind_speed,
    };
    config.export = ExportOptions {
        csv: args.csv,
        png: args.png,
    };
    config.seed = args.seed;
    config.ignition = match args.ignite {
        Some(point) => Some(point),
        None if config.model == SpreadModel::SlopeWind => None,
        None => Some(config.center()),
    };
    config.validate()?;
    Ok(config)
}

fn run(args: &Args) -> Result<(), RunError> {
    let config = build_config(args)?;
    let terrain = TerrainDescription::load_optional(&args.terrain);

    if config.export.any() {
        std::fs::create_dir_all(&args.out_dir).map_err(|source| RunError::OutDir {
            path: args.out_dir.clone(),
            source,
        })?;
    }
    let exporter = Exporter::new(&args.out_dir);

    let mut fleet = Fleet::new(&config, terrain.as_ref())?;
    let start = Instant::now();
    let mut failures = 0;

    for grid in fleet.finished() {
        failures += exporter.export(grid);
    }
    let mut ticks = 0u32;
    while !fleet.is_finished() {
        if !config.tick_interval.is_zero() {
            std::thread::sleep(config.tick_interval);
        }
        for index in fleet.tick_all() {
            if let Some(grid) = fleet.grid(index) {
                info!(
                    "Grid ({}, {}) finished after {} ticks",
                    grid.coord().x,
                    grid.coord().y,
                    grid.iteration()
                );
                failures += exporter.export(grid);
            }
        }
        ticks += 1;
        if ticks % 50 == 0 {
            info!("Tick {ticks}: {} of {} grid(s) still burning", fleet.running(), fleet.len());
        }
    }

    println!("\n=== Simulation Complete ===");
    println!("Model: {}", config.model);
    println!("Ticks: {ticks} in {:.2?}", start.elapsed());
    println!();
    println!(" Grid  | Ticks | Tree | Dense | Water | Grass | Fire | Burnt | Trench");
    println!("-------|-------|------|-------|-------|-------|------|-------|-------");
    for grid in fleet.grids() {
        let census = grid.census();
        let count = |t: TileType| census.get(&t).copied().unwrap_or(0);
        println!(
            "{:>2},{:<2}  | {:5} | {:4} | {:5} | {:5} | {:5} | {:4} | {:5} | {:6}",
            grid.coord().x,
            grid.coord().y,
            grid.iteration(),
            count(TileType::Tree),
            count(TileType::DenseTree),
            count(TileType::Water),
            count(TileType::Grass),
            count(TileType::Fire),
            count(TileType::Burnt),
            count(TileType::Trench),
        );
    }
    if failures > 0 {
        println!("\n{failures} export(s) failed, see log");
    }
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_point() {
        assert_eq!(parse_point("3,4"), Ok(Point::new(3, 4)));
        assert_eq!(parse_point(" 0 , 7"), Ok(Point::new(0, 7)));
        assert!(parse_point("3").is_err());
        assert!(parse_point("a,1").is_err());
    }

    #[test]
    fn test_default_args() {
        let args = Args::parse_from(["firegrid"]);
        let config = build_config(&args).unwrap();
        assert_eq!(config.model, SpreadModel::UniformDirect);
        assert_eq!(config.grid_size, DEFAULT_GRID_SIZE);
        assert_eq!(config.ignition, Some(Point::new(16, 16)));
        assert!(!config.export.any());
        assert_eq!(config.tick_interval, SimulationConfig::default().tick_interval);
    }

    #[test]
    fn test_model3_lights_its_own_seed() {
        let args = Args::parse_from(["firegrid", "--model", "3", "--size", "12"]);
        let config = build_config(&args).unwrap();
        assert_eq!(config.model, SpreadModel::SlopeWind);
        assert_eq!(config.ignition, None);
    }

    #[test]
    fn test_unknown_model_rejected() {
        let args = Args::parse_from(["firegrid", "--model", "7"]);
        assert_eq!(build_config(&args), Err(ConfigError::UnknownModel(7)));
    }

    #[test]
    fn test_ignition_outside_grid_rejected() {
        let args = Args::parse_from(["firegrid", "--size", "4", "--ignite", "9,0"]);
        assert!(matches!(
            build_config(&args),
            Err(ConfigError::IgnitionOutOfBounds { .. })
        ));
    }
}
