//! AQI Studio — command line entry point.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                 Adapters (outer ring)                    │
//! │                                                          │
//! │  JsonFileConfig   JsonFileDataset   LogEventSink         │
//! │  (ConfigPort)     (DatasetPort)     (EventSink)          │
//! │  ConfiguredPredictor (PredictionPort)                    │
//! │                                                          │
//! │  ─────────────── Port Trait Boundary ───────────────     │
//! │                                                          │
//! │  ┌────────────────────────────────────────────────┐      │
//! │  │        StudioService (pure logic)              │      │
//! │  │  form · request tokens · classifier · CountUp  │      │
//! │  └────────────────────────────────────────────────┘      │
//! └──────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use log::info;

use aqistudio::adapters::ConfiguredPredictor;
use aqistudio::adapters::config_file::JsonFileConfig;
use aqistudio::adapters::dataset::JsonFileDataset;
use aqistudio::adapters::log_sink::LogEventSink;
use aqistudio::adapters::remote::NullTransport;
use aqistudio::app::ports::{ConfigPort, DatasetPort};
use aqistudio::app::service::StudioService;
use aqistudio::aqi::category::{Category, legend};
use aqistudio::aqi::heuristic;
use aqistudio::aqi::reading::{Field, Preset};
use aqistudio::config::StudioConfig;

#[derive(Parser)]
#[command(name = "aqistudio")]
#[command(about = "Classify and predict Air Quality Index values")]
#[command(version)]
struct Cli {
    /// Path to the studio config (JSON). Missing file means defaults.
    #[arg(short, long, env = "AQISTUDIO_CONFIG", default_value = "aqistudio.json", global = true)]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the category of an AQI value
    Classify {
        /// AQI value (non-negative; fractions round up)
        aqi: f64,
    },
    /// Predict AQI for a reading
    ///
    /// Fields are applied in order: preset, then dataset row, then
    /// individual --set overrides. Unset fields count as 0.
    ///
    /// Examples:
    ///   aqistudio predict --preset polluted
    ///   aqistudio predict --set PM2_5=42 --set humidity=55
    ///   aqistudio predict --dataset rows.json --row 3
    Predict {
        /// Start from a built-in sample: clean, moderate or polluted
        #[arg(short, long, value_parser = parse_preset)]
        preset: Option<Preset>,

        /// JSON file holding an array of readings
        #[arg(short, long)]
        dataset: Option<PathBuf>,

        /// Dataset row to load (1-based)
        #[arg(short, long, requires = "dataset")]
        row: Option<usize>,

        /// Override one field, e.g. PM2_5=18 or wind_speed=2.5
        #[arg(short, long = "set", value_parser = parse_assignment)]
        set: Vec<(Field, String)>,
    },
    /// Print the category legend
    Legend,
    /// List dataset rows with their heuristic AQI
    Rows {
        /// JSON file holding an array of readings
        dataset: PathBuf,
    },
}

fn parse_preset(s: &str) -> Result<Preset, String> {
    Preset::from_name(s).ok_or_else(|| format!("unknown preset '{s}' (clean, moderate, polluted)"))
}

fn parse_assignment(s: &str) -> Result<(Field, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected FIELD=VALUE, got '{s}'"))?;
    let field = Field::from_key(key.trim()).ok_or_else(|| {
        let keys: Vec<&str> = Field::ALL.iter().map(|f| f.key()).collect();
        format!("unknown field '{key}' (one of {})", keys.join(", "))
    })?;
    Ok((field, value.trim().to_string()))
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config = JsonFileConfig::new(&cli.config)
        .load()
        .with_context(|| format!("loading config from {}", cli.config.display()))?;

    match cli.command {
        Commands::Classify { aqi } => classify(&config, aqi),
        Commands::Predict {
            preset,
            dataset,
            row,
            set,
        } => predict(config, preset, dataset, row, &set),
        Commands::Legend => {
            print_legend(&config, None);
            Ok(())
        }
        Commands::Rows { dataset } => list_rows(&config, dataset),
    }
}

fn classify(config: &StudioConfig, aqi: f64) -> Result<()> {
    let Some(category) = Category::from_value(aqi) else {
        bail!("AQI must be a non-negative number, got {aqi}");
    };
    let band = config.palette().band(category);
    println!("{} | {} {}", band.label, band.colour, band.colour.hex());
    Ok(())
}

fn predict(
    config: StudioConfig,
    preset: Option<Preset>,
    dataset: Option<PathBuf>,
    row: Option<usize>,
    overrides: &[(Field, String)],
) -> Result<()> {
    let mut app = StudioService::new(config);
    let mut sink = LogEventSink::new();

    if let Some(preset) = preset {
        app.load_preset(preset, &mut sink);
    }

    if let Some(path) = dataset {
        let mut source = JsonFileDataset::new(&path);
        if !app.load_dataset(&mut source, &mut sink) {
            bail!("could not load dataset rows from {}", path.display());
        }
        if let Some(row) = row {
            let count = app.rows().len();
            let loaded = row
                .checked_sub(1)
                .is_some_and(|index| app.select_row(index, &mut sink));
            if !loaded {
                bail!("row {row} out of range (dataset has {count} rows)");
            }
        }
    }

    for (field, text) in overrides {
        if !app.set_field(*field, text) {
            bail!("value for {} is too long", field.key());
        }
    }

    let mut predictor = ConfiguredPredictor::<NullTransport>::from_config(app.config(), None);
    app.predict(&mut predictor, &mut sink);

    let prediction = app
        .outcome()?
        .context("no prediction was produced")?;
    let reading = app.reading();
    for field in Field::ALL {
        println!("{:>12}  {}", field.label(), reading.get(field));
    }
    println!(
        "Predicted AQI {} | {} {}",
        prediction.aqi,
        prediction.band.label,
        prediction.band.colour.hex()
    );
    print_legend(app.config(), Some(prediction.band.category));
    Ok(())
}

fn print_legend(config: &StudioConfig, active: Option<Category>) {
    for entry in legend(&config.palette(), active) {
        let marker = if entry.active { '>' } else { ' ' };
        let (r, g, b) = entry.colour.rgb();
        println!(
            "{marker} {:<13}{:>8}  {} {} rgb({r}, {g}, {b})",
            entry.label,
            entry.range,
            entry.colour,
            entry.colour.hex()
        );
    }
}

fn list_rows(config: &StudioConfig, path: PathBuf) -> Result<()> {
    if !config.dataset_loading {
        bail!("dataset loading is disabled in the config");
    }
    let rows = JsonFileDataset::new(&path)
        .fetch_rows()
        .with_context(|| format!("reading {}", path.display()))?;
    info!("{} rows in {}", rows.len(), path.display());
    let palette = config.palette();
    for (i, reading) in rows.iter().enumerate() {
        let aqi = heuristic::predict(reading);
        let band = palette.band(Category::classify(aqi));
        println!("Dataset Row {:<4} AQI {:>3}  {}", i + 1, aqi, band.label);
    }
    Ok(())
}
