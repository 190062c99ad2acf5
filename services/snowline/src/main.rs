//! Snowline extraction service.
//!
//! Loads a YAML run configuration, reads Snow Survey observations, extracts
//! one snowline per date and writes a map for each.

mod config;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use ingestion::CsvObservationSource;
use renderer::{
    Basemap, MapGenerator, MapRenderer, OutputFormat, PngMapRenderer, SvgMapRenderer,
};
use snowline_common::{DailyOutcome, SnowlineSeries};
use snowline_engine::{
    merge_line_segments, simplify_snowline, smooth_snowline, InterpolationProcessor,
    SeriesSummary, SnowlinePipeline,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

use config::{load_config, Config, PostprocessConfig};

#[derive(Parser, Debug)]
#[command(name = "snowline")]
#[command(about = "Extract daily snowlines from snow survey observations")]
struct Args {
    /// Configuration file path
    #[arg(short, long, env = "SNOWLINE_CONFIG")]
    config: PathBuf,

    /// Log level (overridden by RUST_LOG)
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Emit logs as JSON
    #[arg(long)]
    log_json: bool,

    /// Validate the configuration and exit
    #[arg(long)]
    dry_run: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(&args.log_level, args.log_json);

    let config = load_config(&args.config)
        .with_context(|| format!("Failed to load configuration from {}", args.config.display()))?;
    println!("{}", config);

    if args.dry_run {
        info!("Dry run: configuration is valid");
        return Ok(());
    }

    let series = extract(&config)?;
    let series = postprocess(series, &config.postprocess);
    let maps = render(&series, &config)?;

    let summary = SeriesSummary::from_series(&series);
    info!(
        dates = summary.dates,
        extracted = summary.snowlines,
        no_crossing = summary.no_crossing,
        labeled = summary.labeled,
        empty = summary.empty,
        failed = summary.failed,
        maps = maps,
        "Snowline run complete"
    );
    Ok(())
}

fn init_tracing(level: &str, json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);

    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn extract(config: &Config) -> Result<SnowlineSeries> {
    let source = CsvObservationSource::new(&config.input.snow_cover_data);
    let processor =
        InterpolationProcessor::new(config.processing.clone(), config.region.bounding_box)
            .context("Invalid processing configuration")?;
    let pipeline = SnowlinePipeline::new(config.pipeline_config(), source, processor)
        .context("Invalid pipeline configuration")?;

    pipeline.run().with_context(|| {
        format!(
            "Failed to load observations from {}",
            config.input.snow_cover_data.display()
        )
    })
}

/// Apply the configured clean-up to every extracted geometry.
fn postprocess(series: SnowlineSeries, settings: &PostprocessConfig) -> SnowlineSeries {
    if !settings.is_enabled() {
        return series;
    }

    series
        .into_iter()
        .map(|(date, outcome)| {
            let outcome = match outcome {
                DailyOutcome::Extracted(mut result) => {
                    if settings.merge_segments {
                        result = merge_line_segments(&result);
                    }
                    if let Some(tolerance) = settings.simplify_tolerance {
                        result = simplify_snowline(&result, tolerance);
                    }
                    if let Some(distance) = settings.smooth_buffer {
                        result = smooth_snowline(&result, distance);
                    }
                    DailyOutcome::Extracted(result)
                }
                other => other,
            };
            (date, outcome)
        })
        .collect()
}

fn render(series: &SnowlineSeries, config: &Config) -> Result<usize> {
    let mut svg = SvgMapRenderer::new(config.region.bounding_box, config.output.style.clone())
        .context("Invalid map style")?;
    if let Some(path) = config.input.existing_basemap() {
        let basemap = Basemap::load(path)
            .with_context(|| format!("Failed to load basemap from {}", path.display()))?;
        info!(path = %path.display(), outlines = basemap.outlines().len(), "Loaded basemap");
        svg = svg.with_basemap(basemap);
    }
    let renderer: Box<dyn MapRenderer> = match config.output.format {
        OutputFormat::Svg => Box::new(svg),
        OutputFormat::Png => Box::new(PngMapRenderer::new(svg)),
    };

    let generator = MapGenerator::new(
        &config.output.directory,
        config.output.filename_prefix.clone(),
        config.output.format,
        renderer,
    );
    let written = generator
        .generate_all(series)
        .with_context(|| format!("Failed to write maps to {}", generator.directory().display()))?;
    Ok(written.len())
}
