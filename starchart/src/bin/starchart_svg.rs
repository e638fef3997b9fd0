//! Renders one frame of a catalog to an SVG file.
//!
//! Usage: `starchart-svg <catalog.csv> <out.svg> [config.yml]`

use std::path::PathBuf;

use anyhow::{Context, bail};
use log::info;

use starchart::svg::SvgCanvas;
use starchart::{Catalog, ChartConfig, StarChart};

#[derive(Debug, PartialEq)]
struct Args {
    catalog: PathBuf,
    output: PathBuf,
    config: Option<PathBuf>,
}

/// Parses the arguments after the program name.
fn parse_args(args: &[String]) -> anyhow::Result<Args> {
    match args {
        [catalog, output] | [catalog, output, _] => Ok(Args {
            catalog: PathBuf::from(catalog),
            output: PathBuf::from(output),
            config: args.get(2).map(PathBuf::from),
        }),
        _ => bail!(
            "Usage: {} <catalog.csv> <out.svg> [config.yml]",
            env!("CARGO_BIN_NAME")
        ),
    }
}

fn main() -> anyhow::Result<()> {
    let _logger = common::log_setup::setup_logging("info", "logs")?;

    let args: Vec<String> = std::env::args().skip(1).collect();
    let args = parse_args(&args)?;

    let config = match &args.config {
        Some(path) => ChartConfig::from_yaml_file(path)?,
        None => ChartConfig::default(),
    };

    let catalog = Catalog::from_csv_path(&args.catalog, config.ingest_options())
        .with_context(|| format!("Failed to load catalog {}", args.catalog.display()))?;
    let report = catalog.report();
    info!(
        "Catalog: {} records accepted, {} skipped",
        report.accepted, report.skipped
    );

    let mut canvas = SvgCanvas::new(config.canvas);
    let mut chart = StarChart::new(config, catalog);
    let outcome = chart.frame(&mut canvas);

    canvas.save(&args.output)?;
    info!(
        "Wrote {} visible stars to {}",
        outcome.visible,
        args.output.display()
    );

    Ok(())
}
