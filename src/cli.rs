use crate::config::load_config;
use crate::dataset::{DatasetCatalog, parse_data_node};
use crate::ir::Dataset;
use crate::layout_dump::write_layout_dump;
use crate::render::write_output_svg;
use crate::session::Session;
use anyhow::Result;
use clap::{ArgAction, Parser, ValueEnum};
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

const CUSTOM_KEY: &str = "custom";

#[derive(Parser, Debug)]
#[command(name = "tmr", version, about = "Squarified treemap renderer for small hierarchical datasets")]
pub struct Args {
    /// Bundled dataset to render
    #[arg(short = 'd', long = "dataset", default_value = "videogames")]
    pub dataset: String,

    /// Dataset JSON file or '-' for stdin, used instead of a bundled dataset
    #[arg(short = 'i', long = "input")]
    pub input: Option<PathBuf>,

    /// Treemap output file (svg/png). Defaults to stdout for SVG if omitted.
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    /// Legend SVG output file
    #[arg(long = "legend")]
    pub legend: Option<PathBuf>,

    /// Output format
    #[arg(short = 'e', long = "outputFormat", value_enum, default_value = "svg")]
    pub output_format: OutputFormat,

    /// Config JSON file
    #[arg(short = 'c', long = "configFile")]
    pub config: Option<PathBuf>,

    /// Canvas width
    #[arg(short = 'w', long = "width")]
    pub width: Option<f64>,

    /// Canvas height
    #[arg(short = 'H', long = "height")]
    pub height: Option<f64>,

    /// Gap between sibling tiles in pixels
    #[arg(short = 'p', long = "padding")]
    pub padding: Option<f64>,

    /// List bundled datasets and exit
    #[arg(long = "list")]
    pub list: bool,

    /// Write the computed layout as JSON
    #[arg(long = "dumpLayout")]
    pub dump_layout: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    pub verbose: u8,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum OutputFormat {
    Svg,
    Png,
}

pub fn run() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let mut config = load_config(args.config.as_deref())?;
    if let Some(width) = args.width {
        config.treemap.width = width;
    }
    if let Some(height) = args.height {
        config.treemap.height = height;
    }
    if let Some(padding) = args.padding {
        config.treemap.padding_inner = padding;
    }

    let mut catalog = DatasetCatalog::bundled()?;
    if args.list {
        for dataset in catalog.iter() {
            println!("{}\t{}", dataset.key, dataset.title);
        }
        return Ok(());
    }

    let key = match args.input.as_deref() {
        Some(path) => {
            let input = read_input(path)?;
            let root = parse_data_node(CUSTOM_KEY, &input)?;
            let title = root.name.clone();
            catalog.insert(Dataset::new(CUSTOM_KEY, title, String::new(), root));
            CUSTOM_KEY.to_string()
        }
        None => {
            if !catalog.contains(&args.dataset) {
                let known: Vec<&str> = catalog.keys().collect();
                return Err(anyhow::anyhow!(
                    "Unknown dataset `{}` (available: {})",
                    args.dataset,
                    known.join(", ")
                ));
            }
            args.dataset.clone()
        }
    };

    let mut session = Session::new(catalog, config)?;
    session.select(&key)?;

    let svg = session.treemap_svg();
    match args.output_format {
        OutputFormat::Svg => {
            write_output_svg(&svg, args.output.as_deref())?;
        }
        OutputFormat::Png => {
            let output = ensure_output(&args.output, "png")?;
            write_png(&svg, &output, &session)?;
        }
    }

    if let Some(path) = args.legend.as_deref() {
        write_output_svg(&session.legend_svg(), Some(path))?;
    }

    if let Some(path) = args.dump_layout.as_deref() {
        if let (Some(layout), Some(hierarchy)) = (session.layout(), session.hierarchy()) {
            write_layout_dump(path, layout, hierarchy)?;
        }
    }

    Ok(())
}

#[cfg(feature = "png")]
fn write_png(svg: &str, output: &Path, session: &Session) -> Result<()> {
    crate::render::write_output_png(svg, output, &session.config().render)
}

#[cfg(not(feature = "png"))]
fn write_png(_svg: &str, _output: &Path, _session: &Session) -> Result<()> {
    Err(anyhow::anyhow!("PNG output requires the `png` feature"))
}

fn init_tracing(verbosity: u8) {
    let default = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

fn read_input(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf)?;
        return Ok(buf);
    }
    Ok(std::fs::read_to_string(path)?)
}

fn ensure_output(output: &Option<PathBuf>, ext: &str) -> Result<PathBuf> {
    if let Some(path) = output {
        return Ok(path.clone());
    }
    Err(anyhow::anyhow!(
        "Output path required for {} output",
        ext
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn args_are_well_formed() {
        Args::command().debug_assert();
    }

    #[test]
    fn parses_overrides() {
        let args = Args::parse_from([
            "tmr", "-d", "movies", "-w", "800", "-H", "400", "-p", "2", "-vv", "--legend", "l.svg",
        ]);
        assert_eq!(args.dataset, "movies");
        assert_eq!(args.width, Some(800.0));
        assert_eq!(args.height, Some(400.0));
        assert_eq!(args.padding, Some(2.0));
        assert_eq!(args.verbose, 2);
        assert_eq!(args.legend, Some(PathBuf::from("l.svg")));
    }

    #[test]
    fn png_requires_output_path() {
        assert!(ensure_output(&None, "png").is_err());
        assert_eq!(
            ensure_output(&Some(PathBuf::from("a.png")), "png").unwrap(),
            PathBuf::from("a.png")
        );
    }
}
