use crate::aggregate::{Aggregator, HttpFetcher};
use crate::config::{Config, load_config};
use crate::ir::UserRecord;
use crate::layout::{layout_art, layout_text};
use crate::layout_dump::write_layout_dump;
use crate::render::{render_art_svg, render_document, render_text_svg, write_output_svg};
use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "devcard", version, about = "Neofetch-style SVG card for a GitHub profile")]
pub struct Args {
    /// Config file (JSON or JSON5)
    #[arg(short = 'c', long = "configFile")]
    pub config: Option<PathBuf>,

    /// GitHub username (defaults to the config file, then the token's owner)
    #[arg(short = 'u', long = "user")]
    pub user: Option<String>,

    /// Output SVG file, or '-' for stdout. Defaults to output/neofetch.svg
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    /// Render this record (JSON) instead of fetching profile stats
    #[arg(long = "record")]
    pub record: Option<PathBuf>,

    /// Read ASCII art from this file instead of converting the avatar
    #[arg(long = "art")]
    pub art: Option<PathBuf>,

    /// Write the collected record as JSON
    #[arg(long = "dumpRecord")]
    pub dump_record: Option<PathBuf>,

    /// Write the positioned lines of both blocks as JSON
    #[arg(long = "dumpLayout")]
    pub dump_layout: Option<PathBuf>,

    /// Only log warnings and errors
    #[arg(short = 'q', long = "quiet")]
    pub quiet: bool,
}

pub fn run() -> Result<()> {
    let args = Args::parse();
    init_logging(args.quiet);

    let mut config = load_config(args.config.as_deref())?;
    if let Some(user) = args.user.clone() {
        config.username = Some(user);
    }
    let output = args.output.clone().unwrap_or_else(|| config.output.clone());

    let (record, art) = resolve_inputs(&args, &config)?;

    if let Some(path) = args.dump_record.as_deref() {
        let json = serde_json::to_string_pretty(&record)?;
        std::fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
    }

    let art_layout = layout_art(&art);
    let text_layout = layout_text(&record);
    if let Some(path) = args.dump_layout.as_deref() {
        write_layout_dump(path, &art_layout, &text_layout)?;
    }

    let art_svg = render_art_svg(&art_layout, &config.theme);
    info!("Generated SVG Art section");
    let text_svg = render_text_svg(&text_layout, &config.theme);
    info!("Generated SVG Text section");
    let svg = render_document(&art_svg, &text_svg, &config.theme);
    write_output_svg(&svg, Some(output.as_path()))
}

/// Local files win over the network; the aggregator only runs for what is missing.
fn resolve_inputs(args: &Args, config: &Config) -> Result<(UserRecord, String)> {
    let local_record = args.record.as_deref().map(read_record).transpose()?;
    let local_art = args.art.as_deref().map(read_text).transpose()?;

    match (local_record, local_art) {
        (Some(record), Some(art)) => Ok((record, art)),
        (Some(record), None) => {
            let aggregator = Aggregator::from_config(HttpFetcher::new()?, config);
            Ok((record, aggregator.art_only()?))
        }
        (None, local_art) => {
            let aggregator = Aggregator::from_config(HttpFetcher::new()?, config);
            let aggregate = aggregator.run(local_art.is_none())?;
            let art = local_art.or(aggregate.art).unwrap_or_default();
            Ok((aggregate.record, art))
        }
    }
}

fn read_record(path: &Path) -> Result<UserRecord> {
    let contents = read_text(path)?;
    UserRecord::from_json(&contents).with_context(|| format!("parsing {}", path.display()))
}

fn read_text(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
}

fn init_logging(quiet: bool) {
    let default = if quiet { "warn" } else { "info" };
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default))
        .format_timestamp(None)
        .try_init();
}
