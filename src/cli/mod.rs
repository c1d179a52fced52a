//! CLI surface for catalog-edit.
//!
//! Every command reads item JSON from disk, works through the same session
//! and tracker code the editor uses, and writes to stdout. Logs go to stderr.

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use clap::{ArgAction, ArgGroup, Args, Parser, Subcommand, builder::BoolishValueParser};
use serde::Serialize;

use crate::config::Config;
use crate::core::{CatalogObjectId, ItemWire, LocationId};
use crate::{Error, Result};

mod commands;
mod render;

// =============================================================================
// Entry + global options
// =============================================================================

#[derive(Parser, Debug)]
#[command(
    name = "catalog-edit",
    version,
    about = "Inspect and edit catalog item availability",
    infer_subcommands = true,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Machine-readable JSON output.
    #[arg(
        long,
        global = true,
        default_value_t = false,
        num_args = 0..=1,
        value_parser = BoolishValueParser::new()
    )]
    pub json: bool,

    /// Log more (repeat for more).
    #[arg(short = 'v', long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show presence, categories and per-variation state of an item.
    #[command(alias = "show")]
    Inspect(InspectArgs),

    /// List tracked fields that differ between two versions of an item.
    Diff(DiffArgs),

    /// Enable or disable an item, variation or tracking at one location.
    Toggle(ToggleArgs),

    /// Show or initialize configuration.
    Config {
        #[command(subcommand)]
        cmd: ConfigCmd,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCmd {
    /// Print the effective configuration.
    Show,
    /// Write a default user config file.
    Init {
        /// Overwrite an existing file.
        #[arg(long)]
        force: bool,
    },
}

// =============================================================================
// Per-command args
// =============================================================================

#[derive(Args, Debug)]
pub struct InspectArgs {
    /// Item JSON file.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Locations to report (default: every location the item mentions).
    #[arg(long, value_delimiter = ',', num_args = 1.., value_parser = parse_location)]
    pub locations: Vec<LocationId>,
}

#[derive(Args, Debug)]
pub struct DiffArgs {
    /// Item as last saved.
    #[arg(value_name = "BASELINE")]
    pub baseline: PathBuf,

    /// Item as edited.
    #[arg(value_name = "CURRENT")]
    pub current: PathBuf,
}

#[derive(Args, Debug)]
#[command(group(ArgGroup::new("state").required(true).args(["enable", "disable"])))]
pub struct ToggleArgs {
    /// Item JSON file.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    #[arg(short = 'l', long, value_parser = parse_location)]
    pub location: LocationId,

    #[arg(long)]
    pub enable: bool,

    #[arg(long)]
    pub disable: bool,

    /// Variation id, or its position in the item.
    #[arg(long, value_name = "ID")]
    pub variation: Option<String>,

    /// Toggle inventory tracking instead of presence.
    #[arg(long)]
    pub tracking: bool,
}

impl ToggleArgs {
    fn enabled(&self) -> bool {
        self.enable && !self.disable
    }
}

/// Parse CLI args (used by bin).
pub fn parse_from<I, T>(args: I) -> Cli
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    Cli::parse_from(args)
}

/// Run the CLI (used by bin).
pub fn run(cli: Cli, config: Config) -> Result<()> {
    let ctx = Ctx {
        json: cli.json,
        config,
    };
    match cli.command {
        Commands::Inspect(args) => commands::inspect::handle(&ctx, args),
        Commands::Diff(args) => commands::diff::handle(&ctx, args),
        Commands::Toggle(args) => commands::toggle::handle(&ctx, args),
        Commands::Config { cmd } => match cmd {
            ConfigCmd::Show => commands::config::handle_show(&ctx),
            ConfigCmd::Init { force } => commands::config::handle_init(&ctx, force),
        },
    }
}

pub(crate) struct Ctx {
    pub json: bool,
    pub config: Config,
}

// =============================================================================
// Shared helpers
// =============================================================================

fn read_item(path: &Path) -> Result<ItemWire> {
    let contents = fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(serde_json::from_str(&contents)?)
}

/// Index of the variation named by `raw`: an id first, then a position.
fn resolve_variation(item: &ItemWire, raw: &str) -> Result<usize> {
    let raw = raw.trim();
    if let Ok(id) = CatalogObjectId::parse(raw)
        && let Some(idx) = item
            .variations
            .iter()
            .position(|v| v.id.as_deref() == Some(id.as_str()))
    {
        return Ok(idx);
    }
    match raw.parse::<usize>() {
        Ok(index) if index < item.variations.len() => Ok(index),
        Ok(index) => Err(Error::NoSuchVariation { index }),
        Err(_) => Err(Error::UnknownVariation { id: raw.to_string() }),
    }
}

fn print_line(s: &str) -> Result<()> {
    use std::io::Write;
    let mut stdout = std::io::stdout().lock();
    if let Err(e) = writeln!(stdout, "{s}")
        && e.kind() != std::io::ErrorKind::BrokenPipe
    {
        return Err(Error::Io {
            path: PathBuf::from("<stdout>"),
            source: e,
        });
    }
    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    print_line(&serde_json::to_string_pretty(value)?)
}

fn parse_location(raw: &str) -> std::result::Result<LocationId, String> {
    LocationId::parse(raw).map_err(|e| e.to_string())
}
