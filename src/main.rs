mod analysis;
mod config;
mod data;
mod display;
mod error;
mod render;
mod report;

use analysis::cascade::SelectorOptions;
use analysis::density::check_bins;
use analysis::filter::{filter, FilterCriteria};
use analysis::summary::{top_scorers, ShotSummary};
use anyhow::{Context, Result};
use clap::{Args as ClapArgs, Parser, Subcommand};
use config::Config;
use data::loader::ShotTable;
use display::output::{
    display_error, display_info, display_options, display_success, display_summary,
    display_top_scorers,
};
use indicatif::ProgressBar;
use render::encode::EncodedImage;
use render::{heatmap, shotmap};
use report::DashboardReport;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "Shot Dash")]
#[command(about = "Filter football shot data and summarize it", long_about = None)]
struct Args {
    /// Shot CSV (overrides SHOTS_CSV)
    #[arg(long, global = true)]
    data: Option<PathBuf>,

    /// Debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(ClapArgs, Debug, Clone, Default)]
struct FilterArgs {
    /// Competition name (repeatable)
    #[arg(long = "competition")]
    competitions: Vec<String>,

    /// Season name, e.g. 2019/2020 (repeatable)
    #[arg(long = "season")]
    seasons: Vec<String>,

    #[arg(long)]
    team: Option<String>,

    #[arg(long)]
    player: Option<String>,
}

impl FilterArgs {
    fn criteria(&self) -> FilterCriteria {
        let mut criteria = FilterCriteria::new()
            .with_competitions(self.competitions.iter().cloned())
            .with_seasons(self.seasons.iter().cloned());
        if let Some(team) = &self.team {
            criteria = criteria.with_team(team.clone());
        }
        if let Some(player) = &self.player {
            criteria = criteria.with_player(player.clone());
        }
        criteria
    }
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Shots, goals and goal percentage
    Summary {
        #[command(flatten)]
        filters: FilterArgs,
    },
    /// Top scorers for the selected competitions and seasons
    Scorers {
        #[command(flatten)]
        filters: FilterArgs,

        /// Leaderboard length (default: SHOTS_TOP_N or 7)
        #[arg(short, long)]
        top: Option<usize>,
    },
    /// Options available to each selector
    Options {
        #[command(flatten)]
        filters: FilterArgs,
    },
    /// Shot and goal density heatmaps
    Heatmap {
        #[command(flatten)]
        filters: FilterArgs,

        /// Bins per axis (default: SHOTS_HEATMAP_BINS or 45)
        #[arg(long)]
        bins: Option<usize>,

        /// Write the PNG here instead of printing a data URI
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
    /// xG shot map
    Shotmap {
        #[command(flatten)]
        filters: FilterArgs,

        #[arg(short, long)]
        out: Option<PathBuf>,
    },
    /// JSON snapshot of everything above
    Report {
        #[command(flatten)]
        filters: FilterArgs,

        #[arg(short, long)]
        out: Option<PathBuf>,
    },
}

fn main() {
    let args = Args::parse();
    init_logging(args.verbose);

    if let Err(e) = run(args) {
        display_error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

fn run(args: Args) -> Result<()> {
    let mut config = Config::from_env().context("Failed to load configuration")?;
    if let Some(data) = args.data {
        config.data_path = data;
    }

    let table = load_table(&config.data_path)?;

    match args.command {
        Command::Summary { filters } => {
            let criteria = filters.criteria();
            let view = filter(&table, &criteria);
            display_summary(&ShotSummary::from_view(&view), &criteria);
        }
        Command::Scorers { filters, top } => {
            let criteria = filters.criteria().league_scope();
            let view = filter(&table, &criteria);
            let scorers = top_scorers(&view, top.unwrap_or(config.top_n));
            display_top_scorers(&scorers, &criteria);
        }
        Command::Options { filters } => {
            let options = SelectorOptions::compute(&table, &filters.criteria());
            display_options(&options);
        }
        Command::Heatmap { filters, bins, out } => {
            let bins = resolve_bins(bins, config.heatmap_bins)?;
            let view = filter(&table, &filters.criteria().league_scope());
            let image = heatmap::heatmap(&view, bins).context("Failed to render heatmap")?;
            emit_image(&image, out.as_deref())?;
        }
        Command::Shotmap { filters, out } => {
            let view = filter(&table, &filters.criteria());
            let image = shotmap::shot_map(&view).context("Failed to render shot map")?;
            emit_image(&image, out.as_deref())?;
        }
        Command::Report { filters, out } => {
            let report = DashboardReport::build(
                &table,
                &filters.criteria(),
                config.top_n,
                config.heatmap_bins,
            )
            .context("Failed to build report")?;
            let path = out.unwrap_or_else(|| DashboardReport::get_report_path(&config.output_dir));
            report
                .save(&path)
                .with_context(|| format!("Failed to save report to {}", path.display()))?;
            display_success(&format!("Report saved to {}", path.display()));
        }
    }

    Ok(())
}

fn resolve_bins(requested: Option<usize>, default: usize) -> Result<usize> {
    match requested {
        Some(bins) => check_bins(bins).context("Invalid --bins"),
        None => Ok(default),
    }
}

fn load_table(path: &Path) -> Result<ShotTable> {
    let pb = ProgressBar::new_spinner();
    pb.set_message(format!("Loading shots from {}", path.display()));
    pb.enable_steady_tick(Duration::from_millis(100));

    let loaded = ShotTable::from_path(path);
    match &loaded {
        Ok(table) => {
            pb.finish_with_message(format!("✓ Loaded {} shots", table.len()));
            if table.is_empty() {
                tracing::warn!(path = %path.display(), "shot file has no rows");
            }
        }
        Err(_) => pb.finish_and_clear(),
    }

    loaded.with_context(|| format!("Failed to load shot data from {}", path.display()))
}

fn emit_image(image: &EncodedImage, out: Option<&Path>) -> Result<()> {
    match out {
        Some(path) => {
            fs::write(path, &image.png)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            display_success(&format!("Image written to {}", path.display()));
        }
        None => {
            display_info("PNG data URI:");
            println!("{}", image.data_uri);
        }
    }
    Ok(())
}
