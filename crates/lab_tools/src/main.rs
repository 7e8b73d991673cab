//! Balance Lab - command line
//!
//! Loads a balance document and prints combat metrics against it.
//!
//! # Usage
//!
//! ```bash
//! # One attacker against one defender standing in a forest
//! cargo run -p lab_tools -- duel --attacker p1 --defender e1 --defender-terrain forest
//!
//! # Every class against the standard unit
//! cargo run -p lab_tools -- classes
//!
//! # Checklist as JSON
//! cargo run -p lab_tools -- checklist --json
//! ```
//!
//! Views go to stdout; logs go to stderr.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::Serialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use lab_core::aggregate::{aggregate_by_class, global_overview};
use lab_core::checklist::evaluate_checklist;
use lab_core::data::Document;
use lab_core::export::export_game;
use lab_core::review::{review_class, review_duel};
use lab_core::selection::{Scope, Selection};
use lab_core::stage_analysis::{analyze_selected_stage, DEFAULT_AWARENESS_RADIUS};
use lab_core::tables::{class_table, unit_table};
use lab_tools::loader::{export_to_json, load_document, write_export};
use lab_tools::render;
use lab_tools::report::BalanceReport;

/// Bundled example document.
const EXAMPLE_DOCUMENT: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/assets/example.json");

#[derive(Parser)]
#[command(name = "balance-lab")]
#[command(about = "Combat metrics for tactics-RPG balancing")]
#[command(version)]
struct Cli {
    /// Enable verbose logging to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Balance document (.json or .ron)
    #[arg(long, global = true, default_value = EXAMPLE_DOCUMENT)]
    doc: PathBuf,

    /// Print machine-readable JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum ScopeArg {
    Player,
    Enemy,
    All,
}

impl From<ScopeArg> for Scope {
    fn from(arg: ScopeArg) -> Self {
        match arg {
            ScopeArg::Player => Self::Player,
            ScopeArg::Enemy => Self::Enemy,
            ScopeArg::All => Self::All,
        }
    }
}

/// Selection flags shared by every view.
#[derive(Args)]
struct SelectionArgs {
    /// Attacking unit id
    #[arg(long)]
    attacker: Option<String>,

    /// Defending (standard) unit id
    #[arg(long)]
    defender: Option<String>,

    /// Terrain under the attacker
    #[arg(long)]
    attacker_terrain: Option<String>,

    /// Terrain under the defender
    #[arg(long)]
    defender_terrain: Option<String>,

    /// Override the document's doubling switch
    #[arg(long)]
    doubling: Option<bool>,

    /// Override the document's crit switch
    #[arg(long)]
    crit: Option<bool>,
}

impl SelectionArgs {
    fn selection(&self, document: &Document) -> Selection {
        let config = &document.config;
        let mut selection = Selection::from_config(config).with_toggles(
            self.doubling.unwrap_or(config.enable_doubling),
            self.crit.unwrap_or(config.enable_crit),
        );
        if let Some(id) = &self.attacker {
            selection = selection.with_attacker(id.as_str());
        }
        if let Some(id) = &self.defender {
            selection = selection.with_defender(id.as_str());
        }
        if let Some(id) = &self.attacker_terrain {
            selection = selection.with_attacker_terrain(id.as_str());
        }
        if let Some(id) = &self.defender_terrain {
            selection = selection.with_defender_terrain(id.as_str());
        }
        selection
    }
}

#[derive(Subcommand)]
enum Commands {
    /// One placed unit striking another
    Duel {
        #[command(flatten)]
        select: SelectionArgs,
    },

    /// Review a class with a given weapon against the standard unit
    Class {
        /// Class id
        class_id: String,

        /// Weapon id
        weapon_id: String,

        #[command(flatten)]
        select: SelectionArgs,
    },

    /// Every class against the standard unit
    Classes {
        #[command(flatten)]
        select: SelectionArgs,
    },

    /// Placed units against the standard unit
    Units {
        #[command(flatten)]
        select: SelectionArgs,

        /// Units to compare
        #[arg(long, value_enum, default_value = "all")]
        scope: ScopeArg,

        /// Roll rows up per class
        #[arg(long)]
        by_class: bool,

        /// Print only the global overview
        #[arg(long, conflicts_with = "by_class")]
        overview: bool,
    },

    /// Threat estimate for a stage
    Stage {
        /// Stage id
        #[arg(long)]
        stage: String,

        /// Awareness radius in tiles
        #[arg(long, default_value_t = DEFAULT_AWARENESS_RADIUS)]
        radius: u32,

        #[command(flatten)]
        select: SelectionArgs,
    },

    /// Evaluate the document's checklist
    Checklist {
        #[command(flatten)]
        select: SelectionArgs,
    },

    /// Write the runtime bundle for the game
    Export {
        /// Output file (stdout when absent)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Markdown report: classes, unit overview, checklist
    Report {
        #[command(flatten)]
        select: SelectionArgs,

        /// Output markdown file (stdout when absent)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() {
    let cli = Cli::parse();

    // Initialize logging to stderr (stdout is for views)
    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    if let Err(e) = run(&cli) {
        tracing::error!("{e}");
        std::process::exit(1);
    }
}

fn emit<T: Serialize>(
    json: bool,
    value: &T,
    text: impl FnOnce(&T) -> String,
) -> Result<(), String> {
    if json {
        let out = serde_json::to_string_pretty(value).map_err(|e| e.to_string())?;
        println!("{out}");
    } else {
        print!("{}", text(value));
    }
    Ok(())
}

fn run(cli: &Cli) -> Result<(), String> {
    let doc = load_document(&cli.doc).map_err(|e| e.to_string())?;
    let json = cli.json;

    match &cli.command {
        Commands::Duel { select } => {
            let review = review_duel(&doc, &select.selection(&doc)).map_err(|e| e.to_string())?;
            emit(json, &review, render::duel)
        }
        Commands::Class {
            class_id,
            weapon_id,
            select,
        } => {
            let review = review_class(&doc, &select.selection(&doc), class_id, weapon_id)
                .map_err(|e| e.to_string())?;
            emit(json, &review, render::class_review)
        }
        Commands::Classes { select } => {
            let rows = class_table(&doc, &select.selection(&doc)).map_err(|e| e.to_string())?;
            emit(json, &rows, |r| render::class_rows(r))
        }
        Commands::Units {
            select,
            scope,
            by_class,
            overview,
        } => {
            let selection = select.selection(&doc).with_scope((*scope).into());
            let rows = unit_table(&doc, &selection).map_err(|e| e.to_string())?;
            if *by_class {
                emit(json, &aggregate_by_class(&rows), |a| render::class_aggregates(a))
            } else if *overview {
                emit(json, &global_overview(&rows), render::overview)
            } else {
                emit(json, &rows, |r| render::unit_rows(r))
            }
        }
        Commands::Stage {
            stage,
            radius,
            select,
        } => {
            let selection = select.selection(&doc).with_stage(stage.as_str());
            let analysis =
                analyze_selected_stage(&doc, &selection, *radius).map_err(|e| e.to_string())?;
            emit(json, &analysis, render::stage)
        }
        Commands::Checklist { select } => {
            let report =
                evaluate_checklist(&doc, &select.selection(&doc)).map_err(|e| e.to_string())?;
            emit(json, &report, render::checklist)
        }
        Commands::Export { output } => {
            let export = export_game(&doc);
            match output {
                Some(path) => write_export(path, &export).map_err(|e| e.to_string()),
                None => {
                    println!("{}", export_to_json(&export).map_err(|e| e.to_string())?);
                    Ok(())
                }
            }
        }
        Commands::Report { select, output } => {
            let report =
                BalanceReport::build(&doc, &select.selection(&doc)).map_err(|e| e.to_string())?;
            if json {
                return emit(true, &report, BalanceReport::to_markdown);
            }
            let md = report.to_markdown();
            match output {
                Some(path) => {
                    std::fs::write(path, &md).map_err(|e| e.to_string())?;
                    tracing::info!("Report saved to: {}", path.display());
                }
                None => println!("{md}"),
            }
            Ok(())
        }
    }
}
