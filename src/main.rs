//! Strategist - Offline Tick Runner
//!
//! Runs the decision pipeline on a recorded snapshot or a generated
//! scenario and prints the resulting actions.

use std::path::PathBuf;

use clap::Parser;
use hearth_strategist::core::config::StrategyConfig;
use hearth_strategist::core::error::Result;
use hearth_strategist::model::action::ActionSet;
use hearth_strategist::model::properties::PropertyTable;
use hearth_strategist::model::view::PlayerView;
use hearth_strategist::scenario;
use hearth_strategist::strategy::{Session, TickReport};
use serde::Serialize;

/// Strategist - decide one player's actions for a game snapshot
#[derive(Parser, Debug)]
#[command(name = "strategist")]
#[command(about = "Run the decision pipeline on a snapshot and print the actions")]
struct Args {
    /// Snapshot JSON file; a scenario is generated when omitted
    #[arg(long)]
    snapshot: Option<PathBuf>,

    /// Seed for the generated scenario
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Map size for the generated scenario
    #[arg(long, default_value_t = 80)]
    map_size: i32,

    /// Property table JSON file (stock values when omitted)
    #[arg(long)]
    properties: Option<PathBuf>,

    /// Strategy config TOML file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of ticks to run on the snapshot
    #[arg(long, default_value_t = 1)]
    ticks: u64,

    /// Output format: json or text
    #[arg(long, default_value = "json")]
    format: String,

    /// Print the distance field of the last tick to stderr
    #[arg(long)]
    dump_distance: bool,
}

/// JSON output structure
#[derive(Serialize)]
struct TickOutput<'a> {
    actions: &'a ActionSet,
    report: &'a TickReport,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => StrategyConfig::load_from_toml(path)?,
        None => StrategyConfig::default(),
    };
    let properties = match &args.properties {
        Some(path) => PropertyTable::load_from_json(path)?,
        None => PropertyTable::standard(),
    };
    let mut view = match &args.snapshot {
        Some(path) => PlayerView::load_from_json(path)?,
        None => scenario::generate(args.seed, args.map_size),
    };

    tracing::info!(
        "Snapshot: tick {}, map {}, {} entities",
        view.current_tick,
        view.map_size,
        view.entities.len()
    );

    let mut session = Session::new(view.my_id, properties, config)?;
    let mut last = None;
    for _ in 0..args.ticks.max(1) {
        let outcome = session.tick(&view);
        view.current_tick += 1;
        last = Some(outcome);
    }
    let Some(outcome) = last else {
        return Ok(());
    };

    match args.format.as_str() {
        "text" => print_text(&outcome.actions, &outcome.report),
        _ => {
            let output = TickOutput {
                actions: &outcome.actions,
                report: &outcome.report,
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }

    if args.dump_distance {
        eprintln!("{}", outcome.report.distance_field.render());
    }

    Ok(())
}

fn print_text(actions: &ActionSet, report: &TickReport) {
    println!("=== Tick {} ===", report.tick);
    println!("Resources: {}", report.resources);
    println!(
        "Population: {}/{} (targets: {} builders, {} ranged, {} melee)",
        report.population.used,
        report.population.available,
        report.headcounts.builders,
        report.headcounts.ranged,
        report.headcounts.melee
    );
    println!(
        "Projects: {} open{}",
        report.open_projects,
        report
            .new_project
            .map(|c| format!(", new house at {}", c))
            .unwrap_or_default()
    );
    println!(
        "Assigned: {} builders, {} combat units, {} enemy targets",
        report.builders_assigned,
        report.combat_assigned,
        report.enemy_targets.len()
    );
    if !report.skipped.is_empty() {
        println!("Skipped entities: {}", report.skipped.len());
    }

    println!();
    for (id, action) in actions.iter() {
        let mut parts = Vec::new();
        if let Some(m) = &action.move_action {
            parts.push(format!("move {}", m.target));
        }
        if let Some(b) = &action.build_action {
            parts.push(format!("build {:?} at {}", b.kind, b.position));
        }
        if let Some(a) = &action.attack_action {
            match (&a.target, &a.auto_attack) {
                (Some(target), _) => parts.push(format!("attack {}", target)),
                (None, Some(auto)) => parts.push(format!("auto-attack range {}", auto.pathfind_range)),
                (None, None) => {}
            }
        }
        if let Some(r) = &action.repair_action {
            parts.push(format!("repair {}", r.target));
        }
        if parts.is_empty() {
            parts.push("idle".to_string());
        }
        println!("{}  {}", id, parts.join(", "));
    }
}
