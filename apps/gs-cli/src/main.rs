use clap::{Parser, Subcommand};
use std::io;
use std::path::{Path, PathBuf};

use gs_app::{
    AppResult, GridStatus, SolvedCriteria, SwitchOutcome, apply_switch, classify, evaluate,
    load_config, load_network, reset_and_solve, save_network, summarize,
};
use gs_core::NodeId;
use gs_network::{Network, to_json_string};
use gs_solver::DcConfig;
use gs_switch::SwitchRef;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "gs-cli")]
#[command(about = "GridSwitch CLI - DC power flow and line switching for grid puzzles", long_about = None)]
struct Cli {
    /// Solver configuration YAML file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate snapshot syntax and topology
    Validate {
        /// Path to the network snapshot JSON file
        snapshot: PathBuf,
    },
    /// Solve the power flow and write the updated snapshot
    Solve {
        /// Path to the network snapshot JSON file
        snapshot: PathBuf,
        /// Output snapshot path (optional, defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Toggle switches in order, refusing any that make the grid unsolvable
    Switch {
        /// Path to the network snapshot JSON file
        snapshot: PathBuf,
        /// Switches as <lineId>_<from|to>
        #[arg(required = true)]
        switches: Vec<SwitchRef>,
        /// Output snapshot path (optional, defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Close every open switch of a node and re-solve
    Reset {
        /// Path to the network snapshot JSON file
        snapshot: PathBuf,
        /// Node id (base or shadow)
        node: NodeId,
        /// Output snapshot path (optional, defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Show whether the grid is solved, overloaded, or islanded
    Status {
        /// Path to the network snapshot JSON file
        snapshot: PathBuf,
    },
}

fn main() -> AppResult<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => DcConfig::default(),
    };
    debug!(?config, "solver configuration");

    match cli.command {
        Commands::Validate { snapshot } => cmd_validate(&snapshot),
        Commands::Solve { snapshot, output } => cmd_solve(&snapshot, &config, output.as_deref()),
        Commands::Switch {
            snapshot,
            switches,
            output,
        } => cmd_switch(&snapshot, &switches, &config, output.as_deref()),
        Commands::Reset {
            snapshot,
            node,
            output,
        } => cmd_reset(&snapshot, &node, &config, output.as_deref()),
        Commands::Status { snapshot } => cmd_status(&snapshot, &config),
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn cmd_validate(snapshot: &Path) -> AppResult<()> {
    println!("Validating snapshot: {}", snapshot.display());
    let network = load_network(snapshot)?;
    let summary = summarize(&network);
    println!("✓ Snapshot is valid");
    println!(
        "  {} nodes ({} shadow), {} lines, {} open switches",
        summary.node_count, summary.shadow_count, summary.line_count, summary.open_switch_count
    );
    if summary.imbalance.abs() > 1e-9 {
        println!("  Warning: injections do not balance ({:+.3})", summary.imbalance);
    }
    Ok(())
}

fn cmd_solve(snapshot: &Path, config: &DcConfig, output: Option<&Path>) -> AppResult<()> {
    let mut network = load_network(snapshot)?;
    let solution = evaluate(&mut network, config)?;

    match solution.infeasibility {
        Some(reason) => eprintln!("✗ Network is unsolvable: {:?}", reason),
        None => {
            eprintln!("✓ Solved, cost = {}", solution.cost);
            for id in solution.overloaded_lines(&network) {
                eprintln!("  overloaded: {}", id);
            }
        }
    }
    emit(&network, output)
}

fn cmd_switch(
    snapshot: &Path,
    switches: &[SwitchRef],
    config: &DcConfig,
    output: Option<&Path>,
) -> AppResult<()> {
    let mut network = load_network(snapshot)?;

    for switch in switches {
        match apply_switch(&mut network, switch, config)? {
            SwitchOutcome::Applied { toggle, cost } => {
                eprintln!("✓ {} {:?}, cost = {}", switch, toggle, cost);
            }
            SwitchOutcome::Reverted { reason } => {
                eprintln!("✗ {} refused: {}", switch, reason);
            }
        }
    }
    emit(&network, output)
}

fn cmd_reset(
    snapshot: &Path,
    node: &NodeId,
    config: &DcConfig,
    output: Option<&Path>,
) -> AppResult<()> {
    let mut network = load_network(snapshot)?;
    let outcome = reset_and_solve(&mut network, node, config)?;

    if outcome.closed.is_empty() {
        eprintln!("No open switches on node {}", node);
    } else {
        for switch in &outcome.closed {
            eprintln!("  closed {}", switch);
        }
    }
    eprintln!("✓ Reset {} switches, cost = {}", outcome.closed.len(), outcome.cost);
    emit(&network, output)
}

fn cmd_status(snapshot: &Path, config: &DcConfig) -> AppResult<()> {
    let mut network = load_network(snapshot)?;
    if network.cost.is_none() {
        evaluate(&mut network, config)?;
    }

    let criteria = SolvedCriteria {
        cost_epsilon: config.cost_epsilon,
        ..SolvedCriteria::default()
    };
    match classify(&network, &criteria)? {
        GridStatus::Unsolved => println!("Unsolved"),
        GridStatus::Solved => println!("✓ Solved"),
        GridStatus::Overloaded { cost, lines } => {
            println!("Overloaded, cost = {:.3}", cost);
            for id in lines {
                println!("  {}", id);
            }
        }
        GridStatus::Islanded => println!("✗ Islanded"),
    }

    let summary = summarize(&network);
    println!("\nNetwork Summary:");
    if let Some(level) = network.level {
        println!("  Level: {}", level);
    }
    println!(
        "  Nodes: {} ({} shadow)",
        summary.node_count, summary.shadow_count
    );
    println!("  Lines: {}", summary.line_count);
    println!("  Open switches: {}", summary.open_switch_count);
    println!(
        "  Production: {:.3}, consumption: {:.3}",
        summary.production, summary.consumption
    );
    if let Some((line, loading)) = &summary.worst_loading {
        println!("  Worst loading: {} at {:.1}%", line, loading * 100.0);
    }

    Ok(())
}

fn emit(network: &Network, output: Option<&Path>) -> AppResult<()> {
    if let Some(path) = output {
        save_network(path, network)?;
        eprintln!("✓ Wrote snapshot to {}", path.display());
    } else {
        println!("{}", to_json_string(network)?);
    }
    Ok(())
}
