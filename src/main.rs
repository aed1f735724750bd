//! Waygraph command line tool
//!
//! Inspects, creates and validates saved behavior graphs.
//!
//! # Usage
//!
//! ```bash
//! # Print the hierarchies and connections of a document
//! waygraph inspect route.json
//!
//! # Write the starter graph (Start wired into Go To)
//! waygraph new route.json
//!
//! # List saved presets
//! waygraph presets
//!
//! # Check that a document survives a load/save cycle unchanged
//! waygraph check route.json
//! ```

use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand};
use egui::Pos2;
use log::{debug, info};

use waygraph::editor::read_document;
use waygraph::{EditorConfig, NodeGraph, NodeId, PersistenceError, PresetStore};

/// Waygraph - behavior graph document tool
#[derive(Parser, Debug)]
#[command(name = "waygraph")]
#[command(version)]
#[command(about = "Inspect, create and validate behavior graph documents", long_about = None)]
struct Args {
    /// Config file to use instead of the default location
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the node hierarchies and connections of a document
    Inspect {
        #[arg(value_name = "FILE")]
        path: PathBuf,
    },
    /// Write the starter graph to a new document
    New {
        #[arg(value_name = "FILE")]
        path: PathBuf,
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
    /// List saved presets
    Presets,
    /// Verify a document loads and re-saves without losing anything
    Check {
        #[arg(value_name = "FILE")]
        path: PathBuf,
    },
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Persistence(#[from] PersistenceError),
    #[error(transparent)]
    Config(#[from] waygraph::ConfigError),
    #[error("{0} already exists (use --force to overwrite)")]
    Exists(PathBuf),
    #[error("{0}")]
    Lossy(String),
}

fn main() {
    let args = Args::parse();
    init_logging(args.verbose);

    if let Err(e) = run(&args) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level)).init();
}

fn run(args: &Args) -> Result<(), CliError> {
    let config = match &args.config {
        Some(path) => EditorConfig::load_from(path)?,
        None => EditorConfig::load()?,
    };
    debug!("Using config {:?}", config);

    match &args.command {
        Command::Inspect { path } => inspect(path, &config),
        Command::New { path, force } => create(path, *force),
        Command::Presets => list_presets(&config),
        Command::Check { path } => check(path, &config),
    }
}

fn load_graph(path: &Path, config: &EditorConfig) -> Result<NodeGraph, CliError> {
    let document = read_document(path)?;
    let mut graph = NodeGraph::with_config(config);
    graph.load_document(&document);
    Ok(graph)
}

fn inspect(path: &Path, config: &EditorConfig) -> Result<(), CliError> {
    let graph = load_graph(path, config)?;
    println!("{}: {} nodes, {} connections", path.display(), graph.node_count(), graph.connections().len());

    let roots: Vec<NodeId> = graph
        .z_order()
        .iter()
        .copied()
        .filter(|id| graph.parent_of(*id).is_none())
        .collect();
    for root in roots {
        print_tree(&graph, root, 1);
    }

    if !graph.connections().is_empty() {
        println!("Connections:");
        for connection in graph.connections() {
            let name = |id: NodeId| graph.node(id).map_or("?", |n| n.display_name());
            println!(
                "  {} [{}] #{} -> {} [{}] #{}",
                name(connection.from_node),
                connection.from_node,
                connection.from_socket,
                name(connection.to_node),
                connection.to_node,
                connection.to_socket
            );
        }
    }

    let functions = graph.function_names();
    if !functions.is_empty() {
        println!("Functions: {}", functions.join(", "));
    }
    Ok(())
}

fn print_tree(graph: &NodeGraph, id: NodeId, depth: usize) {
    let Some(node) = graph.node(id) else {
        return;
    };
    let slot = node
        .parent()
        .map(|link| format!("{:?} ", link.slot))
        .unwrap_or_default();
    let values: Vec<String> = node
        .parameters()
        .iter()
        .map(|p| format!("{}={}", p.name(), p.value()))
        .collect();
    println!(
        "{}{}{} [{}] at ({:.0}, {:.0}) {}",
        "  ".repeat(depth),
        slot,
        node.display_name(),
        id,
        node.position().x,
        node.position().y,
        values.join(" ")
    );

    let children = node
        .attached_action()
        .into_iter()
        .chain(node.attached_sensor())
        .chain(node.attached_parameters().map(|(_, child)| child));
    for child in children.collect::<Vec<_>>() {
        print_tree(graph, child, depth + 1);
    }
}

fn create(path: &Path, force: bool) -> Result<(), CliError> {
    if path.exists() && !force {
        return Err(CliError::Exists(path.to_path_buf()));
    }
    let mut graph = NodeGraph::with_default_layout(Pos2::new(400.0, 300.0));
    graph.export_to_path(path)?;
    println!("Wrote starter graph to {}", path.display());
    Ok(())
}

fn list_presets(config: &EditorConfig) -> Result<(), CliError> {
    let store = PresetStore::from_config(config)?;
    let presets = store.list()?;
    info!("Presets in {}", store.root().display());
    if presets.is_empty() {
        println!("No presets saved yet");
    }
    for name in presets {
        let marker = if name == config.active_preset { "*" } else { " " };
        println!("{} {}", marker, name);
    }
    Ok(())
}

fn check(path: &Path, config: &EditorConfig) -> Result<(), CliError> {
    let document = read_document(path)?;
    let graph = load_graph(path, config)?;
    let resaved = graph.to_document();

    let mut problems = Vec::new();
    if resaved.nodes.len() != document.nodes.len() {
        problems.push(format!("{} of {} nodes survived", resaved.nodes.len(), document.nodes.len()));
    }
    if resaved.connections.len() != document.connections.len() {
        problems.push(format!(
            "{} of {} connections survived",
            resaved.connections.len(),
            document.connections.len()
        ));
    }

    // A second cycle must be an exact fixed point
    let again = NodeGraph::from_document(&resaved).to_document();
    if again.nodes != resaved.nodes || again.connections != resaved.connections {
        problems.push("second load/save cycle changed the document".to_string());
    }

    if problems.is_empty() {
        println!("{}: OK", path.display());
        Ok(())
    } else {
        Err(CliError::Lossy(format!("{}: {}", path.display(), problems.join("; "))))
    }
}
