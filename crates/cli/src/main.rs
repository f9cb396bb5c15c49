use std::io;
use std::path::PathBuf;
use std::process;

use anyhow::Context;
use clap::{Args, Parser, Subcommand, ValueEnum};
use road_graph_core::{Session, SqliteStore, Traversal};
use tracing_subscriber::EnvFilter;

mod commands;

/// RoadGraph - road connections between municipalities
#[derive(Parser)]
#[command(name = "roadgraph")]
#[command(version)] // Auto-pull version from Cargo.toml
#[command(about = "Store road connections and walk them breadth- or depth-first")]
struct Cli {
    /// SQLite database holding the connections
    #[arg(long, env = "ROAD_GRAPH_DB", default_value = "road-graph.db")]
    db: PathBuf,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Enable debug logging (overrides RUST_LOG)
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a connection between two municipalities
    Connect {
        origin: String,
        destination: String,
        /// Distance in km (non-negative integer)
        #[arg(value_parser = parse_distance_arg)]
        distance: u32,
    },
    /// Load connections from a CSV file (header row, then origin,destination,distance)
    Import { file: PathBuf },
    /// Print every municipality with its neighbors
    Show,
    /// Breadth-first visit order
    Bfs(TraverseArgs),
    /// Depth-first visit order
    Dfs(TraverseArgs),
    /// Print the network as Graphviz DOT
    Dot {
        /// Highlight the traversal starting here
        #[arg(long)]
        from: Option<String>,
        /// Traversal to highlight: bfs or dfs
        #[arg(long, default_value = "bfs")]
        order: Traversal,
    },
}

#[derive(Args)]
struct TraverseArgs {
    /// Starting municipality
    start: String,
    /// Also write a DOT rendering with the path highlighted
    #[arg(long, value_name = "FILE")]
    dot: Option<PathBuf>,
}

fn parse_distance_arg(s: &str) -> Result<u32, String> {
    road_graph_core::import::parse_distance(s)
        .ok_or_else(|| format!("'{}' is not a non-negative whole number", s))
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let store = SqliteStore::open(&cli.db)
        .with_context(|| format!("failed to open database {}", cli.db.display()))?;
    let mut session = Session::open(store).context("failed to load stored connections")?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let format = cli.format;

    match cli.command {
        Commands::Connect {
            origin,
            destination,
            distance,
        } => commands::connect(&mut session, &origin, &destination, distance, format, &mut out),
        Commands::Import { file } => commands::import(&mut session, &file, format, &mut out),
        Commands::Show => commands::show(&session, format, &mut out),
        Commands::Bfs(args) => commands::traverse(
            &session,
            Traversal::BreadthFirst,
            &args.start,
            args.dot.as_deref(),
            format,
            &mut out,
        ),
        Commands::Dfs(args) => commands::traverse(
            &session,
            Traversal::DepthFirst,
            &args.start,
            args.dot.as_deref(),
            format,
            &mut out,
        ),
        Commands::Dot { from, order } => {
            commands::dot(&session, from.as_deref().map(|start| (order, start)), &mut out)
        }
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(err) = run(cli) {
        eprintln!("Error: {:#}", err);
        process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_traversal_with_dot() {
        let cli = Cli::try_parse_from([
            "roadgraph", "--db", "x.db", "dfs", "Mixco", "--dot", "out.dot",
        ])
        .unwrap();

        assert_eq!(cli.db, PathBuf::from("x.db"));
        match cli.command {
            Commands::Dfs(args) => {
                assert_eq!(args.start, "Mixco");
                assert_eq!(args.dot, Some(PathBuf::from("out.dot")));
            }
            _ => panic!("Expected Dfs command"),
        }
    }

    #[test]
    fn test_cli_rejects_non_digit_distance() {
        assert!(Cli::try_parse_from(["roadgraph", "connect", "A", "B", "-5"]).is_err());
        assert!(Cli::try_parse_from(["roadgraph", "connect", "A", "B", "five"]).is_err());
        assert!(Cli::try_parse_from(["roadgraph", "connect", "A", "B", "5"]).is_ok());
    }

    #[test]
    fn test_cli_dot_order() {
        let cli = Cli::try_parse_from([
            "roadgraph", "--format", "json", "dot", "--from", "X", "--order", "dfs",
        ])
        .unwrap();

        assert_eq!(cli.format, OutputFormat::Json);
        match cli.command {
            Commands::Dot { from, order } => {
                assert_eq!(from.as_deref(), Some("X"));
                assert_eq!(order, Traversal::DepthFirst);
            }
            _ => panic!("Expected Dot command"),
        }
    }

    #[test]
    fn test_cli_parses_connect() {
        let cli =
            Cli::try_parse_from(["roadgraph", "connect", "Mixco", "Villa Nueva", "21"]).unwrap();

        match cli.command {
            Commands::Connect {
                origin,
                destination,
                distance,
            } => {
                assert_eq!(origin, "Mixco");
                assert_eq!(destination, "Villa Nueva");
                assert_eq!(distance, 21);
            }
            _ => panic!("Expected Connect command"),
        }
    }

    #[test]
    fn test_cli_parses_import() {
        let cli = Cli::try_parse_from(["roadgraph", "import", "roads.csv"]).unwrap();

        match cli.command {
            Commands::Import { file } => assert_eq!(file, PathBuf::from("roads.csv")),
            _ => panic!("Expected Import command"),
        }
    }

    #[test]
    fn test_cli_parses_show_with_defaults() {
        let cli = Cli::try_parse_from(["roadgraph", "--db", "x.db", "show"]).unwrap();

        assert!(matches!(cli.command, Commands::Show));
        assert_eq!(cli.format, OutputFormat::Text);
        assert!(!cli.verbose);
    }
}
