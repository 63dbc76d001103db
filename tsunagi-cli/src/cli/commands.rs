//! Command implementations and argument parsing for the tsunagi CLI.

use std::io::{self, Write};

use clap::{Args, Parser, Subcommand};
use rand::{SeedableRng, rngs::SmallRng};
use thiserror::Error;
use tracing::{Span, field, info, instrument};
use tsunagi_core::{
    DEFAULT_DENSITY, DegreePolicy, DensityChange, Edge, EdgeList, EdgeSink, NodePopulation,
    SparseBuilder, SparseError, SparseErrorCode,
};

/// Seed used when `--seed` is not given.
pub const DEFAULT_SEED: u64 = 0x5EED_CAFE;

/// Top-level CLI options parsed by [`clap`].
#[derive(Debug, Parser, Clone)]
#[command(name = "tsunagi", about = "Generate and reshape sparse connectivity.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// Supported CLI commands.
#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Wire two populations and optionally reshape the result.
    Wire(WireCommand),
}

/// Options accepted by the `wire` command.
#[derive(Debug, Args, Clone, PartialEq)]
pub struct WireCommand {
    /// Number of source nodes.
    #[arg(long)]
    pub sources: usize,

    /// Number of target nodes. Omit to wire the sources onto themselves.
    #[arg(long)]
    pub targets: Option<usize>,

    /// Fraction of possible edges to create, in `[0, 1]`.
    #[arg(long, default_value_t = DEFAULT_DENSITY)]
    pub density: f64,

    /// Give every source the same out-degree.
    #[arg(long)]
    pub equalize: bool,

    /// Allow a node to connect to itself in recurrent wiring.
    #[arg(long = "allow-self")]
    pub allow_self: bool,

    /// Seed for the wiring RNG.
    #[arg(long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Density to move to after building; repeat to apply several in order.
    #[arg(long = "reshape", value_name = "DENSITY")]
    pub reshape: Vec<f64>,

    /// Print every final edge as `source -> target`.
    #[arg(long)]
    pub edges: bool,
}

/// Errors surfaced while executing CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// Building the initial wiring failed.
    #[error(transparent)]
    Core(#[from] SparseError),
    /// A `--reshape` step was rejected.
    #[error("reshape step {step} to density {density} failed: {source}")]
    Reshape {
        /// One-based position of the step on the command line.
        step: usize,
        density: f64,
        #[source]
        source: SparseError,
    },
}

impl CliError {
    /// Stable code of the underlying core error.
    #[must_use]
    pub fn code(&self) -> SparseErrorCode {
        match self {
            Self::Core(source) | Self::Reshape { source, .. } => source.code(),
        }
    }
}

/// Result of one `--reshape` step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReshapeStep {
    pub density: f64,
    pub added: usize,
    pub removed: usize,
    /// Active edges once the step completed.
    pub edges_after: usize,
}

/// Summarises the outcome of a `wire` command.
#[derive(Debug, Clone, PartialEq)]
pub struct WiringSummary {
    pub sources: usize,
    pub targets: usize,
    pub recurrent: bool,
    pub policy: DegreePolicy,
    pub allow_self: bool,
    pub seed: u64,
    /// Density after every step was applied.
    pub density: f64,
    pub max_possible_connections: usize,
    pub edge_count: usize,
    pub steps: Vec<ReshapeStep>,
    /// Final edges sorted by source then target, when `--edges` was given.
    pub edges: Option<Vec<Edge>>,
}

/// Executes the CLI command represented by `cli`.
///
/// # Errors
/// Returns [`CliError`] when wiring or any reshape step is rejected.
///
/// # Examples
/// ```
/// use tsunagi_cli::cli::{Cli, Command, DEFAULT_SEED, WireCommand, run_cli};
///
/// let cli = Cli {
///     command: Command::Wire(WireCommand {
///         sources: 4,
///         targets: None,
///         density: 0.5,
///         equalize: true,
///         allow_self: false,
///         seed: DEFAULT_SEED,
///         reshape: vec![1.0],
///         edges: false,
///     }),
/// };
/// let summary = run_cli(cli)?;
/// assert_eq!(summary.edge_count, 12);
/// assert_eq!(summary.steps[0].added, 8);
/// # Ok::<(), tsunagi_cli::cli::CliError>(())
/// ```
#[instrument(name = "cli.run", err, skip(cli), fields(command = field::Empty))]
pub fn run_cli(cli: Cli) -> Result<WiringSummary, CliError> {
    match cli.command {
        Command::Wire(wire) => {
            Span::current().record("command", field::display("wire"));
            run_wire(wire)
        }
    }
}

#[instrument(
    name = "cli.wire",
    err,
    skip(command),
    fields(
        sources = command.sources,
        targets = field::Empty,
        recurrent = command.targets.is_none(),
        seed = command.seed,
        steps = command.reshape.len(),
    ),
)]
pub(super) fn run_wire(command: WireCommand) -> Result<WiringSummary, CliError> {
    let sources: NodePopulation<usize> = (0..command.sources).collect();
    let targets = match command.targets {
        Some(count) => (0..count).collect(),
        None => sources.clone(),
    };
    Span::current().record("targets", targets.len());

    let mut rng = SmallRng::seed_from_u64(command.seed);
    let mut sink = EdgeList::new();
    let mut wiring = SparseBuilder::new()
        .with_density(command.density)
        .with_equalized_degrees(command.equalize)
        .with_self_connections(command.allow_self)
        .build(&sources, &targets, &mut sink, &mut rng)?;

    let mut steps = Vec::with_capacity(command.reshape.len());
    for (index, &density) in command.reshape.iter().enumerate() {
        let change = wiring
            .set_density(density, &mut sink, &mut rng)
            .map_err(|source| CliError::Reshape {
                step: index + 1,
                density,
                source,
            })?;
        let (added, removed) = match &change {
            DensityChange::Added(edges) => (edges.len(), 0),
            DensityChange::Removed(edges) => (0, edges.len()),
            DensityChange::Unchanged => (0, 0),
        };
        steps.push(ReshapeStep {
            density,
            added,
            removed,
            edges_after: sink.len(),
        });
    }

    info!(
        edges = sink.len(),
        density = wiring.density(),
        "wiring completed"
    );
    Ok(WiringSummary {
        sources: sources.len(),
        targets: targets.len(),
        recurrent: wiring.is_recurrent(),
        policy: wiring.policy(),
        allow_self: wiring.allows_self_connections(),
        seed: command.seed,
        density: wiring.density(),
        max_possible_connections: wiring.max_possible_connections(),
        edge_count: wiring.edge_count(),
        steps,
        edges: command.edges.then(|| sink.sorted()),
    })
}

/// Renders `summary` to `writer` in a human-readable text format.
///
/// # Errors
/// Returns [`io::Error`] if writing to the supplied writer fails.
///
/// # Examples
/// ```
/// use tsunagi_cli::cli::{WiringSummary, render_summary};
/// use tsunagi_core::{DegreePolicy, Edge};
///
/// let summary = WiringSummary {
///     sources: 2,
///     targets: 2,
///     recurrent: true,
///     policy: DegreePolicy::Equalized,
///     allow_self: false,
///     seed: 7,
///     density: 1.0,
///     max_possible_connections: 2,
///     edge_count: 2,
///     steps: Vec::new(),
///     edges: Some(vec![Edge::new(0, 1), Edge::new(1, 0)]),
/// };
/// let mut buffer = Vec::new();
/// render_summary(&summary, &mut buffer)?;
/// let text = String::from_utf8(buffer).expect("output is UTF-8");
/// assert!(text.contains("edges: 2 of 2\n"));
/// assert!(text.ends_with("0 -> 1\n1 -> 0\n"));
/// # Ok::<(), std::io::Error>(())
/// ```
pub fn render_summary(summary: &WiringSummary, mut writer: impl Write) -> io::Result<()> {
    let shape = if summary.recurrent {
        "recurrent"
    } else {
        "feed-forward"
    };
    writeln!(
        writer,
        "populations: {} -> {} ({shape})",
        summary.sources, summary.targets
    )?;
    writeln!(writer, "policy: {}", summary.policy)?;
    writeln!(writer, "self connections: {}", summary.allow_self)?;
    writeln!(writer, "seed: {:#x}", summary.seed)?;
    for (index, step) in summary.steps.iter().enumerate() {
        writeln!(
            writer,
            "reshape {}: density {} (+{} -{}) -> {} edges",
            index + 1,
            step.density,
            step.added,
            step.removed,
            step.edges_after
        )?;
    }
    writeln!(writer, "density: {}", summary.density)?;
    writeln!(
        writer,
        "edges: {} of {}",
        summary.edge_count, summary.max_possible_connections
    )?;
    for edge in summary.edges.iter().flatten() {
        writeln!(writer, "{edge}")?;
    }
    Ok(())
}
