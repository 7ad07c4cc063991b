use clap::{Parser, Subcommand, ValueEnum};
use fm_blockly::{MachineModel, ModelMapping, TranslationResult, translate_file};
use fm_core::NodeId;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;
use uom::si::volume_rate::milliliter_per_second;

#[derive(Parser)]
#[command(name = "fm-cli")]
#[command(about = "Fluidic machine translator - block documents to machine graphs", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Translate a machine document and report whether it is valid
    Validate {
        /// Path to the machine document (.json, .yaml)
        document_path: PathBuf,
    },
    /// Translate a machine document and print the resulting graph
    Translate {
        /// Path to the machine document (.json, .yaml)
        document_path: PathBuf,
        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn main() -> TranslationResult<()> {
    // Logs go to stderr so JSON output stays clean
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Validate { document_path } => cmd_validate(&document_path),
        Commands::Translate {
            document_path,
            format,
        } => cmd_translate(&document_path, format),
    }
}

fn cmd_validate(document_path: &Path) -> TranslationResult<()> {
    println!("Validating machine: {}", document_path.display());
    let (model, mapping) = translate_file(document_path)?;
    println!("✓ Machine is valid");
    println!(
        "  {} nodes ({} containers, {} pumps, {} valves), {} edges, {} twin groups",
        model.graph().node_count(),
        mapping.containers().len(),
        mapping.pumps().len(),
        mapping.valves().len(),
        model.graph().edges().len(),
        mapping.twins().len()
    );
    Ok(())
}

fn cmd_translate(document_path: &Path, format: OutputFormat) -> TranslationResult<()> {
    let (model, mapping) = translate_file(document_path)?;
    match format {
        OutputFormat::Text => print_text(&model, &mapping),
        OutputFormat::Json => {
            let report = Report::new(&model, &mapping);
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }
    Ok(())
}

fn name(mapping: &ModelMapping, id: NodeId) -> &str {
    mapping.reference_of(id).unwrap_or("?")
}

fn print_text(model: &MachineModel, mapping: &ModelMapping) {
    println!(
        "Default rate: {} ml/s (precision {}.{})",
        model.default_rate().get::<milliliter_per_second>(),
        model.integer_precision(),
        model.decimal_precision()
    );

    println!("\nNodes:");
    for node in model.graph().nodes() {
        println!(
            "  [{}] {} - {} ({} ports)",
            node.id(),
            name(mapping, node.id()),
            node.label(),
            node.port_count()
        );
        let functions = mapping.functions_of(node.id());
        if !functions.is_empty() {
            let tags: Vec<_> = functions.iter().map(|k| k.tag()).collect();
            println!("      functions: {}", tags.join(", "));
        }
        if let Some(group) = model.graph().twins_of(node.id()) {
            let others: Vec<_> = group
                .iter()
                .filter(|&&id| id != node.id())
                .map(|&id| name(mapping, id))
                .collect();
            println!("      twinned with: {}", others.join(", "));
        }
    }

    println!("\nEdges:");
    for edge in model.graph().edges() {
        println!(
            "  {}:{} -> {}:{}",
            name(mapping, edge.source),
            edge.source_port + 1,
            name(mapping, edge.target),
            edge.target_port + 1
        );
    }
}

#[derive(Serialize)]
struct NodeReport<'a> {
    id: NodeId,
    reference: &'a str,
    kind: &'static str,
    ports: usize,
}

#[derive(Serialize)]
struct EdgeReport {
    source: NodeId,
    source_port: usize,
    target: NodeId,
    target_port: usize,
}

#[derive(Serialize)]
struct Report<'a> {
    default_rate_ml_per_s: f64,
    integer_precision: u32,
    decimal_precision: u32,
    nodes: Vec<NodeReport<'a>>,
    edges: Vec<EdgeReport>,
    mapping: &'a ModelMapping,
}

impl<'a> Report<'a> {
    fn new(model: &'a MachineModel, mapping: &'a ModelMapping) -> Self {
        let nodes = model
            .graph()
            .nodes()
            .map(|node| NodeReport {
                id: node.id(),
                reference: name(mapping, node.id()),
                kind: node.label(),
                ports: node.port_count(),
            })
            .collect();
        let edges = model
            .graph()
            .edges()
            .iter()
            .map(|e| EdgeReport {
                source: e.source,
                source_port: e.source_port,
                target: e.target,
                target_port: e.target_port,
            })
            .collect();
        Self {
            default_rate_ml_per_s: model.default_rate().get::<milliliter_per_second>(),
            integer_precision: model.integer_precision(),
            decimal_precision: model.decimal_precision(),
            nodes,
            edges,
            mapping,
        }
    }
}
