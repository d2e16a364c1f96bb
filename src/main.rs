//! Streamroute CLI - Audio Transformer Pipeline Planning
//!
//! Inspects the standard transformation graph and plans pipelines from the
//! command line.

use anyhow::{bail, Context};
use rayon::prelude::*;
use std::path::PathBuf;
use streamroute::prelude::*;

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage(&args[0]);
        return;
    }

    let result = match args[1].as_str() {
        "list" => list_graph(),
        "plan" => plan(&args[2..]),
        "matrix" => matrix(&args[2..]),
        "dot" => dot(),
        "help" | "--help" | "-h" => {
            print_usage(&args[0]);
            Ok(())
        }
        _ => {
            eprintln!("Unknown command: {}", args[1]);
            print_usage(&args[0]);
            std::process::exit(2);
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn print_usage(program: &str) {
    println!("Streamroute v{}", streamroute::VERSION);
    println!();
    println!("Usage: {} <command> [options]", program);
    println!();
    println!("Commands:");
    println!("  list                 List stream types and transformers");
    println!("  plan <from> [opts]   Plan a pipeline from a stream type");
    println!("  matrix [opts]        Plan every stream type at once");
    println!("  dot                  Print the graph in Graphviz format");
    println!("  help                 Show this help message");
    println!();
    println!("Plan options:");
    println!("  --volume             Pipeline must apply the volume transformer");
    println!("  --exclude-volume     Pipeline must not apply the volume transformer");
    println!("  --json               Print the pipeline as JSON");
    println!("  --config <path>      Read goal and max_depth from a TOML file");
}

/// Options shared by `plan` and `matrix`.
#[derive(Debug)]
struct PlanArgs {
    from: Option<StreamType>,
    volume: Option<bool>,
    json: bool,
    config: Option<PathBuf>,
}

fn parse_plan_args(args: &[String]) -> anyhow::Result<PlanArgs> {
    let mut parsed = PlanArgs {
        from: None,
        volume: None,
        json: false,
        config: None,
    };

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--volume" => parsed.volume = Some(true),
            "--exclude-volume" => parsed.volume = Some(false),
            "--json" => parsed.json = true,
            "--config" => {
                let Some(path) = args.get(i + 1) else {
                    bail!("--config requires a path");
                };
                parsed.config = Some(PathBuf::from(path));
                i += 1;
            }
            other if other.starts_with("--") => bail!("Unknown option: {}", other),
            other => {
                if parsed.from.is_some() {
                    bail!("Unexpected argument: {}", other);
                }
                parsed.from = Some(other.parse()?);
            }
        }
        i += 1;
    }

    Ok(parsed)
}

/// `matrix` plans every stream type, so a positional source is a mistake.
fn parse_matrix_args(args: &[String]) -> anyhow::Result<PlanArgs> {
    let parsed = parse_plan_args(args)?;
    if let Some(from) = parsed.from {
        bail!("matrix plans every stream type; unexpected argument: {}", from);
    }
    Ok(parsed)
}

fn build_planner(config: Option<&PathBuf>) -> anyhow::Result<Planner> {
    let config = match config {
        Some(path) => PlannerConfig::load(path)
            .with_context(|| format!("reading {}", path.display()))?,
        None => PlannerConfig::default(),
    }
    .with_env_overrides()?;

    Ok(Planner::standard()?.with_options(config.search_options()))
}

fn constraint_for(volume: Option<bool>) -> SharedConstraint {
    match volume {
        Some(true) => constraint::shared(constraint::requires(TransformerKind::InlineVolume)),
        Some(false) => constraint::shared(constraint::excludes(TransformerKind::InlineVolume)),
        None => constraint::shared(constraint::always()),
    }
}

fn list_graph() -> anyhow::Result<()> {
    let graph = TransformerGraph::standard()?;
    let analyzer = TopologyAnalyzer::new(&graph);
    let unplayable = analyzer.unreachable_from(StreamType::PLAYBACK)?;

    println!("Stream types ({}):", graph.node_count());
    for node in graph.nodes() {
        let note = if node.stream_type.is_playback_ready() {
            " (playback-ready)"
        } else if unplayable.contains(&node.stream_type) {
            " (cannot be played)"
        } else {
            ""
        };
        println!("  • {}{}", node.stream_type, note);
    }
    println!();

    println!("Transformers ({}):", graph.edge_count());
    for edge in graph.edges() {
        println!(
            "  • {:<20} {} -> {}  cost {}",
            edge.kind.display_name(),
            edge.from,
            edge.to,
            edge.cost
        );
    }
    Ok(())
}

fn plan(args: &[String]) -> anyhow::Result<()> {
    let args = parse_plan_args(args)?;
    let Some(from) = args.from else {
        bail!("Please specify a stream type to plan from");
    };

    let planner = build_planner(args.config.as_ref())?;
    let constraint = constraint_for(args.volume);

    match planner.find_pipeline(from, &*constraint) {
        Ok(pipeline) => {
            if args.json {
                println!("{}", serde_json::to_string_pretty(&pipeline.summary())?);
            } else if pipeline.is_empty() {
                println!(
                    "{} is already {}; no transformation needed",
                    from,
                    pipeline.output_type()
                );
            } else {
                println!("{}", pipeline);
                println!("cost {}", pipeline.cost());
            }
            Ok(())
        }
        Err(e) => {
            if let Some(fix) = e.suggested_fix() {
                eprintln!("→ Suggestion: {}", fix);
            }
            Err(e.into())
        }
    }
}

fn matrix(args: &[String]) -> anyhow::Result<()> {
    let args = parse_matrix_args(args)?;
    let planner = build_planner(args.config.as_ref())?;
    let constraint = constraint_for(args.volume);

    let rows: Vec<_> = StreamType::ALL
        .par_iter()
        .map(|&from| (from, planner.find_pipeline(from, &*constraint)))
        .collect();

    if args.json {
        let json: Vec<_> = rows
            .iter()
            .map(|(from, result)| match result {
                Ok(pipeline) => serde_json::json!({ "from": from, "pipeline": pipeline.summary() }),
                Err(e) => serde_json::json!({ "from": from, "error": e.to_string() }),
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&json)?);
        return Ok(());
    }

    for (from, result) in rows {
        match result {
            Ok(pipeline) => {
                println!("  {:<10} {}  (cost {})", from.name(), pipeline, pipeline.cost())
            }
            Err(e) => println!("  {:<10} ✗ {}", from.name(), e),
        }
    }
    Ok(())
}

fn dot() -> anyhow::Result<()> {
    let graph = TransformerGraph::standard()?;
    println!("{}", TopologyAnalyzer::new(&graph).to_dot());
    Ok(())
}
