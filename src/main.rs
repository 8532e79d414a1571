mod analysis;
mod config;
mod error;
mod graph;
mod input;
mod layout;
mod render;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};

use config::{DEFAULT_INPUT, DEFAULT_OUTPUT, RenderConfig, RenderOverrides};
use graph::social_graph::SocialGraph;
use render::ImageFormat;

#[derive(Parser)]
#[command(name = "campus-graph")]
#[command(about = "Draw and inspect weighted student/teacher graphs stored as JSON")]
struct Cli {
    /// More log output (-v info, -vv debug). RUST_LOG overrides this.
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// TOML file with render settings and teacher label prefixes
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct InputArg {
    /// Graph file to read
    #[arg(default_value = DEFAULT_INPUT)]
    input: PathBuf,
}

#[derive(Subcommand)]
enum Commands {
    /// Lay out the graph and save it as an image
    Render {
        #[command(flatten)]
        input: InputArg,

        /// Image file to write
        #[arg(short, long, default_value = DEFAULT_OUTPUT)]
        output: PathBuf,

        /// Image format (guessed from the output extension when omitted)
        #[arg(short, long, value_enum)]
        format: Option<ImageFormat>,

        #[command(flatten)]
        overrides: RenderOverrides,
    },

    /// Show node, edge, teacher and student counts
    Summary {
        #[command(flatten)]
        input: InputArg,
    },

    /// List every node with its connections and their strength
    Connections {
        #[command(flatten)]
        input: InputArg,
    },

    /// Shortest weighted distances from one node to all others
    Paths {
        #[command(flatten)]
        input: InputArg,

        /// Id of the starting node
        #[arg(long)]
        from: String,
    },

    /// Minimum spanning tree by connection strength
    Mst {
        #[command(flatten)]
        input: InputArg,
    },

    /// Find nodes by label (case-insensitive)
    Search {
        /// Label to look for
        name: String,

        #[command(flatten)]
        input: InputArg,
    },
}

fn init_logger(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

fn load(arg: &InputArg) -> Result<SocialGraph> {
    input::load_graph(&arg.input)
        .with_context(|| format!("Failed to load graph from {}", arg.input.display()))
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logger(cli.verbose);

    let mut settings = match &cli.config {
        Some(path) => RenderConfig::from_toml_file(path)
            .with_context(|| format!("Failed to read settings from {}", path.display()))?,
        None => RenderConfig::default(),
    };

    match cli.command {
        Commands::Render {
            input,
            output,
            format,
            overrides,
        } => {
            settings.apply_overrides(&overrides)?;

            let graph = load(&input)?;
            let positions = layout::spring_layout(&graph, &settings.layout);
            let scene = render::draw_graph(&graph, &positions, &settings)?;
            let format = format.unwrap_or_else(|| ImageFormat::from_path(&output));
            render::write_image(&scene, &output, format)
                .with_context(|| format!("Failed to write {}", output.display()))?;
            println!(
                "Drew {} nodes and {} edges to {}",
                scene.nodes_drawn(),
                scene.edges_drawn,
                output.display()
            );
        }
        Commands::Summary { input } => {
            let graph = load(&input)?;
            println!("{}", analysis::Summary::of(&graph, &settings.teacher_prefixes));
        }
        Commands::Connections { input } => {
            let graph = load(&input)?;
            for connection in analysis::connections(&graph, &settings.teacher_prefixes) {
                println!("{connection}\n");
            }
        }
        Commands::Paths { input, from } => {
            let graph = load(&input)?;
            let from = graph.resolve(&from)?.clone();
            let distances = analysis::shortest_paths(&graph, &from)?;
            let start = graph.require(&from)?;
            println!("Shortest path distances from {}:", graph.node(start).label);
            for (index, distance) in distances {
                match distance {
                    Some(d) => println!("To {}:\t{} units", graph.node(index).label, d),
                    None => println!("To {}:\tunreachable", graph.node(index).label),
                }
            }
        }
        Commands::Mst { input } => {
            let graph = load(&input)?;
            let tree = analysis::minimum_spanning_tree(&graph);
            for (a, b, weight) in &tree.edges {
                println!("{} -- {} == {}", graph.node(*a).label, graph.node(*b).label, weight);
            }
            println!("Total weight: {}", tree.total_weight);
            if tree.components > 1 {
                println!("Graph has {} separate components", tree.components);
            }
        }
        Commands::Search { input, name } => {
            let graph = load(&input)?;
            let found = analysis::search(&graph, &name, &settings.teacher_prefixes);
            if found.is_empty() {
                anyhow::bail!("No node labelled {name:?}");
            }
            for connection in found {
                println!("{connection}\n");
            }
        }
    }

    Ok(())
}
