use clap::{Parser, Subcommand, ValueEnum};
use log::info;
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::dataset::Dataset;
use crate::output::write_output;
use crate::render::{
    HtmlBackend, JsonBackend, RenderBackend, RenderOptions, TextBackend, ViewHandle,
};
use crate::serve::{serve, TreePage};
use crate::tree::PhyloTree;

/// straintree - phylogenetic tree views of strain genetic distances
#[derive(Parser)]
#[command(name = "straintree")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the tree and write it as HTML, text or JSON
    Build {
        /// Directory of strain summaries, or a .json dataset
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = Format::Html)]
        format: Format,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Configuration file (default: straintree.toml in this or a parent directory)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Compact JSON output
        #[arg(long)]
        compact: bool,
    },

    /// Build the tree and serve it in the browser
    Serve {
        /// Directory of strain summaries, or a .json dataset
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Port for the web server
        #[arg(short, long, default_value = "8000")]
        port: u16,

        /// Open the page in the default browser
        #[arg(long)]
        open: bool,

        /// Configuration file (default: straintree.toml in this or a parent directory)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Html,
    Text,
    Json,
}

impl Cli {
    pub fn run(self) -> Result<(), Box<dyn std::error::Error>> {
        match self.command {
            Commands::Build {
                input,
                format,
                output,
                config,
                compact,
            } => build(&input, format, output.as_deref(), config.as_deref(), compact),
            Commands::Serve {
                input,
                port,
                open,
                config,
            } => serve_tree(&input, port, open, config.as_deref()),
        }
    }
}

fn load_config(path: Option<&Path>) -> Result<Config, Box<dyn std::error::Error>> {
    let config = match path {
        Some(path) => Config::load(path)?,
        None => Config::discover()?,
    };
    Ok(config)
}

fn build_tree(input: &Path, config: &Config) -> Result<PhyloTree, Box<dyn std::error::Error>> {
    let dataset = Dataset::load(input)?;
    let tree = dataset.build_tree(config.tree);

    match tree.root() {
        Some(root) => info!(
            "Built tree rooted at {} with {} strains over {} levels",
            root.label,
            tree.nodes.len(),
            tree.depth() + 1
        ),
        None => info!("No complete or incomplete strains found; the tree is empty"),
    }

    Ok(tree)
}

/// Render with `backend`, fitting the view once before handing it out
fn render_with<B: RenderBackend>(
    backend: &B,
    tree: &PhyloTree,
    options: &RenderOptions,
) -> Result<String, Box<dyn std::error::Error>> {
    let mut view = backend.render(tree, options)?;
    view.fit(false);
    Ok(view.into_string())
}

/// Render `tree` in the requested format
pub fn render(
    tree: &PhyloTree,
    format: Format,
    options: &RenderOptions,
    compact: bool,
) -> Result<String, Box<dyn std::error::Error>> {
    match format {
        Format::Html => render_with(&HtmlBackend, tree, options),
        Format::Text => render_with(&TextBackend, tree, options),
        Format::Json => render_with(&JsonBackend { pretty: !compact }, tree, options),
    }
}

fn build(
    input: &Path,
    format: Format,
    output: Option<&Path>,
    config_path: Option<&Path>,
    compact: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config(config_path)?;
    let tree = build_tree(input, &config)?;

    let content = render(&tree, format, &RenderOptions::from(&config), compact)?;
    write_output(&content, output)?;

    if let Some(path) = output {
        info!("Wrote {:?}", path);
    }
    Ok(())
}

fn serve_tree(
    input: &Path,
    port: u16,
    open: bool,
    config_path: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config(config_path)?;
    let tree = build_tree(input, &config)?;
    let options = RenderOptions::from(&config);

    let page = TreePage {
        html: render(&tree, Format::Html, &options, false)?,
        json: render(&tree, Format::Json, &options, true)?,
    };
    serve(&page, port, open)?;
    Ok(())
}
