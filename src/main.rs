use clap::{Parser, Subcommand};
use md_site_index::{config, generate, output};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "md-site-index")]
#[command(about = "Navigation tree and search index generator for markdown sites")]
#[command(long_about = "\
Navigation tree and search index generator for markdown sites

Reads a markdown content tree and a hand-written menu, and writes two JSON
files for a site frontend: a navigation tree and a flat search index.

Content structure:

  content/
  ├── _menu.yaml                   # Menu (or _menu.yml)
  ├── index.md                     # Home page → /
  ├── about.md                     # → /about
  ├── guide.md                     # Page behind the `guide:` submenu → /guide
  ├── guide/
  │   ├── install.md               # → /guide/install
  │   └── roadmap.draft.md         # Linkable from the menu, never indexed
  └── reference/
      └── api.md

Page metadata:
  Title:       first `# Heading` line
  Description: `description:` in the frontmatter block
  Keywords:    `keywords: [a, b]` in the frontmatter block

Run 'md-site-index gen-config' to generate a documented content.config.toml.")]
#[command(version)]
struct Cli {
    /// Project directory holding content.config.toml
    #[arg(long, default_value = ".", global = true)]
    project: PathBuf,

    /// Content domain (a subdirectory of the content root)
    #[arg(long, env = "CONTENT", global = true)]
    domain: Option<String>,

    /// Content directory (overrides the configured content root and domain)
    #[arg(long, env = "CONTENT_DIR", global = true)]
    source: Option<PathBuf>,

    /// Output directory (overrides the configured output_dir)
    #[arg(long, global = true)]
    output: Option<PathBuf>,

    /// Enable info-level logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Write both the navigation tree and the search index
    Build,
    /// Write the navigation tree only
    Navigation,
    /// Write the search index only
    SearchIndex,
    /// Build both in memory and print them without writing
    Check,
    /// Print a stock content.config.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match &cli.command {
        Command::Build => {
            let paths = resolve_paths(&cli)?;
            println!("==> Indexing {}", paths.content_dir.display());
            let report = generate::generate(&paths)?;
            output::print_generate_report(&report);
        }
        Command::Navigation => {
            let paths = resolve_paths(&cli)?;
            let report = generate::generate_navigation(&paths)?;
            println!("{}", output::format_navigation_report(&report));
        }
        Command::SearchIndex => {
            let paths = resolve_paths(&cli)?;
            let report = generate::generate_search_index(&paths)?;
            println!("{}", output::format_search_index_report(&report));
        }
        Command::Check => {
            let paths = resolve_paths(&cli)?;
            println!("==> Checking {}", paths.content_dir.display());
            let collected = generate::collect(&paths);
            output::print_check_output(&collected);
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Load the project config, size the rayon pool, and apply CLI path overrides.
fn resolve_paths(cli: &Cli) -> Result<config::BuildPaths, config::ConfigError> {
    let site_config = config::load_config(&cli.project, cli.domain.as_deref())?;
    init_thread_pool(&site_config.processing);

    let mut paths = site_config.build_paths(&cli.project);
    if let Some(source) = &cli.source {
        paths.content_dir = source.clone();
    }
    if let Some(out) = &cli.output {
        paths.output_dir = out.clone();
    }
    Ok(paths)
}

/// Install the log subscriber: `--verbose` forces info, otherwise `RUST_LOG`
/// decides and falls back to warnings only.
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Initialize the rayon thread pool based on processing config.
///
/// Capped at the number of available CPU cores.
fn init_thread_pool(processing: &config::ProcessingConfig) {
    let threads = config::effective_threads(processing);
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build_global()
        .ok();
}
