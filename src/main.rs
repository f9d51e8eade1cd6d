use clap::{Parser, Subcommand};
use sitemap_nav::loader::{ListingLoader, ListingSource, LoadOutcome};
use sitemap_nav::page::{HostPage, PageError};
use sitemap_nav::render::Container;
use sitemap_nav::{config, output, scan};
use std::path::PathBuf;
use tracing::error;
use tracing_subscriber::EnvFilter;

/// Shared flag for commands that read the listing.
#[derive(clap::Args, Clone)]
struct SourceArgs {
    /// Listing location (URL or path); overrides `listing_source`
    #[arg(long)]
    source: Option<String>,
}

#[derive(Parser)]
#[command(name = "sitemap-nav")]
#[command(about = "Render a grouped site navigation index from a directory listing")]
#[command(long_about = "\
Render a grouped site navigation index from a directory listing

The listing is a JSON array of {Name, FullName, PSIsContainer} objects, as
produced by `Get-ChildItem -Recurse | ConvertTo-Json` or `sitemap-nav scan`.
Directories and excluded file types are hidden; the rest become links
relative to the folder named by `root_marker`, grouped by top-level folder:

  📂 blog
      2023/a.htm      → /blog/2023/a.htm
      b.htm           → /blog/b.htm
  📂 Root
      index.htm       → /index.htm

Run 'sitemap-nav gen-config' to generate a documented sitemap.toml.")]
#[command(version)]
struct Cli {
    /// Directory holding sitemap.toml
    #[arg(long, default_value = ".", global = true)]
    config_dir: PathBuf,

    /// Log progress (otherwise RUST_LOG, default warn)
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Load the listing and write the index into a page (or stdout)
    Build {
        #[command(flatten)]
        source: SourceArgs,
        /// Host HTML page containing the render target element
        #[arg(long)]
        page: Option<PathBuf>,
        /// Where to write the page (defaults to overwriting --page)
        #[arg(long, requires = "page")]
        output: Option<PathBuf>,
    },
    /// Load the listing and print the grouped index
    Check(SourceArgs),
    /// Write a listing document for a local site directory
    Scan {
        /// Site root directory
        root: PathBuf,
        /// Output file (stdout if omitted)
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Print a stock sitemap.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Command::Build {
            source,
            page,
            output,
        } => {
            let config = config::load_config(&cli.config_dir)?;
            let target_id = config.render_target.clone();

            // Resolve the target before any request goes out.
            let host = match &page {
                Some(path) => {
                    let host = HostPage::read(path)?;
                    if !host.has_container(&target_id) {
                        error!(
                            page = %path.display(),
                            "Sitemap Error: Output element with ID \"{target_id}\" not found."
                        );
                        return Err(PageError::MissingRenderTarget(target_id).into());
                    }
                    Some(host)
                }
                None => None,
            };
            let mut target = match &host {
                Some(host) => host.container(&target_id)?,
                None => Container::new(&target_id),
            };

            let mut loader = loader_for(config, &source);
            let outcome = run(loader.load(&mut target))?;

            match (host, page) {
                (Some(mut host), Some(page)) => {
                    host.fill(&target)?;
                    let dest = output.unwrap_or(page);
                    host.write(&dest)?;
                    println!("Wrote {} → #{}", dest.display(), target_id);
                }
                _ => println!("{}", target.inner_html()),
            }

            if let LoadOutcome::Failed(err) = outcome {
                return Err(err.into());
            }
        }
        Command::Check(source) => {
            let config = config::load_config(&cli.config_dir)?;
            let mut loader = loader_for(config, &source);
            println!("==> Checking {}", loader.source());
            let mut target = Container::new("check");
            match run(loader.load(&mut target))? {
                LoadOutcome::Rendered(groups) => output::print_index(&groups),
                LoadOutcome::Failed(err) => return Err(err.into()),
                LoadOutcome::Skipped => {}
            }
        }
        Command::Scan { root, output } => {
            let entries = scan::scan_listing(&root)?;
            let json = scan::listing_json(&entries)?;
            match output {
                Some(path) => {
                    std::fs::write(&path, json)?;
                    output::print_scan(&entries, &path.display().to_string());
                }
                None => println!("{}", json),
            }
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// `--verbose` forces info; otherwise honor RUST_LOG, defaulting to warn.
/// Logs go to stderr so stdout stays clean for markup and JSON.
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

fn loader_for(config: config::NavConfig, source: &SourceArgs) -> ListingLoader {
    match &source.source {
        Some(location) => ListingLoader::with_source(config, ListingSource::parse(location)),
        None => ListingLoader::new(config),
    }
}

/// Drive one future to completion on a single-threaded runtime.
fn run<F: std::future::Future>(future: F) -> std::io::Result<F::Output> {
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    Ok(rt.block_on(future))
}
