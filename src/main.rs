use clap::{Parser, Subcommand};
use publist::config::{self, Config};
use publist::filter::VenueClassifier;
use publist::loader::{self, FileFetcher};
use publist::page::{self, RenderOptions};
use publist::store::{self, PreferenceStore};
use publist::view::ViewMode;
use publist::{logging, output};
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Parser)]
#[command(name = "publist")]
#[command(about = "Sortable, filterable publication lists")]
#[command(long_about = "\
Sortable, filterable publication lists

Reads a JSON dataset of publications, applies a sort order and filters, and
renders publication cards as HTML.

Site structure:

  site/
  ├── publist.toml                 # Optional config (see 'publist gen-config')
  ├── .publist-state.json          # Saved list/grid preference
  └── data/
      └── publications.json        # Array of records, or {\"publications\": [...]}

Sort keys:    year-desc (default), year-asc, title-asc, venue-asc
Type filters: all, award, conference, journal, workshop")]
#[command(version)]
struct Cli {
    /// Site root containing the dataset and publist.toml
    #[arg(long, default_value = ".", global = true)]
    root: PathBuf,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Args, Clone, Debug)]
struct RenderArgs {
    /// Sort order
    #[arg(long, default_value = "year-desc")]
    sort: String,

    /// Publication type filter
    #[arg(long = "type", default_value = "all")]
    kind: String,

    /// Only publications with this exact author name
    #[arg(long)]
    author: Option<String>,

    /// Only publications from this year
    #[arg(long)]
    year: Option<String>,

    /// Render the featured subset instead of the full list
    #[arg(long, conflicts_with_all = ["sort", "kind", "author", "year", "view"])]
    featured: bool,

    /// Presentation for this render (the saved preference is left untouched)
    #[arg(long)]
    view: Option<ViewMode>,

    /// Write HTML here instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Command {
    /// Render publication cards as HTML
    Render(RenderArgs),
    /// Validate the dataset and print an inventory
    Check,
    /// Print or set the saved list/grid preference
    View {
        /// New mode (list or grid); omit to print the current one
        mode: Option<ViewMode>,
    },
    /// Print a stock publist.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    match cli.command {
        Command::Render(args) => {
            let config = config::load_config(&cli.root)?;
            render(&cli.root, &config, &args)?;
        }
        Command::Check => {
            let config = config::load_config(&cli.root)?;
            println!("==> Checking {}", cli.root.display());
            let fetcher = FileFetcher::new(&cli.root);
            let publications = loader::try_load(&fetcher, &config.dataset.path)?;
            if publications.is_empty() {
                return Err(format!("{} contains no publications", config.dataset.path).into());
            }
            let classifier = VenueClassifier::from_config(&config.classifier);
            output::print_check_output(&publications, &classifier);
            println!("==> Dataset is valid");
        }
        Command::View { mode } => {
            let config = config::load_config(&cli.root)?;
            let key = &config.view.storage_key;
            let mut store = store::site_store(&cli.root);
            match mode {
                Some(mode) => {
                    store.set(key, mode.as_str())?;
                    println!("View: {mode}");
                }
                None => println!("View: {}", publist::view::restore_mode(&store, key)),
            }
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Render the site headless and emit the container's HTML.
fn render(
    root: &Path,
    config: &Config,
    args: &RenderArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let options = RenderOptions {
        sort: Some(args.sort.clone()),
        kind: Some(args.kind.clone()),
        author: args.author.clone(),
        year: args.year.clone(),
        featured: args.featured,
        view: args.view,
    };
    let rendered = page::render_site(root, config, &options)?;

    match &args.output {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(path, &rendered.html)?;
            info!(path = %path.display(), "Wrote publications markup");
        }
        None => println!("{}", rendered.html),
    }

    output::print_render_summary(
        rendered.shown,
        rendered.total,
        rendered.view.map(ViewMode::as_str),
    );
    Ok(())
}
