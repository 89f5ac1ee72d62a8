use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use hotel_search::config::{
    default_config_path, find_config_file, get_config, load_config, save_config_file, Config,
};
use hotel_search::models::{Query, RankedResult, SearchResponse, StarSelector};
use hotel_search::search::{filter_by_stars, parse_query, HotelSearch, ResultView, SearchError};
use hotel_search::sources::{build_source, SourceKind};
use hotel_search::ui::{self, Spinner, Status};
use hotel_search::utils::truncate_with_ellipsis;
use std::io::{BufRead, IsTerminal, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Hotel Search - find hotels by country and city, ranked by how much is known about them
#[derive(Parser, Debug)]
#[command(name = "hotel-search")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Find hotels by country and city, ranked by information completeness", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose logging (-v for debug, -vv for trace)
    #[arg(long, short, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(long, short, global = true)]
    quiet: bool,

    /// Output format
    #[arg(long, short, value_enum, global = true, default_value_t = OutputFormat::Auto)]
    output: OutputFormat,

    /// Configuration file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Request timeout in seconds (overrides the config file)
    #[arg(long, global = true)]
    timeout: Option<u64>,

    /// Show all environment variables
    #[arg(long, global = true)]
    env: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Output format for results
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum OutputFormat {
    /// Cards if stdout is a terminal, JSON otherwise
    Auto,
    /// Cards (human-readable)
    Cards,
    /// Table format
    Table,
    /// JSON format (machine-readable)
    Json,
    /// Plain text format
    Plain,
}

/// Search backend
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum SourceArg {
    /// Hotel search HTTP API
    Api,
    /// OpenStreetMap Overpass
    Overpass,
}

impl From<SourceArg> for SourceKind {
    fn from(arg: SourceArg) -> Self {
        match arg {
            SourceArg::Api => SourceKind::Api,
            SourceArg::Overpass => SourceKind::Overpass,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Search hotels by "country city"
    #[command(alias = "s")]
    Search {
        /// Country followed by city, e.g. "France Paris" or usa new york
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,

        /// Star filter: all, 1, 2, 3, 4 or 5
        #[arg(long, short)]
        stars: Option<String>,

        /// Backend to search
        #[arg(long, value_enum)]
        source: Option<SourceArg>,

        /// Search API base URL (overrides the config file)
        #[arg(long)]
        api_url: Option<String>,

        /// Keep the results and prompt for star filters or new searches
        #[arg(long, short)]
        interactive: bool,
    },

    /// Rank and filter a saved search API response without any network call
    #[command(alias = "r")]
    Rank {
        /// JSON file with a search API response ("-" for stdin)
        file: PathBuf,

        /// Query the response belongs to (defaults to its country and city)
        #[arg(long)]
        query: Option<String>,

        /// Star filter: all, 1, 2, 3, 4 or 5
        #[arg(long, short)]
        stars: Option<String>,
    },

    /// Write a configuration file with default settings
    InitConfig {
        /// Where to write (defaults to the user config directory)
        #[arg(long)]
        path: Option<PathBuf>,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

/// Print all environment variables used by the application
fn print_env_vars() {
    println!("Environment variables (prefix HOTEL_SEARCH_, sections separated by __):");
    println!();
    println!("  HOTEL_SEARCH_API__BASE_URL          Search API base URL");
    println!("  HOTEL_SEARCH_API__TIMEOUT_SECS      Request timeout in seconds");
    println!("  HOTEL_SEARCH_API__USER_AGENT        User agent override");
    println!("  HOTEL_SEARCH_OVERPASS__ENDPOINT     Overpass interpreter URL");
    println!("  HOTEL_SEARCH_SEARCH__DEFAULT_SOURCE api | overpass");
    println!("  HOTEL_SEARCH_SEARCH__DEFAULT_STARS  all | 1-5");
    println!("  HOTEL_SEARCH_LOGGING__LEVEL         error | warn | info | debug | trace");
    println!("  RUST_LOG                            Full tracing filter, overrides everything");
    println!();
    println!("Current values:");
    for (key, value) in std::env::vars().filter(|(k, _)| k.starts_with("HOTEL_SEARCH_")) {
        println!("  {}={}", key, value);
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    if cli.env {
        print_env_vars();
        return Ok(ExitCode::SUCCESS);
    }

    let config_path = cli.config.clone().or_else(find_config_file);
    let mut config = match &config_path {
        Some(path) => load_config(path)
            .with_context(|| format!("Failed to load config file {}", path.display()))?,
        None => get_config().context("Failed to read configuration from environment")?,
    };
    if let Some(timeout) = cli.timeout {
        config.api.timeout_secs = timeout;
    }

    // Initialize tracing based on verbosity
    let log_level = match (cli.quiet, cli.verbose) {
        (true, _) => "error",
        (false, 0) => config.logging.level.as_str(),
        (false, 1) => "debug",
        (false, _) => "trace",
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| format!("hotel_search={}", log_level)),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if let Some(path) = &config_path {
        tracing::info!("Using config file: {}", path.display());
    }

    match cli.command {
        Some(Commands::Search {
            query,
            stars,
            source,
            api_url,
            interactive,
        }) => {
            if let Some(url) = api_url {
                config.api.base_url = url;
            }
            let kind = source.map(SourceKind::from).unwrap_or(config.search.default_source);
            let selector = parse_selector(stars.as_deref(), &config)?;
            let raw = query.join(" ");

            let search = HotelSearch::new(build_source(kind, &config)?);
            let ok = run_search(&search, &raw, selector, cli.output, cli.quiet).await;

            if interactive {
                interactive_loop(&search, cli.output, cli.quiet).await?;
                return Ok(ExitCode::SUCCESS);
            }
            Ok(if ok { ExitCode::SUCCESS } else { ExitCode::FAILURE })
        }

        Some(Commands::Rank { file, query, stars }) => {
            let selector = parse_selector(stars.as_deref(), &config)?;
            let response = read_response(&file)?;

            let parsed = response_query(query.as_deref(), &response)?;

            let ranked = RankedResult::new(parsed, response.hotels);
            let view = ResultView::new(ranked.query(), selector, filter_by_stars(&ranked, selector));
            output_view(&view, cli.output);
            Ok(ExitCode::SUCCESS)
        }

        Some(Commands::InitConfig { path, force }) => {
            let path = path
                .or_else(default_config_path)
                .context("No config directory found; pass --path")?;
            if path.exists() && !force {
                anyhow::bail!("{} already exists (use --force to overwrite)", path.display());
            }
            save_config_file(&Config::default(), &path)?;
            if !cli.quiet {
                ui::print_status(Status::Success, &format!("Wrote {}", path.display()));
            }
            Ok(ExitCode::SUCCESS)
        }

        None => {
            use clap::CommandFactory;
            Cli::command().print_help()?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn parse_selector(stars: Option<&str>, config: &Config) -> Result<StarSelector> {
    let value = stars.unwrap_or(&config.search.default_stars);
    Ok(value.parse::<StarSelector>()?)
}

/// Query for an offline ranking: typed by the user, or the location the
/// response echoes back. The echoed parts are taken as is, so multi-word
/// countries survive.
fn response_query(typed: Option<&str>, response: &SearchResponse) -> Result<Query> {
    match (typed, &response.country, &response.city) {
        (Some(raw), _, _) => Ok(parse_query(raw)?),
        (None, Some(country), Some(city)) => Ok(Query::from_parts(country, city)?),
        _ => anyhow::bail!("The response has no country/city; pass --query"),
    }
}

fn read_response(file: &Path) -> Result<SearchResponse> {
    let content = if file.as_os_str() == "-" {
        std::io::read_to_string(std::io::stdin()).context("Failed to read stdin")?
    } else {
        std::fs::read_to_string(file)
            .with_context(|| format!("Failed to read {}", file.display()))?
    };
    serde_json::from_str(&content).context("Not a search API response")
}

/// Submit a search and show it. Returns whether results were shown.
async fn run_search(
    search: &HotelSearch,
    raw: &str,
    selector: StarSelector,
    format: OutputFormat,
    quiet: bool,
) -> bool {
    let spinner = (!quiet).then(|| Spinner::new("Searching hotels..."));
    let result = search.submit(raw).await;
    if let Some(spinner) = spinner {
        spinner.finish();
    }

    let view = match result {
        Ok(view) if selector == StarSelector::All => view,
        Ok(_) => match search.filter(selector) {
            Ok(view) => view,
            Err(err) => {
                ui::print_search_error(&err, raw);
                return false;
            }
        },
        Err(err) => {
            ui::print_search_error(&err, raw);
            return false;
        }
    };

    output_view(&view, format);
    true
}

const PROMPT: &str = "Star filter (all, 1-5), new \"country city\" search, or empty to quit: ";

/// Prompt goes to stderr so piped JSON on stdout stays parseable.
fn write_prompt<W: Write>(mut out: W) -> std::io::Result<()> {
    out.write_all(PROMPT.as_bytes())?;
    out.flush()
}

/// Read star filters or new queries from stdin until EOF or an empty line.
async fn interactive_loop(search: &HotelSearch, format: OutputFormat, quiet: bool) -> Result<()> {
    let stdin = std::io::stdin();
    loop {
        if !quiet {
            write_prompt(std::io::stderr().lock())?;
        }

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let input = line.trim();
        if input.is_empty() {
            break;
        }

        match input.parse::<StarSelector>() {
            Ok(selector) if search.is_active() => match search.filter(selector) {
                Ok(view) => output_view(&view, format),
                Err(SearchError::NoActiveResult) if cfg!(debug_assertions) => {
                    panic!("star filter offered without an active result")
                }
                Err(err) => ui::print_search_error(&err, input),
            },
            Ok(_) => ui::print_status(Status::Info, "Run a search before filtering"),
            Err(_) => {
                run_search(search, input, StarSelector::All, format, quiet).await;
            }
        }
    }
    Ok(())
}

fn output_view(view: &ResultView, format: OutputFormat) {
    let actual_format = if format == OutputFormat::Auto {
        if std::io::stdout().is_terminal() {
            OutputFormat::Cards
        } else {
            OutputFormat::Json
        }
    } else {
        format
    };

    match actual_format {
        OutputFormat::Json => match serde_json::to_string_pretty(view) {
            Ok(json) => println!("{}", json),
            Err(e) => tracing::error!("Failed to serialize results: {}", e),
        },
        OutputFormat::Plain => {
            println!("Hotels: {}, {} ({} found)", view.country, view.city, view.count);
            for hotel in &view.hotels {
                println!();
                println!("{}", hotel.display_name());
                if let Some(address) = &hotel.address {
                    println!("  Address: {}", address);
                }
                if let Some(stars) = &hotel.stars {
                    println!("  Stars: {}", stars);
                }
                if let Some(phone) = &hotel.phone {
                    println!("  Phone: {}", phone);
                }
                if let Some(website) = &hotel.website {
                    println!("  Website: {}", website);
                }
                if let Some(booking) = &hotel.booking_url {
                    println!("  Booking: {}", booking);
                }
            }
        }
        OutputFormat::Table => {
            use comfy_table::{Attribute, Cell, Table};
            let mut table = Table::new();
            table.load_preset(comfy_table::presets::UTF8_FULL);
            table.set_header(vec!["Name", "Stars", "Address", "Phone", "Website", "Booking"]);

            for hotel in &view.hotels {
                table.add_row(vec![
                    Cell::new(truncate_with_ellipsis(hotel.display_name(), 40))
                        .add_attribute(Attribute::Bold),
                    Cell::new(hotel.stars.as_deref().unwrap_or("")),
                    Cell::new(truncate_with_ellipsis(hotel.address.as_deref().unwrap_or(""), 40)),
                    Cell::new(hotel.phone.as_deref().unwrap_or("")),
                    Cell::new(truncate_with_ellipsis(hotel.website.as_deref().unwrap_or(""), 40)),
                    Cell::new(if hotel.has_booking() { "✓" } else { "" }),
                ]);
            }
            println!(
                "Hotels: {}, {} | filter: {} | found: {}",
                view.country,
                view.city,
                view.selector.label(),
                view.count
            );
            println!("{table}");
        }
        OutputFormat::Cards => ui::print_view(view),
        OutputFormat::Auto => unreachable!(),
    }
}
