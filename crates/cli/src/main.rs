use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use dashboard::{Dashboard, DashboardView, FilterOptions, ListingCard};
use data_loader::CsvListingSource;
use pipeline::{parse_optional, FilterCriteria, InclusiveRange, Selector};
use std::fmt::Display;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

/// Bus Routes - explore scraped bus listings
#[derive(Parser)]
#[command(name = "bus-routes")]
#[command(about = "Explore bus routes with simple selection and range filters", long_about = None)]
struct Cli {
    /// CSV export of the bus_routes table
    #[arg(short, long, default_value = "data/bus_routes.csv")]
    data: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the values every filter accepts
    Options {
        /// Print as JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Filter the routes and show matching buses
    Search(SearchArgs),
}

#[derive(Args, Default)]
struct SearchArgs {
    /// JSON file with saved criteria; flags below override its fields
    #[arg(long)]
    criteria: Option<PathBuf>,

    /// Bus operator ("All" for any)
    #[arg(long)]
    operator: Option<String>,

    /// Bus type, e.g. "AC Sleeper (2+1)"
    #[arg(long)]
    bus_type: Option<String>,

    /// Route name, e.g. "Kochi to Bangalore"
    #[arg(long)]
    route: Option<String>,

    /// State / region
    #[arg(long)]
    state: Option<String>,

    /// 250-500, 500-1000 or 1000+
    #[arg(long)]
    price_bucket: Option<String>,

    #[arg(long)]
    min_price: Option<f64>,

    #[arg(long)]
    max_price: Option<f64>,

    #[arg(long)]
    min_rating: Option<f64>,

    #[arg(long)]
    max_rating: Option<f64>,

    #[arg(long)]
    min_seats: Option<u32>,

    #[arg(long)]
    max_seats: Option<u32>,

    /// 1-2 hours, 2-3 hours or 3+ hours
    #[arg(long)]
    duration: Option<String>,

    /// Morning, Afternoon, Night or Anytime
    #[arg(long)]
    departing: Option<String>,

    /// Morning, Afternoon, Night or Anytime
    #[arg(long)]
    reaching: Option<String>,

    /// Show at most this many buses
    #[arg(long)]
    limit: Option<usize>,

    /// Print the result as JSON instead of cards
    #[arg(long)]
    json: bool,
}

fn main() -> Result<ExitCode> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let dashboard = Dashboard::new(CsvListingSource::new(&cli.data));

    // Dispatch to appropriate command handler
    match cli.command {
        Commands::Options { json } => handle_options(&dashboard, json),
        Commands::Search(args) => handle_search(&dashboard, &args),
    }
}

/// Handle the 'options' command
fn handle_options(dashboard: &Dashboard<CsvListingSource>, json: bool) -> Result<ExitCode> {
    let options = match dashboard.options() {
        Ok(options) => options,
        Err(err) => {
            print_data_unavailable(&format!("{:#}", err));
            return Ok(ExitCode::FAILURE);
        }
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&options)?);
    } else {
        print_options(&options);
    }
    Ok(ExitCode::SUCCESS)
}

/// Handle the 'search' command
fn handle_search(dashboard: &Dashboard<CsvListingSource>, args: &SearchArgs) -> Result<ExitCode> {
    let criteria = build_criteria(args)?;
    tracing::debug!("Criteria: {:?}", criteria);

    let view = dashboard.query(&criteria);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&view)?);
        return Ok(exit_code(&view));
    }

    match &view {
        DashboardView::DataUnavailable { reason } => print_data_unavailable(reason),
        DashboardView::NoMatches => {
            println!("{}", "No buses match the selected filters.".yellow());
        }
        DashboardView::Matches { cards } => print_cards(cards, args.limit),
    }
    Ok(exit_code(&view))
}

fn exit_code(view: &DashboardView) -> ExitCode {
    match view {
        DashboardView::DataUnavailable { .. } => ExitCode::FAILURE,
        _ => ExitCode::SUCCESS,
    }
}

/// Turn the command line into criteria, layering flags over an optional file
fn build_criteria(args: &SearchArgs) -> Result<FilterCriteria> {
    let mut criteria = match &args.criteria {
        Some(path) => load_criteria_file(path)?,
        None => FilterCriteria::default(),
    };

    for (flag, selector) in [
        (&args.operator, &mut criteria.operator),
        (&args.bus_type, &mut criteria.bus_type),
        (&args.route, &mut criteria.route),
        (&args.state, &mut criteria.state),
    ] {
        if let Some(label) = flag {
            *selector = Selector::from_label(label);
        }
    }

    if let Some(label) = &args.price_bucket {
        criteria.price_bucket = parse_optional(label).context("Invalid --price-bucket")?;
    }
    if let Some(label) = &args.duration {
        criteria.duration = parse_optional(label).context("Invalid --duration")?;
    }
    if let Some(label) = &args.departing {
        criteria.departing = parse_optional(label).context("Invalid --departing")?;
    }
    if let Some(label) = &args.reaching {
        criteria.reaching = parse_optional(label).context("Invalid --reaching")?;
    }

    if let Some(range) = range_from_flags("price", args.min_price, args.max_price, 0.0, f64::INFINITY)? {
        criteria.price_range = Some(range);
    }
    if let Some(range) = range_from_flags("rating", args.min_rating, args.max_rating, 1.0, 5.0)? {
        criteria.star_rating = Some(range);
    }
    if let Some(range) = range_from_flags("seats", args.min_seats, args.max_seats, 0, u32::MAX)? {
        criteria.seats_available = Some(range);
    }

    Ok(criteria)
}

fn load_criteria_file(path: &Path) -> Result<FilterCriteria> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read criteria file {}", path.display()))?;
    serde_json::from_str(&text)
        .with_context(|| format!("Failed to parse criteria file {}", path.display()))
}

/// A range when at least one bound was given; the other bound is left open.
fn range_from_flags<T>(
    field: &'static str,
    min: Option<T>,
    max: Option<T>,
    open_lo: T,
    open_hi: T,
) -> Result<Option<InclusiveRange<T>>>
where
    T: PartialOrd + Copy + Display,
{
    if min.is_none() && max.is_none() {
        return Ok(None);
    }
    let range = InclusiveRange::new(field, min.unwrap_or(open_lo), max.unwrap_or(open_hi))?;
    Ok(Some(range))
}

fn print_data_unavailable(reason: &str) {
    eprintln!("{} {}", "Could not load bus routes:".red().bold(), reason);
}

fn print_options(options: &FilterOptions) {
    let sections = [
        ("Operators", &options.operators),
        ("Bus types", &options.bus_types),
        ("Routes", &options.routes),
        ("States", &options.states),
    ];
    for (title, values) in sections {
        if values.is_empty() {
            continue;
        }
        println!("{}", format!("{title}:").bold().blue());
        for value in values {
            println!("  {} {}", "•".green(), value);
        }
    }

    println!("{} {}", "Price buckets:".bold().blue(), options.price_buckets.join(", "));
    println!("{} {}", "Durations:".bold().blue(), options.durations.join(", "));
    println!("{} {}", "Time windows:".bold().blue(), options.time_windows.join(", "));

    if let Some(price) = options.price {
        println!("{} {:.2} - {:.2}", "Price range:".bold().blue(), price.min, price.max);
    }
    if let Some(rating) = options.star_rating {
        println!("{} {:.1} - {:.1}", "Rating range:".bold().blue(), rating.min, rating.max);
    }
    if let Some(seats) = options.seats_available {
        println!("{} {} - {}", "Seats range:".bold().blue(), seats.min, seats.max);
    }
}

/// Helper function to format and print result cards
fn print_cards(cards: &[ListingCard], limit: Option<usize>) {
    let shown = limit.unwrap_or(cards.len()).min(cards.len());
    println!("{}", format!("{} buses found", cards.len()).bold().blue());

    for (rank, card) in cards.iter().take(shown).enumerate() {
        println!(
            "{}. {} [{}]",
            (rank + 1).to_string().green(),
            card.operator.bold(),
            card.bus_type
        );
        match &card.state {
            Some(state) => println!("   {} ({})", card.route, state),
            None => println!("   {}", card.route),
        }
        println!(
            "   {} -> {} ({})",
            card.departing, card.reaching, card.duration
        );
        println!(
            "   {} | {} | {} seats",
            format!("Rs {:.2}", card.price).yellow(),
            format!("{:.1} stars", card.star_rating).cyan(),
            card.seats_available
        );
    }

    if shown < cards.len() {
        println!("... and {} more", cards.len() - shown);
    }
}
