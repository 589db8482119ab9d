use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use data_loader::{ItemCatalog, ParseMode, RatingLog};
use pipeline::config::{DEFAULT_PRECISION, DEFAULT_THRESHOLD};
use pipeline::{Label, RatingAggregator, SamplingConfig, TrainingDataPipeline, TrainingExample};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::info;

/// train-prep - Balanced training data for rating-based recommenders
#[derive(Parser)]
#[command(name = "train-prep")]
#[command(about = "Build balanced (user, item, label) training data from rating logs", long_about = None)]
struct Cli {
    /// Directory holding the input tables
    #[arg(short, long, default_value = "data")]
    data_dir: PathBuf,

    /// Ratings table, relative to the data directory
    #[arg(long, default_value = "ratings.csv")]
    ratings_file: PathBuf,

    /// Item metadata table, relative to the data directory
    #[arg(long, default_value = "movies.csv")]
    items_file: PathBuf,

    /// Fail on malformed rows instead of skipping them
    #[arg(long)]
    strict: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the balanced training set and print a prefix of it
    Train {
        /// Ratings at or above this value are positives
        #[arg(long, default_value_t = DEFAULT_THRESHOLD)]
        threshold: f64,

        /// Decimal digits kept in item averages
        #[arg(long, default_value_t = DEFAULT_PRECISION)]
        precision: u32,

        /// Number of examples to print
        #[arg(long, default_value = "50")]
        show: usize,

        /// Print the examples as JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Show global average ratings per item
    Averages {
        /// Item IDs to display
        #[arg(long = "item")]
        items: Vec<String>,

        /// Decimal digits kept in item averages
        #[arg(long, default_value_t = DEFAULT_PRECISION)]
        precision: u32,
    },

    /// Show item metadata
    Items {
        /// Item IDs to display
        #[arg(long = "item")]
        items: Vec<String>,
    },
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let mode = if cli.strict {
        ParseMode::Strict
    } else {
        ParseMode::Lenient
    };
    let ratings_path = cli.data_dir.join(&cli.ratings_file);
    let items_path = cli.data_dir.join(&cli.items_file);

    // Dispatch to appropriate command handler
    match cli.command {
        Commands::Train {
            threshold,
            precision,
            show,
            json,
        } => {
            let ratings = load_ratings(&ratings_path, mode)?;
            let config = SamplingConfig::new(threshold, precision);
            handle_train(&ratings, config, show, json)?
        }
        Commands::Averages { items, precision } => {
            let ratings = load_ratings(&ratings_path, mode)?;
            handle_averages(&ratings, &items, precision)
        }
        Commands::Items { items } => {
            let catalog = ItemCatalog::load_from_file(&items_path, mode)
                .with_context(|| format!("Failed to load items from {}", items_path.display()))?;
            handle_items(&catalog, &items)
        }
    }

    Ok(())
}

fn load_ratings(path: &Path, mode: ParseMode) -> Result<RatingLog> {
    println!("Loading ratings from {}...", path.display());
    let start = Instant::now();
    let ratings = RatingLog::load_from_file(path, mode)
        .with_context(|| format!("Failed to load ratings from {}", path.display()))?;
    println!(
        "{} Loaded {} ratings in {:?}",
        "✓".green(),
        ratings.len(),
        start.elapsed()
    );
    Ok(ratings)
}

/// Handle the 'train' command
fn handle_train(ratings: &RatingLog, config: SamplingConfig, show: usize, json: bool) -> Result<()> {
    info!(
        "Building training data (threshold {}, precision {})",
        config.threshold, config.precision
    );
    let start = Instant::now();
    let training_set = TrainingDataPipeline::new(config).run(ratings);
    let summary = training_set.summary;

    println!("{}", "Training set:".bold().blue());
    println!("{}Examples: {}", "• ".green(), summary.total());
    println!(
        "{}Positives / negatives: {} / {}",
        "• ".green(),
        summary.positives,
        summary.negatives
    );
    println!(
        "{}Users with examples: {} of {}",
        "• ".green(),
        summary.balanced_users,
        summary.users
    );
    println!("{}Built in {:?}", "• ".cyan(), start.elapsed());

    let prefix = &training_set.examples[..show.min(training_set.examples.len())];
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(prefix).context("Failed to serialize examples")?
        );
    } else {
        print_examples(prefix);
    }
    Ok(())
}

/// Handle the 'averages' command
fn handle_averages(ratings: &RatingLog, items: &[String], precision: u32) {
    let averages = RatingAggregator::new(precision).compute_averages(ratings.records());
    println!(
        "{}",
        format!("Average ratings for {} items", averages.len()).bold().blue()
    );
    for item_id in items {
        match averages.get(item_id) {
            Some(avg) => println!("  - {}: {}", item_id, avg),
            None => println!("  - {}: {}", item_id, "not rated".yellow()),
        }
    }
}

/// Handle the 'items' command
fn handle_items(catalog: &ItemCatalog, items: &[String]) {
    println!("{}", format!("{} items loaded", catalog.len()).bold().blue());
    for item_id in items {
        match catalog.get_item(item_id) {
            Some(item) => {
                let tags = item.tag_list().collect::<Vec<_>>().join(", ");
                println!("  - {}: {} [{}]", item.id, item.title, tags);
            }
            None => println!("  - {}: {}", item_id, "not found".yellow()),
        }
    }
}

/// Helper function to format and print training examples
fn print_examples(examples: &[TrainingExample]) {
    println!("{}", format!("First {} examples:", examples.len()).bold().blue());
    for (idx, example) in examples.iter().enumerate() {
        let label = match example.label {
            Label::Positive => example.label.to_string().green(),
            Label::Negative => example.label.to_string().red(),
        };
        println!(
            "{:>5}. user {} item {} label {}",
            (idx + 1).to_string().dimmed(),
            example.user_id,
            example.item_id,
            label
        );
    }
}
