use data_loader::{Dataset, ParseMode};
use std::path::Path;
use std::time::Instant;

fn main() {
    let data_dir = Path::new("data");

    println!("Loading items and ratings from {:?}...\n", data_dir);

    let start = Instant::now();
    let dataset = Dataset::load_from_dir(data_dir, ParseMode::Lenient)
        .expect("Failed to load dataset");
    let elapsed = start.elapsed();

    let (items, ratings) = dataset.counts();

    println!("\n=== Load Complete ===");
    println!("Time taken: {:?}", elapsed);
    println!("Items: {}", items);
    println!("Ratings: {}", ratings);
    println!("\nPerformance: {:.0} ratings/second",
             ratings as f64 / elapsed.as_secs_f64());
}
