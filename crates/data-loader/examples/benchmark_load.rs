use data_loader::{ListingIndex, Result, DEFAULT_TIME};
use std::collections::HashMap;
use std::path::Path;
use std::time::Instant;

fn main() -> Result<()> {
    let data_file = Path::new("data/bus_routes.csv");

    let start = Instant::now();
    let index = ListingIndex::load_from_csv(data_file)?;
    let elapsed = start.elapsed();

    println!("Loaded {} listings in {:?}\n", index.len(), elapsed);

    let facets = index.facets();
    println!("=== Selector values ===");
    for (column, values) in [
        ("busname", &facets.operators),
        ("bustype", &facets.bus_types),
        ("route_name", &facets.routes),
        ("state", &facets.states),
    ] {
        println!("{:<12} {:>4} distinct", column, values.len());
    }

    println!("\n=== Slider bounds ===");
    if let Some(price) = index.price_bounds() {
        println!("price        {:.2} - {:.2}", price.min, price.max);
    }
    if let Some(rating) = index.rating_bounds() {
        println!("star_rating  {:.1} - {:.1}", rating.min, rating.max);
    }
    if let Some(seats) = index.seat_bounds() {
        println!("seats        {} - {}", seats.min, seats.max);
    }

    let mut per_route: HashMap<&str, usize> = HashMap::new();
    for listing in index.listings() {
        *per_route.entry(listing.route_name.as_str()).or_default() += 1;
    }
    println!("\n=== Buses per route ===");
    for route in &facets.routes {
        println!("{:>4}  {}", per_route.get(route.as_str()).unwrap_or(&0), route);
    }

    // rows whose times were missing in the export and fell back to midnight
    let defaulted = index
        .listings()
        .iter()
        .filter(|l| l.departing_time == DEFAULT_TIME || l.reaching_time == DEFAULT_TIME)
        .count();
    println!("\nListings with a midnight time: {}", defaulted);

    Ok(())
}
