//! # Seed Data Generator
//!
//! Populates the database with demo sales for development, then prints the
//! daily and weekly summaries over the seeded data.
//!
//! ## Usage
//! ```bash
//! # Generate 50 sales (default)
//! cargo run -p till-db --bin seed
//!
//! # Generate custom amount
//! cargo run -p till-db --bin seed -- --count 200
//!
//! # Specify database path
//! cargo run -p till-db --bin seed -- --db ./data/till.db
//! ```
//!
//! ## Generated Sales
//! Each sale has 1-4 line items drawn from a fixed product list, a rotating
//! discount (none, percentage, flat), and a spread of creation times across
//! the trailing two weeks so both summaries have data inside and outside
//! their windows. Most sales are completed; some are left pending.

use std::env;

use chrono::{Duration, Utc};
use till_core::{Discount, NewSale, NewSaleItem, PaymentStatus};
use till_db::{Database, DbConfig, SalesService};
use tracing_subscriber::EnvFilter;

/// Product list for demo line items: (name, unit price in cents).
const PRODUCTS: &[(&str, i64)] = &[
    ("Espresso", 350),
    ("Cappuccino", 475),
    ("Latte", 525),
    ("Flat White", 495),
    ("Drip Coffee", 275),
    ("Croissant", 395),
    ("Blueberry Muffin", 425),
    ("Bagel with Cream Cheese", 450),
    ("Ham & Cheese Sandwich", 795),
    ("Caesar Salad", 925),
    ("Orange Juice", 399),
    ("Sparkling Water", 250),
    ("Chocolate Chip Cookie", 295),
    ("Granola Bar", 225),
    ("Fruit Cup", 475),
];

/// Discount rotation applied by sale index.
const DISCOUNTS: &[Discount] = &[
    Discount::none(),
    Discount::none(),
    Discount::Percentage(500),
    Discount::none(),
    Discount::Percentage(1000),
    Discount::Amount(200),
    Discount::none(),
    Discount::Amount(500),
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .init();

    // Parse command line arguments
    let args: Vec<String> = env::args().collect();

    let mut count: usize = 50;
    let mut db_path = String::from("./till_dev.db");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--count" | "-c" => {
                if i + 1 < args.len() {
                    count = args[i + 1].parse().unwrap_or(50);
                    i += 1;
                }
            }
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Till Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -c, --count <N>    Number of sales to generate (default: 50)");
                println!("  -d, --db <PATH>    Database file path (default: ./till_dev.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("🌱 Till Seed Data Generator");
    println!("===========================");
    println!("Database: {}", db_path);
    println!("Sales:    {}", count);
    println!();

    // Connect to database
    let db = Database::new(DbConfig::new(&db_path)).await?;
    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    // Check existing sales
    let existing = db.sales().count().await?;
    if existing > 0 {
        println!("⚠ Database already has {} sales", existing);
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    let service = SalesService::new(db);

    println!();
    println!("Generating sales...");

    let now = Utc::now();
    let mut generated = 0;
    let mut last_created = None;
    let start = std::time::Instant::now();

    for idx in 0..count {
        let sale = generate_sale(idx, count, now);
        match service.create_sale(sale).await {
            Ok(detail) => last_created = Some(detail),
            Err(e) => {
                eprintln!("Failed to insert sale {}: {}", idx, e);
                continue;
            }
        }

        generated += 1;
        if generated % 25 == 0 {
            println!("  Generated {} sales...", generated);
        }
    }

    let elapsed = start.elapsed();
    println!();
    println!("✓ Generated {} sales in {:?}", generated, elapsed);

    if let Some(detail) = &last_created {
        println!();
        println!("Example sale ({}):", detail.sale.sale_id);
        println!("{}", serde_json::to_string_pretty(detail)?);
    }

    // Summaries over the seeded data
    println!();
    println!("Summaries:");
    let daily = service.daily_summary().await?;
    println!(
        "  Today ({}): {} completed sales, ${}.{:02}",
        daily.date,
        daily.total_transactions,
        daily.total_sales_cents / 100,
        daily.total_sales_cents % 100
    );

    let weekly = service.weekly_summary().await?;
    println!(
        "  Week ({} to {}): {} completed sales, ${}.{:02}",
        weekly.start_date,
        weekly.end_date,
        weekly.total_transactions,
        weekly.total_sales_cents / 100,
        weekly.total_sales_cents % 100
    );

    println!();
    println!("✓ Seed complete!");

    Ok(())
}

/// Generates one demo sale. Creation times are spread backwards over 14
/// days so the weekly window catches roughly half of them.
fn generate_sale(idx: usize, count: usize, now: chrono::DateTime<chrono::Utc>) -> NewSale {
    let item_count = 1 + (idx * 7) % 4;
    let items: Vec<NewSaleItem> = (0..item_count)
        .map(|n| {
            let (name, price) = PRODUCTS[(idx * 3 + n * 5) % PRODUCTS.len()];
            NewSaleItem {
                product_name: name.to_string(),
                unit_price_cents: price,
                quantity: 1 + ((idx + n) % 3) as i64,
            }
        })
        .collect();

    let discount = DISCOUNTS[idx % DISCOUNTS.len()];

    // Every ninth sale is left pending with no payment recorded
    let (payment_status, payment_received_cents) = if idx % 9 == 8 {
        (PaymentStatus::Pending, None)
    } else {
        // Large round tender so validation always passes
        (PaymentStatus::Completed, Some(100_000))
    };

    let hours_back = (idx as i64 * 14 * 24) / count.max(1) as i64;

    NewSale {
        items,
        discount,
        payment_received_cents,
        payment_status,
        created_at: Some(now - Duration::hours(hours_back)),
    }
}
