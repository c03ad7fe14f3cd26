//! # Seed Data Generator
//!
//! Populates the product collection with demo catalog data for development.
//!
//! ## Usage
//! ```bash
//! # Seed into ./database (default)
//! cargo run -p dukaan-store --bin seed
//!
//! # Seed into a specific data directory
//! cargo run -p dukaan-store --bin seed -- --data-dir ./my-data
//!
//! # Wipe existing products first
//! cargo run -p dukaan-store --bin seed -- --fresh
//! ```
//!
//! Products without a curated image get the generated placeholder URL, the
//! same as products created through the API.

use std::path::PathBuf;

use clap::Parser;

use dukaan_core::ProductDraft;
use dukaan_store::{Collection, Store, StoreConfig, StoreResult};

/// Demo catalog: (name, price, image).
const CATALOG: &[(&str, f64, Option<&str>)] = &[
    ("Wireless Mouse", 799.0, None),
    ("Mechanical Keyboard", 3499.0, None),
    ("Bluetooth Speaker", 2499.0, None),
    ("Desk Lamp", 499.0, None),
    ("Laptop Stand", 1299.0, None),
    ("USB-C Hub", 1899.0, None),
    ("Cotton Kurta", 1199.0, None),
    ("Canvas Shoes", 1599.0, None),
    ("Steel Water Bottle", 349.0, None),
    ("Masala Chai Sampler", 299.0, None),
    ("Notebook Set", 199.0, None),
    ("Wall Clock", 899.0, None),
];

#[derive(Parser)]
#[command(name = "seed", about = "Seed the product collection with demo data")]
struct Args {
    /// Data directory holding the collection files
    #[arg(long, default_value = "database")]
    data_dir: PathBuf,

    /// Clear existing products before seeding
    #[arg(long)]
    fresh: bool,
}

#[tokio::main]
async fn main() -> StoreResult<()> {
    let args = Args::parse();

    let store = Store::open(StoreConfig::new(&args.data_dir)).await?;

    if args.fresh {
        store
            .write::<dukaan_core::Product>(Collection::Products, &[])
            .await?;
        println!("cleared existing products");
    }

    let repo = store.products();
    for (name, price, image) in CATALOG {
        let product = repo
            .insert(ProductDraft {
                name: (*name).to_string(),
                price: *price,
                image: image.map(str::to_string),
            })
            .await?;
        println!("#{:<3} {:<24} ₹{}", product.id, product.name, product.price);
    }

    println!(
        "seeded {} products into {}",
        CATALOG.len(),
        args.data_dir.display()
    );
    Ok(())
}
