//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `inventory_core` linkage.
//! - Optionally seed one dummy product into a database file and report
//!   the resulting row count.
//!
//! Usage: `inventory_cli [DB_PATH]`

use inventory_core::{DbLocation, InventoryService, ProductProvider, ProviderConfig};
use std::path::PathBuf;
use std::process::ExitCode;

fn main() -> ExitCode {
    println!("inventory_core ping={}", inventory_core::ping());
    println!("inventory_core version={}", inventory_core::core_version());

    let Some(db_path) = std::env::args_os().nth(1).map(PathBuf::from) else {
        return ExitCode::SUCCESS;
    };

    match seed_one(db_path) {
        Ok((id, count)) => {
            println!("inventory_core seeded_id={id}");
            println!("inventory_core product_count={count}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("inventory_core seed_error={err}");
            ExitCode::FAILURE
        }
    }
}

fn seed_one(db_path: PathBuf) -> Result<(i64, usize), Box<dyn std::error::Error>> {
    let provider = ProductProvider::new(ProviderConfig {
        location: DbLocation::File(db_path),
        ..ProviderConfig::default()
    })?;
    let service = InventoryService::new(provider);
    let id = service.insert_dummy_product()?;
    let count = service.list_products()?.len();
    Ok((id, count))
}
