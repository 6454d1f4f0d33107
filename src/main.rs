//! PIX BR Code CLI
//!
//! Reads charge requests from a CSV file and writes one payload per charge.
//!
//! # Usage
//!
//! ```bash
//! PIX_KEY=12345678900 \
//! PIX_MERCHANT_NAME="Fulano de Tal" \
//! PIX_MERCHANT_CITY="Sao Paulo" \
//! cargo run -- charges.csv > payloads.csv
//! ```
//!
//! # Environment Variables
//!
//! - `PIX_KEY`: receiving PIX key (tax ID, phone, email, or random key)
//! - `PIX_MERCHANT_NAME`: merchant display name (normalized, max 25 chars)
//! - `PIX_MERCHANT_CITY`: merchant city (normalized, max 15 chars)
//! - `RUST_LOG`: set to `debug` or `warn` to control logging verbosity

use pix_brcode::{BatchGenerator, Merchant, PixError, Result};
use std::env;
use std::fs::File;
use std::io::{self, BufReader};
use std::process;

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        return Err(PixError::MissingArgument);
    }

    let merchant = merchant_from_env()?;

    let input_path = &args[1];
    let file = File::open(input_path)?;
    let reader = BufReader::new(file);

    let stdout = io::stdout();
    let handle = stdout.lock();
    BatchGenerator::new(merchant).process_csv(reader, handle)?;

    Ok(())
}

fn merchant_from_env() -> Result<Merchant> {
    let key = require_env("PIX_KEY")?;
    let name = require_env("PIX_MERCHANT_NAME")?;
    let city = require_env("PIX_MERCHANT_CITY")?;
    Merchant::new(&key, &name, &city)
}

fn require_env(var: &'static str) -> Result<String> {
    env::var(var).map_err(|_| PixError::MissingConfig { var })
}
