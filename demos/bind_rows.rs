//! Binding rows into records
//!
//! Reads a small semicolon-separated report, converts each row into a
//! `Payment` and prints it. Empty cells and `NULL` leave the field at its
//! default.
//!
//! Run with `RUST_LOG=csvbind=trace cargo run --example bind_rows` to see
//! the per-row trace output.

use csvbind::{bindable, BigDecimal, BindError, Binder, Options, Strategy, Timestamp};
use std::error::Error;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Default)]
struct Payment {
    payer: String,
    booked_at: Option<Timestamp>,
    reference: i64,
    amount: Option<BigDecimal>,
}

bindable! {
    Payment {
        "Payer" => payer: Text,
        "BookedAt" => booked_at: Timestamp,
        "Reference" => reference: Int64,
        "Amount" => amount: Decimal,
    }
}

const REPORT: &str = "\
payer;booked;ref;amount;note
Alice;2014-04-06 10:02:21;9834;120.50;first
Bob;2014-04-07 08:15:00;NULL;99.99
Carol;;9836;NULL;late entry
";

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== Binding rows ===\n");

    let opts = Options::new()
        .separator(';')
        .null_marker("NULL")
        .time_zone_name("Europe/Stockholm")?;

    let strategy = Strategy::new()
        .with("payer", "Payer")
        .with("booked", "BookedAt")
        .with("ref", "Reference")
        .with("amount", "Amount");

    let mut binder = Binder::new(REPORT.as_bytes(), opts)?;
    println!("Columns: {:?}\n", binder.column_map().iter().collect::<Vec<_>>());

    binder.for_each(|row| {
        let payment: Payment = row.to_record(&strategy)?;
        println!("{:?}", payment);
        Ok::<_, BindError>(true)
    })?;

    println!("\nRows read: {}", binder.row_count());
    Ok(())
}
