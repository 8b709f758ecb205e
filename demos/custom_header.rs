//! Supplying the header out of band
//!
//! Body-only feeds carry no header row; the column names come from
//! `Options::header` instead and no row is consumed for them.

use csvbind::{bindable, Binder, Options, Strategy, Timestamp};
use std::error::Error;

#[derive(Debug, Default)]
struct Reading {
    sensor: String,
    taken_at: Option<Timestamp>,
    value: i64,
}

bindable! {
    Reading {
        "Sensor" => sensor: Text,
        "TakenAt" => taken_at: Timestamp,
        "Value" => value: Int64,
    }
}

const FEED: &str = "\
t-01,2014-04-06 10:02:21,4459813
t-02,2014-04-06 10:02:22,4459820,extra
t-03,2014-04-06 10:02:23
";

fn main() -> Result<(), Box<dyn Error>> {
    println!("=== Custom header ===\n");

    let opts = Options::new().header([(0, "sensor"), (1, "ts"), (2, "value")]);
    let strategy = Strategy::from([("sensor", "Sensor"), ("ts", "TakenAt"), ("value", "Value")]);

    let mut binder = Binder::new(FEED.as_bytes(), opts)?;

    // Stop after the first reading whose value is missing
    for reading in binder.records::<Reading>(&strategy) {
        let reading = reading?;
        println!("{:?}", reading);
        if reading.value == 0 {
            println!("   missing value, stopping");
            break;
        }
    }

    Ok(())
}
