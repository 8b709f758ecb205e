//! # csvbind
//!
//! Bind rows of delimited text into strongly-typed records.
//!
//! The caller declares which fields of a record can be bound and what kind
//! of value each holds ([`bindable!`]), then supplies a [`Strategy`] saying
//! which column feeds which field. Each row is read into a sparse [`Row`]
//! (empty and null-marker cells are dropped) and converted field by field:
//! text is copied, integers and arbitrary-precision decimals are parsed,
//! timestamps are read as `YYYY-MM-DD HH:MM:SS` in the configured time zone.
//!
//! ## Example
//!
//! ```
//! use csvbind::{bindable, BigDecimal, Binder, Options, Strategy, Timestamp};
//!
//! #[derive(Debug, Default)]
//! struct Destination {
//!     name: String,
//!     date: Option<Timestamp>,
//!     counter: i64,
//!     rating: Option<BigDecimal>,
//! }
//!
//! bindable! {
//!     Destination {
//!         "Name" => name: Text,
//!         "Date" => date: Timestamp,
//!         "Counter" => counter: Int64,
//!         "Rating" => rating: Decimal,
//!     }
//! }
//!
//! let input = "n,d,c,r\nfoo,2014-04-06 10:02:21,9834,1.55\n";
//! let mut binder = Binder::new(input.as_bytes(), Options::default()).unwrap();
//! let strategy = Strategy::from([("n", "Name"), ("d", "Date"), ("c", "Counter"), ("r", "Rating")]);
//!
//! let mut dest = Destination::default();
//! binder
//!     .for_each(|row| {
//!         row.bind(&mut dest, &strategy)?;
//!         Ok::<_, csvbind::BindError>(false)
//!     })
//!     .unwrap();
//!
//! assert_eq!(dest.name, "foo");
//! assert_eq!(dest.counter, 9834);
//! assert_eq!(dest.rating, Some("1.55".parse::<BigDecimal>().unwrap()));
//! ```

pub mod binder;
pub mod error;
pub mod header;
pub mod options;
pub mod record;
pub mod row;
pub mod source;
pub mod strategy;

pub use binder::{Binder, RecordIterator, RowIterator};
pub use error::{BindError, Result, TimestampError};
pub use header::ColumnMap;
pub use options::Options;
pub use record::{Bindable, FieldKind, FieldRegistry};
pub use row::{Row, TIMESTAMP_FORMAT};
pub use source::Source;
pub use strategy::Strategy;

pub use bigdecimal::BigDecimal;
pub use chrono_tz::Tz;

/// Value type of timestamp fields
pub type Timestamp = chrono::DateTime<Tz>;
