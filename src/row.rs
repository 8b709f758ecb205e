//! Sparse rows and binding them into records

use crate::error::{BindError, Result, TimestampError};
use crate::header::ColumnMap;
use crate::options::Options;
use crate::record::{Bindable, FieldRegistry, Setter};
use crate::strategy::Strategy;
use crate::Timestamp;
use bigdecimal::BigDecimal;
use chrono::{LocalResult, NaiveDateTime, Offset, TimeDelta, TimeZone};
use chrono_tz::Tz;
use csv::StringRecord;
use std::collections::HashMap;

/// Layout of timestamp cells: `YYYY-MM-DD HH:MM:SS`
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One input row as a column name to raw value mapping
///
/// Only cells that were non-empty and did not match the null marker are
/// present. A missing key means no value was supplied for that column.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    data: HashMap<String, String>,
    time_zone: Tz,
}

impl Row {
    /// Build a row from a tokenized record
    ///
    /// Cells without a column name (past the end of the map, or gaps in a
    /// custom header) are dropped.
    pub(crate) fn materialize(record: &StringRecord, columns: &ColumnMap, options: &Options) -> Self {
        let mut data = HashMap::with_capacity(record.len().min(columns.len()));
        for (idx, cell) in record.iter().enumerate() {
            if cell.is_empty() || options.is_null(cell) {
                continue;
            }
            if let Some(name) = columns.name(idx) {
                data.insert(name.to_string(), cell.to_string());
            }
        }
        Row {
            data,
            time_zone: options.time_zone,
        }
    }

    /// Raw value of `column`, if present
    pub fn get(&self, column: &str) -> Option<&str> {
        self.data.get(column).map(String::as_str)
    }

    pub fn contains(&self, column: &str) -> bool {
        self.data.contains_key(column)
    }

    /// Number of present columns
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Present (column, value) pairs, in no particular order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.data.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Zone timestamp cells are interpreted in
    pub fn time_zone(&self) -> Tz {
        self.time_zone
    }

    /// Write the values named by `strategy` into `record`
    ///
    /// Pairs whose source column is absent from the row are skipped and the
    /// field keeps its current value. The first failing pair aborts the
    /// call; fields written by earlier pairs stay written.
    ///
    /// # Examples
    ///
    /// ```
    /// use csvbind::{bindable, Binder, Options, Strategy};
    ///
    /// #[derive(Default)]
    /// struct Item {
    ///     name: String,
    ///     count: i64,
    /// }
    ///
    /// bindable! { Item { "Name" => name: Text, "Count" => count: Int64 } }
    ///
    /// let mut binder = Binder::new("n,c\nfoo,42\n".as_bytes(), Options::default()).unwrap();
    /// let row = binder.read_row().unwrap().unwrap();
    ///
    /// let mut item = Item::default();
    /// row.bind(&mut item, &Strategy::from([("n", "Name"), ("c", "Count")])).unwrap();
    /// assert_eq!(item.name, "foo");
    /// assert_eq!(item.count, 42);
    /// ```
    pub fn bind<T: Bindable>(&self, record: &mut T, strategy: &Strategy) -> Result<()> {
        self.bind_with(T::field_registry(), record, strategy)
    }

    /// Like [`bind`](Self::bind) with an explicit registry
    pub fn bind_with<T>(
        &self,
        registry: &FieldRegistry<T>,
        record: &mut T,
        strategy: &Strategy,
    ) -> Result<()> {
        for (source, dest) in strategy.iter() {
            let Some(value) = self.data.get(source) else {
                continue;
            };

            let setter = registry
                .setter(dest)
                .ok_or_else(|| BindError::UnknownDestinationField(dest.to_string()))?;

            match *setter {
                Setter::Text(set) => set(record, value.clone()),
                Setter::Int64(set) => set(record, parse_int64(dest, value)?),
                Setter::Decimal(set) => set(record, parse_decimal(dest, value)?),
                Setter::Timestamp(set) => set(record, parse_timestamp(dest, value, self.time_zone)?),
                Setter::Other => {
                    tracing::trace!(field = dest, "skipping field without a conversion");
                }
            }
        }
        Ok(())
    }

    /// Bind into a freshly defaulted record
    pub fn to_record<T: Bindable + Default>(&self, strategy: &Strategy) -> Result<T> {
        let mut record = T::default();
        self.bind(&mut record, strategy)?;
        Ok(record)
    }
}

fn parse_int64(field: &str, value: &str) -> Result<i64> {
    value
        .parse::<i64>()
        .map_err(|source| BindError::InvalidIntegerFormat {
            field: field.to_string(),
            value: value.to_string(),
            source,
        })
}

fn parse_decimal(field: &str, value: &str) -> Result<BigDecimal> {
    value
        .parse::<BigDecimal>()
        .map_err(|source| BindError::InvalidDecimalFormat {
            field: field.to_string(),
            value: value.to_string(),
            source,
        })
}

/// Separator expected at each byte of `YYYY-MM-DD HH:MM:SS`, `None` for digits
const TIMESTAMP_LAYOUT: [Option<u8>; 19] = {
    let mut layout = [None; 19];
    layout[4] = Some(b'-');
    layout[7] = Some(b'-');
    layout[10] = Some(b' ');
    layout[13] = Some(b':');
    layout[16] = Some(b':');
    layout
};

/// Two-digit fields, single separators, seconds at most 59
fn check_timestamp_layout(value: &str) -> std::result::Result<(), TimestampError> {
    let bytes = value.as_bytes();
    if bytes.len() != TIMESTAMP_LAYOUT.len() {
        return Err(TimestampError::Layout);
    }
    let shaped = bytes
        .iter()
        .zip(TIMESTAMP_LAYOUT.iter())
        .all(|(b, expected)| match expected {
            Some(sep) => b == sep,
            None => b.is_ascii_digit(),
        });
    if !shaped || bytes[17] > b'5' {
        return Err(TimestampError::Layout);
    }
    Ok(())
}

fn parse_timestamp(field: &str, value: &str, tz: Tz) -> Result<Timestamp> {
    let naive = check_timestamp_layout(value)
        .and_then(|()| {
            NaiveDateTime::parse_from_str(value, TIMESTAMP_FORMAT).map_err(TimestampError::from)
        })
        .map_err(|source| BindError::InvalidTimestampFormat {
            field: field.to_string(),
            value: value.to_string(),
            source,
        })?;

    let ts = match tz.from_local_datetime(&naive) {
        LocalResult::Single(ts) => ts,
        // Repeated wall-clock hour at the end of DST
        LocalResult::Ambiguous(earliest, _) => earliest,
        // Skipped by a DST jump: read it with the offset in effect before the jump
        LocalResult::None => {
            let before = tz
                .offset_from_utc_datetime(&(naive - TimeDelta::hours(24)))
                .fix()
                .local_minus_utc();
            tz.from_utc_datetime(&(naive - TimeDelta::seconds(i64::from(before))))
        }
    };
    Ok(ts)
}
