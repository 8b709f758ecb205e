//! Row-by-row binding over a delimited text stream

use crate::error::{BindError, Result};
use crate::header::{self, ColumnMap};
use crate::options::Options;
use crate::record::Bindable;
use crate::row::Row;
use crate::source::Source;
use crate::strategy::Strategy;
use csv::StringRecord;
use std::io::Read;
use std::marker::PhantomData;
use std::path::Path;

/// Reads delimited text one row at a time and hands out sparse [`Row`]s
///
/// The column names are resolved when the binder is created, either from
/// [`Options::header`] or by consuming the first row. After that every call
/// to [`read_row`](Self::read_row) consumes exactly one row. Rows may be
/// shorter or longer than the header.
///
/// # Examples
///
/// ```
/// use csvbind::{bindable, Binder, Options, Strategy};
///
/// #[derive(Default)]
/// struct Person {
///     name: String,
///     age: i64,
/// }
///
/// bindable! { Person { "Name" => name: Text, "Age" => age: Int64 } }
///
/// let input = "name;age\nAlice;30\nBob;NULL\n";
/// let opts = Options::new().separator(';').null_marker("NULL");
/// let mut binder = Binder::new(input.as_bytes(), opts).unwrap();
///
/// let strategy = Strategy::from([("name", "Name"), ("age", "Age")]);
/// let mut people = Vec::new();
/// binder
///     .for_each(|row| {
///         people.push(row.to_record::<Person>(&strategy)?);
///         Ok::<_, csvbind::BindError>(true)
///     })
///     .unwrap();
///
/// assert_eq!(people.len(), 2);
/// assert_eq!(people[1].age, 0);
/// ```
pub struct Binder<R> {
    reader: csv::Reader<R>,
    columns: ColumnMap,
    options: Options,
    record: StringRecord,
    row_count: u64,
}

impl Binder<Source> {
    /// Open a CSV file - compressed archives are detected from the extension
    ///
    /// ```no_run
    /// use csvbind::{Binder, Options};
    ///
    /// let plain = Binder::open("data.csv", Options::default()).unwrap();
    /// let packed = Binder::open("data.csv.zst", Options::default()).unwrap();
    /// ```
    pub fn open<P: AsRef<Path>>(path: P, options: Options) -> Result<Self> {
        Self::new(Source::open(path)?, options)
    }
}

impl<R: Read> Binder<R> {
    /// Create a binder over `input`, resolving the column names
    ///
    /// Fails with [`BindError::NoCustomHeaderMetadata`] for an empty explicit
    /// header and [`BindError::NoHeaderMetadata`] when the input has no
    /// first row to take names from.
    pub fn new(input: R, options: Options) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(options.delimiter()?)
            .has_headers(false)
            .flexible(true)
            .from_reader(input);

        let columns = header::resolve(&mut reader, &options)?;

        Ok(Binder {
            reader,
            columns,
            options,
            record: StringRecord::new(),
            row_count: 0,
        })
    }

    /// Read the next row
    ///
    /// Returns `Ok(None)` when the input is exhausted.
    pub fn read_row(&mut self) -> Result<Option<Row>> {
        if !self.reader.read_record(&mut self.record)? {
            return Ok(None);
        }
        self.row_count += 1;

        let row = Row::materialize(&self.record, &self.columns, &self.options);
        tracing::trace!(row = self.row_count, cells = self.record.len(), values = row.len(), "read row");
        Ok(Some(row))
    }

    /// Hand every remaining row to `visitor`
    ///
    /// Stops cleanly at end of input or when the visitor returns
    /// `Ok(false)`. A visitor error is returned unchanged; a read error is
    /// returned as [`BindError::RowRead`] carrying the failing row number.
    pub fn for_each<F, E>(&mut self, mut visitor: F) -> std::result::Result<(), E>
    where
        F: FnMut(Row) -> std::result::Result<bool, E>,
        E: From<BindError>,
    {
        loop {
            let row = match self.read_row() {
                Ok(Some(row)) => row,
                Ok(None) => {
                    tracing::debug!(rows = self.row_count, "reached end of input");
                    return Ok(());
                }
                Err(err) => {
                    let err = self.row_context(err);
                    tracing::warn!(error = %err, "stopping iteration on read failure");
                    return Err(err.into());
                }
            };

            if !visitor(row)? {
                tracing::debug!(rows = self.row_count, "visitor stopped iteration");
                return Ok(());
            }
        }
    }

    /// Iterator over the remaining rows
    ///
    /// Yields at most one error, after which iteration ends.
    pub fn rows(&mut self) -> RowIterator<'_, R> {
        RowIterator {
            binder: self,
            done: false,
        }
    }

    /// Iterator binding each remaining row into a fresh `T`
    pub fn records<'a, T>(&'a mut self, strategy: &'a Strategy) -> RecordIterator<'a, R, T>
    where
        T: Bindable + Default,
    {
        RecordIterator {
            rows: self.rows(),
            strategy,
            _record: PhantomData,
        }
    }

    /// Column names in effect for this input
    pub fn column_map(&self) -> &ColumnMap {
        &self.columns
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Number of data rows read so far (the header row is not counted)
    pub fn row_count(&self) -> u64 {
        self.row_count
    }

    fn row_context(&self, err: BindError) -> BindError {
        match err {
            BindError::Csv(source) => BindError::RowRead {
                row: self.row_count + 1,
                source,
            },
            other => other,
        }
    }
}

/// Iterator over rows of a [`Binder`]
pub struct RowIterator<'a, R> {
    binder: &'a mut Binder<R>,
    done: bool,
}

impl<'a, R: Read> Iterator for RowIterator<'a, R> {
    type Item = Result<Row>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.binder.read_row() {
            Ok(Some(row)) => Some(Ok(row)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(self.binder.row_context(e)))
            }
        }
    }
}

/// Iterator over records bound from a [`Binder`]
pub struct RecordIterator<'a, R, T> {
    rows: RowIterator<'a, R>,
    strategy: &'a Strategy,
    _record: PhantomData<fn() -> T>,
}

impl<'a, R: Read, T: Bindable + Default> Iterator for RecordIterator<'a, R, T> {
    type Item = Result<T>;

    fn next(&mut self) -> Option<Self::Item> {
        let row = self.rows.next()?;
        Some(row.and_then(|row| row.to_record(self.strategy)))
    }
}
