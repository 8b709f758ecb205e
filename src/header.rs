//! Column position to column name resolution

use crate::error::{BindError, Result};
use crate::options::Options;
use csv::StringRecord;
use std::collections::BTreeMap;
use std::io::Read;

/// Mapping from 0-based column position to column name
///
/// Built once per input and never modified afterwards. Always non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnMap {
    columns: BTreeMap<usize, String>,
}

impl ColumnMap {
    /// Name of the column at `position`, if the map knows one
    pub fn name(&self, position: usize) -> Option<&str> {
        self.columns.get(&position).map(String::as_str)
    }

    /// Number of named columns
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Named columns in position order
    pub fn iter(&self) -> impl Iterator<Item = (usize, &str)> {
        self.columns.iter().map(|(idx, name)| (*idx, name.as_str()))
    }

    fn from_record(record: &StringRecord) -> Self {
        ColumnMap {
            columns: record
                .iter()
                .enumerate()
                .map(|(idx, name)| (idx, name.to_string()))
                .collect(),
        }
    }
}

/// Establish the column map for `reader`
///
/// An explicit header in `options` is used verbatim and no row is consumed.
/// Otherwise exactly one row is read and its cells become the column names.
pub(crate) fn resolve<R: Read>(reader: &mut csv::Reader<R>, options: &Options) -> Result<ColumnMap> {
    if let Some(header) = &options.header {
        if header.is_empty() {
            return Err(BindError::NoCustomHeaderMetadata);
        }
        tracing::debug!(columns = header.len(), "using custom header");
        return Ok(ColumnMap {
            columns: header.clone(),
        });
    }

    let mut record = StringRecord::new();
    if !reader.read_record(&mut record)? || record.is_empty() {
        return Err(BindError::NoHeaderMetadata);
    }

    let map = ColumnMap::from_record(&record);
    tracing::debug!(columns = map.len(), "read header from first row");
    Ok(map)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reader(input: &str) -> csv::Reader<&[u8]> {
        csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(input.as_bytes())
    }

    #[test]
    fn test_header_from_first_row() -> Result<()> {
        let mut rdr = reader("n,d,c\nfoo,bar,baz\n");
        let map = resolve(&mut rdr, &Options::default())?;

        assert_eq!(map.len(), 3);
        assert_eq!(map.name(0), Some("n"));
        assert_eq!(map.name(2), Some("c"));
        assert_eq!(map.name(3), None);

        // Only the header row was consumed
        let mut next = StringRecord::new();
        assert!(rdr.read_record(&mut next)?);
        assert_eq!(&next[0], "foo");
        Ok(())
    }

    #[test]
    fn test_custom_header_consumes_nothing() -> Result<()> {
        let mut rdr = reader("foo,bar\n");
        let opts = Options::new().header([(0, "n"), (1, "d")]);
        let map = resolve(&mut rdr, &opts)?;

        assert_eq!(map.iter().collect::<Vec<_>>(), vec![(0, "n"), (1, "d")]);

        let mut next = StringRecord::new();
        assert!(rdr.read_record(&mut next)?);
        assert_eq!(&next[0], "foo");
        Ok(())
    }

    #[test]
    fn test_empty_custom_header() {
        let mut rdr = reader("foo,bar\n");
        let opts = Options::new().header(Vec::<(usize, String)>::new());
        assert!(matches!(
            resolve(&mut rdr, &opts),
            Err(BindError::NoCustomHeaderMetadata)
        ));
    }

    #[test]
    fn test_missing_header() {
        let mut rdr = reader("");
        assert!(matches!(
            resolve(&mut rdr, &Options::default()),
            Err(BindError::NoHeaderMetadata)
        ));

        let mut rdr = reader("\n\n");
        assert!(matches!(
            resolve(&mut rdr, &Options::default()),
            Err(BindError::NoHeaderMetadata)
        ));
    }
}
