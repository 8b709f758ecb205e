//! Reader configuration

use crate::error::{BindError, Result};
use chrono_tz::Tz;
use std::collections::BTreeMap;

/// Configuration for a [`Binder`](crate::Binder)
///
/// All fields are optional. The defaults read comma-separated input, treat
/// only empty cells as absent, interpret timestamps in UTC and take the
/// column names from the first row.
///
/// # Examples
///
/// ```
/// use csvbind::Options;
///
/// let opts = Options::new()
///     .separator(';')
///     .null_marker("NULL")
///     .time_zone(chrono_tz::Europe::Stockholm);
///
/// assert_eq!(opts.separator, ';');
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Options {
    /// Field delimiter (default: `,`)
    pub separator: char,
    /// Cell value treated as absent in addition to the empty string
    pub null_marker: Option<String>,
    /// Zone used to interpret timestamp cells (default: UTC)
    pub time_zone: Tz,
    /// Explicit column position to name mapping; when `None` the first row is the header
    pub header: Option<BTreeMap<usize, String>>,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            separator: ',',
            null_marker: None,
            time_zone: chrono_tz::UTC,
            header: None,
        }
    }
}

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the field delimiter (builder pattern)
    pub fn separator(mut self, separator: char) -> Self {
        self.separator = separator;
        self
    }

    /// Set the null marker (builder pattern)
    pub fn null_marker(mut self, marker: impl Into<String>) -> Self {
        self.null_marker = Some(marker.into());
        self
    }

    /// Set the time zone for timestamp cells (builder pattern)
    pub fn time_zone(mut self, tz: Tz) -> Self {
        self.time_zone = tz;
        self
    }

    /// Set the time zone by IANA name, e.g. `"Europe/Stockholm"`
    pub fn time_zone_name(self, name: &str) -> Result<Self> {
        let tz = name
            .parse::<Tz>()
            .map_err(|_| BindError::UnknownTimeZone(name.to_string()))?;
        Ok(self.time_zone(tz))
    }

    /// Supply the column names instead of reading them from the first row
    ///
    /// ```
    /// use csvbind::Options;
    ///
    /// let opts = Options::new().header([(0, "n"), (1, "d"), (2, "c")]);
    /// assert_eq!(opts.header.unwrap().len(), 3);
    /// ```
    pub fn header<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = (usize, S)>,
        S: Into<String>,
    {
        self.header = Some(
            columns
                .into_iter()
                .map(|(idx, name)| (idx, name.into()))
                .collect(),
        );
        self
    }

    /// Delimiter as the single byte the tokenizer expects
    pub(crate) fn delimiter(&self) -> Result<u8> {
        match self.separator {
            '\0' => Ok(b','),
            c if c.is_ascii() => Ok(c as u8),
            c => Err(BindError::InvalidSeparator(c)),
        }
    }

    /// Whether a non-empty cell value matches the null marker
    pub(crate) fn is_null(&self, value: &str) -> bool {
        match self.null_marker.as_deref() {
            Some(marker) if !marker.is_empty() => value == marker,
            _ => false,
        }
    }
}
