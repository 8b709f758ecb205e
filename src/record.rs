//! Destination records and their field registries
//!
//! A record type declares which of its fields can be bound and what kind of
//! value each holds. The binder looks a destination name up in the
//! registry, picks the parser for the field's kind and writes the result
//! through the registered setter.

use crate::Timestamp;
use bigdecimal::BigDecimal;
use std::collections::HashMap;
use std::fmt;

/// Declared value category of a destination field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    /// Raw cell text, assigned unchanged
    Text,
    /// Base-10 signed 64-bit integer
    Int64,
    /// Arbitrary-precision decimal
    Decimal,
    /// `YYYY-MM-DD HH:MM:SS` in the configured time zone
    Timestamp,
    /// Known to the record but never converted
    Other,
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FieldKind::Text => "text",
            FieldKind::Int64 => "int64",
            FieldKind::Decimal => "decimal",
            FieldKind::Timestamp => "timestamp",
            FieldKind::Other => "other",
        };
        f.write_str(name)
    }
}

/// Typed write access to one field of `T`
pub(crate) enum Setter<T> {
    Text(fn(&mut T, String)),
    Int64(fn(&mut T, i64)),
    Decimal(fn(&mut T, BigDecimal)),
    Timestamp(fn(&mut T, Timestamp)),
    Other,
}

impl<T> Setter<T> {
    fn kind(&self) -> FieldKind {
        match self {
            Setter::Text(_) => FieldKind::Text,
            Setter::Int64(_) => FieldKind::Int64,
            Setter::Decimal(_) => FieldKind::Decimal,
            Setter::Timestamp(_) => FieldKind::Timestamp,
            Setter::Other => FieldKind::Other,
        }
    }
}

/// Field name to kind and setter mapping for a record type
///
/// # Examples
///
/// ```
/// use csvbind::{FieldKind, FieldRegistry};
///
/// #[derive(Default)]
/// struct Trade {
///     symbol: String,
///     quantity: i64,
/// }
///
/// let registry = FieldRegistry::new()
///     .text("Symbol", |t: &mut Trade, v| t.symbol = v)
///     .int64("Quantity", |t: &mut Trade, v| t.quantity = v);
///
/// assert_eq!(registry.kind("Quantity"), Some(FieldKind::Int64));
/// assert_eq!(registry.kind("Price"), None);
/// ```
pub struct FieldRegistry<T> {
    fields: HashMap<String, Setter<T>>,
}

impl<T> Default for FieldRegistry<T> {
    fn default() -> Self {
        FieldRegistry {
            fields: HashMap::new(),
        }
    }
}

impl<T> FieldRegistry<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a text field
    pub fn text(self, name: impl Into<String>, set: fn(&mut T, String)) -> Self {
        self.register(name, Setter::Text(set))
    }

    /// Register a 64-bit integer field
    pub fn int64(self, name: impl Into<String>, set: fn(&mut T, i64)) -> Self {
        self.register(name, Setter::Int64(set))
    }

    /// Register an arbitrary-precision decimal field
    pub fn decimal(self, name: impl Into<String>, set: fn(&mut T, BigDecimal)) -> Self {
        self.register(name, Setter::Decimal(set))
    }

    /// Register a timestamp field
    pub fn timestamp(self, name: impl Into<String>, set: fn(&mut T, Timestamp)) -> Self {
        self.register(name, Setter::Timestamp(set))
    }

    /// Register a field the binder must leave alone
    pub fn other(self, name: impl Into<String>) -> Self {
        self.register(name, Setter::Other)
    }

    fn register(mut self, name: impl Into<String>, setter: Setter<T>) -> Self {
        self.fields.insert(name.into(), setter);
        self
    }

    /// Declared kind of field `name`
    pub fn kind(&self, name: &str) -> Option<FieldKind> {
        self.fields.get(name).map(Setter::kind)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub(crate) fn setter(&self, name: &str) -> Option<&Setter<T>> {
        self.fields.get(name)
    }
}

impl<T> fmt::Debug for FieldRegistry<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.fields.iter().map(|(name, setter)| (name, setter.kind())))
            .finish()
    }
}

/// A record type rows can be bound into
///
/// Usually implemented with the [`bindable!`](crate::bindable) macro.
pub trait Bindable: Sized + 'static {
    /// Registry describing the bindable fields of `Self`
    fn field_registry() -> &'static FieldRegistry<Self>;
}

/// Implement [`Bindable`] for a struct by listing its bindable fields
///
/// Each entry is `"DestinationName" => field: Kind` where `Kind` is one of
/// `Text`, `Int64`, `Decimal`, `Timestamp` or `Other`. The setter assigns
/// with `Into`, so `Option<_>` fields work as well as plain ones.
///
/// ```
/// use csvbind::{bindable, BigDecimal, Bindable, FieldKind, Timestamp};
///
/// #[derive(Default)]
/// struct Destination {
///     name: String,
///     date: Option<Timestamp>,
///     counter: i64,
///     rating: Option<BigDecimal>,
/// }
///
/// bindable! {
///     Destination {
///         "Name" => name: Text,
///         "Date" => date: Timestamp,
///         "Counter" => counter: Int64,
///         "Rating" => rating: Decimal,
///     }
/// }
///
/// assert_eq!(Destination::field_registry().kind("Date"), Some(FieldKind::Timestamp));
/// ```
#[macro_export]
macro_rules! bindable {
    ($ty:ty { $($name:literal => $field:ident : $kind:ident),* $(,)? }) => {
        impl $crate::Bindable for $ty {
            fn field_registry() -> &'static $crate::FieldRegistry<Self> {
                static REGISTRY: ::std::sync::OnceLock<$crate::FieldRegistry<$ty>> =
                    ::std::sync::OnceLock::new();
                REGISTRY.get_or_init(|| {
                    let registry = $crate::FieldRegistry::new();
                    $( let registry = $crate::__bindable_field!(registry, $kind, $name, $field); )*
                    registry
                })
            }
        }
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __bindable_field {
    ($reg:ident, Text, $name:literal, $field:ident) => {
        $reg.text($name, |r: &mut Self, v: ::std::string::String| r.$field = v.into())
    };
    ($reg:ident, Int64, $name:literal, $field:ident) => {
        $reg.int64($name, |r: &mut Self, v: i64| r.$field = v.into())
    };
    ($reg:ident, Decimal, $name:literal, $field:ident) => {
        $reg.decimal($name, |r: &mut Self, v: $crate::BigDecimal| r.$field = v.into())
    };
    ($reg:ident, Timestamp, $name:literal, $field:ident) => {
        $reg.timestamp($name, |r: &mut Self, v: $crate::Timestamp| r.$field = v.into())
    };
    ($reg:ident, Other, $name:literal, $field:ident) => {
        $reg.other($name)
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Quote {
        symbol: String,
        bid: Option<BigDecimal>,
        flags: Vec<u8>,
    }

    #[test]
    fn test_registry_kinds() {
        let registry = FieldRegistry::new()
            .text("Symbol", |q: &mut Quote, v| q.symbol = v)
            .decimal("Bid", |q: &mut Quote, v| q.bid = Some(v))
            .other("Flags");

        assert_eq!(registry.len(), 3);
        assert_eq!(registry.kind("Symbol"), Some(FieldKind::Text));
        assert_eq!(registry.kind("Bid"), Some(FieldKind::Decimal));
        assert_eq!(registry.kind("Flags"), Some(FieldKind::Other));
        assert_eq!(registry.kind("Ask"), None);
    }

    #[test]
    fn test_setter_writes_field() {
        let registry = FieldRegistry::new().text("Symbol", |q: &mut Quote, v| q.symbol = v);
        let mut quote = Quote::default();

        match registry.setter("Symbol") {
            Some(Setter::Text(set)) => set(&mut quote, "ACME".to_string()),
            _ => panic!("expected text setter"),
        }
        assert_eq!(quote.symbol, "ACME");
        assert!(quote.bid.is_none());
        assert!(quote.flags.is_empty());
    }
}
