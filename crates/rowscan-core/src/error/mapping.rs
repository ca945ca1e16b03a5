use super::Error;

/// Category of a [`MappingError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MappingErrorKind {
    /// The destination type is neither a record nor a reference to one.
    UnsupportedDestination,

    /// One or more result columns had nothing to scan into.
    NoDestination,

    /// A scan was scheduled for a column name absent from the result set.
    UnknownColumn,

    /// A single-column mapper received a different number of columns.
    WrongColumnCount,

    /// An aggregated column held a different number of values than the
    /// columns before it.
    AggregateLength,

    /// Any other failure raised while building or running a mapper.
    Custom,
}

/// A mapping failure carrying an ordered list of metadata strings.
///
/// Two mapping errors compare equal when their kinds match and their
/// metadata lists match element-wise. When both lists are empty the rendered
/// messages are compared instead.
#[derive(Debug)]
pub struct MappingError {
    kind: MappingErrorKind,
    meta: Vec<String>,
    cause: Option<Error>,
}

impl MappingError {
    pub fn kind(&self) -> MappingErrorKind {
        self.kind
    }

    /// Structured metadata, e.g. the offending column names.
    pub fn meta(&self) -> &[String] {
        &self.meta
    }

    pub fn cause(&self) -> Option<&Error> {
        self.cause.as_ref()
    }
}

impl PartialEq for MappingError {
    fn eq(&self, other: &MappingError) -> bool {
        if self.kind != other.kind {
            return false;
        }

        if self.meta.is_empty() && other.meta.is_empty() {
            return self.to_string() == other.to_string();
        }

        self.meta == other.meta
    }
}

impl std::error::Error for MappingError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.cause
            .as_ref()
            .map(|err| err as &(dyn std::error::Error + 'static))
    }
}

impl core::fmt::Display for MappingError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        use MappingErrorKind::*;

        match self.kind {
            UnsupportedDestination => write!(
                f,
                "destination `{}` is not a record or an optional record",
                self.meta.first().map(String::as_str).unwrap_or("?")
            ),
            NoDestination => write!(f, "no destination for columns [{}]", self.meta.join(", ")),
            UnknownColumn => write!(f, "unknown columns to map to [{}]", self.meta.join(", ")),
            WrongColumnCount => {
                let expected = self.meta.first().map(String::as_str).unwrap_or("?");
                let actual = self.meta.get(1).map(String::as_str).unwrap_or("?");
                write!(
                    f,
                    "expected {expected} {} but got {actual} {}",
                    plural(expected),
                    plural(actual)
                )
            }
            AggregateLength => write!(
                f,
                "column `{}` holds {} values but expected {}",
                self.meta.first().map(String::as_str).unwrap_or("?"),
                self.meta.get(1).map(String::as_str).unwrap_or("?"),
                self.meta.get(2).map(String::as_str).unwrap_or("?"),
            ),
            Custom => match &self.cause {
                Some(cause) => core::fmt::Display::fmt(cause, f),
                None => f.write_str("mapping failed"),
            },
        }
    }
}

fn plural(count: &str) -> &'static str {
    if count == "1" {
        "column"
    } else {
        "columns"
    }
}

impl Error {
    fn mapping_kind(kind: MappingErrorKind, meta: Vec<String>, cause: Option<Error>) -> Error {
        Error::from(super::ErrorKind::Mapping(MappingError { kind, meta, cause }))
    }

    /// Wraps `cause` as a mapping error carrying `meta`.
    ///
    /// An existing mapping error passed without metadata is returned as is.
    pub fn mapping(cause: Error, meta: Vec<String>) -> Error {
        if meta.is_empty() && matches!(cause.kind(), super::ErrorKind::Mapping(_)) {
            return cause;
        }
        Error::mapping_kind(MappingErrorKind::Custom, meta, Some(cause))
    }

    /// The destination type cannot be mapped column-by-column.
    pub fn unsupported_destination(type_name: &str) -> Error {
        Error::mapping_kind(
            MappingErrorKind::UnsupportedDestination,
            vec![type_name.to_string()],
            None,
        )
    }

    /// Lists every column, in result order, that has no scan target.
    pub fn no_destination(columns: Vec<String>) -> Error {
        Error::mapping_kind(MappingErrorKind::NoDestination, columns, None)
    }

    /// Lists every name passed to a by-name scan that matched no column.
    pub fn unknown_columns(names: Vec<String>) -> Error {
        Error::mapping_kind(MappingErrorKind::UnknownColumn, names, None)
    }

    pub fn wrong_column_count(expected: usize, actual: usize) -> Error {
        Error::mapping_kind(
            MappingErrorKind::WrongColumnCount,
            vec![expected.to_string(), actual.to_string()],
            None,
        )
    }

    /// An aggregated column disagrees with earlier columns on the number of
    /// records.
    pub fn aggregate_length(column: &str, actual: usize, expected: usize) -> Error {
        Error::mapping_kind(
            MappingErrorKind::AggregateLength,
            vec![column.to_string(), actual.to_string(), expected.to_string()],
            None,
        )
    }
}
