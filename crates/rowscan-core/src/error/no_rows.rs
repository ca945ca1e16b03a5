use super::Error;

/// Error when a query expected at least one row but the source was empty.
#[derive(Debug)]
pub(super) struct NoRowsError;

impl std::error::Error for NoRowsError {}

impl core::fmt::Display for NoRowsError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        f.write_str("no rows in result set")
    }
}

impl Error {
    /// Creates an error signaling that the row source yielded no rows.
    pub fn no_rows() -> Error {
        Error::from(super::ErrorKind::NoRows(NoRowsError))
    }

    /// Returns `true` if this error signals an empty row source.
    pub fn is_no_rows(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::NoRows(_))
    }
}
