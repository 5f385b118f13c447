//! Error type for `qrar-store-sqlite`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("date/time parse error: {0}")]
  DateParse(String),

  /// A `kind` column value that does not decode to one of the four
  /// experience kinds. Only possible if the database was written by
  /// something other than this crate.
  #[error("unknown experience kind in database: {0:?}")]
  UnknownKind(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
