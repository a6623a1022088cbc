//! Error type for `sifms-store-sqlite`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("core error: {0}")]
  Core(#[from] sifms_core::Error),

  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("json error: {0}")]
  Json(#[from] serde_json::Error),

  #[error("uuid parse error: {0}")]
  Uuid(#[from] uuid::Error),

  #[error("date/time parse error: {0}")]
  DateParse(String),

  /// A unique-constraint violation on `reg_no` or `phone_number`.
  #[error("a person with this registration number or phone number already exists")]
  DuplicatePerson,

  /// A unique-constraint violation on `(student_reg_no, complaint)`.
  #[error("this student has already submitted identical complaint text")]
  DuplicateComplaint,

  #[error("complaint not found: {0}")]
  ComplaintNotFound(uuid::Uuid),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
