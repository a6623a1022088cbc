//! [`SqliteStore`] — the SQLite implementation of [`SifmsStore`].

use std::path::Path;

use chrono::Utc;
use rusqlite::OptionalExtension as _;
use uuid::Uuid;

use sifms_core::{
  complaint::{Complaint, ComplaintResponse, NewComplaint},
  person::{NewPerson, Person},
  store::SifmsStore,
};

use crate::{
  encode::{encode_dt, encode_responses, encode_uuid, RawComplaint, RawPerson},
  schema::SCHEMA,
  Error, Result,
};

const PERSON_COLUMNS: &str = "person_id, reg_no, surname, first_name, \
   other_names, department, faculty, phone_number, gender, role, password_hash";

const COMPLAINT_COLUMNS: &str = "complaint_id, student_reg_no, surname, \
   first_name, other_names, department, faculty, phone_number, gender, role, \
   complaint, submitted_at, responses_json";

fn person_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<RawPerson> {
  Ok(RawPerson {
    person_id:     row.get(0)?,
    reg_no:        row.get(1)?,
    surname:       row.get(2)?,
    first_name:    row.get(3)?,
    other_names:   row.get(4)?,
    department:    row.get(5)?,
    faculty:       row.get(6)?,
    phone_number:  row.get(7)?,
    gender:        row.get(8)?,
    role:          row.get(9)?,
    password_hash: row.get(10)?,
  })
}

fn complaint_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<RawComplaint> {
  Ok(RawComplaint {
    complaint_id:   row.get(0)?,
    student_reg_no: row.get(1)?,
    surname:        row.get(2)?,
    first_name:     row.get(3)?,
    other_names:    row.get(4)?,
    department:     row.get(5)?,
    faculty:        row.get(6)?,
    phone_number:   row.get(7)?,
    gender:         row.get(8)?,
    role:           row.get(9)?,
    complaint:      row.get(10)?,
    submitted_at:   row.get(11)?,
    responses_json: row.get(12)?,
  })
}

/// True for any SQLite unique/check constraint failure.
fn is_constraint_violation(err: &tokio_rusqlite::Error) -> bool {
  matches!(
    err,
    tokio_rusqlite::Error::Rusqlite(rusqlite::Error::SqliteFailure(f, _))
      if f.code == rusqlite::ErrorCode::ConstraintViolation
  )
}

// ─── Store ───────────────────────────────────────────────────────────────────

/// A SIFMS store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

// ─── SifmsStore impl ─────────────────────────────────────────────────────────

impl SifmsStore for SqliteStore {
  type Error = Error;

  // ── Person directory ──────────────────────────────────────────────────────

  async fn add_person(&self, input: NewPerson) -> Result<Person> {
    let person = Person {
      person_id:     Uuid::new_v4(),
      reg_no:        input.reg_no,
      surname:       input.surname,
      first_name:    input.first_name,
      other_names:   input.other_names,
      department:    input.department,
      faculty:       input.faculty,
      phone_number:  input.phone_number,
      gender:        input.gender,
      role:          input.role,
      password_hash: input.password_hash,
    };

    let id_str = encode_uuid(person.person_id);
    let p      = person.clone();

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO persons (
             person_id, reg_no, surname, first_name, other_names,
             department, faculty, phone_number, gender, role, password_hash
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
          rusqlite::params![
            id_str,
            p.reg_no,
            p.surname,
            p.first_name,
            p.other_names,
            p.department,
            p.faculty,
            p.phone_number,
            p.gender.as_str(),
            p.role.as_str(),
            p.password_hash,
          ],
        )?;
        Ok(())
      })
      .await
      .map_err(|e| {
        if is_constraint_violation(&e) {
          Error::DuplicatePerson
        } else {
          Error::Database(e)
        }
      })?;

    Ok(person)
  }

  async fn find_person(&self, reg_no: &str) -> Result<Option<Person>> {
    let reg_no = reg_no.to_owned();

    let raw: Option<RawPerson> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!("SELECT {PERSON_COLUMNS} FROM persons WHERE reg_no = ?1"),
              rusqlite::params![reg_no],
              person_from_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawPerson::into_person).transpose()
  }

  async fn person_conflict(&self, reg_no: &str, phone_number: &str) -> Result<bool> {
    let reg_no = reg_no.to_owned();
    let phone  = phone_number.to_owned();

    let found: bool = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT 1 FROM persons WHERE reg_no = ?1 OR phone_number = ?2",
              rusqlite::params![reg_no, phone],
              |_| Ok(true),
            )
            .optional()?
            .unwrap_or(false),
        )
      })
      .await?;

    Ok(found)
  }

  // ── Complaint ledger ──────────────────────────────────────────────────────

  async fn add_complaint(&self, input: NewComplaint) -> Result<Complaint> {
    let complaint = Complaint {
      complaint_id:   Uuid::new_v4(),
      student_reg_no: input.student_reg_no,
      student:        input.student,
      text:           input.text,
      submitted_at:   Utc::now(),
      responses:      Vec::new(),
    };

    let id_str        = encode_uuid(complaint.complaint_id);
    let at_str        = encode_dt(complaint.submitted_at);
    let responses_str = encode_responses(&complaint.responses)?;
    let c             = complaint.clone();

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO complaints (
             complaint_id, student_reg_no, surname, first_name, other_names,
             department, faculty, phone_number, gender, role,
             complaint, submitted_at, responses_json
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)",
          rusqlite::params![
            id_str,
            c.student_reg_no,
            c.student.surname,
            c.student.first_name,
            c.student.other_names,
            c.student.department,
            c.student.faculty,
            c.student.phone_number,
            c.student.gender.as_str(),
            c.student.role.as_str(),
            c.text,
            at_str,
            responses_str,
          ],
        )?;
        Ok(())
      })
      .await
      .map_err(|e| {
        if is_constraint_violation(&e) {
          Error::DuplicateComplaint
        } else {
          Error::Database(e)
        }
      })?;

    Ok(complaint)
  }

  async fn complaint_exists(&self, reg_no: &str, text: &str) -> Result<bool> {
    let reg_no = reg_no.to_owned();
    let text   = text.to_owned();

    let found: bool = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT 1 FROM complaints
               WHERE student_reg_no = ?1 AND complaint = ?2",
              rusqlite::params![reg_no, text],
              |_| Ok(true),
            )
            .optional()?
            .unwrap_or(false),
        )
      })
      .await?;

    Ok(found)
  }

  async fn first_complaint_for(&self, reg_no: &str) -> Result<Option<Complaint>> {
    let reg_no = reg_no.to_owned();

    let raw: Option<RawComplaint> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!(
                "SELECT {COMPLAINT_COLUMNS} FROM complaints
                 WHERE student_reg_no = ?1
                 ORDER BY rowid LIMIT 1"
              ),
              rusqlite::params![reg_no],
              complaint_from_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawComplaint::into_complaint).transpose()
  }

  async fn complaints_for(&self, reg_no: &str) -> Result<Vec<Complaint>> {
    let reg_no = reg_no.to_owned();

    let raws: Vec<RawComplaint> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {COMPLAINT_COLUMNS} FROM complaints
           WHERE student_reg_no = ?1
           ORDER BY rowid"
        ))?;
        let rows = stmt
          .query_map(rusqlite::params![reg_no], complaint_from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawComplaint::into_complaint).collect()
  }

  async fn all_complaints(&self) -> Result<Vec<Complaint>> {
    let raws: Vec<RawComplaint> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {COMPLAINT_COLUMNS} FROM complaints ORDER BY rowid"
        ))?;
        let rows = stmt
          .query_map([], complaint_from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawComplaint::into_complaint).collect()
  }

  async fn append_response(
    &self,
    complaint_id: Uuid,
    response: ComplaintResponse,
  ) -> Result<()> {
    let id_str = encode_uuid(complaint_id);
    let entry  = serde_json::to_value(&response).map_err(Error::Json)?;

    // Read-modify-write of the embedded array happens inside a single
    // connection call, so concurrent appends cannot interleave.
    let updated: bool = self
      .conn
      .call(move |conn| {
        let existing: Option<String> = conn
          .query_row(
            "SELECT responses_json FROM complaints WHERE complaint_id = ?1",
            rusqlite::params![id_str],
            |row| row.get(0),
          )
          .optional()?;

        let Some(raw) = existing else {
          return Ok(false);
        };

        let mut entries: serde_json::Value = serde_json::from_str(&raw)
          .map_err(|e| tokio_rusqlite::Error::Other(Box::new(e)))?;
        entries
          .as_array_mut()
          .ok_or_else(|| {
            tokio_rusqlite::Error::Other("responses_json is not an array".into())
          })?
          .push(entry);

        conn.execute(
          "UPDATE complaints SET responses_json = ?1 WHERE complaint_id = ?2",
          rusqlite::params![entries.to_string(), id_str],
        )?;
        Ok(true)
      })
      .await?;

    if !updated {
      return Err(Error::ComplaintNotFound(complaint_id));
    }
    Ok(())
  }
}
