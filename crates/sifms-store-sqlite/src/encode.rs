//! Encoding and decoding helpers between Rust domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Timestamps are stored as RFC 3339 strings, UUIDs as hyphenated lowercase
//! strings, the embedded response list as compact JSON.

use chrono::{DateTime, Utc};
use sifms_core::{
  complaint::{Complaint, ComplaintResponse, ProfileSnapshot},
  person::{Gender, Person, Role},
};
use uuid::Uuid;

use crate::{Error, Result};

// ─── Uuid ─────────────────────────────────────────────────────────────────────

pub fn encode_uuid(id: Uuid) -> String { id.hyphenated().to_string() }

pub fn decode_uuid(s: &str) -> Result<Uuid> { Ok(Uuid::parse_str(s)?) }

// ─── DateTime<Utc> ────────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── Gender / Role ────────────────────────────────────────────────────────────

pub fn decode_gender(s: &str) -> Result<Gender> {
  Gender::parse(s).ok_or_else(|| sifms_core::Error::UnknownGender(s.to_owned()).into())
}

pub fn decode_role(s: &str) -> Result<Role> {
  Role::parse(s).ok_or_else(|| sifms_core::Error::UnknownRole(s.to_owned()).into())
}

// ─── Responses ────────────────────────────────────────────────────────────────

pub fn encode_responses(responses: &[ComplaintResponse]) -> Result<String> {
  Ok(serde_json::to_string(responses)?)
}

pub fn decode_responses(s: &str) -> Result<Vec<ComplaintResponse>> {
  Ok(serde_json::from_str(s)?)
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Raw strings read directly from a `persons` row.
pub struct RawPerson {
  pub person_id:     String,
  pub reg_no:        String,
  pub surname:       String,
  pub first_name:    String,
  pub other_names:   String,
  pub department:    String,
  pub faculty:       String,
  pub phone_number:  String,
  pub gender:        String,
  pub role:          String,
  pub password_hash: String,
}

impl RawPerson {
  pub fn into_person(self) -> Result<Person> {
    Ok(Person {
      person_id:     decode_uuid(&self.person_id)?,
      reg_no:        self.reg_no,
      surname:       self.surname,
      first_name:    self.first_name,
      other_names:   self.other_names,
      department:    self.department,
      faculty:       self.faculty,
      phone_number:  self.phone_number,
      gender:        decode_gender(&self.gender)?,
      role:          decode_role(&self.role)?,
      password_hash: self.password_hash,
    })
  }
}

/// Raw strings read directly from a `complaints` row.
pub struct RawComplaint {
  pub complaint_id:   String,
  pub student_reg_no: String,
  pub surname:        String,
  pub first_name:     String,
  pub other_names:    String,
  pub department:     String,
  pub faculty:        String,
  pub phone_number:   String,
  pub gender:         String,
  pub role:           String,
  pub complaint:      String,
  pub submitted_at:   String,
  pub responses_json: String,
}

impl RawComplaint {
  pub fn into_complaint(self) -> Result<Complaint> {
    Ok(Complaint {
      complaint_id:   decode_uuid(&self.complaint_id)?,
      student_reg_no: self.student_reg_no,
      student:        ProfileSnapshot {
        surname:      self.surname,
        first_name:   self.first_name,
        other_names:  self.other_names,
        department:   self.department,
        faculty:      self.faculty,
        phone_number: self.phone_number,
        gender:       decode_gender(&self.gender)?,
        role:         decode_role(&self.role)?,
      },
      text:           self.complaint,
      submitted_at:   decode_dt(&self.submitted_at)?,
      responses:      decode_responses(&self.responses_json)?,
    })
  }
}
