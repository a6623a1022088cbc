//! Complaint — a student's submission, with its embedded responses.
//!
//! A complaint carries a denormalized snapshot of the submitting student's
//! profile taken at submission time. The snapshot is deliberate audit-trail
//! design and is never re-synced if the profile later changes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::person::{Gender, Person, Role};

/// Profile fields copied into a complaint at submission time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileSnapshot {
  pub surname:      String,
  pub first_name:   String,
  pub other_names:  String,
  pub department:   String,
  pub faculty:      String,
  pub phone_number: String,
  pub gender:       Gender,
  pub role:         Role,
}

impl ProfileSnapshot {
  pub fn of(person: &Person) -> Self {
    Self {
      surname:      person.surname.clone(),
      first_name:   person.first_name.clone(),
      other_names:  person.other_names.clone(),
      department:   person.department.clone(),
      faculty:      person.faculty.clone(),
      phone_number: person.phone_number.clone(),
      gender:       person.gender,
      role:         person.role,
    }
  }

  /// Display name of the student as captured at submission time.
  pub fn display_name(&self) -> String {
    crate::normalize::full_name(&self.surname, &self.first_name, "")
  }
}

/// A response appended to a complaint by a department officer.
///
/// Responses are embedded in their complaint, never standalone, and are
/// append-only: created by the respond operation, never edited or removed.
/// Field names match the wire format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplaintResponse {
  pub doi_reg_no:       String,
  /// Denormalized author display name, captured when the response is made.
  pub doi_name:         String,
  pub response_message: String,
  pub response_time:    DateTime<Utc>,
}

/// A complaint in the ledger.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Complaint {
  pub complaint_id:   Uuid,
  pub student_reg_no: String,
  pub student:        ProfileSnapshot,
  pub text:           String,
  pub submitted_at:   DateTime<Utc>,
  pub responses:      Vec<ComplaintResponse>,
}

/// Input for [`crate::store::SifmsStore::add_complaint`]. The store assigns
/// the UUID and submission timestamp and starts the response list empty.
#[derive(Debug, Clone)]
pub struct NewComplaint {
  pub student_reg_no: String,
  pub student:        ProfileSnapshot,
  pub text:           String,
}

impl NewComplaint {
  pub fn from_person(person: &Person, text: String) -> Self {
    Self {
      student_reg_no: person.reg_no.clone(),
      student:        ProfileSnapshot::of(person),
      text,
    }
  }
}
