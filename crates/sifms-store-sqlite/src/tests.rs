//! Integration tests for `SqliteStore` against an in-memory database.

use chrono::Utc;
use sifms_core::{
  complaint::{ComplaintResponse, NewComplaint, ProfileSnapshot},
  person::{Gender, NewPerson, Role},
  store::SifmsStore,
};
use uuid::Uuid;

use crate::{Error, SqliteStore};

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

fn new_person(reg_no: &str, phone: &str, role: Role) -> NewPerson {
  NewPerson {
    reg_no:        reg_no.to_string(),
    surname:       "Okafor".to_string(),
    first_name:    "Ada".to_string(),
    other_names:   String::new(),
    department:    "Computer Science".to_string(),
    faculty:       "Physical Sciences".to_string(),
    phone_number:  phone.to_string(),
    gender:        Gender::Female,
    role,
    password_hash: "$argon2id$stub".to_string(),
  }
}

fn snapshot() -> ProfileSnapshot {
  ProfileSnapshot {
    surname:      "Okafor".to_string(),
    first_name:   "Ada".to_string(),
    other_names:  String::new(),
    department:   "Computer Science".to_string(),
    faculty:      "Physical Sciences".to_string(),
    phone_number: "08000000001".to_string(),
    gender:       Gender::Female,
    role:         Role::Student,
  }
}

fn new_complaint(reg_no: &str, text: &str) -> NewComplaint {
  NewComplaint {
    student_reg_no: reg_no.to_string(),
    student:        snapshot(),
    text:           text.to_string(),
  }
}

fn response(doi_reg_no: &str, message: &str) -> ComplaintResponse {
  ComplaintResponse {
    doi_reg_no:       doi_reg_no.to_string(),
    doi_name:         "Bello Musa".to_string(),
    response_message: message.to_string(),
    response_time:    Utc::now(),
  }
}

// ─── Persons ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn add_and_find_person() {
  let s = store().await;

  let person = s
    .add_person(new_person("CS/2020/001", "08000000001", Role::Student))
    .await
    .unwrap();

  let fetched = s.find_person("CS/2020/001").await.unwrap().unwrap();
  assert_eq!(fetched.person_id, person.person_id);
  assert_eq!(fetched.reg_no, "CS/2020/001");
  assert_eq!(fetched.gender, Gender::Female);
  assert_eq!(fetched.role, Role::Student);
  assert_eq!(fetched.password_hash, "$argon2id$stub");
}

#[tokio::test]
async fn find_person_missing_returns_none() {
  let s = store().await;
  assert!(s.find_person("CS/2020/404").await.unwrap().is_none());
}

#[tokio::test]
async fn person_conflict_matches_either_key() {
  let s = store().await;
  s.add_person(new_person("CS/2020/001", "08000000001", Role::Student))
    .await
    .unwrap();

  assert!(s.person_conflict("CS/2020/001", "08000000099").await.unwrap());
  assert!(s.person_conflict("CS/2020/099", "08000000001").await.unwrap());
  assert!(!s.person_conflict("CS/2020/099", "08000000099").await.unwrap());
}

#[tokio::test]
async fn duplicate_reg_no_insert_is_rejected_by_constraint() {
  let s = store().await;
  s.add_person(new_person("CS/2020/001", "08000000001", Role::Student))
    .await
    .unwrap();

  // Same reg_no, different phone: the UNIQUE constraint is the backstop
  // even when the application-level conflict check was skipped.
  let err = s
    .add_person(new_person("CS/2020/001", "08000000002", Role::Student))
    .await
    .unwrap_err();
  assert!(matches!(err, Error::DuplicatePerson), "got: {err}");
}

#[tokio::test]
async fn duplicate_phone_number_insert_is_rejected_by_constraint() {
  let s = store().await;
  s.add_person(new_person("CS/2020/001", "08000000001", Role::Student))
    .await
    .unwrap();

  let err = s
    .add_person(new_person("CS/2020/002", "08000000001", Role::Student))
    .await
    .unwrap_err();
  assert!(matches!(err, Error::DuplicatePerson), "got: {err}");
}

// ─── Complaints ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn add_complaint_starts_with_no_responses() {
  let s = store().await;
  let complaint = s
    .add_complaint(new_complaint("CS/2020/001", "No water in hostel B"))
    .await
    .unwrap();

  assert!(complaint.responses.is_empty());
  let fetched = s.first_complaint_for("CS/2020/001").await.unwrap().unwrap();
  assert_eq!(fetched.complaint_id, complaint.complaint_id);
  assert_eq!(fetched.text, "No water in hostel B");
  assert!(fetched.responses.is_empty());
}

#[tokio::test]
async fn complaint_exists_requires_exact_text() {
  let s = store().await;
  s.add_complaint(new_complaint("CS/2020/001", "No water in hostel B"))
    .await
    .unwrap();

  assert!(s
    .complaint_exists("CS/2020/001", "No water in hostel B")
    .await
    .unwrap());
  assert!(!s
    .complaint_exists("CS/2020/001", "no water in hostel b")
    .await
    .unwrap());
  assert!(!s
    .complaint_exists("CS/2020/002", "No water in hostel B")
    .await
    .unwrap());
}

#[tokio::test]
async fn identical_complaint_text_is_rejected_by_constraint() {
  let s = store().await;
  s.add_complaint(new_complaint("CS/2020/001", "No water in hostel B"))
    .await
    .unwrap();

  let err = s
    .add_complaint(new_complaint("CS/2020/001", "No water in hostel B"))
    .await
    .unwrap_err();
  assert!(matches!(err, Error::DuplicateComplaint), "got: {err}");

  // Different text from the same student is a separate record.
  s.add_complaint(new_complaint("CS/2020/001", "Broken projector in LT2"))
    .await
    .unwrap();
  assert_eq!(s.complaints_for("CS/2020/001").await.unwrap().len(), 2);
}

#[tokio::test]
async fn first_complaint_follows_insertion_order() {
  let s = store().await;
  let first = s
    .add_complaint(new_complaint("CS/2020/001", "First issue"))
    .await
    .unwrap();
  s.add_complaint(new_complaint("CS/2020/001", "Second issue"))
    .await
    .unwrap();

  let target = s.first_complaint_for("CS/2020/001").await.unwrap().unwrap();
  assert_eq!(target.complaint_id, first.complaint_id);
}

#[tokio::test]
async fn complaints_for_only_returns_that_student() {
  let s = store().await;
  s.add_complaint(new_complaint("CS/2020/001", "First issue"))
    .await
    .unwrap();
  s.add_complaint(new_complaint("CS/2020/002", "Other student's issue"))
    .await
    .unwrap();

  let mine = s.complaints_for("CS/2020/001").await.unwrap();
  assert_eq!(mine.len(), 1);
  assert_eq!(mine[0].student_reg_no, "CS/2020/001");

  assert_eq!(s.all_complaints().await.unwrap().len(), 2);
}

#[tokio::test]
async fn complaints_for_unknown_student_is_empty() {
  let s = store().await;
  assert!(s.complaints_for("CS/2020/404").await.unwrap().is_empty());
}

// ─── Responses ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn append_response_preserves_order() {
  let s = store().await;
  let complaint = s
    .add_complaint(new_complaint("CS/2020/001", "No water in hostel B"))
    .await
    .unwrap();

  let first  = response("DOI/001", "We are aware");
  let second = response("DOI/001", "Fixed today");
  s.append_response(complaint.complaint_id, first.clone())
    .await
    .unwrap();
  s.append_response(complaint.complaint_id, second.clone())
    .await
    .unwrap();

  let fetched = s.first_complaint_for("CS/2020/001").await.unwrap().unwrap();
  assert_eq!(fetched.responses.len(), 2);
  assert_eq!(fetched.responses[0].response_message, "We are aware");
  assert_eq!(fetched.responses[1].response_message, "Fixed today");
  assert_eq!(fetched.responses[0].doi_name, "Bello Musa");
}

#[tokio::test]
async fn append_response_unknown_complaint_errors() {
  let s = store().await;
  let err = s
    .append_response(Uuid::new_v4(), response("DOI/001", "hello"))
    .await
    .unwrap_err();
  assert!(matches!(err, Error::ComplaintNotFound(_)), "got: {err}");
}
