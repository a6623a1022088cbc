//! The `SifmsStore` trait.
//!
//! The trait is implemented by storage backends (e.g. `sifms-store-sqlite`).
//! The HTTP layer (`sifms-api`) depends on this abstraction, not on any
//! concrete backend. It spans both collections: the person directory and the
//! complaint ledger.

use std::future::Future;

use uuid::Uuid;

use crate::{
  complaint::{Complaint, ComplaintResponse, NewComplaint},
  person::{NewPerson, Person},
};

/// Abstraction over a SIFMS storage backend.
///
/// Complaint responses are append-only; no method edits or removes a prior
/// response. "First" and listing order follow the backend's native insertion
/// order.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes (e.g. tokio with `axum`).
pub trait SifmsStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Person directory ──────────────────────────────────────────────────

  /// Persist a new person. The store assigns the UUID.
  ///
  /// Backends enforce uniqueness of `reg_no` and `phone_number`; a
  /// violating insert fails even if [`Self::person_conflict`] was checked
  /// first by a racing request.
  fn add_person(
    &self,
    input: NewPerson,
  ) -> impl Future<Output = Result<Person, Self::Error>> + Send + '_;

  /// Look up a person by normalized registration number.
  fn find_person<'a>(
    &'a self,
    reg_no: &'a str,
  ) -> impl Future<Output = Result<Option<Person>, Self::Error>> + Send + 'a;

  /// True if any person already holds this `reg_no` or this `phone_number`.
  fn person_conflict<'a>(
    &'a self,
    reg_no: &'a str,
    phone_number: &'a str,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + 'a;

  // ── Complaint ledger ──────────────────────────────────────────────────

  /// Persist a new complaint with an empty response list. The store assigns
  /// the UUID and the submission timestamp.
  fn add_complaint(
    &self,
    input: NewComplaint,
  ) -> impl Future<Output = Result<Complaint, Self::Error>> + Send + '_;

  /// True if this student already has a complaint with byte-identical text.
  fn complaint_exists<'a>(
    &'a self,
    reg_no: &'a str,
    text: &'a str,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + 'a;

  /// The student's first complaint in store order, if any. This is the
  /// response target of the respond operation.
  fn first_complaint_for<'a>(
    &'a self,
    reg_no: &'a str,
  ) -> impl Future<Output = Result<Option<Complaint>, Self::Error>> + Send + 'a;

  /// Every complaint filed by this student, in store order.
  fn complaints_for<'a>(
    &'a self,
    reg_no: &'a str,
  ) -> impl Future<Output = Result<Vec<Complaint>, Self::Error>> + Send + 'a;

  /// Every complaint in the ledger, in store order.
  fn all_complaints(
    &self,
  ) -> impl Future<Output = Result<Vec<Complaint>, Self::Error>> + Send + '_;

  /// Append one response to a complaint's response list.
  fn append_response(
    &self,
    complaint_id: Uuid,
    response: ComplaintResponse,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;
}
