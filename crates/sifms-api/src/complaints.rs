//! Handlers for the complaint workflow.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `POST` | `/api/v1/sifms/complaint` | submit a complaint |
//! | `POST` | `/api/v1/sifms/respond/complaint` | DOI only |
//! | `GET`  | `/api/v1/sifms/student/complaints` | `?reg_no=…` |
//! | `POST` | `/api/v1/sifms/all/complaints` | DOI only |

use std::sync::Arc;

use axum::{
  extract::{Query, State},
  Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

use sifms_core::{
  complaint::{Complaint, ComplaintResponse, NewComplaint},
  person::Role,
  store::SifmsStore,
};

use crate::{
  error::{require, store_err, ApiError},
  response::Envelope,
};

const STUDENT_NOT_FOUND: &str = "No student found with the provided registration number";

// ─── Submit ──────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct SubmitBody {
  pub reg_no:    Option<String>,
  pub complaint: Option<String>,
}

/// `POST /api/v1/sifms/complaint`
pub async fn submit<S>(
  State(store): State<Arc<S>>,
  Json(body): Json<SubmitBody>,
) -> Result<Envelope, ApiError>
where
  S: SifmsStore,
{
  let reg_no = require(body.reg_no, "Registration number is required")?
    .trim()
    .to_uppercase();
  let text = require(body.complaint, "Complaint text is required")?
    .trim()
    .to_string();

  let Some(person) = store.find_person(&reg_no).await.map_err(store_err)? else {
    return Err(ApiError::NotFound(STUDENT_NOT_FOUND.to_string()));
  };

  // Byte-identical text from the same student is a duplicate; different
  // text is a new complaint record.
  if store
    .complaint_exists(&reg_no, &text)
    .await
    .map_err(store_err)?
  {
    return Err(ApiError::Conflict(
      "You have already submitted this exact complaint".to_string(),
    ));
  }

  let complaint = store
    .add_complaint(NewComplaint::from_person(&person, text))
    .await
    .map_err(store_err)?;

  Envelope::success(
    "Complaint submitted successfully",
    json!({
      "complaint_id": complaint.complaint_id,
      "reg_no":       complaint.student_reg_no,
      "complaint":    complaint.text,
    }),
  )
}

// ─── Respond ─────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct RespondBody {
  pub doi_reg_no:       Option<String>,
  pub student_reg_no:   Option<String>,
  pub response_message: Option<String>,
}

/// `POST /api/v1/sifms/respond/complaint`
///
/// The response target is the student's first complaint in store order. A
/// student with several complaints only ever collects responses on the first
/// one under this contract.
pub async fn respond<S>(
  State(store): State<Arc<S>>,
  Json(body): Json<RespondBody>,
) -> Result<Envelope, ApiError>
where
  S: SifmsStore,
{
  let doi_reg_no = require(body.doi_reg_no, "DOI registration number is required")?
    .trim()
    .to_uppercase();
  let student_reg_no =
    require(body.student_reg_no, "Student registration number is required")?
      .trim()
      .to_uppercase();
  let message = require(body.response_message, "Response message is required")?
    .trim()
    .to_string();

  let Some(doi) = store.find_person(&doi_reg_no).await.map_err(store_err)? else {
    return Err(ApiError::NotFound("DOI not found".to_string()));
  };
  if doi.role != Role::Doi {
    return Err(ApiError::Authorization(
      "Only DOI can respond to complaints".to_string(),
    ));
  }

  if store
    .find_person(&student_reg_no)
    .await
    .map_err(store_err)?
    .is_none()
  {
    return Err(ApiError::NotFound("Student not found".to_string()));
  }

  let Some(complaint) = store
    .first_complaint_for(&student_reg_no)
    .await
    .map_err(store_err)?
  else {
    return Err(ApiError::NotFound(
      "No complaint found for this student".to_string(),
    ));
  };

  let response = ComplaintResponse {
    doi_reg_no:       doi.reg_no.clone(),
    doi_name:         doi.display_name(),
    response_message: message,
    response_time:    Utc::now(),
  };

  store
    .append_response(complaint.complaint_id, response.clone())
    .await
    .map_err(store_err)?;

  Envelope::success("Response added successfully", &response)
}

// ─── Own complaints ──────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct OwnComplaintsParams {
  pub reg_no: Option<String>,
}

/// One of the student's own complaints, reduced for listing.
#[derive(Debug, Serialize)]
struct StudentComplaintView {
  complaint_id: Uuid,
  complaint:    String,
  timestamp:    DateTime<Utc>,
  responses:    Vec<ComplaintResponse>,
}

impl StudentComplaintView {
  fn from_complaint(c: Complaint) -> Self {
    Self {
      complaint_id: c.complaint_id,
      complaint:    c.text,
      timestamp:    c.submitted_at,
      responses:    c.responses,
    }
  }
}

/// `GET /api/v1/sifms/student/complaints?reg_no=…`
pub async fn own<S>(
  State(store): State<Arc<S>>,
  Query(params): Query<OwnComplaintsParams>,
) -> Result<Envelope, ApiError>
where
  S: SifmsStore,
{
  let reg_no = require(params.reg_no, "Registration number is required")?
    .trim()
    .to_uppercase();

  if store
    .find_person(&reg_no)
    .await
    .map_err(store_err)?
    .is_none()
  {
    return Err(ApiError::NotFound(STUDENT_NOT_FOUND.to_string()));
  }

  let complaints = store.complaints_for(&reg_no).await.map_err(store_err)?;

  if complaints.is_empty() {
    // Having no complaints is a success, not an error.
    return Envelope::success("No complaints found for this student", json!([]));
  }

  let views: Vec<StudentComplaintView> = complaints
    .into_iter()
    .map(StudentComplaintView::from_complaint)
    .collect();

  Envelope::success_list("Complaints retrieved successfully", views.len(), views)
}

// ─── All complaints ──────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct AllComplaintsBody {
  pub reg_no: Option<String>,
}

/// A complaint as shown to a DOI, with the snapshot display name.
#[derive(Debug, Serialize)]
struct LedgerComplaintView {
  complaint_id:   Uuid,
  student_reg_no: String,
  student_name:   String,
  complaint:      String,
  timestamp:      DateTime<Utc>,
  responses:      Vec<ComplaintResponse>,
}

impl LedgerComplaintView {
  fn from_complaint(c: Complaint) -> Self {
    Self {
      complaint_id:   c.complaint_id,
      student_reg_no: c.student_reg_no,
      student_name:   c.student.display_name(),
      complaint:      c.text,
      timestamp:      c.submitted_at,
      responses:      c.responses,
    }
  }
}

/// `POST /api/v1/sifms/all/complaints` — caller must be a DOI.
pub async fn all<S>(
  State(store): State<Arc<S>>,
  Json(body): Json<AllComplaintsBody>,
) -> Result<Envelope, ApiError>
where
  S: SifmsStore,
{
  let reg_no = require(body.reg_no, "Registration number is required")?
    .trim()
    .to_uppercase();

  let Some(caller) = store.find_person(&reg_no).await.map_err(store_err)? else {
    return Err(ApiError::NotFound(
      "No user found with the provided registration number".to_string(),
    ));
  };
  if caller.role != Role::Doi {
    return Err(ApiError::Authorization(
      "Access denied. Only DOI can view all complaints.".to_string(),
    ));
  }

  let complaints = store.all_complaints().await.map_err(store_err)?;

  if complaints.is_empty() {
    return Envelope::success("No complaints found in the system", json!([]));
  }

  let views: Vec<LedgerComplaintView> = complaints
    .into_iter()
    .map(LedgerComplaintView::from_complaint)
    .collect();

  Envelope::success_list("All complaints retrieved successfully", views.len(), views)
}
