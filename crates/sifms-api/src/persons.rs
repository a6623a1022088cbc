//! Handlers for registration and login.
//!
//! | Method | Path | Body |
//! |--------|------|------|
//! | `POST` | `/api/v1/sifms/register/student` | profile fields + password |
//! | `POST` | `/api/v1/sifms/login` | `reg_no`, `password` |

use std::sync::Arc;

use axum::{extract::State, Json};
use serde::Deserialize;
use serde_json::json;

use sifms_core::{
  normalize::title_case,
  person::{Gender, NewPerson, Role},
  store::SifmsStore,
};

use crate::{
  auth,
  error::{require, store_err, ApiError},
  response::Envelope,
};

/// Shared by both login failure paths so an attacker cannot tell an unknown
/// registration number from a wrong password.
const INVALID_LOGIN: &str = "Invalid registration number or password";

// ─── Register ────────────────────────────────────────────────────────────────

/// All fields optional at the deserialization layer; each handler rejects a
/// missing required field with its own message, keeping the envelope uniform.
#[derive(Debug, Deserialize)]
pub struct RegisterBody {
  pub surname:      Option<String>,
  pub first_name:   Option<String>,
  pub other_names:  Option<String>,
  pub reg_no:       Option<String>,
  pub department:   Option<String>,
  pub faculty:      Option<String>,
  pub phone_number: Option<String>,
  pub gender:       Option<String>,
  pub role:         Option<String>,
  pub password:     Option<String>,
}

/// `POST /api/v1/sifms/register/student`
pub async fn register<S>(
  State(store): State<Arc<S>>,
  Json(body): Json<RegisterBody>,
) -> Result<Envelope, ApiError>
where
  S: SifmsStore,
{
  let surname    = title_case(require(body.surname, "Surname is required")?.trim());
  let first_name = title_case(require(body.first_name, "First name is required")?.trim());
  let other_names = body
    .other_names
    .as_deref()
    .map(str::trim)
    .map(title_case)
    .unwrap_or_default();
  let reg_no     = require(body.reg_no, "Registration number is required")?
    .trim()
    .to_uppercase();
  let department = title_case(require(body.department, "Department is required")?.trim());
  let faculty    = title_case(require(body.faculty, "Faculty is required")?.trim());
  let phone_number = require(body.phone_number, "Phone number is required")?
    .trim()
    .to_string();
  let gender_raw = require(body.gender, "Gender is required")?
    .trim()
    .to_lowercase();
  let role_raw = require(body.role, "Role is required (DOI or Student)")?
    .trim()
    .to_lowercase();
  let password = require(body.password, "Password is required")?
    .trim()
    .to_string();

  // Validation order is contractual: gender, then role, then password.
  let gender = Gender::parse(&gender_raw).ok_or_else(|| {
    ApiError::Validation("Gender must be either 'male' or 'female'".to_string())
  })?;
  let role = Role::parse(&role_raw).ok_or_else(|| {
    ApiError::Validation("Role must be either 'DOI' or 'Student'".to_string())
  })?;
  if password.chars().count() < 6 {
    return Err(ApiError::Validation(
      "Password must be at least 6 characters long".to_string(),
    ));
  }

  if store
    .person_conflict(&reg_no, &phone_number)
    .await
    .map_err(store_err)?
  {
    return Err(ApiError::Conflict(
      "Student with this registration number or phone number already exists"
        .to_string(),
    ));
  }

  let password_hash = auth::hash_password(&password)?;

  let person = store
    .add_person(NewPerson {
      reg_no,
      surname,
      first_name,
      other_names,
      department,
      faculty,
      phone_number,
      gender,
      role,
      password_hash,
    })
    .await
    .map_err(store_err)?;

  Envelope::success(
    "Student registered successfully",
    json!({
      "id":           person.person_id,
      "surname":      person.surname,
      "first_name":   person.first_name,
      "other_names":  person.other_names,
      "reg_no":       person.reg_no,
      "department":   person.department,
      "faculty":      person.faculty,
      "phone_number": person.phone_number,
      "gender":       person.gender,
      "role":         person.role,
    }),
  )
}

// ─── Login ───────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct LoginBody {
  pub reg_no:   Option<String>,
  pub password: Option<String>,
}

/// `POST /api/v1/sifms/login`
pub async fn login<S>(
  State(store): State<Arc<S>>,
  Json(body): Json<LoginBody>,
) -> Result<Envelope, ApiError>
where
  S: SifmsStore,
{
  let reg_no = require(body.reg_no, "Registration number is required")?
    .trim()
    .to_uppercase();
  let password = require(body.password, "Password is required")?
    .trim()
    .to_string();

  let Some(person) = store.find_person(&reg_no).await.map_err(store_err)? else {
    return Err(ApiError::Validation(INVALID_LOGIN.to_string()));
  };

  if !auth::verify_password(&password, &person.password_hash) {
    return Err(ApiError::Validation(INVALID_LOGIN.to_string()));
  }

  Envelope::success(
    "Login successful",
    json!({
      "full_name":    person.full_name(),
      "reg_no":       person.reg_no,
      "surname":      person.surname,
      "first_name":   person.first_name,
      "other_names":  person.other_names,
      "department":   person.department,
      "faculty":      person.faculty,
      "phone_number": person.phone_number,
      "gender":       person.gender,
      "role":         person.role,
    }),
  )
}
