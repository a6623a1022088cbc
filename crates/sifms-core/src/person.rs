//! Person — a registered student or department officer.
//!
//! Persons live in the directory collection and are created only by
//! registration. There are no update or delete operations; the profile a
//! person registers with is the profile they keep.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::normalize::full_name;

/// Gender as accepted by registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
  Male,
  Female,
}

impl Gender {
  /// Parse an already trimmed, lower-cased value.
  pub fn parse(value: &str) -> Option<Self> {
    match value {
      "male"   => Some(Self::Male),
      "female" => Some(Self::Female),
      _        => None,
    }
  }

  pub fn as_str(self) -> &'static str {
    match self {
      Self::Male   => "male",
      Self::Female => "female",
    }
  }
}

/// Role, gating who may respond to or list complaints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
  Doi,
  Student,
}

impl Role {
  /// Parse an already trimmed, lower-cased value.
  pub fn parse(value: &str) -> Option<Self> {
    match value {
      "doi"     => Some(Self::Doi),
      "student" => Some(Self::Student),
      _         => None,
    }
  }

  pub fn as_str(self) -> &'static str {
    match self {
      Self::Doi     => "doi",
      Self::Student => "student",
    }
  }
}

/// A registered person, as stored in the directory.
///
/// All string fields are held in normalized form: `reg_no` upper-cased, the
/// name/department/faculty fields title-cased, `other_names` empty when the
/// person registered without one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Person {
  pub person_id:     Uuid,
  pub reg_no:        String,
  pub surname:       String,
  pub first_name:    String,
  pub other_names:   String,
  pub department:    String,
  pub faculty:       String,
  pub phone_number:  String,
  pub gender:        Gender,
  pub role:          Role,
  /// Argon2 PHC string. Plaintext is never persisted.
  pub password_hash: String,
}

impl Person {
  /// Surname, first name and other names joined with single spaces.
  pub fn full_name(&self) -> String {
    full_name(&self.surname, &self.first_name, &self.other_names)
  }

  /// Short display name used when attributing a complaint response.
  pub fn display_name(&self) -> String {
    full_name(&self.surname, &self.first_name, "")
  }
}

/// Input for [`crate::store::SifmsStore::add_person`]. Fields are expected to
/// be normalized and the password already hashed; the store assigns the UUID.
#[derive(Debug, Clone)]
pub struct NewPerson {
  pub reg_no:        String,
  pub surname:       String,
  pub first_name:    String,
  pub other_names:   String,
  pub department:    String,
  pub faculty:       String,
  pub phone_number:  String,
  pub gender:        Gender,
  pub role:          Role,
  pub password_hash: String,
}

#[cfg(test)]
mod tests {
  use super::*;

  fn person(other_names: &str) -> Person {
    Person {
      person_id:     Uuid::new_v4(),
      reg_no:        "CS/2020/001".to_string(),
      surname:       "Okafor".to_string(),
      first_name:    "Ada".to_string(),
      other_names:   other_names.to_string(),
      department:    "Computer Science".to_string(),
      faculty:       "Physical Sciences".to_string(),
      phone_number:  "08000000001".to_string(),
      gender:        Gender::Female,
      role:          Role::Student,
      password_hash: "$argon2id$stub".to_string(),
    }
  }

  #[test]
  fn full_name_includes_other_names() {
    assert_eq!(person("Ngozi").full_name(), "Okafor Ada Ngozi");
  }

  #[test]
  fn full_name_skips_empty_other_names() {
    assert_eq!(person("").full_name(), "Okafor Ada");
  }

  #[test]
  fn display_name_is_surname_and_first_name() {
    assert_eq!(person("Ngozi").display_name(), "Okafor Ada");
  }

  #[test]
  fn gender_and_role_parse_only_known_values() {
    assert_eq!(Gender::parse("male"), Some(Gender::Male));
    assert_eq!(Gender::parse("Male"), None);
    assert_eq!(Gender::parse("other"), None);
    assert_eq!(Role::parse("doi"), Some(Role::Doi));
    assert_eq!(Role::parse("student"), Some(Role::Student));
    assert_eq!(Role::parse("admin"), None);
  }
}
