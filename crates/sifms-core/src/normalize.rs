//! Input normalization applied before anything touches the store.
//!
//! Registration title-cases names and upper-cases registration numbers so
//! that lookups are case-insensitive at the edge without needing collation
//! support from the store.

/// Title-case `input`: a letter that follows a non-letter is upper-cased,
/// every other letter is lower-cased. Non-letters pass through unchanged,
/// so `"o'brien"` becomes `"O'Brien"` and `"JOHN doe"` becomes `"John Doe"`.
pub fn title_case(input: &str) -> String {
  let mut out = String::with_capacity(input.len());
  let mut prev_alphabetic = false;
  for ch in input.chars() {
    if ch.is_alphabetic() {
      if prev_alphabetic {
        out.extend(ch.to_lowercase());
      } else {
        out.extend(ch.to_uppercase());
      }
      prev_alphabetic = true;
    } else {
      out.push(ch);
      prev_alphabetic = false;
    }
  }
  out
}

/// Join name parts with single spaces, skipping empty parts, so a missing
/// `other_names` never leaves trailing or doubled whitespace.
pub fn full_name(surname: &str, first_name: &str, other_names: &str) -> String {
  [surname, first_name, other_names]
    .iter()
    .map(|part| part.trim())
    .filter(|part| !part.is_empty())
    .collect::<Vec<_>>()
    .join(" ")
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn title_case_basic() {
    assert_eq!(title_case("computer science"), "Computer Science");
    assert_eq!(title_case("PHYSICAL SCIENCES"), "Physical Sciences");
  }

  #[test]
  fn title_case_restarts_after_non_letters() {
    assert_eq!(title_case("o'brien"), "O'Brien");
    assert_eq!(title_case("mary-jane"), "Mary-Jane");
  }

  #[test]
  fn title_case_empty() {
    assert_eq!(title_case(""), "");
  }

  #[test]
  fn full_name_collapses_whitespace() {
    assert_eq!(full_name("Okafor", "Ada", ""), "Okafor Ada");
    assert_eq!(full_name(" Okafor ", "Ada", " Ngozi "), "Okafor Ada Ngozi");
    assert_eq!(full_name("", "", ""), "");
  }
}
