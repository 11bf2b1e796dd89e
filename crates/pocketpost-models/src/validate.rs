//! Store-level create validator.
//!
//! Deliberately generic: every record, post or profile or course, must carry
//! `course_name`, `course_code`, and an id before it is persisted. The
//! validator knows nothing about post-specific fields.

use thiserror::Error;

use crate::entry::{Entry, fields};

#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("Value for {0} expected!")]
    MissingField(&'static str),
}

pub fn validate_entry(entry: &Entry) -> Result<(), ValidationError> {
    if entry.get_text(fields::COURSE_NAME).is_none() {
        return Err(ValidationError::MissingField(fields::COURSE_NAME));
    }
    if entry.get_text(fields::COURSE_CODE).is_none() {
        return Err(ValidationError::MissingField(fields::COURSE_CODE));
    }
    if entry.id.trim().is_empty() {
        return Err(ValidationError::MissingField(fields::ID));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn each_required_field_is_named_in_order() {
        let mut entry = Entry::new("e-1");
        assert_eq!(
            validate_entry(&entry),
            Err(ValidationError::MissingField("course_name"))
        );

        entry.set(fields::COURSE_NAME, json!("Intro"));
        assert_eq!(
            validate_entry(&entry),
            Err(ValidationError::MissingField("course_code"))
        );

        entry.set(fields::COURSE_CODE, json!("CS101"));
        assert_eq!(validate_entry(&entry), Ok(()));

        let blank_id = Entry {
            id: " ".to_string(),
            fields: entry.fields.clone(),
        };
        assert_eq!(
            validate_entry(&blank_id),
            Err(ValidationError::MissingField("id"))
        );
    }

    #[test]
    fn error_message_matches_the_store_convention() {
        assert_eq!(
            ValidationError::MissingField("course_name").to_string(),
            "Value for course_name expected!"
        );
    }
}
