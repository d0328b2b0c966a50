use serde::Deserialize;

use crate::validation::{ValidationErrors, max_chars, required};

const NAME_MAX: usize = 100;

#[derive(Debug, Default, Clone, Deserialize)]
pub struct ReviewForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub comment: String,
}

/// Trimmed, non-empty review input.
#[derive(Debug, Clone, PartialEq)]
pub struct ReviewRequest {
    pub name: String,
    pub comment: String,
}

impl ReviewRequest {
    pub fn parse(form: &ReviewForm) -> Result<Self, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let name = required(&mut errors, "name", &form.name);
        max_chars(&mut errors, "name", &name, NAME_MAX);
        let comment = required(&mut errors, "comment", &form.comment);
        errors.finish(Self { name, comment })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::Violation;

    #[test]
    fn whitespace_only_fields_are_missing() {
        let err = ReviewRequest::parse(&ReviewForm {
            name: "   ".into(),
            comment: "\n\t".into(),
        })
        .unwrap_err();
        assert_eq!(
            err.violations(),
            &[Violation::Required("name"), Violation::Required("comment")]
        );
    }

    #[test]
    fn trims_before_storing() {
        let req = ReviewRequest::parse(&ReviewForm {
            name: "  John Doe ".into(),
            comment: " Excellent service! ".into(),
        })
        .unwrap();
        assert_eq!(req.name, "John Doe");
        assert_eq!(req.comment, "Excellent service!");
    }
}
