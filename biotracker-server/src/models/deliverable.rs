//! Deliverable payloads

use serde::Deserialize;

use super::validation::{optional_text, required_text, Validate, ValidationError};

pub const MAX_NAME_LEN: usize = 255;
pub const MAX_STATUS_LEN: usize = 50;

/// POST /deliverables body
#[derive(Debug, Clone, Deserialize)]
pub struct NewDeliverable {
    pub name: String,
    #[serde(default)]
    pub status: Option<String>,
}

impl Validate for NewDeliverable {
    fn validate(&self) -> Result<(), ValidationError> {
        required_text("name", &self.name, MAX_NAME_LEN)?;
        optional_text("status", self.status.as_deref(), MAX_STATUS_LEN)
    }
}

/// PATCH /deliverables/{id} body. Absent or null fields are left alone.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DeliverableChanges {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

impl DeliverableChanges {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.status.is_none()
    }
}

impl Validate for DeliverableChanges {
    fn validate(&self) -> Result<(), ValidationError> {
        if let Some(name) = &self.name {
            required_text("name", name, MAX_NAME_LEN)?;
        }
        optional_text("status", self.status.as_deref(), MAX_STATUS_LEN)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_is_optional() {
        let payload: NewDeliverable = serde_json::from_str(r#"{"name": "CSR tables"}"#).unwrap();
        assert!(payload.validate().is_ok());
        assert!(payload.status.is_none());
    }

    #[test]
    fn rejects_empty_name() {
        let payload = NewDeliverable {
            name: String::new(),
            status: None,
        };
        assert_eq!(payload.validate(), Err(ValidationError::Empty { field: "name" }));
    }

    #[test]
    fn changes_reject_blank_name() {
        let changes = DeliverableChanges {
            name: Some(" ".into()),
            status: None,
        };
        assert!(changes.validate().is_err());
        assert!(DeliverableChanges::default().is_empty());
    }
}
