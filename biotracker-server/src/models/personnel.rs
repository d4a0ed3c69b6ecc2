//! Personnel payloads

use serde::Deserialize;

use super::patch::deserialize_some;
use super::validation::{optional_text, Validate, ValidationError};

pub const MAX_NAME_LEN: usize = 255;
pub const MAX_STATUS_LEN: usize = 50;

/// POST /personnel body. Every column is optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewPersonnel {
    #[serde(default)]
    pub member_id: Option<i64>,
    #[serde(default)]
    pub preferred_name: Option<String>,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

impl Validate for NewPersonnel {
    fn validate(&self) -> Result<(), ValidationError> {
        optional_text("preferred_name", self.preferred_name.as_deref(), MAX_NAME_LEN)?;
        optional_text("full_name", self.full_name.as_deref(), MAX_NAME_LEN)?;
        optional_text("status", self.status.as_deref(), MAX_STATUS_LEN)
    }
}

/// PATCH /personnel/{id} body.
///
/// Only fields present in the JSON change. `null` clears the column.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PersonnelChanges {
    #[serde(default, deserialize_with = "deserialize_some")]
    pub member_id: Option<Option<i64>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub preferred_name: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub full_name: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub status: Option<Option<String>>,
}

impl PersonnelChanges {
    pub fn is_empty(&self) -> bool {
        self.member_id.is_none()
            && self.preferred_name.is_none()
            && self.full_name.is_none()
            && self.status.is_none()
    }
}

impl Validate for PersonnelChanges {
    fn validate(&self) -> Result<(), ValidationError> {
        optional_text(
            "preferred_name",
            self.preferred_name.as_ref().and_then(|v| v.as_deref()),
            MAX_NAME_LEN,
        )?;
        optional_text(
            "full_name",
            self.full_name.as_ref().and_then(|v| v.as_deref()),
            MAX_NAME_LEN,
        )?;
        optional_text(
            "status",
            self.status.as_ref().and_then(|v| v.as_deref()),
            MAX_STATUS_LEN,
        )
    }
}
