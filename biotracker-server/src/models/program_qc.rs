//! Program QC payloads

use serde::Deserialize;

use super::validation::{optional_text, required_text, Validate, ValidationError};

pub const MAX_PROGRAM_NAME_LEN: usize = 255;
pub const MAX_STATUS_LEN: usize = 50;
pub const MAX_PERSON_LEN: usize = 100;

/// POST /program_qc body
#[derive(Debug, Clone, Deserialize)]
pub struct NewProgramQc {
    pub program_name: String,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub assignee: Option<String>,
    #[serde(default)]
    pub reviewer: Option<String>,
    #[serde(default)]
    pub deliverable_id: Option<i64>,
}

impl Validate for NewProgramQc {
    fn validate(&self) -> Result<(), ValidationError> {
        required_text("program_name", &self.program_name, MAX_PROGRAM_NAME_LEN)?;
        optional_text("status", self.status.as_deref(), MAX_STATUS_LEN)?;
        optional_text("assignee", self.assignee.as_deref(), MAX_PERSON_LEN)?;
        optional_text("reviewer", self.reviewer.as_deref(), MAX_PERSON_LEN)
    }
}

/// PATCH /program_qc/{id} body. Absent or null fields keep their value.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProgramQcChanges {
    #[serde(default)]
    pub program_name: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub assignee: Option<String>,
    #[serde(default)]
    pub reviewer: Option<String>,
    #[serde(default)]
    pub deliverable_id: Option<i64>,
}

impl Validate for ProgramQcChanges {
    fn validate(&self) -> Result<(), ValidationError> {
        if let Some(name) = &self.program_name {
            required_text("program_name", name, MAX_PROGRAM_NAME_LEN)?;
        }
        optional_text("status", self.status.as_deref(), MAX_STATUS_LEN)?;
        optional_text("assignee", self.assignee.as_deref(), MAX_PERSON_LEN)?;
        optional_text("reviewer", self.reviewer.as_deref(), MAX_PERSON_LEN)
    }
}
