//! QC comment payloads

use serde::Deserialize;

use super::validation::{non_blank, required_text, Validate, ValidationError};

pub const MAX_AUTHOR_LEN: usize = 100;

/// POST /qc_comments body
#[derive(Debug, Clone, Deserialize)]
pub struct NewQcComment {
    pub program_qc_id: i64,
    pub author: String,
    pub comment_text: String,
    #[serde(default)]
    pub resolved: Option<bool>,
}

impl Validate for NewQcComment {
    fn validate(&self) -> Result<(), ValidationError> {
        required_text("author", &self.author, MAX_AUTHOR_LEN)?;
        non_blank("comment_text", &self.comment_text)
    }
}

/// PATCH /qc_comments/{id} body. Absent or null fields keep their value.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct QcCommentChanges {
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub comment_text: Option<String>,
    #[serde(default)]
    pub resolved: Option<bool>,
}

impl Validate for QcCommentChanges {
    fn validate(&self) -> Result<(), ValidationError> {
        if let Some(author) = &self.author {
            required_text("author", author, MAX_AUTHOR_LEN)?;
        }
        if let Some(text) = &self.comment_text {
            non_blank("comment_text", text)?;
        }
        Ok(())
    }
}
