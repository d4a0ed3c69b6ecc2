//! Request payloads and query types, validated before they reach the database
//!
//! Invalid input returns ValidationError, not panic.

pub mod validation;
pub mod pagination;
pub mod search;
pub mod patch;
pub mod deliverable;
pub mod program_qc;
pub mod qc_comment;
pub mod personnel;
pub mod toc;

pub use validation::{Validate, ValidationError};
pub use pagination::Pagination;
pub use search::SearchTerm;
pub use deliverable::{DeliverableChanges, NewDeliverable};
pub use program_qc::{NewProgramQc, ProgramQcChanges};
pub use qc_comment::{NewQcComment, QcCommentChanges};
pub use personnel::{NewPersonnel, PersonnelChanges};
pub use toc::TocKind;
