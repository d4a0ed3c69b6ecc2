//! Route handlers organized by resource

pub mod health;
pub mod deliverables;
pub mod program_qc;
pub mod qc_comments;
pub mod personnel;
pub mod toc;
pub mod specs;
