//! Data transfer objects for the application layer.

mod report_dto;

pub use report_dto::{ImageFailure, ListenSummary, MentionReport};
