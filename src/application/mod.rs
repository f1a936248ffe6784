//! Application layer with use cases, services, and DTOs.

/// Data transfer objects.
pub mod dto;
/// Image and attachment services.
pub mod services;
/// Use case implementations.
pub mod use_cases;

pub use dto::{ImageFailure, ListenSummary, MentionReport};
pub use services::{AttachmentCollector, ImageCompressor, ImageDecoder};
pub use use_cases::{HandleMentionUseCase, ListenUseCase};
