//! Use case implementations.

mod handle_mention_use_case;
mod listen_use_case;

pub use handle_mention_use_case::{ERROR_REPLY_PREFIX, HandleMentionUseCase, SUCCESS_REPLY_TEXT};
pub use listen_use_case::ListenUseCase;
