//! Domain entity definitions.

mod account;
mod media;
mod notification;
mod status;
mod token;

pub use account::{Account, AccountId};
pub use media::{AttachmentKind, CompressedImage, MediaAttachment, MediaId};
pub use notification::{Notification, NotificationId, NotificationKind};
pub use status::{ReplyTarget, Status, StatusId, Visibility};
pub use token::AccessToken;
