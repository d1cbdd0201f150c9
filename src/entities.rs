mod bot_user;
mod download;
mod link;
mod media;
mod update;
mod user_download;

pub use bot_user::BotUser;
pub use download::{DownloadRecord, DownloadStats};
pub use link::{ParsedLink, SourceChat};
pub use media::MediaDescriptor;
pub use update::{IncomingMessage, WebhookUpdate};
pub use user_download::UserDownload;
