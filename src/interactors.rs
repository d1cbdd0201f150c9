pub mod base;
pub mod bot_user;
pub mod downloads;
pub mod get_media;

pub use base::Interactor;
pub use bot_user::{GetUserStats, GetUserStatsInput, SaveBotUser, SaveBotUserInput};
pub use downloads::{GetDownloadsOverview, GetDownloadsOverviewInput};
pub use get_media::{GetMedia, GetMediaErrorKind, GetMediaInput, MediaOutcome};
