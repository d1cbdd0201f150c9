pub mod bot_user;
pub mod download;
pub mod user_download;

pub use bot_user::BotUserDao;
pub use download::DownloadDao;
pub use user_download::UserDownloadDao;
