pub mod bot_user;
pub mod download;
pub mod user_download;
