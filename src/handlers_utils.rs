pub mod command;
pub mod reply;
pub mod texts;

pub use command::{ChatRequest, Command};
pub use reply::{send_text, MediaReply};
