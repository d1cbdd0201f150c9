mod error;
mod format;
mod link;

pub use error::{format_error_report, hide_token};
pub use format::{format_date, format_file_size, format_optional_file_size};
pub use link::{find_telegram_link, is_telegram_link, parse_link, ErrorKind as ParseLinkErrorKind};
