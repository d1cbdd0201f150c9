mod api;
mod base;

pub mod database;

pub use api::ApiError;
pub use base::ErrorKind;
