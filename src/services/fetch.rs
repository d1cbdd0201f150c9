use std::future::Future;
use telers::errors::SessionErrorKind;

use crate::entities::{MediaDescriptor, ParsedLink};

#[derive(Debug, thiserror::Error)]
pub enum FetchErrorKind {
    #[error("Bot API request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("Bot API responded with status {0}")]
    Status(u16),
    #[error(transparent)]
    Session(#[from] SessionErrorKind),
    #[error("Post has no photo, video or document")]
    NoMedia,
}

/// How a cache miss is resolved: each façade plugs in its own delivery strategy.
pub trait FetchMedia {
    fn fetch(&self, link: &ParsedLink) -> impl Future<Output = Result<MediaDescriptor, FetchErrorKind>> + Send;
}
