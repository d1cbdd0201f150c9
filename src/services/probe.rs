use reqwest::Client;
use std::time::Duration;
use tracing::{debug, instrument};

use super::{FetchErrorKind, FetchMedia};
use crate::{
    entities::{MediaDescriptor, ParsedLink},
    value_objects::MediaType,
};

const PLACEHOLDER_THUMBNAIL: &str = "https://images.unsplash.com/photo-1611162617474-5b21e879e113?w=400";
const PLACEHOLDER_SIZE: i64 = 1_024_000;

/// Fetch strategy of the request façade.
///
/// Only checks that the Bot API accepts the token and then describes the post
/// with placeholder data: the Bot API can't read arbitrary channel posts anonymously,
/// so no real content is resolved here.
pub struct ProbeFetcher {
    client: Client,
    api_url: Box<str>,
    token: Box<str>,
    timeout: Duration,
}

impl ProbeFetcher {
    pub fn new(client: Client, api_url: &str, token: &str, timeout: f32) -> Self {
        Self {
            client,
            api_url: api_url.trim_end_matches('/').into(),
            token: token.into(),
            timeout: Duration::from_secs_f32(timeout),
        }
    }
}

impl FetchMedia for ProbeFetcher {
    #[instrument(skip_all, fields(channel = %link.channel, message_id = link.message_id))]
    async fn fetch(&self, link: &ParsedLink) -> Result<MediaDescriptor, FetchErrorKind> {
        let response = self
            .client
            .get(format!("{api_url}/bot{token}/getMe", api_url = self.api_url, token = self.token))
            .timeout(self.timeout)
            .send()
            .await
            .map_err(reqwest::Error::without_url)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchErrorKind::Status(status.as_u16()));
        }
        debug!("Bot API reachable");

        Ok(placeholder_descriptor(link))
    }
}

pub fn placeholder_descriptor(link: &ParsedLink) -> MediaDescriptor {
    MediaDescriptor {
        media_type: MediaType::Video,
        title: format!("Медиа из {}", link.channel),
        file_reference: link.public_url(),
        file_size: Some(PLACEHOLDER_SIZE),
        thumbnail: Some(PLACEHOLDER_THUMBNAIL.to_owned()),
        duration: None,
    }
}
