use telers::{methods::ForwardMessage, types::Message, Bot};
use tracing::{debug, instrument};

use super::{FetchErrorKind, FetchMedia};
use crate::{
    entities::{MediaDescriptor, ParsedLink, SourceChat},
    value_objects::MediaType,
};

/// Media the platform attached to a forwarded copy of a post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ForwardedMedia {
    Photo {
        file_id: Box<str>,
        file_size: Option<i64>,
    },
    Video {
        file_id: Box<str>,
        file_size: Option<i64>,
        duration: i64,
    },
    Document {
        file_id: Box<str>,
        file_name: Option<Box<str>>,
        file_size: Option<i64>,
    },
}

impl ForwardedMedia {
    /// Photos come in several sizes, the last one is the largest.
    pub fn from_message(message: &Message) -> Option<Self> {
        if let Some(photo) = message.photo().and_then(|sizes| sizes.last()) {
            return Some(Self::Photo {
                file_id: photo.file_id.clone(),
                file_size: photo.file_size,
            });
        }
        if let Some(video) = message.video() {
            return Some(Self::Video {
                file_id: video.file_id.clone(),
                file_size: video.file_size,
                duration: video.duration,
            });
        }
        if let Some(document) = message.document() {
            return Some(Self::Document {
                file_id: document.file_id.clone(),
                file_name: document.file_name.clone(),
                file_size: document.file_size,
            });
        }
        None
    }

    pub fn into_descriptor(self, channel: &str) -> MediaDescriptor {
        let (media_type, title, file_id, file_size, duration) = match self {
            Self::Photo { file_id, file_size } => (MediaType::Photo, format!("Фото из {channel}"), file_id, file_size, None),
            Self::Video {
                file_id,
                file_size,
                duration,
            } => (MediaType::Video, format!("Видео из {channel}"), file_id, file_size, Some(duration)),
            Self::Document {
                file_id,
                file_name,
                file_size,
            } => (
                MediaType::Document,
                file_name.map_or_else(|| format!("Файл из {channel}"), String::from),
                file_id,
                file_size,
                None,
            ),
        };

        MediaDescriptor {
            media_type,
            title,
            file_reference: file_id.into_string(),
            file_size,
            thumbnail: None,
            duration,
        }
    }
}

/// Fetch strategy of the chat façade: forwards the post into the requesting chat
/// and takes the media from the forwarded copy.
///
/// Needs the bot to be able to read the source channel.
pub struct ForwardFetcher<'a> {
    bot: &'a Bot,
    chat_id: i64,
    timeout: f32,
}

impl<'a> ForwardFetcher<'a> {
    pub const fn new(bot: &'a Bot, chat_id: i64, timeout: f32) -> Self {
        Self { bot, chat_id, timeout }
    }
}

impl FetchMedia for ForwardFetcher<'_> {
    #[instrument(skip_all, fields(source = %link.source, message_id = link.message_id))]
    async fn fetch(&self, link: &ParsedLink) -> Result<MediaDescriptor, FetchErrorKind> {
        let method = match &link.source {
            SourceChat::Id(id) => ForwardMessage::new(self.chat_id, *id, link.message_id),
            SourceChat::Username(_) => ForwardMessage::new(self.chat_id, link.source.to_string(), link.message_id),
        };
        let message = self.bot.send_with_timeout(method, self.timeout).await?;
        debug!("Post forwarded");

        let media = ForwardedMedia::from_message(&message).ok_or(FetchErrorKind::NoMedia)?;
        Ok(media.into_descriptor(&link.channel))
    }
}
