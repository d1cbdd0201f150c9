use telers::{
    enums::ParseMode,
    errors::SessionErrorKind,
    methods::{SendDocument, SendMessage, SendPhoto, SendVideo},
    types::{InputFile, LinkPreviewOptions},
    Bot,
};
use tracing::instrument;

use super::texts;
use crate::{config::TimeoutsConfig, entities::MediaDescriptor, value_objects::MediaType};

/// Outbound call chosen for a descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MediaReply<'a> {
    Photo { file_id: &'a str, caption: String },
    Video {
        file_id: &'a str,
        caption: String,
        /// Seconds
        duration: Option<i64>,
    },
    Document { file_id: &'a str, caption: String },
    /// No platform file handle, e.g. the request façade's placeholder
    Text { text: String },
}

impl<'a> MediaReply<'a> {
    pub fn render(descriptor: &'a MediaDescriptor, cached: bool) -> Self {
        let caption = texts::media_caption(&descriptor.title, descriptor.file_size, cached);

        let Some(file_id) = descriptor.file_id() else {
            return Self::Text { text: caption };
        };

        match descriptor.media_type {
            MediaType::Photo => Self::Photo { file_id, caption },
            MediaType::Video => Self::Video {
                file_id,
                caption,
                duration: descriptor.duration,
            },
            MediaType::Document => Self::Document { file_id, caption },
        }
    }

    #[instrument(skip_all)]
    pub async fn send(self, bot: &Bot, chat_id: i64, timeouts: &TimeoutsConfig) -> Result<(), SessionErrorKind> {
        match self {
            Self::Photo { file_id, caption } => bot
                .send_with_timeout(
                    SendPhoto::new(chat_id, InputFile::id(file_id))
                        .caption(caption)
                        .parse_mode(ParseMode::HTML),
                    timeouts.media,
                )
                .await
                .map(|_| ()),
            Self::Video { file_id, caption, duration } => bot
                .send_with_timeout(
                    SendVideo::new(chat_id, InputFile::id(file_id))
                        .duration_option(duration)
                        .caption(caption)
                        .parse_mode(ParseMode::HTML),
                    timeouts.media,
                )
                .await
                .map(|_| ()),
            Self::Document { file_id, caption } => bot
                .send_with_timeout(
                    SendDocument::new(chat_id, InputFile::id(file_id))
                        .caption(caption)
                        .parse_mode(ParseMode::HTML),
                    timeouts.media,
                )
                .await
                .map(|_| ()),
            Self::Text { text } => send_text(bot, chat_id, &text, timeouts.text).await,
        }
    }
}

pub async fn send_text(bot: &Bot, chat_id: i64, text: &str, timeout: f32) -> Result<(), SessionErrorKind> {
    bot.send_with_timeout(
        SendMessage::new(chat_id, text)
            .parse_mode(ParseMode::HTML)
            .link_preview_options(LinkPreviewOptions::new().is_disabled(true)),
        timeout,
    )
    .await
    .map(|_| ())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn descriptor(media_type: MediaType, file_reference: &str) -> MediaDescriptor {
        MediaDescriptor {
            media_type,
            title: "Видео из examplechan".to_owned(),
            file_reference: file_reference.to_owned(),
            file_size: Some(1024),
            thumbnail: None,
            duration: None,
        }
    }

    #[test]
    fn test_render_by_media_type() {
        let photo = descriptor(MediaType::Photo, "AgACAgIAAx");
        assert!(matches!(MediaReply::render(&photo, true), MediaReply::Photo { file_id: "AgACAgIAAx", .. }));

        let video = descriptor(MediaType::Video, "BAACAgIAAx");
        assert!(matches!(MediaReply::render(&video, false), MediaReply::Video { file_id: "BAACAgIAAx", .. }));

        let document = descriptor(MediaType::Document, "BQACAgIAAx");
        assert!(matches!(
            MediaReply::render(&document, false),
            MediaReply::Document { file_id: "BQACAgIAAx", .. }
        ));
    }

    #[test]
    fn test_render_video_keeps_duration() {
        let mut video = descriptor(MediaType::Video, "BAACAgIAAx");
        video.duration = Some(95);
        assert!(matches!(
            MediaReply::render(&video, false),
            MediaReply::Video { duration: Some(95), .. }
        ));

        let cached = descriptor(MediaType::Video, "BAACAgIAAx");
        assert!(matches!(MediaReply::render(&cached, true), MediaReply::Video { duration: None, .. }));
    }

    #[test]
    fn test_render_url_falls_back_to_text() {
        let video = descriptor(MediaType::Video, "https://t.me/examplechan/42");
        let MediaReply::Text { text } = MediaReply::render(&video, true) else {
            panic!("expected a text reply");
        };
        assert!(text.starts_with("⚡"));
        assert!(text.contains("1.0 КБ"));
    }

    #[test]
    fn test_render_caption_marks_cache() {
        let photo = descriptor(MediaType::Photo, "AgACAgIAAx");
        let MediaReply::Photo { caption, .. } = MediaReply::render(&photo, false) else {
            panic!("expected a photo reply");
        };
        assert!(caption.starts_with("✅"));
    }
}
