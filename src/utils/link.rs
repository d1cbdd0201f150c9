use regex::Regex;
use std::sync::LazyLock;
use thiserror::Error;
use url::Url;

use crate::entities::{ParsedLink, SourceChat};

static TELEGRAM_LINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:https?://(?:t|telegram)\.me/|tg://)\S+").expect("valid link pattern"));

/// Private channels are addressed by their internal id with this prefix.
const PRIVATE_CHANNEL_PREFIX: &str = "-100";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ErrorKind {
    #[error("Not a Telegram link")]
    NotTelegramLink,
    #[error("No channel found in: {0}")]
    NoChannelFound(Box<str>),
    #[error("No message ID found in: {0}")]
    NoMessageIdFound(Box<str>),
}

/// Whether the string is a link to the messaging platform. Purely lexical, no network access.
pub fn is_telegram_link(input: &str) -> bool {
    TELEGRAM_LINK.is_match(input)
}

/// First whitespace-delimited word of the text that is a platform link.
pub fn find_telegram_link(text: &str) -> Option<&str> {
    text.split_whitespace().find(|word| is_telegram_link(word))
}

/// Extracts the channel and the message id of a post link.
///
/// The message id is the final path segment and must consist of digits only,
/// so channels with digits in their names aren't mistaken for ids.
pub fn parse_link(input: &str) -> Result<ParsedLink, ErrorKind> {
    let link = input.split_whitespace().next().ok_or(ErrorKind::NotTelegramLink)?;
    if !is_telegram_link(link) {
        return Err(ErrorKind::NotTelegramLink);
    }

    if link.starts_with("tg://") {
        return parse_deep_link(link);
    }

    let path = link
        .split_once("://")
        .and_then(|(_, rest)| rest.split_once('/'))
        .map_or("", |(_, path)| path);
    let path = path.split(['?', '#']).next().unwrap_or_default();
    let segments: Vec<&str> = path.split('/').filter(|segment| !segment.is_empty()).collect();

    let (channel_segments, message_id) = match segments.split_last() {
        Some((last, rest)) if !rest.is_empty() => (rest, parse_message_id(last).ok_or_else(|| no_message_id(link))?),
        Some(_) => return Err(no_message_id(link)),
        None => return Err(ErrorKind::NoChannelFound(link.into())),
    };

    match channel_segments {
        // t.me/c/<internal_id>/<message_id>
        ["c", internal_id, ..] => {
            let id = parse_private_channel_id(internal_id).ok_or_else(|| ErrorKind::NoChannelFound(link.into()))?;
            Ok(ParsedLink {
                channel: format!("c/{internal_id}").into_boxed_str(),
                message_id,
                source: SourceChat::Id(id),
            })
        }
        // t.me/s/<channel>/<message_id> is the web preview of a public post
        ["s", channel, ..] => Ok(public_link(channel, message_id)),
        ["c" | "s"] => Err(ErrorKind::NoChannelFound(link.into())),
        [channel, ..] => Ok(public_link(channel, message_id)),
        [] => Err(ErrorKind::NoChannelFound(link.into())),
    }
}

fn parse_deep_link(link: &str) -> Result<ParsedLink, ErrorKind> {
    let url = Url::parse(link).map_err(|_| ErrorKind::NoChannelFound(link.into()))?;
    let query_value = |name: &str| url.query_pairs().find(|(key, _)| key == name).map(|(_, value)| value.into_owned());

    let message_id = query_value("post")
        .as_deref()
        .and_then(parse_message_id)
        .ok_or_else(|| no_message_id(link))?;

    match url.host_str() {
        Some("resolve") => {
            let channel = query_value("domain")
                .filter(|domain| !domain.is_empty())
                .ok_or_else(|| ErrorKind::NoChannelFound(link.into()))?;
            Ok(public_link(&channel, message_id))
        }
        Some("privatepost") => {
            let internal_id = query_value("channel").ok_or_else(|| ErrorKind::NoChannelFound(link.into()))?;
            let id = parse_private_channel_id(&internal_id).ok_or_else(|| ErrorKind::NoChannelFound(link.into()))?;
            Ok(ParsedLink {
                channel: format!("c/{internal_id}").into_boxed_str(),
                message_id,
                source: SourceChat::Id(id),
            })
        }
        _ => Err(ErrorKind::NoChannelFound(link.into())),
    }
}

fn public_link(channel: &str, message_id: i64) -> ParsedLink {
    // A channel written as a negative number is already a chat id
    let source = match channel.strip_prefix('-') {
        Some(_) => channel
            .parse()
            .map_or_else(|_| SourceChat::Username(channel.into()), SourceChat::Id),
        None => SourceChat::Username(channel.into()),
    };

    ParsedLink {
        channel: channel.into(),
        message_id,
        source,
    }
}

fn parse_message_id(segment: &str) -> Option<i64> {
    if segment.is_empty() || !segment.bytes().all(|byte| byte.is_ascii_digit()) {
        return None;
    }
    segment.parse().ok()
}

fn parse_private_channel_id(internal_id: &str) -> Option<i64> {
    parse_message_id(internal_id)?;
    format!("{PRIVATE_CHANNEL_PREFIX}{internal_id}").parse().ok()
}

fn no_message_id(link: &str) -> ErrorKind {
    ErrorKind::NoMessageIdFound(link.into())
}
