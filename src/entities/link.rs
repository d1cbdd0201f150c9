use std::fmt;

/// Chat the post lives in, as the platform API addresses it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceChat {
    Username(Box<str>),
    Id(i64),
}

impl fmt::Display for SourceChat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceChat::Username(username) => write!(f, "@{username}"),
            SourceChat::Id(id) => write!(f, "{id}"),
        }
    }
}

/// A post link decomposed into its channel and message id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedLink {
    /// Channel segment exactly as written in the link
    pub channel: Box<str>,
    pub message_id: i64,
    pub source: SourceChat,
}

impl ParsedLink {
    pub fn public_url(&self) -> String {
        format!("https://t.me/{}/{}", self.channel, self.message_id)
    }
}
