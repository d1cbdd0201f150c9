use serde::Deserialize;

/// Inbound webhook envelope. Only the fields the bot reacts to are modelled,
/// everything else the platform sends is ignored.
#[derive(Debug, Default, Deserialize)]
pub struct WebhookUpdate {
    #[serde(default)]
    pub update_id: Option<i64>,
    #[serde(default)]
    pub message: Option<IncomingMessage>,
}

#[derive(Debug, Deserialize)]
pub struct IncomingMessage {
    pub chat: IncomingChat,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub from: Option<IncomingUser>,
}

#[derive(Debug, Deserialize)]
pub struct IncomingChat {
    pub id: i64,
}

#[derive(Debug, Deserialize)]
pub struct IncomingUser {
    pub id: i64,
    #[serde(default)]
    pub username: Option<Box<str>>,
    #[serde(default)]
    pub first_name: Option<Box<str>>,
    #[serde(default)]
    pub last_name: Option<Box<str>>,
}
