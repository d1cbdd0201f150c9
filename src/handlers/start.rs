use telers::{errors::SessionErrorKind, Bot};
use tracing::instrument;

use crate::{
    config::TimeoutsConfig,
    handlers_utils::{send_text, texts},
};

#[instrument(skip_all)]
pub async fn start(bot: &Bot, chat_id: i64, timeouts: &TimeoutsConfig) -> Result<(), SessionErrorKind> {
    send_text(bot, chat_id, texts::START, timeouts.text).await
}

#[instrument(skip_all)]
pub async fn help(bot: &Bot, chat_id: i64, timeouts: &TimeoutsConfig) -> Result<(), SessionErrorKind> {
    send_text(bot, chat_id, texts::HELP, timeouts.text).await
}

#[instrument(skip_all)]
pub async fn unknown_command(bot: &Bot, chat_id: i64, timeouts: &TimeoutsConfig) -> Result<(), SessionErrorKind> {
    send_text(bot, chat_id, texts::UNKNOWN_COMMAND, timeouts.text).await
}

#[instrument(skip_all)]
pub async fn hint(bot: &Bot, chat_id: i64, timeouts: &TimeoutsConfig) -> Result<(), SessionErrorKind> {
    send_text(bot, chat_id, texts::HINT, timeouts.text).await
}
