use axum::{
    body::Bytes,
    extract::{rejection::QueryRejection, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use serde_json::json;
use telers::{client::ExposeSecret as _, Bot};
use tracing::{debug, error, info, instrument, warn};

use super::{help, hint, media_by_link, start, stats, unknown_command};
use crate::{
    entities::{BotUser, IncomingMessage, WebhookUpdate},
    errors::ApiError,
    handlers_utils::{ChatRequest, Command},
    interactors::{Interactor as _, SaveBotUser, SaveBotUserInput},
    services::set_webhook,
    utils::{format_error_report, hide_token},
    AppState,
};

/// Always acknowledged: the platform would redeliver the update otherwise.
#[instrument(skip_all)]
pub async fn webhook(State(state): State<AppState>, body: Bytes) -> Json<serde_json::Value> {
    match serde_json::from_slice::<WebhookUpdate>(&body) {
        Ok(update) => handle_update(&state, update).await,
        Err(err) => warn!(%err, "Malformed update"),
    }

    Json(json!({ "ok": true }))
}

async fn handle_update(state: &AppState, update: WebhookUpdate) {
    let Some(message) = update.message else {
        debug!(update_id = update.update_id, "Update without message");
        return;
    };
    let Some(bot) = state.bot.as_ref() else {
        error!("Bot token is not configured, update dropped");
        return;
    };

    let chat_id = message.chat.id;
    if let Err(err) = handle_message(state, bot, message).await {
        error!(
            err = hide_token(&format_error_report(&err), bot.token().expose_secret()),
            chat_id, "Reply error"
        );
    }
}

#[instrument(skip_all, fields(chat_id = message.chat.id))]
async fn handle_message(state: &AppState, bot: &Bot, message: IncomingMessage) -> Result<(), telers::errors::SessionErrorKind> {
    let chat_id = message.chat.id;
    let telegram_id = message.from.as_ref().map_or(chat_id, |user| user.id);
    let timeouts = &state.config.timeouts;
    let mut tx_manager = state.tx_manager();

    if let Some(user) = message.from {
        let user = BotUser::new(user.id, user.username, user.first_name, user.last_name);
        if let Err(err) = SaveBotUser::new()
            .execute(SaveBotUserInput::new(user, &mut tx_manager))
            .await
        {
            error!(err = format_error_report(&err), "Save user error");
        }
    }

    let text = message.text.unwrap_or_default();
    match ChatRequest::classify(&text) {
        ChatRequest::Command(command) => {
            info!(?command, "Got command");
            match command {
                Command::Start => start(bot, chat_id, timeouts).await,
                Command::Help => help(bot, chat_id, timeouts).await,
                Command::Stats => stats(bot, chat_id, telegram_id, &mut tx_manager, timeouts).await,
                Command::Unknown => unknown_command(bot, chat_id, timeouts).await,
            }
        }
        ChatRequest::Link(url) => media_by_link(bot, chat_id, telegram_id, url, &mut tx_manager, timeouts).await,
        ChatRequest::Other => hint(bot, chat_id, timeouts).await,
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct WebhookQuery {
    pub action: Option<String>,
    pub url: Option<String>,
}

#[instrument(skip_all, fields(action = ?query.as_ref().ok().and_then(|Query(query)| query.action.as_deref())))]
pub async fn webhook_status(
    State(state): State<AppState>,
    query: Result<Query<WebhookQuery>, QueryRejection>,
) -> Result<Response, ApiError> {
    let Query(query) = query?;
    if query.action.as_deref() != Some("set_webhook") {
        return Ok(Json(json!({ "status": "active", "bot": state.config.bot.name })).into_response());
    }

    let url = query.url.as_deref().map(str::trim).unwrap_or_default();
    if url.is_empty() {
        return Err(ApiError::MissingWebhookUrl);
    }
    let Some(token) = state.config.bot.token.as_deref() else {
        error!("Bot token is not configured");
        return Err(ApiError::MissingToken);
    };

    match set_webhook(&state.client, &state.config.telegram_bot_api.url, token, url, state.config.timeouts.text).await {
        Ok(body) => Ok(Json(body).into_response()),
        Err(err) => {
            let err = hide_token(&format_error_report(&err), token);
            error!(err, "Set webhook error");
            Ok((StatusCode::OK, Json(json!({ "ok": false, "error": err }))).into_response())
        }
    }
}
