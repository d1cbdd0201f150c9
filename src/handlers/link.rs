use telers::{client::ExposeSecret as _, errors::SessionErrorKind, Bot};
use tracing::{error, info, instrument};

use crate::{
    config::TimeoutsConfig,
    database::TxManager,
    handlers_utils::{send_text, texts, MediaReply},
    interactors::{GetMedia, GetMediaErrorKind, GetMediaInput, Interactor as _},
    services::ForwardFetcher,
    utils::{format_error_report, hide_token},
};

/// Resolves a post link in chat: cache hit or forward into the chat, then the media reply.
#[instrument(skip_all, fields(%url))]
pub async fn media_by_link(
    bot: &Bot,
    chat_id: i64,
    telegram_id: i64,
    url: &str,
    tx_manager: &mut TxManager,
    timeouts: &TimeoutsConfig,
) -> Result<(), SessionErrorKind> {
    send_text(bot, chat_id, texts::FETCHING, timeouts.text).await?;

    let fetcher = ForwardFetcher::new(bot, chat_id, timeouts.forward);
    match GetMedia::new()
        .execute(GetMediaInput::new(url, Some(telegram_id), tx_manager, &fetcher))
        .await
    {
        Ok(outcome) => {
            info!(cached = outcome.cached, "Sending media");
            MediaReply::render(&outcome.descriptor, outcome.cached)
                .send(bot, chat_id, timeouts)
                .await
        }
        Err(err) => {
            let report = hide_token(&format_error_report(&err), bot.token().expose_secret());
            let text = match err {
                GetMediaErrorKind::InvalidLink | GetMediaErrorKind::UnresolvableLink(_) => {
                    info!(err = report, "Link not resolved");
                    texts::INVALID_LINK
                }
                GetMediaErrorKind::Fetch(_) => {
                    info!(err = report, "Fetch error");
                    texts::FETCH_FAILED
                }
                GetMediaErrorKind::Database(_) => {
                    error!(err = report, "Get media error");
                    texts::INTERNAL_ERROR
                }
            };
            send_text(bot, chat_id, text, timeouts.text).await
        }
    }
}
