use telers::{errors::SessionErrorKind, Bot};
use tracing::{error, instrument};

use crate::{
    config::TimeoutsConfig,
    database::TxManager,
    handlers_utils::{send_text, texts},
    interactors::{GetUserStats, GetUserStatsInput, Interactor as _},
    utils::format_error_report,
};

#[instrument(skip_all, fields(telegram_id = telegram_id))]
pub async fn stats(
    bot: &Bot,
    chat_id: i64,
    telegram_id: i64,
    tx_manager: &mut TxManager,
    timeouts: &TimeoutsConfig,
) -> Result<(), SessionErrorKind> {
    let text = match GetUserStats::new()
        .execute(GetUserStatsInput::new(telegram_id, tx_manager))
        .await
    {
        Ok(stats) => texts::stats(stats.downloads_count, stats.cached_files, stats.total_downloads),
        Err(err) => {
            error!(err = format_error_report(&err), "Get stats error");
            texts::INTERNAL_ERROR.to_owned()
        }
    };

    send_text(bot, chat_id, &text, timeouts.text).await
}
