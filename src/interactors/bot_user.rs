use std::convert::Infallible;
use tracing::{debug, instrument};

use super::Interactor;
use crate::{database::TxManager, entities::BotUser, errors::ErrorKind};

pub struct SaveBotUser {}

impl SaveBotUser {
    pub const fn new() -> Self {
        Self {}
    }
}

pub struct SaveBotUserInput<'a> {
    pub user: BotUser,
    pub tx_manager: &'a mut TxManager,
}

impl<'a> SaveBotUserInput<'a> {
    pub const fn new(user: BotUser, tx_manager: &'a mut TxManager) -> Self {
        Self { user, tx_manager }
    }
}

impl Interactor<SaveBotUserInput<'_>> for &SaveBotUser {
    type Output = BotUser;
    type Err = ErrorKind<Infallible>;

    #[instrument(skip_all, fields(telegram_id = user.telegram_id))]
    async fn execute(self, SaveBotUserInput { user, tx_manager }: SaveBotUserInput<'_>) -> Result<Self::Output, Self::Err> {
        tx_manager.begin().await?;

        let dao = tx_manager.bot_user_dao()?;
        let user = match dao.insert_or_update(user).await {
            Ok(val) => val,
            Err(err) => {
                tx_manager.rollback().await?;
                return Err(err);
            }
        };
        debug!("User saved");

        tx_manager.commit().await?;
        Ok(user)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UserStats {
    pub downloads_count: i64,
    pub cached_files: i64,
    pub total_downloads: i64,
}

pub struct GetUserStats {}

impl GetUserStats {
    pub const fn new() -> Self {
        Self {}
    }
}

pub struct GetUserStatsInput<'a> {
    pub telegram_id: i64,
    pub tx_manager: &'a mut TxManager,
}

impl<'a> GetUserStatsInput<'a> {
    pub const fn new(telegram_id: i64, tx_manager: &'a mut TxManager) -> Self {
        Self { telegram_id, tx_manager }
    }
}

impl Interactor<GetUserStatsInput<'_>> for &GetUserStats {
    type Output = UserStats;
    type Err = ErrorKind<Infallible>;

    /// The user counter and the global totals are read independently.
    #[instrument(skip_all, fields(telegram_id = telegram_id))]
    async fn execute(self, GetUserStatsInput { telegram_id, tx_manager }: GetUserStatsInput<'_>) -> Result<Self::Output, Self::Err> {
        tx_manager.begin().await?;

        let user_dao = tx_manager.bot_user_dao()?;
        let user = match user_dao.get_by_telegram_id(telegram_id).await {
            Ok(val) => val,
            Err(err) => {
                tx_manager.rollback().await?;
                return Err(err);
            }
        };
        let download_dao = tx_manager.download_dao()?;
        let stats = match download_dao.get_stats().await {
            Ok(val) => val,
            Err(err) => {
                tx_manager.rollback().await?;
                return Err(err);
            }
        };

        tx_manager.commit().await?;
        Ok(UserStats {
            downloads_count: user.map_or(0, |user| user.downloads_count),
            cached_files: stats.cached,
            total_downloads: stats.total_download_count,
        })
    }
}
