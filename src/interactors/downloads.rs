use std::convert::Infallible;
use tracing::{debug, instrument};

use super::Interactor;
use crate::{
    database::TxManager,
    entities::{DownloadRecord, DownloadStats},
    errors::ErrorKind,
};

#[derive(Debug, Clone)]
pub struct DownloadsOverview {
    /// Newest first
    pub history: Vec<DownloadRecord>,
    pub stats: DownloadStats,
    pub active_users: u64,
}

pub struct GetDownloadsOverview {}

impl GetDownloadsOverview {
    pub const fn new() -> Self {
        Self {}
    }
}

pub struct GetDownloadsOverviewInput<'a> {
    pub limit: u64,
    pub tx_manager: &'a mut TxManager,
}

impl<'a> GetDownloadsOverviewInput<'a> {
    pub const fn new(limit: u64, tx_manager: &'a mut TxManager) -> Self {
        Self { limit, tx_manager }
    }
}

impl Interactor<GetDownloadsOverviewInput<'_>> for &GetDownloadsOverview {
    type Output = DownloadsOverview;
    type Err = ErrorKind<Infallible>;

    #[instrument(skip_all, fields(limit = limit))]
    async fn execute(self, GetDownloadsOverviewInput { limit, tx_manager }: GetDownloadsOverviewInput<'_>) -> Result<Self::Output, Self::Err> {
        tx_manager.begin().await?;

        let download_dao = tx_manager.download_dao()?;
        let history = match download_dao.get_recent(limit).await {
            Ok(val) => val,
            Err(err) => {
                tx_manager.rollback().await?;
                return Err(err);
            }
        };
        let stats = match download_dao.get_stats().await {
            Ok(val) => val,
            Err(err) => {
                tx_manager.rollback().await?;
                return Err(err);
            }
        };
        let bot_user_dao = tx_manager.bot_user_dao()?;
        let active_users = match bot_user_dao.count().await {
            Ok(val) => val,
            Err(err) => {
                tx_manager.rollback().await?;
                return Err(err);
            }
        };
        debug!(records = stats.records, "Got downloads overview");

        tx_manager.commit().await?;
        Ok(DownloadsOverview {
            history,
            stats,
            active_users,
        })
    }
}
