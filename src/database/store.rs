use std::{convert::Infallible, future::Future};
use tracing::{debug, warn};

use crate::{
    database::TxManager,
    entities::{DownloadRecord, MediaDescriptor, UserDownload},
    errors::ErrorKind,
};

/// Datastore operations the reconciliation flow needs.
///
/// Each operation is atomic on its own; nothing spans the whole flow, so a lookup
/// and a later insert for the same link may interleave with another request.
pub trait MediaStore {
    fn find_cached(&mut self, url: &str) -> impl Future<Output = Result<Option<DownloadRecord>, ErrorKind<Infallible>>> + Send;

    fn register_hit(&mut self, download_id: i64) -> impl Future<Output = Result<(), ErrorKind<Infallible>>> + Send;

    fn insert_download(
        &mut self,
        url: &str,
        descriptor: &MediaDescriptor,
    ) -> impl Future<Output = Result<i64, ErrorKind<Infallible>>> + Send;

    /// Appends a user-download row and bumps the user's counter. Unknown users are skipped.
    fn record_user_download(&mut self, telegram_id: i64, download_id: i64)
        -> impl Future<Output = Result<(), ErrorKind<Infallible>>> + Send;
}

impl MediaStore for TxManager {
    async fn find_cached(&mut self, url: &str) -> Result<Option<DownloadRecord>, ErrorKind<Infallible>> {
        self.begin().await?;

        let dao = self.download_dao()?;
        let record = match dao.get_cached_by_url(url).await {
            Ok(val) => val,
            Err(err) => {
                self.rollback().await?;
                return Err(err);
            }
        };

        self.commit().await?;
        Ok(record)
    }

    async fn register_hit(&mut self, download_id: i64) -> Result<(), ErrorKind<Infallible>> {
        self.begin().await?;

        let dao = self.download_dao()?;
        match dao.increment_download_count(download_id).await {
            Ok(true) => {}
            Ok(false) => warn!(download_id, "Download row disappeared before counting the hit"),
            Err(err) => {
                self.rollback().await?;
                return Err(err);
            }
        }

        self.commit().await?;
        Ok(())
    }

    async fn insert_download(&mut self, url: &str, descriptor: &MediaDescriptor) -> Result<i64, ErrorKind<Infallible>> {
        self.begin().await?;

        let dao = self.download_dao()?;
        let id = match dao.insert(url, descriptor).await {
            Ok(val) => val,
            Err(err) => {
                self.rollback().await?;
                return Err(err);
            }
        };

        self.commit().await?;
        Ok(id)
    }

    async fn record_user_download(&mut self, telegram_id: i64, download_id: i64) -> Result<(), ErrorKind<Infallible>> {
        self.begin().await?;

        let user_dao = self.bot_user_dao()?;
        let user = match user_dao.get_by_telegram_id(telegram_id).await {
            Ok(Some(val)) => val,
            Ok(None) => {
                debug!(telegram_id, "User not saved, skip download recording");
                self.rollback().await?;
                return Ok(());
            }
            Err(err) => {
                self.rollback().await?;
                return Err(err);
            }
        };

        let user_download_dao = self.user_download_dao()?;
        if let Err(err) = user_download_dao.insert(UserDownload::new(user.id, download_id)).await {
            self.rollback().await?;
            return Err(err);
        }
        if let Err(err) = user_dao.increment_downloads_count(user.id).await {
            self.rollback().await?;
            return Err(err);
        }

        self.commit().await?;
        Ok(())
    }
}
