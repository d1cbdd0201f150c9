use sea_orm::{DatabaseConnection, DatabaseTransaction, TransactionTrait as _};
use std::sync::Arc;

use crate::{
    database::{BotUserDao, DownloadDao, UserDownloadDao},
    errors::database::{BeginError, CommitError, RollbackError, TransactionNotBegin},
};

/// Unit of work over a shared connection. DAOs are only handed out inside a begun transaction.
pub struct TxManager {
    pool: Arc<DatabaseConnection>,
    transaction: Option<DatabaseTransaction>,
}

impl TxManager {
    pub const fn new(pool: Arc<DatabaseConnection>) -> Self {
        Self { pool, transaction: None }
    }
}

impl TxManager {
    pub async fn begin(&mut self) -> Result<(), BeginError> {
        if self.transaction.is_none() {
            self.transaction = Some(self.pool.begin().await?);
        }
        Ok(())
    }

    pub async fn commit(&mut self) -> Result<(), CommitError> {
        if let Some(transaction) = self.transaction.take() {
            transaction.commit().await?;
        }
        Ok(())
    }

    pub async fn rollback(&mut self) -> Result<(), RollbackError> {
        if let Some(transaction) = self.transaction.take() {
            transaction.rollback().await?;
        }
        Ok(())
    }

    pub fn download_dao(&self) -> Result<DownloadDao<DatabaseTransaction>, TransactionNotBegin> {
        Ok(DownloadDao::new(self.transaction.as_ref().ok_or(TransactionNotBegin)?))
    }

    pub fn bot_user_dao(&self) -> Result<BotUserDao<DatabaseTransaction>, TransactionNotBegin> {
        Ok(BotUserDao::new(self.transaction.as_ref().ok_or(TransactionNotBegin)?))
    }

    pub fn user_download_dao(&self) -> Result<UserDownloadDao<DatabaseTransaction>, TransactionNotBegin> {
        Ok(UserDownloadDao::new(self.transaction.as_ref().ok_or(TransactionNotBegin)?))
    }
}
