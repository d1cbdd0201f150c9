pub mod daos;
pub mod enums;
pub mod models;
pub mod store;
pub mod tx_manager;

pub use daos::{BotUserDao, DownloadDao, UserDownloadDao};
pub use store::MediaStore;
pub use tx_manager::TxManager;

use migration::{Migrator, MigratorTrait as _};
use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};
use tracing::{info, instrument};

use crate::config::DatabaseConfig;

/// Opens the connection with the configured schema as search path, so every query
/// resolves unqualified table names against it.
#[instrument(skip_all, fields(schema = %database_cfg.schema))]
pub async fn connect(database_cfg: &DatabaseConfig) -> Result<DatabaseConnection, DbErr> {
    let mut options = ConnectOptions::new(database_cfg.url.to_string());
    options.sqlx_logging(false).set_schema_search_path(database_cfg.schema.to_string());

    let database_conn = Database::connect(options).await?;
    info!("Database conn created");

    if database_cfg.run_migrations {
        Migrator::up(&database_conn, None).await?;
        info!("Migrations applied");
    }

    Ok(database_conn)
}
