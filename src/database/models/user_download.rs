use sea_orm::{
    ActiveModelBehavior, DeriveEntityModel, DerivePrimaryKey, DeriveRelation, EntityTrait as _, EnumIter, PrimaryKeyTrait, Related,
    RelationDef, RelationTrait as _,
};
use time::OffsetDateTime;
use uuid::Uuid;

use super::{bot_user, download};
use crate::entities::UserDownload;

#[derive(Debug, Clone, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "user_downloads")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub user_id: Uuid,
    pub download_id: i64,
    pub created_at: OffsetDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "bot_user::Entity",
        from = "Column::UserId",
        to = "bot_user::Column::Id",
        fk_name = "fk_user_downloads_user_id"
    )]
    BotUser,
    #[sea_orm(
        belongs_to = "download::Entity",
        from = "Column::DownloadId",
        to = "download::Column::Id",
        fk_name = "fk_user_downloads_download_id"
    )]
    Download,
}

impl Related<bot_user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::BotUser.def()
    }
}

impl Related<download::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Download.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for UserDownload {
    fn from(
        Model {
            id,
            user_id,
            download_id,
            created_at,
        }: Model,
    ) -> Self {
        Self {
            id,
            user_id,
            download_id,
            created_at,
        }
    }
}
