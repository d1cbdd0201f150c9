use sea_orm::{
    ActiveModelBehavior, DeriveEntityModel, DerivePrimaryKey, DeriveRelation, EntityTrait as _, EnumIter, PrimaryKeyTrait, Related,
    RelationDef, RelationTrait as _,
};
use time::OffsetDateTime;
use uuid::Uuid;

use super::user_download;
use crate::entities::BotUser;

#[derive(Debug, Clone, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "bot_users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub telegram_id: i64,
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub downloads_count: i64,
    pub created_at: OffsetDateTime,
    pub last_active: OffsetDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "user_download::Entity")]
    UserDownload,
}

impl Related<user_download::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::UserDownload.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for BotUser {
    fn from(
        Model {
            id,
            telegram_id,
            username,
            first_name,
            last_name,
            downloads_count,
            created_at,
            last_active,
        }: Model,
    ) -> Self {
        Self {
            id,
            telegram_id,
            username: username.map(String::into_boxed_str),
            first_name: first_name.map(String::into_boxed_str),
            last_name: last_name.map(String::into_boxed_str),
            downloads_count,
            created_at,
            last_active,
        }
    }
}
