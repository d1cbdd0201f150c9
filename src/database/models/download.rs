use sea_orm::{
    ActiveModelBehavior, DeriveEntityModel, DerivePrimaryKey, DeriveRelation, EntityTrait as _, EnumIter, PrimaryKeyTrait, Related,
    RelationDef, RelationTrait as _,
};
use time::OffsetDateTime;

use super::user_download;
use crate::{database::enums::MediaType, entities::DownloadRecord};

#[derive(Debug, Clone, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "downloads")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub url: String,
    pub media_type: MediaType,
    pub title: String,
    pub file_reference: String,
    pub file_size: Option<i64>,
    pub thumbnail_reference: Option<String>,
    pub cached: bool,
    pub download_count: i64,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
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

impl From<Model> for DownloadRecord {
    fn from(
        Model {
            id,
            url,
            media_type,
            title,
            file_reference,
            file_size,
            thumbnail_reference,
            cached,
            download_count,
            created_at,
            updated_at,
        }: Model,
    ) -> Self {
        Self {
            id,
            url,
            media_type: media_type.into(),
            title,
            file_reference,
            file_size,
            thumbnail_reference,
            cached,
            download_count,
            created_at,
            updated_at,
        }
    }
}
