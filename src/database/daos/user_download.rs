use sea_orm::{ActiveValue::Set, ConnectionTrait, EntityTrait as _};
use std::convert::Infallible;

use crate::{database::models::user_download, entities::UserDownload, errors::ErrorKind};

pub struct UserDownloadDao<'a, Conn> {
    conn: &'a Conn,
}

impl<'a, Conn> UserDownloadDao<'a, Conn> {
    pub const fn new(conn: &'a Conn) -> Self
    where
        Conn: ConnectionTrait,
    {
        Self { conn }
    }
}

impl<Conn> UserDownloadDao<'_, Conn>
where
    Conn: ConnectionTrait,
{
    pub async fn insert(
        &self,
        UserDownload {
            id,
            user_id,
            download_id,
            created_at,
        }: UserDownload,
    ) -> Result<(), ErrorKind<Infallible>> {
        use user_download::{ActiveModel, Entity};

        let model = ActiveModel {
            id: Set(id),
            user_id: Set(user_id),
            download_id: Set(download_id),
            created_at: Set(created_at),
        };

        Entity::insert(model)
            .exec_without_returning(self.conn)
            .await
            .map(|_| ())
            .map_err(Into::into)
    }
}
