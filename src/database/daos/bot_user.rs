use sea_orm::{
    prelude::Expr, sea_query::OnConflict, ActiveValue::Set, ColumnTrait as _, ConnectionTrait, EntityTrait as _, PaginatorTrait as _,
    QueryFilter as _,
};
use std::convert::Infallible;
use uuid::Uuid;

use crate::{database::models::bot_user, entities::BotUser, errors::ErrorKind};

pub struct BotUserDao<'a, Conn> {
    conn: &'a Conn,
}

impl<'a, Conn> BotUserDao<'a, Conn> {
    pub const fn new(conn: &'a Conn) -> Self
    where
        Conn: ConnectionTrait,
    {
        Self { conn }
    }
}

impl<Conn> BotUserDao<'_, Conn>
where
    Conn: ConnectionTrait,
{
    /// Profile fields and `last_active` are refreshed for known accounts, counters are kept.
    pub async fn insert_or_update(
        &self,
        BotUser {
            id,
            telegram_id,
            username,
            first_name,
            last_name,
            downloads_count,
            created_at,
            last_active,
        }: BotUser,
    ) -> Result<BotUser, ErrorKind<Infallible>> {
        use bot_user::{
            ActiveModel,
            Column::{FirstName, LastActive, LastName, TelegramId, Username},
            Entity,
        };

        let model = ActiveModel {
            id: Set(id),
            telegram_id: Set(telegram_id),
            username: Set(username.map(Into::into)),
            first_name: Set(first_name.map(Into::into)),
            last_name: Set(last_name.map(Into::into)),
            downloads_count: Set(downloads_count),
            created_at: Set(created_at),
            last_active: Set(last_active),
        };

        Entity::insert(model)
            .on_conflict(
                OnConflict::column(TelegramId)
                    .update_columns([Username, FirstName, LastName, LastActive])
                    .to_owned(),
            )
            .exec_with_returning(self.conn)
            .await
            .map(Into::into)
            .map_err(Into::into)
    }

    pub async fn get_by_telegram_id(&self, telegram_id: i64) -> Result<Option<BotUser>, ErrorKind<Infallible>> {
        use bot_user::{Column::TelegramId, Entity};

        Ok(Entity::find()
            .filter(TelegramId.eq(telegram_id))
            .one(self.conn)
            .await?
            .map(Into::into))
    }

    pub async fn increment_downloads_count(&self, id: Uuid) -> Result<(), ErrorKind<Infallible>> {
        use bot_user::{
            Column::{DownloadsCount, Id},
            Entity,
        };

        Entity::update_many()
            .col_expr(DownloadsCount, Expr::col(DownloadsCount).add(1))
            .filter(Id.eq(id))
            .exec(self.conn)
            .await
            .map(|_| ())
            .map_err(Into::into)
    }

    pub async fn count(&self) -> Result<u64, ErrorKind<Infallible>> {
        use bot_user::Entity;

        Entity::find().count(self.conn).await.map_err(Into::into)
    }
}
