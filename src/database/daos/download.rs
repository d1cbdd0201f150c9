use sea_orm::{
    prelude::Expr, ActiveValue::NotSet, ActiveValue::Set, ColumnTrait as _, ConnectionTrait, EntityTrait as _, FromQueryResult,
    QueryFilter as _, QueryOrder as _, QuerySelect as _,
};
use std::convert::Infallible;
use time::OffsetDateTime;

use crate::{
    database::models::download,
    entities::{DownloadRecord, DownloadStats, MediaDescriptor},
    errors::ErrorKind,
};

pub struct DownloadDao<'a, Conn> {
    conn: &'a Conn,
}

impl<'a, Conn> DownloadDao<'a, Conn> {
    pub const fn new(conn: &'a Conn) -> Self
    where
        Conn: ConnectionTrait,
    {
        Self { conn }
    }
}

#[derive(Debug, FromQueryResult)]
struct StatsRow {
    records: i64,
    cached: i64,
    total_size: i64,
    total_download_count: i64,
}

impl<Conn> DownloadDao<'_, Conn>
where
    Conn: ConnectionTrait,
{
    /// Duplicates of one link may exist, the oldest cached row wins.
    pub async fn get_cached_by_url(&self, url: &str) -> Result<Option<DownloadRecord>, ErrorKind<Infallible>> {
        use download::{
            Column::{Cached, Id, Url},
            Entity,
        };

        Ok(Entity::find()
            .filter(Url.eq(url))
            .filter(Cached.eq(true))
            .order_by_asc(Id)
            .one(self.conn)
            .await?
            .map(Into::into))
    }

    pub async fn insert(&self, url: &str, descriptor: &MediaDescriptor) -> Result<i64, ErrorKind<Infallible>> {
        use download::{ActiveModel, Entity};

        let now = OffsetDateTime::now_utc();
        let model = ActiveModel {
            id: NotSet,
            url: Set(url.to_owned()),
            media_type: Set(descriptor.media_type.into()),
            title: Set(descriptor.title.clone()),
            file_reference: Set(descriptor.file_reference.clone()),
            file_size: Set(descriptor.file_size),
            thumbnail_reference: Set(descriptor.thumbnail.clone()),
            cached: Set(true),
            download_count: Set(1),
            created_at: Set(now),
            updated_at: Set(now),
        };

        Entity::insert(model)
            .exec(self.conn)
            .await
            .map(|res| res.last_insert_id)
            .map_err(Into::into)
    }

    /// Returns `false` if the row is gone.
    pub async fn increment_download_count(&self, id: i64) -> Result<bool, ErrorKind<Infallible>> {
        use download::{
            Column::{DownloadCount, Id, UpdatedAt},
            Entity,
        };

        let res = Entity::update_many()
            .col_expr(DownloadCount, Expr::col(DownloadCount).add(1))
            .col_expr(UpdatedAt, Expr::value(OffsetDateTime::now_utc()))
            .filter(Id.eq(id))
            .exec(self.conn)
            .await?;

        Ok(res.rows_affected > 0)
    }

    pub async fn get_recent(&self, limit: u64) -> Result<Vec<DownloadRecord>, ErrorKind<Infallible>> {
        use download::{
            Column::{CreatedAt, Id},
            Entity,
        };

        Ok(Entity::find()
            .order_by_desc(CreatedAt)
            .order_by_desc(Id)
            .limit(limit)
            .all(self.conn)
            .await?
            .into_iter()
            .map(Into::into)
            .collect())
    }

    pub async fn get_stats(&self) -> Result<DownloadStats, ErrorKind<Infallible>> {
        use download::Entity;

        // `SUM` over bigint yields numeric in Postgres, cast back to decode into `i64`
        let row = Entity::find()
            .select_only()
            .column_as(Expr::cust("COUNT(*)"), "records")
            .column_as(Expr::cust("COUNT(*) FILTER (WHERE cached = true)"), "cached")
            .column_as(Expr::cust("COALESCE(SUM(file_size), 0)::BIGINT"), "total_size")
            .column_as(Expr::cust("COALESCE(SUM(download_count), 0)::BIGINT"), "total_download_count")
            .into_model::<StatsRow>()
            .one(self.conn)
            .await?;

        Ok(row.map_or_else(DownloadStats::default, |row| DownloadStats {
            records: row.records,
            cached: row.cached,
            total_size: row.total_size,
            total_download_count: row.total_download_count,
        }))
    }
}
