use sea_orm_migration::{
    async_trait::async_trait,
    prelude::{extension::postgres::Type, *},
    schema::*,
    sea_orm::{EnumIter, Iterable as _},
};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_type(Type::create().as_enum(MediaType).values(MediaTypeVariants::iter()).to_owned())
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Download::Table)
                    .if_not_exists()
                    .col(big_integer(Download::Id).auto_increment().primary_key())
                    .col(text(Download::Url))
                    .col(enumeration(Download::MediaType, MediaType, MediaTypeVariants::iter()))
                    .col(text(Download::Title))
                    .col(text(Download::FileReference))
                    .col(big_integer_null(Download::FileSize).default(Keyword::Null))
                    .col(text_null(Download::ThumbnailReference).default(Keyword::Null))
                    .col(boolean(Download::Cached).default(true))
                    .col(big_integer(Download::DownloadCount).default(1))
                    .col(timestamp_with_time_zone(Download::CreatedAt).default(Expr::current_timestamp()))
                    .col(timestamp_with_time_zone(Download::UpdatedAt).default(Expr::current_timestamp()))
                    .to_owned(),
            )
            .await?;
        // Lookups go by url, but it's not unique: concurrent misses for one link may both insert
        manager
            .create_index(
                Index::create()
                    .name("idx_downloads_url")
                    .table(Download::Table)
                    .col(Download::Url)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(BotUser::Table)
                    .if_not_exists()
                    .col(uuid(BotUser::Id).primary_key())
                    .col(big_integer(BotUser::TelegramId).unique_key())
                    .col(text_null(BotUser::Username).default(Keyword::Null))
                    .col(text_null(BotUser::FirstName).default(Keyword::Null))
                    .col(text_null(BotUser::LastName).default(Keyword::Null))
                    .col(big_integer(BotUser::DownloadsCount).default(0))
                    .col(timestamp_with_time_zone(BotUser::CreatedAt).default(Expr::current_timestamp()))
                    .col(timestamp_with_time_zone(BotUser::LastActive).default(Expr::current_timestamp()))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(UserDownload::Table)
                    .if_not_exists()
                    .col(uuid(UserDownload::Id).primary_key())
                    .col(uuid(UserDownload::UserId))
                    .col(big_integer(UserDownload::DownloadId))
                    .col(timestamp_with_time_zone(UserDownload::CreatedAt).default(Expr::current_timestamp()))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_user_downloads_user_id")
                            .from(UserDownload::Table, UserDownload::UserId)
                            .to(BotUser::Table, BotUser::Id)
                            .on_update(ForeignKeyAction::Cascade)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_user_downloads_download_id")
                            .from(UserDownload::Table, UserDownload::DownloadId)
                            .to(Download::Table, Download::Id)
                            .on_update(ForeignKeyAction::Cascade)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(UserDownload::Table).if_exists().to_owned())
            .await?;
        manager.drop_table(Table::drop().table(BotUser::Table).if_exists().to_owned()).await?;
        manager.drop_table(Table::drop().table(Download::Table).if_exists().to_owned()).await?;

        manager
            .drop_type(Type::drop().name(MediaType).if_exists().restrict().to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
struct MediaType;

#[derive(DeriveIden, EnumIter)]
pub enum MediaTypeVariants {
    Photo,
    Video,
    Document,
}

#[derive(DeriveIden)]
enum Download {
    #[sea_orm(iden = "downloads")]
    Table,
    Id,
    Url,
    MediaType,
    Title,
    FileReference,
    FileSize,
    ThumbnailReference,
    Cached,
    DownloadCount,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum BotUser {
    #[sea_orm(iden = "bot_users")]
    Table,
    Id,
    TelegramId,
    Username,
    FirstName,
    LastName,
    DownloadsCount,
    CreatedAt,
    LastActive,
}

#[derive(DeriveIden)]
enum UserDownload {
    #[sea_orm(iden = "user_downloads")]
    Table,
    Id,
    UserId,
    DownloadId,
    CreatedAt,
}
