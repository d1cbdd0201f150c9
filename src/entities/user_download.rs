use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct UserDownload {
    pub id: Uuid,
    pub user_id: Uuid,
    pub download_id: i64,
    pub created_at: OffsetDateTime,
}

impl UserDownload {
    pub fn new(user_id: Uuid, download_id: i64) -> Self {
        Self {
            id: Uuid::now_v7(),
            user_id,
            download_id,
            created_at: OffsetDateTime::now_utc(),
        }
    }
}
