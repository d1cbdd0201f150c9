use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct BotUser {
    pub id: Uuid,
    pub telegram_id: i64,
    pub username: Option<Box<str>>,
    pub first_name: Option<Box<str>>,
    pub last_name: Option<Box<str>>,
    pub downloads_count: i64,
    pub created_at: OffsetDateTime,
    pub last_active: OffsetDateTime,
}

impl BotUser {
    pub fn new(telegram_id: i64, username: Option<Box<str>>, first_name: Option<Box<str>>, last_name: Option<Box<str>>) -> Self {
        let now = OffsetDateTime::now_utc();
        Self {
            id: Uuid::now_v7(),
            telegram_id,
            username,
            first_name,
            last_name,
            downloads_count: 0,
            created_at: now,
            last_active: now,
        }
    }
}
