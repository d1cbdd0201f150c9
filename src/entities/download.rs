use time::OffsetDateTime;

use crate::{entities::MediaDescriptor, value_objects::MediaType};

#[derive(Debug, Clone)]
pub struct DownloadRecord {
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

impl DownloadRecord {
    pub fn descriptor(&self) -> MediaDescriptor {
        MediaDescriptor {
            media_type: self.media_type,
            title: self.title.clone(),
            file_reference: self.file_reference.clone(),
            file_size: self.file_size,
            thumbnail: self.thumbnail_reference.clone(),
            duration: None,
        }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DownloadStats {
    /// Stored rows, one per fetched link (duplicates included)
    pub records: i64,
    pub cached: i64,
    /// Sum of known file sizes in bytes
    pub total_size: i64,
    /// Sum of per-row download counters
    pub total_download_count: i64,
}
