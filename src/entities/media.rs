use crate::value_objects::{FileReference, MediaType};

/// Result of a fetch or a cache lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaDescriptor {
    pub media_type: MediaType,
    pub title: String,
    /// Direct URL or platform file id, see [`FileReference`]
    pub file_reference: String,
    pub file_size: Option<i64>,
    pub thumbnail: Option<String>,
    /// Seconds, known only for freshly forwarded videos
    pub duration: Option<i64>,
}

impl MediaDescriptor {
    pub fn reference(&self) -> Option<FileReference<'_>> {
        FileReference::parse(&self.file_reference)
    }

    pub fn file_id(&self) -> Option<&str> {
        self.reference().and_then(FileReference::file_id)
    }
}
