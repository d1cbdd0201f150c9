/// Where the stored media can be taken from.
///
/// The same `file_reference` column holds either a direct URL or a platform file id;
/// file ids never carry a scheme, so the kind is recovered from the value itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileReference<'a> {
    Url(&'a str),
    FileId(&'a str),
}

impl<'a> FileReference<'a> {
    pub fn parse(raw: &'a str) -> Option<Self> {
        let raw = raw.trim();
        if raw.is_empty() {
            return None;
        }
        if raw.starts_with("http://") || raw.starts_with("https://") {
            Some(FileReference::Url(raw))
        } else {
            Some(FileReference::FileId(raw))
        }
    }

    pub const fn file_id(self) -> Option<&'a str> {
        match self {
            FileReference::FileId(id) => Some(id),
            FileReference::Url(_) => None,
        }
    }
}
