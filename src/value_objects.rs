mod file_reference;
mod media_type;

pub use file_reference::FileReference;
pub use media_type::MediaType;
