mod fetch;
mod forward;
mod probe;
mod webhook;

pub use fetch::{FetchErrorKind, FetchMedia};
pub use forward::ForwardFetcher;
pub use probe::{placeholder_descriptor, ProbeFetcher};
pub use webhook::set_webhook;
