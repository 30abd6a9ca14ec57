pub mod document;
pub mod time;

pub use document::{Document, Line, LineKind, Track, TrackId, TrackIndex};
pub use time::format_hms;
