pub mod character;
pub mod emote;
pub mod scene;
pub mod staging;
pub mod track_header;

pub use character::CharacterCue;
pub use emote::Emote;
pub use scene::Scene;
pub use staging::Staging;
pub use track_header::{SubtrackOpen, TrackHeader, TrackOpen};
