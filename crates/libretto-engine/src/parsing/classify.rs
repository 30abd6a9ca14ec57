use super::kinds::{CharacterCue, Emote, Scene, Staging, SubtrackOpen, TrackHeader, TrackOpen};

/// Where the parser currently is in the libretto.
///
/// The same text classifies differently depending on the mode, so the mode is
/// always passed to the classifier explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParseMode {
    /// Before the first track header.
    #[default]
    Begin,
    InTrack,
    /// After a scene title, until the next blank line.
    InScene,
    /// After a cue, emote or lyric, until the next blank line.
    InLyric,
}

/// What a single trimmed line is, with its captured fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification<'a> {
    Blank,
    TrackHeader(TrackOpen<'a>),
    SubtrackHeader(SubtrackOpen<'a>),
    Scene(&'a str),
    SceneDetail(&'a str),
    Character(CharacterCue<'a>),
    Emote(&'a str),
    Staging(&'a str),
    Lyric(&'a str),
    /// `[` with no closing bracket on the line. Halts the parse.
    MalformedEmote,
    /// Non-blank input before any track header. Halts the parse.
    UnexpectedStartToken,
}

/// Whether track and subtrack headers may be recognised.
///
/// The builder suppresses them for the remainder of a header that was itself
/// found in a remainder, which bounds header nesting to one level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderRules {
    Allowed,
    Suppressed,
}

/// Classifies trimmed lines for the track builder.
///
/// Pure: the result depends only on the line and the mode.
#[derive(Debug, Clone, Copy, Default)]
pub struct LibrettoLineClassifier;

impl LibrettoLineClassifier {
    pub fn classify<'a>(&self, line: &'a str, mode: ParseMode) -> Classification<'a> {
        self.classify_with(line, mode, HeaderRules::Allowed)
    }

    pub fn classify_with<'a>(
        &self,
        line: &'a str,
        mode: ParseMode,
        headers: HeaderRules,
    ) -> Classification<'a> {
        match mode {
            ParseMode::Begin => Self::begin(line, headers),
            ParseMode::InTrack => Self::in_track(line, headers),
            ParseMode::InScene => Self::in_scene(line),
            ParseMode::InLyric => Self::in_lyric(line, headers),
        }
    }

    fn begin(line: &str, headers: HeaderRules) -> Classification<'_> {
        if line.is_empty() {
            return Classification::Blank;
        }
        match Self::track_header(line, headers) {
            Some(open) => Classification::TrackHeader(open),
            None => Classification::UnexpectedStartToken,
        }
    }

    fn in_scene(line: &str) -> Classification<'_> {
        if line.is_empty() {
            Classification::Blank
        } else {
            Classification::SceneDetail(line)
        }
    }

    // Precedence is significant: first match wins.
    fn in_track(line: &str, headers: HeaderRules) -> Classification<'_> {
        if Scene::matches(line) {
            return Classification::Scene(line);
        }
        if line.is_empty() {
            return Classification::Blank;
        }
        if let Some(open) = Self::track_header(line, headers) {
            return Classification::TrackHeader(open);
        }
        if let Some(open) = Self::subtrack_header(line, headers) {
            return Classification::SubtrackHeader(open);
        }
        if let Some(cue) = CharacterCue::parse(line) {
            return Classification::Character(cue);
        }
        if let Some(text) = Emote::parse(line) {
            return Classification::Emote(text);
        }
        if Emote::is_malformed(line) {
            return Classification::MalformedEmote;
        }
        if Staging::matches(line) {
            return Classification::Staging(line);
        }
        Classification::Lyric(line)
    }

    fn in_lyric(line: &str, headers: HeaderRules) -> Classification<'_> {
        if line.is_empty() {
            return Classification::Blank;
        }
        if let Some(open) = Self::track_header(line, headers) {
            return Classification::TrackHeader(open);
        }
        if let Some(open) = Self::subtrack_header(line, headers) {
            return Classification::SubtrackHeader(open);
        }
        if let Some(text) = Emote::parse(line) {
            return Classification::Emote(text);
        }
        Classification::Lyric(line)
    }

    fn track_header(line: &str, headers: HeaderRules) -> Option<TrackOpen<'_>> {
        match headers {
            HeaderRules::Allowed => TrackHeader::parse_track(line),
            HeaderRules::Suppressed => None,
        }
    }

    fn subtrack_header(line: &str, headers: HeaderRules) -> Option<SubtrackOpen<'_>> {
        match headers {
            HeaderRules::Allowed => TrackHeader::parse_subtrack(line),
            HeaderRules::Suppressed => None,
        }
    }
}
