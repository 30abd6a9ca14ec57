use std::fmt;
use std::time::Duration;

use serde::{Serialize, Serializer};

/// The semantic category of a single content line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum LineKind {
    Scene,
    SceneDetail,
    Staging,
    Character,
    Lyric,
    Emote,
    Blank,
}

impl LineKind {
    /// Stable uppercase label used in plain-text listings.
    pub fn label(self) -> &'static str {
        match self {
            LineKind::Scene => "SCENE",
            LineKind::SceneDetail => "SDETAILS",
            LineKind::Staging => "STAGING",
            LineKind::Character => "CHARACTER",
            LineKind::Lyric => "LYRIC",
            LineKind::Emote => "EMOTE",
            LineKind::Blank => "BLANK",
        }
    }
}

impl fmt::Display for LineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One unit of content belonging to a track.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Line {
    pub kind: LineKind,
    /// Absent only for [`LineKind::Blank`].
    pub text: Option<String>,
    /// Emote annotation attached to a character cue.
    pub subtext: Option<String>,
}

impl Line {
    /// Create a line carrying text and no subtext
    pub fn new(kind: LineKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: Some(text.into()),
            subtext: None,
        }
    }

    pub fn blank() -> Self {
        Self {
            kind: LineKind::Blank,
            text: None,
            subtext: None,
        }
    }

    /// Create a character cue, optionally annotated with an emote
    pub fn character(name: impl Into<String>, emote: Option<&str>) -> Self {
        Self {
            kind: LineKind::Character,
            text: Some(name.into()),
            subtext: emote.map(str::to_string),
        }
    }
}

/// Renders as `[LABEL]`, `[LABEL] text` or `[LABEL] text [subtext]`.
impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.text, &self.subtext) {
            (None, _) => write!(f, "[{}]", self.kind),
            (Some(text), None) => write!(f, "[{}] {text}", self.kind),
            (Some(text), Some(subtext)) => write!(f, "[{}] {text} [{subtext}]", self.kind),
        }
    }
}

/// Position of a track inside the [`Document`] arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TrackIndex(pub(crate) usize);

/// Identifier of a track as written in listings: `7` for a root, `7.0` for a subtrack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TrackId {
    Root(u64),
    Sub { parent: u64, index: usize },
}

impl TrackId {
    /// The root track number this id belongs to.
    pub fn root_number(self) -> u64 {
        match self {
            TrackId::Root(number) => number,
            TrackId::Sub { parent, .. } => parent,
        }
    }
}

impl fmt::Display for TrackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrackId::Root(number) => write!(f, "{number}"),
            TrackId::Sub { parent, index } => write!(f, "{parent}.{index}"),
        }
    }
}

impl Serialize for TrackId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// A named, timed segment of the libretto.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Track {
    pub id: TrackId,
    pub duration: Duration,
    /// Content lines in document order.
    pub lines: Vec<Line>,
    /// Child tracks in creation order. Always empty for a subtrack.
    pub subtracks: Vec<TrackIndex>,
    /// Back-reference to the owning root track.
    pub parent: Option<TrackIndex>,
}

impl Track {
    pub(crate) fn new(id: TrackId, duration: Duration, parent: Option<TrackIndex>) -> Self {
        Self {
            id,
            duration,
            lines: Vec::new(),
            subtracks: Vec::new(),
            parent,
        }
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }
}

/// The parsed libretto: root tracks in creation order, with their subtracks.
///
/// Every track lives in one flat arena; parent and child relations are
/// [`TrackIndex`] values into it. A `Document` is never mutated once parsing
/// has finished.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    tracks: Vec<Track>,
    roots: Vec<TrackIndex>,
}

impl Document {
    pub(crate) fn from_arena(tracks: Vec<Track>, roots: Vec<TrackIndex>) -> Self {
        Self { tracks, roots }
    }

    /// Root tracks in creation order
    pub fn roots(&self) -> impl Iterator<Item = &Track> + '_ {
        self.roots.iter().filter_map(|&idx| self.track(idx))
    }

    /// Arena positions of the root tracks, in creation order
    pub fn root_indices(&self) -> &[TrackIndex] {
        &self.roots
    }

    pub fn root_count(&self) -> usize {
        self.roots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Every track in arena (creation) order, roots and subtracks interleaved
    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn track(&self, idx: TrackIndex) -> Option<&Track> {
        self.tracks.get(idx.0)
    }

    /// Subtracks of `track` in creation order
    pub fn subtracks<'a>(&'a self, track: &'a Track) -> impl Iterator<Item = &'a Track> + 'a {
        track.subtracks.iter().filter_map(|&idx| self.track(idx))
    }

    pub fn parent(&self, track: &Track) -> Option<&Track> {
        track.parent.and_then(|idx| self.track(idx))
    }

    /// Look up a track by its displayed id
    pub fn find(&self, id: TrackId) -> Option<&Track> {
        self.tracks.iter().find(|t| t.id == id)
    }

    /// Sum of root track durations. Subtracks subdivide their parent and are not counted.
    pub fn total_duration(&self) -> Duration {
        self.roots().map(|t| t.duration).sum()
    }
}

#[derive(Serialize)]
struct TrackTree<'a> {
    id: TrackId,
    duration_secs: u64,
    lines: &'a [Line],
    subtracks: Vec<TrackTree<'a>>,
}

impl<'a> TrackTree<'a> {
    fn build(doc: &'a Document, track: &'a Track) -> Self {
        Self {
            id: track.id,
            duration_secs: track.duration.as_secs(),
            lines: &track.lines,
            subtracks: doc
                .subtracks(track)
                .map(|sub| TrackTree::build(doc, sub))
                .collect(),
        }
    }
}

#[derive(Serialize)]
struct DocumentTree<'a> {
    tracks: Vec<TrackTree<'a>>,
}

impl Serialize for Document {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        DocumentTree {
            tracks: self.roots().map(|t| TrackTree::build(self, t)).collect(),
        }
        .serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Document {
        let mut root = Track::new(TrackId::Root(3), Duration::from_secs(90), None);
        root.lines.push(Line::new(LineKind::Lyric, "la la"));
        root.subtracks.push(TrackIndex(1));
        let mut sub = Track::new(
            TrackId::Sub {
                parent: 3,
                index: 0,
            },
            Duration::from_secs(10),
            Some(TrackIndex(0)),
        );
        sub.lines.push(Line::character("Steve", Some("grinning")));
        let other = Track::new(TrackId::Root(4), Duration::from_secs(5), None);
        Document::from_arena(vec![root, sub, other], vec![TrackIndex(0), TrackIndex(2)])
    }

    #[test]
    fn track_id_display() {
        assert_eq!(TrackId::Root(12).to_string(), "12");
        assert_eq!(
            TrackId::Sub {
                parent: 12,
                index: 3
            }
            .to_string(),
            "12.3"
        );
    }

    #[test]
    fn line_kind_labels() {
        assert_eq!(LineKind::SceneDetail.label(), "SDETAILS");
        assert_eq!(LineKind::Blank.to_string(), "BLANK");
    }

    #[test]
    fn blank_line_has_no_text() {
        let line = Line::blank();
        assert_eq!(line.kind, LineKind::Blank);
        assert!(line.text.is_none());
        assert!(line.subtext.is_none());
    }

    #[test]
    fn line_display_forms() {
        assert_eq!(Line::blank().to_string(), "[BLANK]");
        assert_eq!(
            Line::new(LineKind::Lyric, "Hello world").to_string(),
            "[LYRIC] Hello world"
        );
        assert_eq!(
            Line::character("Steve", Some("grinning")).to_string(),
            "[CHARACTER] Steve [grinning]"
        );
    }

    #[test]
    fn roots_skip_subtracks() {
        let doc = sample();
        let ids: Vec<String> = doc.roots().map(|t| t.id.to_string()).collect();
        assert_eq!(ids, vec!["3", "4"]);
        assert_eq!(doc.root_count(), 2);
        assert_eq!(doc.root_indices(), &[TrackIndex(0), TrackIndex(2)]);
        assert_eq!(doc.tracks().len(), 3);
    }

    #[test]
    fn parent_and_subtracks_resolve_through_arena() {
        let doc = sample();
        let root = doc.roots().next().unwrap();
        let sub = doc.subtracks(root).next().unwrap();
        assert_eq!(sub.id.to_string(), "3.0");
        assert_eq!(doc.parent(sub).map(|p| p.id), Some(TrackId::Root(3)));
        assert!(doc.parent(root).is_none());
        assert!(root.is_root());
        assert!(!sub.is_root());
    }

    #[test]
    fn total_duration_counts_roots_only() {
        assert_eq!(sample().total_duration(), Duration::from_secs(95));
    }

    #[test]
    fn find_by_id() {
        let doc = sample();
        let found = doc.find(TrackId::Sub {
            parent: 3,
            index: 0,
        });
        assert_eq!(found.map(|t| t.lines.len()), Some(1));
        assert!(doc.find(TrackId::Root(99)).is_none());
    }

    #[test]
    fn serializes_as_nested_tree() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["tracks"][0]["id"], "3");
        assert_eq!(json["tracks"][0]["duration_secs"], 90);
        assert_eq!(json["tracks"][0]["subtracks"][0]["id"], "3.0");
        assert_eq!(
            json["tracks"][0]["subtracks"][0]["lines"][0]["subtext"],
            "grinning"
        );
        assert_eq!(json["tracks"][1]["subtracks"].as_array().unwrap().len(), 0);
    }
}
