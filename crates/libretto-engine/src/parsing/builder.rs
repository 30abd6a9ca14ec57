use std::ops::ControlFlow;
use std::time::Duration;

use crate::models::{Document, Line, LineKind, Track, TrackId, TrackIndex};

use super::{
    ParsedDoc,
    classify::{Classification, HeaderRules, LibrettoLineClassifier, ParseMode},
    diagnostic::{DiagnosticLatch, ParseDiagnostic, ParseErrorKind},
};

/// How many headers deep a single line may open tracks through remainders.
const MAX_HEADER_NESTING: usize = 1;

/// The parse state machine and track-tree builder.
///
/// Owns the mode, the track arena, the current-track cursor and the
/// diagnostic latch. Feed it lines with [`push`](Self::push) until it breaks
/// or input runs out, then call [`finish`](Self::finish).
pub struct TrackBuilder {
    classifier: LibrettoLineClassifier,
    mode: ParseMode,
    tracks: Vec<Track>,
    roots: Vec<TrackIndex>,
    cursor: Option<TrackIndex>,
    line_number: usize,
    latch: DiagnosticLatch,
}

impl TrackBuilder {
    pub fn new() -> Self {
        Self {
            classifier: LibrettoLineClassifier,
            mode: ParseMode::Begin,
            tracks: vec![],
            roots: vec![],
            cursor: None,
            line_number: 0,
            latch: DiagnosticLatch::default(),
        }
    }

    pub fn mode(&self) -> ParseMode {
        self.mode
    }

    /// Number of lines consumed so far.
    pub fn line_number(&self) -> usize {
        self.line_number
    }

    /// The track that content lines are currently appended to.
    pub fn current_track(&self) -> Option<&Track> {
        self.cursor.and_then(|idx| self.tracks.get(idx.0))
    }

    pub fn diagnostic(&self) -> Option<&ParseDiagnostic> {
        self.latch.get()
    }

    /// Consumes one physical line. Breaks once a diagnostic has been latched.
    pub fn push(&mut self, raw: &str) -> ControlFlow<()> {
        if self.latch.is_latched() {
            return ControlFlow::Break(());
        }
        self.line_number += 1;

        let line = raw.trim();
        let class = self.classifier.classify(line, self.mode);
        log::trace!(
            "line {} in {:?}: {:?}",
            self.line_number,
            self.mode,
            class
        );
        self.apply(class, line, 0);

        if self.latch.is_latched() {
            ControlFlow::Break(())
        } else {
            ControlFlow::Continue(())
        }
    }

    pub fn finish(self) -> ParsedDoc {
        log::debug!(
            "parsed {} tracks ({} root) from {} lines",
            self.tracks.len(),
            self.roots.len(),
            self.line_number
        );
        ParsedDoc {
            document: Document::from_arena(self.tracks, self.roots),
            diagnostic: self.latch.into_inner(),
        }
    }

    fn apply(&mut self, class: Classification<'_>, line: &str, depth: usize) {
        match class {
            Classification::Blank => match self.mode {
                // Nothing to attach to before the first track.
                ParseMode::Begin => {}
                ParseMode::InTrack => self.append(Line::blank()),
                ParseMode::InScene | ParseMode::InLyric => {
                    self.set_mode(ParseMode::InTrack);
                    self.append(Line::blank());
                }
            },
            Classification::TrackHeader(open) => {
                self.open_track(open.number, open.duration);
                self.enter_track();
                self.reclassify(open.rest, line, depth);
            }
            Classification::SubtrackHeader(open) => {
                self.open_subtrack(open.duration);
                self.enter_track();
                self.reclassify(open.rest, line, depth);
            }
            Classification::Scene(text) => {
                self.append(Line::new(LineKind::Scene, text));
                self.set_mode(ParseMode::InScene);
            }
            Classification::SceneDetail(text) => {
                self.append(Line::new(LineKind::SceneDetail, text));
            }
            Classification::Character(cue) => {
                self.append(Line::character(cue.name, cue.emote));
                self.set_mode(ParseMode::InLyric);
            }
            Classification::Emote(text) => {
                self.append(Line::new(LineKind::Emote, text));
                self.set_mode(ParseMode::InLyric);
            }
            Classification::Staging(text) => {
                self.append(Line::new(LineKind::Staging, text));
            }
            Classification::Lyric(text) => {
                self.append(Line::new(LineKind::Lyric, text));
                self.set_mode(ParseMode::InLyric);
            }
            Classification::MalformedEmote => self.fail(ParseErrorKind::MalformedEmote, line),
            Classification::UnexpectedStartToken => {
                self.fail(ParseErrorKind::UnexpectedStartToken, line)
            }
        }
    }

    /// Runs the text trailing a header through the classifier once more.
    ///
    /// A header inside the remainder is opened, but past
    /// [`MAX_HEADER_NESTING`] header rules are suppressed, so this recurses at
    /// most one level further.
    fn reclassify(&mut self, rest: &str, line: &str, depth: usize) {
        if rest.is_empty() {
            return;
        }
        let headers = if depth < MAX_HEADER_NESTING {
            HeaderRules::Allowed
        } else {
            HeaderRules::Suppressed
        };
        let class = self.classifier.classify_with(rest, self.mode, headers);
        log::trace!("line {} remainder: {:?}", self.line_number, class);
        self.apply(class, line, depth + 1);
    }

    /// A header found mid-lyric keeps lyric mode; anywhere else it enters track mode.
    fn enter_track(&mut self) {
        if self.mode != ParseMode::InLyric {
            self.set_mode(ParseMode::InTrack);
        }
    }

    fn set_mode(&mut self, mode: ParseMode) {
        if self.mode != mode {
            log::debug!(
                "line {}: {:?} -> {:?}",
                self.line_number,
                self.mode,
                mode
            );
            self.mode = mode;
        }
    }

    fn open_track(&mut self, number: u64, duration: Duration) {
        let idx = TrackIndex(self.tracks.len());
        self.tracks.push(Track::new(TrackId::Root(number), duration, None));
        self.roots.push(idx);
        self.cursor = Some(idx);
        log::debug!("line {}: track {number} ({duration:?})", self.line_number);
    }

    /// Opens a subtrack under the current root track.
    ///
    /// If the cursor sits on a subtrack it is first promoted to that
    /// subtrack's parent, so subtracks never nest.
    fn open_subtrack(&mut self, duration: Duration) {
        let Some(cursor) = self.cursor else {
            return;
        };
        let parent_idx = self
            .tracks
            .get(cursor.0)
            .and_then(|t| t.parent)
            .unwrap_or(cursor);
        let Some(parent) = self.tracks.get(parent_idx.0) else {
            return;
        };

        let id = TrackId::Sub {
            parent: parent.id.root_number(),
            index: parent.subtracks.len(),
        };
        let idx = TrackIndex(self.tracks.len());
        self.tracks.push(Track::new(id, duration, Some(parent_idx)));
        if let Some(parent) = self.tracks.get_mut(parent_idx.0) {
            parent.subtracks.push(idx);
        }
        self.cursor = Some(idx);
        log::debug!("line {}: subtrack {id} ({duration:?})", self.line_number);
    }

    fn append(&mut self, line: Line) {
        if let Some(track) = self.cursor.and_then(|idx| self.tracks.get_mut(idx.0)) {
            track.lines.push(line);
        }
    }

    fn fail(&mut self, kind: ParseErrorKind, line: &str) {
        self.latch.latch(ParseDiagnostic {
            kind,
            line_number: self.line_number,
            raw_line: line.to_string(),
        });
    }
}

impl Default for TrackBuilder {
    fn default() -> Self {
        Self::new()
    }
}
