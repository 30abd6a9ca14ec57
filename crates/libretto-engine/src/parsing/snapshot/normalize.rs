use serde::Serialize;

use crate::models::{Document, Track};

/// A track reduced to what snapshots care about.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrackSnap {
    pub id: String,
    pub seconds: u64,
    pub lines: Vec<String>,
    pub subtracks: Vec<TrackSnap>,
}

pub fn normalize(doc: &Document) -> Vec<TrackSnap> {
    doc.roots().map(|t| snap_track(doc, t)).collect()
}

fn snap_track(doc: &Document, track: &Track) -> TrackSnap {
    TrackSnap {
        id: track.id.to_string(),
        seconds: track.duration.as_secs(),
        lines: track.lines.iter().map(ToString::to_string).collect(),
        subtracks: doc.subtracks(track).map(|t| snap_track(doc, t)).collect(),
    }
}
