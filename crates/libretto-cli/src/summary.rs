use std::fmt;

use libretto_engine::{Document, Track, format_hms};

/// Plain-text listing of a document: every track with its lines, then a
/// timing summary of the root tracks.
pub struct Summary<'a>(pub &'a Document);

impl fmt::Display for Summary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let doc = self.0;
        for track in doc.roots() {
            write_track(f, doc, track)?;
        }

        for track in doc.roots() {
            writeln!(f, "Track {}, ({})", track.id, format_hms(track.duration))?;
        }
        writeln!(f, "Tracks: {}", doc.root_count())?;
        writeln!(f, "Total time: {}", format_hms(doc.total_duration()))
    }
}

fn write_track(f: &mut fmt::Formatter<'_>, doc: &Document, track: &Track) -> fmt::Result {
    let label = if track.is_root() { "Track" } else { "Subtrack" };
    writeln!(f, "{label} {}, ({})", track.id, format_hms(track.duration))?;

    for line in &track.lines {
        writeln!(f, "{line}")?;
    }
    for sub in doc.subtracks(track) {
        write_track(f, doc, sub)?;
    }
    Ok(())
}
