//! # Libretto Parsing
//!
//! Two cooperating pieces turn a stream of lines into a [`Document`]:
//!
//! 1. **Line Classification** (`classify`): `LibrettoLineClassifier` decides what
//!    a trimmed line is under the current `ParseMode`, using a fixed precedence
//!    of pattern tests. The same text can classify differently per mode.
//!
//! 2. **Tree Construction** (`builder`): `TrackBuilder` owns the mode, the track
//!    arena and the current-track cursor, applies each classification and
//!    latches the first error, after which it stops consuming input.
//!
//! ## Modules
//!
//! - **`kinds`**: one owner per line shape (track headers, scenes, cues, emotes, staging)
//! - **`classify`**: `ParseMode`, `Classification`, `LibrettoLineClassifier`
//! - **`builder`**: `TrackBuilder` state machine
//! - **`diagnostic`**: `ParseDiagnostic` and the first-error-wins latch
//! - **`snapshot`**: normalisation and invariant checks for tests
//!
//! ## Key Invariants
//!
//! - Track nesting depth is at most 2: subtracks always hang off a root track
//! - Subtrack ids under a root are dense, starting at 0
//! - A malformed libretto still yields everything parsed before the failing line

pub mod builder;
pub mod classify;
pub mod diagnostic;
pub mod kinds;
pub mod snapshot;

use std::io::BufRead;

pub use builder::TrackBuilder;
pub use classify::{Classification, HeaderRules, LibrettoLineClassifier, ParseMode};
pub use diagnostic::{DiagnosticLatch, ParseDiagnostic, ParseErrorKind};

use crate::models::Document;

/// Result of a parse: the best-effort document plus the error that halted it, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedDoc {
    pub document: Document,
    pub diagnostic: Option<ParseDiagnostic>,
}

impl ParsedDoc {
    pub fn into_parts(self) -> (Document, Option<ParseDiagnostic>) {
        (self.document, self.diagnostic)
    }

    pub fn is_complete(&self) -> bool {
        self.diagnostic.is_none()
    }
}

pub fn parse_lines<I, S>(lines: I) -> ParsedDoc
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut builder = TrackBuilder::new();
    for line in lines {
        if builder.push(line.as_ref()).is_break() {
            break;
        }
    }
    builder.finish()
}

pub fn parse_str(source: &str) -> ParsedDoc {
    parse_lines(source.lines())
}

/// A read failure partway through the input.
///
/// `partial` holds everything parsed from the lines before the failing one.
#[derive(Debug, thiserror::Error)]
#[error("read failed at line {line_number}: {source}")]
pub struct ReadError {
    pub line_number: usize,
    pub source: std::io::Error,
    pub partial: ParsedDoc,
}

/// Parses from a buffered reader. Only read failures are errors; malformed
/// input is reported through [`ParsedDoc::diagnostic`].
pub fn parse_reader<R: BufRead>(reader: R) -> Result<ParsedDoc, ReadError> {
    let mut builder = TrackBuilder::new();
    for line in reader.lines() {
        let line = match line {
            Ok(line) => line,
            Err(source) => {
                return Err(ReadError {
                    line_number: builder.line_number() + 1,
                    source,
                    partial: builder.finish(),
                });
            }
        };
        if builder.push(&line).is_break() {
            break;
        }
    }
    Ok(builder.finish())
}
