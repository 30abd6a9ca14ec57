use std::fmt;

use serde::Serialize;
use thiserror::Error;

/// The two ways a libretto can stop parsing early.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize)]
pub enum ParseErrorKind {
    #[error("unexpected input looking for track")]
    UnexpectedStartToken,
    #[error("malformed emote")]
    MalformedEmote,
}

/// The error that halted a parse, with where it happened.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParseDiagnostic {
    pub kind: ParseErrorKind,
    /// 1-based, counting every physical line including blanks.
    pub line_number: usize,
    /// The offending line after trimming.
    pub raw_line: String,
}

impl fmt::Display for ParseDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Error at line {} [{}]: {}",
            self.line_number, self.kind, self.raw_line
        )
    }
}

impl std::error::Error for ParseDiagnostic {}

/// Holds at most one diagnostic: the first one latched wins.
#[derive(Debug, Default)]
pub struct DiagnosticLatch(Option<ParseDiagnostic>);

impl DiagnosticLatch {
    /// Records `diagnostic` unless one is already held. Returns whether it was recorded.
    pub fn latch(&mut self, diagnostic: ParseDiagnostic) -> bool {
        if self.0.is_some() {
            return false;
        }
        log::warn!("{diagnostic}");
        self.0 = Some(diagnostic);
        true
    }

    pub fn is_latched(&self) -> bool {
        self.0.is_some()
    }

    pub fn get(&self) -> Option<&ParseDiagnostic> {
        self.0.as_ref()
    }

    pub fn into_inner(self) -> Option<ParseDiagnostic> {
        self.0
    }
}
