pub mod io;
pub mod models;
pub mod parsing;

// Re-export key types for easier usage
pub use io::{IoError, read_libretto};
pub use models::*;
pub use parsing::{
    ParseDiagnostic, ParseErrorKind, ParsedDoc, ReadError, parse_lines, parse_reader, parse_str,
};
