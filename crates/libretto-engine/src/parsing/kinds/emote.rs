/// Bracketed stage directions: `[does something]`.
pub struct Emote;

impl Emote {
    pub const OPEN: char = '[';
    pub const CLOSE: char = ']';

    /// Returns the text inside a fully bracketed line.
    pub fn parse(line: &str) -> Option<&str> {
        line.strip_prefix(Self::OPEN)?.strip_suffix(Self::CLOSE)
    }

    /// A line that opens a bracket and never closes it.
    ///
    /// `[x] extra` is not malformed: it has a closing bracket, so it falls
    /// through to the lyric and staging rules.
    pub fn is_malformed(line: &str) -> bool {
        line.starts_with(Self::OPEN) && !line.contains(Self::CLOSE)
    }
}
