/// Flavor text: an otherwise unmatched line that runs longer than a lyric.
pub struct Staging;

impl Staging {
    /// Lines longer than this many characters are staging rather than lyric.
    pub const THRESHOLD: usize = 40;

    pub fn matches(line: &str) -> bool {
        line.chars().count() > Self::THRESHOLD
    }
}
