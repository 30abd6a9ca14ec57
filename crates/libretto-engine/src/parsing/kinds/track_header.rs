use std::sync::OnceLock;
use std::time::Duration;

use regex::{Captures, Regex};

/// Timing headers that open tracks.
///
/// All header syntax lives here: `[7,1:30]` opens root track 7 lasting
/// ninety seconds, `[0:45]` opens a subtrack. Any text after the closing
/// bracket is returned as the trimmed `rest`.
pub struct TrackHeader;

/// A matched root track header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrackOpen<'a> {
    pub number: u64,
    pub duration: Duration,
    pub rest: &'a str,
}

/// A matched subtrack header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubtrackOpen<'a> {
    pub duration: Duration,
    pub rest: &'a str,
}

fn track_regex() -> &'static Regex {
    static TRACK_REGEX: OnceLock<Regex> = OnceLock::new();
    TRACK_REGEX.get_or_init(|| {
        Regex::new(r"^\[([0-9]+),([0-9]+):([0-9]+)\](.*)$").expect("Invalid track header regex")
    })
}

fn subtrack_regex() -> &'static Regex {
    static SUBTRACK_REGEX: OnceLock<Regex> = OnceLock::new();
    SUBTRACK_REGEX.get_or_init(|| {
        Regex::new(r"^\[([0-9]+):([0-9]+)\](.*)$").expect("Invalid subtrack header regex")
    })
}

impl TrackHeader {
    /// Matches `[<track>,<min>:<sec>]<rest>`.
    ///
    /// Numbers too large to represent make the line not a header at all.
    pub fn parse_track(line: &str) -> Option<TrackOpen<'_>> {
        let caps = track_regex().captures(line)?;
        Some(TrackOpen {
            number: caps[1].parse().ok()?,
            duration: Self::duration(&caps[2], &caps[3])?,
            rest: Self::rest(&caps, 4),
        })
    }

    /// Matches `[<min>:<sec>]<rest>`.
    pub fn parse_subtrack(line: &str) -> Option<SubtrackOpen<'_>> {
        let caps = subtrack_regex().captures(line)?;
        Some(SubtrackOpen {
            duration: Self::duration(&caps[1], &caps[2])?,
            rest: Self::rest(&caps, 3),
        })
    }

    fn duration(minutes: &str, seconds: &str) -> Option<Duration> {
        let minutes: u64 = minutes.parse().ok()?;
        let seconds: u64 = seconds.parse().ok()?;
        let total = minutes.checked_mul(60)?.checked_add(seconds)?;
        Some(Duration::from_secs(total))
    }

    fn rest<'h>(caps: &Captures<'h>, group: usize) -> &'h str {
        caps.get(group).map_or("", |m| m.as_str()).trim()
    }
}
