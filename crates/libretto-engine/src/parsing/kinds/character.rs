use std::sync::OnceLock;

use regex::Regex;

/// A speaker cue: `Steve:` or `Steve: [grinning]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CharacterCue<'a> {
    pub name: &'a str,
    pub emote: Option<&'a str>,
}

fn bare_regex() -> &'static Regex {
    static BARE_REGEX: OnceLock<Regex> = OnceLock::new();
    BARE_REGEX.get_or_init(|| Regex::new(r"^([^:]+):$").expect("Invalid character regex"))
}

fn emote_regex() -> &'static Regex {
    static EMOTE_REGEX: OnceLock<Regex> = OnceLock::new();
    EMOTE_REGEX
        .get_or_init(|| Regex::new(r"^([^:]+): \[(.*)\]$").expect("Invalid character emote regex"))
}

impl<'a> CharacterCue<'a> {
    /// Bare cues are tried before annotated ones.
    pub fn parse(line: &'a str) -> Option<Self> {
        if let Some(caps) = bare_regex().captures(line) {
            return Some(Self {
                name: caps.get(1)?.as_str(),
                emote: None,
            });
        }
        let caps = emote_regex().captures(line)?;
        Some(Self {
            name: caps.get(1)?.as_str(),
            emote: Some(caps.get(2)?.as_str()),
        })
    }
}
