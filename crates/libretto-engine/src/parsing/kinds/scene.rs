use std::sync::OnceLock;

use regex::Regex;

/// Scene titles: a line of uppercase letters, digits and spaces, optionally
/// followed by `:` and free detail text (`ACT 2: The garden`).
///
/// The whole line is kept as the scene text; detail is not split out.
pub struct Scene;

fn scene_regex() -> &'static Regex {
    static SCENE_REGEX: OnceLock<Regex> = OnceLock::new();
    SCENE_REGEX.get_or_init(|| Regex::new(r"^[A-Z0-9 ]+(?::.*)?$").expect("Invalid scene regex"))
}

impl Scene {
    pub fn matches(line: &str) -> bool {
        scene_regex().is_match(line)
    }
}
