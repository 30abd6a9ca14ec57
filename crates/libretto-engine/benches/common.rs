// Benchmark helper functions - Rust's dead code analysis doesn't understand
// that these are used by benchmark files in the same directory
#[allow(dead_code)]
pub fn generate_libretto(tracks: usize) -> String {
    let mut content = String::new();

    for track in 1..=tracks {
        content.push_str(&format!("[{track},3:30] ACT {track}: somewhere\n"));
        content.push_str("The stage is bare except for a single chair and a lamp.\n\n");
        for sub in 0..4 {
            content.push_str(&format!("[{}:{:02}]\n", sub, (sub * 13) % 60));
            content.push_str("Steve: [with above, grinning]\n");
            content.push_str("Hello world\n[sighs]\nGoodbye world\n\n");
            content.push_str("Chorus:\nla la la\nla la la\n\n");
        }
    }

    content
}
