use libretto_engine::parsing::{ParseErrorKind, parse_str, snapshot};
use libretto_engine::{Line, LineKind, TrackId};
use pretty_assertions::assert_eq;
use rstest::rstest;

fn load_fixture(name: &str) -> String {
    std::fs::read_to_string(format!(
        "{}/tests/fixtures/{name}.lib",
        env!("CARGO_MANIFEST_DIR")
    ))
    .unwrap()
}

#[test]
fn fixture_full_show() {
    let parsed = parse_str(&load_fixture("full_show"));
    assert!(parsed.diagnostic.is_none());
    snapshot::invariants(&parsed.document);

    let snap = snapshot::normalize(&parsed.document);
    insta::assert_debug_snapshot!("full_show", snap);
}

#[test]
fn fixture_round_trip() {
    let parsed = parse_str(&load_fixture("round_trip"));
    assert!(parsed.diagnostic.is_none());
    snapshot::invariants(&parsed.document);

    let doc = parsed.document;
    assert_eq!(doc.root_count(), 1);
    let track = doc.roots().next().unwrap();
    assert_eq!(track.id, TrackId::Root(1));
    assert_eq!(track.duration.as_secs(), 30);
    assert_eq!(
        track.lines,
        vec![
            Line::new(LineKind::Scene, "PROLOGUE"),
            Line::new(LineKind::SceneDetail, "Some detail"),
            Line::blank(),
            Line::character("Steve", None),
            Line::new(LineKind::Lyric, "Hello world"),
        ]
    );
}

#[test]
fn fixture_promotion() {
    let parsed = parse_str(&load_fixture("promotion"));
    snapshot::invariants(&parsed.document);

    let snap = snapshot::normalize(&parsed.document);
    assert_eq!(snap.len(), 1);
    let root = &snap[0];
    assert_eq!(root.id, "1");
    assert_eq!(root.seconds, 5);
    assert!(root.lines.is_empty());

    let subs: Vec<(&str, u64)> = root
        .subtracks
        .iter()
        .map(|s| (s.id.as_str(), s.seconds))
        .collect();
    assert_eq!(subs, vec![("1.0", 3), ("1.1", 2)]);
    assert_eq!(
        root.subtracks[0].lines,
        vec!["[LYRIC] first part".to_string(), "[BLANK]".to_string()]
    );
    assert_eq!(root.subtracks[1].lines, vec!["[LYRIC] second part".to_string()]);

    let second = parsed
        .document
        .find(TrackId::Sub {
            parent: 1,
            index: 1,
        })
        .unwrap();
    assert_eq!(second.duration.as_secs(), 2);
    assert!(parsed.document.parent(second).is_some_and(|p| p.id == TrackId::Root(1)));
}

#[test]
fn fixture_malformed_emote_keeps_partial_document() {
    let parsed = parse_str(&load_fixture("malformed_emote"));
    snapshot::invariants(&parsed.document);

    let diagnostic = parsed.diagnostic.unwrap();
    assert_eq!(diagnostic.kind, ParseErrorKind::MalformedEmote);
    assert_eq!(diagnostic.line_number, 6);
    assert_eq!(diagnostic.raw_line, "[open bracket with no close");

    let doc = parsed.document;
    assert_eq!(doc.root_count(), 1);
    let kinds: Vec<LineKind> = doc
        .roots()
        .next()
        .unwrap()
        .lines
        .iter()
        .map(|l| l.kind)
        .collect();
    assert_eq!(
        kinds,
        vec![LineKind::Character, LineKind::Lyric, LineKind::Blank]
    );
}

#[rstest]
#[case("[1,0:30]", 1, 30)]
#[case("[7,3:05]", 7, 185)]
#[case("[12,0:00]", 12, 0)]
#[case("[3,10:59]", 3, 659)]
fn track_header_sets_id_and_duration(
    #[case] header: &str,
    #[case] number: u64,
    #[case] seconds: u64,
) {
    let doc = parse_str(header).document;
    let track = doc.roots().next().unwrap();
    assert_eq!(track.id.to_string(), number.to_string());
    assert_eq!(track.duration.as_secs(), seconds);
}

#[test]
fn subtrack_ids_stay_dense_across_promotions() {
    let source = "[4,1:00]\n[0:10]\nla\n[0:10]\n\n[0:10]\nPROLOGUE\n\n[0:10]\n";
    let parsed = parse_str(source);
    snapshot::invariants(&parsed.document);

    let root = parsed.document.roots().next().unwrap();
    let ids: Vec<String> = parsed
        .document
        .subtracks(root)
        .map(|t| t.id.to_string())
        .collect();
    assert_eq!(ids, vec!["4.0", "4.1", "4.2", "4.3"]);
}

#[test]
fn scene_collects_details_until_blank() {
    let doc = parse_str("[1,0:30]\nPROLOGUE\nfirst detail\nSteve:\n\nSteve:\n").document;
    let track = doc.roots().next().unwrap();
    assert_eq!(
        track.lines,
        vec![
            Line::new(LineKind::Scene, "PROLOGUE"),
            Line::new(LineKind::SceneDetail, "first detail"),
            Line::new(LineKind::SceneDetail, "Steve:"),
            Line::blank(),
            Line::character("Steve", None),
        ]
    );
}

#[test]
fn character_cue_with_emote() {
    let doc = parse_str("[1,0:30]\nSteve: [grinning]\n").document;
    let line = &doc.roots().next().unwrap().lines[0];
    assert_eq!(line.kind, LineKind::Character);
    assert_eq!(line.text.as_deref(), Some("Steve"));
    assert_eq!(line.subtext.as_deref(), Some("grinning"));
}

#[test]
fn unexpected_start_token_yields_empty_document() {
    let parsed = parse_str("\n\nOnce upon a time\n[1,0:30]\n");
    let diagnostic = parsed.diagnostic.unwrap();
    assert_eq!(diagnostic.kind, ParseErrorKind::UnexpectedStartToken);
    assert_eq!(diagnostic.line_number, 3);
    assert!(parsed.document.is_empty());
}

#[test]
fn reparsing_produces_equal_documents() {
    let source = load_fixture("full_show");
    assert_eq!(parse_str(&source), parse_str(&source));
}
