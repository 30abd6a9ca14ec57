use crate::models::{Document, LineKind, TrackId};

pub fn check(doc: &Document) {
    let tracks = doc.tracks();

    assert!(
        doc.root_indices().windows(2).all(|pair| pair[0] < pair[1]),
        "roots are not in creation order: {:?}",
        doc.root_indices()
    );

    let roots: Vec<_> = doc.roots().collect();
    let parentless = tracks.iter().filter(|t| t.is_root()).count();
    assert_eq!(
        roots.len(),
        parentless,
        "root list and parentless tracks disagree"
    );

    for root in roots {
        assert!(
            matches!(root.id, TrackId::Root(_)),
            "root track has subtrack id {}",
            root.id
        );

        for (expected, sub) in doc.subtracks(root).enumerate() {
            assert_eq!(
                sub.id,
                TrackId::Sub {
                    parent: root.id.root_number(),
                    index: expected,
                },
                "subtrack ids under {} are not dense",
                root.id
            );
            assert_eq!(
                doc.parent(sub).map(|p| p.id),
                Some(root.id),
                "subtrack {} does not point back at its root",
                sub.id
            );
            assert!(
                sub.subtracks.is_empty(),
                "subtrack {} has its own subtracks",
                sub.id
            );
        }
    }

    for track in tracks {
        for line in &track.lines {
            assert_eq!(
                line.text.is_none(),
                line.kind == LineKind::Blank,
                "line text presence does not match kind in track {}: {line:?}",
                track.id
            );
            assert!(
                line.subtext.is_none() || line.kind == LineKind::Character,
                "subtext on non-character line in track {}: {line:?}",
                track.id
            );
        }
    }
}
