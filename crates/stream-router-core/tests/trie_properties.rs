// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Property tests for trie registration and matching.
#![allow(clippy::unwrap_used)]

use proptest::prelude::*;
use stream_router_core::{HashChangeEvent, RouteTrie, Router};
use stream_router_dry_tests::Recorder;

#[derive(Debug, Clone)]
enum Seg {
    Lit(String),
    Param(String),
}

fn seg() -> impl Strategy<Value = Seg> {
    prop_oneof![
        "[a-z]{1,6}".prop_map(Seg::Lit),
        "[a-z]{1,6}".prop_map(Seg::Param),
    ]
}

fn render(segs: &[Seg]) -> String {
    segs.iter()
        .map(|s| match s {
            Seg::Lit(l) => format!("/{l}"),
            Seg::Param(p) => format!("/:{p}"),
        })
        .collect()
}

proptest! {
    #[test]
    fn params_zip_names_with_segments_verbatim(
        segs in prop::collection::vec(seg(), 1..6),
        values in prop::collection::vec("[A-Za-z0-9%#.]{1,8}", 6),
    ) {
        let mut trie: RouteTrie<()> = RouteTrie::new();
        trie.register(&render(&segs));

        let mut expected = Vec::new();
        let path: Vec<String> = segs
            .iter()
            .zip(&values)
            .map(|(s, v)| match s {
                Seg::Lit(l) => l.clone(),
                Seg::Param(name) => {
                    expected.push((name.clone(), v.clone()));
                    v.clone()
                }
            })
            .collect();
        let path = path.join("/");

        let (_, params) = trie.resolve(&path).unwrap();
        let mut dedup: Vec<(String, String)> = Vec::new();
        for (name, value) in expected {
            if let Some(entry) = dedup.iter_mut().find(|(n, _)| *n == name) {
                entry.1 = value;
            } else {
                dedup.push((name, value));
            }
        }
        let got: Vec<(String, String)> = params
            .iter()
            .map(|(n, v)| (n.to_string(), v.to_string()))
            .collect();
        prop_assert_eq!(got, dedup);
    }

    #[test]
    fn wrong_segment_count_never_matches(
        segs in prop::collection::vec(seg(), 1..6),
        extra in 1usize..3,
        shorter in any::<bool>(),
    ) {
        let router = Router::new();
        let stream = router.on_route(&render(&segs));
        let rec = Recorder::attach(&stream);
        let current = Recorder::attach(&router.current_route());

        let len = if shorter { segs.len().saturating_sub(extra) } else { segs.len() + extra };
        prop_assume!(len != segs.len());
        let path = vec!["zz"; len].join("/");
        router.handle_hash_change(&HashChangeEvent::new(format!("#{path}")));

        prop_assert!(rec.is_empty());
        prop_assert_eq!(current.values(), vec![None]);
    }

    #[test]
    fn registration_is_idempotent(segs in prop::collection::vec(seg(), 0..6)) {
        let router = Router::new();
        let pattern = render(&segs);
        let first = router.on_route(&pattern);
        let nodes = router.node_count();
        let second = router.on_route(&pattern);
        prop_assert!(first.ptr_eq(&second));
        prop_assert_eq!(router.node_count(), nodes);
        prop_assert_eq!(nodes, segs.len() + 1);
    }
}
