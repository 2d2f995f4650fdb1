//! Serving pages from one rescored order.

use super::common::{doc_ids, make_window_with_ids};
use mixup::{paginate, required_window, rescore, RescoreConfig, Seed};
use std::collections::HashSet;

fn catalog() -> Vec<mixup::Hit> {
    make_window_with_ids(&[
        (20.0, "acme"),
        (19.0, "acme"),
        (18.0, "globex"),
        (17.0, "acme"),
        (16.0, "initech"),
        (15.0, "globex"),
        (14.0, "acme"),
        (13.0, "umbrella"),
        (12.0, "initech"),
        (11.0, "acme"),
        (10.0, "globex"),
        (9.0, "hooli"),
    ])
}

#[test]
fn test_pages_partition_the_rescored_order() {
    let hits = catalog();
    let config = RescoreConfig::seeded_shuffle(Seed::from("session-9"));
    let output = rescore(&hits, &config).unwrap();

    let mut seen = HashSet::new();
    for from in (0..hits.len()).step_by(4) {
        let page = paginate(&output, from, 4);
        assert_eq!(page.len(), 4);
        for id in doc_ids(page) {
            assert!(seen.insert(id), "doc {} shown on two pages", id);
        }
    }
    assert_eq!(seen.len(), hits.len());
}

#[test]
fn test_repeated_calls_serve_identical_pages() {
    let hits = catalog();
    let config = RescoreConfig::seeded_shuffle(Seed::Int(31337));

    let page_one = rescore(&hits, &config).unwrap();
    let page_two = rescore(&hits, &config).unwrap();
    assert_eq!(
        doc_ids(paginate(&page_one, 4, 4)),
        doc_ids(paginate(&page_two, 4, 4))
    );
}

#[test]
fn test_required_window_covers_deep_pages() {
    let hits = catalog();
    let from = 8;
    let size = 4;
    let window = required_window(3, from, size);
    assert_eq!(window, 12);

    let config = RescoreConfig::round_robin().with_window_size(window);
    let output = rescore(&hits, &config).unwrap();
    let page = paginate(&output, from, size);
    assert!(page.iter().all(|hit| hit.was_rescored()));
}

#[test]
fn test_page_past_end_is_empty() {
    let hits = catalog();
    let output = rescore(&hits, &RescoreConfig::round_robin()).unwrap();
    assert!(paginate(&output, 100, 10).is_empty());
    assert_eq!(paginate(&output, 10, 10).len(), 2);
}
