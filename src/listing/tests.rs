//! Unit tests for the pagination and sorting vocabulary.

use super::{Page, PageRequest, SortOrder};
use rstest::rstest;

#[rstest]
fn page_request_applies_defaults_when_unset() {
    let request = PageRequest::new(None, None);

    assert_eq!(request.page(), 1);
    assert_eq!(request.limit(), 10);
    assert_eq!(request.offset(), 0);
}

#[rstest]
#[case(Some(0), 1)]
#[case(Some(1), 1)]
#[case(Some(7), 7)]
fn page_request_floor_clamps_page(#[case] raw: Option<u32>, #[case] expected: u32) {
    assert_eq!(PageRequest::new(raw, None).page(), expected);
}

#[rstest]
#[case(Some(0), 1)]
#[case(Some(1), 1)]
#[case(Some(100), 100)]
#[case(Some(101), 100)]
#[case(Some(5000), 100)]
fn page_request_clamps_limit_into_bounds(#[case] raw: Option<u32>, #[case] expected: u32) {
    assert_eq!(PageRequest::new(None, raw).limit(), expected);
}

#[rstest]
#[case(1, 10, 0)]
#[case(2, 10, 10)]
#[case(3, 25, 50)]
#[case(2, 5, 5)]
fn page_request_offset_skips_prior_pages(#[case] page: u32, #[case] limit: u32, #[case] expected: u64) {
    assert_eq!(PageRequest::new(Some(page), Some(limit)).offset(), expected);
}

#[rstest]
#[case(0, 10, 1)]
#[case(1, 10, 1)]
#[case(10, 10, 1)]
#[case(11, 10, 2)]
#[case(12, 5, 3)]
#[case(100, 100, 1)]
#[case(101, 100, 2)]
fn page_count_is_ceiling_with_floor_of_one(#[case] total: u64, #[case] limit: u32, #[case] expected: u64) {
    let request = PageRequest::new(None, Some(limit));
    let envelope = Page::<u32>::new(Vec::new(), total, request);

    assert_eq!(envelope.page_count(), expected);
}

#[rstest]
fn page_envelope_reports_window_metadata() {
    let request = PageRequest::new(Some(2), Some(5));
    let envelope = Page::new(vec!["a", "b"], 12, request);

    assert_eq!(envelope.items(), ["a", "b"]);
    assert_eq!(envelope.total(), 12);
    assert_eq!(envelope.page(), 2);
    assert_eq!(envelope.limit(), 5);
    assert_eq!(envelope.page_count(), 3);
}

#[rstest]
fn page_envelope_map_preserves_metadata() {
    let request = PageRequest::new(Some(2), Some(5));
    let envelope = Page::new(vec![1_u32, 2], 12, request).map(|n| n * 10);

    assert_eq!(envelope.items(), [10, 20]);
    assert_eq!(envelope.total(), 12);
    assert_eq!(envelope.page_count(), 3);
}

#[rstest]
fn page_envelope_serializes_in_camel_case() {
    let request = PageRequest::new(None, Some(2));
    let envelope = Page::new(vec![1_u32], 3, request);
    let json = serde_json::to_value(&envelope).expect("envelope serializes");

    assert_eq!(
        json,
        serde_json::json!({
            "items": [1],
            "total": 3,
            "page": 1,
            "limit": 2,
            "pageCount": 2,
        })
    );
}

#[rstest]
#[case("ASC", SortOrder::Ascending)]
#[case("asc", SortOrder::Ascending)]
#[case(" Desc ", SortOrder::Descending)]
#[case("DESC", SortOrder::Descending)]
fn sort_order_parses_case_insensitively(#[case] raw: &str, #[case] expected: SortOrder) {
    assert_eq!(SortOrder::try_from(raw), Ok(expected));
}

#[rstest]
fn sort_order_rejects_unknown_direction() {
    let result = SortOrder::try_from("sideways");
    assert!(result.is_err());
}

#[rstest]
fn sort_order_defaults_to_ascending() {
    assert_eq!(SortOrder::default(), SortOrder::Ascending);
    assert!(!SortOrder::default().is_descending());
}
