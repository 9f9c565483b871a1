use tickerboard::overview::DEFAULT_PAGE_SIZE;
use tickerboard::{Page, Pager};

#[test]
fn seventeen_rows_split_ten_and_seven() {
    let rows: Vec<u32> = (1..=17).collect();
    let pager = Pager::default();
    assert_eq!(pager.page_size(), DEFAULT_PAGE_SIZE);

    assert_eq!(pager.page_count(rows.len()), 2);
    assert_eq!(pager.page(&rows, 1), &rows[..10]);
    assert_eq!(pager.page(&rows, 2), &rows[10..]);
    assert!(pager.page(&rows, 3).is_empty());
}

#[test]
fn page_zero_and_empty_tables() {
    let rows: Vec<u32> = (1..=5).collect();
    let pager = Pager::new(10);
    assert!(pager.page(&rows, 0).is_empty());

    let none: Vec<u32> = Vec::new();
    assert_eq!(pager.page_count(none.len()), 1);
    assert!(pager.page(&none, 1).is_empty());
}

#[test]
fn exact_multiple_has_no_trailing_page() {
    let pager = Pager::new(5);
    assert_eq!(pager.page_count(10), 2);
    assert_eq!(pager.page_count(11), 3);
    assert_eq!(Pager::new(0).page_size(), 1);
}

#[test]
fn page_snapshot_carries_totals() {
    let rows: Vec<u32> = (1..=12).collect();
    let page = Page::from_rows(Pager::new(5), &rows, 3);
    assert_eq!(page.page, 3);
    assert_eq!(page.page_count, 3);
    assert_eq!(page.total_rows, 12);
    assert_eq!(page.rows, vec![11, 12]);

    let past_end = Page::from_rows(Pager::new(5), &rows, 9);
    assert!(past_end.rows.is_empty());
    assert_eq!(past_end.page_count, 3);
}
