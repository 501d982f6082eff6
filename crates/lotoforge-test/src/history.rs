//! A fixed history of twelve contests.

use lotoforge_core::DrawHistory;

/// `(contest, numbers)` pairs in chronological order.
pub const SAMPLE_RESULTS: [(u32, [u8; 15]); 12] = [
    (3001, [6, 7, 8, 9, 10, 12, 14, 16, 18, 19, 21, 22, 23, 24, 25]),
    (3002, [1, 3, 5, 6, 7, 10, 11, 14, 15, 16, 17, 18, 19, 22, 25]),
    (3003, [4, 5, 6, 7, 10, 11, 12, 13, 14, 15, 17, 19, 21, 23, 24]),
    (3004, [1, 2, 6, 7, 8, 9, 10, 11, 14, 15, 17, 18, 22, 24, 25]),
    (3005, [5, 6, 7, 8, 10, 12, 15, 16, 17, 18, 19, 20, 21, 24, 25]),
    (3006, [1, 3, 4, 5, 6, 7, 8, 11, 12, 15, 17, 18, 22, 23, 25]),
    (3007, [2, 3, 4, 5, 7, 8, 9, 10, 11, 12, 14, 15, 16, 22, 24]),
    (3008, [3, 4, 5, 7, 9, 10, 13, 16, 17, 18, 19, 20, 21, 22, 24]),
    (3009, [1, 2, 3, 4, 8, 9, 11, 12, 13, 17, 18, 19, 20, 23, 25]),
    (3010, [2, 3, 6, 8, 9, 10, 14, 16, 17, 18, 19, 20, 22, 24, 25]),
    (3011, [1, 2, 3, 4, 5, 6, 11, 13, 16, 18, 20, 21, 22, 23, 25]),
    (3012, [3, 4, 5, 6, 7, 8, 14, 15, 18, 19, 20, 21, 22, 23, 24]),
];

/// [`SAMPLE_RESULTS`] as a most-recent-first history (contest 3012 first).
pub fn sample_history() -> DrawHistory {
    DrawHistory::from_results(SAMPLE_RESULTS).expect("sample results are valid")
}
