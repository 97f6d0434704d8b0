use std::ops::Range;

/// Split the interior rows `1..row_len - 1` into `threads` contiguous
/// stripes.
/// Each stripe gets `interior / threads` rows, the last one also takes
/// the remainder. Empty stripes are dropped, so fewer than `threads`
/// ranges come back when the interior is short.
pub fn row_stripes(row_len: usize, threads: usize) -> Vec<Range<usize>> {
    debug_assert!(row_len >= 3);
    debug_assert!(threads > 0);
    let interior = row_len - 2;
    let stripe_len = interior / threads;
    (0..threads)
        .map(|t| {
            let start = 1 + t * stripe_len;
            let end = if t == threads - 1 {
                row_len - 1
            } else {
                1 + (t + 1) * stripe_len
            };
            start..end
        })
        .filter(|stripe| !stripe.is_empty())
        .collect()
}

/// Like `row_stripes`, but every stripe is a whole number of
/// `block_size` tall block rows.
/// The interior must be divisible by `block_size`.
pub fn block_row_stripes(
    row_len: usize,
    threads: usize,
    block_size: usize,
) -> Vec<Range<usize>> {
    let interior = row_len - 2;
    debug_assert_eq!(interior % block_size, 0);
    let block_rows = interior / block_size;
    let per_thread = block_rows / threads;
    (0..threads)
        .map(|t| {
            let start = t * per_thread;
            let end = if t == threads - 1 {
                block_rows
            } else {
                (t + 1) * per_thread
            };
            (1 + start * block_size)..(1 + end * block_size)
        })
        .filter(|stripe| !stripe.is_empty())
        .collect()
}

/// Start of each `block_size` wide tile along the interior `1..row_len - 1`.
pub fn block_starts(
    range: Range<usize>,
    block_size: usize,
) -> impl Iterator<Item = usize> {
    range.step_by(block_size)
}
