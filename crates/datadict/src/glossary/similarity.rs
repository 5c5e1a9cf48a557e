//! Normalized string similarity based on longest matching blocks.
//!
//! The ratio is `2 * M / T`, where `T` is the total number of characters
//! in both strings and `M` the number of characters in matching blocks:
//! the longest common contiguous block is found first, then the same search
//! recurses on the unmatched text to its left and right.

/// Similarity of two strings in `[0, 1]`. Two empty strings score 1.
///
/// The result does not depend on argument order.
pub fn similarity_ratio(a: &str, b: &str) -> f64 {
    // Block matching is order-sensitive, so always compare in one order
    let (a, b) = if a <= b { (a, b) } else { (b, a) };
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    let total = a.len() + b.len();
    if total == 0 {
        return 1.0;
    }
    2.0 * matching_characters(&a, &b) as f64 / total as f64
}

/// Total size of the matching blocks between `a` and `b`.
fn matching_characters(a: &[char], b: &[char]) -> usize {
    let mut matched = 0;
    let mut queue = vec![(0, a.len(), 0, b.len())];

    while let Some((alo, ahi, blo, bhi)) = queue.pop() {
        let (i, j, k) = longest_match(a, b, alo, ahi, blo, bhi);
        if k == 0 {
            continue;
        }
        matched += k;
        if alo < i && blo < j {
            queue.push((alo, i, blo, j));
        }
        if i + k < ahi && j + k < bhi {
            queue.push((i + k, ahi, j + k, bhi));
        }
    }

    matched
}

/// Longest common block of `a[alo..ahi]` and `b[blo..bhi]` as
/// `(start_in_a, start_in_b, len)`. Among equally long blocks the one
/// starting earliest in `a`, then earliest in `b`, wins.
fn longest_match(
    a: &[char],
    b: &[char],
    alo: usize,
    ahi: usize,
    blo: usize,
    bhi: usize,
) -> (usize, usize, usize) {
    let width = bhi - blo + 1;
    let mut best = (alo, blo, 0);
    // prev[j - blo + 1]: length of the common run ending at a[i - 1], b[j]
    let mut prev = vec![0usize; width];
    let mut cur = vec![0usize; width];

    for i in alo..ahi {
        for j in blo..bhi {
            let slot = j - blo + 1;
            if a[i] == b[j] {
                let k = prev[slot - 1] + 1;
                cur[slot] = k;
                if k > best.2 {
                    best = (i + 1 - k, j + 1 - k, k);
                }
            } else {
                cur[slot] = 0;
            }
        }
        std::mem::swap(&mut prev, &mut cur);
    }

    best
}
