// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Chapter identifier ordering.

use std::cmp::Ordering;

/// Compare chapter ids segment by segment, numerically where possible.
///
/// `9.2` < `9.10` < `10`; numeric segments sort before textual ones; a
/// shorter prefix sorts first.
pub fn compare_chapters(a: &str, b: &str) -> Ordering {
    let mut left = a.split('.').map(str::trim);
    let mut right = b.split('.').map(str::trim);

    loop {
        match (left.next(), right.next()) {
            (None, None) => return a.cmp(b),
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(x), Some(y)) => {
                let ord = compare_segment(x, y);
                if ord != Ordering::Equal {
                    return ord;
                }
            }
        }
    }
}

fn compare_segment(x: &str, y: &str) -> Ordering {
    match (x.parse::<u64>(), y.parse::<u64>()) {
        (Ok(m), Ok(n)) => m.cmp(&n),
        (Ok(_), Err(_)) => Ordering::Less,
        (Err(_), Ok(_)) => Ordering::Greater,
        (Err(_), Err(_)) => x.cmp(y),
    }
}
