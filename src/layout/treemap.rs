//! Tiling strategies. Each one partitions `rect` among `items` (node id and
//! aggregate value) in order, writing into `out` by node id.

use super::LayoutRect;
use crate::config::Tiling;
use crate::hierarchy::NodeId;

pub(super) fn tile(
    tiling: Tiling,
    ratio: f64,
    depth: usize,
    items: &[(NodeId, f64)],
    value: f64,
    rect: LayoutRect,
    out: &mut [LayoutRect],
) {
    if items.is_empty() {
        return;
    }
    if value <= 0.0 {
        for &(id, _) in items {
            out[id] = LayoutRect::point(rect.x0, rect.y0);
        }
        return;
    }
    match tiling {
        Tiling::Squarify => squarify(ratio, items, value, rect, out),
        Tiling::Binary => binary(items, value, rect, out),
        Tiling::Slice => slice(items, value, rect, out),
        Tiling::Dice => dice(items, value, rect, out),
        Tiling::SliceDice => {
            if depth % 2 == 1 {
                slice(items, value, rect, out)
            } else {
                dice(items, value, rect, out)
            }
        }
    }
}

/// Left to right, full height.
pub(super) fn dice(items: &[(NodeId, f64)], value: f64, rect: LayoutRect, out: &mut [LayoutRect]) {
    let k = if value > 0.0 { rect.width() / value } else { 0.0 };
    let mut x = rect.x0;
    for &(id, v) in items {
        let next = x + v * k;
        out[id] = LayoutRect::new(x, rect.y0, next, rect.y1);
        x = next;
    }
}

/// Top to bottom, full width.
pub(super) fn slice(items: &[(NodeId, f64)], value: f64, rect: LayoutRect, out: &mut [LayoutRect]) {
    let k = if value > 0.0 { rect.height() / value } else { 0.0 };
    let mut y = rect.y0;
    for &(id, v) in items {
        let next = y + v * k;
        out[id] = LayoutRect::new(rect.x0, y, rect.x1, next);
        y = next;
    }
}

/// Bruls-Huizing-van Wijk squarify. Rows grow while the worst aspect ratio,
/// weighted toward `ratio`, does not get worse; each row becomes a strip
/// along the shorter side of the remaining space.
pub(super) fn squarify(
    ratio: f64,
    items: &[(NodeId, f64)],
    value: f64,
    rect: LayoutRect,
    out: &mut [LayoutRect],
) {
    let LayoutRect {
        mut x0,
        mut y0,
        x1,
        y1,
    } = rect;
    let n = items.len();
    let mut remaining = value;
    let mut i0 = 0;
    let mut i1 = 0;

    while i0 < n {
        if remaining <= 0.0 {
            for &(id, _) in &items[i0..] {
                out[id] = LayoutRect::point(x0, y0);
            }
            return;
        }
        let dx = x1 - x0;
        let dy = y1 - y0;

        // First non-empty item seeds the row.
        let mut sum;
        loop {
            sum = items[i1].1;
            i1 += 1;
            if sum != 0.0 || i1 >= n {
                break;
            }
        }
        let mut min_value = sum;
        let mut max_value = sum;
        let alpha = (dy / dx).max(dx / dy) / (remaining * ratio);
        let mut beta = sum * sum * alpha;
        let mut min_ratio = (max_value / beta).max(beta / min_value);

        while i1 < n {
            let v = items[i1].1;
            sum += v;
            min_value = min_value.min(v);
            max_value = max_value.max(v);
            beta = sum * sum * alpha;
            let new_ratio = (max_value / beta).max(beta / min_value);
            if new_ratio > min_ratio {
                sum -= v;
                break;
            }
            min_ratio = new_ratio;
            i1 += 1;
        }

        let row = &items[i0..i1];
        if dx < dy {
            let row_y1 = if dy != 0.0 { y0 + dy * sum / remaining } else { y1 };
            dice(row, sum, LayoutRect::new(x0, y0, x1, row_y1), out);
            y0 = row_y1;
        } else {
            let row_x1 = if dx != 0.0 { x0 + dx * sum / remaining } else { x1 };
            slice(row, sum, LayoutRect::new(x0, y0, row_x1, y1), out);
            x0 = row_x1;
        }
        remaining -= sum;
        i0 = i1;
    }
}

/// Recursive halving by value: split the run where the prefix sum is closest
/// to half, cutting across the longer side.
pub(super) fn binary(items: &[(NodeId, f64)], value: f64, rect: LayoutRect, out: &mut [LayoutRect]) {
    let mut sums = Vec::with_capacity(items.len() + 1);
    sums.push(0.0);
    let mut acc = 0.0;
    for &(_, v) in items {
        acc += v;
        sums.push(acc);
    }
    partition(items, &sums, 0, items.len(), value, rect, out);
}

fn partition(
    items: &[(NodeId, f64)],
    sums: &[f64],
    i: usize,
    j: usize,
    value: f64,
    rect: LayoutRect,
    out: &mut [LayoutRect],
) {
    if i + 1 >= j {
        out[items[i].0] = rect;
        return;
    }

    let value_offset = sums[i];
    let value_target = value / 2.0 + value_offset;
    let mut k = i + 1;
    let mut hi = j - 1;
    while k < hi {
        let mid = (k + hi) / 2;
        if sums[mid] < value_target {
            k = mid + 1;
        } else {
            hi = mid;
        }
    }
    if value_target - sums[k - 1] < sums[k] - value_target && i + 1 < k {
        k -= 1;
    }

    let value_left = sums[k] - value_offset;
    let value_right = value - value_left;
    let LayoutRect { x0, y0, x1, y1 } = rect;

    if x1 - x0 > y1 - y0 {
        let xk = if value != 0.0 {
            (x0 * value_right + x1 * value_left) / value
        } else {
            x1
        };
        partition(items, sums, i, k, value_left, LayoutRect::new(x0, y0, xk, y1), out);
        partition(items, sums, k, j, value_right, LayoutRect::new(xk, y0, x1, y1), out);
    } else {
        let yk = if value != 0.0 {
            (y0 * value_right + y1 * value_left) / value
        } else {
            y1
        };
        partition(items, sums, i, k, value_left, LayoutRect::new(x0, y0, x1, yk), out);
        partition(items, sums, k, j, value_right, LayoutRect::new(x0, yk, x1, y1), out);
    }
}
