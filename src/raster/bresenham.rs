/// Pixels on the discrete line from `start` to `end`, both included.
///
/// Integer-only Bresenham stepping: exact for horizontal, vertical and
/// diagonal lines, nearest pixel along the minor axis otherwise. Pixels are
/// returned in order from `start` to `end`.
#[must_use]
pub fn bresenham_line(start: (i64, i64), end: (i64, i64)) -> Vec<(i64, i64)> {
    let steep = (end.1 - start.1).abs() > (end.0 - start.0).abs();
    // Walk along the major axis as `a`, the minor one as `b`.
    let (a0, b0, a1, b1) = if steep {
        (start.1, start.0, end.1, end.0)
    } else {
        (start.0, start.1, end.0, end.1)
    };

    let da = (a1 - a0).abs();
    let db = (b1 - b0).abs();
    let step_a = if a1 >= a0 { 1 } else { -1 };
    let step_b = if b1 >= b0 { 1 } else { -1 };

    let mut pixels = Vec::with_capacity(usize::try_from(da + 1).unwrap_or(0));
    // Doubled units keep the half-pixel threshold integral.
    let mut error = da;
    let mut b = b0;
    let mut a = a0;
    loop {
        pixels.push(if steep { (b, a) } else { (a, b) });
        if a == a1 {
            break;
        }
        error -= 2 * db;
        if error < 0 {
            b += step_b;
            error += 2 * da;
        }
        a += step_a;
    }
    pixels
}
