//! Integer line rasterization between grid tiles.

use cavern_core::Point;

/// Every tile the segment from `a` to `b` passes through, endpoints included.
///
/// Traversal always runs toward increasing coordinates along the dominant
/// axis, so swapping the arguments yields the same sequence.
#[must_use]
pub fn rasterize(a: Point, b: Point) -> Vec<Point> {
    let dx = b.x() - a.x();
    let dy = b.y() - a.y();

    if dy.abs() < dx.abs() {
        if a.x() > b.x() {
            shallow(b, a)
        } else {
            shallow(a, b)
        }
    } else if a.y() > b.y() {
        steep(b, a)
    } else {
        steep(a, b)
    }
}

/// Steps along x for slopes within one of horizontal.
fn shallow(start: Point, end: Point) -> Vec<Point> {
    let dx = end.x() - start.x();
    let (dy, step) = signed(end.y() - start.y());
    let mut error = 2 * dy - dx;
    let mut y = start.y();
    let mut points = Vec::with_capacity(usize::try_from(dx + 1).unwrap_or(0));

    for x in start.x()..=end.x() {
        points.push(Point::new(x, y));
        if error > 0 {
            y += step;
            error -= 2 * dx;
        }
        error += 2 * dy;
    }

    points
}

/// Steps along y for slopes steeper than one.
fn steep(start: Point, end: Point) -> Vec<Point> {
    let dy = end.y() - start.y();
    let (dx, step) = signed(end.x() - start.x());
    let mut error = 2 * dx - dy;
    let mut x = start.x();
    let mut points = Vec::with_capacity(usize::try_from(dy + 1).unwrap_or(0));

    for y in start.y()..=end.y() {
        points.push(Point::new(x, y));
        if error > 0 {
            x += step;
            error -= 2 * dy;
        }
        error += 2 * dx;
    }

    points
}

fn signed(delta: i32) -> (i32, i32) {
    if delta < 0 {
        (-delta, -1)
    } else {
        (delta, 1)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;

    const ENDPOINTS: [Point; 9] = [
        Point::new(0, 0),
        Point::new(7, 2),
        Point::new(-3, 5),
        Point::new(4, -6),
        Point::new(1, 1),
        Point::new(10, 10),
        Point::new(-8, -1),
        Point::new(0, 9),
        Point::new(5, 0),
    ];

    #[test]
    fn degenerate_segment_is_single_point() {
        let point = Point::new(3, -4);
        assert_eq!(rasterize(point, point), vec![point]);
    }

    #[test]
    fn segments_include_both_endpoints() {
        for a in ENDPOINTS {
            for b in ENDPOINTS {
                let line = rasterize(a, b);
                assert!(line.contains(&a), "{a:?}->{b:?} misses start");
                assert!(line.contains(&b), "{a:?}->{b:?} misses end");
            }
        }
    }

    #[test]
    fn argument_order_does_not_change_cells() {
        for a in ENDPOINTS {
            for b in ENDPOINTS {
                let forward: BTreeSet<Point> = rasterize(a, b).into_iter().collect();
                let backward: BTreeSet<Point> = rasterize(b, a).into_iter().collect();
                assert_eq!(forward, backward, "{a:?} <-> {b:?}");
            }
        }
    }

    #[test]
    fn consecutive_cells_are_eight_connected() {
        for a in ENDPOINTS {
            for b in ENDPOINTS {
                let line = rasterize(a, b);
                for pair in line.windows(2) {
                    assert_eq!(pair[0].chebyshev_distance(pair[1]), 1, "{a:?}->{b:?} gap");
                }
                let expected = a.chebyshev_distance(b) + 1;
                assert_eq!(line.len(), usize::try_from(expected).expect("fits"));
            }
        }
    }

    #[test]
    fn shallow_line_matches_known_raster() {
        assert_eq!(
            rasterize(Point::new(0, 0), Point::new(5, 2)),
            vec![
                Point::new(0, 0),
                Point::new(1, 0),
                Point::new(2, 1),
                Point::new(3, 1),
                Point::new(4, 2),
                Point::new(5, 2),
            ]
        );
    }
}
