use super::{Point2, TOLERANCE};

/// Computes the signed area of a polygon (shoelace formula).
///
/// Positive for counter-clockwise, negative for clockwise. A repeated closing
/// point contributes nothing.
#[must_use]
pub fn signed_area_2d(points: &[Point2]) -> f64 {
    let n = points.len();
    if n < 3 {
        return 0.0;
    }
    let mut sum = 0.0;
    for i in 0..n {
        let j = (i + 1) % n;
        sum += points[i].x * points[j].y - points[j].x * points[i].y;
    }
    sum * 0.5
}

/// Returns the ring without its repeated closing point and without
/// consecutive duplicates.
#[must_use]
pub fn open_ring(points: &[Point2]) -> Vec<Point2> {
    let mut ring: Vec<Point2> = Vec::with_capacity(points.len());
    for &p in points {
        if ring
            .last()
            .is_some_and(|last| (last - p).norm() < TOLERANCE)
        {
            continue;
        }
        ring.push(p);
    }
    while ring.len() > 1 {
        let first = ring[0];
        let Some(last) = ring.last() else { break };
        if (last - first).norm() < TOLERANCE {
            ring.pop();
        } else {
            break;
        }
    }
    ring
}

/// Appends the first point to the end of the ring so it is explicitly closed.
#[must_use]
pub fn close_ring(mut points: Vec<Point2>) -> Vec<Point2> {
    if let Some(&first) = points.first() {
        if points.last().is_some_and(|last| (last - first).norm() >= TOLERANCE) {
            points.push(first);
        }
    }
    points
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    fn square() -> Vec<Point2> {
        vec![
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(1.0, 1.0),
            Point2::new(0.0, 1.0),
        ]
    }

    #[test]
    fn signed_area_ccw_square() {
        assert_relative_eq!(signed_area_2d(&square()), 1.0);
    }

    #[test]
    fn signed_area_cw_square() {
        let mut pts = square();
        pts.reverse();
        assert_relative_eq!(signed_area_2d(&pts), -1.0);
    }

    #[test]
    fn closing_point_does_not_change_area() {
        let closed = close_ring(square());
        assert_eq!(closed.len(), 5);
        assert_relative_eq!(signed_area_2d(&closed), 1.0);
    }

    #[test]
    fn open_ring_strips_closure_and_duplicates() {
        let mut pts = square();
        pts.insert(1, Point2::new(0.0, 0.0));
        let ring = open_ring(&close_ring(pts));
        assert_eq!(ring.len(), 4);
    }

    #[test]
    fn close_ring_is_idempotent() {
        let once = close_ring(square());
        let twice = close_ring(once.clone());
        assert_eq!(once.len(), twice.len());
    }
}
