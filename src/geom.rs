//! Integer point math for pointer samples. All threshold checks compare
//! squared distances or absolute components, so no square roots are needed.

/// Pointer position in host pixel coordinates (y grows downward).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Squared euclidean distance. Saturates instead of overflowing: extreme
/// coordinates read as "very far", never as a panic or a wrapped negative.
pub fn squared_distance(a: Point, b: Point) -> i64 {
    let dx = i64::from(a.x) - i64::from(b.x);
    let dy = i64::from(a.y) - i64::from(b.y);
    dx.saturating_mul(dx).saturating_add(dy.saturating_mul(dy))
}

/// True when horizontal travel strictly dominates vertical travel.
pub fn horizontal_dominant(dx: i32, dy: i32) -> bool {
    dx.abs() > dy.abs()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn squared_distance_matches_components() {
        let a = Point::new(0, 0);
        let b = Point::new(3, -4);
        assert_eq!(squared_distance(a, b), 25);
    }

    #[test]
    fn squared_distance_saturates_at_extreme_coordinates() {
        let a = Point::new(i32::MIN, i32::MIN);
        let b = Point::new(i32::MAX, i32::MAX);
        assert_eq!(squared_distance(a, b), i64::MAX);

        // One extreme component alone is already past the saturation point.
        let c = Point::new(i32::MAX, 0);
        assert!(squared_distance(Point::new(i32::MIN, 0), c) > 0);
    }

    #[test]
    fn horizontal_dominance_is_strict() {
        assert!(horizontal_dominant(60, 4));
        assert!(!horizontal_dominant(10, 10));
        assert!(!horizontal_dominant(3, -8));
    }
}
