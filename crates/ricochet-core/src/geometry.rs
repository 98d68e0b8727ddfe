//! Vector helpers for the bouncing trail.

use kurbo::{Point, Vec2};

/// Reflect `v` about a surface with unit normal `n`: `v - 2(v·n)n`.
pub fn reflect(v: Vec2, n: Vec2) -> Vec2 {
    v - n * (2.0 * v.dot(n))
}

/// Unit vector along `v`, or zero if `v` has no length.
pub fn unit(v: Vec2) -> Vec2 {
    let len = v.hypot();
    if len > f64::EPSILON && len.is_finite() {
        v / len
    } else {
        Vec2::ZERO
    }
}

/// Whether `point`, travelling from `a` straight towards `b`, has not yet
/// passed `b`.
///
/// Assumes `point` lies on the ray from `a` through `b`, so comparing squared
/// distances from `a` is enough.
pub fn is_point_between(a: Point, b: Point, point: Point) -> bool {
    a.distance_squared(point) <= a.distance_squared(b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reflect_flips_normal_component() {
        let v = Vec2::new(3.0, -4.0);
        let n = Vec2::new(0.0, 1.0);
        let r = reflect(v, n);
        assert!((r.x - 3.0).abs() < 1e-12);
        assert!((r.y - 4.0).abs() < 1e-12);
    }

    #[test]
    fn test_law_of_reflection() {
        let normals = [
            Vec2::new(-1.0, 0.0),
            Vec2::new(0.0, -1.0),
            unit(Vec2::new(1.0, 1.0)),
            unit(Vec2::new(-0.3, 0.8)),
        ];
        let velocities = [
            Vec2::new(5.0, 1.0),
            Vec2::new(-2.0, 7.5),
            Vec2::new(0.1, -0.1),
        ];
        for n in normals {
            for v in velocities {
                let r = reflect(v, n);
                assert!((r.dot(n) + v.dot(n)).abs() < 1e-10);
                // Speed is preserved.
                assert!((r.hypot() - v.hypot()).abs() < 1e-10);
            }
        }
    }

    #[test]
    fn test_unit() {
        let u = unit(Vec2::new(3.0, 4.0));
        assert!((u.x - 0.6).abs() < 1e-12);
        assert!((u.y - 0.8).abs() < 1e-12);
        assert_eq!(unit(Vec2::ZERO), Vec2::ZERO);
    }

    #[test]
    fn test_is_point_between() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(10.0, 0.0);
        assert!(is_point_between(a, b, Point::new(5.0, 0.0)));
        assert!(is_point_between(a, b, b));
        assert!(!is_point_between(a, b, Point::new(10.5, 0.0)));
    }
}
