//! Boundary raycasting for the bouncing trail.
//!
//! The brush never asks "did I collide"; it asks the oracle, ahead of time,
//! where the current straight segment will end. The oracle must ignore the
//! edge the particle just left, otherwise a ray cast from a point lying on
//! that edge would report it again at distance zero.

use crate::geometry::unit;
use kurbo::{Line, Point, Rect, Vec2};
use thiserror::Error;

/// Identifier of one boundary edge, stable for the lifetime of an oracle.
pub type EdgeId = usize;

/// Where the current segment meets the boundary.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Impact {
    /// Intersection point, lying exactly on the edge.
    pub point: Point,
    /// Unit surface normal of the edge, facing the canvas interior.
    pub normal: Vec2,
    /// The edge that was hit.
    pub edge: EdgeId,
}

/// Raycast failures.
#[derive(Debug, Error, PartialEq)]
pub enum GeometryError {
    #[error("Ray direction has zero length")]
    ZeroDirection,
    #[error("Ray from {origin:?} along {direction:?} hits no boundary")]
    NoIntersection { origin: Point, direction: Vec2 },
    #[error("Non-finite ray input")]
    NonFinite,
}

/// Answers "where does this ray next hit the canvas edge".
pub trait BoundaryOracle {
    /// Nearest boundary intersection along `direction` from `origin`,
    /// skipping the `exclude`d edge.
    fn intersect(
        &self,
        origin: Point,
        direction: Vec2,
        exclude: Option<EdgeId>,
    ) -> Result<Impact, GeometryError>;
}

/// One straight boundary segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundaryEdge {
    pub id: EdgeId,
    pub line: Line,
    /// Unit normal facing the interior.
    pub normal: Vec2,
}

/// A boundary made of straight edges, typically the four sides of the canvas.
#[derive(Debug, Clone, PartialEq)]
pub struct EdgeBoundary {
    edges: Vec<BoundaryEdge>,
}

impl EdgeBoundary {
    pub const TOP: EdgeId = 0;
    pub const RIGHT: EdgeId = 1;
    pub const BOTTOM: EdgeId = 2;
    pub const LEFT: EdgeId = 3;

    /// Build a boundary from `(line, interior normal)` pairs. Edge ids are
    /// assigned in order and normals are normalized.
    pub fn new(edges: impl IntoIterator<Item = (Line, Vec2)>) -> Self {
        Self {
            edges: edges
                .into_iter()
                .enumerate()
                .map(|(id, (line, normal))| BoundaryEdge {
                    id,
                    line,
                    normal: unit(normal),
                })
                .collect(),
        }
    }

    /// The four sides of `rect`, ids [`Self::TOP`], [`Self::RIGHT`],
    /// [`Self::BOTTOM`], [`Self::LEFT`]. "Top" is the `y0` side.
    pub fn from_rect(rect: Rect) -> Self {
        let rect = rect.abs();
        let (tl, tr) = (Point::new(rect.x0, rect.y0), Point::new(rect.x1, rect.y0));
        let (br, bl) = (Point::new(rect.x1, rect.y1), Point::new(rect.x0, rect.y1));
        Self::new([
            (Line::new(tl, tr), Vec2::new(0.0, 1.0)),
            (Line::new(tr, br), Vec2::new(-1.0, 0.0)),
            (Line::new(br, bl), Vec2::new(0.0, -1.0)),
            (Line::new(bl, tl), Vec2::new(1.0, 0.0)),
        ])
    }

    pub fn edges(&self) -> &[BoundaryEdge] {
        &self.edges
    }
}

/// Ray parameter and point where `origin + t * direction` crosses `line`,
/// if it does with `t >= 0`.
fn ray_segment(origin: Point, direction: Vec2, line: Line) -> Option<(f64, Point)> {
    const EPS: f64 = 1e-9;

    let edge = line.p1 - line.p0;
    let denom = direction.cross(edge);
    if denom.abs() < EPS {
        // Parallel or degenerate edge.
        return None;
    }
    let w = line.p0 - origin;
    let t = w.cross(edge) / denom;
    let s = w.cross(direction) / denom;
    if t < -EPS || !(-EPS..=1.0 + EPS).contains(&s) {
        return None;
    }
    let t = t.max(0.0);
    let hit = origin + direction * t;
    // Keep the point on the segment; axis-aligned edges then pin their
    // constant coordinate exactly.
    let point = Point::new(
        hit.x.clamp(line.p0.x.min(line.p1.x), line.p0.x.max(line.p1.x)),
        hit.y.clamp(line.p0.y.min(line.p1.y), line.p0.y.max(line.p1.y)),
    );
    Some((t, point))
}

impl BoundaryOracle for EdgeBoundary {
    fn intersect(
        &self,
        origin: Point,
        direction: Vec2,
        exclude: Option<EdgeId>,
    ) -> Result<Impact, GeometryError> {
        if !(origin.is_finite() && direction.is_finite()) {
            return Err(GeometryError::NonFinite);
        }
        if direction.hypot2() < f64::EPSILON {
            return Err(GeometryError::ZeroDirection);
        }

        self.edges
            .iter()
            .filter(|edge| Some(edge.id) != exclude)
            // Only edges the ray is moving towards.
            .filter(|edge| direction.dot(edge.normal) < 0.0)
            .filter_map(|edge| {
                ray_segment(origin, direction, edge.line).map(|(t, point)| (t, point, edge))
            })
            .min_by(|a, b| a.0.total_cmp(&b.0))
            .map(|(_, point, edge)| Impact {
                point,
                normal: edge.normal,
                edge: edge.id,
            })
            .ok_or(GeometryError::NoIntersection { origin, direction })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn canvas() -> EdgeBoundary {
        EdgeBoundary::from_rect(Rect::new(0.0, 0.0, 400.0, 300.0))
    }

    #[test]
    fn test_hits_right_edge() {
        let impact = canvas()
            .intersect(Point::new(100.0, 100.0), Vec2::new(1.0, 0.0), None)
            .unwrap();
        assert_eq!(impact.edge, EdgeBoundary::RIGHT);
        assert_eq!(impact.point, Point::new(400.0, 100.0));
        assert_eq!(impact.normal, Vec2::new(-1.0, 0.0));
    }

    #[test]
    fn test_nearest_edge_wins() {
        let impact = canvas()
            .intersect(Point::new(380.0, 20.0), Vec2::new(1.0, -1.0), None)
            .unwrap();
        // 20 units to the top, 20 to the right: exact corner.
        assert_eq!(impact.point, Point::new(400.0, 0.0));

        let impact = canvas()
            .intersect(Point::new(390.0, 200.0), Vec2::new(1.0, -1.0), None)
            .unwrap();
        assert_eq!(impact.edge, EdgeBoundary::RIGHT);
        assert!((impact.point.y - 190.0).abs() < 1e-9);
    }

    #[test]
    fn test_excludes_departed_edge() {
        let boundary = canvas();
        let on_right = Point::new(400.0, 100.0);
        // Heading back inside after a bounce: the right edge must not be reported.
        let impact = boundary
            .intersect(on_right, Vec2::new(-1.0, 0.0), Some(EdgeBoundary::RIGHT))
            .unwrap();
        assert_eq!(impact.edge, EdgeBoundary::LEFT);
        assert_eq!(impact.point, Point::new(0.0, 100.0));
    }

    #[test]
    fn test_corner_departure_hits_adjacent_edge_at_zero() {
        let boundary = canvas();
        // Reflected off the right edge at the top-right corner but still
        // heading up: the top edge is hit immediately.
        let impact = boundary
            .intersect(Point::new(400.0, 0.0), Vec2::new(-1.0, -1.0), Some(EdgeBoundary::RIGHT))
            .unwrap();
        assert_eq!(impact.edge, EdgeBoundary::TOP);
        assert_eq!(impact.point, Point::new(400.0, 0.0));
    }

    #[test]
    fn test_zero_direction() {
        assert_eq!(
            canvas().intersect(Point::new(1.0, 1.0), Vec2::ZERO, None),
            Err(GeometryError::ZeroDirection)
        );
    }

    #[test]
    fn test_non_finite_input() {
        assert_eq!(
            canvas().intersect(Point::new(f64::NAN, 1.0), Vec2::new(1.0, 0.0), None),
            Err(GeometryError::NonFinite)
        );
    }

    #[test]
    fn test_no_intersection_outside() {
        // Starting outside and pointing away from the canvas.
        let result = canvas().intersect(Point::new(500.0, 100.0), Vec2::new(1.0, 0.0), None);
        assert!(matches!(result, Err(GeometryError::NoIntersection { .. })));
    }

    #[test]
    fn test_custom_edges_normalize() {
        let boundary = EdgeBoundary::new([(
            Line::new(Point::new(10.0, -100.0), Point::new(10.0, 100.0)),
            Vec2::new(-5.0, 0.0),
        )]);
        assert_eq!(boundary.edges()[0].normal, Vec2::new(-1.0, 0.0));
        let impact = boundary
            .intersect(Point::ZERO, Vec2::new(2.0, 0.0), None)
            .unwrap();
        assert_eq!(impact.point, Point::new(10.0, 0.0));
    }
}
