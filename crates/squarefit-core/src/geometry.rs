//! Geometry kernel: placements, corner sets, poses, and axis-aligned bounds.
//!
//! Board coordinates are pixels. A placement names the top-left corner of
//! the unrotated square; rotation is in degrees about the square's center.

use serde::{Deserialize, Serialize};
use squarefit_canonical::round_to_places;

use crate::config::DIRECTION_EPSILON;

/// A point in board-pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    /// Horizontal coordinate.
    pub x: f64,
    /// Vertical coordinate.
    pub y: f64,
}

impl Point {
    /// Creates a point.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Scales both components.
    pub fn scale(self, factor: f64) -> Point {
        Point::new(self.x * factor, self.y * factor)
    }

    /// Dot product.
    pub fn dot(self, other: Point) -> f64 {
        self.x * other.x + self.y * other.y
    }

    /// Euclidean length.
    pub fn length(self) -> f64 {
        self.x.hypot(self.y)
    }

    /// Distance to another point.
    pub fn distance(self, other: Point) -> f64 {
        (self - other).length()
    }

    /// True when both coordinates are finite.
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl std::ops::Sub for Point {
    type Output = Point;

    fn sub(self, other: Point) -> Point {
        Point::new(self.x - other.x, self.y - other.y)
    }
}

/// Logical pose of one square as submitted by a player.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    /// Left edge of the unrotated square.
    pub x: f64,
    /// Top edge of the unrotated square.
    pub y: f64,
    /// Rotation in degrees about the square's center. Any real value.
    #[serde(default)]
    pub rotation: f64,
}

impl Placement {
    /// Creates a placement.
    pub fn new(x: f64, y: f64, rotation: f64) -> Self {
        Self { x, y, rotation }
    }

    /// Center of the square for a given side length.
    pub fn center(&self, side: f64) -> Point {
        Point::new(self.x + side / 2.0, self.y + side / 2.0)
    }
}

/// Four corners of one square: top-left, top-right, bottom-right,
/// bottom-left of the unrotated square, each carried through the rotation.
///
/// Corner 1 is the direction corner used to recover orientation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CornerSet(pub [Point; 4]);

impl CornerSet {
    /// The four corners in order.
    pub fn corners(&self) -> &[Point; 4] {
        &self.0
    }

    /// Copy with every coordinate rounded to `places` decimals.
    pub fn rounded(&self, places: u32) -> CornerSet {
        CornerSet(
            self.0
                .map(|p| Point::new(round_to_places(p.x, places), round_to_places(p.y, places))),
        )
    }

    /// True when all four edges measure `side` and both diagonals `side * √2`,
    /// each within a relative tolerance.
    pub fn is_square_of_side(&self, side: f64, tolerance: f64) -> bool {
        let c = &self.0;
        let close = |actual: f64, expected: f64| (actual - expected).abs() <= tolerance * expected;
        let edges_ok = (0..4).all(|i| close(c[i].distance(c[(i + 1) % 4]), side));
        let diagonal = side * std::f64::consts::SQRT_2;
        edges_ok && close(c[0].distance(c[2]), diagonal) && close(c[1].distance(c[3]), diagonal)
    }
}

impl TryFrom<&[Point]> for CornerSet {
    type Error = usize;

    /// Fails with the number of points found when it is not four.
    fn try_from(points: &[Point]) -> Result<Self, Self::Error> {
        <[Point; 4]>::try_from(points)
            .map(CornerSet)
            .map_err(|_| points.len())
    }
}

/// Centroid and unit orientation vector of a square.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    /// Centroid x.
    pub cx: f64,
    /// Centroid y.
    pub cy: f64,
    /// Unit direction x (centroid toward corner 1).
    pub ux: f64,
    /// Unit direction y.
    pub uy: f64,
}

/// Axis-aligned bounding rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Bounds {
    /// Smallest x.
    pub min_x: f64,
    /// Smallest y.
    pub min_y: f64,
    /// Largest x.
    pub max_x: f64,
    /// Largest y.
    pub max_y: f64,
}

impl Bounds {
    /// Bounds of a non-empty point sequence; `None` when empty.
    pub fn of_points<I: IntoIterator<Item = Point>>(points: I) -> Option<Bounds> {
        points.into_iter().fold(None, |acc, p| {
            Some(match acc {
                None => Bounds {
                    min_x: p.x,
                    min_y: p.y,
                    max_x: p.x,
                    max_y: p.y,
                },
                Some(b) => Bounds {
                    min_x: b.min_x.min(p.x),
                    min_y: b.min_y.min(p.y),
                    max_x: b.max_x.max(p.x),
                    max_y: b.max_y.max(p.y),
                },
            })
        })
    }

    /// Smallest bounds covering both.
    pub fn union(&self, other: &Bounds) -> Bounds {
        Bounds {
            min_x: self.min_x.min(other.min_x),
            min_y: self.min_y.min(other.min_y),
            max_x: self.max_x.max(other.max_x),
            max_y: self.max_y.max(other.max_y),
        }
    }

    /// Horizontal extent.
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    /// Vertical extent.
    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }
}

/// Unrotated corner offsets from the center, in units of half the side.
const CORNER_SIGNS: [(f64, f64); 4] = [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)];

/// Corners of a square of side `side` centered at `center`, rotated by `rotation` degrees.
pub(crate) fn rotated_corners(center: Point, side: f64, rotation: f64) -> [Point; 4] {
    let (sin, cos) = rotation.to_radians().sin_cos();
    let half = side / 2.0;
    CORNER_SIGNS.map(|(sx, sy)| {
        let lx = sx * half;
        let ly = sy * half;
        Point::new(
            center.x + lx * cos - ly * sin,
            center.y + lx * sin + ly * cos,
        )
    })
}

/// Corner set of a placed square.
pub fn corners_from_placement(placement: &Placement, side: f64) -> CornerSet {
    CornerSet(rotated_corners(
        placement.center(side),
        side,
        placement.rotation,
    ))
}

/// Centroid and unit direction toward corner 1.
///
/// Falls back to `(1, 0)` when corner 1 sits on the centroid.
pub fn centroid_and_direction(corners: &CornerSet) -> Pose {
    let c = &corners.0;
    let cx = (c[0].x + c[1].x + c[2].x + c[3].x) / 4.0;
    let cy = (c[0].y + c[1].y + c[2].y + c[3].y) / 4.0;
    let dir = c[1] - Point::new(cx, cy);
    let len = dir.length();
    let (ux, uy) = if len < DIRECTION_EPSILON {
        log::trace!("degenerate direction vector (length {len}); using (1, 0)");
        (1.0, 0.0)
    } else {
        (dir.x / len, dir.y / len)
    };
    Pose { cx, cy, ux, uy }
}

/// Axis-aligned bounds of one corner set.
pub fn axis_aligned_bounds(corners: &CornerSet) -> Bounds {
    Bounds::of_points(corners.0).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SIDE: f64 = 56.0;

    fn assert_close(a: f64, b: f64) {
        assert!((a - b).abs() < 1e-9, "{a} != {b}");
    }

    #[test]
    fn unrotated_corners_are_exact() {
        let corners = corners_from_placement(&Placement::new(10.0, 20.0, 0.0), SIDE);
        assert_eq!(
            corners.0,
            [
                Point::new(10.0, 20.0),
                Point::new(66.0, 20.0),
                Point::new(66.0, 76.0),
                Point::new(10.0, 76.0),
            ]
        );
    }

    #[test]
    fn rotation_is_not_clamped() {
        let a = corners_from_placement(&Placement::new(0.0, 0.0, 30.0), SIDE);
        let b = corners_from_placement(&Placement::new(0.0, 0.0, 390.0), SIDE);
        let c = corners_from_placement(&Placement::new(0.0, 0.0, -330.0), SIDE);
        for i in 0..4 {
            assert_close(a.0[i].x, b.0[i].x);
            assert_close(a.0[i].y, c.0[i].y);
        }
    }

    #[test]
    fn pose_recovers_center_and_orientation() {
        for rotation in [0.0, 17.5, 45.0, 90.0, 200.0, -73.0] {
            let placement = Placement::new(100.0, -40.0, rotation);
            let pose = centroid_and_direction(&corners_from_placement(&placement, SIDE));
            let center = placement.center(SIDE);
            assert_close(pose.cx, center.x);
            assert_close(pose.cy, center.y);
            assert_close(pose.ux.hypot(pose.uy), 1.0);
            // corner 1 sits at 45 degrees before rotation: (h, -h)
            let expected = (rotation - 45.0_f64).to_radians();
            assert_close(pose.ux, expected.cos());
            assert_close(pose.uy, expected.sin());
        }
    }

    #[test]
    fn degenerate_direction_falls_back() {
        let p = Point::new(3.0, 4.0);
        let pose = centroid_and_direction(&CornerSet([p; 4]));
        assert_eq!((pose.cx, pose.cy, pose.ux, pose.uy), (3.0, 4.0, 1.0, 0.0));
    }

    #[test]
    fn bounds_of_rotated_square() {
        let corners = corners_from_placement(&Placement::new(0.0, 0.0, 45.0), SIDE);
        let b = axis_aligned_bounds(&corners);
        assert_close(b.width(), SIDE * std::f64::consts::SQRT_2);
        assert_close(b.height(), SIDE * std::f64::consts::SQRT_2);
        assert_close((b.min_x + b.max_x) / 2.0, 28.0);
    }

    #[test]
    fn shape_check() {
        let corners = corners_from_placement(&Placement::new(5.0, 5.0, 33.0), SIDE);
        assert!(corners.is_square_of_side(SIDE, 1e-6));
        assert!(corners.rounded(10).is_square_of_side(SIDE, 1e-6));
        assert!(!corners.is_square_of_side(50.0, 1e-6));

        let mut swapped = corners;
        swapped.0.swap(1, 2);
        assert!(!swapped.is_square_of_side(SIDE, 1e-6));
    }

    #[test]
    fn try_from_checks_arity() {
        let pts = [Point::default(); 3];
        assert_eq!(CornerSet::try_from(&pts[..]), Err(3));
        let pts = [Point::default(); 4];
        assert!(CornerSet::try_from(&pts[..]).is_ok());
    }
}
