//! Intrinsic diagram coordinates, bounds and 2D affine transforms.
//!
//! Nothing in here depends on egui; the UI layer converts to and from
//! `egui::Pos2` at the edges.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Tolerance used when comparing transformed coordinates.
pub const COORD_EPSILON: f64 = 1e-6;

/// A position, either in intrinsic diagram space or in screen space.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Coord {
    pub x: f64,
    pub y: f64,
}

impl Coord {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_sq(self, other: Coord) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }

    pub fn approx_eq(self, other: Coord, tol: f64) -> bool {
        (self.x - other.x).abs() <= tol && (self.y - other.y).abs() <= tol
    }
}

/// Axis-aligned rectangle in screen space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenRect {
    pub min: Coord,
    pub max: Coord,
}

impl ScreenRect {
    pub fn from_min_size(min: Coord, width: f64, height: f64) -> Self {
        Self {
            min,
            max: Coord::new(min.x + width, min.y + height),
        }
    }

    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    pub fn center(&self) -> Coord {
        Coord::new(
            (self.min.x + self.max.x) * 0.5,
            (self.min.y + self.max.y) * 0.5,
        )
    }
}

/// Intrinsic coordinate bounds of the diagram asset (`minX minY width height`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewBox {
    pub min_x: f64,
    pub min_y: f64,
    pub width: f64,
    pub height: f64,
}

impl Default for ViewBox {
    /// Bounds of the bundled `ear_outline.svg`.
    fn default() -> Self {
        Self {
            min_x: 0.0,
            min_y: 0.0,
            width: 744.09,
            height: 1052.4,
        }
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("invalid view box {input:?}: expected four finite numbers with positive width and height")]
pub struct ViewBoxParseError {
    pub input: String,
}

impl FromStr for ViewBox {
    type Err = ViewBoxParseError;

    /// Parse an SVG `viewBox` attribute (whitespace and/or comma separated).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ViewBoxParseError {
            input: s.to_string(),
        };
        let parts: Vec<f64> = s
            .split(|c: char| c.is_whitespace() || c == ',')
            .filter(|p| !p.is_empty())
            .map(|p| p.parse::<f64>().map_err(|_| err()))
            .collect::<Result<_, _>>()?;
        if parts.len() != 4 || parts.iter().any(|v| !v.is_finite()) {
            return Err(err());
        }
        if parts[2] <= 0.0 || parts[3] <= 0.0 {
            return Err(err());
        }
        Ok(Self {
            min_x: parts[0],
            min_y: parts[1],
            width: parts[2],
            height: parts[3],
        })
    }
}

impl std::fmt::Display for ViewBox {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {} {} {}",
            self.min_x, self.min_y, self.width, self.height
        )
    }
}

impl ViewBox {
    pub fn max_x(&self) -> f64 {
        self.min_x + self.width
    }

    pub fn max_y(&self) -> f64 {
        self.min_y + self.height
    }

    pub fn center(&self) -> Coord {
        Coord::new(
            self.min_x + self.width * 0.5,
            self.min_y + self.height * 0.5,
        )
    }

    pub fn contains(&self, p: Coord) -> bool {
        p.x >= self.min_x && p.x <= self.max_x() && p.y >= self.min_y && p.y <= self.max_y()
    }

    /// Reflect an x coordinate about the vertical midline of these bounds.
    #[inline]
    pub fn mirror_x(&self, x: f64) -> f64 {
        2.0 * self.min_x + self.width - x
    }

    /// Transform that places these bounds inside `rect` the way SVG
    /// `preserveAspectRatio="xMidYMid meet"` does: uniform scale, centred.
    pub fn fit(&self, rect: ScreenRect) -> Affine2 {
        let s = (rect.width() / self.width).min(rect.height() / self.height);
        let tx = rect.min.x + (rect.width() - self.width * s) * 0.5 - self.min_x * s;
        let ty = rect.min.y + (rect.height() - self.height * s) * 0.5 - self.min_y * s;
        Affine2::scale(s, s).then(Affine2::translate(tx, ty))
    }
}

/// 2D affine transform `[a c e; b d f]` in the SVG matrix convention:
/// `x' = a·x + c·y + e`, `y' = b·x + d·y + f`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Affine2 {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub e: f64,
    pub f: f64,
}

impl Default for Affine2 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Affine2 {
    pub const IDENTITY: Self = Self {
        a: 1.0,
        b: 0.0,
        c: 0.0,
        d: 1.0,
        e: 0.0,
        f: 0.0,
    };

    pub const fn translate(tx: f64, ty: f64) -> Self {
        Self {
            e: tx,
            f: ty,
            ..Self::IDENTITY
        }
    }

    pub const fn scale(sx: f64, sy: f64) -> Self {
        Self {
            a: sx,
            d: sy,
            ..Self::IDENTITY
        }
    }

    /// Uniform scale about `center`.
    pub fn scale_about(s: f64, center: Coord) -> Self {
        Self::translate(-center.x, -center.y)
            .then(Self::scale(s, s))
            .then(Self::translate(center.x, center.y))
    }

    /// Horizontal mirror about the vertical line `x = cx`.
    pub fn flip_x_about(cx: f64) -> Self {
        Self {
            a: -1.0,
            e: 2.0 * cx,
            ..Self::IDENTITY
        }
    }

    /// `self` followed by `next` (`next ∘ self`).
    pub fn then(self, next: Affine2) -> Affine2 {
        Affine2 {
            a: next.a * self.a + next.c * self.b,
            b: next.b * self.a + next.d * self.b,
            c: next.a * self.c + next.c * self.d,
            d: next.b * self.c + next.d * self.d,
            e: next.a * self.e + next.c * self.f + next.e,
            f: next.b * self.e + next.d * self.f + next.f,
        }
    }

    #[inline]
    pub fn apply(&self, p: Coord) -> Coord {
        Coord::new(
            self.a * p.x + self.c * p.y + self.e,
            self.b * p.x + self.d * p.y + self.f,
        )
    }

    pub fn determinant(&self) -> f64 {
        self.a * self.d - self.b * self.c
    }

    /// Inverse transform, or `None` if the matrix is (numerically) singular.
    pub fn inverse(&self) -> Option<Affine2> {
        let det = self.determinant();
        if !det.is_finite() || det.abs() < 1e-12 {
            return None;
        }
        let inv = 1.0 / det;
        Some(Affine2 {
            a: self.d * inv,
            b: -self.b * inv,
            c: -self.c * inv,
            d: self.a * inv,
            e: (self.c * self.f - self.d * self.e) * inv,
            f: (self.b * self.e - self.a * self.f) * inv,
        })
    }

    /// Uniform scale factor along x (absolute value), used to convert
    /// screen-pixel radii into intrinsic units.
    pub fn x_scale(&self) -> f64 {
        (self.a * self.a + self.b * self.b).sqrt()
    }

    /// True when the transform mirrors orientation.
    pub fn is_flipped(&self) -> bool {
        self.determinant() < 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_view_box_attribute() {
        let vb: ViewBox = "0 0 744.09 1052.4".parse().unwrap();
        assert_eq!(vb, ViewBox::default());
        let vb: ViewBox = "-10,5, 100 200".parse().unwrap();
        assert_eq!(vb.min_x, -10.0);
        assert_eq!(vb.max_y(), 205.0);
    }

    #[test]
    fn rejects_malformed_view_box() {
        assert!("0 0 100".parse::<ViewBox>().is_err());
        assert!("0 0 abc 100".parse::<ViewBox>().is_err());
        assert!("0 0 0 100".parse::<ViewBox>().is_err());
    }

    #[test]
    fn composition_applies_left_to_right() {
        let t = Affine2::scale(2.0, 3.0).then(Affine2::translate(10.0, 20.0));
        let p = t.apply(Coord::new(1.0, 1.0));
        assert!(p.approx_eq(Coord::new(12.0, 23.0), COORD_EPSILON));
    }

    #[test]
    fn flip_about_center_keeps_center_fixed() {
        let t = Affine2::flip_x_about(50.0);
        assert!(t.apply(Coord::new(50.0, 7.0)).approx_eq(Coord::new(50.0, 7.0), COORD_EPSILON));
        assert!(t.apply(Coord::new(40.0, 7.0)).approx_eq(Coord::new(60.0, 7.0), COORD_EPSILON));
        assert!(t.is_flipped());
    }

    #[test]
    fn singular_matrix_has_no_inverse() {
        assert!(Affine2::scale(0.0, 1.0).inverse().is_none());
    }

    #[test]
    fn fit_centres_letterboxed_content() {
        let vb = ViewBox {
            min_x: 0.0,
            min_y: 0.0,
            width: 100.0,
            height: 200.0,
        };
        let rect = ScreenRect::from_min_size(Coord::new(0.0, 0.0), 400.0, 200.0);
        let t = vb.fit(rect);
        // Scale is limited by height (1.0); content is centred horizontally.
        assert!(t.apply(Coord::new(0.0, 0.0)).approx_eq(Coord::new(150.0, 0.0), COORD_EPSILON));
        assert!(t.apply(Coord::new(100.0, 200.0)).approx_eq(Coord::new(250.0, 200.0), COORD_EPSILON));
    }

    #[test]
    fn mirror_x_uses_bounds() {
        let vb = ViewBox::default();
        assert!((vb.mirror_x(100.0) - 644.09).abs() < COORD_EPSILON);
        let offset = ViewBox {
            min_x: 10.0,
            ..vb
        };
        assert!((offset.mirror_x(offset.mirror_x(123.0)) - 123.0).abs() < COORD_EPSILON);
    }
}
