//! Screen → intrinsic coordinate mapping for pointer events.
//!
//! The render surface draws each overlay through a forward transform
//! (intrinsic → screen). The mapper inverts exactly that transform, so a
//! diagram coordinate pushed through the forward transform and back comes
//! out unchanged within floating-point tolerance.

use super::catalog::{Area, Point};
use super::geometry::{Affine2, Coord};

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum MapError {
    /// The overlay has not been laid out yet, or its transform is singular.
    /// Callers ignore the click.
    #[error("overlay transform is not available")]
    TransformUnavailable,
}

/// Converts pointer positions into intrinsic diagram coordinates.
#[derive(Debug, Clone, Copy, Default)]
pub struct CoordinateMapper;

impl CoordinateMapper {
    /// Map `screen` through the inverse of `forward`.
    ///
    /// `forward` is the intrinsic → screen transform the overlay was drawn
    /// with, or `None` when the render surface cannot supply one.
    pub fn map(screen: Coord, forward: Option<&Affine2>) -> Result<Coord, MapError> {
        let inverse = forward
            .and_then(Affine2::inverse)
            .ok_or(MapError::TransformUnavailable)?;
        Ok(inverse.apply(screen))
    }

    /// Convert a screen-space length (e.g. a hit radius in pixels) into
    /// intrinsic units under `forward`.
    pub fn map_length(screen_len: f64, forward: Option<&Affine2>) -> Result<f64, MapError> {
        let forward = forward.ok_or(MapError::TransformUnavailable)?;
        let s = forward.x_scale();
        if s <= f64::EPSILON {
            return Err(MapError::TransformUnavailable);
        }
        Ok(screen_len / s)
    }
}

/// Nearest point within `radius` of `at` (all in intrinsic units).
pub fn hit_test_points<'a, I>(points: I, at: Coord, radius: f64) -> Option<&'a Point>
where
    I: IntoIterator<Item = &'a Point>,
{
    let r2 = radius * radius;
    points
        .into_iter()
        .map(|p| (p, p.pos().distance_sq(at)))
        .filter(|(_, d2)| *d2 <= r2)
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(p, _)| p)
}

/// Topmost area whose outline contains `at`. Later areas are drawn on top.
pub fn hit_test_areas<'a, I>(areas: I, at: Coord) -> Option<&'a Area>
where
    I: IntoIterator<Item = &'a Area>,
    I::IntoIter: DoubleEndedIterator,
{
    areas.into_iter().rev().find(|a| a.outline().contains(at))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::geometry::COORD_EPSILON;

    #[test]
    fn missing_transform_is_reported() {
        assert_eq!(
            CoordinateMapper::map(Coord::new(1.0, 2.0), None),
            Err(MapError::TransformUnavailable)
        );
    }

    #[test]
    fn singular_transform_is_reported() {
        let t = Affine2::scale(0.0, 0.0);
        assert_eq!(
            CoordinateMapper::map(Coord::new(1.0, 2.0), Some(&t)),
            Err(MapError::TransformUnavailable)
        );
    }

    #[test]
    fn inverts_flip_and_scale() {
        let t = Affine2::scale(0.5, 0.5)
            .then(Affine2::translate(20.0, 30.0))
            .then(Affine2::flip_x_about(200.0));
        let p = Coord::new(310.5, 412.25);
        let back = CoordinateMapper::map(t.apply(p), Some(&t)).unwrap();
        assert!(back.approx_eq(p, COORD_EPSILON));
    }

    #[test]
    fn nearest_point_within_radius_wins() {
        use crate::data::catalog::{Category, Standard};
        use crate::data::text::Localized;

        let pt = |id: &str, x: f64, y: f64| Point {
            id: id.to_string(),
            standard: Standard::Nada,
            category: Category::Other,
            name: Localized::default(),
            organ: Localized::default(),
            summary: Localized::default(),
            case: None,
            x,
            y,
        };
        let pts = vec![pt("far", 100.0, 100.0), pt("near", 12.0, 10.0), pt("mid", 15.0, 10.0)];
        let hit = hit_test_points(&pts, Coord::new(10.0, 10.0), 8.0).unwrap();
        assert_eq!(hit.id, "near");
        assert!(hit_test_points(&pts, Coord::new(50.0, 50.0), 8.0).is_none());
    }

    #[test]
    fn converts_pixel_radius() {
        let t = Affine2::scale(2.0, 2.0);
        let r = CoordinateMapper::map_length(10.0, Some(&t)).unwrap();
        assert!((r - 5.0).abs() < COORD_EPSILON);
    }
}
