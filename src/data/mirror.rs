//! Right-ear projection of the canonical (left-ear) point set.

use super::catalog::Point;
use super::geometry::{Affine2, Coord, ScreenRect, ViewBox};
use super::selection::Mode;

/// Which ear a view shows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum EarSide {
    #[default]
    Left,
    Right,
}

impl EarSide {
    pub fn all() -> &'static [EarSide] {
        &[EarSide::Left, EarSide::Right]
    }

    pub fn is_mirrored(self) -> bool {
        matches!(self, EarSide::Right)
    }
}

/// Reflect every point's x about the vertical midline of `bounds`.
///
/// Order, ids, text and category are preserved; only `x` changes. Applying
/// this twice returns the original coordinates.
pub fn mirror_points<'a, I>(points: I, bounds: &ViewBox) -> Vec<Point>
where
    I: IntoIterator<Item = &'a Point>,
{
    points
        .into_iter()
        .map(|p| Point {
            x: bounds.mirror_x(p.x),
            ..p.clone()
        })
        .collect()
}

/// Points as they appear on `side`: unchanged copies on the left ear,
/// mirrored copies on the right.
pub fn project_points(points: &[&Point], side: EarSide, bounds: &ViewBox) -> Vec<Point> {
    match side {
        EarSide::Left => points.iter().map(|p| (*p).clone()).collect(),
        EarSide::Right => mirror_points(points.iter().copied(), bounds),
    }
}

/// Intrinsic → screen transform of the overlay for one ear view.
///
/// Points are mirrored in data by [`project_points`] and drawn unflipped.
/// Areas keep their canonical paths and are flipped as a whole about the
/// view's vertical centre line on the right ear.
pub fn overlay_transform(bounds: &ViewBox, rect: ScreenRect, mode: Mode, side: EarSide) -> Affine2 {
    let base = bounds.fit(rect);
    match (mode, side) {
        (Mode::Areas, EarSide::Right) => base.then(Affine2::flip_x_about(rect.center().x)),
        _ => base,
    }
}

/// Canonical (left-ear) coordinate of a click already mapped through
/// [`overlay_transform`].
///
/// Right-ear points were mirrored before drawing, so the mirror is undone
/// here. Right-ear areas carry the flip in the transform itself.
pub fn canonical_pick(mode: Mode, side: EarSide, mapped: Coord, bounds: &ViewBox) -> Coord {
    match (mode, side) {
        (Mode::Points, EarSide::Right) => Coord::new(bounds.mirror_x(mapped.x), mapped.y),
        _ => mapped,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::catalog::{Category, Standard};
    use crate::data::geometry::COORD_EPSILON;
    use crate::data::text::Localized;

    fn pt(id: &str, x: f64, y: f64) -> Point {
        Point {
            id: id.to_string(),
            standard: Standard::Nada,
            category: Category::Other,
            name: Localized::new(id, id),
            organ: Localized::default(),
            summary: Localized::default(),
            case: None,
            x,
            y,
        }
    }

    #[test]
    fn mirror_is_involutive_and_keeps_order() {
        let vb = ViewBox::default();
        let pts = vec![pt("a", 12.5, 100.0), pt("b", 400.0, 7.0), pt("c", 744.09, 0.0)];
        let once = mirror_points(&pts, &vb);
        let twice = mirror_points(&once, &vb);
        assert_eq!(once.len(), pts.len());
        for ((orig, m), back) in pts.iter().zip(&once).zip(&twice) {
            assert_eq!(orig.id, m.id);
            assert_eq!(orig.y, m.y);
            assert!((m.x - (vb.width - orig.x)).abs() < COORD_EPSILON);
            assert!((back.x - orig.x).abs() < COORD_EPSILON);
        }
    }

    #[test]
    fn left_side_is_unchanged() {
        let vb = ViewBox::default();
        let p = pt("a", 30.0, 40.0);
        let out = project_points(&[&p], EarSide::Left, &vb);
        assert_eq!(out[0], p);
        let out = project_points(&[&p], EarSide::Right, &vb);
        assert!((out[0].x - 714.09).abs() < COORD_EPSILON);
    }
}
