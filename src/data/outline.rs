//! Area outlines: SVG path data flattened into polygon rings.
//!
//! Path parsing goes through `usvg` so the full SVG path grammar (relative
//! commands, arcs, curves) is accepted. Curves are flattened into line
//! segments; the rings are then used both for drawing and hit testing.

use usvg::tiny_skia_path::PathSegment;

use super::geometry::Coord;

/// Line segments per quadratic/cubic curve when flattening.
const CURVE_STEPS: usize = 16;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum OutlineError {
    #[error("path data could not be parsed: {0}")]
    Parse(String),
    #[error("path data contains no ring with at least 3 vertices")]
    Empty,
}

/// A closed outline made of one or more polygon rings.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AreaOutline {
    pub rings: Vec<Vec<Coord>>,
}

impl AreaOutline {
    /// Parse an SVG path `d` attribute.
    pub fn parse(path_d: &str) -> Result<Self, OutlineError> {
        // Escape the attribute value so stray quotes cannot break the wrapper.
        let escaped = path_d.replace('&', "&amp;").replace('"', "&quot;");
        let doc = format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="1" height="1"><path d="{escaped}"/></svg>"#
        );
        let opt = usvg::Options::default();
        let tree =
            usvg::Tree::from_str(&doc, &opt).map_err(|e| OutlineError::Parse(e.to_string()))?;

        let mut rings = Vec::new();
        collect_rings(tree.root(), &mut rings);
        rings.retain(|r| r.len() >= 3);
        if rings.is_empty() {
            return Err(OutlineError::Empty);
        }
        Ok(Self { rings })
    }

    /// Even-odd point-in-polygon test across all rings.
    pub fn contains(&self, p: Coord) -> bool {
        let mut inside = false;
        for ring in &self.rings {
            let n = ring.len();
            let mut j = n - 1;
            for i in 0..n {
                let (a, b) = (ring[i], ring[j]);
                if (a.y > p.y) != (b.y > p.y) {
                    let x_cross = (b.x - a.x) * (p.y - a.y) / (b.y - a.y) + a.x;
                    if p.x < x_cross {
                        inside = !inside;
                    }
                }
                j = i;
            }
        }
        inside
    }

    /// Bounding box as `(min, max)`.
    pub fn bounds(&self) -> Option<(Coord, Coord)> {
        let mut it = self.rings.iter().flatten();
        let first = *it.next()?;
        let (mut min, mut max) = (first, first);
        for p in it {
            min.x = min.x.min(p.x);
            min.y = min.y.min(p.y);
            max.x = max.x.max(p.x);
            max.y = max.y.max(p.y);
        }
        Some((min, max))
    }
}

/// Ear-clipping triangulation of one simple ring, as vertex index triples.
///
/// Fill shapes in egui must be convex, so concave outlines are drawn as a
/// triangle mesh instead. Collinear and repeated vertices are dropped
/// without emitting a triangle. If a ring that is not simple leaves no
/// valid ear, the remainder is fan-filled.
pub fn triangulate(ring: &[Coord]) -> Vec<[usize; 3]> {
    let n = ring.len();
    if n < 3 {
        return Vec::new();
    }
    let ccw = signed_area(ring) > 0.0;
    let mut idx: Vec<usize> = (0..n).collect();
    let mut out = Vec::with_capacity(n - 2);

    while idx.len() > 3 {
        let m = idx.len();
        let corner = |i: usize| (idx[(i + m - 1) % m], idx[i], idx[(i + 1) % m]);

        // Zero-area corners (collinear or coincident) carry no fill.
        if let Some(i) = (0..m).find(|&i| {
            let (ia, ib, ic) = corner(i);
            cross(ring[ia], ring[ib], ring[ic]) == 0.0
        }) {
            idx.remove(i);
            continue;
        }

        let ear = (0..m).find(|&i| {
            let (ia, ib, ic) = corner(i);
            let (a, b, c) = (ring[ia], ring[ib], ring[ic]);
            if (cross(a, b, c) > 0.0) != ccw {
                return false;
            }
            !idx.iter().any(|&j| {
                let p = ring[j];
                p != a && p != b && p != c && in_triangle(p, a, b, c)
            })
        });
        let Some(i) = ear else {
            for k in 1..m - 1 {
                out.push([idx[0], idx[k], idx[k + 1]]);
            }
            return out;
        };
        out.push([idx[(i + m - 1) % m], idx[i], idx[(i + 1) % m]]);
        idx.remove(i);
    }
    if idx.len() == 3 {
        let (a, b, c) = (ring[idx[0]], ring[idx[1]], ring[idx[2]]);
        if cross(a, b, c) != 0.0 {
            out.push([idx[0], idx[1], idx[2]]);
        }
    }
    out
}

fn signed_area(ring: &[Coord]) -> f64 {
    let n = ring.len();
    (0..n)
        .map(|i| {
            let (a, b) = (ring[i], ring[(i + 1) % n]);
            a.x * b.y - b.x * a.y
        })
        .sum::<f64>()
        * 0.5
}

fn cross(a: Coord, b: Coord, c: Coord) -> f64 {
    (b.x - a.x) * (c.y - a.y) - (b.y - a.y) * (c.x - a.x)
}

fn in_triangle(p: Coord, a: Coord, b: Coord, c: Coord) -> bool {
    let (d1, d2, d3) = (cross(a, b, p), cross(b, c, p), cross(c, a, p));
    let has_neg = d1 < 0.0 || d2 < 0.0 || d3 < 0.0;
    let has_pos = d1 > 0.0 || d2 > 0.0 || d3 > 0.0;
    !(has_neg && has_pos)
}

fn collect_rings(group: &usvg::Group, rings: &mut Vec<Vec<Coord>>) {
    for node in group.children() {
        match node {
            usvg::Node::Group(g) => collect_rings(g, rings),
            usvg::Node::Path(path) => flatten(path.data(), rings),
            _ => {}
        }
    }
}

fn flatten(path: &usvg::tiny_skia_path::Path, rings: &mut Vec<Vec<Coord>>) {
    let mut current: Vec<Coord> = Vec::new();
    let mut last = Coord::default();
    let to_coord = |p: usvg::tiny_skia_path::Point| Coord::new(p.x as f64, p.y as f64);

    for seg in path.segments() {
        match seg {
            PathSegment::MoveTo(p) => {
                if !current.is_empty() {
                    rings.push(std::mem::take(&mut current));
                }
                last = to_coord(p);
                current.push(last);
            }
            PathSegment::LineTo(p) => {
                last = to_coord(p);
                push_vertex(&mut current, last);
            }
            PathSegment::QuadTo(c, p) => {
                let (c, p) = (to_coord(c), to_coord(p));
                for step in 1..=CURVE_STEPS {
                    let t = step as f64 / CURVE_STEPS as f64;
                    let mt = 1.0 - t;
                    push_vertex(&mut current, Coord::new(
                        mt * mt * last.x + 2.0 * mt * t * c.x + t * t * p.x,
                        mt * mt * last.y + 2.0 * mt * t * c.y + t * t * p.y,
                    ));
                }
                last = p;
            }
            PathSegment::CubicTo(c1, c2, p) => {
                let (c1, c2, p) = (to_coord(c1), to_coord(c2), to_coord(p));
                for step in 1..=CURVE_STEPS {
                    let t = step as f64 / CURVE_STEPS as f64;
                    let mt = 1.0 - t;
                    let (w0, w1, w2, w3) = (mt * mt * mt, 3.0 * mt * mt * t, 3.0 * mt * t * t, t * t * t);
                    push_vertex(&mut current, Coord::new(
                        w0 * last.x + w1 * c1.x + w2 * c2.x + w3 * p.x,
                        w0 * last.y + w1 * c1.y + w2 * c2.y + w3 * p.y,
                    ));
                }
                last = p;
            }
            PathSegment::Close => {
                // Drop the duplicated start vertex some writers emit before Z.
                if current.len() > 1 && current.first() == current.last() {
                    current.pop();
                }
                if !current.is_empty() {
                    rings.push(std::mem::take(&mut current));
                }
            }
        }
    }
    if !current.is_empty() {
        rings.push(current);
    }
}

/// Append `p` unless it repeats the previous vertex.
fn push_vertex(ring: &mut Vec<Coord>, p: Coord) {
    if ring.last() != Some(&p) {
        ring.push(p);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SQUARE: &str = "M 10 10 L 110 10 L 110 110 L 10 110 Z";

    #[test]
    fn parses_polygon_path() {
        let o = AreaOutline::parse(SQUARE).unwrap();
        assert_eq!(o.rings.len(), 1);
        assert_eq!(o.rings[0].len(), 4);
        assert_eq!(o.bounds(), Some((Coord::new(10.0, 10.0), Coord::new(110.0, 110.0))));
    }

    #[test]
    fn contains_uses_even_odd_rule() {
        let o = AreaOutline::parse(SQUARE).unwrap();
        assert!(o.contains(Coord::new(50.0, 50.0)));
        assert!(!o.contains(Coord::new(5.0, 50.0)));
        assert!(!o.contains(Coord::new(50.0, 200.0)));

        let holed = AreaOutline::parse(&format!("{SQUARE} M 40 40 L 80 40 L 80 80 L 40 80 Z")).unwrap();
        assert!(holed.contains(Coord::new(20.0, 20.0)));
        assert!(!holed.contains(Coord::new(60.0, 60.0)));
    }

    #[test]
    fn compact_and_relative_syntax_is_accepted() {
        let o = AreaOutline::parse("M365 480 L420 500 L425 545 L395 585 L350 565 L345 515 Z").unwrap();
        assert_eq!(o.rings[0].len(), 6);
        let rel = AreaOutline::parse("m0 0 l10 0 l0 10 z").unwrap();
        assert!(rel.contains(Coord::new(8.0, 2.0)));
    }

    #[test]
    fn curves_are_flattened() {
        let o = AreaOutline::parse("M0 0 Q 50 -50 100 0 L 50 80 Z").unwrap();
        assert!(o.rings[0].len() > CURVE_STEPS);
    }

    #[test]
    fn concave_ring_triangulates_to_its_area() {
        // L-shape, area 3.
        let ring = [
            Coord::new(0.0, 0.0),
            Coord::new(2.0, 0.0),
            Coord::new(2.0, 1.0),
            Coord::new(1.0, 1.0),
            Coord::new(1.0, 2.0),
            Coord::new(0.0, 2.0),
        ];
        let tris = triangulate(&ring);
        assert_eq!(tris.len(), 4);
        let total: f64 = tris
            .iter()
            .map(|t| cross(ring[t[0]], ring[t[1]], ring[t[2]]).abs() * 0.5)
            .sum();
        assert!((total - 3.0).abs() < 1e-9);
    }

    fn filled_area(ring: &[Coord]) -> f64 {
        triangulate(ring)
            .iter()
            .map(|t| cross(ring[t[0]], ring[t[1]], ring[t[2]]).abs() * 0.5)
            .sum()
    }

    #[test]
    fn repeated_vertices_are_dropped_when_parsing() {
        let o = AreaOutline::parse("M0 0 L100 0 L100 0 L100 100 L0 100 Z").unwrap();
        assert_eq!(o.rings[0].len(), 4);
        assert!((filled_area(&o.rings[0]) - 10_000.0).abs() < 1e-9);
    }

    #[test]
    fn repeated_and_collinear_vertices_still_fill_the_ring() {
        let ring = [
            Coord::new(0.0, 0.0),
            Coord::new(100.0, 0.0),
            Coord::new(100.0, 0.0),
            Coord::new(100.0, 50.0),
            Coord::new(100.0, 100.0),
            Coord::new(0.0, 100.0),
        ];
        assert!((filled_area(&ring) - 10_000.0).abs() < 1e-9);
    }

    #[test]
    fn degenerate_path_is_rejected() {
        assert!(AreaOutline::parse("M0 0 L 10 10").is_err());
    }
}
