//! Screen ↔ diagram mapping and right-ear mirroring, as the diagram panel
//! composes them.

use earmap::data::geometry::COORD_EPSILON;
use earmap::data::mapper::{hit_test_areas, hit_test_points};
use earmap::{
    canonical_pick, mirror_points, overlay_transform, project_points, Affine2, Area, Catalog,
    Coord, CoordinateMapper, EarSide, MapError, Mode, ScreenRect, ViewBox,
};

fn samples(vb: &ViewBox) -> Vec<Coord> {
    vec![
        Coord::new(vb.min_x, vb.min_y),
        Coord::new(vb.max_x(), vb.max_y()),
        vb.center(),
        Coord::new(338.0, 286.0),
        Coord::new(12.5, 1000.25),
    ]
}

fn assert_round_trips(forward: &Affine2, vb: &ViewBox) {
    for p in samples(vb) {
        let screen = forward.apply(p);
        let back = CoordinateMapper::map(screen, Some(forward)).unwrap();
        assert!(back.approx_eq(p, COORD_EPSILON), "{p:?} came back as {back:?}");
    }
}

#[test]
fn identity_maps_screen_to_itself() {
    let vb = ViewBox::default();
    assert_round_trips(&Affine2::IDENTITY, &vb);
    let p = CoordinateMapper::map(Coord::new(10.0, 20.0), Some(&Affine2::IDENTITY)).unwrap();
    assert_eq!(p, Coord::new(10.0, 20.0));
}

#[test]
fn overlay_transforms_round_trip_on_both_ears() {
    let vb = ViewBox::default();
    for rect in [
        ScreenRect::from_min_size(Coord::new(0.0, 0.0), 640.0, 900.0),
        ScreenRect::from_min_size(Coord::new(713.0, 48.5), 301.0, 420.0),
        ScreenRect::from_min_size(Coord::new(5.0, 5.0), 1600.0, 200.0),
    ] {
        for mode in [Mode::Points, Mode::Areas] {
            for side in EarSide::all() {
                let tf = overlay_transform(&vb, rect, mode, *side);
                assert_eq!(tf.is_flipped(), mode == Mode::Areas && side.is_mirrored());
                assert_round_trips(&tf, &vb);
            }
        }
    }
}

#[test]
fn scaled_and_translated_transforms_round_trip() {
    let vb = ViewBox::default();
    let tf = Affine2::scale(0.37, 0.37).then(Affine2::translate(-120.5, 64.0));
    assert_round_trips(&tf, &vb);
    assert_round_trips(&tf.then(Affine2::flip_x_about(300.0)), &vb);
}

#[test]
fn admin_picks_come_back_in_left_ear_coordinates() {
    let vb = ViewBox::default();
    let rect = ScreenRect::from_min_size(Coord::new(40.0, 30.0), 420.0, 600.0);
    let canonical = Coord::new(338.0, 286.0);
    for mode in [Mode::Points, Mode::Areas] {
        for side in EarSide::all() {
            let forward = overlay_transform(&vb, rect, mode, *side);
            // Where the canonical coordinate is drawn on this ear.
            let drawn = match (mode, side) {
                (Mode::Points, EarSide::Right) => Coord::new(vb.mirror_x(canonical.x), canonical.y),
                _ => canonical,
            };
            let screen = forward.apply(drawn);
            let mapped = CoordinateMapper::map(screen, Some(&forward)).unwrap();
            let pick = canonical_pick(mode, *side, mapped, &vb);
            assert!(
                pick.approx_eq(canonical, COORD_EPSILON),
                "{mode:?}/{side:?}: {pick:?}"
            );
        }
    }
}

#[test]
fn right_ear_markers_sit_where_the_flipped_area_would() {
    let vb = ViewBox::default();
    let rect = ScreenRect::from_min_size(Coord::new(0.0, 0.0), 500.0, 700.0);
    let p = Coord::new(338.0, 286.0);
    let marker = overlay_transform(&vb, rect, Mode::Points, EarSide::Right)
        .apply(Coord::new(vb.mirror_x(p.x), p.y));
    let area = overlay_transform(&vb, rect, Mode::Areas, EarSide::Right).apply(p);
    assert!(marker.approx_eq(area, COORD_EPSILON));
}

#[test]
fn fit_centres_the_view_box_in_the_rect() {
    let vb = ViewBox::default();
    let rect = ScreenRect::from_min_size(Coord::new(100.0, 50.0), 800.0, 600.0);
    let c = vb.fit(rect).apply(vb.center());
    assert!(c.approx_eq(rect.center(), COORD_EPSILON));
}

#[test]
fn degenerate_transforms_are_unavailable() {
    let p = Coord::new(3.0, 4.0);
    assert_eq!(
        CoordinateMapper::map(p, None),
        Err(MapError::TransformUnavailable)
    );
    assert_eq!(
        CoordinateMapper::map(p, Some(&Affine2::scale(0.0, 1.0))),
        Err(MapError::TransformUnavailable)
    );
}

#[test]
fn hit_radius_shrinks_as_the_diagram_grows() {
    let tf = Affine2::scale(2.0, 2.0);
    assert_eq!(CoordinateMapper::map_length(9.0, Some(&tf)), Ok(4.5));
    let flipped = tf.then(Affine2::flip_x_about(100.0));
    assert_eq!(CoordinateMapper::map_length(9.0, Some(&flipped)), Ok(4.5));
}

#[test]
fn mirroring_twice_is_the_identity() {
    let catalog = Catalog::builtin().unwrap();
    let vb = catalog.view_box();
    let once = mirror_points(catalog.points(), vb);
    let twice = mirror_points(&once, vb);
    for (orig, back) in catalog.points().iter().zip(&twice) {
        assert_eq!(orig.id, back.id);
        assert!(back.pos().approx_eq(orig.pos(), COORD_EPSILON));
    }
    for (orig, m) in catalog.points().iter().zip(&once) {
        assert!((m.x - vb.mirror_x(orig.x)).abs() < COORD_EPSILON);
        assert_eq!(m.y, orig.y);
    }
}

#[test]
fn right_ear_click_on_a_mirrored_point_hits_it() {
    let catalog = Catalog::builtin().unwrap();
    let vb = *catalog.view_box();
    let rect = ScreenRect::from_min_size(Coord::new(0.0, 0.0), 500.0, 700.0);
    let all: Vec<_> = catalog.points().iter().collect();
    let right = project_points(&all, EarSide::Right, &vb);

    let base = overlay_transform(&vb, rect, Mode::Points, EarSide::Right);
    let target = &right[0];
    let screen = base.apply(target.pos());
    let at = CoordinateMapper::map(screen, Some(&base)).unwrap();
    let radius = CoordinateMapper::map_length(9.0, Some(&base)).unwrap();
    let hit = hit_test_points(&right, at, radius).unwrap();
    assert_eq!(hit.id, target.id);
}

fn square(id: &str, d: &str) -> Area {
    Area::new(id, Default::default(), Default::default(), Default::default(), d, 60.0, 60.0)
}

#[test]
fn overlapping_areas_resolve_to_the_last_drawn() {
    let catalog = Catalog::from_parts(
        1,
        ViewBox::default(),
        Vec::new(),
        vec![
            square("LOW", "M0 0 L100 0 L100 100 L0 100 Z"),
            square("HIGH", "M50 50 L150 50 L150 150 L50 150 Z"),
        ],
    )
    .unwrap();
    let hit = |x, y| hit_test_areas(catalog.areas(), Coord::new(x, y)).map(|a| a.id.as_str());
    assert_eq!(hit(75.0, 75.0), Some("HIGH"));
    assert_eq!(hit(25.0, 25.0), Some("LOW"));
    assert_eq!(hit(400.0, 400.0), None);
}
