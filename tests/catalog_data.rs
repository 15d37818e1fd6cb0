//! Checks on the bundled catalog data, independent of the UI.

use std::collections::HashSet;

use earmap::{Catalog, Category, Coord, Standard};

fn catalog() -> std::sync::Arc<Catalog> {
    Catalog::builtin().expect("bundled catalog must load")
}

#[test]
fn point_ids_are_unique() {
    let c = catalog();
    let mut seen = HashSet::new();
    for p in c.points() {
        assert!(seen.insert(p.id.as_str()), "duplicate point id {}", p.id);
    }
}

#[test]
fn area_ids_are_unique() {
    let c = catalog();
    let mut seen = HashSet::new();
    for a in c.areas() {
        assert!(seen.insert(a.id.as_str()), "duplicate area id {}", a.id);
    }
}

#[test]
fn every_coordinate_lies_inside_the_view_box() {
    let c = catalog();
    let vb = c.view_box();
    for p in c.points() {
        assert!(vb.contains(p.pos()), "{} at ({}, {})", p.id, p.x, p.y);
    }
    for a in c.areas() {
        assert!(vb.contains(a.label_pos()), "label of {}", a.id);
        let (min, max) = a.outline().bounds().expect("outline has vertices");
        assert!(vb.contains(min) && vb.contains(max), "outline of {}", a.id);
    }
}

#[test]
fn nada_has_its_five_points() {
    let c = catalog();
    let names: Vec<_> = c
        .points_for(Standard::Nada)
        .map(|p| p.name.en.as_str())
        .collect();
    assert_eq!(names, ["Shen Men", "Sympathetic", "Kidney", "Liver", "Lung"]);
}

#[test]
fn both_standards_are_populated() {
    let c = catalog();
    for s in Standard::all() {
        assert!(c.points_for(*s).next().is_some(), "{s} has no points");
    }
}

#[test]
fn every_text_is_bilingual() {
    let c = catalog();
    for p in c.points() {
        for t in [&p.name, &p.organ, &p.summary] {
            assert!(!t.zh.is_empty() && !t.en.is_empty(), "{}", p.id);
        }
    }
    for a in c.areas() {
        for t in [&a.name, &a.organ, &a.summary] {
            assert!(!t.zh.is_empty() && !t.en.is_empty(), "{}", a.id);
        }
    }
}

#[test]
fn area_outlines_contain_their_centroid() {
    let c = catalog();
    for a in c.areas() {
        let ring = &a.outline().rings[0];
        let n = ring.len() as f64;
        let centroid = Coord::new(
            ring.iter().map(|p| p.x).sum::<f64>() / n,
            ring.iter().map(|p| p.y).sum::<f64>() / n,
        );
        assert!(a.outline().contains(centroid), "{}", a.id);
    }
}

#[test]
fn categories_in_use_are_known() {
    let c = catalog();
    for p in c.points() {
        assert!(Category::all().contains(&p.category));
    }
}

#[test]
fn document_round_trips_through_yaml() {
    let c = catalog();
    let yaml = serde_yaml::to_string(&c.to_document()).unwrap();
    let back = Catalog::from_yaml_str(&yaml).unwrap();
    assert_eq!(back.points(), c.points());
    assert_eq!(back.areas().len(), c.areas().len());
}
