//! Catalog Store: the immutable set of points and areas.
//!
//! The catalog is a versioned YAML (or JSON) document. It is validated once
//! on load and then shared read-only behind an `Arc`.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};

use super::geometry::{Coord, ViewBox};
use super::outline::{AreaOutline, OutlineError};
use super::text::{Lang, Localized};

/// Bundled catalog, embedded at compile time.
pub const BUILTIN_CATALOG_YAML: &str = include_str!("../../assets/catalog.yaml");

static BUILTIN: OnceCell<Arc<Catalog>> = OnceCell::new();

/// Point naming/positioning convention.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Standard {
    /// The 5-point NADA protocol.
    #[default]
    #[serde(rename = "NADA")]
    Nada,
    /// GB/T common points.
    #[serde(rename = "GBT")]
    Gbt,
}

impl Standard {
    pub fn all() -> &'static [Standard] {
        &[Standard::Nada, Standard::Gbt]
    }

    /// Short tag shown next to point names.
    pub fn tag(self) -> &'static str {
        match self {
            Standard::Nada => "NADA",
            Standard::Gbt => "GBT",
        }
    }

    pub fn button_label(self) -> &'static str {
        match self {
            Standard::Nada => "NADA (5)",
            Standard::Gbt => "GB/T (common)",
        }
    }
}

impl std::fmt::Display for Standard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.tag())
    }
}

/// Grouping tag for points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Calming,
    Organs,
    Endocrine,
    Pain,
    HeadFace,
    Spine,
    Other,
}

impl Category {
    pub fn all() -> &'static [Category] {
        &[
            Category::Calming,
            Category::Organs,
            Category::Endocrine,
            Category::Pain,
            Category::HeadFace,
            Category::Spine,
            Category::Other,
        ]
    }

    pub fn label(self, lang: Lang) -> &'static str {
        match self {
            Category::Calming => lang.pick("安神/情绪", "Calming"),
            Category::Organs => lang.pick("脏腑", "Organs"),
            Category::Endocrine => lang.pick("内分泌", "Endocrine"),
            Category::Pain => lang.pick("疼痛", "Pain"),
            Category::HeadFace => lang.pick("头面", "Head/Face"),
            Category::Spine => lang.pick("脊柱", "Spine"),
            Category::Other => lang.pick("其它", "Other"),
        }
    }
}

/// A single named location on the ear diagram.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub id: String,
    pub standard: Standard,
    pub category: Category,
    pub name: Localized,
    /// Associated organ/system (educational).
    pub organ: Localized,
    pub summary: Localized,
    /// Optional short case vignette (educational, not medical advice).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub case: Option<Localized>,
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn pos(&self) -> Coord {
        Coord::new(self.x, self.y)
    }

    /// Lowercased searchable text: id plus both-language name, organ and summary.
    pub fn haystack(&self) -> String {
        searchable(&self.id, &self.name, &self.organ, &self.summary)
    }

    /// Case-insensitive substring match; `needle` must already be trimmed
    /// and lowercased. An empty needle matches everything.
    pub fn matches(&self, needle: &str) -> bool {
        needle.is_empty() || self.haystack().contains(needle)
    }
}

/// A named region of the ear, outlined by SVG path data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Area {
    pub id: String,
    pub name: Localized,
    pub organ: Localized,
    pub summary: Localized,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub case: Option<Localized>,
    /// SVG path `d` in intrinsic coordinates, left-ear orientation.
    pub path_d: String,
    pub label_x: f64,
    pub label_y: f64,
    #[serde(skip)]
    outline: AreaOutline,
}

impl Area {
    pub fn new(
        id: impl Into<String>,
        name: Localized,
        organ: Localized,
        summary: Localized,
        path_d: impl Into<String>,
        label_x: f64,
        label_y: f64,
    ) -> Self {
        Self {
            id: id.into(),
            name,
            organ,
            summary,
            case: None,
            path_d: path_d.into(),
            label_x,
            label_y,
            outline: AreaOutline::default(),
        }
    }

    pub fn label_pos(&self) -> Coord {
        Coord::new(self.label_x, self.label_y)
    }

    /// Flattened outline; populated when the area enters a [`Catalog`].
    pub fn outline(&self) -> &AreaOutline {
        &self.outline
    }
}

fn searchable(id: &str, name: &Localized, organ: &Localized, summary: &Localized) -> String {
    [
        id,
        name.zh.as_str(),
        name.en.as_str(),
        organ.zh.as_str(),
        organ.en.as_str(),
        summary.zh.as_str(),
        summary.en.as_str(),
    ]
    .join(" ")
    .to_lowercase()
}

/// Normalise user search input the same way haystacks are built.
pub fn normalize_query(q: &str) -> String {
    q.trim().to_lowercase()
}

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("failed to read catalog {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid catalog YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("invalid catalog JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("duplicate point id {0:?}")]
    DuplicatePointId(String),
    #[error("duplicate area id {0:?}")]
    DuplicateAreaId(String),
    #[error("{id:?} at ({x}, {y}) lies outside the diagram bounds {bounds}")]
    OutOfBounds {
        id: String,
        x: f64,
        y: f64,
        bounds: ViewBox,
    },
    #[error("area {id:?} has an unusable outline: {source}")]
    Outline {
        id: String,
        #[source]
        source: OutlineError,
    },
}

/// On-disk layout of a catalog document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogDocument {
    pub version: u32,
    #[serde(default)]
    pub view_box: ViewBox,
    #[serde(default)]
    pub points: Vec<Point>,
    #[serde(default)]
    pub areas: Vec<Area>,
}

/// Validated, read-only catalog.
#[derive(Debug, Clone)]
pub struct Catalog {
    version: u32,
    view_box: ViewBox,
    points: Vec<Point>,
    areas: Vec<Area>,
    point_index: HashMap<String, usize>,
    area_index: HashMap<String, usize>,
}

impl Catalog {
    /// Validate and index a set of points and areas.
    pub fn from_parts(
        version: u32,
        view_box: ViewBox,
        points: Vec<Point>,
        mut areas: Vec<Area>,
    ) -> Result<Self, CatalogError> {
        let mut point_index = HashMap::with_capacity(points.len());
        for (i, p) in points.iter().enumerate() {
            if point_index.insert(p.id.clone(), i).is_some() {
                return Err(CatalogError::DuplicatePointId(p.id.clone()));
            }
            check_bounds(&view_box, &p.id, p.pos())?;
        }

        let mut area_index = HashMap::with_capacity(areas.len());
        for (i, a) in areas.iter_mut().enumerate() {
            if area_index.insert(a.id.clone(), i).is_some() {
                return Err(CatalogError::DuplicateAreaId(a.id.clone()));
            }
            check_bounds(&view_box, &a.id, a.label_pos())?;
            a.outline = AreaOutline::parse(&a.path_d).map_err(|source| CatalogError::Outline {
                id: a.id.clone(),
                source,
            })?;
        }

        Ok(Self {
            version,
            view_box,
            points,
            areas,
            point_index,
            area_index,
        })
    }

    pub fn from_document(doc: CatalogDocument) -> Result<Self, CatalogError> {
        Self::from_parts(doc.version, doc.view_box, doc.points, doc.areas)
    }

    pub fn from_yaml_str(s: &str) -> Result<Self, CatalogError> {
        let doc: CatalogDocument = serde_yaml::from_str(s)?;
        Self::from_document(doc)
    }

    pub fn from_json_str(s: &str) -> Result<Self, CatalogError> {
        let doc: CatalogDocument = serde_json::from_str(s)?;
        Self::from_document(doc)
    }

    /// Load a catalog file; `.json` files are read as JSON, anything else as YAML.
    pub fn load_from_path(path: &Path) -> Result<Self, CatalogError> {
        let txt = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let is_json = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("json"));
        let catalog = if is_json {
            Self::from_json_str(&txt)?
        } else {
            Self::from_yaml_str(&txt)?
        };
        log::info!(
            "loaded catalog {:?} (v{}, {} points, {} areas)",
            path,
            catalog.version,
            catalog.points.len(),
            catalog.areas.len()
        );
        Ok(catalog)
    }

    /// The bundled catalog, parsed once per process.
    pub fn builtin() -> Result<Arc<Catalog>, CatalogError> {
        BUILTIN
            .get_or_try_init(|| {
                let c = Self::from_yaml_str(BUILTIN_CATALOG_YAML)?;
                log::debug!(
                    "parsed built-in catalog v{} ({} points, {} areas)",
                    c.version,
                    c.points.len(),
                    c.areas.len()
                );
                Ok(Arc::new(c))
            })
            .cloned()
    }

    pub fn to_document(&self) -> CatalogDocument {
        CatalogDocument {
            version: self.version,
            view_box: self.view_box,
            points: self.points.clone(),
            areas: self.areas.clone(),
        }
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    /// Bounds all coordinates were authored against.
    pub fn view_box(&self) -> &ViewBox {
        &self.view_box
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn areas(&self) -> &[Area] {
        &self.areas
    }

    pub fn point(&self, id: &str) -> Option<&Point> {
        self.point_index.get(id).map(|&i| &self.points[i])
    }

    pub fn area(&self, id: &str) -> Option<&Area> {
        self.area_index.get(id).map(|&i| &self.areas[i])
    }

    /// Points of one standard in declaration order.
    pub fn points_for(&self, standard: Standard) -> impl Iterator<Item = &Point> + '_ {
        self.points.iter().filter(move |p| p.standard == standard)
    }
}

fn check_bounds(view_box: &ViewBox, id: &str, p: Coord) -> Result<(), CatalogError> {
    if p.x.is_finite() && p.y.is_finite() && view_box.contains(p) {
        Ok(())
    } else {
        Err(CatalogError::OutOfBounds {
            id: id.to_string(),
            x: p.x,
            y: p.y,
            bounds: *view_box,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(id: &str, standard: Standard, x: f64, y: f64) -> Point {
        Point {
            id: id.to_string(),
            standard,
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
    fn duplicate_point_ids_are_rejected() {
        let err = Catalog::from_parts(
            1,
            ViewBox::default(),
            vec![point("P1", Standard::Nada, 1.0, 1.0), point("P1", Standard::Gbt, 2.0, 2.0)],
            vec![],
        )
        .unwrap_err();
        assert!(matches!(err, CatalogError::DuplicatePointId(id) if id == "P1"));
    }

    #[test]
    fn point_and_area_ids_are_separate_namespaces() {
        let area = Area::new(
            "P1",
            Localized::new("区", "Zone"),
            Localized::default(),
            Localized::default(),
            "M0 0 L10 0 L10 10 Z",
            5.0,
            5.0,
        );
        let c = Catalog::from_parts(1, ViewBox::default(), vec![point("P1", Standard::Nada, 1.0, 1.0)], vec![area])
            .unwrap();
        assert!(c.point("P1").is_some());
        assert!(c.area("P1").is_some());
        assert!(!c.area("P1").unwrap().outline().rings.is_empty());
    }

    #[test]
    fn out_of_bounds_point_is_rejected() {
        let err = Catalog::from_parts(1, ViewBox::default(), vec![point("X", Standard::Nada, -1.0, 5.0)], vec![])
            .unwrap_err();
        assert!(matches!(err, CatalogError::OutOfBounds { .. }));
    }

    #[test]
    fn points_for_keeps_declaration_order() {
        let c = Catalog::from_parts(
            1,
            ViewBox::default(),
            vec![
                point("b", Standard::Nada, 1.0, 1.0),
                point("x", Standard::Gbt, 1.0, 1.0),
                point("a", Standard::Nada, 1.0, 1.0),
            ],
            vec![],
        )
        .unwrap();
        let ids: Vec<_> = c.points_for(Standard::Nada).map(|p| p.id.as_str()).collect();
        assert_eq!(ids, ["b", "a"]);
    }

    #[test]
    fn yaml_document_round_trips_through_validation() {
        let yaml = r#"
version: 3
view_box: { min_x: 0, min_y: 0, width: 100, height: 100 }
points:
  - id: P1
    standard: GBT
    category: HeadFace
    name: { zh: 眼, en: Eye }
    organ: { zh: 眼, en: Eye }
    summary: { zh: 示意, en: Schematic }
    x: 10
    y: 20
areas:
  - id: A1
    name: { zh: 区, en: Zone }
    organ: { zh: 区, en: Zone }
    summary: { zh: 区, en: Zone }
    case: { zh: 例, en: Example }
    path_d: "M10 10 L90 10 L50 90 Z"
    label_x: 50
    label_y: 50
"#;
        let c = Catalog::from_yaml_str(yaml).unwrap();
        assert_eq!(c.version(), 3);
        assert_eq!(c.point("P1").unwrap().standard, Standard::Gbt);
        assert!(c.area("A1").unwrap().case.is_some());
        assert!(c.point("P1").unwrap().matches("eye"));
    }

    #[test]
    fn category_labels_are_bilingual() {
        assert_eq!(Category::HeadFace.label(Lang::En), "Head/Face");
        assert_eq!(Category::Calming.label(Lang::Zh), "安神/情绪");
    }
}
