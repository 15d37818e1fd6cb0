//! Selection State and the controller that owns it.
//!
//! [`SelectionController`] is the single source of truth for what the user
//! is viewing and has selected. Every transition keeps the cross-field
//! invariant: at most one of `selected_point` / `selected_area` is set, and
//! the set one belongs to the current [`Mode`].
//!
//! Transitions return the [`EventKind`]s they caused (empty when nothing
//! changed) so the UI can forward them to an
//! [`EventController`](crate::events::EventController).

use std::sync::Arc;

use super::catalog::{normalize_query, Area, Catalog, Point, Standard};
use super::geometry::Coord;
use super::text::Lang;
use crate::events::EventKind;

/// What the diagram shows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Points,
    Areas,
}

impl Mode {
    pub fn label(self, lang: Lang) -> &'static str {
        match self {
            Mode::Points => lang.pick("穴位（点）", "Points"),
            Mode::Areas => lang.pick("功能区（区域）", "Zones (Areas)"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SelectionError {
    /// The id is not in the catalog, or (for points) belongs to a standard
    /// that is not currently displayed.
    #[error("unknown {kind} id {id:?}")]
    UnknownId { kind: &'static str, id: String },
    #[error("cannot select {kind} while in {mode:?} mode")]
    ModeMismatch { kind: &'static str, mode: Mode },
}

/// Per-session view and selection state. Never persisted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectionState {
    pub mode: Mode,
    /// Only meaningful in [`Mode::Points`].
    pub standard: Standard,
    pub lang: Lang,
    pub search_text: String,
    pub selected_point: Option<String>,
    pub selected_area: Option<String>,
    pub admin: bool,
    /// Last canonical coordinate read in admin mode.
    pub last_admin_coordinate: Option<Coord>,
}

impl SelectionState {
    /// At most one selection is set and it matches the mode.
    pub fn invariant_holds(&self) -> bool {
        match self.mode {
            Mode::Points => self.selected_area.is_none(),
            Mode::Areas => self.selected_point.is_none(),
        }
    }

    /// Id of whatever is currently selected.
    pub fn selected_id(&self) -> Option<&str> {
        self.selected_point
            .as_deref()
            .or(self.selected_area.as_deref())
    }
}

/// Owns one session's [`SelectionState`] and derives views from the catalog.
#[derive(Debug, Clone)]
pub struct SelectionController {
    catalog: Arc<Catalog>,
    state: SelectionState,
}

impl SelectionController {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self {
            catalog,
            state: SelectionState::default(),
        }
    }

    pub fn with_lang(mut self, lang: Lang) -> Self {
        self.state.lang = lang;
        self
    }

    pub fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }

    pub fn state(&self) -> &SelectionState {
        &self.state
    }

    pub fn mode(&self) -> Mode {
        self.state.mode
    }

    pub fn lang(&self) -> Lang {
        self.state.lang
    }

    // ── Transitions ─────────────────────────────────────────────────────

    /// Switch mode, dropping whichever selection does not belong to it.
    pub fn set_mode(&mut self, mode: Mode) -> EventKind {
        if self.state.mode == mode {
            return EventKind::NONE;
        }
        self.state.mode = mode;
        let mut kinds = EventKind::MODE_CHANGED;
        let cleared = match mode {
            Mode::Areas => self.state.selected_point.take(),
            Mode::Points => self.state.selected_area.take(),
        };
        if cleared.is_some() {
            kinds |= EventKind::SELECTION_CLEARED;
        }
        log::debug!("mode -> {:?} ({})", mode, kinds);
        kinds
    }

    /// Switch standard; a selected point from the other standard is dropped.
    pub fn set_standard(&mut self, standard: Standard) -> EventKind {
        if self.state.standard == standard {
            return EventKind::NONE;
        }
        self.state.standard = standard;
        let mut kinds = EventKind::STANDARD_CHANGED;
        let stale = self
            .state
            .selected_point
            .as_deref()
            .and_then(|id| self.catalog.point(id))
            .is_some_and(|p| p.standard != standard);
        if stale {
            self.state.selected_point = None;
            kinds |= EventKind::SELECTION_CLEARED;
        }
        log::debug!("standard -> {} ({})", standard, kinds);
        kinds
    }

    pub fn set_lang(&mut self, lang: Lang) -> EventKind {
        if self.state.lang == lang {
            return EventKind::NONE;
        }
        self.state.lang = lang;
        EventKind::LANGUAGE_CHANGED
    }

    /// Update the search text. The current selection is kept even if the
    /// selected item no longer matches.
    pub fn set_search_text(&mut self, text: impl Into<String>) -> EventKind {
        let text = text.into();
        if self.state.search_text == text {
            return EventKind::NONE;
        }
        self.state.search_text = text;
        EventKind::SEARCH_CHANGED
    }

    /// Select a point of the active standard. Leaves state unchanged on error.
    pub fn select_point(&mut self, id: &str) -> Result<EventKind, SelectionError> {
        if self.state.mode != Mode::Points {
            return Err(SelectionError::ModeMismatch {
                kind: "point",
                mode: self.state.mode,
            });
        }
        match self.catalog.point(id) {
            Some(p) if p.standard == self.state.standard => {}
            _ => {
                return Err(SelectionError::UnknownId {
                    kind: "point",
                    id: id.to_string(),
                })
            }
        }
        if self.state.selected_point.as_deref() == Some(id) {
            return Ok(EventKind::NONE);
        }
        self.state.selected_point = Some(id.to_string());
        log::debug!("selected point {id}");
        Ok(EventKind::POINT_SELECTED)
    }

    /// Select an area. Leaves state unchanged on error.
    pub fn select_area(&mut self, id: &str) -> Result<EventKind, SelectionError> {
        if self.state.mode != Mode::Areas {
            return Err(SelectionError::ModeMismatch {
                kind: "area",
                mode: self.state.mode,
            });
        }
        if self.catalog.area(id).is_none() {
            return Err(SelectionError::UnknownId {
                kind: "area",
                id: id.to_string(),
            });
        }
        if self.state.selected_area.as_deref() == Some(id) {
            return Ok(EventKind::NONE);
        }
        self.state.selected_area = Some(id.to_string());
        log::debug!("selected area {id}");
        Ok(EventKind::AREA_SELECTED)
    }

    pub fn clear_selection(&mut self) -> EventKind {
        let had = self.state.selected_point.take().is_some() | self.state.selected_area.take().is_some();
        if had {
            EventKind::SELECTION_CLEARED
        } else {
            EventKind::NONE
        }
    }

    /// Admin mode is orthogonal to mode and selection.
    pub fn set_admin(&mut self, on: bool) -> EventKind {
        if self.state.admin == on {
            return EventKind::NONE;
        }
        self.state.admin = on;
        log::debug!("admin -> {on}");
        EventKind::ADMIN_TOGGLED
    }

    pub fn toggle_admin(&mut self) -> EventKind {
        self.set_admin(!self.state.admin)
    }

    /// Store a mapped click as the admin coordinate. Ignored unless admin
    /// mode is on.
    pub fn record_admin_pick(&mut self, pos: Coord) -> EventKind {
        if !self.state.admin {
            return EventKind::NONE;
        }
        self.state.last_admin_coordinate = Some(pos);
        EventKind::ADMIN_PICK
    }

    /// Forget the last admin coordinate, e.g. after the pick log is cleared.
    pub fn clear_admin_coordinate(&mut self) {
        self.state.last_admin_coordinate = None;
    }

    // ── Derived views ───────────────────────────────────────────────────

    /// Points of the active standard matching the search text, in catalog order.
    pub fn visible_points(&self) -> Vec<&Point> {
        let needle = normalize_query(&self.state.search_text);
        self.catalog
            .points_for(self.state.standard)
            .filter(|p| p.matches(&needle))
            .collect()
    }

    /// All areas in catalog order. The search box narrows the point list
    /// only; zones are always shown in full.
    pub fn visible_areas(&self) -> Vec<&Area> {
        self.catalog.areas().iter().collect()
    }

    pub fn selected_point(&self) -> Option<&Point> {
        self.state
            .selected_point
            .as_deref()
            .and_then(|id| self.catalog.point(id))
    }

    pub fn selected_area(&self) -> Option<&Area> {
        self.state
            .selected_area
            .as_deref()
            .and_then(|id| self.catalog.area(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::catalog::Category;
    use crate::data::geometry::ViewBox;
    use crate::data::text::Localized;

    fn catalog() -> Arc<Catalog> {
        let p = |id: &str, standard, zh: &str, en: &str| Point {
            id: id.to_string(),
            standard,
            category: Category::Organs,
            name: Localized::new(zh, en),
            organ: Localized::default(),
            summary: Localized::default(),
            case: None,
            x: 100.0,
            y: 100.0,
        };
        let area = Area::new(
            "AREA_X",
            Localized::new("区", "Zone"),
            Localized::default(),
            Localized::default(),
            "M0 0 L50 0 L50 50 Z",
            10.0,
            10.0,
        );
        Arc::new(
            Catalog::from_parts(
                1,
                ViewBox::default(),
                vec![
                    p("P1", Standard::Nada, "神门", "Shen Men"),
                    p("P2", Standard::Nada, "肺", "Lung"),
                    p("G1", Standard::Gbt, "眼", "Eye"),
                ],
                vec![area],
            )
            .unwrap(),
        )
    }

    #[test]
    fn defaults_match_session_start() {
        let c = SelectionController::new(catalog());
        let s = c.state();
        assert_eq!(s.mode, Mode::Points);
        assert_eq!(s.standard, Standard::Nada);
        assert!(s.selected_id().is_none());
        assert!(!s.admin);
    }

    #[test]
    fn standard_mismatch_is_unknown_id() {
        let mut c = SelectionController::new(catalog());
        let err = c.select_point("G1").unwrap_err();
        assert!(matches!(err, SelectionError::UnknownId { .. }));
        assert!(c.state().selected_point.is_none());
    }

    #[test]
    fn mode_mismatch_leaves_state_unchanged() {
        let mut c = SelectionController::new(catalog());
        let before = c.state().clone();
        assert!(matches!(
            c.select_area("AREA_X"),
            Err(SelectionError::ModeMismatch { .. })
        ));
        assert_eq!(c.state(), &before);
    }

    #[test]
    fn standard_switch_reports_cleared_selection() {
        let mut c = SelectionController::new(catalog());
        c.select_point("P1").unwrap();
        let kinds = c.set_standard(Standard::Gbt);
        assert!(kinds.contains(EventKind::STANDARD_CHANGED | EventKind::SELECTION_CLEARED));
        assert!(c.state().selected_point.is_none());
        // Switching back does not resurrect it.
        assert_eq!(c.set_standard(Standard::Nada), EventKind::STANDARD_CHANGED);
    }

    #[test]
    fn repeated_transitions_are_silent() {
        let mut c = SelectionController::new(catalog());
        assert_eq!(c.set_mode(Mode::Points), EventKind::NONE);
        assert_eq!(c.select_point("P2").unwrap(), EventKind::POINT_SELECTED);
        assert_eq!(c.select_point("P2").unwrap(), EventKind::NONE);
    }

    #[test]
    fn admin_pick_requires_admin_mode() {
        let mut c = SelectionController::new(catalog());
        assert_eq!(c.record_admin_pick(Coord::new(1.0, 2.0)), EventKind::NONE);
        assert!(c.state().last_admin_coordinate.is_none());
        c.toggle_admin();
        assert_eq!(c.record_admin_pick(Coord::new(1.0, 2.0)), EventKind::ADMIN_PICK);
        assert_eq!(c.state().last_admin_coordinate, Some(Coord::new(1.0, 2.0)));
    }

    #[test]
    fn search_leaves_areas_alone() {
        let mut c = SelectionController::new(catalog());
        c.set_search_text("nothing-matches");
        c.set_mode(Mode::Areas);
        assert_eq!(c.visible_areas().len(), 1);
        assert!(c.select_area("AREA_X").is_ok());
    }

    #[test]
    fn whitespace_search_shows_everything() {
        let mut c = SelectionController::new(catalog());
        c.set_search_text("   ");
        assert_eq!(c.visible_points().len(), 2);
    }
}
