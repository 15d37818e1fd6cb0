//! The two ear views: outline image, point markers or area outlines, labels,
//! and pointer handling.
//!
//! Each view draws its overlay through a forward transform (intrinsic →
//! screen) and maps clicks back through [`CoordinateMapper`] with that same
//! transform. Right-ear points come from the mirror projector and are drawn
//! unflipped; right-ear areas are drawn from the canonical paths through a
//! horizontally flipped transform.

use std::sync::Arc;

use egui::{
    pos2, vec2, Color32, CursorIcon, FontId, Mesh, Pos2, Rect, RichText, Sense, Shape, Stroke,
    TextureHandle, Ui, Vec2,
};

use super::panel_trait::{MapView, Panel, PanelState};
use crate::config::{OutlineTransform, ResponsiveLayout};
use crate::data::admin::AdminPick;
use crate::data::catalog::Catalog;
use crate::data::geometry::{Affine2, Coord, ScreenRect, ViewBox};
use crate::data::mapper::{hit_test_areas, hit_test_points, CoordinateMapper};
use crate::data::mirror::{canonical_pick, overlay_transform, project_points, EarSide};
use crate::data::outline::triangulate;
use crate::data::selection::Mode;
use crate::data::text::Lang;
use crate::events::{EventKind, MapEvent, PickMeta};

/// Marker radius in intrinsic units.
const MARKER_RADIUS: f32 = 5.0;
const MARKER_RADIUS_SELECTED: f32 = 6.0;
const RING_RADIUS: f32 = 10.0;
/// Markers never shrink below this many pixels.
const MIN_MARKER_PX: f32 = 3.0;
/// Click tolerance around a marker, in pixels.
const HIT_RADIUS_PX: f64 = 9.0;
const LABEL_FONT_SIZE: f32 = 12.0;
const LABEL_PADDING: Vec2 = vec2(8.0, 5.0);

pub struct DiagramPanel {
    state: PanelState,
    outline: Option<TextureHandle>,
    outline_tf: OutlineTransform,
    min_width_for_side_by_side: f32,
    show_legend: bool,
}

impl DiagramPanel {
    pub fn new(
        outline: Option<TextureHandle>,
        outline_tf: OutlineTransform,
        layout: &ResponsiveLayout,
        show_legend: bool,
    ) -> Self {
        Self {
            state: PanelState::new("Diagram"),
            outline,
            outline_tf,
            min_width_for_side_by_side: layout.min_width_for_side_by_side,
            show_legend,
        }
    }

    fn ear_view(&self, ui: &mut Ui, side: EarSide, size: Vec2, view: &mut MapView<'_>) {
        let (response, painter) = ui.allocate_painter(size, Sense::click());
        let rect = response.rect;
        let pal = view.palette;
        painter.rect_filled(rect, 8.0, pal.canvas);

        let catalog: Arc<Catalog> = Arc::clone(view.controller.catalog());
        let vb = *catalog.view_box();
        let base = vb.fit(to_screen_rect(rect));
        let px_per_unit = base.x_scale() as f32;

        if let Some(tex) = &self.outline {
            let mut tf = Affine2::scale_about(self.outline_tf.scale, vb.center())
                .then(Affine2::translate(
                    self.outline_tf.translate[0],
                    self.outline_tf.translate[1],
                ))
                .then(base);
            if side.is_mirrored() {
                tf = tf.then(Affine2::flip_x_about(rect.center().x as f64));
            }
            let a = to_pos(tf.apply(Coord::new(vb.min_x, vb.min_y)));
            let b = to_pos(tf.apply(Coord::new(vb.max_x(), vb.max_y())));
            let uv = if side.is_mirrored() {
                Rect::from_min_max(pos2(1.0, 0.0), pos2(0.0, 1.0))
            } else {
                Rect::from_min_max(pos2(0.0, 0.0), pos2(1.0, 1.0))
            };
            painter
                .with_clip_rect(rect)
                .image(tex.id(), Rect::from_two_pos(a, b), uv, pal.outline_tint);
        }

        let st = view.controller.state().clone();
        let lang = st.lang;
        let forward = overlay_transform(&vb, to_screen_rect(rect), st.mode, side);

        let mut tooltip: Option<String> = None;
        let mut hit_id: Option<String> = None;
        let click = response
            .clicked()
            .then(|| response.interact_pointer_pos())
            .flatten();

        match st.mode {
            Mode::Points => {
                let visible = view.controller.visible_points();
                let projected = project_points(&visible, side, &vb);
                let hit_radius = CoordinateMapper::map_length(HIT_RADIUS_PX, Some(&forward)).ok();

                for p in &projected {
                    let selected = st.selected_point.as_deref() == Some(p.id.as_str());
                    let center = to_pos(forward.apply(p.pos()));
                    let r = if selected {
                        MARKER_RADIUS_SELECTED
                    } else {
                        MARKER_RADIUS
                    };
                    let color = if selected { pal.marker_selected } else { pal.marker };
                    painter.circle_filled(center, (r * px_per_unit).max(MIN_MARKER_PX), color);
                    if selected {
                        painter.circle_stroke(
                            center,
                            (RING_RADIUS * px_per_unit).max(MIN_MARKER_PX * 2.0),
                            Stroke::new(2.0, pal.ring),
                        );
                    }
                }

                if let (Some(hover), Some(radius)) = (response.hover_pos(), hit_radius) {
                    if let Ok(at) = CoordinateMapper::map(to_coord(hover), Some(&forward)) {
                        if let Some(p) = hit_test_points(&projected, at, radius) {
                            tooltip = Some(format!("{} ({})", p.name.get(lang), p.standard));
                        }
                    }
                }
                if let (Some(pos), Some(radius)) = (click, hit_radius) {
                    if let Ok(at) = CoordinateMapper::map(to_coord(pos), Some(&forward)) {
                        hit_id = hit_test_points(&projected, at, radius).map(|p| p.id.clone());
                    }
                }

                if let Some(p) = projected
                    .iter()
                    .find(|p| st.selected_point.as_deref() == Some(p.id.as_str()))
                {
                    let text = format!("{} · {}", p.name.get(lang), p.standard);
                    let anchor = to_pos(forward.apply(p.pos()));
                    draw_label(&painter, text, anchor, 10.0 * px_per_unit, side, &view.palette);
                }
            }
            Mode::Areas => {
                let visible: Vec<_> = view.controller.visible_areas();
                for a in &visible {
                    let selected = st.selected_area.as_deref() == Some(a.id.as_str());
                    let (fill, stroke) = if selected {
                        (pal.area_fill_selected, Stroke::new(2.5, pal.ring))
                    } else {
                        (pal.area_fill, Stroke::new(2.0, pal.area_stroke))
                    };
                    for ring in &a.outline().rings {
                        let pts: Vec<Pos2> =
                            ring.iter().map(|c| to_pos(forward.apply(*c))).collect();
                        painter.add(fill_mesh(&pts, &triangulate(ring), fill));
                        painter.add(Shape::closed_line(pts, stroke));
                    }
                }

                if let Some(hover) = response.hover_pos() {
                    if let Ok(at) = CoordinateMapper::map(to_coord(hover), Some(&forward)) {
                        tooltip = hit_test_areas(visible.iter().copied(), at)
                            .map(|a| a.name.get(lang).to_string());
                    }
                }
                if let Some(pos) = click {
                    if let Ok(at) = CoordinateMapper::map(to_coord(pos), Some(&forward)) {
                        hit_id = hit_test_areas(visible.iter().copied(), at).map(|a| a.id.clone());
                    }
                }

                if let Some(a) = visible
                    .iter()
                    .find(|a| st.selected_area.as_deref() == Some(a.id.as_str()))
                {
                    let anchor = to_pos(forward.apply(a.label_pos()));
                    draw_label(&painter, a.name.get(lang).to_string(), anchor, 0.0, side, &view.palette);
                }
            }
        }

        if response.hovered() {
            if st.admin {
                ui.ctx().set_cursor_icon(CursorIcon::Crosshair);
            } else if tooltip.is_some() {
                ui.ctx().set_cursor_icon(CursorIcon::PointingHand);
            }
        }

        if let Some(pos) = click {
            if st.admin {
                self.admin_pick(view, side, pos, &forward, &vb);
            } else if let Some(id) = hit_id {
                let result = match st.mode {
                    Mode::Points => view.controller.select_point(&id),
                    Mode::Areas => view.controller.select_area(&id),
                };
                match result {
                    Ok(kinds) => view.emit(kinds),
                    Err(e) => log::warn!("diagram selection ignored: {e}"),
                }
            }
        }

        if !st.admin {
            if let Some(tip) = tooltip {
                response.on_hover_text_at_pointer(tip);
            }
        }
    }

    /// Map a click to canonical coordinates and record it.
    fn admin_pick(&self, view: &mut MapView<'_>, side: EarSide, pos: Pos2, forward: &Affine2, vb: &ViewBox) {
        let mapped = match CoordinateMapper::map(to_coord(pos), Some(forward)) {
            Ok(c) => c,
            Err(e) => {
                log::warn!("admin pick on {side:?} ear ignored: {e}");
                view.emit_event(MapEvent::new(EventKind::PICK_IGNORED).with_reason(e.to_string()));
                return;
            }
        };
        let canonical = canonical_pick(view.controller.mode(), side, mapped, vb);
        let kinds = view.controller.record_admin_pick(canonical);
        if kinds.is_empty() {
            return;
        }
        view.picks.push(AdminPick {
            side,
            pos: canonical,
        });
        log::debug!("admin pick {side:?} x={:.1} y={:.1}", canonical.x, canonical.y);
        view.emit_event(
            MapEvent::new(kinds)
                .with_state(view.controller.state())
                .with_pick(PickMeta {
                    side,
                    screen: to_coord(pos),
                    diagram: canonical,
                }),
        );
    }
}

impl Panel for DiagramPanel {
    fn state(&self) -> &PanelState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut PanelState {
        &mut self.state
    }

    fn render_panel(&mut self, ui: &mut Ui, view: &mut MapView<'_>) {
        let lang = view.controller.lang();
        let legend_h = if self.show_legend { 40.0 } else { 0.0 };
        let title_h = ui.text_style_height(&egui::TextStyle::Body) + ui.spacing().item_spacing.y;
        let avail = ui.available_size();
        let gap = ui.spacing().item_spacing.x;
        let side_by_side = avail.x >= self.min_width_for_side_by_side;

        let ear_size = if side_by_side {
            vec2((avail.x - gap) * 0.5, avail.y - legend_h - title_h)
        } else {
            vec2(avail.x, (avail.y - legend_h) * 0.5 - title_h)
        }
        .max(vec2(120.0, 160.0));

        let mut draw_ear = |ui: &mut Ui, side: EarSide| {
            ui.vertical(|ui| {
                let title = match side {
                    EarSide::Left => lang.pick("左耳", "Left"),
                    EarSide::Right => lang.pick("右耳", "Right"),
                };
                ui.label(RichText::new(title).strong());
                self.ear_view(ui, side, ear_size, view);
            });
        };
        if side_by_side {
            ui.horizontal(|ui| {
                for side in EarSide::all() {
                    draw_ear(ui, *side);
                }
            });
        } else {
            for side in EarSide::all() {
                draw_ear(ui, *side);
            }
        }

        if self.show_legend {
            ui.add_space(6.0);
            let st = view.controller.state();
            let legend = match st.mode {
                Mode::Points => match lang {
                    Lang::Zh => format!(
                        "当前：{}（点位）。GB/T 目前为“常用点” starter set，建议你用标点模式对照教材快速修正。",
                        st.standard
                    ),
                    Lang::En => format!(
                        "Now: {} (points). GB/T here is a starter \"common points\" set; use Admin mode to re-mark against your reference.",
                        st.standard
                    ),
                },
                Mode::Areas => lang
                    .pick(
                        "当前：功能区（区域）。这是示意区域，用于讲解/分类。你可以后续用更详细的区域 SVG 替换。",
                        "Now: Zones (areas). These are schematic regions for teaching; you can replace them with a more detailed zonal SVG later.",
                    )
                    .to_string(),
            };
            ui.small(legend);
        }
    }
}

/// Placement of an on-diagram label box of `size` next to `anchor`.
///
/// Text is never mirrored: on the left ear the box extends rightwards from
/// the anchor, on the right ear leftwards, so both read the same way.
pub fn label_rect(anchor: Pos2, size: Vec2, gap: f32, side: EarSide) -> Rect {
    let top = anchor.y - size.y * 0.6;
    let left = match side {
        EarSide::Left => anchor.x + gap,
        EarSide::Right => anchor.x - gap - size.x,
    };
    Rect::from_min_size(pos2(left, top), size)
}

fn draw_label(
    painter: &egui::Painter,
    text: String,
    anchor: Pos2,
    gap: f32,
    side: EarSide,
    palette: &crate::color_scheme::DiagramPalette,
) {
    let galley = painter.layout_no_wrap(text, FontId::proportional(LABEL_FONT_SIZE), palette.label_text);
    let rect = label_rect(anchor, galley.size() + LABEL_PADDING * 2.0, gap, side);
    painter.rect_filled(rect, 8.0, palette.label_bg);
    painter.galley(rect.min + LABEL_PADDING, galley, palette.label_text);
}

fn fill_mesh(pts: &[Pos2], triangles: &[[usize; 3]], fill: Color32) -> Shape {
    let mut mesh = Mesh::default();
    for p in pts {
        mesh.colored_vertex(*p, fill);
    }
    for t in triangles {
        mesh.add_triangle(t[0] as u32, t[1] as u32, t[2] as u32);
    }
    Shape::mesh(mesh)
}

fn to_coord(p: Pos2) -> Coord {
    Coord::new(p.x as f64, p.y as f64)
}

fn to_pos(c: Coord) -> Pos2 {
    pos2(c.x as f32, c.y as f32)
}

fn to_screen_rect(r: Rect) -> ScreenRect {
    ScreenRect {
        min: to_coord(r.min),
        max: to_coord(r.max),
    }
}
