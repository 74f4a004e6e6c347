use eframe::egui;

use crate::editor::Surface;

const MIN_ZOOM: f32 = 0.1;
const MAX_ZOOM: f32 = 10.0;

/// Pan and zoom of the canvas inside the window. The canvas is centred in
/// the available area at zoom 1.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CanvasView {
    pub canvas_size: egui::Vec2,
    pub pan: egui::Vec2,
    pub zoom: f32,
}

impl CanvasView {
    pub fn new(canvas_size: egui::Vec2) -> Self {
        Self {
            canvas_size,
            pan: egui::Vec2::ZERO,
            zoom: 1.0,
        }
    }

    /// Convert canvas-space coords to screen-space
    pub fn canvas_to_screen(&self, area: egui::Rect, p: egui::Pos2) -> egui::Pos2 {
        area.center() + self.pan + (p.to_vec2() - self.canvas_size * 0.5) * self.zoom
    }

    /// Convert screen-space coords to canvas-space
    pub fn screen_to_canvas(&self, area: egui::Rect, p: egui::Pos2) -> egui::Pos2 {
        let rel = p - area.center() - self.pan;
        (rel / self.zoom + self.canvas_size * 0.5).to_pos2()
    }

    pub fn canvas_rect_on_screen(&self, area: egui::Rect) -> egui::Rect {
        egui::Rect::from_min_max(
            self.canvas_to_screen(area, egui::Pos2::ZERO),
            self.canvas_to_screen(area, self.canvas_size.to_pos2()),
        )
    }

    /// Scale by `factor`, keeping the canvas point under `cursor` fixed.
    pub fn zoom_at(&mut self, area: egui::Rect, cursor: egui::Pos2, factor: f32) {
        let new_zoom = (self.zoom * factor).clamp(MIN_ZOOM, MAX_ZOOM);
        let cursor_rel = cursor - area.center() - self.pan;
        self.pan -= cursor_rel * (new_zoom / self.zoom - 1.0);
        self.zoom = new_zoom;
    }
}

/// Paints editor output through a [`CanvasView`].
pub struct PainterSurface<'a> {
    pub painter: &'a egui::Painter,
    pub area: egui::Rect,
    pub view: &'a CanvasView,
}

impl Surface for PainterSurface<'_> {
    // egui repaints from scratch every frame; the image underneath must stay.
    fn clear(&mut self) {}

    fn stroke_rect(&mut self, rect: egui::Rect, stroke: egui::Stroke) {
        let rect = egui::Rect::from_two_pos(
            self.view.canvas_to_screen(self.area, rect.min),
            self.view.canvas_to_screen(self.area, rect.max),
        );
        let stroke = egui::Stroke::new(stroke.width * self.view.zoom, stroke.color);
        self.painter
            .rect_stroke(rect, 0.0, stroke, egui::StrokeKind::Middle);
    }

    fn text(&mut self, pos: egui::Pos2, text: &str, size: f32, color: egui::Color32) {
        let pos = self.view.canvas_to_screen(self.area, pos);
        self.painter.text(
            pos,
            egui::Align2::LEFT_BOTTOM,
            text,
            egui::FontId::proportional(size * self.view.zoom),
            color,
        );
    }
}
