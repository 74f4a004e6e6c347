use eframe::egui;

use crate::geometry::{hit_test, is_near_edge, set_second_corner, translate};
use crate::labels::{LabelControl, CUSTOM_LABEL};
use crate::model::BoundingBox;

// ── Seams ───────────────────────────────────────────────────────────────────

/// Where a freshly drawn box gets its label from.
pub trait LabelSource {
    fn current_label(&self) -> String;
}

/// Drawing target for [`BoxEditor::render`]. Coordinates are canvas space.
pub trait Surface {
    fn clear(&mut self);
    fn stroke_rect(&mut self, rect: egui::Rect, stroke: egui::Stroke);
    fn text(&mut self, pos: egui::Pos2, text: &str, size: f32, color: egui::Color32);
}

pub const BOX_STROKE_WIDTH: f32 = 2.0;
pub const BOX_COLOR: egui::Color32 = egui::Color32::GREEN;
pub const LABEL_SIZE: f32 = 14.0;
pub const LABEL_COLOR: egui::Color32 = egui::Color32::WHITE;
/// Labels sit this far above the box's first corner.
pub const LABEL_OFFSET: f32 = 5.0;

// ── Session ─────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub enum Session {
    Idle,
    Dragging { index: usize, last: egui::Pos2 },
    Resizing { index: usize },
    Drawing { pending: BoundingBox },
}

// ── Editor ──────────────────────────────────────────────────────────────────

/// Owns the boxes shown over one canvas and turns pointer gestures into edits.
#[derive(Debug)]
pub struct BoxEditor {
    boxes: Vec<BoundingBox>,
    session: Session,
    revision: u64,
}

impl Default for BoxEditor {
    fn default() -> Self {
        Self::new()
    }
}

impl BoxEditor {
    pub fn new() -> Self {
        Self {
            boxes: Vec::new(),
            session: Session::Idle,
            revision: 0,
        }
    }

    pub fn boxes(&self) -> &[BoundingBox] {
        &self.boxes
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Bumped whenever the canvas contents changed and need repainting.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Index of the box held by the current drag or resize, if any.
    pub fn selected(&self) -> Option<usize> {
        match self.session {
            Session::Dragging { index, .. } | Session::Resizing { index } => Some(index),
            _ => None,
        }
    }

    /// The uncommitted box of a draw gesture.
    pub fn pending(&self) -> Option<&BoundingBox> {
        match &self.session {
            Session::Drawing { pending } => Some(pending),
            _ => None,
        }
    }

    fn request_redraw(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }

    /// Replace every box with `boxes`. Any gesture in progress is dropped.
    pub fn load_boxes(&mut self, boxes: Vec<BoundingBox>) {
        log::debug!("loading {} boxes", boxes.len());
        self.boxes = boxes;
        self.session = Session::Idle;
        self.request_redraw();
    }

    pub fn on_pointer_down(&mut self, x: f32, y: f32, labels: &dyn LabelSource) {
        self.session = match hit_test(&self.boxes, x, y) {
            Some(index) if is_near_edge(x, y, &self.boxes[index]) => {
                log::debug!("resize box {index} from ({x:.1}, {y:.1})");
                Session::Resizing { index }
            }
            Some(index) => {
                log::debug!("drag box {index} from ({x:.1}, {y:.1})");
                Session::Dragging {
                    index,
                    last: egui::pos2(x, y),
                }
            }
            None => {
                let label = labels.current_label();
                log::debug!("draw new '{label}' box from ({x:.1}, {y:.1})");
                Session::Drawing {
                    pending: BoundingBox::degenerate(x, y, label),
                }
            }
        };
    }

    pub fn on_pointer_move(&mut self, x: f32, y: f32) {
        match &mut self.session {
            Session::Idle => return,
            Session::Dragging { index, last } => {
                let (dx, dy) = (x - last.x, y - last.y);
                if let Some(b) = self.boxes.get_mut(*index) {
                    translate(b, dx, dy);
                }
                *last = egui::pos2(x, y);
            }
            Session::Resizing { index } => {
                if let Some(b) = self.boxes.get_mut(*index) {
                    set_second_corner(b, x, y);
                }
            }
            Session::Drawing { pending } => set_second_corner(pending, x, y),
        }
        self.request_redraw();
    }

    pub fn on_pointer_up(&mut self) {
        match std::mem::replace(&mut self.session, Session::Idle) {
            Session::Drawing { pending } => {
                log::debug!(
                    "committed '{}' box ({:.1}, {:.1}, {:.1}, {:.1})",
                    pending.label,
                    pending.x0,
                    pending.y0,
                    pending.x1,
                    pending.y1
                );
                self.boxes.push(pending);
            }
            Session::Dragging { .. } | Session::Resizing { .. } | Session::Idle => {}
        }
    }

    /// React to the label selector switching to `value`. A concrete label is
    /// applied to the selected box, if there is one.
    pub fn on_label_control_change(&mut self, labels: &mut LabelControl, value: &str) {
        let Some(label) = labels.select(value) else {
            log::debug!("label selector switched to {CUSTOM_LABEL}");
            return;
        };
        let label = label.to_string();
        if let Some(index) = self.selected() {
            if let Some(b) = self.boxes.get_mut(index) {
                log::debug!("relabel box {index} to '{label}'");
                b.label = label;
                self.request_redraw();
            }
        }
    }

    /// Draw the committed boxes, then the box being drawn if any.
    pub fn render(&self, surface: &mut dyn Surface) {
        surface.clear();
        for b in self.boxes.iter().chain(self.pending()) {
            draw_box(surface, b);
        }
    }
}

fn draw_box(surface: &mut dyn Surface, b: &BoundingBox) {
    let rect = egui::Rect::from_two_pos(egui::pos2(b.x0, b.y0), egui::pos2(b.x1, b.y1));
    surface.stroke_rect(rect, egui::Stroke::new(BOX_STROKE_WIDTH, BOX_COLOR));
    surface.text(
        egui::pos2(b.x0, b.y0 - LABEL_OFFSET),
        &b.label,
        LABEL_SIZE,
        LABEL_COLOR,
    );
}
