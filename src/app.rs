use std::path::PathBuf;

use crossbeam_channel::{Receiver, TryRecvError};
use eframe::egui;
use image::RgbaImage;

use crate::detect::{spawn_detection, DetectOutcome, Detected, DetectionClient};
use crate::editor::BoxEditor;
use crate::error::{DetectError, GENERIC_FAILURE};
use crate::labels::{LabelControl, CUSTOM_LABEL};
use crate::view::{CanvasView, PainterSurface};

/// Canvas size before any detection result has arrived.
const BLANK_CANVAS: egui::Vec2 = egui::vec2(800.0, 600.0);

pub struct DetectApp {
    client: DetectionClient,
    image_path: Option<PathBuf>,
    in_flight: Option<Receiver<DetectOutcome>>,
    status: String,

    raw_image: Option<RgbaImage>,
    texture: Option<egui::TextureHandle>,

    editor: BoxEditor,
    labels: LabelControl,
    drawn_revision: u64,

    view: CanvasView,
    panning: bool,
}

impl DetectApp {
    pub fn new(client: DetectionClient, labels: Vec<String>, image_path: Option<PathBuf>) -> Self {
        Self {
            client,
            image_path,
            in_flight: None,
            status: String::new(),
            raw_image: None,
            texture: None,
            editor: BoxEditor::new(),
            labels: LabelControl::new(labels),
            drawn_revision: 0,
            view: CanvasView::new(BLANK_CANVAS),
            panning: false,
        }
    }

    fn choose_image(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("Images", &["png", "jpg", "jpeg", "bmp", "webp"])
            .pick_file()
        {
            log::info!("selected {}", path.display());
            self.image_path = Some(path);
        }
    }

    fn upload(&mut self, ctx: &egui::Context) {
        let Some(path) = self.image_path.clone() else {
            self.status = DetectError::NoImageSelected.status_message();
            return;
        };
        self.status = "Detecting…".to_string();
        self.in_flight = Some(spawn_detection(self.client.clone(), path, ctx.clone()));
    }

    fn poll_detection(&mut self) {
        let Some(rx) = &self.in_flight else {
            return;
        };
        let outcome = match rx.try_recv() {
            Ok(outcome) => outcome,
            Err(TryRecvError::Empty) => return,
            Err(TryRecvError::Disconnected) => {
                log::error!("detection worker exited without a result");
                self.in_flight = None;
                self.status = GENERIC_FAILURE.to_string();
                return;
            }
        };
        self.in_flight = None;
        match outcome {
            Ok(detected) => self.apply_detection(detected),
            Err(e) => self.status = e.status_message(),
        }
    }

    fn apply_detection(&mut self, detected: Detected) {
        let Detected { image, boxes } = detected;
        self.view = CanvasView::new(egui::vec2(image.width() as f32, image.height() as f32));
        self.raw_image = Some(image);
        self.texture = None;
        self.editor.load_boxes(boxes);
        self.status = "Detection successful!".to_string();
    }

    fn ensure_texture(&mut self, ctx: &egui::Context) {
        if self.texture.is_some() {
            return;
        }
        if let Some(ref rgba) = self.raw_image {
            let size = [rgba.width() as usize, rgba.height() as usize];
            let pixels = rgba.as_flat_samples();
            let color_image = egui::ColorImage::from_rgba_unmultiplied(size, pixels.as_slice());
            self.texture = Some(ctx.load_texture(
                "annotated",
                color_image,
                egui::TextureOptions::LINEAR,
            ));
        }
    }

    fn label_selector(&mut self, ui: &mut egui::Ui) {
        let options: Vec<String> = self
            .labels
            .presets()
            .iter()
            .cloned()
            .chain(std::iter::once(CUSTOM_LABEL.to_string()))
            .collect();
        let current = self.labels.selected().to_string();
        let mut changed = None;
        egui::ComboBox::from_id_salt("class_label")
            .selected_text(current.as_str())
            .show_ui(ui, |ui| {
                for option in &options {
                    if ui.selectable_label(*option == current, option).clicked()
                        && *option != current
                    {
                        changed = Some(option.clone());
                    }
                }
            });
        if let Some(value) = changed {
            self.editor.on_label_control_change(&mut self.labels, &value);
        }
        if self.labels.custom_visible() {
            ui.add(
                egui::TextEdit::singleline(&mut self.labels.custom_text)
                    .hint_text("custom label")
                    .desired_width(120.0),
            );
        }
    }

    /// Feed primary-button pointer events to the editor in canvas coordinates.
    fn route_pointer(&mut self, ctx: &egui::Context, response: &egui::Response) {
        let area = response.rect;
        let (pressed, released, latest, delta) = ctx.input(|i| {
            (
                i.pointer.primary_pressed(),
                i.pointer.primary_released(),
                i.pointer.latest_pos(),
                i.pointer.delta(),
            )
        });
        let Some(pos) = latest else {
            return;
        };
        let canvas_pos = self.view.screen_to_canvas(area, pos);

        if pressed {
            let on_canvas = self.view.canvas_rect_on_screen(area).contains(pos);
            if response.hovered() && on_canvas {
                self.editor
                    .on_pointer_down(canvas_pos.x, canvas_pos.y, &self.labels);
            }
        } else if delta != egui::Vec2::ZERO {
            self.editor.on_pointer_move(canvas_pos.x, canvas_pos.y);
        }
        if released {
            self.editor.on_pointer_up();
        }
    }
}

// ── eframe App impl ────────────────────────────────────────────────────────

impl eframe::App for DetectApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_detection();
        self.ensure_texture(ctx);

        // Top toolbar
        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if ui.button("Choose image…").clicked() {
                    self.choose_image();
                }
                let name = self
                    .image_path
                    .as_ref()
                    .and_then(|p| p.file_name())
                    .and_then(|n| n.to_str())
                    .unwrap_or("No file chosen");
                ui.label(name);
                if ui
                    .add_enabled(self.in_flight.is_none(), egui::Button::new("Detect"))
                    .clicked()
                {
                    self.upload(ctx);
                }
                ui.separator();
                ui.label("Label:");
                self.label_selector(ui);
                ui.separator();
                ui.label(&self.status);
                ui.separator();
                ui.label(format!("Zoom: {:.0}%", self.view.zoom * 100.0));
            });
        });

        // Canvas
        egui::CentralPanel::default().show(ctx, |ui| {
            let (response, painter) =
                ui.allocate_painter(ui.available_size(), egui::Sense::click_and_drag());
            let area = response.rect;

            // Handle pan (middle mouse button)
            if ctx.input(|i| i.pointer.middle_down()) {
                self.view.pan += ctx.input(|i| i.pointer.delta());
                self.panning = true;
            } else {
                self.panning = false;
            }

            // Handle zoom (scroll wheel)
            let scroll_delta = ctx.input(|i| i.smooth_scroll_delta.y);
            if scroll_delta != 0.0 && response.hovered() {
                if let Some(cursor) = response.hover_pos() {
                    self.view.zoom_at(area, cursor, 1.0 + scroll_delta * 0.002);
                }
            }

            if !self.panning {
                self.route_pointer(ctx, &response);
            }

            painter.rect_filled(area, 0.0, egui::Color32::from_gray(40));
            let canvas_rect = self.view.canvas_rect_on_screen(area);
            match &self.texture {
                Some(tex) => {
                    painter.image(
                        tex.id(),
                        canvas_rect,
                        egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
                        egui::Color32::WHITE,
                    );
                }
                None => {
                    painter.rect_filled(canvas_rect, 0.0, egui::Color32::from_gray(25));
                }
            }

            let mut surface = PainterSurface {
                painter: &painter,
                area,
                view: &self.view,
            };
            self.editor.render(&mut surface);
        });

        if self.editor.revision() != self.drawn_revision {
            self.drawn_revision = self.editor.revision();
            ctx.request_repaint();
        }
    }
}
