use eframe::egui;
use log::{error, info, warn};

use crate::config::{
    DEFAULT_WINDOW_HEIGHT, DEFAULT_WINDOW_WIDTH, FINAL_STROKE_RGB, PREVIEW_STROKE_RGB,
    STATUS_BAR_HEIGHT, STROKE_WIDTH,
};
use crate::model::{Point, Rect};
use crate::session::{Command, Outcome, Session};

const KEY_BINDINGS: [(egui::Key, Command); 5] = [
    (egui::Key::ArrowLeft, Command::Previous),
    (egui::Key::ArrowRight, Command::Next),
    (egui::Key::D, Command::RemoveLast),
    (egui::Key::S, Command::Save),
    (egui::Key::Q, Command::Quit),
];

fn rgb(c: [u8; 3]) -> egui::Color32 {
    egui::Color32::from_rgb(c[0], c[1], c[2])
}

// ── App ─────────────────────────────────────────────────────────────────────

pub struct AnnotateApp {
    session: Session,

    texture: Option<egui::TextureHandle>,
    image_size: egui::Vec2,
    // index the texture (or decode error) belongs to
    shown: Option<usize>,
    decode_error: Option<String>,

    status: String,
}

impl AnnotateApp {
    pub fn new(session: Session) -> Self {
        Self {
            session,
            texture: None,
            image_size: egui::Vec2::ZERO,
            shown: None,
            decode_error: None,
            status: String::new(),
        }
    }

    fn replace_session(&mut self, session: Session) {
        *self = Self::new(session);
    }

    /// Image pixel -> screen. The image is painted unscaled at the canvas origin.
    fn image_to_screen(canvas_rect: egui::Rect, p: Point) -> egui::Pos2 {
        canvas_rect.min + egui::vec2(p.x as f32, p.y as f32)
    }

    fn screen_to_image(canvas_rect: egui::Rect, pos: egui::Pos2) -> Point {
        let rel = pos - canvas_rect.min;
        Point::new(rel.x.round() as i32, rel.y.round() as i32)
    }

    fn rect_on_screen(canvas_rect: egui::Rect, r: &Rect) -> egui::Rect {
        egui::Rect::from_min_max(
            Self::image_to_screen(canvas_rect, r.min()),
            Self::image_to_screen(canvas_rect, r.max()),
        )
    }

    fn ensure_texture(&mut self, ctx: &egui::Context) {
        let index = self.session.current_index();
        if index == self.shown {
            return;
        }
        self.shown = index;
        self.texture = None;
        self.decode_error = None;

        let Some(entry) = self.session.current() else {
            return;
        };
        match image::open(&entry.path) {
            Ok(img) => {
                let rgba = img.to_rgba8();
                let size = [rgba.width() as usize, rgba.height() as usize];
                let pixels = rgba.as_flat_samples();
                let color_image = egui::ColorImage::from_rgba_unmultiplied(size, pixels.as_slice());
                self.texture = Some(ctx.load_texture(
                    entry.id.as_str(),
                    color_image,
                    egui::TextureOptions::LINEAR,
                ));
                self.image_size = egui::vec2(size[0] as f32, size[1] as f32);
                ctx.send_viewport_cmd(egui::ViewportCommand::InnerSize(egui::vec2(
                    self.image_size.x,
                    self.image_size.y + STATUS_BAR_HEIGHT,
                )));
            }
            Err(e) => {
                let msg = format!("Could not decode {}: {e}", entry.path.display());
                warn!("{msg}");
                self.decode_error = Some(msg);
                self.image_size = egui::Vec2::ZERO;
                ctx.send_viewport_cmd(egui::ViewportCommand::InnerSize(egui::vec2(
                    DEFAULT_WINDOW_WIDTH,
                    DEFAULT_WINDOW_HEIGHT,
                )));
            }
        }
    }

    fn run(&mut self, ctx: &egui::Context, command: Command) {
        match self.session.handle(command) {
            Ok(Outcome::Quit) => {
                info!("Quitting");
                ctx.send_viewport_cmd(egui::ViewportCommand::Close);
            }
            Ok(Outcome::Saved) => {
                self.status = format!("Saved to {}", self.session.store().dir().display());
            }
            Ok(Outcome::NothingToSave) => {
                self.status = "No images loaded, nothing saved".to_owned();
            }
            Ok(Outcome::Changed) | Ok(Outcome::Unchanged) => {}
            Err(e) => {
                error!("{e}");
                self.status = format!("Save failed: {e}");
            }
        }
    }

    fn draw_annotations(&self, painter: &egui::Painter, canvas_rect: egui::Rect) {
        let stroke = egui::Stroke::new(STROKE_WIDTH, rgb(FINAL_STROKE_RGB));
        for r in self.session.current_rects() {
            painter.rect_stroke(
                Self::rect_on_screen(canvas_rect, r),
                0.0,
                stroke,
                egui::StrokeKind::Middle,
            );
        }

        if let Some(r) = self.session.preview() {
            painter.rect_stroke(
                Self::rect_on_screen(canvas_rect, &r),
                0.0,
                egui::Stroke::new(STROKE_WIDTH, rgb(PREVIEW_STROKE_RGB)),
                egui::StrokeKind::Middle,
            );
        }
    }

    fn handle_pointer(&mut self, ctx: &egui::Context, response: &egui::Response) {
        let canvas_rect = response.rect;
        let (pressed, released, origin, latest) = ctx.input(|i| {
            (
                i.pointer.primary_pressed(),
                i.pointer.primary_released(),
                i.pointer.press_origin(),
                i.pointer.latest_pos(),
            )
        });

        if pressed && response.contains_pointer() {
            if let Some(pos) = origin.or(latest) {
                self.session.press(Self::screen_to_image(canvas_rect, pos));
            }
        }

        if !self.session.is_dragging() {
            return;
        }
        match (latest, released) {
            (Some(pos), true) => {
                self.session.release(Self::screen_to_image(canvas_rect, pos));
            }
            (None, true) => {
                self.session.release_at_last();
            }
            (Some(pos), false) => {
                self.session.drag_to(Self::screen_to_image(canvas_rect, pos));
            }
            (None, false) => {}
        }
    }

    fn show_empty(&mut self, ui: &mut egui::Ui) {
        let dir = self.session.store().dir().to_path_buf();
        ui.vertical_centered(|ui| {
            ui.add_space(ui.available_height() / 3.0);
            ui.heading("No data");
            ui.label(format!("No png/jpg/jpeg images found in {}", dir.display()));
            ui.add_space(8.0);
            if ui.button("Open folder…").clicked() {
                if let Some(picked) = rfd::FileDialog::new().set_directory(&dir).pick_folder() {
                    match Session::open(&picked) {
                        Ok(session) => {
                            info!("Opened {} ({} images)", picked.display(), session.len());
                            self.replace_session(session);
                        }
                        Err(e) => {
                            error!("{e}");
                            self.status = e.to_string();
                        }
                    }
                }
            }
        });
    }

    fn status_line(&self) -> String {
        let Some(entry) = self.session.current() else {
            return "No images".to_owned();
        };
        let index = self.session.current_index().unwrap_or(0);
        let total: usize = self.session.store().labels().values().map(Vec::len).sum();
        format!(
            "{} ({}/{}) - {} boxes, {} in total",
            entry.id,
            index + 1,
            self.session.len(),
            self.session.current_rects().len(),
            total
        )
    }
}

// ── eframe App impl ────────────────────────────────────────────────────────

impl eframe::App for AnnotateApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.ensure_texture(ctx);

        let commands: Vec<Command> = ctx.input(|i| {
            KEY_BINDINGS
                .iter()
                .filter(|(key, _)| i.key_pressed(*key))
                .map(|(_, command)| *command)
                .collect()
        });
        for command in commands {
            self.run(ctx, command);
        }
        // navigation may have switched images
        self.ensure_texture(ctx);

        egui::TopBottomPanel::bottom("status")
            .exact_height(STATUS_BAR_HEIGHT)
            .show(ctx, |ui| {
                ui.horizontal_centered(|ui| {
                    ui.label(self.status_line());
                    if !self.status.is_empty() {
                        ui.separator();
                        ui.label(&self.status);
                    }
                });
            });

        egui::CentralPanel::default()
            .frame(egui::Frame::default())
            .show(ctx, |ui| {
                if self.session.is_empty() {
                    self.show_empty(ui);
                    return;
                }

                let (response, painter) =
                    ui.allocate_painter(ui.available_size(), egui::Sense::drag());
                let canvas_rect = response.rect;

                painter.rect_filled(canvas_rect, 0.0, egui::Color32::from_gray(40));

                if let Some(ref tex) = self.texture {
                    painter.image(
                        tex.id(),
                        egui::Rect::from_min_size(canvas_rect.min, self.image_size),
                        egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
                        egui::Color32::WHITE,
                    );
                } else if let Some(ref msg) = self.decode_error {
                    painter.text(
                        canvas_rect.center(),
                        egui::Align2::CENTER_CENTER,
                        msg,
                        egui::FontId::proportional(16.0),
                        egui::Color32::LIGHT_RED,
                    );
                }

                self.handle_pointer(ctx, &response);
                self.draw_annotations(&painter, canvas_rect);
            });
    }
}
