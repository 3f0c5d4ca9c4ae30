use eframe::egui;

/// Square icon button for pencil/eraser, highlighted when selected
pub struct ToolButton {
    pub icon: &'static str,
    pub tooltip: &'static str,
    pub selected: bool,
}

impl ToolButton {
    pub fn new(icon: &'static str, tooltip: &'static str, selected: bool) -> Self {
        Self {
            icon,
            tooltip,
            selected,
        }
    }

    pub fn show(&self, ui: &mut egui::Ui) -> egui::Response {
        let button_size = egui::vec2(32.0, 32.0);
        let (rect, response) = ui.allocate_exact_size(button_size, egui::Sense::click());

        if ui.is_rect_visible(rect) {
            let bg_color = if self.selected {
                egui::Color32::from_rgb(100, 181, 246) // Light blue when selected
            } else if response.hovered() {
                egui::Color32::from_gray(40)
            } else {
                egui::Color32::from_gray(30)
            };
            ui.painter().rect_filled(rect, 4.0, bg_color);

            let text_color = if self.selected {
                egui::Color32::BLACK
            } else {
                egui::Color32::WHITE
            };
            ui.painter().text(
                rect.center(),
                egui::Align2::CENTER_CENTER,
                self.icon,
                egui::FontId::proportional(20.0),
                text_color,
            );

            if self.selected {
                ui.painter().rect_stroke(
                    rect,
                    4.0,
                    egui::Stroke::new(2.0, egui::Color32::from_rgb(33, 150, 243)),
                );
            }
        }

        response.on_hover_text(self.tooltip)
    }
}

/// Round palette entry; ringed when it is the active colour
pub struct ColorSwatch {
    pub color: egui::Color32,
    pub selected: bool,
}

impl ColorSwatch {
    pub fn new(color: egui::Color32, selected: bool) -> Self {
        Self { color, selected }
    }

    pub fn show(&self, ui: &mut egui::Ui) -> egui::Response {
        let (rect, response) = ui.allocate_exact_size(egui::vec2(28.0, 28.0), egui::Sense::click());

        if ui.is_rect_visible(rect) {
            let radius = rect.width() / 2.0 - 2.0;
            ui.painter().circle_filled(rect.center(), radius, self.color);
            if self.selected {
                ui.painter().circle_stroke(
                    rect.center(),
                    radius + 1.5,
                    egui::Stroke::new(2.0, egui::Color32::BLACK),
                );
            } else if response.hovered() {
                ui.painter().circle_stroke(
                    rect.center(),
                    radius + 1.0,
                    egui::Stroke::new(1.0, egui::Color32::GRAY),
                );
            }
        }

        response
    }
}
