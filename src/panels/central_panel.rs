use crate::SketchpadApp;

pub fn central_panel(app: &mut SketchpadApp, ctx: &egui::Context) {
    egui::CentralPanel::default().show(ctx, |ui| {
        if let Some(error) = app.canvas_error() {
            ui.colored_label(egui::Color32::RED, format!("Drawing is unavailable: {error}"));
            return;
        }

        // Create a painting area that fills the remaining space
        let available_size = ui.available_size();
        let (response, painter) = ui.allocate_painter(available_size, egui::Sense::drag());

        app.canvas_frame(ctx, &painter, response.rect);
    });
}
