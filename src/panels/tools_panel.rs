use crate::SketchpadApp;
use crate::color::{self, PALETTE};
use crate::command::Command;
use crate::components::{ColorSwatch, ToolButton};
use crate::config::{MAX_BRUSH_WIDTH, MIN_BRUSH_WIDTH};

pub fn tools_panel(app: &mut SketchpadApp, ctx: &egui::Context) {
    egui::TopBottomPanel::top("tools_panel").show(ctx, |ui| {
        let mut commands = Vec::new();
        let brush = app.brush();

        ui.horizontal_wrapped(|ui| {
            for color in PALETTE {
                let selected = brush.color() == color && !brush.is_eraser();
                let swatch = ColorSwatch::new(color, selected).show(ui);
                if swatch.on_hover_text(color::to_hex(color)).clicked() {
                    app.update_brush(|brush| brush.set_color(color));
                }
            }
            let entry = egui::TextEdit::singleline(app.color_entry_mut())
                .hint_text("#RRGGBB")
                .desired_width(64.0);
            let response = ui.add(entry).on_hover_text("Custom colour: hex or name");
            if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                app.apply_color_entry();
            }
            ui.separator();

            if ToolButton::new("✏", "Pencil", !brush.is_eraser()).show(ui).clicked() {
                app.update_brush(|brush| brush.set_eraser(false));
            }
            if ToolButton::new("⌫", "Eraser", brush.is_eraser()).show(ui).clicked() {
                app.update_brush(|brush| brush.set_eraser(true));
            }
            ui.separator();

            ui.label("Size:");
            let mut width = brush.width();
            let slider = egui::Slider::new(&mut width, MIN_BRUSH_WIDTH..=MAX_BRUSH_WIDTH).step_by(1.0);
            if ui.add(slider).changed() {
                app.update_brush(|brush| brush.set_width(width));
            }
            ui.separator();

            let flags = app.history_flags();
            if ui.add_enabled(flags.can_undo, egui::Button::new("⟲ Undo")).clicked() {
                commands.push(Command::Undo);
            }
            if ui.add_enabled(flags.can_redo, egui::Button::new("⟳ Redo")).clicked() {
                commands.push(Command::Redo);
            }
            if ui.button("🗑 Clear").clicked() {
                commands.push(Command::Clear);
            }
            ui.separator();

            if ui.button("💾 Save").clicked() {
                app.save_drawing();
            }
            let mut show_notes = app.show_notes();
            if ui.toggle_value(&mut show_notes, "🗒 Notepad").changed() {
                app.set_show_notes(show_notes);
            }

            if let Some(status) = app.status() {
                ui.weak(status);
            }
        });

        for command in commands {
            log::info!("Toolbar command: {}", command.label());
            app.execute_command(command);
        }
    });
}
