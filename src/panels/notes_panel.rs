use crate::SketchpadApp;
use crate::notes::NotePatch;

pub fn notes_panel(app: &mut SketchpadApp, ctx: &egui::Context) {
    egui::SidePanel::right("notes_panel")
        .resizable(true)
        .default_width(280.0)
        .show(ctx, |ui| {
            let (notepad, draft) = app.notes_parts();
            ui.heading("Notepad");

            if let Some(notice) = notepad.notice().map(str::to_owned) {
                ui.horizontal(|ui| {
                    ui.colored_label(egui::Color32::RED, notice);
                    if ui.small_button("✖").clicked() {
                        notepad.dismiss_notice();
                    }
                });
            }

            ui.horizontal(|ui| {
                let mut term = notepad.search_term().to_owned();
                let search = ui.add(egui::TextEdit::singleline(&mut term).hint_text("Search notes"));
                if search.changed() {
                    notepad.search(&term);
                }
                if ui.button("➕ New").clicked() {
                    notepad.add_note();
                }
            });
            ui.separator();

            let entries: Vec<(uuid::Uuid, String)> = notepad
                .notes()
                .iter()
                .map(|note| (note.id, note.title.clone()))
                .collect();
            egui::ScrollArea::vertical()
                .max_height(160.0)
                .show(ui, |ui| {
                    for (id, title) in entries {
                        let selected = notepad.active_id() == Some(id);
                        if ui.selectable_label(selected, title).clicked() {
                            notepad.select(id);
                        }
                    }
                });
            ui.separator();

            let Some(active) = notepad.active_note().cloned() else {
                ui.weak("No note selected");
                return;
            };
            if draft.note_id != Some(active.id) {
                draft.note_id = Some(active.id);
                draft.title = active.title.clone();
                draft.content = active.content.clone();
            }

            ui.text_edit_singleline(&mut draft.title);
            ui.add(
                egui::TextEdit::multiline(&mut draft.content)
                    .desired_rows(12)
                    .desired_width(f32::INFINITY),
            );

            ui.horizontal(|ui| {
                let dirty = draft.title != active.title || draft.content != active.content;
                if ui.add_enabled(dirty, egui::Button::new("💾 Save")).clicked() {
                    let patch = NotePatch {
                        title: (draft.title != active.title).then(|| draft.title.clone()),
                        content: (draft.content != active.content).then(|| draft.content.clone()),
                    };
                    notepad.update(active.id, patch);
                }
                if ui.button("🗑 Delete").clicked() && notepad.delete(active.id) {
                    draft.note_id = None;
                }
            });
        });
}
