use chrono::Local;
use egui::{Color32, Context, RichText, TextEdit};
use plb_core::SavedFile;

use crate::ui::{UiComponent, UiContext, UiEvent};

/// Save name, saved file list and upload
#[derive(Default)]
pub struct FilesPanel;

impl UiComponent for FilesPanel {
    fn show(&mut self, ctx: &Context, ui_ctx: &mut UiContext<'_>) {
        let scroll_id = ui_ctx.id("files_scroll");
        let saved_files = ui_ctx.saved_files;
        let session = &mut *ui_ctx.session;
        let mut emitted = Vec::new();

        egui::SidePanel::right("files_panel")
            .resizable(true)
            .default_width(280.0)
            .show(ctx, |ui| {
                ui.label("File name (.txt)");
                ui.add(TextEdit::singleline(&mut session.save_name).desired_width(f32::INFINITY));

                if ui.button("Save as .txt").clicked() {
                    emitted.push(UiEvent::Save);
                }

                ui.separator();

                ui.horizontal(|ui| {
                    ui.strong("Saved lists");
                    if ui.small_button("Refresh").clicked() {
                        emitted.push(UiEvent::RefreshFiles);
                    }
                });

                egui::ScrollArea::vertical()
                    .id_salt(scroll_id)
                    .max_height(320.0)
                    .show(ui, |ui| {
                        if saved_files.is_empty() {
                            ui.label(RichText::new("No saved lists yet").small().color(Color32::GRAY));
                        }

                        for file in saved_files {
                            let response = ui
                                .selectable_value(
                                    &mut session.selected_file,
                                    Some(file.name.clone()),
                                    file.name.as_str(),
                                )
                                .on_hover_text(describe(file));

                            if response.double_clicked() {
                                emitted.push(UiEvent::LoadFile(file.name.clone()));
                            }
                        }
                    });

                ui.horizontal(|ui| {
                    let load = ui.add_enabled(session.selected_file.is_some(), egui::Button::new("Load"));
                    if load.clicked() {
                        if let Some(name) = &session.selected_file {
                            emitted.push(UiEvent::LoadFile(name.clone()));
                        }
                    }

                    if ui.button("Upload…").clicked() {
                        emitted.push(UiEvent::PickUpload);
                    }
                });

                ui.label(
                    RichText::new("Loading or uploading replaces the current lines")
                        .small()
                        .color(Color32::GRAY),
                );
            });

        for event in emitted {
            ui_ctx.send_event(event);
        }
    }
}

fn describe(file: &SavedFile) -> String {
    match file.modified {
        Some(modified) => format!(
            "{} bytes, modified {}",
            file.size,
            modified.with_timezone(&Local).format("%Y-%m-%d %H:%M")
        ),
        None => format!("{} bytes", file.size),
    }
}
