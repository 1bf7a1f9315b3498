use egui::{Color32, Context, RichText, TextEdit};

use crate::ui::{UiComponent, UiContext};

/// Editable view of the accumulated lines
#[derive(Default)]
pub struct LinesPanel;

impl UiComponent for LinesPanel {
    fn show(&mut self, ctx: &Context, ui_ctx: &mut UiContext<'_>) {
        let scroll_id = ui_ctx.id("lines_scroll");
        let hovering_file = ctx.input(|i| !i.raw.hovered_files.is_empty());
        let buffer = &mut ui_ctx.session.buffer;

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("Current lines");
                ui.label(
                    RichText::new(format!("{} lines (Prompts from file or textbox)", buffer.len()))
                        .small()
                        .color(Color32::GRAY),
                );
            });

            if hovering_file {
                ui.label(
                    RichText::new("Drop a .txt file to replace the lines")
                        .color(Color32::LIGHT_BLUE),
                );
            }

            ui.separator();

            egui::ScrollArea::vertical().id_salt(scroll_id).show(ui, |ui| {
                ui.add(
                    TextEdit::multiline(buffer.text_mut())
                        .code_editor()
                        .desired_rows(24)
                        .desired_width(f32::INFINITY),
                );
            });
        });
    }
}
