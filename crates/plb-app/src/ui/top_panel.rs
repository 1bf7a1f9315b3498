use egui::{Color32, Context, RichText};

use crate::session::Tab;
use crate::ui::{UiComponent, UiContext, UiEvent};

#[derive(Default)]
pub struct TopPanel;

impl UiComponent for TopPanel {
    fn show(&mut self, ctx: &Context, ui_ctx: &mut UiContext<'_>) {
        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("Prompt Line Builder");
                ui.separator();

                let mut selected = ui_ctx.tab;
                for tab in Tab::all() {
                    ui.selectable_value(&mut selected, tab, tab.label());
                }
                if selected != ui_ctx.tab {
                    ui_ctx.send_event(UiEvent::SelectTab(selected));
                }

                ui.separator();
                ui.label(
                    RichText::new(ui_ctx.session.status())
                        .small()
                        .color(Color32::LIGHT_BLUE),
                );
            });
        });
    }
}
