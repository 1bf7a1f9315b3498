use eframe::egui;
use tracing::warn;

use crate::config::AppConfig;
use crate::state::AppState;
use crate::ui::{self, UiEvent, UiState};

pub struct App {
    state: AppState,
    ui: UiState,
}

impl App {
    pub fn new(config: &AppConfig) -> Self {
        let state = AppState::new(config);

        let mut ui = UiState::new();
        // Central panel goes last so the side panels claim their space first
        ui.add_component(Box::new(ui::TopPanel));
        ui.add_component(Box::new(ui::ParamsPanel));
        ui.add_component(Box::new(ui::FilesPanel));
        ui.add_component(Box::new(ui::LinesPanel));

        Self { state, ui }
    }

    /// Files dropped on the window replace the active buffer
    fn collect_dropped_files(&self, ctx: &egui::Context) {
        let dropped = ctx.input(|i| i.raw.dropped_files.clone());
        let Some(file) = dropped.into_iter().next() else {
            return;
        };

        let event = match (file.bytes, file.path) {
            (Some(bytes), _) => UiEvent::UploadBytes {
                name: file.name,
                bytes,
            },
            (None, Some(path)) => UiEvent::UploadPath(path),
            (None, None) => {
                warn!("Dropped file {:?} has neither content nor path", file.name);
                return;
            }
        };

        let _ = self.ui.sender().send(event);
    }
}

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.collect_dropped_files(ctx);

        for event in self.ui.draw(ctx, &mut self.state) {
            self.state.on_ui_event(event);
        }
    }
}
