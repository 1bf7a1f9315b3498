mod files_panel;
mod lines_panel;
mod params_panel;
mod top_panel;

pub use files_panel::FilesPanel;
pub use lines_panel::LinesPanel;
pub use params_panel::ParamsPanel;
pub use top_panel::TopPanel;

use std::path::PathBuf;
use std::sync::Arc;
use std::sync::mpsc::{Receiver, Sender, channel};

use egui::Context;
use plb_core::SavedFile;

use crate::session::{Tab, TabSession};
use crate::state::{AppState, Choices};

#[derive(Debug, Clone)]
pub enum UiEvent {
    SelectTab(Tab),

    // Lines
    AddLine,
    ClearLines,

    // Files
    Save,
    RefreshFiles,
    LoadFile(String),
    PickUpload,
    UploadPath(PathBuf),
    UploadBytes { name: String, bytes: Arc<[u8]> },
}

/// What a component sees while drawing: the active builder plus the
/// shared choices and file list.
pub struct UiContext<'a> {
    pub tab: Tab,
    pub session: &'a mut TabSession,
    pub choices: &'a Choices,
    pub saved_files: &'a [SavedFile],
    events: &'a Sender<UiEvent>,
}

impl<'a> UiContext<'a> {
    pub fn new(
        tab: Tab,
        session: &'a mut TabSession,
        choices: &'a Choices,
        saved_files: &'a [SavedFile],
        events: &'a Sender<UiEvent>,
    ) -> Self {
        Self {
            tab,
            session,
            choices,
            saved_files,
            events,
        }
    }

    pub fn send_event(&self, event: UiEvent) {
        // The receiver lives in `UiState` next to the sender
        let _ = self.events.send(event);
    }

    /// Widget id salt unique to the active tab
    pub fn id(&self, name: &str) -> String {
        format!("{}_{}", self.tab.id_part(), name)
    }
}

pub struct UiState {
    components: Vec<Box<dyn UiComponent>>,
    events_tx: Sender<UiEvent>,
    events_rx: Receiver<UiEvent>,
}

impl UiState {
    pub fn new() -> Self {
        let (events_tx, events_rx) = channel();

        Self {
            components: Vec::new(),
            events_tx,
            events_rx,
        }
    }

    pub fn add_component(&mut self, component: Box<dyn UiComponent>) {
        self.components.push(component);
    }

    pub fn sender(&self) -> Sender<UiEvent> {
        self.events_tx.clone()
    }

    /// Draw every component against the active builder and return the
    /// events they emitted, in order.
    pub fn draw(&mut self, ctx: &Context, state: &mut AppState) -> Vec<UiEvent> {
        {
            let mut ui_ctx = state.ui_context(&self.events_tx);
            for component in self.components.iter_mut() {
                component.show(ctx, &mut ui_ctx);
            }
        }

        self.events_rx.try_iter().collect()
    }
}

pub trait UiComponent {
    fn show(&mut self, ctx: &Context, ui_ctx: &mut UiContext<'_>);
}
