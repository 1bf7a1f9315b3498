use std::fs;
use std::sync::mpsc::Sender;

use plb_core::{ChoiceList, LineStore, SavedFile};
use tracing::{debug, error, info, warn};

use crate::config::AppConfig;
use crate::error::AppError;
use crate::session::{Sessions, Tab, TabSession};
use crate::ui::{UiContext, UiEvent};

/// Dropdown options fed from the host registries
#[derive(Debug, Clone, Default)]
pub struct Choices {
    pub sd_models: ChoiceList,
    pub samplers: ChoiceList,
    pub styles: ChoiceList,
}

impl Choices {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            sd_models: ChoiceList::new(&config.sd_models),
            samplers: ChoiceList::new(&config.samplers),
            styles: ChoiceList::styles(
                config
                    .styles
                    .iter()
                    .map(|(name, path)| (name.as_str(), path.as_deref())),
            ),
        }
    }
}

pub struct AppState {
    store: LineStore,
    pub sessions: Sessions,
    pub active_tab: Tab,
    pub choices: Choices,
    pub saved_files: Vec<SavedFile>,
}

impl AppState {
    pub fn new(config: &AppConfig) -> Self {
        let mut state = Self {
            store: LineStore::new(&config.lists_dir),
            sessions: Sessions::default(),
            active_tab: Tab::Txt2Img,
            choices: Choices::from_config(config),
            saved_files: Vec::new(),
        };

        state.register_active_tab();

        if let Err(e) = state.refresh_files() {
            error!("Failed to list saved line lists: {e}");
            state.session_mut().set_status(e.to_string());
        }

        state
    }

    pub fn session(&self) -> Option<&TabSession> {
        self.sessions.get(self.active_tab)
    }

    pub fn session_mut(&mut self) -> &mut TabSession {
        self.sessions.get_mut(self.active_tab)
    }

    fn register_active_tab(&mut self) {
        if self.sessions.register(self.active_tab) {
            info!("Created line builder for {}", self.active_tab.id_part());
        }
    }

    pub fn ui_context<'a>(&'a mut self, events: &'a Sender<UiEvent>) -> UiContext<'a> {
        self.register_active_tab();

        UiContext::new(
            self.active_tab,
            self.sessions.get_mut(self.active_tab),
            &self.choices,
            &self.saved_files,
            events,
        )
    }

    /// Apply one UI event. Failures end up on the status line of the
    /// active builder.
    pub fn on_ui_event(&mut self, event: UiEvent) {
        if let Err(e) = self.apply(event) {
            error!("{e}");
            self.session_mut().set_status(e.to_string());
        }
    }

    fn apply(&mut self, event: UiEvent) -> Result<(), AppError> {
        match event {
            UiEvent::SelectTab(tab) => {
                self.active_tab = tab;
                self.register_active_tab();
            }
            UiEvent::AddLine => {
                let session = self.session_mut();
                if !session.add_line() {
                    debug!("Form is empty, nothing added");
                }
            }
            UiEvent::ClearLines => {
                self.session_mut().buffer.clear();
            }
            UiEvent::Save => {
                let session = self.sessions.get_mut(self.active_tab);
                let outcome = self.store.save(session.buffer.as_str(), &session.save_name)?;

                session.save_name = outcome.name.clone();
                session.selected_file = Some(outcome.name);
                session.set_status(outcome.message);

                // The save already happened; keep its status line
                if let Err(e) = self.refresh_files() {
                    warn!("Failed to refresh saved line lists: {e}");
                }
            }
            UiEvent::RefreshFiles => {
                self.refresh_files()?;
            }
            UiEvent::LoadFile(name) => {
                // A missing file leaves the buffer untouched
                if let Some(file) = self.store.load(&name) {
                    let session = self.session_mut();
                    session.buffer.replace(file.content);
                    session.set_status(format!("Loaded {}", file.name));
                    session.save_name = file.name.clone();
                    session.selected_file = Some(file.name);
                }
            }
            UiEvent::PickUpload => {
                let picked = rfd::FileDialog::new()
                    .add_filter("Text", &["txt"])
                    .set_directory(self.store.dir())
                    .pick_file();

                if let Some(path) = picked {
                    return self.apply(UiEvent::UploadPath(path));
                }
            }
            UiEvent::UploadPath(path) => {
                let bytes = fs::read(&path).map_err(|source| AppError::Upload {
                    path: path.clone(),
                    source,
                })?;
                let name = path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| path.display().to_string());

                self.replace_with_upload(&name, &bytes);
            }
            UiEvent::UploadBytes { name, bytes } => {
                self.replace_with_upload(&name, &bytes);
            }
        }

        Ok(())
    }

    fn replace_with_upload(&mut self, name: &str, bytes: &[u8]) {
        let content = LineStore::load_from_upload(bytes);
        info!("Uploaded {name} ({} bytes)", bytes.len());

        let session = self.session_mut();
        session.buffer.replace(content);
        session.set_status(format!("Uploaded {name}"));
    }

    fn refresh_files(&mut self) -> Result<(), AppError> {
        self.saved_files = self.store.entries()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use plb_core::ParamName;
    use plb_core::store::DEFAULT_FILE_NAME;
    use std::sync::Arc;
    use tempfile::TempDir;

    fn state() -> (TempDir, AppState) {
        let tmp = TempDir::new().unwrap();
        let config = AppConfig {
            lists_dir: tmp.path().join("prompt_lists"),
            sd_models: vec!["v1-5.safetensors".into()],
            samplers: vec!["Euler a".into()],
            styles: vec![
                ("cinematic".into(), Some("styles.csv".into())),
                ("scratch".into(), Some("do_not_save".into())),
            ],
        };
        let state = AppState::new(&config);
        (tmp, state)
    }

    fn buffer(state: &AppState) -> &str {
        state.session().unwrap().buffer.as_str()
    }

    #[test]
    fn test_new_registers_active_tab() {
        let (_tmp, state) = state();
        assert!(state.sessions.is_registered(Tab::Txt2Img));
        assert!(!state.sessions.is_registered(Tab::Img2Img));
        assert!(state.saved_files.is_empty());
        assert!(state.store.dir().is_dir());
    }

    #[test]
    fn test_choices_from_config() {
        let (_tmp, state) = state();
        assert_eq!(state.choices.sd_models.len(), 2);
        assert!(state.choices.samplers.contains("Euler a"));
        assert!(state.choices.styles.contains("cinematic"));
        assert!(!state.choices.styles.contains("scratch"));
    }

    #[test]
    fn test_add_and_clear_lines() {
        let (_tmp, mut state) = state();
        *state.session_mut().form.input_mut(ParamName::Prompt) = "a cat".into();
        *state.session_mut().form.input_mut(ParamName::Steps) = "20".into();
        *state.session_mut().form.flag_mut(ParamName::RestoreFaces) = true;

        state.on_ui_event(UiEvent::AddLine);
        assert_eq!(buffer(&state), r#"--prompt "a cat" --steps 20 --restore_faces true"#);

        state.on_ui_event(UiEvent::AddLine);
        assert_eq!(state.session().unwrap().buffer.len(), 2);

        state.on_ui_event(UiEvent::ClearLines);
        assert_eq!(buffer(&state), "");
    }

    #[test]
    fn test_tabs_keep_their_own_buffer() {
        let (_tmp, mut state) = state();
        *state.session_mut().form.input_mut(ParamName::Prompt) = "txt".into();
        state.on_ui_event(UiEvent::AddLine);

        state.on_ui_event(UiEvent::SelectTab(Tab::Img2Img));
        assert!(state.sessions.is_registered(Tab::Img2Img));
        assert_eq!(buffer(&state), "");

        state.on_ui_event(UiEvent::SelectTab(Tab::Txt2Img));
        assert_eq!(buffer(&state), r#"--prompt "txt""#);
    }

    #[test]
    fn test_save_and_load() {
        let (_tmp, mut state) = state();
        state.session_mut().buffer.replace("line1\nline2");
        state.session_mut().save_name = "  ".into();

        state.on_ui_event(UiEvent::Save);
        let session = state.session().unwrap();
        assert_eq!(session.save_name, DEFAULT_FILE_NAME);
        assert!(session.status().contains("Saved: "));
        assert_eq!(state.saved_files.len(), 1);
        assert_eq!(state.saved_files[0].name, DEFAULT_FILE_NAME);

        state.on_ui_event(UiEvent::ClearLines);
        state.on_ui_event(UiEvent::LoadFile(DEFAULT_FILE_NAME.into()));
        assert_eq!(buffer(&state), "line1\nline2");
    }

    #[test]
    fn test_load_missing_keeps_buffer() {
        let (_tmp, mut state) = state();
        state.session_mut().buffer.replace("keep me");

        state.on_ui_event(UiEvent::LoadFile("nonexistent.txt".into()));
        assert_eq!(buffer(&state), "keep me");
        assert!(state.saved_files.is_empty());
    }

    #[test]
    fn test_save_invalid_name_reports_status() {
        let (_tmp, mut state) = state();
        state.session_mut().save_name = "../outside.txt".into();

        state.on_ui_event(UiEvent::Save);
        assert!(state.session().unwrap().status().contains("Invalid file name"));
        assert!(state.saved_files.is_empty());
    }

    #[test]
    fn test_upload_bytes_replaces_buffer() {
        let (_tmp, mut state) = state();
        state.session_mut().buffer.replace("old");

        state.on_ui_event(UiEvent::UploadBytes {
            name: "dropped.txt".into(),
            bytes: Arc::from(&b"--steps 20\n--steps \xff"[..]),
        });
        assert_eq!(buffer(&state), "--steps 20\n--steps \u{fffd}");
    }

    #[test]
    fn test_upload_path() {
        let (tmp, mut state) = state();
        let path = tmp.path().join("external.txt");
        fs::write(&path, "--tiling true").unwrap();

        state.on_ui_event(UiEvent::UploadPath(path));
        assert_eq!(buffer(&state), "--tiling true");
        assert!(state.session().unwrap().status().contains("Uploaded external.txt"));
    }

    #[test]
    fn test_upload_missing_path_reports_status() {
        let (tmp, mut state) = state();
        state.session_mut().buffer.replace("keep me");

        state.on_ui_event(UiEvent::UploadPath(tmp.path().join("gone.txt")));
        assert_eq!(buffer(&state), "keep me");
        assert!(state.session().unwrap().status().contains("Failed to read"));
    }
}
