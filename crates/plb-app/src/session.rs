use std::collections::BTreeMap;

use chrono::Local;
use plb_core::store::DEFAULT_FILE_NAME;
use plb_core::{JobParams, LineBuffer, NOT_SELECTED, ParamKind, ParamName, ParamValue};

/// Generation tab a builder is attached to
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Tab {
    Txt2Img,
    Img2Img,
}

impl Tab {
    /// Prefix used for widget ids of this tab
    pub fn id_part(&self) -> &'static str {
        match self {
            Self::Txt2Img => "txt2img",
            Self::Img2Img => "img2img",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Txt2Img => "Text to image",
            Self::Img2Img => "Image to image",
        }
    }

    pub fn all() -> [Tab; 2] {
        [Self::Txt2Img, Self::Img2Img]
    }
}

/// Raw widget values of the parameter form.
///
/// Numeric inputs are kept as typed text so an empty box stays empty
/// instead of turning into `0`.
#[derive(Debug, Clone, PartialEq)]
pub struct ParamForm {
    inputs: BTreeMap<ParamName, String>,
    flags: BTreeMap<ParamName, bool>,
}

impl Default for ParamForm {
    fn default() -> Self {
        let mut inputs = BTreeMap::new();
        for name in [ParamName::SdModel, ParamName::SamplerName, ParamName::Styles] {
            inputs.insert(name, NOT_SELECTED.to_string());
        }

        Self {
            inputs,
            flags: BTreeMap::new(),
        }
    }
}

impl ParamForm {
    /// Text or numeric input bound to `name`
    pub fn input_mut(&mut self, name: ParamName) -> &mut String {
        self.inputs.entry(name).or_default()
    }

    pub fn input(&self, name: ParamName) -> &str {
        self.inputs.get(&name).map_or("", String::as_str)
    }

    pub fn flag_mut(&mut self, name: ParamName) -> &mut bool {
        self.flags.entry(name).or_default()
    }

    /// False when a numeric input holds something that is not a number
    pub fn is_valid(&self, name: ParamName) -> bool {
        name.kind() != ParamKind::Number || parse_number(self.input(name)).is_ok()
    }

    pub fn invalid_numbers(&self) -> Vec<ParamName> {
        ParamName::all()
            .into_iter()
            .filter(|name| !self.is_valid(*name))
            .collect()
    }

    /// Convert to job parameters. Invalid numbers are left out.
    pub fn to_params(&self) -> JobParams {
        let mut params = JobParams::new();

        for name in ParamName::all() {
            let value = match name.kind() {
                ParamKind::Text => ParamValue::Text(self.input(name).to_string()),
                ParamKind::Number => parse_number(self.input(name)).unwrap_or_default(),
                ParamKind::Flag => ParamValue::Bool(self.flags.get(&name).copied().unwrap_or(false)),
            };
            params.set(name, value);
        }

        params
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

fn parse_number(input: &str) -> Result<ParamValue, ()> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(ParamValue::Absent);
    }

    match input.parse::<f64>() {
        Ok(n) if n.is_finite() => Ok(ParamValue::Number(n)),
        _ => Err(()),
    }
}

/// State of one builder, owned by [`Sessions`].
#[derive(Debug, Clone)]
pub struct TabSession {
    pub form: ParamForm,
    pub buffer: LineBuffer,
    pub save_name: String,
    pub selected_file: Option<String>,
    status: String,
}

impl Default for TabSession {
    fn default() -> Self {
        Self {
            form: ParamForm::default(),
            buffer: LineBuffer::new(),
            save_name: DEFAULT_FILE_NAME.to_string(),
            selected_file: None,
            status: String::new(),
        }
    }
}

impl TabSession {
    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn set_status(&mut self, message: impl AsRef<str>) {
        self.status = format!("[{}] {}", Local::now().format("%H:%M:%S"), message.as_ref());
    }

    /// Serialize the current form and append it to the buffer.
    /// Returns false when the form produced an empty line.
    pub fn add_line(&mut self) -> bool {
        let line = self.form.to_params().to_line();
        if line.is_empty() {
            return false;
        }

        self.buffer.push_line(&line);
        true
    }
}

/// Builders per tab. A builder is created the first time its tab registers
/// and lives as long as the app.
#[derive(Debug, Default)]
pub struct Sessions {
    tabs: BTreeMap<Tab, TabSession>,
}

impl Sessions {
    /// Returns true if this call created the builder for `tab`
    pub fn register(&mut self, tab: Tab) -> bool {
        if self.tabs.contains_key(&tab) {
            return false;
        }

        self.tabs.insert(tab, TabSession::default());
        true
    }

    pub fn is_registered(&self, tab: Tab) -> bool {
        self.tabs.contains_key(&tab)
    }

    pub fn get(&self, tab: Tab) -> Option<&TabSession> {
        self.tabs.get(&tab)
    }

    /// Session for `tab`, registering it on first use
    pub fn get_mut(&mut self, tab: Tab) -> &mut TabSession {
        self.tabs.entry(tab).or_default()
    }
}
