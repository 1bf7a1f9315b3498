use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ParamError;

/// Known job parameters, declared in the order they appear on a line.
///
/// The derived `Ord` follows declaration order, so any ordered collection
/// keyed by `ParamName` iterates in line order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParamName {
    Prompt,
    NegativePrompt,
    SdModel,
    OutpathGrids,
    PromptForDisplay,
    Styles,
    Seed,
    SubseedStrength,
    Subseed,
    SeedResizeFromH,
    SeedResizeFromW,
    SamplerIndex,
    SamplerName,
    BatchSize,
    NIter,
    Steps,
    CfgScale,
    Width,
    Height,
    RestoreFaces,
    Tiling,
    DoNotSaveSamples,
    DoNotSaveGrid,
}

impl ParamName {
    /// Flag name as written after `--`
    pub fn name(&self) -> &'static str {
        match self {
            Self::Prompt => "prompt",
            Self::NegativePrompt => "negative_prompt",
            Self::SdModel => "sd_model",
            Self::OutpathGrids => "outpath_grids",
            Self::PromptForDisplay => "prompt_for_display",
            Self::Styles => "styles",
            Self::Seed => "seed",
            Self::SubseedStrength => "subseed_strength",
            Self::Subseed => "subseed",
            Self::SeedResizeFromH => "seed_resize_from_h",
            Self::SeedResizeFromW => "seed_resize_from_w",
            Self::SamplerIndex => "sampler_index",
            Self::SamplerName => "sampler_name",
            Self::BatchSize => "batch_size",
            Self::NIter => "n_iter",
            Self::Steps => "steps",
            Self::CfgScale => "cfg_scale",
            Self::Width => "width",
            Self::Height => "height",
            Self::RestoreFaces => "restore_faces",
            Self::Tiling => "tiling",
            Self::DoNotSaveSamples => "do_not_save_samples",
            Self::DoNotSaveGrid => "do_not_save_grid",
        }
    }

    /// How values of this parameter are rendered
    pub fn kind(&self) -> ParamKind {
        match self {
            Self::Prompt
            | Self::NegativePrompt
            | Self::SdModel
            | Self::OutpathGrids
            | Self::PromptForDisplay
            | Self::Styles
            | Self::SamplerName => ParamKind::Text,

            Self::RestoreFaces | Self::Tiling | Self::DoNotSaveSamples | Self::DoNotSaveGrid => {
                ParamKind::Flag
            }

            _ => ParamKind::Number,
        }
    }

    /// All parameters in line order
    pub fn all() -> [ParamName; 23] {
        [
            Self::Prompt,
            Self::NegativePrompt,
            Self::SdModel,
            Self::OutpathGrids,
            Self::PromptForDisplay,
            Self::Styles,
            Self::Seed,
            Self::SubseedStrength,
            Self::Subseed,
            Self::SeedResizeFromH,
            Self::SeedResizeFromW,
            Self::SamplerIndex,
            Self::SamplerName,
            Self::BatchSize,
            Self::NIter,
            Self::Steps,
            Self::CfgScale,
            Self::Width,
            Self::Height,
            Self::RestoreFaces,
            Self::Tiling,
            Self::DoNotSaveSamples,
            Self::DoNotSaveGrid,
        ]
    }
}

impl fmt::Display for ParamName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ParamName {
    type Err = ParamError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().trim_start_matches("--");
        Self::all()
            .into_iter()
            .find(|p| p.name() == s)
            .ok_or_else(|| ParamError::UnknownName(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    Text,
    Number,
    Flag,
}

/// A single parameter value as handed over by a form widget.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    #[default]
    Absent,
    Bool(bool),
    Number(f64),
    Text(String),
}

impl ParamValue {
    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<f64> for ParamValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i32> for ParamValue {
    fn from(value: i32) -> Self {
        Self::Number(value.into())
    }
}

impl From<u32> for ParamValue {
    fn from(value: u32) -> Self {
        Self::Number(value.into())
    }
}

impl From<i64> for ParamValue {
    fn from(value: i64) -> Self {
        Self::Number(value as f64)
    }
}

impl From<bool> for ParamValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl<T: Into<ParamValue>> From<Option<T>> for ParamValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Absent, Into::into)
    }
}

/// Parameters for one job line. Names that were never set read as `Absent`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobParams {
    values: BTreeMap<ParamName, ParamValue>,
}

impl JobParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: ParamName, value: impl Into<ParamValue>) -> Self {
        self.set(name, value);
        self
    }

    pub fn set(&mut self, name: ParamName, value: impl Into<ParamValue>) {
        match value.into() {
            ParamValue::Absent => {
                self.values.remove(&name);
            }
            value => {
                self.values.insert(name, value);
            }
        }
    }

    pub fn get(&self, name: ParamName) -> &ParamValue {
        static ABSENT: ParamValue = ParamValue::Absent;
        self.values.get(&name).unwrap_or(&ABSENT)
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }

    /// Set parameters in line order
    pub fn iter(&self) -> impl Iterator<Item = (ParamName, &ParamValue)> {
        self.values.iter().map(|(name, value)| (*name, value))
    }
}
