use serde::{Deserialize, Serialize};

use crate::entities::error::ComparatorError;

pub const RESOLUTIONS: [&str; 3] = ["1080p", "1440p", "4K"];
pub const QUALITY_PRESETS: [&str; 4] = ["Low", "Medium", "High", "Ultra"];
pub const EXPORT_PRESETS: [&str; 4] = ["1080p H.264", "4K H.265", "4K ProRes", "8K RAW"];

pub const DEFAULT_RESOLUTION: &str = "1440p";
pub const DEFAULT_QUALITY_PRESET: &str = "High";
pub const DEFAULT_EXPORT_PRESET: &str = "4K H.265";

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ComparisonMode {
    Single,
    Comparison,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CpuConfig {
    pub model: String,
    pub ram_amount: String,
    pub ram_speed: String,
    pub ram_brand: Option<String>,
}

impl CpuConfig {
    /// Blank brands are treated as absent.
    pub fn brand(&self) -> Option<&str> {
        self.ram_brand
            .as_deref()
            .map(str::trim)
            .filter(|brand| !brand.is_empty())
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Preferences {
    pub target_resolution: String,
    pub quality_preset: String,
    pub target_games: Vec<String>,
    pub editing_software: Vec<String>,
    pub export_preset: String,
}

impl Default for Preferences {
    fn default() -> Self {
        Preferences {
            target_resolution: DEFAULT_RESOLUTION.to_string(),
            quality_preset: DEFAULT_QUALITY_PRESET.to_string(),
            target_games: vec![],
            editing_software: vec![],
            export_preset: DEFAULT_EXPORT_PRESET.to_string(),
        }
    }
}

/// Everything one comparison request needs, built fresh for each submission.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct HardwareQuery {
    pub gpu1: String,
    pub gpu2: String,
    pub mode: ComparisonMode,
    pub cpu: Option<CpuConfig>,
    pub preferences: Preferences,
}

impl HardwareQuery {
    pub fn single(gpu1: impl Into<String>) -> HardwareQuery {
        HardwareQuery {
            gpu1: gpu1.into(),
            gpu2: String::new(),
            mode: ComparisonMode::Single,
            cpu: None,
            preferences: Preferences::default(),
        }
    }

    pub fn comparison(gpu1: impl Into<String>, gpu2: impl Into<String>) -> HardwareQuery {
        HardwareQuery {
            gpu1: gpu1.into(),
            gpu2: gpu2.into(),
            mode: ComparisonMode::Comparison,
            cpu: None,
            preferences: Preferences::default(),
        }
    }

    pub fn with_cpu(mut self, cpu: CpuConfig) -> HardwareQuery {
        self.cpu = Some(cpu);
        self
    }

    pub fn with_preferences(mut self, preferences: Preferences) -> HardwareQuery {
        self.preferences = preferences;
        self
    }

    pub fn is_single(&self) -> bool {
        self.mode == ComparisonMode::Single
    }

    /// CPU config that should drive a bottleneck analysis, if any.
    pub fn cpu_for_analysis(&self) -> Option<&CpuConfig> {
        self.cpu.as_ref().filter(|cpu| !cpu.model.trim().is_empty())
    }

    pub fn validate(&self) -> Result<(), ComparatorError> {
        if self.gpu1.trim().is_empty() {
            return Err(ComparatorError::validation("Primary GPU is required."));
        }
        match self.mode {
            ComparisonMode::Comparison if self.gpu2.trim().is_empty() => Err(
                ComparatorError::validation("Second GPU is required in comparison mode."),
            ),
            ComparisonMode::Single if !self.gpu2.trim().is_empty() => Err(
                ComparatorError::validation("Second GPU must be empty in single mode."),
            ),
            _ => Ok(()),
        }
    }
}

/// Mutable mirror of the input form. Converted into a `HardwareQuery` on submit.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct FormState {
    pub gpu1: String,
    pub gpu2: String,
    pub is_single_mode: bool,
    pub cpu_model: String,
    pub ram_amount: String,
    pub ram_speed: String,
    pub ram_brand: String,
    pub target_games: Vec<String>,
    pub editing_software: Vec<String>,
    pub target_resolution: String,
    pub quality_preset: String,
    pub export_preset: String,
}

impl Default for FormState {
    fn default() -> Self {
        FormState {
            gpu1: String::new(),
            gpu2: String::new(),
            is_single_mode: false,
            cpu_model: String::new(),
            ram_amount: String::new(),
            ram_speed: String::new(),
            ram_brand: String::new(),
            target_games: vec![],
            editing_software: vec![],
            target_resolution: DEFAULT_RESOLUTION.to_string(),
            quality_preset: DEFAULT_QUALITY_PRESET.to_string(),
            export_preset: DEFAULT_EXPORT_PRESET.to_string(),
        }
    }
}

fn clean_list(items: &[String]) -> Vec<String> {
    items
        .iter()
        .map(|item| item.trim())
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

fn or_default(value: &str, default: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        default.to_string()
    } else {
        trimmed.to_string()
    }
}

impl FormState {
    pub fn to_query(&self) -> Result<HardwareQuery, ComparatorError> {
        let mode = if self.is_single_mode {
            ComparisonMode::Single
        } else {
            ComparisonMode::Comparison
        };
        let gpu2 = match mode {
            ComparisonMode::Single => String::new(),
            ComparisonMode::Comparison => self.gpu2.trim().to_string(),
        };
        let cpu = if self.cpu_model.trim().is_empty() {
            None
        } else {
            Some(CpuConfig {
                model: self.cpu_model.trim().to_string(),
                ram_amount: self.ram_amount.trim().to_string(),
                ram_speed: self.ram_speed.trim().to_string(),
                ram_brand: Some(self.ram_brand.trim().to_string()).filter(|brand| !brand.is_empty()),
            })
        };
        let query = HardwareQuery {
            gpu1: self.gpu1.trim().to_string(),
            gpu2,
            mode,
            cpu,
            preferences: Preferences {
                target_resolution: or_default(&self.target_resolution, DEFAULT_RESOLUTION),
                quality_preset: or_default(&self.quality_preset, DEFAULT_QUALITY_PRESET),
                target_games: clean_list(&self.target_games),
                editing_software: clean_list(&self.editing_software),
                export_preset: or_default(&self.export_preset, DEFAULT_EXPORT_PRESET),
            },
        };
        query.validate()?;
        Ok(query)
    }

    /// Copies the non-empty fields found in a document into the form.
    pub fn apply_extracted_specs(&mut self, specs: &ExtractedSpecs) {
        fn overwrite(target: &mut String, value: &str) {
            if !value.trim().is_empty() {
                *target = value.trim().to_string();
            }
        }
        overwrite(&mut self.gpu1, &specs.gpu1);
        overwrite(&mut self.cpu_model, &specs.cpu_model);
        overwrite(&mut self.ram_amount, &specs.ram_amount);
        overwrite(&mut self.ram_speed, &specs.ram_speed);
        overwrite(&mut self.ram_brand, &specs.ram_brand);
    }
}

/// Hardware found in an uploaded document. Empty strings mean "not found".
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedSpecs {
    pub gpu1: String,
    pub cpu_model: String,
    pub ram_amount: String,
    pub ram_speed: String,
    pub ram_brand: String,
}
