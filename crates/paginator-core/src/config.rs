use crate::{CollectionEvent, PaginatorError, PaginatorResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_WINDOW_SIZE: usize = 10;
pub const DEFAULT_SLIDE_SCALE: f64 = 0.5;

/// One of the four fixed navigation controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Control {
    Rewind,
    Back,
    Forward,
    FastForward,
}

impl Control {
    pub const ALL: [Control; 4] = [
        Control::Rewind,
        Control::Back,
        Control::Forward,
        Control::FastForward,
    ];

    /// Whether the control is placed before the indexed handles.
    pub fn is_leading(self) -> bool {
        matches!(self, Self::Rewind | Self::Back)
    }
}

/// Label and title of an enabled control.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControlConfig {
    pub label: String,
    pub title: String,
}

impl ControlConfig {
    pub fn new(label: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            title: title.into(),
        }
    }
}

/// User changes to a single control. Unset fields keep the default.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlOverride {
    pub label: Option<String>,
    pub title: Option<String>,
    pub enabled: Option<bool>,
}

impl ControlOverride {
    pub fn disabled() -> Self {
        Self {
            enabled: Some(false),
            ..Default::default()
        }
    }

    pub fn apply(&self, default: ControlConfig) -> Option<ControlConfig> {
        if self.enabled == Some(false) {
            return None;
        }
        Some(ControlConfig {
            label: self.label.clone().unwrap_or(default.label),
            title: self.title.clone().unwrap_or(default.title),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlOverrides {
    pub rewind: ControlOverride,
    pub back: ControlOverride,
    pub forward: ControlOverride,
    pub fast_forward: ControlOverride,
}

impl ControlOverrides {
    pub fn get(&self, control: Control) -> &ControlOverride {
        match control {
            Control::Rewind => &self.rewind,
            Control::Back => &self.back,
            Control::Forward => &self.forward,
            Control::FastForward => &self.fast_forward,
        }
    }

    pub fn get_mut(&mut self, control: Control) -> &mut ControlOverride {
        match control {
            Control::Rewind => &mut self.rewind,
            Control::Back => &mut self.back,
            Control::Forward => &mut self.forward,
            Control::FastForward => &mut self.fast_forward,
        }
    }
}

/// Resolved controls for one paginator. `None` means the control is off.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Controls {
    pub rewind: Option<ControlConfig>,
    pub back: Option<ControlConfig>,
    pub forward: Option<ControlConfig>,
    pub fast_forward: Option<ControlConfig>,
}

impl Controls {
    pub fn defaults() -> Self {
        Self {
            rewind: Some(ControlConfig::new("《", "First")),
            back: Some(ControlConfig::new("〈", "Previous")),
            forward: Some(ControlConfig::new("〉", "Next")),
            fast_forward: Some(ControlConfig::new("》", "Last")),
        }
    }

    /// Merge overrides onto a fresh copy of the defaults.
    pub fn merged(overrides: &ControlOverrides) -> Self {
        let defaults = Self::defaults();
        let merge = |control: Control| {
            defaults
                .get(control)
                .cloned()
                .and_then(|default| overrides.get(control).apply(default))
        };
        Self {
            rewind: merge(Control::Rewind),
            back: merge(Control::Back),
            forward: merge(Control::Forward),
            fast_forward: merge(Control::FastForward),
        }
    }

    pub fn get(&self, control: Control) -> Option<&ControlConfig> {
        match control {
            Control::Rewind => self.rewind.as_ref(),
            Control::Back => self.back.as_ref(),
            Control::Forward => self.forward.as_ref(),
            Control::FastForward => self.fast_forward.as_ref(),
        }
    }
}

impl Default for Controls {
    fn default() -> Self {
        Self::defaults()
    }
}

/// Captions for the record and page totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SummaryTitles {
    pub total_records: String,
    pub total_pages: String,
}

impl Default for SummaryTitles {
    fn default() -> Self {
        Self {
            total_records: "Total items:".to_string(),
            total_pages: "Total pages:".to_string(),
        }
    }
}

/// A page size choice as written in the config file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageSizeOptionConfig {
    pub value: String,
    pub label: String,
}

impl PageSizeOptionConfig {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaginatorConfig {
    pub window_size: usize,
    pub slide_scale: f64,
    pub controls: ControlOverrides,
    pub render_indexed_page_handles: bool,
    pub go_back_first_on_sort: bool,
    pub page_size_options: Vec<PageSizeOptionConfig>,
    pub page_size_label: Option<String>,
    pub titles: SummaryTitles,
    /// Events that trigger a re-render. Before-sort always re-renders.
    pub rerender_on: Vec<CollectionEvent>,
}

impl Default for PaginatorConfig {
    fn default() -> Self {
        Self {
            window_size: DEFAULT_WINDOW_SIZE,
            slide_scale: DEFAULT_SLIDE_SCALE,
            controls: ControlOverrides::default(),
            render_indexed_page_handles: true,
            go_back_first_on_sort: true,
            page_size_options: Vec::new(),
            page_size_label: None,
            titles: SummaryTitles::default(),
            rerender_on: vec![CollectionEvent::Sync],
        }
    }
}

impl PaginatorConfig {
    pub fn config_path() -> Option<PathBuf> {
        #[cfg(target_os = "macos")]
        {
            dirs::home_dir().map(|home| home.join(".config/paginator/config.toml"))
        }
        #[cfg(target_os = "linux")]
        {
            dirs::config_dir().map(|config| config.join("paginator/config.toml"))
        }
        #[cfg(target_os = "windows")]
        {
            dirs::config_dir().map(|config| config.join("paginator\\config.toml"))
        }
        #[cfg(not(any(target_os = "macos", target_os = "linux", target_os = "windows")))]
        {
            None
        }
    }

    /// Load the user config, falling back to defaults when it is missing or broken.
    pub fn load() -> Self {
        if let Some(config_path) = Self::config_path() {
            if config_path.exists() {
                match Self::load_from(&config_path) {
                    Ok(config) => return config,
                    Err(e) => tracing::warn!(
                        "Ignoring config at {}: {}",
                        config_path.display(),
                        e
                    ),
                }
            }
        }
        Self::default()
    }

    pub fn load_from(path: &Path) -> PaginatorResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> PaginatorResult<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> PaginatorResult<()> {
        if self.window_size == 0 {
            return Err(PaginatorError::Configuration(
                "window_size must be at least 1".to_string(),
            ));
        }
        if !(self.slide_scale > 0.0 && self.slide_scale <= 1.0) {
            return Err(PaginatorError::Configuration(format!(
                "slide_scale must be in (0, 1], got {}",
                self.slide_scale
            )));
        }
        Ok(())
    }

    /// Controls with this config's overrides merged over the defaults.
    pub fn controls(&self) -> Controls {
        Controls::merged(&self.controls)
    }

    pub fn rerenders_on(&self, event: CollectionEvent) -> bool {
        event == CollectionEvent::BeforeSort || self.rerender_on.contains(&event)
    }
}
