//! Page size dropdown model.

use crate::collection::PageableCollection;
use paginator_core::{
    PageSize, PageSizeOptionConfig, PaginationState, PaginatorConfig, PaginatorError,
    PaginatorResult,
};
use serde::Serialize;

/// What a page size control must provide to be rendered by the paginator.
pub trait PageSizeControl {
    fn should_render(&self) -> bool;
    fn render(&self, state: &PaginationState) -> PageSizeView;

    /// Apply the option with the given value to the collection.
    fn change_page_size(
        &self,
        collection: &mut dyn PageableCollection,
        value: &str,
    ) -> PaginatorResult<()>;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageSizeChoice {
    pub value: String,
    pub label: String,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageSizeView {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub options: Vec<PageSizeChoice>,
}

impl PageSizeView {
    pub fn selected(&self) -> Option<&PageSizeChoice> {
        self.options.iter().find(|o| o.selected)
    }

    /// The option after the selected one, wrapping around.
    pub fn next_value(&self) -> Option<&str> {
        let position = self
            .options
            .iter()
            .position(|o| o.selected)
            .map(|i| (i + 1) % self.options.len())
            .unwrap_or(0);
        self.options.get(position).map(|o| o.value.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct PageSizeOption {
    size: PageSize,
    value: String,
    label: String,
}

#[derive(Debug, Clone, Default)]
pub struct PageSizeSelector {
    options: Vec<PageSizeOption>,
    label: Option<String>,
}

impl PageSizeSelector {
    /// Build a selector, rejecting option values that are not a positive
    /// integer or `all`.
    pub fn new(options: &[PageSizeOptionConfig], label: Option<String>) -> PaginatorResult<Self> {
        let options = options
            .iter()
            .map(|option| {
                let size = option.value.parse::<PageSize>().map_err(|_| {
                    PaginatorError::Configuration(format!(
                        "page size option '{}' must be a positive integer or '{}'",
                        option.value,
                        PageSize::ALL_VALUE
                    ))
                })?;
                Ok(PageSizeOption {
                    size,
                    value: option.value.trim().to_string(),
                    label: option.label.clone(),
                })
            })
            .collect::<PaginatorResult<Vec<_>>>()?;

        Ok(Self { options, label })
    }

    pub fn from_config(config: &PaginatorConfig) -> PaginatorResult<Self> {
        Self::new(&config.page_size_options, config.page_size_label.clone())
    }

    fn find(&self, value: &str) -> Option<&PageSizeOption> {
        let value = value.trim();
        self.options
            .iter()
            .find(|o| o.value.eq_ignore_ascii_case(value))
    }
}

impl PageSizeControl for PageSizeSelector {
    fn should_render(&self) -> bool {
        !self.options.is_empty()
    }

    fn render(&self, state: &PaginationState) -> PageSizeView {
        PageSizeView {
            label: self.label.clone(),
            options: self
                .options
                .iter()
                .map(|o| PageSizeChoice {
                    value: o.value.clone(),
                    label: o.label.clone(),
                    selected: o.size == state.page_size,
                })
                .collect(),
        }
    }

    fn change_page_size(
        &self,
        collection: &mut dyn PageableCollection,
        value: &str,
    ) -> PaginatorResult<()> {
        let option = self.find(value).ok_or_else(|| {
            PaginatorError::InvalidState(format!("'{}' is not a page size option", value))
        })?;

        tracing::debug!("Changing page size to {}", option.size);
        let state = collection.state_mut();
        state.current_page = state.first_page();
        state.page_size = option.size;
        collection.fetch(true)
    }
}
