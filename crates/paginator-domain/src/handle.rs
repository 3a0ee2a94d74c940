//! Page handles.
//!
//! A handle is one clickable pagination control. Fixed handles (rewind,
//! back, forward, fast-forward) derive their target from the current state;
//! indexed handles point at a page of the window. Handles are immutable
//! descriptors rebuilt on every render pass.

use crate::collection::PageableCollection;
use paginator_core::{Control, ControlConfig, PaginationState, PaginatorError, PaginatorResult};
use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use std::fmt;
use std::rc::Rc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HandleKind {
    Rewind,
    Back,
    Forward,
    FastForward,
    /// A discrete page, by its 0-based window index.
    Indexed(usize),
}

impl HandleKind {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Rewind => "rewind",
            Self::Back => "back",
            Self::Forward => "forward",
            Self::FastForward => "fast_forward",
            Self::Indexed(_) => "indexed",
        }
    }

    pub fn is_fixed(&self) -> bool {
        !matches!(self, Self::Indexed(_))
    }

    /// Target page in the collection's numbering.
    pub fn resolve(&self, state: &PaginationState) -> usize {
        let first_page = state.first_page();
        match *self {
            Self::Rewind => first_page,
            Self::Back => first_page.max(state.current_page.saturating_sub(1)),
            Self::Forward => state.last_page.min(state.current_page.saturating_add(1)),
            Self::FastForward => state.last_page,
            Self::Indexed(index) => state.rebase(index),
        }
    }

    /// Whether the navigation this kind represents is currently impossible.
    pub fn is_disabled(&self, state: &PaginationState) -> bool {
        match self {
            Self::Rewind => state.current_page == state.first_page(),
            Self::Back => !state.has_previous_page(),
            Self::Forward => !state.has_next_page(),
            Self::FastForward => state.current_page == state.last_page || state.total_pages < 1,
            Self::Indexed(_) => false,
        }
    }
}

impl From<Control> for HandleKind {
    fn from(control: Control) -> Self {
        match control {
            Control::Rewind => Self::Rewind,
            Control::Back => Self::Back,
            Control::Forward => Self::Forward,
            Control::FastForward => Self::FastForward,
        }
    }
}

/// Title of a handle: fixed text or a function of the label.
#[derive(Clone)]
pub enum HandleTitle {
    Text(String),
    Format(Rc<dyn Fn(&str) -> String>),
}

impl HandleTitle {
    pub fn format<F>(f: F) -> Self
    where
        F: Fn(&str) -> String + 'static,
    {
        Self::Format(Rc::new(f))
    }

    pub fn render(&self, label: &str) -> String {
        match self {
            Self::Text(text) => text.clone(),
            Self::Format(f) => f(label),
        }
    }

    pub fn default_for(label: &str) -> String {
        format!("Page {}", label)
    }
}

impl fmt::Debug for HandleTitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.debug_tuple("Text").field(text).finish(),
            Self::Format(_) => f.write_str("Format(..)"),
        }
    }
}

impl From<&str> for HandleTitle {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for HandleTitle {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

/// Flag-style handle construction options.
///
/// Exactly one of `page_index` or a single `is_*` flag must be set.
#[derive(Debug, Clone, Default)]
pub struct HandleOptions {
    pub page_index: Option<usize>,
    pub label: Option<String>,
    pub title: Option<HandleTitle>,
    pub is_rewind: bool,
    pub is_back: bool,
    pub is_forward: bool,
    pub is_fast_forward: bool,
}

impl HandleOptions {
    pub fn indexed(page_index: usize) -> Self {
        Self {
            page_index: Some(page_index),
            ..Default::default()
        }
    }

    pub fn kind(&self) -> PaginatorResult<HandleKind> {
        let flags = [
            (self.is_rewind, HandleKind::Rewind),
            (self.is_back, HandleKind::Back),
            (self.is_forward, HandleKind::Forward),
            (self.is_fast_forward, HandleKind::FastForward),
        ];
        let mut set = flags.iter().filter(|(on, _)| *on).map(|(_, kind)| *kind);

        match (set.next(), set.next(), self.page_index) {
            (Some(_), Some(_), _) => Err(PaginatorError::Configuration(
                "a page handle can only be one of rewind, back, forward or fast forward"
                    .to_string(),
            )),
            (Some(kind), None, None) => Ok(kind),
            (Some(kind), None, Some(index)) => Err(PaginatorError::Configuration(format!(
                "a {} handle cannot also target page index {}",
                kind.name(),
                index
            ))),
            (None, _, Some(index)) => Ok(HandleKind::Indexed(index)),
            (None, _, None) => Err(PaginatorError::Configuration(
                "a page handle needs either a page index or a control flag".to_string(),
            )),
        }
    }
}

/// One resolved pagination control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageHandle {
    kind: HandleKind,
    page: usize,
    label: String,
    title: String,
    is_active: bool,
    is_disabled: bool,
}

impl PageHandle {
    pub fn new(
        state: &PaginationState,
        kind: HandleKind,
        label: Option<String>,
        title: Option<&HandleTitle>,
    ) -> Self {
        let page = kind.resolve(state);
        let label = label
            .filter(|label| !label.is_empty())
            .unwrap_or_else(|| page.to_string());
        let title = match title {
            Some(title) => title.render(&label),
            None => HandleTitle::default_for(&label),
        };
        let is_disabled = kind.is_disabled(state);
        let is_active = !kind.is_fixed() && page == state.current_page;

        Self {
            kind,
            page,
            label,
            title,
            is_active,
            is_disabled,
        }
    }

    /// Handle for the 0-based window index `page_index`.
    pub fn indexed(state: &PaginationState, page_index: usize) -> Self {
        Self::new(state, HandleKind::Indexed(page_index), None, None)
    }

    pub fn control(state: &PaginationState, control: Control, config: &ControlConfig) -> Self {
        let title = HandleTitle::Text(config.title.clone());
        Self::new(
            state,
            control.into(),
            Some(config.label.clone()),
            Some(&title),
        )
    }

    pub fn from_options(state: &PaginationState, options: HandleOptions) -> PaginatorResult<Self> {
        let kind = options.kind()?;
        Ok(Self::new(state, kind, options.label, options.title.as_ref()))
    }

    pub fn kind(&self) -> HandleKind {
        self.kind
    }

    /// 0-based window index for indexed handles.
    pub fn page_index(&self) -> Option<usize> {
        match self.kind {
            HandleKind::Indexed(index) => Some(index),
            _ => None,
        }
    }

    /// Target page in the collection's numbering.
    pub fn page(&self) -> usize {
        self.page
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn is_active(&self) -> bool {
        self.is_active
    }

    pub fn is_disabled(&self) -> bool {
        self.is_disabled
    }

    /// Active and disabled handles ignore activation.
    pub fn is_actionable(&self) -> bool {
        !self.is_active && !self.is_disabled
    }

    /// Navigate the collection to this handle's page.
    ///
    /// Returns `false` without touching the collection when the handle is
    /// active or disabled.
    pub fn activate<C>(&self, collection: &mut C) -> PaginatorResult<bool>
    where
        C: PageableCollection + ?Sized,
    {
        if !self.is_actionable() {
            return Ok(false);
        }

        tracing::debug!("Activating {} handle for page {}", self.kind.name(), self.page);
        match self.kind {
            HandleKind::Rewind => collection.get_first_page()?,
            HandleKind::Back => collection.get_previous_page()?,
            HandleKind::Forward => collection.get_next_page()?,
            HandleKind::FastForward => collection.get_last_page()?,
            HandleKind::Indexed(_) => collection.get_page(self.page, true)?,
        }
        Ok(true)
    }
}

impl Serialize for PageHandle {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("PageHandle", 7)?;
        s.serialize_field("kind", self.kind.name())?;
        s.serialize_field("page_index", &self.page_index())?;
        s.serialize_field("page", &self.page)?;
        s.serialize_field("label", &self.label)?;
        s.serialize_field("title", &self.title)?;
        s.serialize_field("is_active", &self.is_active)?;
        s.serialize_field("is_disabled", &self.is_disabled)?;
        s.end()
    }
}
