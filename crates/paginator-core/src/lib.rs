pub mod config;
pub mod error;
pub mod event;
pub mod result;
pub mod state;
pub mod window;

pub use config::{
    Control, ControlConfig, ControlOverride, ControlOverrides, Controls, PageSizeOptionConfig,
    PaginatorConfig, SummaryTitles,
};
pub use error::PaginatorError;
pub use event::CollectionEvent;
pub use result::PaginatorResult;
pub use state::{PageBase, PageSize, PaginationState};
pub use window::{DefaultSlidePolicy, PageWindow, SlideContext, SlidePolicy, WindowCalculator};
