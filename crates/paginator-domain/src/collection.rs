use crate::events::EventHub;
use paginator_core::{PaginationState, PaginatorResult};

/// A paged data source the paginator is bound to.
///
/// Page numbers passed to [`get_page`](Self::get_page) are in the
/// collection's own numbering. Navigation is fire-and-forget: completion is
/// reported by emitting `sync` on [`events`](Self::events).
#[cfg_attr(test, mockall::automock)]
pub trait PageableCollection {
    fn state(&self) -> &PaginationState;
    fn state_mut(&mut self) -> &mut PaginationState;
    fn events(&self) -> &EventHub;

    fn get_first_page(&mut self) -> PaginatorResult<()>;
    fn get_previous_page(&mut self) -> PaginatorResult<()>;
    fn get_next_page(&mut self) -> PaginatorResult<()>;
    fn get_last_page(&mut self) -> PaginatorResult<()>;

    /// Go to `page`. With `reset` the displayed item set is replaced rather
    /// than extended.
    fn get_page(&mut self, page: usize, reset: bool) -> PaginatorResult<()>;

    /// Reload the current page with the current state.
    fn fetch(&mut self, reset: bool) -> PaginatorResult<()>;

    fn has_previous_page(&self) -> bool {
        self.state().has_previous_page()
    }

    fn has_next_page(&self) -> bool {
        self.state().has_next_page()
    }
}
