use crate::collection::PageableCollection;
use crate::events::EventHub;
use paginator_core::{
    CollectionEvent, PageBase, PageSize, PaginationState, PaginatorError, PaginatorResult,
};
use std::cmp::Ordering;

/// A pageable collection over records held in memory.
///
/// Fetching is synchronous, so every navigation emits `sync` before it
/// returns.
pub struct InMemoryCollection<T> {
    records: Vec<T>,
    state: PaginationState,
    events: EventHub,
}

impl<T> InMemoryCollection<T> {
    pub fn new(records: Vec<T>, base: PageBase, page_size: PageSize) -> PaginatorResult<Self> {
        let state =
            PaginationState::for_records(base, records.len(), page_size, base.first_page())?;
        Ok(Self {
            records,
            state,
            events: EventHub::new(),
        })
    }

    pub fn records(&self) -> &[T] {
        &self.records
    }

    /// Records on the current page.
    pub fn page_items(&self) -> &[T] {
        match self.state.page_size {
            PageSize::All => &self.records,
            PageSize::Records(size) => {
                let index = self.state.current_page - self.state.first_page();
                let start = (index * size).min(self.records.len());
                let end = (start + size).min(self.records.len());
                &self.records[start..end]
            }
        }
    }

    pub fn set_page_size(&mut self, page_size: PageSize) -> PaginatorResult<()> {
        self.state.page_size = page_size;
        self.state.current_page = self.state.first_page();
        self.fetch(true)
    }

    /// Sort the records, announcing the sort first so listeners can react.
    pub fn sort_by<F>(&mut self, compare: F) -> PaginatorResult<()>
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        self.events.emit(CollectionEvent::BeforeSort, &mut self.state);
        self.records.sort_by(compare);
        self.fetch(true)
    }

    fn load(&mut self, page: usize) -> PaginatorResult<()> {
        if !self.state.contains_page(page) {
            return Err(PaginatorError::InvalidState(format!(
                "page {} is outside [{}, {}]",
                page,
                self.state.first_page(),
                self.state.last_page
            )));
        }
        self.state.current_page = page;
        self.fetch(true)
    }
}

impl<T> PageableCollection for InMemoryCollection<T> {
    fn state(&self) -> &PaginationState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut PaginationState {
        &mut self.state
    }

    fn events(&self) -> &EventHub {
        &self.events
    }

    fn get_first_page(&mut self) -> PaginatorResult<()> {
        self.load(self.state.first_page())
    }

    fn get_previous_page(&mut self) -> PaginatorResult<()> {
        if !self.has_previous_page() {
            return Err(PaginatorError::InvalidState("no previous page".to_string()));
        }
        self.load(self.state.current_page - 1)
    }

    fn get_next_page(&mut self) -> PaginatorResult<()> {
        if !self.has_next_page() {
            return Err(PaginatorError::InvalidState("no next page".to_string()));
        }
        self.load(self.state.current_page + 1)
    }

    fn get_last_page(&mut self) -> PaginatorResult<()> {
        self.load(self.state.last_page)
    }

    fn get_page(&mut self, page: usize, reset: bool) -> PaginatorResult<()> {
        tracing::debug!("Loading page {} (reset: {})", page, reset);
        self.load(page)
    }

    fn fetch(&mut self, _reset: bool) -> PaginatorResult<()> {
        let total_pages = self.state.page_size.page_count(self.records.len());
        let last_page = self.state.first_page() + total_pages.saturating_sub(1);
        let current_page = self.state.current_page.min(last_page);

        self.state = PaginationState::for_records(
            self.state.base,
            self.records.len(),
            self.state.page_size,
            current_page.max(self.state.first_page()),
        )?;
        self.events.emit(CollectionEvent::Sync, &mut self.state);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paginator::Paginator;
    use paginator_core::{PageSizeOptionConfig, PageWindow, PaginatorConfig};
    use std::cell::Cell;
    use std::rc::Rc;

    fn numbers(count: usize) -> InMemoryCollection<usize> {
        InMemoryCollection::new((1..=count).collect(), PageBase::One, PageSize::Records(10))
            .unwrap()
    }

    #[test]
    fn test_page_items() {
        let mut collection = numbers(25);
        assert_eq!(collection.page_items(), &[1, 2, 3, 4, 5, 6, 7, 8, 9, 10]);

        collection.get_last_page().unwrap();
        assert_eq!(collection.state().current_page, 3);
        assert_eq!(collection.page_items(), &[21, 22, 23, 24, 25]);
    }

    #[test]
    fn test_navigation_emits_sync() {
        let mut collection = numbers(25);
        let syncs = Rc::new(Cell::new(0));
        let s = Rc::clone(&syncs);
        let _sub = collection
            .events()
            .subscribe(CollectionEvent::Sync, move |_, _| s.set(s.get() + 1));

        collection.get_next_page().unwrap();
        collection.get_previous_page().unwrap();
        collection.get_page(3, true).unwrap();

        assert_eq!(syncs.get(), 3);
        assert_eq!(collection.state().current_page, 3);
    }

    #[test]
    fn test_out_of_range_navigation() {
        let mut collection = numbers(25);

        assert!(collection.get_previous_page().is_err());
        assert!(collection.get_page(4, true).is_err());
        assert!(collection.get_page(0, true).is_err());

        collection.get_last_page().unwrap();
        assert!(collection.get_next_page().is_err());
    }

    #[test]
    fn test_empty_collection() {
        let collection = numbers(0);

        assert_eq!(collection.state().total_pages, 0);
        assert_eq!(collection.state().current_page, 1);
        assert!(collection.page_items().is_empty());
    }

    #[test]
    fn test_set_page_size_returns_to_first_page() {
        let mut collection = numbers(25);
        collection.get_page(3, true).unwrap();

        collection.set_page_size(PageSize::All).unwrap();
        assert_eq!(collection.state().current_page, 1);
        assert_eq!(collection.state().total_pages, 1);
        assert_eq!(collection.page_items().len(), 25);
    }

    #[test]
    fn test_sort_with_bound_paginator() {
        let mut collection = numbers(250);
        let paginator = Paginator::builder(PaginatorConfig::default())
            .bind(&collection)
            .unwrap();

        collection.get_page(18, true).unwrap();
        assert_eq!(
            paginator.rendered().unwrap().window,
            Some(PageWindow { start: 15, end: 25 })
        );

        collection.sort_by(|a, b| b.cmp(a)).unwrap();
        assert_eq!(collection.state().current_page, 1);
        assert_eq!(collection.page_items()[0], 250);

        let rendered = paginator.rendered().unwrap();
        assert_eq!(rendered.window, Some(PageWindow { start: 0, end: 10 }));
        assert_eq!(rendered.active_handle().unwrap().label(), "1");
    }

    #[test]
    fn test_walk_through_every_page_with_forward_handle() {
        let mut collection = numbers(95);
        let paginator = Paginator::builder(PaginatorConfig::default())
            .bind(&collection)
            .unwrap();

        loop {
            let rendered = paginator.rendered().unwrap();
            let forward = rendered
                .handles
                .iter()
                .position(|h| h.kind() == crate::handle::HandleKind::Forward)
                .unwrap();
            if !paginator.activate(forward, &mut collection).unwrap() {
                break;
            }
        }
        assert_eq!(collection.state().current_page, 10);
        assert_eq!(collection.page_items(), &[91, 92, 93, 94, 95]);
    }

    #[test]
    fn test_page_size_change_rerenders() {
        let mut collection = numbers(95);
        let config = PaginatorConfig {
            page_size_options: vec![
                PageSizeOptionConfig::new("10", "10"),
                PageSizeOptionConfig::new("50", "50"),
            ],
            ..Default::default()
        };
        let paginator = Paginator::builder(config).bind(&collection).unwrap();
        collection.get_page(7, true).unwrap();
        let generation = paginator.generation();

        paginator.change_page_size(&mut collection, "50").unwrap();

        let rendered = paginator.rendered().unwrap();
        assert!(rendered.generation > generation);
        assert_eq!(rendered.window, Some(PageWindow { start: 0, end: 2 }));
        assert_eq!(rendered.page_size.unwrap().selected().unwrap().value, "50");
        assert_eq!(collection.state().current_page, 1);
    }
}
