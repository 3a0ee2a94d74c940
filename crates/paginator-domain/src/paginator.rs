//! Paginator orchestration.
//!
//! Assembles the window's indexed handles and the fixed controls into one
//! ordered list per render pass, and keeps that rendering in step with the
//! bound collection through event subscriptions.

use crate::collection::PageableCollection;
use crate::events::Subscription;
use crate::handle::PageHandle;
use crate::page_size::{PageSizeControl, PageSizeSelector, PageSizeView};
use paginator_core::{
    CollectionEvent, Control, Controls, DefaultSlidePolicy, PageWindow, PaginationState,
    PaginatorConfig, PaginatorError, PaginatorResult, SlidePolicy, SummaryTitles,
    WindowCalculator,
};
use serde::Serialize;
use std::cell::RefCell;
use std::rc::{Rc, Weak};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryEntry {
    pub title: String,
    pub value: usize,
}

/// Record and page totals. Zero totals are omitted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_records: Option<SummaryEntry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_pages: Option<SummaryEntry>,
}

impl Summary {
    pub fn new(state: &PaginationState, titles: &SummaryTitles) -> Self {
        let entry = |title: &str, value: usize| {
            (value > 0).then(|| SummaryEntry {
                title: title.to_string(),
                value,
            })
        };
        Self {
            total_records: entry(&titles.total_records, state.total_records),
            total_pages: entry(&titles.total_pages, state.total_pages),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.total_records.is_none() && self.total_pages.is_none()
    }
}

/// Output of one render pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedPaginator {
    pub generation: u64,
    pub handles: Vec<PageHandle>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub window: Option<PageWindow>,
    pub summary: Summary,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<PageSizeView>,
}

impl RenderedPaginator {
    pub fn active_handle(&self) -> Option<&PageHandle> {
        self.handles.iter().find(|h| h.is_active())
    }
}

struct Layout {
    config: PaginatorConfig,
    controls: Controls,
    policy: Box<dyn SlidePolicy>,
    page_size: Option<Rc<dyn PageSizeControl>>,
}

impl Layout {
    fn window(&self, state: &PaginationState) -> PageWindow {
        WindowCalculator::new(
            self.config.window_size,
            self.config.slide_scale,
            self.policy.as_ref(),
        )
        .calculate(state)
    }

    fn render(&self, state: &PaginationState, generation: u64) -> RenderedPaginator {
        let window = self
            .config
            .render_indexed_page_handles
            .then(|| self.window(state));

        let mut handles = Vec::new();
        let mut trailing = Vec::new();
        for control in Control::ALL {
            let Some(config) = self.controls.get(control) else {
                continue;
            };
            let handle = PageHandle::control(state, control, config);
            if control.is_leading() {
                handles.push(handle);
            } else {
                trailing.push(handle);
            }
        }
        if let Some(window) = window {
            handles.extend(window.range().map(|index| PageHandle::indexed(state, index)));
        }
        handles.append(&mut trailing);

        let page_size = self
            .page_size
            .as_ref()
            .filter(|control| control.should_render())
            .map(|control| control.render(state));

        RenderedPaginator {
            generation,
            handles,
            window,
            summary: Summary::new(state, &self.config.titles),
            page_size,
        }
    }
}

struct Shared {
    layout: Layout,
    generation: u64,
    rendered: Option<RenderedPaginator>,
}

impl Shared {
    fn render(&mut self, state: &PaginationState) -> RenderedPaginator {
        self.generation += 1;
        let rendered = self.layout.render(state, self.generation);
        tracing::debug!(
            "Rendered paginator generation {} with {} handles",
            rendered.generation,
            rendered.handles.len()
        );
        // The previous generation's handles are dropped here.
        self.rendered = Some(rendered.clone());
        rendered
    }
}

pub struct PaginatorBuilder {
    config: PaginatorConfig,
    policy: Box<dyn SlidePolicy>,
    page_size: Option<Box<dyn PageSizeControl>>,
}

impl PaginatorBuilder {
    pub fn new(config: PaginatorConfig) -> Self {
        Self {
            config,
            policy: Box::new(DefaultSlidePolicy),
            page_size: None,
        }
    }

    pub fn slide_policy(mut self, policy: impl SlidePolicy + 'static) -> Self {
        self.policy = Box::new(policy);
        self
    }

    /// Use a custom page size control instead of one built from the config.
    pub fn page_size_control(mut self, control: impl PageSizeControl + 'static) -> Self {
        self.page_size = Some(Box::new(control));
        self
    }

    /// Build a paginator that only renders on request.
    pub fn build(self) -> PaginatorResult<Paginator> {
        self.config.validate().inspect_err(|e| {
            tracing::warn!("Rejected paginator configuration: {}", e);
        })?;

        let page_size: Option<Rc<dyn PageSizeControl>> = match self.page_size {
            Some(control) => Some(Rc::from(control)),
            None if !self.config.page_size_options.is_empty() => {
                Some(Rc::new(PageSizeSelector::from_config(&self.config)?))
            }
            None => None,
        };

        let controls = self.config.controls();
        Ok(Paginator {
            shared: Rc::new(RefCell::new(Shared {
                layout: Layout {
                    config: self.config,
                    controls,
                    policy: self.policy,
                    page_size,
                },
                generation: 0,
                rendered: None,
            })),
            subscriptions: Vec::new(),
        })
    }

    /// Build a paginator bound to `collection` and render its current state.
    pub fn bind<C>(self, collection: &C) -> PaginatorResult<Paginator>
    where
        C: PageableCollection + ?Sized,
    {
        let mut paginator = self.build()?;
        paginator.subscribe(collection);
        paginator.render(collection.state());
        Ok(paginator)
    }
}

fn rerender(shared: &Weak<RefCell<Shared>>, event: CollectionEvent, state: &PaginationState) {
    let Some(shared) = shared.upgrade() else {
        return;
    };
    match shared.try_borrow_mut() {
        Ok(mut shared) => {
            shared.render(state);
        }
        Err(_) => tracing::warn!("Skipped re-render on {}: paginator is busy", event),
    };
}

/// Renders pagination handles for a pageable collection.
///
/// Subscriptions to the collection's events are held by the paginator and
/// released when it is dropped.
pub struct Paginator {
    shared: Rc<RefCell<Shared>>,
    subscriptions: Vec<Subscription>,
}

impl Paginator {
    pub fn builder(config: PaginatorConfig) -> PaginatorBuilder {
        PaginatorBuilder::new(config)
    }

    pub fn new(config: PaginatorConfig) -> PaginatorResult<Self> {
        PaginatorBuilder::new(config).build()
    }

    fn subscribe<C>(&mut self, collection: &C)
    where
        C: PageableCollection + ?Sized,
    {
        let events = collection.events();
        let (go_back_first, rerender_on) = {
            let shared = self.shared.borrow();
            let config = &shared.layout.config;
            // before-sort always re-renders from its own listener below
            let mut rerender_on: Vec<CollectionEvent> = Vec::new();
            for event in &config.rerender_on {
                if *event != CollectionEvent::BeforeSort && !rerender_on.contains(event) {
                    rerender_on.push(*event);
                }
            }
            (config.go_back_first_on_sort, rerender_on)
        };

        let weak = Rc::downgrade(&self.shared);
        self.subscriptions.push(events.subscribe(
            CollectionEvent::BeforeSort,
            move |event, state| {
                if go_back_first {
                    state.current_page = state.first_page();
                }
                rerender(&weak, event, state);
            },
        ));

        for event in rerender_on {
            let weak = Rc::downgrade(&self.shared);
            self.subscriptions.push(events.subscribe(event, move |event, state| {
                rerender(&weak, event, state);
            }));
        }
    }

    pub fn is_bound(&self) -> bool {
        !self.subscriptions.is_empty()
    }

    /// Rebuild the handle list for `state`, replacing the previous rendering.
    pub fn render(&self, state: &PaginationState) -> RenderedPaginator {
        self.shared.borrow_mut().render(state)
    }

    /// The most recent rendering, if any.
    pub fn rendered(&self) -> Option<RenderedPaginator> {
        self.shared.borrow().rendered.clone()
    }

    pub fn generation(&self) -> u64 {
        self.shared.borrow().generation
    }

    /// The window for `state` without building handles.
    pub fn window(&self, state: &PaginationState) -> PageWindow {
        self.shared.borrow().layout.window(state)
    }

    /// Activate the handle at `position` in the current rendering.
    pub fn activate<C>(&self, position: usize, collection: &mut C) -> PaginatorResult<bool>
    where
        C: PageableCollection + ?Sized,
    {
        let handle = self
            .shared
            .borrow()
            .rendered
            .as_ref()
            .and_then(|r| r.handles.get(position).cloned())
            .ok_or_else(|| {
                PaginatorError::InvalidState(format!("no page handle at position {}", position))
            })?;
        handle.activate(collection)
    }

    /// Change the collection's page size through the configured page size control.
    pub fn change_page_size(
        &self,
        collection: &mut dyn PageableCollection,
        value: &str,
    ) -> PaginatorResult<()> {
        // Released before the collection re-fetches so the sync re-render can run.
        let control = self.shared.borrow().layout.page_size.clone().ok_or_else(|| {
            PaginatorError::Configuration("no page size options are configured".to_string())
        })?;
        control.change_page_size(collection, value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::EventHub;
    use crate::handle::HandleKind;
    use paginator_core::{ControlOverride, PageBase, PageSize, PageSizeOptionConfig, SlideContext};

    fn state(base: PageBase, last_page: usize, current_page: usize) -> PaginationState {
        let total_pages = last_page + 1 - base.first_page();
        PaginationState::new(
            base,
            last_page,
            current_page,
            total_pages,
            total_pages * 10,
            PageSize::Records(10),
        )
        .unwrap()
    }

    fn labels(rendered: &RenderedPaginator) -> Vec<&str> {
        rendered.handles.iter().map(|h| h.label()).collect()
    }

    struct Collection {
        state: PaginationState,
        events: EventHub,
    }

    impl Collection {
        fn emit(&mut self, event: CollectionEvent) {
            self.events.emit(event, &mut self.state);
        }
    }

    impl PageableCollection for Collection {
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
            self.get_page(self.state.first_page(), true)
        }
        fn get_previous_page(&mut self) -> PaginatorResult<()> {
            self.get_page(self.state.current_page - 1, true)
        }
        fn get_next_page(&mut self) -> PaginatorResult<()> {
            self.get_page(self.state.current_page + 1, true)
        }
        fn get_last_page(&mut self) -> PaginatorResult<()> {
            self.get_page(self.state.last_page, true)
        }
        fn get_page(&mut self, page: usize, _reset: bool) -> PaginatorResult<()> {
            self.state.current_page = page;
            self.emit(CollectionEvent::Sync);
            Ok(())
        }
        fn fetch(&mut self, _reset: bool) -> PaginatorResult<()> {
            self.emit(CollectionEvent::Sync);
            Ok(())
        }
    }

    fn collection(state: PaginationState) -> Collection {
        Collection {
            state,
            events: EventHub::new(),
        }
    }

    #[test]
    fn test_handle_order() {
        let paginator = Paginator::new(PaginatorConfig::default()).unwrap();
        let rendered = paginator.render(&state(PageBase::One, 25, 12));

        assert_eq!(
            labels(&rendered),
            vec!["《", "〈", "11", "12", "13", "14", "15", "16", "17", "18", "19", "20", "〉", "》"]
        );
        assert_eq!(rendered.window, Some(PageWindow { start: 10, end: 20 }));
        assert_eq!(rendered.active_handle().map(|h| h.page()), Some(12));
    }

    #[test]
    fn test_single_page() {
        let paginator = Paginator::new(PaginatorConfig::default()).unwrap();
        let rendered = paginator.render(&state(PageBase::One, 1, 1));

        let indexed: Vec<_> = rendered
            .handles
            .iter()
            .filter(|h| !h.kind().is_fixed())
            .collect();
        assert_eq!(indexed.len(), 1);
        assert!(indexed[0].is_active());
        assert!(rendered
            .handles
            .iter()
            .filter(|h| h.kind().is_fixed())
            .all(|h| h.is_disabled()));
    }

    #[test]
    fn test_at_most_one_active_handle() {
        let paginator = Paginator::new(PaginatorConfig::default()).unwrap();
        for current_page in 1..=40 {
            let rendered = paginator.render(&state(PageBase::One, 40, current_page));
            let active = rendered.handles.iter().filter(|h| h.is_active()).count();
            assert_eq!(active, 1);
            assert!(rendered.handles.iter().all(|h| !(h.is_active() && h.is_disabled())));
        }
    }

    #[test]
    fn test_disabled_controls_are_omitted() {
        let mut config = PaginatorConfig::default();
        config.controls.rewind = ControlOverride::disabled();
        config.controls.fast_forward = ControlOverride::disabled();
        config.window_size = 3;

        let rendered = Paginator::new(config)
            .unwrap()
            .render(&state(PageBase::Zero, 9, 0));
        assert_eq!(labels(&rendered), vec!["〈", "0", "1", "2", "〉"]);
    }

    #[test]
    fn test_without_indexed_handles() {
        let config = PaginatorConfig {
            render_indexed_page_handles: false,
            ..Default::default()
        };
        let rendered = Paginator::new(config)
            .unwrap()
            .render(&state(PageBase::One, 9, 4));

        assert_eq!(rendered.window, None);
        let kinds: Vec<_> = rendered.handles.iter().map(|h| h.kind()).collect();
        assert_eq!(
            kinds,
            vec![
                HandleKind::Rewind,
                HandleKind::Back,
                HandleKind::Forward,
                HandleKind::FastForward
            ]
        );
    }

    #[test]
    fn test_summary_omits_zero_totals() {
        let paginator = Paginator::new(PaginatorConfig::default()).unwrap();

        let rendered = paginator.render(&state(PageBase::One, 5, 1));
        assert_eq!(rendered.summary.total_records.as_ref().unwrap().value, 50);
        assert_eq!(rendered.summary.total_pages.as_ref().unwrap().title, "Total pages:");

        let empty =
            PaginationState::for_records(PageBase::One, 0, PageSize::Records(10), 1).unwrap();
        let rendered = paginator.render(&empty);
        assert!(rendered.summary.is_empty());
        let fast_forward = rendered
            .handles
            .iter()
            .find(|h| h.kind() == HandleKind::FastForward)
            .unwrap();
        assert!(fast_forward.is_disabled());
    }

    #[test]
    fn test_invalid_config_fails_fast() {
        let config = PaginatorConfig {
            window_size: 0,
            ..Default::default()
        };
        assert!(matches!(
            Paginator::new(config),
            Err(PaginatorError::Configuration(_))
        ));

        let config = PaginatorConfig {
            page_size_options: vec![PageSizeOptionConfig::new("many", "Many")],
            ..Default::default()
        };
        assert!(matches!(
            Paginator::new(config),
            Err(PaginatorError::Configuration(_))
        ));
    }

    #[test]
    fn test_page_size_view_rendered_when_configured() {
        let config = PaginatorConfig {
            page_size_options: vec![
                PageSizeOptionConfig::new("10", "10"),
                PageSizeOptionConfig::new("all", "All"),
            ],
            ..Default::default()
        };
        let rendered = Paginator::new(config)
            .unwrap()
            .render(&state(PageBase::One, 5, 1));

        let view = rendered.page_size.unwrap();
        assert_eq!(view.selected().unwrap().value, "10");

        let rendered = Paginator::new(PaginatorConfig::default())
            .unwrap()
            .render(&state(PageBase::One, 5, 1));
        assert!(rendered.page_size.is_none());
    }

    #[test]
    fn test_rerenders_on_sync() {
        let mut collection = collection(state(PageBase::One, 25, 1));
        let paginator = Paginator::builder(PaginatorConfig::default())
            .bind(&collection)
            .unwrap();
        assert_eq!(paginator.generation(), 1);

        collection.get_page(16, true).unwrap();

        let rendered = paginator.rendered().unwrap();
        assert_eq!(rendered.generation, 2);
        assert_eq!(rendered.window, Some(PageWindow { start: 15, end: 25 }));
        assert_eq!(rendered.active_handle().unwrap().page(), 16);
    }

    #[test]
    fn test_activate_navigates_and_rerenders() {
        let mut collection = collection(state(PageBase::One, 25, 1));
        let paginator = Paginator::builder(PaginatorConfig::default())
            .bind(&collection)
            .unwrap();

        // rewind, back, then page "1" at position 2; "5" is position 6
        assert!(paginator.activate(6, &mut collection).unwrap());
        assert_eq!(collection.state.current_page, 5);
        assert_eq!(paginator.rendered().unwrap().active_handle().unwrap().label(), "5");

        // the active "5" handle ignores activation
        assert!(!paginator.activate(6, &mut collection).unwrap());
        assert!(paginator.activate(99, &mut collection).is_err());
    }

    #[test]
    fn test_before_sort_resets_to_first_page() {
        let mut collection = collection(state(PageBase::One, 25, 9));
        let _paginator = Paginator::builder(PaginatorConfig::default())
            .bind(&collection)
            .unwrap();

        collection.emit(CollectionEvent::BeforeSort);
        assert_eq!(collection.state.current_page, 1);
    }

    #[test]
    fn test_before_sort_keeps_page_when_disabled() {
        let mut collection = collection(state(PageBase::One, 25, 9));
        let config = PaginatorConfig {
            go_back_first_on_sort: false,
            ..Default::default()
        };
        let paginator = Paginator::builder(config).bind(&collection).unwrap();

        collection.emit(CollectionEvent::BeforeSort);
        assert_eq!(collection.state.current_page, 9);
        let rendered = paginator.rendered().unwrap();
        assert_eq!(rendered.generation, 2);
        assert_eq!(rendered.active_handle().unwrap().page(), 9);
    }

    #[test]
    fn test_before_sort_rerenders_with_default_config() {
        let mut collection = collection(state(PageBase::One, 25, 18));
        let paginator = Paginator::builder(PaginatorConfig::default())
            .bind(&collection)
            .unwrap();
        assert_eq!(paginator.generation(), 1);

        collection.emit(CollectionEvent::BeforeSort);

        let rendered = paginator.rendered().unwrap();
        assert_eq!(rendered.generation, 2);
        assert_eq!(rendered.active_handle().unwrap().page(), 1);
        assert_eq!(rendered.window, Some(PageWindow { start: 0, end: 10 }));
    }

    #[test]
    fn test_before_sort_in_config_renders_once() {
        let mut collection = collection(state(PageBase::One, 25, 18));
        let config = PaginatorConfig {
            rerender_on: vec![CollectionEvent::Sync, CollectionEvent::BeforeSort],
            ..Default::default()
        };
        let paginator = Paginator::builder(config).bind(&collection).unwrap();

        collection.emit(CollectionEvent::BeforeSort);
        assert_eq!(paginator.generation(), 2);
    }

    #[test]
    fn test_rerender_on_before_sort_sees_reset_page() {
        let mut collection = collection(state(PageBase::One, 25, 18));
        let config = PaginatorConfig {
            rerender_on: vec![CollectionEvent::Sync, CollectionEvent::BeforeSort],
            ..Default::default()
        };
        let paginator = Paginator::builder(config).bind(&collection).unwrap();

        collection.emit(CollectionEvent::BeforeSort);
        let rendered = paginator.rendered().unwrap();
        assert_eq!(rendered.active_handle().unwrap().page(), 1);
    }

    #[test]
    fn test_drop_releases_subscriptions() {
        let collection = collection(state(PageBase::One, 25, 1));
        let paginator = Paginator::builder(PaginatorConfig::default())
            .bind(&collection)
            .unwrap();
        assert!(paginator.is_bound());
        assert_eq!(collection.events.listener_count(), 2);

        drop(paginator);
        assert_eq!(collection.events.listener_count(), 0);
    }

    struct StepByOne;

    impl SlidePolicy for StepByOne {
        fn slide_maybe(&self, ctx: &SlideContext) -> bool {
            ctx.current_page % ctx.window_size > 0
        }

        fn slide_this_much(&self, _ctx: &SlideContext) -> usize {
            1
        }
    }

    #[test]
    fn test_custom_slide_policy() {
        let paginator = Paginator::builder(PaginatorConfig::default())
            .slide_policy(StepByOne)
            .build()
            .unwrap();
        let window = paginator.window(&state(PageBase::One, 25, 12));
        assert_eq!(window, PageWindow { start: 11, end: 21 });
    }

    #[test]
    fn test_change_page_size_without_options() {
        let mut collection = collection(state(PageBase::One, 25, 1));
        let paginator = Paginator::new(PaginatorConfig::default()).unwrap();

        let err = paginator
            .change_page_size(&mut collection, "10")
            .unwrap_err();
        assert!(matches!(err, PaginatorError::Configuration(_)));
    }
}
