use crate::events::{self, Event, EventHandler};
use crate::ui;
use crossterm::event::{KeyCode, KeyEvent};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use paginator_core::{
    PageBase, PageSize, PageSizeOptionConfig, PaginatorConfig, PaginatorResult,
};
use paginator_domain::{
    HandleKind, InMemoryCollection, PageableCollection, Paginator, RenderedPaginator,
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;

/// A row of the browsed collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub id: usize,
    pub name: String,
}

impl Record {
    pub fn generate(count: usize) -> Vec<Self> {
        (1..=count)
            .map(|id| Self {
                id,
                name: format!("Record {:>5}", id),
            })
            .collect()
    }
}

fn default_page_size_options() -> Vec<PageSizeOptionConfig> {
    ["10", "25", "50", "100"]
        .into_iter()
        .map(|size| PageSizeOptionConfig::new(size, format!("{} per page", size)))
        .chain(std::iter::once(PageSizeOptionConfig::new("all", "All")))
        .collect()
}

pub struct App {
    pub collection: InMemoryCollection<Record>,
    pub paginator: Paginator,
    /// Position of the focused handle in the current rendering.
    pub focus: usize,
    pub sort_descending: bool,
    pub status: Option<String>,
    pub should_quit: bool,
}

impl App {
    pub fn new(
        mut config: PaginatorConfig,
        records: Vec<Record>,
        base: PageBase,
        page_size: PageSize,
    ) -> PaginatorResult<Self> {
        if config.page_size_options.is_empty() {
            config.page_size_options = default_page_size_options();
        }
        let collection = InMemoryCollection::new(records, base, page_size)?;
        let paginator = Paginator::builder(config).bind(&collection)?;

        let mut app = Self {
            collection,
            paginator,
            focus: 0,
            sort_descending: false,
            status: None,
            should_quit: false,
        };
        app.focus_active();
        Ok(app)
    }

    pub fn rendered(&self) -> Option<RenderedPaginator> {
        self.paginator.rendered()
    }

    fn handle_count(&self) -> usize {
        self.rendered().map(|r| r.handles.len()).unwrap_or(0)
    }

    fn focus_active(&mut self) {
        if let Some(position) = self
            .rendered()
            .and_then(|r| r.handles.iter().position(|h| h.is_active()))
        {
            self.focus = position;
        }
    }

    fn report<T>(&mut self, result: PaginatorResult<T>) -> Option<T> {
        match result {
            Ok(value) => {
                self.status = None;
                Some(value)
            }
            Err(e) => {
                tracing::error!("Pagination failed: {}", e);
                self.status = Some(e.to_string());
                None
            }
        }
    }

    fn activate(&mut self, position: usize) {
        let result = self.paginator.activate(position, &mut self.collection);
        if let Some(true) = self.report(result) {
            self.focus_active();
        }
    }

    fn activate_kind(&mut self, kind: HandleKind) {
        let position = self
            .rendered()
            .and_then(|r| r.handles.iter().position(|h| h.kind() == kind));
        if let Some(position) = position {
            self.activate(position);
        }
    }

    fn cycle_page_size(&mut self) {
        let Some(value) = self
            .rendered()
            .and_then(|r| r.page_size)
            .and_then(|view| view.next_value().map(str::to_string))
        else {
            return;
        };
        tracing::info!("Switching page size to {}", value);
        let result = self
            .paginator
            .change_page_size(&mut self.collection, &value);
        self.report(result);
        self.focus_active();
    }

    fn toggle_sort(&mut self) {
        self.sort_descending = !self.sort_descending;
        let descending = self.sort_descending;
        let result = self.collection.sort_by(|a, b| {
            if descending {
                b.id.cmp(&a.id)
            } else {
                a.id.cmp(&b.id)
            }
        });
        self.report(result);
        self.focus_active();
    }

    pub fn handle_key_event(&mut self, key: KeyEvent) {
        if events::should_quit(&key) {
            self.should_quit = true;
            return;
        }

        match key.code {
            KeyCode::Left | KeyCode::Char('h') => {
                self.focus = self.focus.saturating_sub(1);
            }
            KeyCode::Right | KeyCode::Char('l') => {
                let last = self.handle_count().saturating_sub(1);
                self.focus = (self.focus + 1).min(last);
            }
            KeyCode::Enter | KeyCode::Char(' ') => self.activate(self.focus),
            KeyCode::Char('n') | KeyCode::PageDown => self.activate_kind(HandleKind::Forward),
            KeyCode::Char('p') | KeyCode::PageUp => self.activate_kind(HandleKind::Back),
            KeyCode::Char('g') | KeyCode::Home => self.activate_kind(HandleKind::Rewind),
            KeyCode::Char('G') | KeyCode::End => self.activate_kind(HandleKind::FastForward),
            KeyCode::Char('s') => self.toggle_sort(),
            KeyCode::Char('z') => self.cycle_page_size(),
            _ => {}
        }
    }

    pub async fn run(&mut self) -> anyhow::Result<()> {
        let mut terminal = setup_terminal()?;
        let mut events = EventHandler::new();

        while !self.should_quit {
            terminal.draw(|frame| ui::render(self, frame))?;

            match events.next().await {
                Some(Event::Key(key)) => self.handle_key_event(key),
                Some(Event::Tick) => {}
                None => break,
            }
        }

        events.stop();
        restore_terminal(&mut terminal)?;
        Ok(())
    }
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>, io::Error> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    Terminal::new(backend)
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<(), io::Error> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn app(count: usize) -> App {
        App::new(
            PaginatorConfig::default(),
            Record::generate(count),
            PageBase::One,
            PageSize::Records(10),
        )
        .unwrap()
    }

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key_event(KeyEvent::new(code, KeyModifiers::NONE));
    }

    #[test]
    fn test_starts_focused_on_first_page() {
        let app = app(95);
        let rendered = app.rendered().unwrap();
        assert_eq!(rendered.handles[app.focus].label(), "1");
    }

    #[test]
    fn test_forward_and_back_keys() {
        let mut app = app(95);

        press(&mut app, KeyCode::Char('n'));
        press(&mut app, KeyCode::Char('n'));
        assert_eq!(app.collection.state().current_page, 3);

        press(&mut app, KeyCode::Char('p'));
        assert_eq!(app.collection.state().current_page, 2);

        press(&mut app, KeyCode::End);
        assert_eq!(app.collection.state().current_page, 10);
        assert_eq!(app.collection.page_items().len(), 5);
    }

    #[test]
    fn test_focus_and_activate() {
        let mut app = app(95);

        press(&mut app, KeyCode::Right);
        press(&mut app, KeyCode::Right);
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.collection.state().current_page, 3);
        let rendered = app.rendered().unwrap();
        assert!(rendered.handles[app.focus].is_active());
    }

    #[test]
    fn test_disabled_control_leaves_state_alone() {
        let mut app = app(95);
        press(&mut app, KeyCode::Char('p'));

        assert_eq!(app.collection.state().current_page, 1);
        assert!(app.status.is_none());
    }

    #[test]
    fn test_cycle_page_size() {
        let mut app = app(95);
        press(&mut app, KeyCode::Char('n'));

        press(&mut app, KeyCode::Char('z'));
        assert_eq!(app.collection.state().page_size, PageSize::Records(25));
        assert_eq!(app.collection.state().current_page, 1);
        assert_eq!(app.collection.state().total_pages, 4);
    }

    #[test]
    fn test_cycle_page_size_follows_rendered_options() {
        let mut app = app(95);
        let expected = [
            PageSize::Records(25),
            PageSize::Records(50),
            PageSize::Records(100),
            PageSize::All,
            PageSize::Records(10),
        ];

        for size in expected {
            press(&mut app, KeyCode::Char('z'));
            assert_eq!(app.collection.state().page_size, size);
            let view = app.rendered().unwrap().page_size.unwrap();
            assert_eq!(view.selected().unwrap().value, size.to_string());
        }
    }

    #[test]
    fn test_sort_returns_to_first_page() {
        let mut app = app(95);
        press(&mut app, KeyCode::End);

        press(&mut app, KeyCode::Char('s'));
        assert_eq!(app.collection.state().current_page, 1);
        assert_eq!(app.collection.page_items()[0].id, 95);
    }

    #[test]
    fn test_quit() {
        let mut app = app(5);
        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit);
    }
}
