use crate::app::App;
use crate::theme::*;
use paginator_domain::{PageableCollection, RenderedPaginator};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

pub fn render(app: &App, frame: &mut Frame) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(3),
            Constraint::Length(3),
        ])
        .split(frame.area());

    let rendered = app.rendered();
    render_records(app, frame, chunks[0]);
    if let Some(rendered) = rendered.as_ref() {
        render_handles(rendered, app.focus, frame, chunks[1]);
    }
    render_footer(app, rendered.as_ref(), frame, chunks[2]);
}

fn render_records(app: &App, frame: &mut Frame, area: Rect) {
    let items: Vec<ListItem> = app
        .collection
        .page_items()
        .iter()
        .map(|record| {
            ListItem::new(Line::from(vec![
                Span::styled(format!("#{:<6}", record.id), label_text()),
                Span::styled(record.name.clone(), normal_text()),
            ]))
        })
        .collect();

    let state = app.collection.state();
    let title = format!(" Page {} of {} ", state.current_page, state.total_pages);
    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(unfocused_border())
            .title(title),
    );
    frame.render_widget(list, area);
}

/// The handle bar. Pure function of the rendering, so hosts can reuse it.
pub fn handle_line(rendered: &RenderedPaginator, focus: usize) -> Line<'static> {
    let mut spans = Vec::with_capacity(rendered.handles.len() * 2);
    for (position, handle) in rendered.handles.iter().enumerate() {
        if position > 0 {
            spans.push(Span::raw(" "));
        }
        spans.push(Span::styled(
            format!(" {} ", handle.label()),
            handle_style(handle, position == focus),
        ));
    }
    Line::from(spans)
}

fn render_handles(rendered: &RenderedPaginator, focus: usize, frame: &mut Frame, area: Rect) {
    let title = rendered
        .handles
        .get(focus)
        .map(|h| format!(" {} ", h.title()))
        .unwrap_or_default();
    let paragraph = Paragraph::new(handle_line(rendered, focus)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(focused_border())
            .title(title),
    );
    frame.render_widget(paragraph, area);
}

fn render_footer(app: &App, rendered: Option<&RenderedPaginator>, frame: &mut Frame, area: Rect) {
    let mut spans = Vec::new();

    if let Some(rendered) = rendered {
        for entry in [&rendered.summary.total_records, &rendered.summary.total_pages]
            .into_iter()
            .flatten()
        {
            spans.push(Span::styled(format!("{} ", entry.title), label_text()));
            spans.push(Span::styled(format!("{}  ", entry.value), bold_highlight()));
        }
        if let Some(selected) = rendered.page_size.as_ref().and_then(|v| v.selected()) {
            spans.push(Span::styled(format!("[{}]  ", selected.label), normal_text()));
        }
    }

    match &app.status {
        Some(status) => spans.push(Span::styled(status.clone(), error_text())),
        None => spans.push(Span::styled(
            "←/→ focus  enter go  n/p next/prev  g/G first/last  s sort  z page size  q quit",
            label_text(),
        )),
    }

    let paragraph = Paragraph::new(Line::from(spans))
        .block(Block::default().borders(Borders::ALL).border_style(unfocused_border()));
    frame.render_widget(paragraph, area);
}
