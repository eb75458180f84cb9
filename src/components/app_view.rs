use crossterm::event::KeyCode;
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};
use tui_dispatch::EventKind;
use tui_dispatch_components::{
    StatusBar, StatusBarHint, StatusBarItem, StatusBarProps, StatusBarSection, StatusBarStyle,
};

use super::{
    Component, DetailPanel, DetailPanelProps, PokeList, PokeListProps, ACCENT_GOLD, ACCENT_TEAL,
    BG_BASE, TEXT_DIM, TEXT_MAIN,
};
use crate::action::Action;
use crate::state::AppState;

pub struct AppViewProps<'a> {
    pub state: &'a AppState,
    pub is_focused: bool,
}

/// Top-level container: header, sprite grid, detail panel, status bar.
///
/// Both panels read from the same state; neither keeps its own copy of the
/// selection.
pub struct AppView {
    list: PokeList,
    status_bar: StatusBar,
}

impl AppView {
    pub fn new() -> Self {
        Self {
            list: PokeList::new(),
            status_bar: StatusBar::new(),
        }
    }

    pub fn list(&self) -> &PokeList {
        &self.list
    }
}

impl Default for AppView {
    fn default() -> Self {
        Self::new()
    }
}

impl Component<Action> for AppView {
    type Props<'a> = AppViewProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        if !props.is_focused {
            return Vec::new();
        }
        if let EventKind::Key(key) = event {
            if key.code == KeyCode::Char('q') {
                return vec![Action::Quit];
            }
        }
        if !props.state.catalog.is_loaded() {
            return Vec::new();
        }
        self.list
            .handle_event(
                event,
                PokeListProps {
                    state: props.state,
                    is_focused: true,
                },
            )
            .into_iter()
            .collect()
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let state = props.state;
        frame.render_widget(Block::default().style(Style::default().bg(BG_BASE)), area);

        let chunks = Layout::vertical([
            Constraint::Length(1), // Header
            Constraint::Min(4),    // Body
            Constraint::Length(1), // Status bar
        ])
        .split(area);

        render_header(frame, chunks[0], state);

        if let Some(error) = state.catalog.error() {
            render_unavailable(frame, chunks[1], error);
        } else {
            let body = Layout::horizontal([Constraint::Percentage(60), Constraint::Percentage(40)])
                .split(chunks[1]);
            self.list.render(
                frame,
                body[0],
                PokeListProps {
                    state,
                    is_focused: props.is_focused,
                },
            );
            let view = state.detail_view();
            let mut detail = DetailPanel;
            detail.render(
                frame,
                body[1],
                DetailPanelProps {
                    view: &view,
                    atlas_path: &state.atlas_path,
                },
            );
        }

        let message = state.message.clone().unwrap_or_default();
        let status_items = [StatusBarItem::span(Span::styled(
            message,
            Style::default().fg(ACCENT_GOLD),
        ))];
        <StatusBar as Component<Action>>::render(
            &mut self.status_bar,
            frame,
            chunks[2],
            StatusBarProps {
                left: StatusBarSection::items(&status_items),
                center: StatusBarSection::hints(&[
                    StatusBarHint::new("arrows", "move"),
                    StatusBarHint::new("enter", "select"),
                    StatusBarHint::new("esc", "clear"),
                    StatusBarHint::new("q", "quit"),
                ]),
                right: StatusBarSection::empty(),
                style: StatusBarStyle::default(),
                is_focused: false,
            },
        );
    }
}

fn render_header(frame: &mut Frame, area: Rect, state: &AppState) {
    let mut spans = vec![Span::styled(
        "POKEGRID",
        Style::default().fg(ACCENT_TEAL).add_modifier(Modifier::BOLD),
    )];
    if let Some(catalog) = state.catalog() {
        let grid = catalog.grid();
        spans.push(Span::styled(
            format!(
                "  {} entries  {}x{}px x{} cols",
                catalog.len(),
                grid.cell_width,
                grid.cell_height,
                grid.columns
            ),
            Style::default().fg(TEXT_DIM),
        ));
        if !catalog.rejected().is_empty() {
            spans.push(Span::styled(
                format!("  {} skipped", catalog.rejected().len()),
                Style::default().fg(ACCENT_GOLD),
            ));
        }
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_unavailable(frame: &mut Frame, area: Rect, error: &str) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title("ERROR")
        .style(Style::default().fg(TEXT_MAIN));
    let text = vec![
        Line::from(Span::styled(
            "Catalog unavailable",
            Style::default().fg(ACCENT_GOLD).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(error.to_string()),
        Line::from(""),
        Line::from(Span::styled("q to quit", Style::default().fg(TEXT_DIM))),
    ];
    frame.render_widget(
        Paragraph::new(text)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(block),
        area,
    );
}
