use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use super::{Component, ACCENT_GOLD, BG_PANEL, TEXT_DIM, TEXT_MAIN};
use crate::action::Action;
use crate::selection::DetailView;

pub const EMPTY_SPRITE_HINT: &str = "[select a pokemon]";

/// Sprite reference, name, id and type of the selected pokemon.
///
/// With nothing selected the panel keeps its shape: blank sprite, blank
/// name, bare `id:` / `Type:` labels.
pub struct DetailPanel;

pub struct DetailPanelProps<'a> {
    pub view: &'a DetailView,
    pub atlas_path: &'a str,
}

impl Component<Action> for DetailPanel {
    type Props<'a> = DetailPanelProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title("DETAIL")
            .style(Style::default().bg(BG_PANEL).fg(TEXT_MAIN));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let chunks = Layout::vertical([
            Constraint::Length(3), // Sprite
            Constraint::Length(1), // Spacer
            Constraint::Length(1), // Name
            Constraint::Length(1), // Id
            Constraint::Length(1), // Type
            Constraint::Min(0),
        ])
        .split(inner);

        let (sprite, name, id, type_label) = match props.view {
            DetailView::Empty => (
                Line::from(Span::styled(EMPTY_SPRITE_HINT, Style::default().fg(TEXT_DIM))),
                String::new(),
                String::new(),
                String::new(),
            ),
            DetailView::Entry {
                name,
                sprite_url,
                id,
                type_label,
            } => (
                Line::from(vec![
                    Span::styled("sprite ", Style::default().fg(TEXT_DIM)),
                    Span::raw(sprite_url.clone()),
                ]),
                name.clone(),
                id.to_string(),
                type_label.clone(),
            ),
        };

        let sprite_block = Block::default()
            .borders(Borders::ALL)
            .title(format!("atlas {}", props.atlas_path))
            .border_style(Style::default().fg(TEXT_DIM));
        frame.render_widget(
            Paragraph::new(sprite)
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true })
                .block(sprite_block),
            chunks[0],
        );

        let name_line = Line::from(Span::styled(
            name,
            Style::default().fg(ACCENT_GOLD).add_modifier(Modifier::BOLD),
        ));
        frame.render_widget(Paragraph::new(name_line), chunks[2]);
        frame.render_widget(Paragraph::new(field_line("id:", id)), chunks[3]);
        frame.render_widget(Paragraph::new(field_line("Type:", type_label)), chunks[4]);
    }
}

fn field_line(label: &'static str, value: String) -> Line<'static> {
    Line::from(vec![
        Span::styled(label, Style::default().fg(TEXT_DIM)),
        Span::raw(" "),
        Span::raw(value),
    ])
}
