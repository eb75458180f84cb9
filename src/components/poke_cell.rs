use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::{Component, ACCENT_GOLD, ACCENT_TEAL, BG_HIGHLIGHT, BG_PANEL, TEXT_DIM, TEXT_MAIN};
use crate::action::Action;
use crate::selection::ListCell;

/// Terminal footprint of one cell, borders included
pub const CELL_WIDTH: u16 = 16;
pub const CELL_HEIGHT: u16 = 4;

/// A single sprite-sheet cell: dex number, name and the sheet shift.
pub struct PokeCell;

pub struct PokeCellProps<'a> {
    pub cell: &'a ListCell<'a>,
}

impl Component<Action> for PokeCell {
    type Props<'a> = PokeCellProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let cell = props.cell;
        let border = if cell.selected {
            Style::default().fg(ACCENT_GOLD).add_modifier(Modifier::BOLD)
        } else if cell.cursor {
            Style::default().fg(ACCENT_TEAL)
        } else {
            Style::default().fg(TEXT_DIM)
        };
        let bg = if cell.selected { BG_HIGHLIGHT } else { BG_PANEL };

        let block = Block::default()
            .borders(Borders::ALL)
            .title(format!("#{:03}", cell.id()))
            .border_style(border)
            .style(Style::default().bg(bg).fg(TEXT_MAIN));

        let lines = vec![
            Line::from(Span::styled(
                cell.descriptor.name.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                cell.offset().background_position(),
                Style::default().fg(TEXT_DIM),
            )),
        ];
        frame.render_widget(Paragraph::new(lines).block(block), area);
    }
}
