use crossterm::event::{KeyCode, MouseButton, MouseEventKind};
use ratatui::{
    layout::{Alignment, Position, Rect},
    style::Style,
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use tui_dispatch::EventKind;

use super::poke_cell::{CELL_HEIGHT, CELL_WIDTH};
use super::{Component, PokeCell, PokeCellProps, ACCENT_TEAL, BG_PANEL, TEXT_DIM, TEXT_MAIN};
use crate::action::Action;
use crate::state::AppState;

/// Grid of sprite cells, one per catalog entry, in catalog order.
///
/// Remembers where each cell landed on the last render so clicks can be
/// mapped back to a pokemon id.
#[derive(Debug)]
pub struct PokeList {
    cell_areas: Vec<(u32, Rect)>,
    columns: usize,
    scroll_row: usize,
}

impl Default for PokeList {
    fn default() -> Self {
        Self {
            cell_areas: Vec::new(),
            columns: 1,
            scroll_row: 0,
        }
    }
}

pub struct PokeListProps<'a> {
    pub state: &'a AppState,
    pub is_focused: bool,
}

impl PokeList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cells per row on the last render
    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Id of the cell drawn at (`column`, `row`), if any
    pub fn cell_at(&self, column: u16, row: u16) -> Option<u32> {
        let position = Position::new(column, row);
        self.cell_areas
            .iter()
            .find(|(_, area)| area.contains(position))
            .map(|(id, _)| *id)
    }

    pub fn visible_ids(&self) -> Vec<u32> {
        self.cell_areas.iter().map(|(id, _)| *id).collect()
    }

    fn sync_scroll(&mut self, cursor: usize, visible_rows: usize) {
        let cursor_row = cursor / self.columns;
        if cursor_row < self.scroll_row {
            self.scroll_row = cursor_row;
        } else if cursor_row >= self.scroll_row + visible_rows {
            self.scroll_row = cursor_row + 1 - visible_rows;
        }
    }
}

impl Component<Action> for PokeList {
    type Props<'a> = PokeListProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        if !props.is_focused {
            return None;
        }

        let row_step = self.columns as i32;
        match event {
            EventKind::Key(key) => match key.code {
                KeyCode::Left | KeyCode::Char('h') => Some(Action::CursorMove(-1)),
                KeyCode::Right | KeyCode::Char('l') => Some(Action::CursorMove(1)),
                KeyCode::Up | KeyCode::Char('k') => Some(Action::CursorMove(-row_step)),
                KeyCode::Down | KeyCode::Char('j') => Some(Action::CursorMove(row_step)),
                KeyCode::Home => Some(Action::CursorMove(-(props.state.cursor as i32))),
                KeyCode::End => Some(Action::CursorMove(props.state.catalog_len() as i32)),
                KeyCode::Enter | KeyCode::Char(' ') => Some(Action::CursorActivate),
                KeyCode::Esc => Some(Action::SelectionClear),
                _ => None,
            },
            EventKind::Mouse(mouse) => match mouse.kind {
                MouseEventKind::Down(MouseButton::Left) => self
                    .cell_at(mouse.column, mouse.row)
                    .map(Action::SelectionActivate),
                _ => None,
            },
            EventKind::Scroll { delta, .. } => Some(Action::CursorMove(*delta as i32 * row_step)),
            _ => None,
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let border = if props.is_focused {
            Style::default().fg(ACCENT_TEAL)
        } else {
            Style::default().fg(TEXT_DIM)
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .title("POKEDEX")
            .border_style(border)
            .style(Style::default().bg(BG_PANEL).fg(TEXT_MAIN));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        self.cell_areas.clear();
        let cells = props.state.list_cells();
        if cells.is_empty() {
            let empty = Paragraph::new("No pokemon in catalog")
                .alignment(Alignment::Center)
                .style(Style::default().fg(TEXT_DIM));
            frame.render_widget(empty, inner);
            return;
        }

        self.columns = (inner.width / CELL_WIDTH).max(1) as usize;
        let visible_rows = (inner.height / CELL_HEIGHT).max(1) as usize;
        self.sync_scroll(props.state.cursor, visible_rows);

        let first = self.scroll_row * self.columns;
        let mut cell_widget = PokeCell;
        for (offset, cell) in cells
            .iter()
            .skip(first)
            .take(visible_rows * self.columns)
            .enumerate()
        {
            let col = (offset % self.columns) as u16;
            let row = (offset / self.columns) as u16;
            let cell_area = Rect {
                x: inner.x + col * CELL_WIDTH,
                y: inner.y + row * CELL_HEIGHT,
                width: CELL_WIDTH.min(inner.width),
                height: CELL_HEIGHT.min(inner.height),
            }
            .intersection(inner);
            if cell_area.is_empty() {
                continue;
            }
            self.cell_areas.push((cell.id(), cell_area));
            cell_widget.render(frame, cell_area, PokeCellProps { cell });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::atlas::AtlasGrid;
    use crate::catalog::Catalog;
    use crossterm::event::{KeyEvent, KeyModifiers, MouseEvent};
    use serde_json::json;
    use tui_dispatch::testing::*;

    fn state(count: u32) -> AppState {
        let records = (1..=count)
            .map(|id| {
                json!({
                    "id": id,
                    "name": format!("Mon{id}"),
                    "sprites": { "front_default": format!("{id}.png") }
                })
            })
            .collect();
        AppState::new(Catalog::from_records(records, AtlasGrid::new(40, 30, 4)))
    }

    fn click(column: u16, row: u16) -> EventKind {
        EventKind::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        })
    }

    fn render(list: &mut PokeList, state: &AppState, width: u16, height: u16) -> String {
        let mut render = RenderHarness::new(width, height);
        render.render_to_string_plain(|frame| {
            let props = PokeListProps {
                state,
                is_focused: true,
            };
            list.render(frame, frame.area(), props);
        })
    }

    #[test]
    fn test_render_shows_every_cell() {
        let state = state(3);
        let mut list = PokeList::new();
        let output = render(&mut list, &state, 60, 12);

        assert!(output.contains("#001"));
        assert!(output.contains("Mon3"));
        assert!(output.contains("-80px 0px"));
        assert_eq!(list.visible_ids(), vec![1, 2, 3]);
        assert_eq!(list.columns(), 3);
    }

    #[test]
    fn test_click_maps_to_cell_id() {
        let state = state(3);
        let mut list = PokeList::new();
        render(&mut list, &state, 60, 12);

        // second cell starts one border column in, plus one cell width
        let actions: Vec<_> = list
            .handle_event(
                &click(1 + CELL_WIDTH + 2, 2),
                PokeListProps {
                    state: &state,
                    is_focused: true,
                },
            )
            .into_iter()
            .collect();
        actions.assert_first(Action::SelectionActivate(2));
    }

    #[test]
    fn test_click_outside_cells_ignored() {
        let state = state(1);
        let mut list = PokeList::new();
        render(&mut list, &state, 60, 12);

        let actions: Vec<_> = list
            .handle_event(
                &click(50, 10),
                PokeListProps {
                    state: &state,
                    is_focused: true,
                },
            )
            .into_iter()
            .collect();
        actions.assert_empty();
    }

    #[test]
    fn test_vertical_keys_step_by_row() {
        let state = state(8);
        let mut list = PokeList::new();
        render(&mut list, &state, 2 + CELL_WIDTH * 3, 12);

        let down = KeyEvent::new(KeyCode::Down, KeyModifiers::NONE);
        let actions: Vec<_> = list
            .handle_event(
                &EventKind::Key(down),
                PokeListProps {
                    state: &state,
                    is_focused: true,
                },
            )
            .into_iter()
            .collect();
        actions.assert_first(Action::CursorMove(3));
    }

    #[test]
    fn test_wheel_steps_by_row() {
        let state = state(8);
        let mut list = PokeList::new();
        render(&mut list, &state, 2 + CELL_WIDTH * 3, 12);

        let wheel = |delta: isize| EventKind::Scroll {
            column: 5,
            row: 3,
            delta,
            modifiers: KeyModifiers::NONE,
        };
        let props = || PokeListProps {
            state: &state,
            is_focused: true,
        };

        let down: Vec<_> = list.handle_event(&wheel(1), props()).into_iter().collect();
        down.assert_first(Action::CursorMove(3));

        let up: Vec<_> = list.handle_event(&wheel(-2), props()).into_iter().collect();
        up.assert_first(Action::CursorMove(-6));
    }

    #[test]
    fn test_scrolls_to_keep_cursor_visible() {
        let mut state = state(12);
        state.cursor = 11;
        let mut list = PokeList::new();
        // one visible row of three cells
        render(&mut list, &state, 2 + CELL_WIDTH * 3, 2 + CELL_HEIGHT);

        assert_eq!(list.visible_ids(), vec![10, 11, 12]);
    }

    #[test]
    fn test_unfocused_ignores_keys() {
        let state = state(2);
        let mut list = PokeList::new();
        let enter = KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE);
        let actions: Vec<_> = list
            .handle_event(
                &EventKind::Key(enter),
                PokeListProps {
                    state: &state,
                    is_focused: false,
                },
            )
            .into_iter()
            .collect();
        actions.assert_empty();
    }
}
