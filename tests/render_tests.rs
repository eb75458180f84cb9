//! Render tests using RenderHarness and EffectStoreTestHarness

use crossterm::event::{KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use pokegrid::{
    action::Action,
    atlas::AtlasGrid,
    catalog::Catalog,
    components::{AppView, AppViewProps, Component, EMPTY_SPRITE_HINT},
    reducer::reducer,
    selection::Selection,
    state::AppState,
};
use serde_json::json;
use tui_dispatch::testing::*;
use tui_dispatch::{DataResource, EventKind, NumericComponentId};

fn kanto() -> AppState {
    let records = [
        (1, "Bulbasaur", "grass"),
        (4, "Charmander", "fire"),
        (7, "Squirtle", "water"),
    ]
    .into_iter()
    .map(|(id, name, kind)| {
        json!({
            "id": id,
            "name": name,
            "sprites": { "front_default": format!("{id}.png") },
            "types": [{ "slot": 1, "type": { "name": kind } }]
        })
    })
    .collect();
    AppState::new(Catalog::from_records(records, AtlasGrid::new(40, 30, 2)))
}

fn render_app(view: &mut AppView, state: &AppState) -> String {
    let mut render = RenderHarness::new(100, 24);
    render.render_to_string_plain(|frame| {
        let props = AppViewProps {
            state,
            is_focused: true,
        };
        view.render(frame, frame.area(), props);
    })
}

#[test]
fn test_render_initial_grid_and_empty_detail() {
    let mut view = AppView::new();
    let output = render_app(&mut view, &kanto());

    assert!(output.contains("Bulbasaur"));
    assert!(output.contains("Charmander"));
    assert!(output.contains("Squirtle"));
    assert!(output.contains(EMPTY_SPRITE_HINT), "empty detail:\n{output}");
    assert!(output.contains("Type:"));
}

#[test]
fn test_render_offsets_per_cell() {
    let mut view = AppView::new();
    let output = render_app(&mut view, &kanto());

    // two sheet columns: third entry wraps to the second sheet row
    assert!(output.contains("-40px 0px"));
    assert!(output.contains("0px -30px"));
}

#[test]
fn test_render_selected_detail() {
    let mut view = AppView::new();
    let state = AppState {
        selection: Selection::Selected(4),
        ..kanto()
    };
    let output = render_app(&mut view, &state);

    assert!(output.contains("id: 4"));
    assert!(output.contains("Type: fire"));
    assert!(output.contains("4.png"));
    assert!(!output.contains(EMPTY_SPRITE_HINT));
}

#[test]
fn test_render_status_hints() {
    let mut view = AppView::new();
    let output = render_app(&mut view, &kanto());

    assert!(output.contains("select"));
    assert!(output.contains("quit"));
}

#[test]
fn test_render_skipped_records_in_header() {
    let catalog = Catalog::from_records(
        vec![
            json!({ "id": 1, "name": "Bulbasaur", "sprites": { "front_default": "a.png" } }),
            json!({ "id": 3 }),
        ],
        AtlasGrid::default(),
    );
    let mut view = AppView::new();
    let output = render_app(&mut view, &AppState::new(catalog));

    assert!(output.contains("1 skipped"));
}

#[test]
fn test_render_unavailable_catalog() {
    let mut view = AppView::new();
    let state = AppState {
        catalog: DataResource::Failed("catalog unavailable (dex.json): not found".into()),
        ..Default::default()
    };
    let output = render_app(&mut view, &state);

    assert!(output.contains("Catalog unavailable"));
    assert!(output.contains("not found"));
}

#[test]
fn test_click_selects_and_detail_follows() {
    let initial = kanto();
    let mut harness = EffectStoreTestHarness::new(initial.clone(), reducer);
    let mut view = AppView::new();

    harness.render_plain(100, 24, |frame, area, state| {
        view.render(
            frame,
            area,
            AppViewProps {
                state,
                is_focused: true,
            },
        );
    });

    let squirtle = view.list().visible_ids().iter().position(|id| *id == 7);
    assert_eq!(squirtle, Some(2));

    let (column, row) = (0..100u16)
        .flat_map(|x| (0..24u16).map(move |y| (x, y)))
        .find(|(x, y)| view.list().cell_at(*x, *y) == Some(7))
        .expect("squirtle cell on screen");

    let click = EventKind::Mouse(MouseEvent {
        kind: MouseEventKind::Down(MouseButton::Left),
        column,
        row,
        modifiers: KeyModifiers::NONE,
    });
    let actions: Vec<_> = view
        .handle_event(
            &click,
            AppViewProps {
                state: &initial,
                is_focused: true,
            },
        )
        .into_iter()
        .collect();
    actions.assert_first(Action::SelectionActivate(7));

    for action in actions {
        harness.dispatch_collect(action);
    }
    harness.assert_state(|s| s.selection == Selection::Selected(7));

    let output = harness.render_plain(100, 24, |frame, area, state| {
        view.render(
            frame,
            area,
            AppViewProps {
                state,
                is_focused: true,
            },
        );
    });
    assert!(output.contains("Type: water"), "detail follows click:\n{output}");
}

#[test]
fn test_keys_move_cursor_and_select() {
    let mut harness = EffectStoreTestHarness::new(kanto(), reducer);
    let mut view = AppView::new();

    let actions = harness.send_keys::<NumericComponentId, _, _>("l l", |state, event| {
        let props = AppViewProps {
            state,
            is_focused: true,
        };
        view.handle_event(&event.kind, props)
            .into_iter()
            .collect::<Vec<_>>()
    });
    actions.assert_count(2);

    for action in actions {
        harness.dispatch_collect(action);
    }
    harness.dispatch_collect(Action::CursorActivate);

    harness.assert_state(|s| s.cursor == 2);
    harness.assert_state(|s| s.selection == Selection::Selected(7));
}
