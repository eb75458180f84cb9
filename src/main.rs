//! pokegrid - sprite-atlas grid with a detail panel

use std::cell::RefCell;
use std::io;
use std::path::PathBuf;
use std::rc::Rc;

use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, layout::Rect, Frame, Terminal};
use tui_dispatch::{
    EffectContext, EffectStoreLike, EffectStoreWithMiddleware, EventBus, EventContext, EventKind,
    EventRoutingState, HandlerResponse, Keybindings, RenderContext,
};
use tui_dispatch_debug::debug::DebugLayer;
use tui_dispatch_debug::{
    DebugCliArgs, DebugRunOutput, DebugSession, DebugSessionError, ReplayItem,
};

use pokegrid::action::Action;
use pokegrid::catalog::Catalog;
use pokegrid::components::{AppView, AppViewProps, Component};
use pokegrid::config::{Config, ConfigOverrides};
use pokegrid::effect::Effect;
use pokegrid::logging;
use pokegrid::reducer::reducer;
use pokegrid::state::AppState;

/// Browse a sprite-sheet catalog of pokemon
#[derive(Parser, Debug)]
#[command(name = "pokegrid")]
#[command(about = "Sprite-atlas grid with a detail panel")]
struct Args {
    /// RON config file (values below override it)
    #[arg(long)]
    config: Option<PathBuf>,

    /// JSON file with pokemon records
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Sprite sheet image
    #[arg(long)]
    atlas: Option<PathBuf>,

    /// Sprites per row in the sheet
    #[arg(long)]
    columns: Option<u32>,

    /// Sprite cell width in pixels
    #[arg(long)]
    cell_width: Option<u32>,

    /// Sprite cell height in pixels
    #[arg(long)]
    cell_height: Option<u32>,

    /// Activating the selected entry again clears the selection
    #[arg(long)]
    deselect_on_repeat: bool,

    /// Append logs to this file (filter with POKEGRID_LOG)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Print every entry's sheet offset and exit
    #[arg(long)]
    print_atlas: bool,

    #[command(flatten)]
    debug: DebugCliArgs,
}

#[derive(tui_dispatch::ComponentId, Clone, Copy, PartialEq, Eq, Hash, Debug)]
enum GridComponentId {
    Main,
}

#[derive(tui_dispatch::BindingContext, Clone, Copy, PartialEq, Eq, Hash)]
enum GridContext {
    Main,
}

impl EventRoutingState<GridComponentId, GridContext> for AppState {
    fn focused(&self) -> Option<GridComponentId> {
        Some(GridComponentId::Main)
    }

    fn modal(&self) -> Option<GridComponentId> {
        None
    }

    fn binding_context(&self, id: GridComponentId) -> GridContext {
        match id {
            GridComponentId::Main => GridContext::Main,
        }
    }

    fn default_context(&self) -> GridContext {
        GridContext::Main
    }
}

#[tokio::main]
async fn main() -> io::Result<()> {
    let args = Args::parse();
    logging::init(args.log_file.as_deref())?;

    let overrides = ConfigOverrides {
        catalog: args.catalog,
        atlas: args.atlas,
        columns: args.columns,
        cell_width: args.cell_width,
        cell_height: args.cell_height,
        deselect_on_repeat: args.deselect_on_repeat,
    };
    let config = match Config::resolve(args.config.as_deref(), overrides) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    if args.print_atlas {
        return print_atlas(&config);
    }

    let debug = DebugSession::new(args.debug);
    let state = debug
        .load_state_or_else_async(move || async move {
            let loaded = Catalog::load(&config.catalog, config.grid);
            if let Err(e) = &loaded {
                tracing::error!(error = %e, "catalog load failed");
            }
            Ok::<AppState, io::Error>(AppState::from_load(loaded, &config))
        })
        .await
        .map_err(debug_error)?;

    let replay_actions = debug.load_replay_items().map_err(debug_error)?;
    let (middleware, action_recorder) = debug.middleware_with_recorder();
    let store = EffectStoreWithMiddleware::new(state, reducer, middleware);

    // ===== Terminal setup =====
    let use_alt_screen = debug.use_alt_screen();
    let mut stdout = io::stdout();
    if use_alt_screen {
        enable_raw_mode()?;
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &debug, store, replay_actions).await;

    // ===== Cleanup =====
    if use_alt_screen {
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;
    }

    let run_output = result?;
    run_output.write_render_output()?;
    debug
        .save_actions(action_recorder.as_ref())
        .map_err(debug_error)?;

    Ok(())
}

fn print_atlas(config: &Config) -> io::Result<()> {
    let catalog = match Catalog::load(&config.catalog, config.grid) {
        Ok(catalog) => catalog,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };
    for entry in &catalog {
        println!(
            "{:>4}  {:<16} {}",
            entry.id,
            entry.name,
            entry.atlas_offset.background_position()
        );
    }
    for record in catalog.rejected() {
        eprintln!("skipped: {}", record.to_error());
    }
    Ok(())
}

struct GridUi {
    view: AppView,
}

impl GridUi {
    fn new() -> Self {
        Self {
            view: AppView::new(),
        }
    }

    fn render(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        state: &AppState,
        render_ctx: RenderContext,
        event_ctx: &mut EventContext<GridComponentId>,
    ) {
        event_ctx.set_component_area(GridComponentId::Main, area);
        let props = AppViewProps {
            state,
            is_focused: render_ctx.is_focused(),
        };
        self.view.render(frame, area, props);
    }

    fn handle_event(&mut self, event: &EventKind, state: &AppState) -> HandlerResponse<Action> {
        let props = AppViewProps {
            state,
            is_focused: true,
        };
        let actions: Vec<_> = self.view.handle_event(event, props).into_iter().collect();
        if actions.is_empty() {
            HandlerResponse::ignored()
        } else {
            HandlerResponse {
                actions,
                consumed: true,
                needs_render: false,
            }
        }
    }
}

fn debug_error(error: DebugSessionError) -> io::Error {
    io::Error::other(format!("debug session error: {error}"))
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    debug: &DebugSession,
    store: impl EffectStoreLike<AppState, Action, Effect>,
    replay_actions: Vec<ReplayItem<Action>>,
) -> io::Result<DebugRunOutput<AppState>> {
    let ui = Rc::new(RefCell::new(GridUi::new()));
    let mut bus: EventBus<AppState, Action, GridComponentId, GridContext> = EventBus::new();
    let keybindings: Keybindings<GridContext> = Keybindings::new();

    let ui_main = Rc::clone(&ui);
    bus.register(GridComponentId::Main, move |event, state| {
        ui_main.borrow_mut().handle_event(&event.kind, state)
    });

    bus.register_global(|event, _state| match event.kind {
        EventKind::Resize(width, height) => {
            HandlerResponse::action(Action::UiResize(width, height)).with_render()
        }
        _ => HandlerResponse::ignored(),
    });

    debug
        .run_effect_app_with_bus(
            terminal,
            store,
            DebugLayer::simple(),
            replay_actions,
            Some(Action::Init),
            Some(Action::Quit),
            |_runtime| {},
            &mut bus,
            &keybindings,
            |frame, area, state, render_ctx, event_ctx| {
                ui.borrow_mut()
                    .render(frame, area, state, render_ctx, event_ctx);
            },
            |action| matches!(action, Action::Quit),
            handle_effect,
        )
        .await
}

/// Effects only carry diagnostics; they are written to the log.
fn handle_effect(effect: Effect, _ctx: &mut EffectContext<Action>) {
    match effect {
        Effect::ReportRejected { rejected } => {
            tracing::warn!(count = rejected.len(), "catalog records skipped");
            for record in rejected {
                tracing::warn!("{}", record.to_error());
            }
        }
        Effect::ReportUnavailable { error } => {
            tracing::error!(%error, "running without a catalog");
        }
        Effect::ReportMissingEntry { id } => {
            tracing::warn!(id, "selection named an id missing from the catalog");
        }
        Effect::SelectionDidChange { id } => {
            tracing::debug!(?id, "selection changed");
        }
    }
}
