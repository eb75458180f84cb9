pub mod app_view;
pub mod detail_panel;
pub mod poke_cell;
pub mod poke_list;

use ratatui::style::Color;

// Re-export core Component trait
pub use tui_dispatch::Component;

pub use app_view::{AppView, AppViewProps};
pub use detail_panel::{DetailPanel, DetailPanelProps, EMPTY_SPRITE_HINT};
pub use poke_cell::{PokeCell, PokeCellProps};
pub use poke_list::{PokeList, PokeListProps};

pub const BG_BASE: Color = Color::Rgb(12, 18, 28);
pub const BG_PANEL: Color = Color::Rgb(20, 32, 46);
pub const BG_HIGHLIGHT: Color = Color::Rgb(28, 92, 110);
pub const TEXT_MAIN: Color = Color::Rgb(232, 242, 244);
pub const TEXT_DIM: Color = Color::Rgb(176, 195, 207);
pub const ACCENT_TEAL: Color = Color::Rgb(72, 204, 184);
pub const ACCENT_GOLD: Color = Color::Rgb(228, 176, 88);
