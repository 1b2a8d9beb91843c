pub mod dex_screen;
pub mod evolution_view;
pub mod guide_view;
pub mod report_view;
pub mod search_overlay;
pub mod sprite_view;
pub mod theme;

// Re-export core Component trait
pub use tui_dispatch::Component;

pub use dex_screen::{DexScreen, DexScreenProps};
pub use evolution_view::{segment_line, EvolutionView, EvolutionViewProps};
pub use guide_view::{guide_text, GuideView, GuideViewProps};
pub use report_view::{ReportView, ReportViewProps};
pub use search_overlay::{SearchOverlay, SearchOverlayProps};
pub use sprite_view::{render_sprite, sprite_fit, HalfBlockSprite};
