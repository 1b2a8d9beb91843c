//! Evolution chains: tree model, condition text, sprite lookup and the walk
//! that flattens a chain into display segments.

mod chain;
mod detail;
mod model;
mod sprites;
mod walk;

pub use chain::{resolve_evolution_chain, ChainOutcome};
pub use detail::{format_evolution_detail, format_transition};
pub use model::{EvolutionDetail, EvolutionEdge, EvolutionNode, EvolutionTrigger, Gender};
pub use sprites::{SpriteResolver, SPRITE_PLACEHOLDER};
pub use walk::{walk_chain, RenderSegment, Stage};
