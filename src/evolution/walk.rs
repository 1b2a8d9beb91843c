use futures_util::future::join_all;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::detail::format_transition;
use super::model::{EvolutionEdge, EvolutionNode};
use super::sprites::SpriteResolver;
use crate::GENERATION_CUTOFF;

/// One species as it appears in a rendered chain.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Stage {
    pub name: String,
    pub id: u32,
    pub sprite_url: String,
    /// The species the user searched for, highlighted by the UI.
    pub is_searched: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct RenderSegment {
    pub stage: Stage,
    /// Condition text for the incoming edge; `None` only for the root.
    pub transition: Option<String>,
    /// Part of a multi-way split.
    pub branch: bool,
    /// First segment of a multi-way split.
    pub opens_branch: bool,
}

/// Flattens a chain into display order.
///
/// Linear stretches are followed to their end. At the first node with more
/// than one in-generation child every child becomes a branch leaf and the
/// walk stops there; deeper splits are not followed.
pub async fn walk_chain(
    root: &EvolutionNode,
    searched: &str,
    sprites: &SpriteResolver,
) -> Vec<RenderSegment> {
    let mut segments = Vec::new();
    if !in_generation(root) {
        return segments;
    }

    let mut current = root;
    let mut transition = None;
    loop {
        segments.push(RenderSegment {
            stage: stage(current, searched, sprites).await,
            transition: transition.take(),
            branch: false,
            opens_branch: false,
        });

        let next: Vec<&EvolutionEdge> = current
            .edges
            .iter()
            .filter(|edge| in_generation(&edge.target))
            .collect();

        match next.as_slice() {
            [] => break,
            &[edge] => {
                transition = Some(format_transition(edge));
                current = &edge.target;
            }
            edges => {
                let stages =
                    join_all(edges.iter().map(|edge| stage(&edge.target, searched, sprites)))
                        .await;
                segments.extend(edges.iter().zip(stages).enumerate().map(
                    |(index, (edge, stage))| RenderSegment {
                        stage,
                        transition: Some(format_transition(edge)),
                        branch: true,
                        opens_branch: index == 0,
                    },
                ));
                break;
            }
        }
    }
    segments
}

fn in_generation(node: &EvolutionNode) -> bool {
    node.id <= GENERATION_CUTOFF
}

async fn stage(node: &EvolutionNode, searched: &str, sprites: &SpriteResolver) -> Stage {
    Stage {
        name: node.name.clone(),
        id: node.id,
        sprite_url: sprites.resolve(&node.name).await,
        is_searched: node.name == searched,
    }
}
