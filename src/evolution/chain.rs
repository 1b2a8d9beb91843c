use std::sync::Arc;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::model::EvolutionNode;
use super::sprites::SpriteResolver;
use super::walk::{walk_chain, RenderSegment};
use crate::api::{DataSource, SpeciesResource};
use crate::error::DexError;
use crate::GENERATION_CUTOFF;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum ChainOutcome {
    Segments(Vec<RenderSegment>),
    /// The species has no evolution-chain reference.
    NoChain,
    /// The chain's base species lies outside the Kanto roster.
    OutOfGeneration,
}

/// Fetches and walks the evolution chain of `species`.
///
/// Only the chain fetch itself can fail; sprite failures inside the walk fall
/// back to the placeholder.
pub async fn resolve_evolution_chain(
    source: &Arc<dyn DataSource>,
    species: &SpeciesResource,
) -> Result<ChainOutcome, DexError> {
    let Some(chain_ref) = &species.evolution_chain else {
        return Ok(ChainOutcome::NoChain);
    };

    let response = source.fetch_evolution_chain(&chain_ref.url).await?;
    let root = EvolutionNode::try_from(&response.chain)?;
    if root.id > GENERATION_CUTOFF {
        tracing::debug!(species = %species.name, base = root.id, "chain outside generation");
        return Ok(ChainOutcome::OutOfGeneration);
    }

    let sprites = SpriteResolver::new(Arc::clone(source));
    let segments = walk_chain(&root, &species.name, &sprites).await;
    Ok(ChainOutcome::Segments(segments))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiResource;
    use crate::memory::MemorySource;
    use serde_json::json;

    const CHAIN_URL: &str = "https://pokeapi.co/api/v2/evolution-chain/10/";

    fn species(name: &str, chain: Option<&str>) -> SpeciesResource {
        SpeciesResource {
            id: 0,
            name: name.to_string(),
            evolution_chain: chain.map(|url| ApiResource {
                url: url.to_string(),
            }),
        }
    }

    fn pichu_chain() -> serde_json::Value {
        json!({
            "chain": {
                "species": { "name": "pichu", "url": "https://pokeapi.co/api/v2/pokemon-species/172/" },
                "evolves_to": [{
                    "species": { "name": "pikachu", "url": "https://pokeapi.co/api/v2/pokemon-species/25/" },
                    "evolution_details": [{ "trigger": { "name": "level-up" }, "min_happiness": 220 }],
                    "evolves_to": []
                }]
            }
        })
    }

    fn pikachu_chain() -> serde_json::Value {
        json!({
            "chain": {
                "species": { "name": "pikachu", "url": "https://pokeapi.co/api/v2/pokemon-species/25/" },
                "evolves_to": [{
                    "species": { "name": "raichu", "url": "https://pokeapi.co/api/v2/pokemon-species/26/" },
                    "evolution_details": [{
                        "trigger": { "name": "use-item" },
                        "item": { "name": "thunder-stone" }
                    }],
                    "evolves_to": []
                }]
            }
        })
    }

    #[tokio::test]
    async fn missing_chain_reference_is_no_chain() {
        let source: Arc<dyn DataSource> = Arc::new(MemorySource::new());
        let outcome = resolve_evolution_chain(&source, &species("ditto", None))
            .await
            .unwrap();
        assert_eq!(outcome, ChainOutcome::NoChain);
    }

    #[tokio::test]
    async fn out_of_generation_base_skips_the_walk() {
        let memory = Arc::new(MemorySource::new().with_resource(CHAIN_URL, pichu_chain()));
        let source: Arc<dyn DataSource> = memory.clone();

        let outcome = resolve_evolution_chain(&source, &species("pikachu", Some(CHAIN_URL)))
            .await
            .unwrap();

        assert_eq!(outcome, ChainOutcome::OutOfGeneration);
        assert_eq!(memory.fetch_count("pokemon/pichu"), 0);
        assert_eq!(memory.fetch_count("pokemon/pikachu"), 0);
    }

    #[tokio::test]
    async fn in_generation_chain_is_walked() {
        let memory = Arc::new(
            MemorySource::new()
                .with_resource(CHAIN_URL, pikachu_chain())
                .with_pokemon(json!({
                    "id": 26,
                    "name": "raichu",
                    "sprites": { "front_default": "https://img.test/26.png" }
                })),
        );
        let source: Arc<dyn DataSource> = memory.clone();

        let outcome = resolve_evolution_chain(&source, &species("raichu", Some(CHAIN_URL)))
            .await
            .unwrap();

        let segments = match outcome {
            ChainOutcome::Segments(segments) => segments,
            other => panic!("expected segments, got {other:?}"),
        };
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[1].transition.as_deref(), Some("Using Thunder Stone"));
        assert!(segments[1].stage.is_searched);
        assert_eq!(segments[1].stage.sprite_url, "https://img.test/26.png");
    }

    #[tokio::test]
    async fn chain_fetch_failure_propagates() {
        let source: Arc<dyn DataSource> =
            Arc::new(MemorySource::new().with_failure(CHAIN_URL));
        let result = resolve_evolution_chain(&source, &species("pikachu", Some(CHAIN_URL))).await;
        assert!(matches!(result, Err(DexError::Transient(_))));
    }
}
