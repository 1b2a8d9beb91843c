//! One full search: every panel of the dex screen for a single Pokémon.

use std::sync::Arc;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::api::DataSource;
use crate::error::DexError;
use crate::evolution::{resolve_evolution_chain, ChainOutcome};
use crate::locations::{fetch_locations, LocationReport};
use crate::moves::MoveSet;
use crate::profile::{type_names, PokemonProfile};
use crate::stats::BaseStats;
use crate::typechart::{fetch_type_chart, TypeChart};

/// A report panel that failed on its own without sinking the rest.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub enum Section<T> {
    Ready(T),
    Unavailable(String),
}

impl<T> Section<T> {
    fn from_result(result: Result<T, DexError>, what: &str) -> Self {
        match result {
            Ok(value) => Section::Ready(value),
            Err(error) => {
                tracing::warn!(section = what, %error, "section unavailable");
                Section::Unavailable(format!("Could not load {what}."))
            }
        }
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            Section::Ready(value) => Some(value),
            Section::Unavailable(_) => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct DexReport {
    /// Normalized query that produced this report.
    pub query: String,
    pub profile: PokemonProfile,
    pub stats: BaseStats,
    pub evolution: Section<ChainOutcome>,
    pub type_chart: Section<TypeChart>,
    pub locations: Section<LocationReport>,
    pub moves: MoveSet,
}

pub fn normalize_query(query: &str) -> String {
    query.trim().to_lowercase()
}

pub async fn run_lookup(source: Arc<dyn DataSource>, query: &str) -> Result<DexReport, DexError> {
    let query = normalize_query(query);
    if query.is_empty() {
        return Err(DexError::EmptyQuery);
    }

    let pokemon = source.fetch_pokemon(&query).await.map_err(|error| match error {
        DexError::NotFound(_) => DexError::NotFound(query.clone()),
        other => other,
    })?;
    let species = source.fetch_species(&pokemon.id.to_string()).await?;
    tracing::info!(%query, id = pokemon.id, name = %pokemon.name, "lookup resolved");

    let types = type_names(&pokemon);
    let (evolution, type_chart, locations) = tokio::join!(
        resolve_evolution_chain(&source, &species),
        fetch_type_chart(&source, &types),
        fetch_locations(&source, &pokemon),
    );

    Ok(DexReport {
        profile: PokemonProfile::from_resource(&pokemon),
        stats: BaseStats::from_resource(&pokemon),
        evolution: Section::from_result(evolution, "the evolution chain"),
        type_chart: Section::from_result(type_chart, "the type chart"),
        locations: Section::from_result(locations, "locations"),
        moves: MoveSet::from_resource(&pokemon),
        query,
    })
}

/// User-facing text for a failed lookup.
pub fn describe_failure(query: &str, error: &DexError) -> String {
    match error {
        DexError::NotFound(_) => format!("Pokémon \"{}\" not found.", normalize_query(query)),
        DexError::EmptyQuery => error.to_string(),
        DexError::Transient(_) | DexError::Parse(_) => {
            format!("Connection or processing error ({error}).")
        }
    }
}
