use std::sync::OnceLock;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::DexError;

pub const DEFAULT_API_BASE: &str = "https://pokeapi.co/api/v2";

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct NamedResource {
    pub name: String,
    #[serde(default)]
    pub url: String,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct ApiResource {
    pub url: String,
}

#[derive(Clone, Debug, Deserialize)]
struct ListResponse {
    results: Vec<NamedResource>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct PokemonResource {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub height: u32,
    #[serde(default)]
    pub weight: u32,
    #[serde(default)]
    pub types: Vec<PokemonTypeSlot>,
    #[serde(default)]
    pub stats: Vec<PokemonStatSlot>,
    #[serde(default)]
    pub moves: Vec<PokemonMoveSlot>,
    #[serde(default)]
    pub sprites: PokemonSprites,
    pub location_area_encounters: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct PokemonSprites {
    pub front_default: Option<String>,
    pub front_shiny: Option<String>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct PokemonTypeSlot {
    #[serde(rename = "type")]
    pub type_info: NamedResource,
}

#[derive(Clone, Debug, Deserialize)]
pub struct PokemonStatSlot {
    pub base_stat: u32,
    pub stat: NamedResource,
}

#[derive(Clone, Debug, Deserialize)]
pub struct PokemonMoveSlot {
    #[serde(rename = "move")]
    pub move_info: NamedResource,
    #[serde(default)]
    pub version_group_details: Vec<VersionGroupDetail>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct VersionGroupDetail {
    #[serde(default)]
    pub level_learned_at: u32,
    pub move_learn_method: NamedResource,
    pub version_group: NamedResource,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct SpeciesResource {
    #[serde(default)]
    pub id: u32,
    pub name: String,
    pub evolution_chain: Option<ApiResource>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct EvolutionChainResource {
    pub chain: ChainLink,
}

#[derive(Clone, Debug, Deserialize)]
pub struct ChainLink {
    pub species: NamedResource,
    #[serde(default)]
    pub evolution_details: Vec<EvolutionDetailResource>,
    #[serde(default)]
    pub evolves_to: Vec<ChainLink>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct EvolutionDetailResource {
    pub trigger: NamedResource,
    pub min_level: Option<u32>,
    pub min_happiness: Option<u32>,
    pub time_of_day: Option<String>,
    pub held_item: Option<NamedResource>,
    pub known_move: Option<NamedResource>,
    pub gender: Option<u8>,
    pub item: Option<NamedResource>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct TypeResource {
    pub name: String,
    pub damage_relations: DamageRelations,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct DamageRelations {
    #[serde(default)]
    pub double_damage_from: Vec<NamedResource>,
    #[serde(default)]
    pub double_damage_to: Vec<NamedResource>,
    #[serde(default)]
    pub half_damage_from: Vec<NamedResource>,
    #[serde(default)]
    pub half_damage_to: Vec<NamedResource>,
    #[serde(default)]
    pub no_damage_from: Vec<NamedResource>,
    #[serde(default)]
    pub no_damage_to: Vec<NamedResource>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct EncounterResource {
    pub location_area: NamedResource,
    #[serde(default)]
    pub version_details: Vec<EncounterVersionResource>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct EncounterVersionResource {
    pub version: NamedResource,
    #[serde(default)]
    pub encounter_details: Vec<EncounterDetailResource>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct EncounterDetailResource {
    pub min_level: u32,
    pub max_level: u32,
    pub method: NamedResource,
}

/// Everything the lookup core needs from PokeAPI.
#[async_trait]
pub trait DataSource: Send + Sync {
    async fn fetch_pokemon(&self, name_or_id: &str) -> Result<PokemonResource, DexError>;

    async fn fetch_species(&self, name_or_id: &str) -> Result<SpeciesResource, DexError>;

    async fn fetch_evolution_chain(&self, url: &str) -> Result<EvolutionChainResource, DexError>;

    async fn fetch_type(&self, name: &str) -> Result<TypeResource, DexError>;

    async fn fetch_encounters(&self, url: &str) -> Result<Vec<EncounterResource>, DexError>;

    /// Names of the first `limit` Pokémon in national dex order.
    async fn fetch_name_roster(&self, limit: u32) -> Result<Vec<String>, DexError>;

    /// Raw image bytes behind a sprite URL.
    async fn fetch_image(&self, url: &str) -> Result<Vec<u8>, DexError>;
}

#[derive(Clone, Debug)]
pub struct PokeApiClient {
    base: String,
}

impl PokeApiClient {
    pub fn new(base: impl Into<String>) -> Self {
        let base = base.into();
        Self {
            base: base.trim_end_matches('/').to_string(),
        }
    }

    fn endpoint(&self, kind: &str, name: &str) -> String {
        format!("{}/{kind}/{}", self.base, urlencoding::encode(name))
    }
}

impl Default for PokeApiClient {
    fn default() -> Self {
        Self::new(DEFAULT_API_BASE)
    }
}

#[async_trait]
impl DataSource for PokeApiClient {
    async fn fetch_pokemon(&self, name_or_id: &str) -> Result<PokemonResource, DexError> {
        fetch_json(&self.endpoint("pokemon", name_or_id)).await
    }

    async fn fetch_species(&self, name_or_id: &str) -> Result<SpeciesResource, DexError> {
        fetch_json(&self.endpoint("pokemon-species", name_or_id)).await
    }

    async fn fetch_evolution_chain(&self, url: &str) -> Result<EvolutionChainResource, DexError> {
        fetch_json(url).await
    }

    async fn fetch_type(&self, name: &str) -> Result<TypeResource, DexError> {
        fetch_json(&self.endpoint("type", name)).await
    }

    async fn fetch_encounters(&self, url: &str) -> Result<Vec<EncounterResource>, DexError> {
        fetch_json(url).await
    }

    async fn fetch_name_roster(&self, limit: u32) -> Result<Vec<String>, DexError> {
        let url = format!("{}/pokemon?limit={limit}", self.base);
        let response: ListResponse = fetch_json(&url).await?;
        Ok(response
            .results
            .into_iter()
            .map(|entry| entry.name)
            .collect())
    }

    async fn fetch_image(&self, url: &str) -> Result<Vec<u8>, DexError> {
        fetch_bytes(url).await
    }
}

/// Numeric id from a resource URL such as `.../pokemon-species/25/`.
pub fn resource_id(url: &str) -> Option<u32> {
    url.trim_end_matches('/').rsplit('/').next()?.parse().ok()
}

async fn fetch_json<T: serde::de::DeserializeOwned>(url: &str) -> Result<T, DexError> {
    let bytes = fetch_bytes(url).await?;
    serde_json::from_slice(&bytes).map_err(|err| {
        tracing::warn!(%url, error = %err, "failed to decode response");
        DexError::Parse(format!("{url}: {err}"))
    })
}

async fn fetch_bytes(url: &str) -> Result<Vec<u8>, DexError> {
    tracing::debug!(%url, "GET");
    let response = http_client()
        .get(url)
        .send()
        .await
        .map_err(|err| DexError::Transient(err.to_string()))?;
    if response.status() == reqwest::StatusCode::NOT_FOUND {
        return Err(DexError::NotFound(url.to_string()));
    }
    let response = response
        .error_for_status()
        .map_err(|err| DexError::Transient(err.to_string()))?;
    let bytes = response
        .bytes()
        .await
        .map_err(|err| DexError::Transient(err.to_string()))?;
    Ok(bytes.to_vec())
}

fn http_client() -> &'static reqwest::Client {
    static CLIENT: OnceLock<reqwest::Client> = OnceLock::new();
    CLIENT.get_or_init(reqwest::Client::new)
}
