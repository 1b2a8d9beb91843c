//! In-memory `DataSource` holding canned PokeAPI JSON.
//!
//! Resources are keyed the way the HTTP client builds its paths
//! (`pokemon/pikachu`, `pokemon-species/25`, `type/fire`); chain and encounter
//! resources are keyed by their full URL. Every fetch yields once before
//! answering so concurrent callers really interleave.

use std::collections::{HashMap, HashSet};
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::api::{
    DataSource, EncounterResource, EvolutionChainResource, PokemonResource, SpeciesResource,
    TypeResource,
};
use crate::error::DexError;

#[derive(Debug, Default)]
pub struct MemorySource {
    resources: HashMap<String, Value>,
    failing: HashSet<String>,
    roster: Vec<String>,
    images: HashMap<String, Vec<u8>>,
    fetches: Mutex<HashMap<String, usize>>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a pokemon resource under both its name and its id.
    pub fn with_pokemon(mut self, value: Value) -> Self {
        if let Some(id) = value.get("id").and_then(Value::as_u64) {
            self.resources.insert(format!("pokemon/{id}"), value.clone());
        }
        if let Some(name) = value.get("name").and_then(Value::as_str) {
            self.resources.insert(format!("pokemon/{name}"), value.clone());
        }
        self
    }

    /// Registers a species resource under both its name and its id.
    pub fn with_species(mut self, value: Value) -> Self {
        if let Some(id) = value.get("id").and_then(Value::as_u64) {
            self.resources
                .insert(format!("pokemon-species/{id}"), value.clone());
        }
        if let Some(name) = value.get("name").and_then(Value::as_str) {
            self.resources
                .insert(format!("pokemon-species/{name}"), value.clone());
        }
        self
    }

    pub fn with_resource(mut self, key: impl Into<String>, value: Value) -> Self {
        self.resources.insert(key.into(), value);
        self
    }

    /// Makes every fetch of `key` fail with a transient error.
    pub fn with_failure(mut self, key: impl Into<String>) -> Self {
        self.failing.insert(key.into());
        self
    }

    pub fn with_image(mut self, url: impl Into<String>, bytes: Vec<u8>) -> Self {
        self.images.insert(url.into(), bytes);
        self
    }

    pub fn with_roster(mut self, names: &[&str]) -> Self {
        self.roster = names.iter().map(|name| name.to_string()).collect();
        self
    }

    /// How many times `key` has been requested.
    pub fn fetch_count(&self, key: &str) -> usize {
        self.fetches
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .copied()
            .unwrap_or(0)
    }

    async fn get<T: DeserializeOwned>(&self, key: String) -> Result<T, DexError> {
        tokio::task::yield_now().await;
        *self
            .fetches
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(key.clone())
            .or_insert(0) += 1;
        if self.failing.contains(&key) {
            return Err(DexError::Transient(format!("{key}: connection reset")));
        }
        let value = self
            .resources
            .get(&key)
            .cloned()
            .ok_or_else(|| DexError::NotFound(key.clone()))?;
        serde_json::from_value(value).map_err(|err| DexError::Parse(format!("{key}: {err}")))
    }
}

#[async_trait]
impl DataSource for MemorySource {
    async fn fetch_pokemon(&self, name_or_id: &str) -> Result<PokemonResource, DexError> {
        self.get(format!("pokemon/{name_or_id}")).await
    }

    async fn fetch_species(&self, name_or_id: &str) -> Result<SpeciesResource, DexError> {
        self.get(format!("pokemon-species/{name_or_id}")).await
    }

    async fn fetch_evolution_chain(&self, url: &str) -> Result<EvolutionChainResource, DexError> {
        self.get(url.to_string()).await
    }

    async fn fetch_type(&self, name: &str) -> Result<TypeResource, DexError> {
        self.get(format!("type/{name}")).await
    }

    async fn fetch_encounters(&self, url: &str) -> Result<Vec<EncounterResource>, DexError> {
        self.get(url.to_string()).await
    }

    async fn fetch_name_roster(&self, limit: u32) -> Result<Vec<String>, DexError> {
        Ok(self.roster.iter().take(limit as usize).cloned().collect())
    }

    async fn fetch_image(&self, url: &str) -> Result<Vec<u8>, DexError> {
        tokio::task::yield_now().await;
        self.images
            .get(url)
            .cloned()
            .ok_or_else(|| DexError::NotFound(url.to_string()))
    }
}
