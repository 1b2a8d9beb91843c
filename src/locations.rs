use std::sync::Arc;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::api::{DataSource, EncounterResource, PokemonResource};
use crate::error::DexError;
use crate::text::{capitalize_first, dehyphenate, shout};
use crate::GAME_VERSION;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct LocationEntry {
    pub area: String,
    pub method: String,
    pub min_level: u32,
    pub max_level: u32,
}

impl LocationEntry {
    pub fn level_range(&self) -> String {
        format!("{}-{}", self.min_level, self.max_level)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum LocationReport {
    Found(Vec<LocationEntry>),
    /// No wild encounter in this version (event, trade or evolution only).
    NoEncounters,
    /// The API does not list encounter data for this Pokémon.
    NotListed,
}

pub async fn fetch_locations(
    source: &Arc<dyn DataSource>,
    pokemon: &PokemonResource,
) -> Result<LocationReport, DexError> {
    let Some(url) = pokemon
        .location_area_encounters
        .as_deref()
        .filter(|url| !url.is_empty())
    else {
        return Ok(LocationReport::NotListed);
    };
    let encounters = source.fetch_encounters(url).await?;
    let entries = version_encounters(&encounters, GAME_VERSION);
    if entries.is_empty() {
        Ok(LocationReport::NoEncounters)
    } else {
        Ok(LocationReport::Found(entries))
    }
}

/// One entry per encounter detail recorded for `version`, in source order.
pub fn version_encounters(encounters: &[EncounterResource], version: &str) -> Vec<LocationEntry> {
    encounters
        .iter()
        .flat_map(|location| {
            location
                .version_details
                .iter()
                .filter(|details| details.version.name == version)
                .flat_map(move |details| {
                    details
                        .encounter_details
                        .iter()
                        .map(move |detail| LocationEntry {
                            area: shout(&location.location_area.name),
                            method: capitalize_first(&dehyphenate(&detail.method.name)),
                            min_level: detail.min_level,
                            max_level: detail.max_level,
                        })
                })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemorySource;
    use serde_json::json;

    const ENCOUNTERS_URL: &str = "https://pokeapi.co/api/v2/pokemon/25/encounters";

    fn encounters() -> serde_json::Value {
        json!([
            {
                "location_area": { "name": "viridian-forest-area" },
                "version_details": [
                    {
                        "version": { "name": "red" },
                        "encounter_details": [
                            { "min_level": 3, "max_level": 5, "method": { "name": "walk" } }
                        ]
                    },
                    {
                        "version": { "name": "firered" },
                        "encounter_details": [
                            { "min_level": 3, "max_level": 3, "method": { "name": "walk" } },
                            { "min_level": 5, "max_level": 5, "method": { "name": "old-rod" } }
                        ]
                    }
                ]
            },
            {
                "location_area": { "name": "power-plant-area" },
                "version_details": [
                    {
                        "version": { "name": "leafgreen" },
                        "encounter_details": [
                            { "min_level": 20, "max_level": 24, "method": { "name": "walk" } }
                        ]
                    }
                ]
            }
        ])
    }

    fn pokemon(url: Option<&str>) -> PokemonResource {
        PokemonResource {
            id: 25,
            name: "pikachu".to_string(),
            location_area_encounters: url.map(str::to_string),
            ..Default::default()
        }
    }

    #[test]
    fn only_firered_details_are_kept() {
        let encounters: Vec<EncounterResource> = serde_json::from_value(encounters()).unwrap();
        let entries = version_encounters(&encounters, "firered");

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].area, "VIRIDIAN FOREST AREA");
        assert_eq!(entries[0].level_range(), "3-3");
        assert_eq!(entries[1].method, "Old rod");
    }

    #[tokio::test]
    async fn missing_encounter_url_is_not_listed() {
        let source: Arc<dyn DataSource> = Arc::new(MemorySource::new());
        let report = fetch_locations(&source, &pokemon(None)).await.unwrap();
        assert_eq!(report, LocationReport::NotListed);
    }

    #[tokio::test]
    async fn other_versions_only_means_no_encounters() {
        let source: Arc<dyn DataSource> = Arc::new(MemorySource::new().with_resource(
            ENCOUNTERS_URL,
            json!([{
                "location_area": { "name": "route-1" },
                "version_details": [{ "version": { "name": "red" }, "encounter_details": [] }]
            }]),
        ));
        let report = fetch_locations(&source, &pokemon(Some(ENCOUNTERS_URL)))
            .await
            .unwrap();
        assert_eq!(report, LocationReport::NoEncounters);
    }
}
