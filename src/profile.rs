use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::api::PokemonResource;
use crate::GENERATION_CUTOFF;

const LEGENDARY_IDS: [u32; 5] = [144, 145, 146, 150, 151];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum Rarity {
    Legendary,
    Kanto,
    Other,
}

impl Rarity {
    pub fn for_id(id: u32) -> Self {
        if LEGENDARY_IDS.contains(&id) {
            Rarity::Legendary
        } else if id <= GENERATION_CUTOFF {
            Rarity::Kanto
        } else {
            Rarity::Other
        }
    }

    pub fn label(&self) -> Option<&'static str> {
        match self {
            Rarity::Legendary => Some("Legendary/Mythical"),
            Rarity::Kanto => Some("Generation 1"),
            Rarity::Other => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PokemonProfile {
    pub id: u32,
    pub name: String,
    pub types: Vec<String>,
    pub height_m: f32,
    pub weight_kg: f32,
    pub sprite: Option<String>,
    pub sprite_shiny: Option<String>,
    pub rarity: Rarity,
}

impl PokemonProfile {
    pub fn from_resource(pokemon: &PokemonResource) -> Self {
        Self {
            id: pokemon.id,
            name: pokemon.name.clone(),
            types: type_names(pokemon),
            height_m: pokemon.height as f32 / 10.0,
            weight_kg: pokemon.weight as f32 / 10.0,
            sprite: pokemon.sprites.front_default.clone(),
            sprite_shiny: pokemon.sprites.front_shiny.clone(),
            rarity: Rarity::for_id(pokemon.id),
        }
    }
}

pub fn type_names(pokemon: &PokemonResource) -> Vec<String> {
    pokemon
        .types
        .iter()
        .map(|slot| slot.type_info.name.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn profile_converts_units_and_rarity() {
        let pokemon: PokemonResource = serde_json::from_value(json!({
            "id": 150,
            "name": "mewtwo",
            "height": 20,
            "weight": 1220,
            "types": [{ "type": { "name": "psychic" } }],
            "sprites": { "front_default": "a.png", "front_shiny": "b.png" }
        }))
        .unwrap();

        let profile = PokemonProfile::from_resource(&pokemon);
        assert_eq!(profile.height_m, 2.0);
        assert_eq!(profile.weight_kg, 122.0);
        assert_eq!(profile.types, ["psychic"]);
        assert_eq!(profile.rarity, Rarity::Legendary);
        assert_eq!(profile.sprite_shiny.as_deref(), Some("b.png"));
    }

    #[test]
    fn rarity_tiers() {
        assert_eq!(Rarity::for_id(25).label(), Some("Generation 1"));
        assert_eq!(Rarity::for_id(151).label(), Some("Legendary/Mythical"));
        assert_eq!(Rarity::for_id(152).label(), None);
    }
}
