use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::api::PokemonResource;
use crate::text::shout;
use crate::VERSION_GROUP;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct LevelMove {
    pub level: u32,
    pub name: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct MoveSet {
    /// Sorted by level; moves sharing a level keep their source order.
    pub level_up: Vec<LevelMove>,
    /// TM and HM moves in source order.
    pub machine: Vec<String>,
}

impl MoveSet {
    pub fn from_resource(pokemon: &PokemonResource) -> Self {
        Self::for_version_group(pokemon, VERSION_GROUP)
    }

    pub fn for_version_group(pokemon: &PokemonResource, version_group: &str) -> Self {
        let mut moves = MoveSet::default();
        for slot in &pokemon.moves {
            let Some(detail) = slot
                .version_group_details
                .iter()
                .find(|detail| detail.version_group.name == version_group)
            else {
                continue;
            };
            let name = shout(&slot.move_info.name);
            match detail.move_learn_method.name.as_str() {
                "level-up" => moves.level_up.push(LevelMove {
                    level: detail.level_learned_at,
                    name,
                }),
                "machine" => moves.machine.push(name),
                _ => {}
            }
        }
        moves.level_up.sort_by_key(|entry| entry.level);
        moves
    }
}
