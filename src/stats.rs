use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::api::PokemonResource;
use crate::text::shout;

/// Base stats are drawn against this ceiling.
pub const STAT_CEILING: u32 = 255;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct StatRow {
    pub label: String,
    pub value: u32,
    /// Bar width in percent of [`STAT_CEILING`].
    pub percent: f32,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct BaseStats {
    pub rows: Vec<StatRow>,
    pub total: u32,
}

impl BaseStats {
    pub fn from_resource(pokemon: &PokemonResource) -> Self {
        let rows: Vec<StatRow> = pokemon
            .stats
            .iter()
            .map(|slot| StatRow {
                label: shout(&slot.stat.name),
                value: slot.base_stat,
                percent: slot.base_stat as f32 / STAT_CEILING as f32 * 100.0,
            })
            .collect();
        let total = rows.iter().map(|row| row.value).sum();
        Self { rows, total }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn rows_and_total() {
        let pokemon: PokemonResource = serde_json::from_value(json!({
            "id": 1,
            "name": "bulbasaur",
            "stats": [
                { "base_stat": 45, "stat": { "name": "hp" } },
                { "base_stat": 65, "stat": { "name": "special-attack" } },
                { "base_stat": 255, "stat": { "name": "speed" } }
            ]
        }))
        .unwrap();

        let stats = BaseStats::from_resource(&pokemon);
        assert_eq!(stats.total, 365);
        assert_eq!(stats.rows[1].label, "SPECIAL ATTACK");
        assert_eq!(stats.rows[2].percent, 100.0);
    }
}
