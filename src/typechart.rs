//! Type effectiveness for a Pokémon's type combination.

use std::sync::Arc;

use futures_util::future::try_join_all;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::api::{DataSource, NamedResource, TypeResource};
use crate::error::DexError;

/// Damage taken from attacking types, grouped by final multiplier.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct DefenseChart {
    pub quadruple: Vec<String>,
    pub double: Vec<String>,
    pub half: Vec<String>,
    pub quarter: Vec<String>,
    pub immune: Vec<String>,
}

/// Types hit by moves of the Pokémon's own types.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct AttackChart {
    pub super_effective: Vec<String>,
    pub not_very_effective: Vec<String>,
    pub no_effect: Vec<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct TypeChart {
    pub defense: DefenseChart,
    pub attack: AttackChart,
}

/// Multiplier kept as a power of two so products stay exact.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Factor {
    Immune,
    Pow2(i8),
}

impl Factor {
    fn times(self, other: Factor) -> Factor {
        match (self, other) {
            (Factor::Pow2(a), Factor::Pow2(b)) => Factor::Pow2(a + b),
            _ => Factor::Immune,
        }
    }
}

pub async fn fetch_type_chart(
    source: &Arc<dyn DataSource>,
    types: &[String],
) -> Result<TypeChart, DexError> {
    let resources = try_join_all(types.iter().map(|name| source.fetch_type(name))).await?;
    Ok(build_type_chart(&resources))
}

pub fn build_type_chart(types: &[TypeResource]) -> TypeChart {
    TypeChart {
        defense: defense_chart(types),
        attack: attack_chart(types),
    }
}

fn defense_chart(types: &[TypeResource]) -> DefenseChart {
    let mut factors: Vec<(String, Factor)> = Vec::new();
    let mut apply = |attackers: &[NamedResource], factor: Factor| {
        for attacker in attackers {
            match factors.iter_mut().find(|(name, _)| *name == attacker.name) {
                Some((_, current)) => *current = current.times(factor),
                None => factors.push((attacker.name.clone(), factor)),
            }
        }
    };
    for resource in types {
        let relations = &resource.damage_relations;
        apply(&relations.double_damage_from, Factor::Pow2(1));
        apply(&relations.half_damage_from, Factor::Pow2(-1));
        apply(&relations.no_damage_from, Factor::Immune);
    }

    let mut chart = DefenseChart::default();
    for (name, factor) in factors {
        let bucket = match factor {
            Factor::Immune => &mut chart.immune,
            Factor::Pow2(2) => &mut chart.quadruple,
            Factor::Pow2(1) => &mut chart.double,
            Factor::Pow2(-1) => &mut chart.half,
            Factor::Pow2(-2) => &mut chart.quarter,
            Factor::Pow2(_) => continue,
        };
        bucket.push(name);
    }
    chart
}

fn attack_chart(types: &[TypeResource]) -> AttackChart {
    let mut chart = AttackChart::default();
    for resource in types {
        let relations = &resource.damage_relations;
        push_unique(&mut chart.super_effective, &relations.double_damage_to);
        push_unique(&mut chart.not_very_effective, &relations.half_damage_to);
        push_unique(&mut chart.no_effect, &relations.no_damage_to);
    }
    chart
}

fn push_unique(target: &mut Vec<String>, names: &[NamedResource]) {
    for entry in names {
        if !target.contains(&entry.name) {
            target.push(entry.name.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn named(names: &[&str]) -> Vec<serde_json::Value> {
        names.iter().map(|name| json!({ "name": name })).collect()
    }

    fn type_resource(
        name: &str,
        double_from: &[&str],
        half_from: &[&str],
        no_from: &[&str],
        double_to: &[&str],
    ) -> TypeResource {
        serde_json::from_value(json!({
            "name": name,
            "damage_relations": {
                "double_damage_from": named(double_from),
                "half_damage_from": named(half_from),
                "no_damage_from": named(no_from),
                "double_damage_to": named(double_to),
                "half_damage_to": [],
                "no_damage_to": []
            }
        }))
        .unwrap()
    }

    #[test]
    fn dual_types_multiply() {
        let bug = type_resource("bug", &["fire", "flying", "rock"], &["grass", "ground", "fighting"], &[], &["grass", "psychic"]);
        let grass = type_resource("grass", &["fire", "ice", "flying", "bug"], &["water", "grass", "ground", "electric"], &[], &["water", "ground", "rock"]);

        let chart = build_type_chart(&[bug, grass]);

        assert_eq!(chart.defense.quadruple, ["fire", "flying"]);
        assert_eq!(chart.defense.double, ["rock", "ice", "bug"]);
        assert_eq!(chart.defense.half, ["fighting", "water", "electric"]);
        assert_eq!(chart.defense.quarter, ["grass", "ground"]);
        assert!(chart.defense.immune.is_empty());
        assert_eq!(
            chart.attack.super_effective,
            ["grass", "psychic", "water", "ground", "rock"]
        );
    }

    #[test]
    fn immunity_survives_later_weakness() {
        let ghost = type_resource("ghost", &["ghost"], &["poison", "bug"], &["normal", "fighting"], &[]);
        let weird = type_resource("weird", &["fighting", "normal"], &[], &[], &[]);

        let chart = build_type_chart(&[ghost, weird]);

        assert_eq!(chart.defense.immune, ["normal", "fighting"]);
        assert!(!chart.defense.double.contains(&"fighting".to_string()));
    }

    #[test]
    fn neutral_results_are_omitted() {
        let water = type_resource("water", &["grass"], &["fire"], &[], &[]);
        let other = type_resource("other", &["fire"], &["grass"], &[], &[]);

        let chart = build_type_chart(&[water, other]);

        assert_eq!(chart.defense, DefenseChart::default());
    }
}
