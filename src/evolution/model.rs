use crate::api::{resource_id, ChainLink, EvolutionDetailResource, NamedResource};
use crate::error::DexError;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EvolutionTrigger {
    LevelUp,
    Trade,
    UseItem,
    Other(String),
}

impl EvolutionTrigger {
    pub fn from_name(name: &str) -> Self {
        match name {
            "level-up" => EvolutionTrigger::LevelUp,
            "trade" => EvolutionTrigger::Trade,
            "use-item" => EvolutionTrigger::UseItem,
            other => EvolutionTrigger::Other(other.to_string()),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            EvolutionTrigger::LevelUp => "level-up",
            EvolutionTrigger::Trade => "trade",
            EvolutionTrigger::UseItem => "use-item",
            EvolutionTrigger::Other(name) => name,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Gender {
    Female,
    Male,
}

impl Gender {
    /// PokeAPI gender ids: 1 female, 2 male.
    pub fn from_id(id: u8) -> Option<Self> {
        match id {
            1 => Some(Gender::Female),
            2 => Some(Gender::Male),
            _ => None,
        }
    }
}

/// One way of triggering an evolution. Item, move and time fields hold
/// PokeAPI identifiers (`thunder-stone`, `ancient-power`, `night`).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EvolutionDetail {
    pub trigger: EvolutionTrigger,
    pub min_level: Option<u32>,
    pub min_happiness: Option<u32>,
    pub time_of_day: Option<String>,
    pub held_item: Option<String>,
    pub known_move: Option<String>,
    pub gender: Option<Gender>,
    pub item: Option<String>,
}

impl EvolutionDetail {
    pub fn new(trigger: EvolutionTrigger) -> Self {
        Self {
            trigger,
            min_level: None,
            min_happiness: None,
            time_of_day: None,
            held_item: None,
            known_move: None,
            gender: None,
            item: None,
        }
    }
}

impl From<&EvolutionDetailResource> for EvolutionDetail {
    fn from(detail: &EvolutionDetailResource) -> Self {
        Self {
            trigger: EvolutionTrigger::from_name(&detail.trigger.name),
            min_level: detail.min_level.filter(|level| *level > 0),
            min_happiness: detail.min_happiness.filter(|happiness| *happiness > 0),
            time_of_day: detail
                .time_of_day
                .clone()
                .filter(|time| !time.trim().is_empty()),
            held_item: named(&detail.held_item),
            known_move: named(&detail.known_move),
            gender: detail.gender.and_then(Gender::from_id),
            item: named(&detail.item),
        }
    }
}

fn named(resource: &Option<NamedResource>) -> Option<String> {
    resource
        .as_ref()
        .map(|resource| resource.name.clone())
        .filter(|name| !name.is_empty())
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EvolutionEdge {
    /// Alternative triggers for the same transition, in source order.
    pub details: Vec<EvolutionDetail>,
    pub target: EvolutionNode,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EvolutionNode {
    pub name: String,
    pub id: u32,
    pub edges: Vec<EvolutionEdge>,
}

impl EvolutionNode {
    pub fn leaf(name: impl Into<String>, id: u32) -> Self {
        Self {
            name: name.into(),
            id,
            edges: Vec::new(),
        }
    }

    pub fn with_edge(mut self, details: Vec<EvolutionDetail>, target: EvolutionNode) -> Self {
        self.edges.push(EvolutionEdge { details, target });
        self
    }
}

impl TryFrom<&ChainLink> for EvolutionNode {
    type Error = DexError;

    fn try_from(link: &ChainLink) -> Result<Self, Self::Error> {
        let id = resource_id(&link.species.url).ok_or_else(|| {
            DexError::Parse(format!(
                "species url without id: {:?}",
                link.species.url
            ))
        })?;
        let edges = link
            .evolves_to
            .iter()
            .map(|next| {
                Ok(EvolutionEdge {
                    details: next.evolution_details.iter().map(Into::into).collect(),
                    target: EvolutionNode::try_from(next)?,
                })
            })
            .collect::<Result<Vec<_>, DexError>>()?;
        Ok(Self {
            name: link.species.name.clone(),
            id,
            edges,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn chain_link_moves_details_onto_edges() {
        let link: ChainLink = serde_json::from_value(json!({
            "species": { "name": "pikachu", "url": "https://pokeapi.co/api/v2/pokemon-species/25/" },
            "evolution_details": [],
            "evolves_to": [{
                "species": { "name": "raichu", "url": "https://pokeapi.co/api/v2/pokemon-species/26/" },
                "evolution_details": [{
                    "trigger": { "name": "use-item", "url": "" },
                    "item": { "name": "thunder-stone", "url": "" },
                    "time_of_day": "",
                    "gender": null,
                    "min_level": null
                }],
                "evolves_to": []
            }]
        }))
        .unwrap();

        let node = EvolutionNode::try_from(&link).unwrap();
        assert_eq!(node.id, 25);
        assert_eq!(node.edges.len(), 1);
        let edge = &node.edges[0];
        assert_eq!(edge.target.name, "raichu");
        assert_eq!(edge.target.id, 26);
        assert_eq!(edge.details[0].trigger, EvolutionTrigger::UseItem);
        assert_eq!(edge.details[0].item.as_deref(), Some("thunder-stone"));
        assert_eq!(edge.details[0].time_of_day, None);
    }

    #[test]
    fn species_url_without_id_is_a_parse_error() {
        let link: ChainLink = serde_json::from_value(json!({
            "species": { "name": "missingno", "url": "https://pokeapi.co/api/v2/pokemon-species/" }
        }))
        .unwrap();
        assert!(matches!(
            EvolutionNode::try_from(&link),
            Err(DexError::Parse(_))
        ));
    }

    #[test]
    fn unknown_gender_ids_are_dropped() {
        assert_eq!(Gender::from_id(1), Some(Gender::Female));
        assert_eq!(Gender::from_id(2), Some(Gender::Male));
        assert_eq!(Gender::from_id(0), None);
    }
}
