//! Decisions solicited by the server and the responses sent back

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::hex::Cc;
use crate::profile::TargetProfile;
use crate::state::UnitId;

/// Summary of an ability a unit could use once activated
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacetPreview {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

impl FacetPreview {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
        }
    }
}

/// The ability an effort option would use
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacetSummary {
    pub name: String,
}

/// What choosing an option does, independent of its target
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OptionKind {
    Skip,
    Move,
    ActivateUnit {
        /// Facets each targetable unit would offer if activated
        #[serde(default)]
        actions_preview: FxHashMap<UnitId, Vec<FacetPreview>>,
    },
    Effort {
        facet: FacetSummary,
    },
}

/// Fieldless mirror of [`OptionKind`]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OptionTag {
    Skip,
    Move,
    ActivateUnit,
    Effort,
}

impl OptionKind {
    pub fn tag(&self) -> OptionTag {
        match self {
            OptionKind::Skip => OptionTag::Skip,
            OptionKind::Move => OptionTag::Move,
            OptionKind::ActivateUnit { .. } => OptionTag::ActivateUnit,
            OptionKind::Effort { .. } => OptionTag::Effort,
        }
    }
}

/// One selectable option of a decision
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecisionOption {
    #[serde(flatten)]
    pub kind: OptionKind,
    pub target_profile: TargetProfile,
}

impl DecisionOption {
    pub fn new(kind: OptionKind, target_profile: TargetProfile) -> Self {
        Self {
            kind,
            target_profile,
        }
    }

    /// Human-readable label for action tooltips
    pub fn description(&self) -> Option<String> {
        match &self.kind {
            OptionKind::Skip => Some("skip".to_string()),
            OptionKind::Move => Some("move".to_string()),
            OptionKind::ActivateUnit { .. } => Some("activate".to_string()),
            OptionKind::Effort { facet } => Some(facet.name.clone()),
        }
    }
}

/// Input currently solicited from this client
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decision {
    pub options: Vec<DecisionOption>,
    #[serde(default)]
    pub explanation: String,
}

impl Decision {
    pub fn new(options: Vec<DecisionOption>) -> Self {
        Self {
            options,
            explanation: String::new(),
        }
    }

    /// Merged activation previews across all activate-unit options
    pub fn actions_preview(&self) -> FxHashMap<&str, &[FacetPreview]> {
        let mut previews = FxHashMap::default();
        for option in &self.options {
            if let OptionKind::ActivateUnit { actions_preview } = &option.kind {
                for (unit_id, facets) in actions_preview {
                    previews.insert(unit_id.as_str(), facets.as_slice());
                }
            }
        }
        previews
    }
}

// ============================================================================
// RESPONSES
// ============================================================================

/// Target part of a response
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TargetPayload {
    Index { index: usize },
    Indexes { indexes: Vec<usize> },
    Cc { cc: Cc },
}

/// Choice sent back to the server
///
/// `index` is the position of the chosen option in the decision that was
/// active when the affordance was derived.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerResponse {
    pub index: usize,
    pub target: Option<TargetPayload>,
}

impl PlayerResponse {
    pub fn untargeted(index: usize) -> Self {
        Self {
            index,
            target: None,
        }
    }

    pub fn with_index(index: usize, target: usize) -> Self {
        Self {
            index,
            target: Some(TargetPayload::Index { index: target }),
        }
    }

    pub fn with_indexes(index: usize, indexes: Vec<usize>) -> Self {
        Self {
            index,
            target: Some(TargetPayload::Indexes { indexes }),
        }
    }

    pub fn with_cc(index: usize, cc: Cc) -> Self {
        Self {
            index,
            target: Some(TargetPayload::Cc { cc }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_decision() {
        let json = json!({
            "options": [
                {"type": "skip", "target_profile": {"type": "NoTarget", "values": {}}},
                {"type": "activate_unit",
                 "target_profile": {"type": "OneOfUnits", "values": {"units": ["3"]}},
                 "actions_preview": {"3": [{"name": "Stab"}]}},
                {"type": "effort", "facet": {"name": "Fireball"},
                 "target_profile": {"type": "HexHexes", "values": {"centers": [], "radius": 1}}}
            ]
        });
        let decision: Decision = serde_json::from_value(json).unwrap();
        assert_eq!(decision.options.len(), 3);
        assert_eq!(decision.options[0].kind.tag(), OptionTag::Skip);
        assert_eq!(decision.options[2].description().as_deref(), Some("Fireball"));

        let previews = decision.actions_preview();
        assert_eq!(previews["3"][0].name, "Stab");
    }

    #[test]
    fn test_response_wire_format() {
        let responses = vec![
            PlayerResponse::untargeted(0),
            PlayerResponse::with_index(1, 2),
            PlayerResponse::with_indexes(2, vec![0, 3]),
            PlayerResponse::with_cc(3, Cc::new(-1, 2)),
        ];
        let value = serde_json::to_value(&responses).unwrap();
        assert_eq!(
            value,
            json!([
                {"index": 0, "target": null},
                {"index": 1, "target": {"index": 2}},
                {"index": 2, "target": {"indexes": [0, 3]}},
                {"index": 3, "target": {"cc": {"r": -1, "h": 2}}}
            ])
        );
        let back: Vec<PlayerResponse> = serde_json::from_value(value).unwrap();
        assert_eq!(back, responses);
    }
}
