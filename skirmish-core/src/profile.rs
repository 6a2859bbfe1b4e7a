//! Target profiles: what a decision option accepts as its target
//!
//! Wire form is `{"type": "<Kind>", "values": {...}}`. The enum is closed,
//! so an unknown kind fails at parse time instead of reaching dispatch.

use serde::{Deserialize, Serialize};

use crate::hex::Cc;
use crate::state::UnitId;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "values")]
pub enum TargetProfile {
    OneOfUnits(OneOfUnits),
    OneOfHexes(OneOfHexes),
    NOfUnits(NOfUnits),
    NOfHexes(NOfHexes),
    NoTarget(NoTarget),
    ConsecutiveAdjacentHexes(ConsecutiveAdjacentHexes),
    HexHexes(HexHexes),
    HexRing(HexRing),
    RadiatingLine(RadiatingLine),
    Cone(Cone),
    Tree(Tree),
    TriHex(TriHex),
}

impl TargetProfile {
    /// Wire tag, for logging
    pub fn name(&self) -> &'static str {
        match self {
            TargetProfile::OneOfUnits(_) => "OneOfUnits",
            TargetProfile::OneOfHexes(_) => "OneOfHexes",
            TargetProfile::NOfUnits(_) => "NOfUnits",
            TargetProfile::NOfHexes(_) => "NOfHexes",
            TargetProfile::NoTarget(_) => "NoTarget",
            TargetProfile::ConsecutiveAdjacentHexes(_) => "ConsecutiveAdjacentHexes",
            TargetProfile::HexHexes(_) => "HexHexes",
            TargetProfile::HexRing(_) => "HexRing",
            TargetProfile::RadiatingLine(_) => "RadiatingLine",
            TargetProfile::Cone(_) => "Cone",
            TargetProfile::Tree(_) => "Tree",
            TargetProfile::TriHex(_) => "TriHex",
        }
    }

    /// Kinds whose base affordance sits on the active unit
    pub fn needs_active_unit(&self) -> bool {
        matches!(
            self,
            TargetProfile::NoTarget(_)
                | TargetProfile::ConsecutiveAdjacentHexes(_)
                | TargetProfile::HexHexes(_)
                | TargetProfile::HexRing(_)
                | TargetProfile::RadiatingLine(_)
                | TargetProfile::Cone(_)
                | TargetProfile::TriHex(_)
        )
    }
}

// ============================================================================
// SELECTION PROFILES
// ============================================================================

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OneOfUnits {
    pub units: Vec<UnitId>,
    #[serde(default)]
    pub labels: Vec<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OneOfHexes {
    pub options: Vec<Cc>,
    #[serde(default)]
    pub labels: Vec<String>,
}

/// Pick `select_count` distinct units
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NOfUnits {
    pub units: Vec<UnitId>,
    pub select_count: usize,
    /// Enables finishing early once this many are chosen
    #[serde(default)]
    pub min_count: Option<usize>,
    #[serde(default)]
    pub labels: Vec<String>,
}

/// Pick `select_count` distinct hexes
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NOfHexes {
    pub options: Vec<Cc>,
    pub select_count: usize,
    #[serde(default)]
    pub min_count: Option<usize>,
    #[serde(default)]
    pub labels: Vec<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoTarget {}

// ============================================================================
// AREA PROFILES
// ============================================================================

/// Arc of neighbors around `adjacent_to`
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsecutiveAdjacentHexes {
    pub adjacent_to: Cc,
    pub arm_length: u32,
}

/// Filled disk around one of `centers`
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HexHexes {
    pub centers: Vec<Cc>,
    pub radius: u32,
}

/// Hollow ring around one of `centers`
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HexRing {
    pub centers: Vec<Cc>,
    pub radius: u32,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RadiatingLine {
    pub from_hex: Cc,
    pub to_hexes: Vec<Cc>,
    pub length: u32,
}

/// One arc per entry of `arm_lengths`, at increasing distance from `from_hex`
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cone {
    pub from_hex: Cc,
    pub to_hexes: Vec<Cc>,
    pub arm_lengths: Vec<u32>,
}

/// Three mutually adjacent hexes
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriHex {
    pub options: Vec<[Cc; 3]>,
}

impl TriHex {
    /// Indexes of the options touching `cc`, in option order
    pub fn options_at(&self, cc: Cc) -> Vec<usize> {
        self.options
            .iter()
            .enumerate()
            .filter(|(_, cells)| cells.contains(&cc))
            .map(|(idx, _)| idx)
            .collect()
    }
}

// ============================================================================
// TREE
// ============================================================================

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tree {
    pub root_node: TreeNode,
}

/// A node of nested choices
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeNode {
    #[serde(default)]
    pub label: String,
    pub options: Vec<TreeBranch>,
}

/// What a tree branch points at on the board
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TreeTarget {
    Unit(UnitId),
    Hex(Cc),
}

/// Where a branch leads once chosen
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TreeNext {
    Node(TreeNode),
    /// Choosing this branch completes the selection
    Leaf,
}

/// One selectable `(target, next)` pair
///
/// On the wire this is a two-element array whose second element is the
/// child node or `null`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    from = "(TreeTarget, Option<TreeNode>)",
    into = "(TreeTarget, Option<TreeNode>)"
)]
pub struct TreeBranch {
    pub target: TreeTarget,
    pub next: TreeNext,
}

impl TreeBranch {
    pub fn leaf(target: TreeTarget) -> Self {
        Self {
            target,
            next: TreeNext::Leaf,
        }
    }

    pub fn node(target: TreeTarget, node: TreeNode) -> Self {
        Self {
            target,
            next: TreeNext::Node(node),
        }
    }
}

impl From<(TreeTarget, Option<TreeNode>)> for TreeBranch {
    fn from((target, child): (TreeTarget, Option<TreeNode>)) -> Self {
        Self {
            target,
            next: child.map_or(TreeNext::Leaf, TreeNext::Node),
        }
    }
}

impl From<TreeBranch> for (TreeTarget, Option<TreeNode>) {
    fn from(branch: TreeBranch) -> Self {
        let child = match branch.next {
            TreeNext::Node(node) => Some(node),
            TreeNext::Leaf => None,
        };
        (branch.target, child)
    }
}

impl TreeNode {
    pub fn new(label: impl Into<String>, options: Vec<TreeBranch>) -> Self {
        Self {
            label: label.into(),
            options,
        }
    }

    /// Follow `path` one branch at a time
    ///
    /// Returns `None` if an index is out of range or the path runs through a
    /// leaf.
    pub fn walk(&self, path: &[usize]) -> Option<&TreeNode> {
        let mut node = self;
        for &idx in path {
            match &node.options.get(idx)?.next {
                TreeNext::Node(child) => node = child,
                TreeNext::Leaf => return None,
            }
        }
        Some(node)
    }

    /// Targets of every branch chosen along `path`
    pub fn path_targets(&self, path: &[usize]) -> Vec<&TreeTarget> {
        let mut targets = Vec::with_capacity(path.len());
        let mut node = Some(self);
        for &idx in path {
            let Some(branch) = node.and_then(|n| n.options.get(idx)) else {
                break;
            };
            targets.push(&branch.target);
            node = match &branch.next {
                TreeNext::Node(child) => Some(child),
                TreeNext::Leaf => None,
            };
        }
        targets
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_tree() -> TreeNode {
        TreeNode::new(
            "root",
            vec![
                TreeBranch::node(
                    TreeTarget::Unit("a".to_string()),
                    TreeNode::new(
                        "pick hex",
                        vec![
                            TreeBranch::leaf(TreeTarget::Hex(Cc::new(1, 0))),
                            TreeBranch::node(
                                TreeTarget::Hex(Cc::new(2, 0)),
                                TreeNode::new(
                                    "confirm",
                                    vec![TreeBranch::leaf(TreeTarget::Hex(Cc::new(3, 0)))],
                                ),
                            ),
                        ],
                    ),
                ),
                TreeBranch::leaf(TreeTarget::Unit("b".to_string())),
            ],
        )
    }

    #[test]
    fn test_parse_profiles() {
        let json = r#"[
            {"type": "OneOfHexes", "values": {"options": [{"r": 1, "h": 0}]}},
            {"type": "NOfUnits", "values": {"units": ["1", "2"], "select_count": 2, "min_count": null}},
            {"type": "NoTarget", "values": {}},
            {"type": "HexRing", "values": {"centers": [{"r": 0, "h": 0}], "radius": 2}},
            {"type": "Cone", "values": {"from_hex": {"r": 0, "h": 0}, "to_hexes": [], "arm_lengths": [0, 1]}},
            {"type": "TriHex", "values": {"options": [[{"r": 0, "h": 0}, {"r": 1, "h": 0}, {"r": 0, "h": 1}]]}}
        ]"#;
        let profiles: Vec<TargetProfile> = serde_json::from_str(json).unwrap();
        assert_eq!(profiles.len(), 6);
        assert_eq!(profiles[0].name(), "OneOfHexes");
        assert!(matches!(&profiles[1], TargetProfile::NOfUnits(p) if p.select_count == 2));
        assert!(profiles[2].needs_active_unit());
        assert!(!profiles[0].needs_active_unit());
    }

    #[test]
    fn test_unknown_kind_rejected() {
        let json = r#"{"type": "Spiral", "values": {}}"#;
        assert!(serde_json::from_str::<TargetProfile>(json).is_err());
    }

    #[test]
    fn test_parse_tree() {
        let json = r#"{"type": "Tree", "values": {"root_node": {"label": "root", "options": [
            [{"unit": "a"}, {"label": "next", "options": [[{"hex": {"r": 1, "h": 0}}, null]]}],
            [{"hex": {"r": 0, "h": 1}}, null]
        ]}}}"#;
        let profile: TargetProfile = serde_json::from_str(json).unwrap();
        let TargetProfile::Tree(tree) = profile else {
            panic!("expected tree");
        };
        assert_eq!(tree.root_node.options.len(), 2);
        assert!(matches!(tree.root_node.options[1].next, TreeNext::Leaf));
        let child = tree.root_node.walk(&[0]).unwrap();
        assert_eq!(child.label, "next");

        let back = serde_json::to_value(&tree.root_node).unwrap();
        assert!(back["options"][1][1].is_null());
    }

    #[test]
    fn test_walk() {
        let tree = sample_tree();
        assert_eq!(tree.walk(&[]).unwrap().label, "root");
        assert_eq!(tree.walk(&[0]).unwrap().label, "pick hex");
        assert_eq!(tree.walk(&[0, 1]).unwrap().label, "confirm");
        assert!(tree.walk(&[1]).is_none());
        assert!(tree.walk(&[0, 0]).is_none());
        assert!(tree.walk(&[5]).is_none());
    }

    #[test]
    fn test_path_targets() {
        let tree = sample_tree();
        let targets = tree.path_targets(&[0, 1]);
        assert_eq!(
            targets,
            vec![&TreeTarget::Unit("a".to_string()), &TreeTarget::Hex(Cc::new(2, 0))]
        );
    }

    #[test]
    fn test_trihex_options_at() {
        let profile = TriHex {
            options: vec![
                [Cc::new(0, 0), Cc::new(1, 0), Cc::new(0, 1)],
                [Cc::new(1, 0), Cc::new(1, 1), Cc::new(0, 1)],
            ],
        };
        assert_eq!(profile.options_at(Cc::new(1, 0)), vec![0, 1]);
        assert_eq!(profile.options_at(Cc::new(0, 0)), vec![0]);
        assert!(profile.options_at(Cc::new(5, 5)).is_empty());
    }
}
