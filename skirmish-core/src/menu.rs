//! Multi-step selection menus
//!
//! A menu exists only while the player is partway through answering an
//! option that needs more than one click. Every transition builds a new
//! value; nothing is mutated in place, so dropping a menu at any point is a
//! complete cancel.

use serde::{Deserialize, Serialize};

use crate::decision::PlayerResponse;
use crate::hex::Cc;
use crate::profile::{
    Cone, ConsecutiveAdjacentHexes, HexHexes, HexRing, NOfHexes, NOfUnits, RadiatingLine,
    TargetProfile, Tree, TreeNext, TriHex,
};

/// Client-side selection state
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "menu", rename_all = "snake_case")]
pub enum Menu {
    /// Progress through one decision option
    Profile(ProfileMenu),
    /// Overflow list of every base action on one crowded cell
    List { cc: Cc },
}

impl Menu {
    pub fn option_index(&self) -> Option<usize> {
        match self {
            Menu::Profile(menu) => Some(menu.option_index),
            Menu::List { .. } => None,
        }
    }
}

impl From<ProfileMenu> for Menu {
    fn from(menu: ProfileMenu) -> Self {
        Menu::Profile(menu)
    }
}

/// Menu answering the option at `option_index`
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileMenu {
    pub option_index: usize,
    pub state: MenuState,
}

/// Per-kind progress
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum MenuState {
    NOfUnits {
        profile: NOfUnits,
        /// Candidate indexes in selection order
        selected: Vec<usize>,
    },
    NOfHexes {
        profile: NOfHexes,
        selected: Vec<usize>,
    },
    Tree {
        profile: Tree,
        selected_indexes: Vec<usize>,
    },
    ConsecutiveAdjacentHexes {
        profile: ConsecutiveAdjacentHexes,
        hovered: Option<Cc>,
    },
    HexHexes {
        profile: HexHexes,
        hovered: Option<Cc>,
    },
    HexRing {
        profile: HexRing,
        hovered: Option<Cc>,
    },
    RadiatingLine {
        profile: RadiatingLine,
        hovered: Option<Cc>,
    },
    Cone {
        profile: Cone,
        hovered: Option<Cc>,
    },
    TriHex {
        profile: TriHex,
        hovered: Option<Cc>,
    },
}

/// Result of a selection inside a menu
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Step {
    Submit(PlayerResponse),
    Advance(ProfileMenu),
}

impl ProfileMenu {
    pub fn new(option_index: usize, state: MenuState) -> Self {
        Self {
            option_index,
            state,
        }
    }

    /// Menu for an area profile, with nothing hovered yet
    ///
    /// Returns `None` for kinds that do not open an area menu.
    pub fn area(option_index: usize, profile: &TargetProfile) -> Option<Self> {
        let state = match profile {
            TargetProfile::ConsecutiveAdjacentHexes(p) => MenuState::ConsecutiveAdjacentHexes {
                profile: p.clone(),
                hovered: None,
            },
            TargetProfile::HexHexes(p) => MenuState::HexHexes {
                profile: p.clone(),
                hovered: None,
            },
            TargetProfile::HexRing(p) => MenuState::HexRing {
                profile: p.clone(),
                hovered: None,
            },
            TargetProfile::RadiatingLine(p) => MenuState::RadiatingLine {
                profile: p.clone(),
                hovered: None,
            },
            TargetProfile::Cone(p) => MenuState::Cone {
                profile: p.clone(),
                hovered: None,
            },
            TargetProfile::TriHex(p) => MenuState::TriHex {
                profile: p.clone(),
                hovered: None,
            },
            TargetProfile::OneOfUnits(_)
            | TargetProfile::OneOfHexes(_)
            | TargetProfile::NOfUnits(_)
            | TargetProfile::NOfHexes(_)
            | TargetProfile::NoTarget(_)
            | TargetProfile::Tree(_) => return None,
        };
        Some(Self::new(option_index, state))
    }

    /// First pick of an N-of-units selection
    pub fn start_units(option_index: usize, profile: &NOfUnits, candidate: usize) -> Step {
        let menu = Self::new(
            option_index,
            MenuState::NOfUnits {
                profile: profile.clone(),
                selected: Vec::new(),
            },
        );
        menu.select(candidate)
    }

    /// First pick of an N-of-hexes selection
    pub fn start_hexes(option_index: usize, profile: &NOfHexes, candidate: usize) -> Step {
        let menu = Self::new(
            option_index,
            MenuState::NOfHexes {
                profile: profile.clone(),
                selected: Vec::new(),
            },
        );
        menu.select(candidate)
    }

    /// First branch of a tree selection
    pub fn start_tree(option_index: usize, profile: &Tree, branch: usize) -> Step {
        let menu = Self::new(
            option_index,
            MenuState::Tree {
                profile: profile.clone(),
                selected_indexes: Vec::new(),
            },
        );
        menu.select(branch)
    }

    /// Choose candidate / branch `idx`
    ///
    /// For N-of menus this appends a candidate and submits once
    /// `select_count` is reached. For trees it follows a branch and submits
    /// when the branch is a leaf. Area menus submit the chosen target
    /// directly: `idx` indexes the profile's target list, or the neighbor
    /// order for consecutive adjacent hexes.
    pub fn select(&self, idx: usize) -> Step {
        let index = self.option_index;
        match &self.state {
            MenuState::NOfUnits { profile, selected } => {
                let selected = appended(selected, idx);
                if selected.len() >= profile.select_count {
                    Step::Submit(PlayerResponse::with_indexes(index, selected))
                } else {
                    Step::Advance(Self::new(
                        index,
                        MenuState::NOfUnits {
                            profile: profile.clone(),
                            selected,
                        },
                    ))
                }
            }
            MenuState::NOfHexes { profile, selected } => {
                let selected = appended(selected, idx);
                if selected.len() >= profile.select_count {
                    Step::Submit(PlayerResponse::with_indexes(index, selected))
                } else {
                    Step::Advance(Self::new(
                        index,
                        MenuState::NOfHexes {
                            profile: profile.clone(),
                            selected,
                        },
                    ))
                }
            }
            MenuState::Tree {
                profile,
                selected_indexes,
            } => {
                let path = appended(selected_indexes, idx);
                let leads_on = profile
                    .root_node
                    .walk(selected_indexes)
                    .and_then(|node| node.options.get(idx))
                    .is_some_and(|branch| matches!(branch.next, TreeNext::Node(_)));
                if leads_on {
                    Step::Advance(Self::new(
                        index,
                        MenuState::Tree {
                            profile: profile.clone(),
                            selected_indexes: path,
                        },
                    ))
                } else {
                    Step::Submit(PlayerResponse::with_indexes(index, path))
                }
            }
            MenuState::ConsecutiveAdjacentHexes { profile, .. } => Step::Submit(
                PlayerResponse::with_cc(index, profile.adjacent_to.neighbor(idx)),
            ),
            MenuState::HexHexes { .. }
            | MenuState::HexRing { .. }
            | MenuState::RadiatingLine { .. }
            | MenuState::Cone { .. }
            | MenuState::TriHex { .. } => Step::Submit(PlayerResponse::with_index(index, idx)),
        }
    }

    /// Submit an N-of selection early, once `min_count` is met
    pub fn finish(&self) -> Option<PlayerResponse> {
        let (min_count, selected) = match &self.state {
            MenuState::NOfUnits { profile, selected } => (profile.min_count, selected),
            MenuState::NOfHexes { profile, selected } => (profile.min_count, selected),
            _ => return None,
        };
        let min_count = min_count?;
        (selected.len() >= min_count)
            .then(|| PlayerResponse::with_indexes(self.option_index, selected.clone()))
    }

    /// Same menu previewing `cc`
    ///
    /// Returns `None` for kinds that ignore hover.
    pub fn hovering(&self, cc: Cc) -> Option<Self> {
        let mut next = self.clone();
        match &mut next.state {
            MenuState::ConsecutiveAdjacentHexes { hovered, .. }
            | MenuState::HexHexes { hovered, .. }
            | MenuState::HexRing { hovered, .. }
            | MenuState::RadiatingLine { hovered, .. }
            | MenuState::Cone { hovered, .. }
            | MenuState::TriHex { hovered, .. } => *hovered = Some(cc),
            MenuState::NOfUnits { .. } | MenuState::NOfHexes { .. } | MenuState::Tree { .. } => {
                return None
            }
        }
        Some(next)
    }

    /// Currently previewed cell, for hover-tracking kinds
    pub fn hovered(&self) -> Option<Cc> {
        match &self.state {
            MenuState::ConsecutiveAdjacentHexes { hovered, .. }
            | MenuState::HexHexes { hovered, .. }
            | MenuState::HexRing { hovered, .. }
            | MenuState::RadiatingLine { hovered, .. }
            | MenuState::Cone { hovered, .. }
            | MenuState::TriHex { hovered, .. } => *hovered,
            MenuState::NOfUnits { .. } | MenuState::NOfHexes { .. } | MenuState::Tree { .. } => {
                None
            }
        }
    }
}

fn appended(items: &[usize], item: usize) -> Vec<usize> {
    let mut items = items.to_vec();
    items.push(item);
    items
}
