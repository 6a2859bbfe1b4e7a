//! Action space derivation
//!
//! `derive_action_space` is a pure function of the received state and the
//! open menu. It is cheap enough to call on every pointer event, so nothing
//! here caches between calls.

use crate::action_space::{aggregate, Action, ActionKind, ActionSpace, Effect};
use crate::decision::{DecisionOption, OptionTag, PlayerResponse};
use crate::error::Result;
use crate::hex::{arc, Cc};
use crate::menu::{Menu, MenuState, ProfileMenu};
use crate::profile::{TargetProfile, TreeTarget};
use crate::state::{Board, GameState};

/// Compute what every cell offers right now
pub fn derive_action_space(state: &GameState, menu: Option<&Menu>) -> Result<ActionSpace> {
    match menu {
        None => Ok(base_action_space(state)),
        Some(Menu::List { cc }) => Ok(list_action_space(state, *cc)),
        Some(Menu::Profile(menu)) => menu_action_space(state, menu),
    }
}

// ============================================================================
// BASE ACTION SPACE
// ============================================================================

/// Aggregated base action space, as shown when no menu is open
pub fn base_action_space(state: &GameState) -> ActionSpace {
    let raw = raw_base_actions(state);
    let previews = state
        .decision
        .as_ref()
        .map(|decision| decision.actions_preview())
        .unwrap_or_default();
    aggregate(raw, &state.map, &previews)
}

/// Every option's initial affordances, before crowding is resolved
pub fn raw_base_actions(state: &GameState) -> ActionSpace {
    let mut space = ActionSpace::for_board(&state.map);
    let Some(decision) = &state.decision else {
        return space;
    };

    for (index, option) in decision.options.iter().enumerate() {
        place_option(&mut space, state, index, option);
    }

    space.button = skip_button(decision.options.as_slice());
    space
}

/// Initial affordances for one option
fn place_option(space: &mut ActionSpace, state: &GameState, index: usize, option: &DecisionOption) {
    let board = &state.map;
    let active = state.active_unit_position();
    if option.target_profile.needs_active_unit() && active.is_none() {
        tracing::debug!(option = index, kind = option.target_profile.name(), "no active unit on board, omitting");
        return;
    }
    let source = option.kind.tag();
    let template = BaseAction {
        source,
        description: option.description(),
    };

    match &option.target_profile {
        TargetProfile::OneOfUnits(profile) => {
            for (target, unit_id) in profile.units.iter().enumerate() {
                let Some(cc) = board.unit_position(unit_id) else {
                    tracing::debug!(option = index, unit = %unit_id, "unit not on board, omitting");
                    continue;
                };
                let effect = Effect::Submit(PlayerResponse::with_index(index, target));
                space.push(cc, template.build(effect, profile.labels.get(target)));
            }
        }
        TargetProfile::OneOfHexes(profile) => {
            for (target, &cc) in profile.options.iter().enumerate() {
                let effect = Effect::Submit(PlayerResponse::with_index(index, target));
                if !space.push(cc, template.build(effect, profile.labels.get(target))) {
                    tracing::debug!(option = index, %cc, "hex not on board, omitting");
                }
            }
        }
        TargetProfile::NOfUnits(profile) => {
            for (target, unit_id) in profile.units.iter().enumerate() {
                let Some(cc) = board.unit_position(unit_id) else {
                    tracing::debug!(option = index, unit = %unit_id, "unit not on board, omitting");
                    continue;
                };
                let step = ProfileMenu::start_units(index, profile, target);
                space.push(cc, template.build(step.into(), profile.labels.get(target)));
            }
        }
        TargetProfile::NOfHexes(profile) => {
            for (target, &cc) in profile.options.iter().enumerate() {
                let step = ProfileMenu::start_hexes(index, profile, target);
                space.push(cc, template.build(step.into(), profile.labels.get(target)));
            }
        }
        TargetProfile::Tree(profile) => {
            for (branch_idx, branch) in profile.root_node.options.iter().enumerate() {
                let Some(cc) = tree_target_position(board, &branch.target) else {
                    tracing::debug!(option = index, branch = branch_idx, "tree target not on board, omitting");
                    continue;
                };
                let step = ProfileMenu::start_tree(index, profile, branch_idx);
                space.push(cc, template.build(step.into(), None));
            }
        }
        TargetProfile::NoTarget(_) => {
            if let Some(cc) = active {
                let effect = Effect::Submit(PlayerResponse::untargeted(index));
                space.push(cc, template.build(effect, None));
            }
        }
        TargetProfile::ConsecutiveAdjacentHexes(_)
        | TargetProfile::HexHexes(_)
        | TargetProfile::HexRing(_)
        | TargetProfile::RadiatingLine(_)
        | TargetProfile::Cone(_)
        | TargetProfile::TriHex(_) => {
            let Some(cc) = active else {
                return;
            };
            if let Some(menu) = ProfileMenu::area(index, &option.target_profile) {
                space.push(cc, template.build(Effect::Transition(menu.into()), None));
            }
        }
    }
}

/// Shared fields of every action an option places
struct BaseAction {
    source: OptionTag,
    description: Option<String>,
}

impl BaseAction {
    fn build(&self, effect: Effect, label: Option<&String>) -> Action {
        let kind = if effect.opens_menu() {
            ActionKind::Menu
        } else {
            match self.source {
                OptionTag::Move => ActionKind::Move,
                OptionTag::ActivateUnit => ActionKind::Activate,
                OptionTag::Skip | OptionTag::Effort => ActionKind::Generic,
            }
        };
        Action::new(kind, effect)
            .with_source(self.source)
            .with_description(label.cloned().or_else(|| self.description.clone()))
    }
}

/// The first untargeted skip option doubles as the button
fn skip_button(options: &[DecisionOption]) -> Option<Action> {
    options.iter().enumerate().find_map(|(index, option)| {
        let is_plain_skip = option.kind.tag() == OptionTag::Skip
            && matches!(option.target_profile, TargetProfile::NoTarget(_));
        is_plain_skip.then(|| {
            Action::new(
                ActionKind::Generic,
                Effect::Submit(PlayerResponse::untargeted(index)),
            )
            .with_source(OptionTag::Skip)
            .with_description(Some("skip".to_string()))
        })
    })
}

fn tree_target_position(board: &Board, target: &TreeTarget) -> Option<Cc> {
    match target {
        TreeTarget::Unit(id) => board.unit_position(id),
        TreeTarget::Hex(cc) => board.contains(*cc).then_some(*cc),
    }
}

// ============================================================================
// LIST MENU
// ============================================================================

/// Overflow list: the raw base actions of one cell, as side menu items
pub fn list_action_space(state: &GameState, cc: Cc) -> ActionSpace {
    let raw = raw_base_actions(state);
    let mut space = ActionSpace::for_board(&state.map);
    let items = raw.get(cc).map(|cell| cell.actions.clone()).unwrap_or_default();
    match space.get_mut(cc) {
        Some(cell) => {
            cell.side_menu_items = Some(items);
            cell.highlighted = true;
        }
        None => tracing::debug!(%cc, "list menu opened on a hex that left the board"),
    }
    space
}

// ============================================================================
// PROFILE MENUS
// ============================================================================

/// Action space while a multi-step menu is open
pub fn menu_action_space(state: &GameState, menu: &ProfileMenu) -> Result<ActionSpace> {
    let board = &state.map;
    let mut space = ActionSpace::for_board(board);
    let Some(option) = state
        .decision
        .as_ref()
        .and_then(|decision| decision.options.get(menu.option_index))
    else {
        tracing::debug!(option = menu.option_index, "menu option missing from decision");
        return Ok(space);
    };
    let source = option.kind.tag();

    let select = |idx: usize| -> Action {
        let effect: Effect = menu.select(idx).into();
        Action::new(ActionKind::Select, effect).with_source(source)
    };

    match &menu.state {
        MenuState::NOfUnits { profile, selected } => {
            let positions = profile.units.iter().map(|id| board.unit_position(id));
            place_candidates(&mut space, positions, selected, &select);
            space.button = finish_button(menu, source);
        }
        MenuState::NOfHexes { profile, selected } => {
            let positions = profile.options.iter().map(|&cc| Some(cc));
            place_candidates(&mut space, positions, selected, &select);
            space.button = finish_button(menu, source);
        }
        MenuState::Tree {
            profile,
            selected_indexes,
        } => {
            for target in profile.root_node.path_targets(selected_indexes) {
                if let Some(cc) = tree_target_position(board, target) {
                    space.highlight(cc);
                }
            }
            match profile.root_node.walk(selected_indexes) {
                Some(node) => {
                    for (idx, branch) in node.options.iter().enumerate() {
                        if let Some(cc) = tree_target_position(board, &branch.target) {
                            space.push(cc, select(idx));
                        }
                    }
                }
                None => tracing::debug!(path = ?selected_indexes, "tree path does not reach a node"),
            }
        }
        MenuState::ConsecutiveAdjacentHexes { profile, hovered } => {
            let candidates = profile.adjacent_to.neighbors();
            for (direction, &cc) in candidates.iter().enumerate() {
                space.push(cc, select(direction));
            }
            if let Some(hovered) = hovered.filter(|cc| candidates.contains(cc)) {
                for cc in arc(1, profile.arm_length, hovered, profile.adjacent_to)? {
                    space.highlight(cc);
                }
            }
        }
        MenuState::HexHexes { profile, hovered } => {
            place_targets(&mut space, &profile.centers, &select);
            // The preview follows the pointer, listed center or not
            if let Some(center) = *hovered {
                for cc in board.ccs() {
                    if center.distance_to(cc) <= profile.radius {
                        space.highlight(cc);
                    }
                }
            }
        }
        MenuState::HexRing { profile, hovered } => {
            place_targets(&mut space, &profile.centers, &select);
            if let Some(center) = *hovered {
                for cc in board.ccs() {
                    if center.distance_to(cc) == profile.radius {
                        space.highlight(cc);
                    }
                }
            }
        }
        MenuState::RadiatingLine { profile, hovered } => {
            place_targets(&mut space, &profile.to_hexes, &select);
            if let Some(to) = hovered.filter(|cc| profile.to_hexes.contains(cc)) {
                let step = to - profile.from_hex;
                for k in 1..=profile.length as i32 {
                    space.highlight(profile.from_hex + step * k);
                }
            }
        }
        MenuState::Cone { profile, hovered } => {
            place_targets(&mut space, &profile.to_hexes, &select);
            // Only a neighbor of the origin gives a direction to extrapolate
            let direction = hovered.filter(|cc| {
                profile.to_hexes.contains(cc) && profile.from_hex.distance_to(*cc) == 1
            });
            if let Some(to) = direction {
                let step = to - profile.from_hex;
                for (i, &arm_length) in profile.arm_lengths.iter().enumerate() {
                    let distance = i as u32 + 1;
                    let stroke = profile.from_hex + step * distance as i32;
                    for cc in arc(distance, arm_length, stroke, profile.from_hex)? {
                        space.highlight(cc);
                    }
                }
            }
        }
        MenuState::TriHex { profile, hovered } => {
            for cc in board.ccs() {
                let options = profile.options_at(cc);
                let Some(&first) = options.first() else {
                    continue;
                };
                if let Some(cell) = space.get_mut(cc) {
                    cell.actions.push(select(first));
                    if options.len() > 1 {
                        cell.side_menu_items = Some(options.iter().map(|&idx| select(idx)).collect());
                    }
                }
            }
            if let Some(first) = hovered.and_then(|cc| profile.options_at(cc).first().copied()) {
                for cc in profile.options[first] {
                    space.highlight(cc);
                }
            }
        }
    }

    if tracks_hover(&menu.state) {
        for cell in space.cells.values_mut() {
            cell.hover = menu
                .hovering(cell.cc)
                .map(|next| Effect::Transition(next.into()));
        }
    }

    Ok(space)
}

fn tracks_hover(state: &MenuState) -> bool {
    !matches!(
        state,
        MenuState::NOfUnits { .. } | MenuState::NOfHexes { .. } | MenuState::Tree { .. }
    )
}

/// N-of candidates: selected ones light up, the rest are clickable
fn place_candidates(
    space: &mut ActionSpace,
    positions: impl Iterator<Item = Option<Cc>>,
    selected: &[usize],
    select: &impl Fn(usize) -> Action,
) {
    for (idx, position) in positions.enumerate() {
        let Some(cc) = position else {
            continue;
        };
        if selected.contains(&idx) {
            space.highlight(cc);
        } else {
            space.push(cc, select(idx));
        }
    }
}

fn place_targets(space: &mut ActionSpace, targets: &[Cc], select: &impl Fn(usize) -> Action) {
    for (idx, &cc) in targets.iter().enumerate() {
        space.push(cc, select(idx));
    }
}

fn finish_button(menu: &ProfileMenu, source: OptionTag) -> Option<Action> {
    menu.finish().map(|response| {
        Action::new(ActionKind::Generic, Effect::Submit(response))
            .with_source(source)
            .with_description(Some("finish selection".to_string()))
    })
}
