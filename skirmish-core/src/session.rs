//! Client session
//!
//! Owns the last received snapshot and the open menu, turns pointer input
//! into effects and forwards submitted responses to a [`ResponseSink`].
//! The action space is re-derived from scratch for every input, so the
//! session never holds affordances that could go stale.

use serde::{Deserialize, Serialize};

use crate::action_space::{ActionSpace, Effect};
use crate::decision::PlayerResponse;
use crate::error::{CoreError, Result};
use crate::hex::Cc;
use crate::interpret::derive_action_space;
use crate::menu::Menu;
use crate::state::GameState;

/// Destination for responses the player submits
pub trait ResponseSink {
    fn send(&mut self, response: PlayerResponse);
}

/// Outbox; the caller drains it
impl ResponseSink for Vec<PlayerResponse> {
    fn send(&mut self, response: PlayerResponse) {
        self.push(response);
    }
}

impl<F: FnMut(PlayerResponse)> ResponseSink for F {
    fn send(&mut self, response: PlayerResponse) {
        self(response)
    }
}

/// One unit of player or server input
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum InputEvent {
    StateReceived { state: GameState },
    Click { cc: Cc, action: usize },
    SideItem { cc: Cc, item: usize },
    Hover { cc: Cc },
    Button,
    Cancel,
}

pub struct ClientSession<S: ResponseSink> {
    state: Option<GameState>,
    menu: Option<Menu>,
    sink: S,
    redraw: bool,
}

impl<S: ResponseSink> ClientSession<S> {
    pub fn new(sink: S) -> Self {
        Self {
            state: None,
            menu: None,
            sink,
            redraw: false,
        }
    }

    pub fn state(&self) -> Option<&GameState> {
        self.state.as_ref()
    }

    pub fn menu(&self) -> Option<&Menu> {
        self.menu.as_ref()
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// Replace the snapshot; any open menu belongs to the old decision
    pub fn receive_state(&mut self, state: GameState) {
        if self.menu.take().is_some() {
            tracing::debug!("new state received, discarding open menu");
        }
        tracing::info!(
            hexes = state.map.len(),
            options = state.decision.as_ref().map_or(0, |d| d.options.len()),
            "state received"
        );
        self.state = Some(state);
        self.redraw = true;
    }

    /// Affordances for the current snapshot and menu
    pub fn action_space(&self) -> Result<ActionSpace> {
        match &self.state {
            Some(state) => derive_action_space(state, self.menu.as_ref()),
            None => Ok(ActionSpace::default()),
        }
    }

    pub fn click(&mut self, cc: Cc, action_index: usize) -> Result<()> {
        let space = self.action_space()?;
        let cell = space.get(cc).ok_or(CoreError::UnknownHex(cc))?;
        let action = cell.actions.get(action_index).ok_or(CoreError::NoSuchAction {
            cc,
            index: action_index,
        })?;
        self.apply(action.effect.clone());
        Ok(())
    }

    pub fn click_side_item(&mut self, cc: Cc, item_index: usize) -> Result<()> {
        let space = self.action_space()?;
        let cell = space.get(cc).ok_or(CoreError::UnknownHex(cc))?;
        let item = cell
            .side_menu_items
            .as_ref()
            .and_then(|items| items.get(item_index))
            .ok_or(CoreError::NoSuchAction {
                cc,
                index: item_index,
            })?;
        self.apply(item.effect.clone());
        Ok(())
    }

    /// Pointer entered `cc`; a no-op unless the open menu tracks hover
    pub fn hover(&mut self, cc: Cc) -> Result<()> {
        let space = self.action_space()?;
        let cell = space.get(cc).ok_or(CoreError::UnknownHex(cc))?;
        if let Some(effect) = cell.hover.clone() {
            self.apply(effect);
        }
        Ok(())
    }

    pub fn press_button(&mut self) -> Result<()> {
        let space = self.action_space()?;
        let button = space.button.ok_or(CoreError::NoButton)?;
        self.apply(button.effect);
        Ok(())
    }

    /// Drop the open menu without sending anything
    pub fn cancel(&mut self) {
        self.apply(Effect::CloseMenu);
    }

    pub fn handle(&mut self, event: InputEvent) -> Result<()> {
        match event {
            InputEvent::StateReceived { state } => {
                self.receive_state(state);
                Ok(())
            }
            InputEvent::Click { cc, action } => self.click(cc, action),
            InputEvent::SideItem { cc, item } => self.click_side_item(cc, item),
            InputEvent::Hover { cc } => self.hover(cc),
            InputEvent::Button => self.press_button(),
            InputEvent::Cancel => {
                self.cancel();
                Ok(())
            }
        }
    }

    /// Whether anything changed since the last call
    pub fn take_redraw(&mut self) -> bool {
        std::mem::take(&mut self.redraw)
    }

    fn apply(&mut self, effect: Effect) {
        match effect {
            Effect::Submit(response) => {
                tracing::info!(option = response.index, "submitting response");
                self.menu = None;
                self.sink.send(response);
                self.redraw = true;
            }
            Effect::Transition(menu) => {
                if self.menu.as_ref() != Some(&menu) {
                    tracing::debug!(option = ?menu.option_index(), "menu transition");
                    self.menu = Some(menu);
                    self.redraw = true;
                }
            }
            Effect::CloseMenu => {
                if self.menu.take().is_some() {
                    self.redraw = true;
                }
            }
        }
    }
}

impl Default for ClientSession<Vec<PlayerResponse>> {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl ClientSession<Vec<PlayerResponse>> {
    /// Take every response submitted since the last drain
    pub fn drain_responses(&mut self) -> Vec<PlayerResponse> {
        std::mem::take(&mut self.sink)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decision::{Decision, DecisionOption, FacetSummary, OptionKind};
    use crate::hex::circle;
    use crate::profile::{HexRing, NOfHexes, NoTarget, OneOfHexes, TargetProfile};
    use crate::state::{Board, HexCell, Unit};

    fn effort(profile: TargetProfile) -> DecisionOption {
        DecisionOption::new(
            OptionKind::Effort {
                facet: FacetSummary {
                    name: "Blast".to_string(),
                },
            },
            profile,
        )
    }

    fn state(options: Vec<DecisionOption>) -> GameState {
        let hexes = circle(2, Cc::ORIGIN)
            .into_iter()
            .map(|cc| {
                let cell = HexCell::new(cc, "plains");
                if cc == Cc::ORIGIN {
                    cell.with_unit(Unit::new("hero", "mage", "p1"))
                } else {
                    cell
                }
            })
            .collect();
        GameState::new(Board::new(hexes).unwrap(), Some(Decision::new(options)))
            .with_active_unit(Unit::new("hero", "mage", "p1"))
    }

    fn ring_state() -> GameState {
        state(vec![effort(TargetProfile::HexRing(HexRing {
            centers: vec![Cc::new(1, 0)],
            radius: 1,
        }))])
    }

    #[test]
    fn test_empty_session() {
        let mut session = ClientSession::default();
        assert!(session.action_space().unwrap().cells.is_empty());
        assert!(!session.take_redraw());
        assert!(matches!(session.press_button(), Err(CoreError::NoButton)));
    }

    #[test]
    fn test_click_submits() {
        let mut session = ClientSession::default();
        session.receive_state(state(vec![effort(TargetProfile::OneOfHexes(OneOfHexes {
            options: vec![Cc::new(0, 1)],
            labels: Vec::new(),
        }))]));
        assert!(session.take_redraw());
        session.click(Cc::new(0, 1), 0).unwrap();
        assert_eq!(session.drain_responses(), vec![PlayerResponse::with_index(0, 0)]);
        assert!(session.take_redraw());
    }

    #[test]
    fn test_bad_clicks_are_errors() {
        let mut session = ClientSession::default();
        session.receive_state(ring_state());
        assert!(matches!(
            session.click(Cc::new(1, 1), 0),
            Err(CoreError::NoSuchAction { index: 0, .. })
        ));
        assert!(matches!(
            session.click(Cc::new(7, 7), 0),
            Err(CoreError::UnknownHex(_))
        ));
        assert!(session.drain_responses().is_empty());
    }

    #[test]
    fn test_menu_flow_with_closure_sink() {
        let mut sent: Vec<PlayerResponse> = Vec::new();
        {
            let mut session = ClientSession::new(|response: PlayerResponse| sent.push(response));
            session.receive_state(ring_state());
            session.click(Cc::ORIGIN, 0).unwrap();
            assert!(session.menu().is_some());

            session.hover(Cc::new(1, 0)).unwrap();
            let space = session.action_space().unwrap();
            assert_eq!(space.highlighted().count(), 6);

            session.click(Cc::new(1, 0), 0).unwrap();
            assert!(session.menu().is_none());
        }
        assert_eq!(sent, vec![PlayerResponse::with_index(0, 0)]);
    }

    #[test]
    fn test_hover_outside_menu_is_noop() {
        let mut session = ClientSession::default();
        session.receive_state(ring_state());
        session.take_redraw();
        session.hover(Cc::new(1, 0)).unwrap();
        assert!(session.menu().is_none());
        assert!(!session.take_redraw());
    }

    #[test]
    fn test_cancel_and_new_state_drop_menu() {
        let mut session = ClientSession::default();
        session.receive_state(ring_state());
        session.click(Cc::ORIGIN, 0).unwrap();
        session.cancel();
        assert!(session.menu().is_none());

        session.click(Cc::ORIGIN, 0).unwrap();
        session.receive_state(ring_state());
        assert!(session.menu().is_none());
        assert!(session.drain_responses().is_empty());
    }

    #[test]
    fn test_button_finishes_selection() {
        let mut session = ClientSession::default();
        session.receive_state(state(vec![effort(TargetProfile::NOfHexes(NOfHexes {
            options: vec![Cc::new(0, 1), Cc::new(1, 0), Cc::new(-1, 0)],
            select_count: 3,
            min_count: Some(2),
            labels: Vec::new(),
        }))]));
        session.click(Cc::new(1, 0), 0).unwrap();
        assert!(session.action_space().unwrap().button.is_none());
        session.click(Cc::new(0, 1), 0).unwrap();
        session.press_button().unwrap();
        assert_eq!(
            session.drain_responses(),
            vec![PlayerResponse::with_indexes(0, vec![1, 0])]
        );
    }

    #[test]
    fn test_handle_dispatches_events() {
        let mut session = ClientSession::default();
        let events = vec![
            InputEvent::StateReceived {
                state: state(vec![DecisionOption::new(
                    OptionKind::Skip,
                    TargetProfile::NoTarget(NoTarget {}),
                )]),
            },
            InputEvent::Cancel,
            InputEvent::Button,
        ];
        for event in events {
            session.handle(event).unwrap();
        }
        assert_eq!(session.drain_responses(), vec![PlayerResponse::untargeted(0)]);
    }

    #[test]
    fn test_input_event_json() {
        let event: InputEvent =
            serde_json::from_str(r#"{"event": "click", "cc": {"r": 1, "h": -1}, "action": 0}"#)
                .unwrap();
        assert_eq!(
            event,
            InputEvent::Click {
                cc: Cc::new(1, -1),
                action: 0
            }
        );
        let button: InputEvent = serde_json::from_str(r#"{"event": "button"}"#).unwrap();
        assert_eq!(button, InputEvent::Button);
    }
}
