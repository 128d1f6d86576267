//! Flat state snapshots for cloning and persistence
//!
//! A snapshot is fully self-describing: everything needed to rebuild an
//! identical state with no external context. It is the only supported
//! persistence path and what binding layers use for equality, hashing,
//! and pickling support.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::element::Element;
use crate::error::CraftworldError;
use crate::fingerprint::Fingerprint;
use crate::inventory::Inventory;
use crate::state::GameState;

/// Flat, serializable form of a [`GameState`].
///
/// Grid cells, the goal, and inventory keys are raw element codes so the
/// layout survives language boundaries.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub rows: usize,
    pub cols: usize,
    pub agent_idx: usize,
    pub grid: Vec<u8>,
    pub goal: u8,
    pub reward_signal: u64,
    pub hash: u64,
    pub inventory: BTreeMap<u8, u32>,
}

impl Snapshot {
    /// Encode as a JSON string
    pub fn to_json(&self) -> Result<String, CraftworldError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Decode from a JSON string
    pub fn from_json(json: &str) -> Result<Self, CraftworldError> {
        Ok(serde_json::from_str(json)?)
    }
}

impl GameState {
    /// Capture the full state as a flat snapshot
    pub fn pack(&self) -> Snapshot {
        Snapshot {
            rows: self.rows,
            cols: self.cols,
            agent_idx: self.agent_idx,
            grid: self.grid.iter().map(|element| element.code()).collect(),
            goal: self.goal.code(),
            reward_signal: self.reward_signal,
            hash: self.fingerprint.value(),
            inventory: self
                .inventory
                .iter()
                .map(|(element, count)| (element.code(), count))
                .collect(),
        }
    }

    /// Rebuild a state from a snapshot, validating shape and codes before
    /// any state is materialized.
    pub fn unpack(snapshot: Snapshot) -> Result<Self, CraftworldError> {
        let flat_size = snapshot.rows * snapshot.cols;
        if snapshot.grid.len() != flat_size {
            return Err(CraftworldError::InvalidSnapshot(format!(
                "{}x{} grid needs {} cells, got {}",
                snapshot.rows,
                snapshot.cols,
                flat_size,
                snapshot.grid.len()
            )));
        }
        if snapshot.agent_idx >= flat_size {
            return Err(CraftworldError::InvalidSnapshot(format!(
                "agent index {} outside {} cells",
                snapshot.agent_idx, flat_size
            )));
        }

        let goal = Element::from_code(snapshot.goal)
            .filter(|element| element.is_goal())
            .ok_or(CraftworldError::InvalidGoal(snapshot.goal as i64))?;

        let mut grid = Vec::with_capacity(flat_size);
        for &code in &snapshot.grid {
            let element =
                Element::from_code(code).ok_or(CraftworldError::UnknownElement(code as i64))?;
            grid.push(element);
        }

        // The inventory is rebuilt through the usual mutators against a
        // throwaway fingerprint; the authoritative value comes from the
        // snapshot itself.
        let mut inventory = Inventory::new();
        let mut scratch = Fingerprint::default();
        for (&code, &count) in &snapshot.inventory {
            let element =
                Element::from_code(code).ok_or(CraftworldError::UnknownElement(code as i64))?;
            if count == 0 {
                return Err(CraftworldError::InvalidSnapshot(format!(
                    "zero-count inventory entry for element {}",
                    code
                )));
            }
            inventory.add(element, count, flat_size, &mut scratch);
        }

        Ok(GameState {
            rows: snapshot.rows,
            cols: snapshot.cols,
            agent_idx: snapshot.agent_idx,
            grid,
            goal,
            reward_signal: snapshot.reward_signal,
            fingerprint: Fingerprint::from_raw(snapshot.hash),
            inventory,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::Action;

    fn sample_state() -> GameState {
        let mut state = GameState::from_board("2|3|11|0|26|11|26|7|26").unwrap();
        state.apply_action(Action::Right);
        state.apply_action(Action::Use);
        state
    }

    #[test]
    fn test_round_trip() {
        let state = sample_state();
        let restored = GameState::unpack(state.pack()).unwrap();

        assert_eq!(restored, state);
        assert_eq!(restored.get_hash(), state.get_hash());
        assert_eq!(restored.get_reward_signal(), state.get_reward_signal());
        assert_eq!(restored.get_agent_index(), state.get_agent_index());
        assert_eq!(restored.recompute_hash(), restored.get_hash());
    }

    #[test]
    fn test_json_round_trip() {
        let state = sample_state();
        let json = state.pack().to_json().unwrap();
        let restored = GameState::unpack(Snapshot::from_json(&json).unwrap()).unwrap();
        assert_eq!(restored, state);
        assert_eq!(restored.get_hash(), state.get_hash());
    }

    #[test]
    fn test_unpack_rejects_wrong_grid_length() {
        let mut snapshot = sample_state().pack();
        snapshot.grid.pop();
        assert!(matches!(
            GameState::unpack(snapshot),
            Err(CraftworldError::InvalidSnapshot(_))
        ));
    }

    #[test]
    fn test_unpack_rejects_bad_codes() {
        let mut snapshot = sample_state().pack();
        snapshot.grid[0] = 99;
        assert!(matches!(
            GameState::unpack(snapshot),
            Err(CraftworldError::UnknownElement(99))
        ));

        let mut snapshot = sample_state().pack();
        snapshot.goal = 1;
        assert!(matches!(
            GameState::unpack(snapshot),
            Err(CraftworldError::InvalidGoal(1))
        ));
    }

    #[test]
    fn test_unpack_rejects_out_of_range_agent() {
        let mut snapshot = sample_state().pack();
        snapshot.agent_idx = snapshot.grid.len();
        assert!(matches!(
            GameState::unpack(snapshot),
            Err(CraftworldError::InvalidSnapshot(_))
        ));
    }

    #[test]
    fn test_unpack_rejects_zero_count_entries() {
        let mut snapshot = sample_state().pack();
        snapshot.inventory.insert(Element::Stick.code(), 0);
        assert!(matches!(
            GameState::unpack(snapshot),
            Err(CraftworldError::InvalidSnapshot(_))
        ));
    }

    #[test]
    fn test_restored_state_keeps_playing_consistently() {
        let state = sample_state();
        let mut restored = GameState::unpack(state.pack()).unwrap();

        restored.apply_action(Action::Down);
        restored.apply_action(Action::Use);
        assert_eq!(restored.get_hash(), restored.recompute_hash());
    }
}
