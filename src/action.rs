//! Agent actions - four movement directions plus a context-sensitive "use"

use serde::{Deserialize, Serialize};

/// Number of movement directions
pub const NUM_DIRECTIONS: usize = 4;

/// Total number of actions
pub const NUM_ACTIONS: usize = NUM_DIRECTIONS + 1;

/// All discrete actions an agent can take
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Action {
    /// Move one cell up (north)
    Up = 0,
    /// Move one cell right (east)
    Right = 1,
    /// Move one cell down (south)
    Down = 2,
    /// Move one cell left (west)
    Left = 3,
    /// Interact with the surroundings: collect, craft, clear terrain
    Use = 4,
}

impl Action {
    /// The (column, row) offset this action points at.
    ///
    /// `Use` has a zero offset: it targets the agent's own cell.
    pub fn offset(self) -> (i32, i32) {
        match self {
            Action::Up => (0, -1),
            Action::Right => (1, 0),
            Action::Down => (0, 1),
            Action::Left => (-1, 0),
            Action::Use => (0, 0),
        }
    }

    /// Check if this is a movement action
    pub fn is_movement(self) -> bool {
        !matches!(self, Action::Use)
    }

    /// Convert from action index (0-4) to Action
    pub fn from_index(index: u8) -> Option<Action> {
        match index {
            0 => Some(Action::Up),
            1 => Some(Action::Right),
            2 => Some(Action::Down),
            3 => Some(Action::Left),
            4 => Some(Action::Use),
            _ => None,
        }
    }

    /// All actions, in the order the interaction scan visits them
    pub fn all() -> [Action; NUM_ACTIONS] {
        [
            Action::Up,
            Action::Right,
            Action::Down,
            Action::Left,
            Action::Use,
        ]
    }

    /// Lowercase action name
    pub fn name(self) -> &'static str {
        match self {
            Action::Up => "up",
            Action::Right => "right",
            Action::Down => "down",
            Action::Left => "left",
            Action::Use => "use",
        }
    }
}

impl From<Action> for u8 {
    fn from(action: Action) -> u8 {
        action as u8
    }
}

impl TryFrom<u8> for Action {
    type Error = ();

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Action::from_index(value).ok_or(())
    }
}
