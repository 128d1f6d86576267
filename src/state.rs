//! Game state and the action transition engine
//!
//! A [`GameState`] is a value-like unit: constructed once from a board
//! description, mutated in place by [`apply_action`](GameState::apply_action),
//! and cloned wholesale for branching search. Cloning copies the grid and
//! inventory and nothing else; no external resources are held.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use crate::action::Action;
use crate::element::Element;
use crate::error::CraftworldError;
use crate::fingerprint::{cell_contribution, slot_contribution, Fingerprint};
use crate::grid;
use crate::inventory::Inventory;
use crate::recipe::{self, Recipe};
use crate::reward::RewardEvent;

/// The authoritative state of one craftworld episode.
///
/// Exactly one grid cell holds [`Element::Agent`] at all times; its flat
/// index is mirrored in `agent_idx` for O(1) access. The reward signal is
/// a single-step event log and the fingerprint is maintained incrementally
/// on every structural mutation.
#[derive(Clone, Debug)]
pub struct GameState {
    pub(crate) rows: usize,
    pub(crate) cols: usize,
    pub(crate) agent_idx: usize,
    pub(crate) grid: Vec<Element>,
    pub(crate) goal: Element,
    pub(crate) reward_signal: u64,
    pub(crate) fingerprint: Fingerprint,
    pub(crate) inventory: Inventory,
}

impl GameState {
    /// Environment name advertised to binding layers
    pub const NAME: &'static str = "craftworld";

    /// Parse a board description of the form
    /// `rows|cols|goal|cell_0|cell_1|...|cell_{rows*cols-1}`
    /// where `goal` and each `cell_i` are integer element codes.
    ///
    /// The goal must lie in the primitive/craftable bands. When several
    /// cells hold the agent, the last occurrence populates the agent
    /// index; a board with no agent cell is not rejected.
    pub fn from_board(board: &str) -> Result<Self, CraftworldError> {
        let fields: Vec<&str> = board.split('|').collect();
        if fields.len() < 4 {
            return Err(CraftworldError::MalformedBoard(format!(
                "expected at least 4 '|'-separated fields, got {}",
                fields.len()
            )));
        }

        let rows = parse_field(fields[0], "rows")?;
        let cols = parse_field(fields[1], "cols")?;
        let goal_code: i64 = fields[2].trim().parse().map_err(|_| {
            CraftworldError::MalformedBoard(format!("unparseable goal field '{}'", fields[2]))
        })?;

        let flat_size = rows.checked_mul(cols).ok_or_else(|| {
            CraftworldError::MalformedBoard(format!("{}x{} board dimensions overflow", rows, cols))
        })?;
        if fields.len() != flat_size + 3 {
            return Err(CraftworldError::MalformedBoard(format!(
                "{}x{} board needs {} fields, got {}",
                rows,
                cols,
                flat_size + 3,
                fields.len()
            )));
        }

        let goal = u8::try_from(goal_code)
            .ok()
            .and_then(Element::from_code)
            .filter(|element| element.is_goal())
            .ok_or(CraftworldError::InvalidGoal(goal_code))?;
        let mut grid = Vec::with_capacity(flat_size);
        let mut agent_idx = 0;
        let mut fingerprint = Fingerprint::default();
        for (i, field) in fields[3..].iter().enumerate() {
            let code: i64 = field.trim().parse().map_err(|_| {
                CraftworldError::MalformedBoard(format!("unparseable cell field '{}'", field))
            })?;
            let element = u8::try_from(code)
                .ok()
                .and_then(Element::from_code)
                .ok_or(CraftworldError::UnknownElement(code))?;
            if element == Element::Agent {
                agent_idx = i;
            }
            fingerprint.fold_cell(flat_size, element, i);
            grid.push(element);
        }

        Ok(Self {
            rows,
            cols,
            agent_idx,
            grid,
            goal,
            reward_signal: 0,
            fingerprint,
            inventory: Inventory::new(),
        })
    }

    /// Number of board rows
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of board columns
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// The immutable goal element chosen at construction
    pub fn goal(&self) -> Element {
        self.goal
    }

    /// The board contents in row-major order
    pub fn grid(&self) -> &[Element] {
        &self.grid
    }

    /// The current inventory
    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    /// Size of the action space
    pub const fn action_space_size() -> usize {
        crate::action::NUM_ACTIONS
    }

    /// Apply one action, updating the board, inventory, fingerprint, and
    /// reward signal.
    ///
    /// Total: illegal moves and fruitless interactions are zero-effect
    /// transitions, not errors. The reward signal carries only the events
    /// of this call.
    pub fn apply_action(&mut self, action: Action) {
        self.reward_signal = 0;
        match action {
            Action::Use => self.resolve_use(),
            _ => self.resolve_movement(action),
        }
    }

    /// True iff the inventory holds at least one unit of the goal element
    pub fn is_solution(&self) -> bool {
        self.inventory.has_at_least(self.goal, 1)
    }

    /// Bitmask of events triggered by the most recent action
    pub fn get_reward_signal(&self) -> u64 {
        self.reward_signal
    }

    /// The incrementally maintained state fingerprint
    pub fn get_hash(&self) -> u64 {
        self.fingerprint.value()
    }

    /// Add `count` units of `element` to the inventory
    pub fn add_to_inventory(&mut self, element: Element, count: u32) {
        let flat_size = self.flat_size();
        self.inventory
            .add(element, count, flat_size, &mut self.fingerprint);
    }

    /// Units of `element` currently held
    pub fn check_inventory(&self, element: Element) -> u32 {
        self.inventory.count(element)
    }

    /// Flat index of the agent cell
    pub fn get_agent_index(&self) -> usize {
        self.agent_idx
    }

    /// Flat indices of every cell holding `element`
    pub fn get_indices(&self, element: Element) -> Vec<usize> {
        self.grid
            .iter()
            .enumerate()
            .filter(|(_, &cell)| cell == element)
            .map(|(index, _)| index)
            .collect()
    }

    /// Fingerprint recomputed from the full grid and inventory.
    ///
    /// Always equal to [`get_hash`](GameState::get_hash); exists so the
    /// incremental maintenance can be audited.
    pub fn recompute_hash(&self) -> u64 {
        let flat_size = self.flat_size();
        let mut value = 0u64;
        for (index, &element) in self.grid.iter().enumerate() {
            value ^= cell_contribution(flat_size, element, index);
        }
        for (element, count) in self.inventory.iter() {
            for unit in 1..=count {
                value ^= slot_contribution(flat_size, element, unit);
            }
        }
        value
    }

    pub(crate) fn flat_size(&self) -> usize {
        self.rows * self.cols
    }

    fn resolve_movement(&mut self, action: Action) {
        if !grid::in_bounds(self.agent_idx, action, self.rows, self.cols) {
            return;
        }
        let target = grid::index_from_action(self.agent_idx, action, self.cols);
        if self.grid[target] != Element::Empty {
            return;
        }
        let flat_size = self.flat_size();
        self.fingerprint
            .fold_cell(flat_size, Element::Agent, self.agent_idx);
        self.fingerprint.fold_cell(flat_size, Element::Empty, target);
        self.fingerprint.fold_cell(flat_size, Element::Agent, target);
        self.fingerprint
            .fold_cell(flat_size, Element::Empty, self.agent_idx);
        self.grid[target] = Element::Agent;
        self.grid[self.agent_idx] = Element::Empty;
        self.agent_idx = target;
    }

    /// Scan the four neighbours and the agent's own cell in the fixed
    /// order {up, right, down, left, use}; the whole action resolves at
    /// most one interaction.
    fn resolve_use(&mut self) {
        for action in Action::all() {
            if !grid::in_bounds(self.agent_idx, action, self.rows, self.cols) {
                continue;
            }
            let target = grid::index_from_action(self.agent_idx, action, self.cols);
            let element = self.grid[target];
            if element == Element::Empty {
                continue;
            }

            if element.is_primitive() {
                // Grass yields its event but is never carried.
                if element != Element::Grass {
                    self.add_to_inventory(element, 1);
                }
                self.clear_cell(target);
                if let Some(event) = recipe::collect_reward(element) {
                    self.reward_signal |= event.bit();
                }
                break;
            } else if element == Element::Iron
                && self.inventory.has_at_least(Element::BronzePick, 1)
            {
                // Iron is inert to a bare-handed agent; the pick is not
                // consumed.
                self.add_to_inventory(Element::Iron, 1);
                self.clear_cell(target);
                if let Some(event) = recipe::collect_reward(Element::Iron) {
                    self.reward_signal |= event.bit();
                }
                break;
            } else if element.is_workshop() {
                // A workshop neighbour ends the scan even when nothing is
                // craftable there.
                self.craft_at(element);
                break;
            } else if element == Element::Water
                && self.inventory.has_at_least(Element::Bridge, 1)
            {
                self.remove_from_inventory(Element::Bridge, 1);
                self.clear_cell(target);
                self.reward_signal |= RewardEvent::UseBridge.bit();
                break;
            } else if element == Element::Stone
                && self.inventory.has_at_least(Element::IronPick, 1)
            {
                self.remove_from_inventory(Element::IronPick, 1);
                self.clear_cell(target);
                self.reward_signal |= RewardEvent::UseAxe.bit();
                break;
            }
            // Inert from this side; keep scanning.
        }
    }

    /// First recipe at `workshop` whose inputs are all held wins.
    fn craft_at(&mut self, workshop: Element) {
        for recipe in recipe::recipes_at(workshop) {
            if !self.can_craft(recipe) {
                continue;
            }
            self.add_to_inventory(recipe.output, 1);
            for input in recipe.inputs {
                self.remove_from_inventory(input.element, input.count);
            }
            self.reward_signal |= recipe.reward.bit();
            if let Some(event) = recipe::workstation_reward(workshop) {
                self.reward_signal |= event.bit();
            }
            break;
        }
    }

    fn can_craft(&self, recipe: &Recipe) -> bool {
        recipe
            .inputs
            .iter()
            .all(|input| self.inventory.has_at_least(input.element, input.count))
    }

    fn remove_from_inventory(&mut self, element: Element, count: u32) -> bool {
        let flat_size = self.flat_size();
        self.inventory
            .remove(element, count, flat_size, &mut self.fingerprint)
    }

    fn clear_cell(&mut self, index: usize) {
        let flat_size = self.flat_size();
        let element = self.grid[index];
        self.fingerprint.fold_cell(flat_size, element, index);
        self.grid[index] = Element::Empty;
        self.fingerprint.fold_cell(flat_size, Element::Empty, index);
    }
}

impl FromStr for GameState {
    type Err = CraftworldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        GameState::from_board(s)
    }
}

/// Structural equality over dimensions, grid, goal, and inventory.
///
/// The reward signal and fingerprint are deliberately excluded: the former
/// is transient per-step telemetry and the latter is derived.
impl PartialEq for GameState {
    fn eq(&self, other: &Self) -> bool {
        self.rows == other.rows
            && self.cols == other.cols
            && self.agent_idx == other.agent_idx
            && self.grid == other.grid
            && self.goal == other.goal
            && self.inventory == other.inventory
    }
}

impl Eq for GameState {}

impl Hash for GameState {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.fingerprint.value());
    }
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for _ in 0..self.cols + 2 {
            write!(f, "-")?;
        }
        writeln!(f)?;
        for row in 0..self.rows {
            write!(f, "|")?;
            for col in 0..self.cols {
                write!(f, "{}", self.grid[row * self.cols + col].symbol())?;
            }
            writeln!(f, "|")?;
        }
        for _ in 0..self.cols + 2 {
            write!(f, "-")?;
        }
        writeln!(f)?;
        writeln!(f, "Goal: {}", self.goal.name())?;
        write!(f, "Inventory: ")?;
        for (element, count) in self.inventory.iter() {
            write!(f, "({}, {}) ", element.name(), count)?;
        }
        Ok(())
    }
}

fn parse_field(field: &str, what: &str) -> Result<usize, CraftworldError> {
    let value: usize = field.trim().parse().map_err(|_| {
        CraftworldError::MalformedBoard(format!("unparseable {} field '{}'", what, field))
    })?;
    if value == 0 {
        return Err(CraftworldError::MalformedBoard(format!(
            "{} must be positive",
            what
        )));
    }
    Ok(value)
}
