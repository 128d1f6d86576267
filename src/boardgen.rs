//! Deterministic scenario generation
//!
//! Produces board description strings ready for [`GameState::from_board`].
//! Placement is seeded and reproducible: the same config and seed always
//! yield the same board. Goals that require unreachable treasure get an
//! enclosure (gold ringed by water, gem ringed by stone) so the matching
//! tool chain is actually needed.

use rand::distributions::{Distribution, WeightedIndex};
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::element::Element;
use crate::error::CraftworldError;
use crate::state::GameState;

/// Ingredients to scatter on the board for a given goal.
fn goal_ingredients(goal: Element) -> &'static [(Element, usize)] {
    match goal {
        Element::BronzePick => &[
            (Element::Copper, 1),
            (Element::Tin, 1),
            (Element::Wood, 1),
        ],
        Element::IronPick | Element::GemRing => &[
            (Element::Iron, 1),
            (Element::Wood, 2),
            (Element::Copper, 1),
            (Element::Tin, 1),
        ],
        Element::GoldBar => &[
            (Element::Copper, 1),
            (Element::Tin, 1),
            (Element::Wood, 2),
        ],
        _ => &[],
    }
}

/// Scenario generator configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Board width/height in cells
    pub map_size: usize,

    /// Random seed (None = sampled at generator creation)
    pub seed: Option<u64>,

    /// Goal elements and their sampling weights
    pub goal_weights: Vec<(Element, f32)>,

    /// Extra decoy primitives scattered on the board
    pub extra_primitives: usize,

    /// Extra grass tiles scattered on the board
    pub extra_grass: usize,

    /// Cut the board into quadrants with water moats
    pub water_moats: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            map_size: 10,
            seed: None,
            goal_weights: vec![
                (Element::BronzePick, 0.2),
                (Element::IronPick, 0.3),
                (Element::GemRing, 0.5),
            ],
            extra_primitives: 0,
            extra_grass: 0,
            water_moats: false,
        }
    }
}

impl GeneratorConfig {
    /// Config biased toward the longer tool chains, with moats
    pub fn hard() -> Self {
        Self {
            goal_weights: vec![(Element::BronzePick, 0.3), (Element::IronPick, 0.7)],
            water_moats: true,
            ..Default::default()
        }
    }

    /// Held-out evaluation config: gem-ring scenarios only
    pub fn evaluation() -> Self {
        Self {
            goal_weights: vec![(Element::GemRing, 1.0)],
            ..Default::default()
        }
    }

    /// Parse a config from a TOML document
    pub fn from_toml_str(toml_str: &str) -> Result<Self, CraftworldError> {
        Ok(toml::from_str(toml_str)?)
    }
}

/// Seeded board generator
pub struct BoardGenerator {
    config: GeneratorConfig,
    rng: ChaCha8Rng,
}

impl BoardGenerator {
    /// Create a generator; an unseeded config samples a fresh seed
    pub fn new(config: GeneratorConfig) -> Self {
        let seed = config.seed.unwrap_or_else(|| rand::thread_rng().gen());
        Self {
            config,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Generate one board description string
    pub fn generate(&mut self) -> Result<String, CraftworldError> {
        let n = self.config.map_size;
        if n < 4 {
            return Err(CraftworldError::Generation(format!(
                "map size {} is too small",
                n
            )));
        }
        let mut grid = vec![Element::Empty; n * n];
        let mut blocked = vec![false; n * n];

        if self.config.water_moats {
            self.place_moats(&mut grid, &mut blocked);
        }

        let goal = self.sample_goal()?;

        // Treasure behind an enclosure for the goals that need one.
        match goal {
            Element::GoldBar => self.place_treasure(&mut grid, Element::Gold, Element::Water)?,
            Element::GemRing => self.place_treasure(&mut grid, Element::Gem, Element::Stone)?,
            _ => {}
        }

        for &(element, count) in goal_ingredients(goal) {
            for _ in 0..count {
                let index = self.free_clear_cell(&grid, &blocked)?;
                grid[index] = element;
            }
        }

        for _ in 0..self.config.extra_primitives {
            let element = *[Element::Grass, Element::Wood]
                .choose(&mut self.rng)
                .unwrap_or(&Element::Wood);
            let index = self.free_clear_cell(&grid, &blocked)?;
            grid[index] = element;
        }

        for workshop in [
            Element::Workshop1,
            Element::Workshop2,
            Element::Workshop3,
            Element::Furnace,
        ] {
            let index = self.free_clear_cell(&grid, &blocked)?;
            grid[index] = workshop;
        }

        let agent_index = self.free_clear_cell(&grid, &blocked)?;
        grid[agent_index] = Element::Agent;

        for _ in 0..self.config.extra_grass {
            let index = self.free_clear_cell(&grid, &blocked)?;
            grid[index] = Element::Grass;
        }

        let mut board = format!("{}|{}|{}", n, n, goal.code());
        for element in &grid {
            board.push_str(&format!("|{:02}", element.code()));
        }
        Ok(board)
    }

    /// Generate a board and construct the state in one step
    pub fn generate_state(&mut self) -> Result<GameState, CraftworldError> {
        let board = self.generate()?;
        GameState::from_board(&board)
    }

    fn sample_goal(&mut self) -> Result<Element, CraftworldError> {
        if self.config.goal_weights.is_empty() {
            return Err(CraftworldError::Generation(
                "no goal weights configured".to_string(),
            ));
        }
        let weights: Vec<f32> = self.config.goal_weights.iter().map(|(_, w)| *w).collect();
        let dist = WeightedIndex::new(&weights)
            .map_err(|e| CraftworldError::Generation(format!("bad goal weights: {}", e)))?;
        let (goal, _) = self.config.goal_weights[dist.sample(&mut self.rng)];
        if !goal.is_goal() {
            return Err(CraftworldError::Generation(format!(
                "{} cannot be a goal",
                goal.name()
            )));
        }
        Ok(goal)
    }

    fn place_moats(&mut self, grid: &mut [Element], blocked: &mut [bool]) {
        let n = self.config.map_size;
        let mid = n / 2;
        for i in 0..mid.saturating_sub(2) {
            for index in [
                mid * n + i,
                i * n + mid,
                mid * n + (n - i - 1),
                (n - i - 1) * n + mid,
            ] {
                grid[index] = Element::Water;
                blocked[index] = true;
            }
        }
    }

    fn place_treasure(
        &mut self,
        grid: &mut [Element],
        treasure: Element,
        wall: Element,
    ) -> Result<(), CraftworldError> {
        let n = self.config.map_size;
        // Interior cells only so the enclosing ring stays on the board.
        let candidates: Vec<usize> = (1..n - 1)
            .flat_map(|r| (1..n - 1).map(move |c| r * n + c))
            .filter(|&index| grid[index] == Element::Empty)
            .collect();
        let &index = candidates.choose(&mut self.rng).ok_or_else(|| {
            CraftworldError::Generation(format!("no interior cell for {}", treasure.name()))
        })?;
        grid[index] = treasure;
        for ring in [index - n, index + n, index - 1, index + 1] {
            grid[ring] = wall;
        }
        Ok(())
    }

    /// A free cell whose whole neighbourhood is empty and not beside a
    /// workshop, so placed items never block one another.
    fn free_clear_cell(
        &mut self,
        grid: &[Element],
        blocked: &[bool],
    ) -> Result<usize, CraftworldError> {
        let n = self.config.map_size;
        let candidates: Vec<usize> = (0..n * n)
            .filter(|&index| {
                grid[index] == Element::Empty
                    && !blocked[index]
                    && self.clear_around(grid, index)
            })
            .collect();
        candidates
            .choose(&mut self.rng)
            .copied()
            .ok_or_else(|| CraftworldError::Generation("board is too crowded".to_string()))
    }

    fn clear_around(&self, grid: &[Element], index: usize) -> bool {
        let n = self.config.map_size;
        let (row, col) = (index / n, index % n);
        for dr in -1i64..=1 {
            for dc in -1i64..=1 {
                let (r, c) = (row as i64 + dr, col as i64 + dc);
                if r < 0 || r >= n as i64 || c < 0 || c >= n as i64 {
                    continue;
                }
                let neighbor = (r as usize) * n + c as usize;
                if grid[neighbor] != Element::Empty || self.beside_workshop(grid, neighbor) {
                    return false;
                }
            }
        }
        true
    }

    fn beside_workshop(&self, grid: &[Element], index: usize) -> bool {
        let n = self.config.map_size;
        let (row, col) = (index / n, index % n);
        for dr in -1i64..=1 {
            for dc in -1i64..=1 {
                let (r, c) = (row as i64 + dr, col as i64 + dc);
                if r < 0 || r >= n as i64 || c < 0 || c >= n as i64 {
                    continue;
                }
                if grid[(r as usize) * n + c as usize].is_workshop() {
                    return true;
                }
            }
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded(seed: u64) -> BoardGenerator {
        BoardGenerator::new(GeneratorConfig {
            seed: Some(seed),
            ..Default::default()
        })
    }

    /// First board a config template yields over a small seed scan.
    fn first_ok(template: GeneratorConfig) -> GameState {
        for seed in 0..50 {
            let config = GeneratorConfig {
                seed: Some(seed),
                ..template.clone()
            };
            if let Ok(state) = BoardGenerator::new(config).generate_state() {
                return state;
            }
        }
        panic!("no seed in 0..50 produced a board");
    }

    #[test]
    fn test_generation_is_deterministic() {
        let mut boards = Vec::new();
        for seed in 0..50 {
            if let Ok(board) = seeded(seed).generate() {
                // Re-running the same seed must reproduce the board exactly.
                assert_eq!(seeded(seed).generate().unwrap(), board);
                boards.push(board);
            }
            if boards.len() == 2 {
                break;
            }
        }
        assert_eq!(boards.len(), 2, "not enough seeds produced boards");
        assert_ne!(boards[0], boards[1]);
    }

    #[test]
    fn test_generated_boards_construct() {
        // Placement is constrained; a rare seed can run out of clear
        // cells, which reports an error rather than a bad board.
        let mut built = 0;
        for seed in 0..20 {
            if let Ok(state) = seeded(seed).generate_state() {
                assert_eq!(state.rows(), 10);
                assert_eq!(state.cols(), 10);
                assert!(state.goal().is_goal());
                assert_eq!(state.get_hash(), state.recompute_hash());
                built += 1;
            }
        }
        assert!(built >= 15, "only {} of 20 seeds produced a board", built);
    }

    #[test]
    fn test_board_contents() {
        let state = first_ok(GeneratorConfig::default());

        assert_eq!(state.get_indices(Element::Agent).len(), 1);
        assert_eq!(
            state.get_indices(Element::Agent)[0],
            state.get_agent_index()
        );
        for workshop in [
            Element::Workshop1,
            Element::Workshop2,
            Element::Workshop3,
            Element::Furnace,
        ] {
            assert_eq!(state.get_indices(workshop).len(), 1);
        }
    }

    #[test]
    fn test_gem_goal_gets_a_stone_enclosure() {
        let state = first_ok(GeneratorConfig {
            goal_weights: vec![(Element::GemRing, 1.0)],
            ..Default::default()
        });

        assert_eq!(state.goal(), Element::GemRing);
        assert_eq!(state.get_indices(Element::Gem).len(), 1);
        assert_eq!(state.get_indices(Element::Stone).len(), 4);
    }

    #[test]
    fn test_moats_add_water() {
        let state = first_ok(GeneratorConfig {
            goal_weights: vec![(Element::BronzePick, 1.0)],
            water_moats: true,
            ..Default::default()
        });
        assert!(!state.get_indices(Element::Water).is_empty());
    }

    #[test]
    fn test_config_from_toml() {
        let config = GeneratorConfig::from_toml_str(
            r#"
            map_size = 8
            seed = 42
            goal_weights = [["BronzePick", 1.0]]
            extra_primitives = 2
            extra_grass = 1
            water_moats = false
            "#,
        )
        .unwrap();
        assert_eq!(config.map_size, 8);
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.goal_weights, vec![(Element::BronzePick, 1.0)]);

        let state = first_ok(config);
        assert_eq!(state.goal(), Element::BronzePick);
        assert_eq!(state.rows(), 8);
    }

    #[test]
    fn test_crowded_board_errors_cleanly() {
        let mut generator = BoardGenerator::new(GeneratorConfig {
            map_size: 4,
            seed: Some(1),
            goal_weights: vec![(Element::GemRing, 1.0)],
            ..Default::default()
        });
        // A 4x4 board cannot hold the gem enclosure plus ingredients and
        // workshops with clearance; the generator must fail with an error,
        // not stack placements.
        assert!(generator.generate().is_err());
    }
}
