//! One-hot tensor observation encoding
//!
//! The board is embedded in a padded frame: the outermost ring starts on
//! the empty channel, the next ring inward is walls, and the board itself
//! sits offset by (2, 2). Selected inventory items are then painted into
//! fixed cells of the outer border, clearing the empty flag there.

use crate::element::{Element, NUM_ELEMENTS};
use crate::state::GameState;

/// Cells of padding added on each side of the board
pub const OBS_BORDER: usize = 2;

/// Border cells (flat offsets within a channel) owned by an inventory
/// element at the given count. Only these elements are visualized; anything
/// else is tracked in the inventory but not painted.
fn border_cells(element: Element, count: u32) -> &'static [usize] {
    match element {
        Element::Wood if count > 1 => &[0, 1],
        Element::Wood => &[0],
        Element::Copper => &[2],
        Element::Tin => &[3],
        Element::Iron => &[4],
        Element::Stick if count > 1 => &[5, 6],
        Element::Stick => &[5],
        Element::BronzeBar => &[7],
        Element::BronzePick => &[8],
        Element::IronPick => &[9],
        _ => &[],
    }
}

impl GameState {
    /// Shape of [`get_observation`](GameState::get_observation) as
    /// (channels, height, width)
    pub fn observation_shape(&self) -> (usize, usize, usize) {
        (
            NUM_ELEMENTS,
            self.rows + 2 * OBS_BORDER,
            self.cols + 2 * OBS_BORDER,
        )
    }

    /// Dense one-hot tensor over the padded board plus inventory cells,
    /// flattened channel-major.
    pub fn get_observation(&self) -> Vec<f32> {
        let (_, rows_obs, cols_obs) = self.observation_shape();
        let channel_len = rows_obs * cols_obs;
        let mut obs = vec![0.0f32; NUM_ELEMENTS * channel_len];

        // Inner ring is wall.
        let wall = Element::Wall.channel() * channel_len;
        for w in 1..cols_obs - 1 {
            obs[wall + cols_obs + w] = 1.0;
            obs[wall + (rows_obs - 2) * cols_obs + w] = 1.0;
        }
        for h in 1..rows_obs - 1 {
            obs[wall + h * cols_obs + 1] = 1.0;
            obs[wall + h * cols_obs + (cols_obs - 2)] = 1.0;
        }

        // Outer ring starts empty; inventory painting below may unset it.
        let empty = Element::Empty.channel() * channel_len;
        for w in 0..cols_obs {
            obs[empty + w] = 1.0;
            obs[empty + (rows_obs - 1) * cols_obs + w] = 1.0;
        }
        for h in 1..rows_obs - 1 {
            obs[empty + h * cols_obs] = 1.0;
            obs[empty + h * cols_obs + (cols_obs - 1)] = 1.0;
        }

        // Board region, offset by the border on both axes.
        let mut i = 0;
        for r in OBS_BORDER..rows_obs - OBS_BORDER {
            for c in OBS_BORDER..cols_obs - OBS_BORDER {
                let element = self.grid[i];
                obs[element.channel() * channel_len + r * cols_obs + c] = 1.0;
                i += 1;
            }
        }

        // Inventory border cells.
        for (element, count) in self.inventory.iter() {
            for &offset in border_cells(element, count) {
                obs[element.channel() * channel_len + offset] = 1.0;
                obs[empty + offset] = 0.0;
            }
        }

        obs
    }
}
