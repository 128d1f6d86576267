//! Sprite-tile image rendering
//!
//! Mirrors the observation geometry at sprite resolution: wall ring, an
//! outer ring showing one tile per held inventory unit, and the board in
//! the centre. Sprite pixels are an injected capability; the crate only
//! assumes a lookup from element to a fixed-size RGB tile.

use crate::element::{Element, NUM_ELEMENTS};
#[cfg(feature = "png")]
use crate::error::CraftworldError;
use crate::state::GameState;

/// Sprite tile width in pixels
pub const SPRITE_WIDTH: usize = 32;

/// Sprite tile height in pixels
pub const SPRITE_HEIGHT: usize = 32;

/// Color channels per pixel
pub const SPRITE_CHANNELS: usize = 3;

/// Bytes per sprite row
pub const SPRITE_DATA_LEN_PER_ROW: usize = SPRITE_WIDTH * SPRITE_CHANNELS;

/// Bytes per sprite tile
pub const SPRITE_DATA_LEN: usize = SPRITE_WIDTH * SPRITE_HEIGHT * SPRITE_CHANNELS;

/// Lookup capability from element to sprite pixels.
///
/// Implementations return exactly [`SPRITE_DATA_LEN`] bytes of row-major
/// RGB data per element. Asset bytes live outside this crate; rendering
/// only composites whatever the atlas hands back.
pub trait SpriteAtlas {
    /// RGB tile for `element`
    fn sprite(&self, element: Element) -> &[u8];
}

/// Built-in atlas of solid-colour tiles.
///
/// Good enough for tests, debugging, and headless pipelines that only
/// need cells to be distinguishable; applications with real artwork
/// supply their own [`SpriteAtlas`].
pub struct ColorAtlas {
    tiles: Vec<[u8; SPRITE_DATA_LEN]>,
}

impl ColorAtlas {
    pub fn new() -> Self {
        let mut tiles = Vec::with_capacity(NUM_ELEMENTS);
        for element in Element::all() {
            let [r, g, b] = Self::color(element);
            let mut tile = [0u8; SPRITE_DATA_LEN];
            for pixel in tile.chunks_exact_mut(SPRITE_CHANNELS) {
                pixel[0] = r;
                pixel[1] = g;
                pixel[2] = b;
            }
            tiles.push(tile);
        }
        Self { tiles }
    }

    /// Flat RGB colour per element
    pub fn color(element: Element) -> [u8; 3] {
        match element {
            Element::Agent => [255, 0, 0],
            Element::Wall => [64, 64, 64],
            Element::Workshop1 => [205, 133, 63],
            Element::Workshop2 => [160, 82, 45],
            Element::Workshop3 => [139, 69, 19],
            Element::Furnace => [255, 140, 0],
            Element::Water => [30, 144, 255],
            Element::Stone => [128, 128, 128],
            Element::Iron => [192, 192, 192],
            Element::Tin => [211, 211, 211],
            Element::Copper => [184, 115, 51],
            Element::Wood => [101, 67, 33],
            Element::Grass => [34, 139, 34],
            Element::Gold => [255, 215, 0],
            Element::Gem => [138, 43, 226],
            Element::BronzeBar => [150, 116, 68],
            Element::Stick => [222, 184, 135],
            Element::Plank => [244, 164, 96],
            Element::Rope => [189, 183, 107],
            Element::Nails => [169, 169, 169],
            Element::BronzeHammer => [205, 127, 50],
            Element::BronzePick => [218, 165, 32],
            Element::Bridge => [210, 180, 140],
            Element::IronPick => [119, 136, 153],
            Element::GoldBar => [238, 201, 0],
            Element::GemRing => [216, 191, 216],
            Element::Empty => [0, 0, 0],
        }
    }
}

impl Default for ColorAtlas {
    fn default() -> Self {
        Self::new()
    }
}

impl SpriteAtlas for ColorAtlas {
    fn sprite(&self, element: Element) -> &[u8] {
        &self.tiles[element.channel()]
    }
}

/// Blit one sprite tile into the composite at cell (h, w).
fn fill_sprite(img: &mut [u8], sprite: &[u8], h: usize, w: usize, cols: usize) {
    let top_left = h * (SPRITE_DATA_LEN * cols) + w * SPRITE_DATA_LEN_PER_ROW;
    for r in 0..SPRITE_HEIGHT {
        let src = r * SPRITE_DATA_LEN_PER_ROW;
        let dst = top_left + r * SPRITE_DATA_LEN_PER_ROW * cols;
        img[dst..dst + SPRITE_DATA_LEN_PER_ROW]
            .copy_from_slice(&sprite[src..src + SPRITE_DATA_LEN_PER_ROW]);
    }
}

impl GameState {
    /// Shape of [`to_image`](GameState::to_image) as (height, width, channels)
    pub fn image_shape(&self) -> (usize, usize, usize) {
        (
            (self.rows + 4) * SPRITE_HEIGHT,
            (self.cols + 4) * SPRITE_WIDTH,
            SPRITE_CHANNELS,
        )
    }

    /// Flat row-major RGB raster of the current state.
    ///
    /// Unfilled outer-ring cells stay black. Inventory tiles fill the top
    /// border row left to right, then the bottom row, one tile per held
    /// unit, and stop when both rows are full.
    pub fn to_image(&self, atlas: &dyn SpriteAtlas) -> Vec<u8> {
        let rows_img = self.rows + 4;
        let cols_img = self.cols + 4;
        let mut img = vec![0u8; rows_img * cols_img * SPRITE_DATA_LEN];

        // Inner ring is wall.
        let wall = atlas.sprite(Element::Wall);
        for w in 1..cols_img - 1 {
            fill_sprite(&mut img, wall, 1, w, cols_img);
            fill_sprite(&mut img, wall, rows_img - 2, w, cols_img);
        }
        for h in 1..rows_img - 1 {
            fill_sprite(&mut img, wall, h, 1, cols_img);
            fill_sprite(&mut img, wall, h, cols_img - 2, cols_img);
        }

        // Outer ring shows the inventory, one tile per unit.
        let mut slots = (0..cols_img)
            .map(|w| (0, w))
            .chain((0..cols_img).map(|w| (rows_img - 1, w)));
        'fill: for (element, count) in self.inventory.iter() {
            for _ in 0..count {
                match slots.next() {
                    Some((h, w)) => fill_sprite(&mut img, atlas.sprite(element), h, w, cols_img),
                    None => break 'fill,
                }
            }
        }

        // The board inside the rings.
        let mut i = 0;
        for h in 2..rows_img - 2 {
            for w in 2..cols_img - 2 {
                fill_sprite(&mut img, atlas.sprite(self.grid[i]), h, w, cols_img);
                i += 1;
            }
        }

        img
    }

    /// Composite the current state and write it to `path` as a PNG.
    #[cfg(feature = "png")]
    pub fn save_png(
        &self,
        atlas: &dyn SpriteAtlas,
        path: &std::path::Path,
    ) -> Result<(), CraftworldError> {
        let (height, width, _) = self.image_shape();
        let buffer = self.to_image(atlas);
        let img = image::RgbImage::from_raw(width as u32, height as u32, buffer)
            .ok_or_else(|| CraftworldError::Render("image buffer size mismatch".to_string()))?;
        img.save(path)?;
        Ok(())
    }
}
