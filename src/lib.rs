//! CraftWorld Core - a deterministic grid-world crafting environment
//!
//! This crate provides the state machine behind a crafting puzzle world
//! aimed at search, planning, and reinforcement-learning agents: board
//! parsing, action application, recipe resolution, an incrementally
//! maintained state fingerprint, and tensor/image observation encodings.
//! States are value-like and cheap to clone, so planners can branch and
//! discard thousands of copies per decision.
//!
//! ## Features
//!
//! - `png` - Enable PNG image export (requires the `image` crate)
//!
//! ## Modules
//!
//! - [`state`] - Game state and the action transition engine
//! - [`recipe`] - Crafting recipe and reward registry
//! - [`observation`] - One-hot tensor observation encoding
//! - [`image_renderer`] - Sprite-tile image rendering
//! - [`snapshot`] - Flat snapshots for cloning and persistence
//! - [`boardgen`] - Deterministic scenario generation
//! - [`renderer`] - Text and JSON renderers

pub mod action;
pub mod boardgen;
pub mod element;
pub mod error;
pub mod fingerprint;
pub mod grid;
pub mod image_renderer;
pub mod inventory;
pub mod observation;
pub mod recipe;
pub mod renderer;
pub mod reward;
mod scenarios; // End-to-end playthrough tests
pub mod snapshot;
pub mod state;

// Core types
pub use action::Action;
pub use element::Element;
pub use error::CraftworldError;
pub use fingerprint::Fingerprint;
pub use inventory::Inventory;
pub use recipe::{Recipe, RecipeInput};
pub use reward::RewardEvent;
pub use state::GameState;

// Scenario generation
pub use boardgen::{BoardGenerator, GeneratorConfig};

// Snapshots
pub use snapshot::Snapshot;

// Rendering
pub use image_renderer::{ColorAtlas, SpriteAtlas};
pub use renderer::{CompactJsonRenderer, JsonRenderer, Renderer, TextRenderer};
