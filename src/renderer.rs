//! Rendering of states to text and JSON

use crate::reward::RewardEvent;
use crate::state::GameState;

/// Trait for rendering game state to various formats
pub trait Renderer {
    type Output;
    type Error;

    fn render(&self, state: &GameState) -> Result<Self::Output, Self::Error>;
}

/// Text renderer for terminals, logs, and LLM agents
pub struct TextRenderer {
    /// Include the goal line
    pub show_goal: bool,
    /// Include held inventory details
    pub show_inventory: bool,
    /// Include events from the most recent action
    pub show_events: bool,
    /// Include the symbol legend
    pub show_legend: bool,
}

impl Default for TextRenderer {
    fn default() -> Self {
        Self {
            show_goal: true,
            show_inventory: true,
            show_events: true,
            show_legend: true,
        }
    }
}

impl TextRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn minimal() -> Self {
        Self {
            show_goal: false,
            show_inventory: false,
            show_events: false,
            show_legend: false,
        }
    }

    fn render_board(&self, state: &GameState) -> String {
        let mut lines = Vec::with_capacity(state.rows() + 2);
        let border = "-".repeat(state.cols() + 2);
        lines.push(border.clone());
        for row in 0..state.rows() {
            let mut line = String::with_capacity(state.cols() + 2);
            line.push('|');
            for col in 0..state.cols() {
                line.push_str(state.grid()[row * state.cols() + col].symbol());
            }
            line.push('|');
            lines.push(line);
        }
        lines.push(border);
        lines.join("\n")
    }
}

impl Renderer for TextRenderer {
    type Output = String;
    type Error = std::convert::Infallible;

    fn render(&self, state: &GameState) -> Result<String, Self::Error> {
        let mut output = String::new();

        output.push_str(&self.render_board(state));
        output.push('\n');

        if self.show_goal {
            output.push_str(&format!(
                "Goal: {}{}\n",
                state.goal().name(),
                if state.is_solution() { " [SOLVED]" } else { "" }
            ));
        }

        if self.show_inventory {
            output.push_str("Inventory:");
            if state.inventory().is_empty() {
                output.push_str(" (empty)");
            }
            for (element, count) in state.inventory().iter() {
                output.push_str(&format!(" {}={}", element.name(), count));
            }
            output.push('\n');
        }

        if self.show_events {
            let events = RewardEvent::decode(state.get_reward_signal());
            if !events.is_empty() {
                output.push_str(&format!("Events: {}\n", events.join(", ")));
            }
        }

        if self.show_legend {
            output.push_str("Legend: @ agent  # wall  1/2/3 workshops  F furnace  ~ water\n");
            output.push_str("        o stone  i iron  T tin  c copper  w wood  g grass  . gold  * gem\n");
        }

        Ok(output)
    }
}

/// JSON renderer producing the packed snapshot form
pub struct JsonRenderer;

impl Renderer for JsonRenderer {
    type Output = String;
    type Error = serde_json::Error;

    fn render(&self, state: &GameState) -> Result<String, Self::Error> {
        serde_json::to_string_pretty(&state.pack())
    }
}

/// Compact JSON renderer (no pretty printing)
pub struct CompactJsonRenderer;

impl Renderer for CompactJsonRenderer {
    type Output = String;
    type Error = serde_json::Error;

    fn render(&self, state: &GameState) -> Result<String, Self::Error> {
        serde_json::to_string(&state.pack())
    }
}
