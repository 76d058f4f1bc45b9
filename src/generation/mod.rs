//! Text generation with a single tool-calling round.

pub mod text;

pub use text::{complete_tool_round, dispatch_tool_calls, generate_text};
