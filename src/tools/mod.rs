//! Tool system for function calling.

pub mod arguments;
pub mod registry;
pub mod tool;
pub mod types;
pub mod validation;
pub mod weather;

pub use arguments::ToolArguments;
pub use registry::ToolRegistry;
pub use tool::{FunctionTool, Tool};
pub use types::{ToolParameters, ToolSpec};
pub use weather::{WeatherTool, WEATHER_TOOL_NAME};
