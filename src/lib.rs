//! fitcast: weather-aware outfit recommendations through LLM tool calling.
//!
//! The model is offered a `get_current_weather` tool. When it asks for the
//! weather, the lookup runs against live geocoding and observation services,
//! the text result is fed back as a tool turn, and a second completion
//! produces the recommendation.
//!
//! # Quick Start
//!
//! ```no_run
//! use fitcast::prelude::*;
//!
//! # async fn example() -> fitcast::error::Result<()> {
//! let config = FitcastConfig::from_env()?;
//! let advisor = OutfitAdvisor::from_config(&config)?;
//! let request = ActivityRequest::new("Ann Arbor, MI", "hiking")?;
//! let recommendation = advisor.recommend(&request).await?;
//! println!("{}", recommendation.text);
//! # Ok(())
//! # }
//! ```

pub mod advisor;
pub mod config;
pub mod error;
pub mod generation;
pub mod image;
pub mod prelude;
pub mod provider;
pub mod tools;
pub mod types;
pub mod weather;

#[cfg(feature = "cli")]
pub mod cli;
