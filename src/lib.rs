//! assistlink — bridge between a conversational agent and a hosted
//! enterprise search/answer service.
//!
//! The agent runtime mounts [`tool::SearchTool`]; per call the tool
//! resolves a bearer credential (session-cached or ambient identity),
//! issues one streaming-assist request, and normalizes the chunked
//! response into a single plain-text answer with internal thought
//! content filtered out.
//!
//! # Quick Start
//!
//! ```no_run
//! use assistlink::prelude::*;
//!
//! # async fn example() -> assistlink::error::Result<()> {
//! let config = Config::from_env()?;
//! let tool = SearchTool::new(&config);
//! let answer = tool.run("horário de funcionamento", &SessionState::new()).await;
//! println!("{answer}");
//! # Ok(())
//! # }
//! ```

pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod normalize;
pub mod prelude;
pub mod session;
pub mod tool;
