//! wrangler CLI gateway for edgeflow.
//!
//! Implements the deployment backend on top of the wrangler command-line
//! tool: subprocess execution with captured output, plus the regex
//! extractors that recover identifiers from wrangler's human-oriented
//! output. The extractors live in [`parse`] so the fragile scraping stays
//! in one place, testable against fixture output instead of live commands.

pub mod error;
pub mod gateway;
pub mod parse;
mod provider;
pub mod wrangler;

pub use error::{Result, WranglerError};
pub use gateway::Gateway;
pub use wrangler::{DEFAULT_WRANGLER_COMMAND, WRANGLER_COMMAND_ENV, WranglerCli};
