//! Domains module containing business logic organized by bounded contexts.
//!
//! - **polar**: running XFOIL and normalizing its polar output
//! - **tools**: the MCP tool surface over the polar domain
//! - **resources**: read-only documents for MCP clients

pub mod polar;
pub mod resources;
pub mod tools;
