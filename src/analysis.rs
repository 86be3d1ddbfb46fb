//! Text analysis module.
//!
//! This module provides the token model, the pull-based token stream
//! abstraction, and the token filters that run on top of it.

pub mod token;
pub mod token_filter;
