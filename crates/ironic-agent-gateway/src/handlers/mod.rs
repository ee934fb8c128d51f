//! HTTP request handlers.
//!
//! This module contains all the endpoint handlers for the agent API.

pub mod health;
pub mod inventory;
pub mod steps;
