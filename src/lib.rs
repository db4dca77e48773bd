//! MCP gateway exposing LikeMinds AI agent tools over JSON-RPC.

pub mod api;
pub mod cli;
pub mod clients;
pub mod core;
pub mod domain;
pub mod infra;
pub mod tools;
