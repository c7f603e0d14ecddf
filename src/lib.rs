//! Library crate for the player rotation server: roster, fair pairing, game
//! lifecycle and rest countdown, exposed for the binaries and integration tests.

pub mod config;
pub mod dao;
pub mod dto;
pub mod error;
pub mod routes;
pub mod services;
pub mod state;
