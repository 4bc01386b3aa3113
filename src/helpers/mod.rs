//! Helper functions shared across content loading and template rendering

pub mod date;
