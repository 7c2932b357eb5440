// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! RunSquad: a social running-club backend.
//!
//! This crate provides the REST API for clubs, run tracking, scheduled
//! group runs, live run sharing, and club challenges with leaderboards.

pub mod config;
pub mod db;
pub mod entities;
pub mod error;
pub mod middleware;
pub mod migrations;
pub mod routes;
pub mod services;
pub mod time_utils;

use config::Config;
use db::Db;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub db: Db,
}
