//! TCP health-check sentinel for MariaDB/MySQL replicas and Galera clusters.
//!
//! # Architecture Overview
//!
//! ```text
//!                  ┌──────────────────────────────────────────────┐
//!                  │                 DB-SENTINEL                  │
//!                  │                                              │
//!   LB probe       │  ┌─────────┐   ┌──────────┐   ┌───────────┐ │
//!   ───────────────┼─▶│   net   │──▶│   http   │──▶│   check   │ │
//!                  │  │listener │   │  server  │   │  cluster/ │ │
//!                  │  └─────────┘   └──────────┘   │  replica  │ │
//!                  │                               └─────┬─────┘ │
//!                  │                                     │       │
//!                  │                                     ▼       │
//!   200/503        │  ┌──────────┐                ┌───────────┐  │      MariaDB/
//!   ◀──────────────┼──│ response │◀───────────────│    db     │──┼────▶ MySQL
//!                  │  │formatter │                │  source   │  │      target
//!                  │  └──────────┘                └───────────┘  │
//!                  │                                              │
//!                  │  ┌────────────────────────────────────────┐ │
//!                  │  │   config │ lifecycle │ observability   │ │
//!                  │  └────────────────────────────────────────┘ │
//!                  └──────────────────────────────────────────────┘
//! ```
//!
//! Each accepted connection triggers exactly one status query against the
//! target database; the inbound bytes are never parsed. The probe only ever
//! sees a well-formed `HTTP/1.1` response with code 200 or 503 and a
//! plain-text diagnostic body.

// Core subsystems
pub mod check;
pub mod config;
pub mod db;
pub mod http;
pub mod net;

// Cross-cutting concerns
pub mod lifecycle;
pub mod observability;

pub use check::{CheckResult, HealthCheck};
pub use config::SentinelConfig;
pub use http::Sentinel;
pub use lifecycle::Shutdown;
