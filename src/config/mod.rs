//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! CLI args (clap)          config file (TOML, optional)
//!     │                        │
//!     │                        ▼
//!     │                    loader.rs (parse & deserialize)
//!     │                        │
//!     └──── cli.rs merges ─────┘
//!               │
//!               ▼
//!           validation.rs (semantic checks, all errors collected)
//!               │
//!               ▼
//!           SentinelConfig (validated, immutable for process lifetime)
//! ```
//!
//! # Design Decisions
//! - Config is frozen once resolved; the checkers borrow it at startup and
//!   no field is mutated afterwards
//! - CLI flags override file values; required fields (mode, host, user,
//!   password) may come from either side
//! - Validation separates syntactic (serde) from semantic checks and
//!   reports every problem, not just the first

pub mod cli;
pub mod loader;
pub mod schema;
pub mod validation;

pub use cli::Cli;
pub use loader::ConfigError;
pub use schema::{CheckConfig, CheckMode, ListenerConfig, SentinelConfig, TargetConfig};
