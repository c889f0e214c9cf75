//! Authdeck — operator-console runtime for an auth service
//!
//! The client-side session and token-lifecycle runtime behind an
//! administration console: normalized request handling, session
//! bootstrap, pagination view-state, bounded TTL validation, a transient
//! notification bus, and the workflows that keep them consistent through
//! full server reloads.
//!
//! # Quick Start
//!
//! ```no_run
//! use authdeck::prelude::*;
//!
//! # async fn example() -> authdeck::error::Result<()> {
//! let config = AuthdeckConfig::load()?;
//! let client = ApiClient::new(&config)?;
//! let bus = NotificationBus::new();
//!
//! let mut session = SessionManager::new(client.clone(), bus.clone());
//! session.bootstrap().await;
//!
//! let mut security = SecurityWorkflows::new(client, bus, &config);
//! security.load_all().await;
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod list;
pub mod notify;
pub mod platform;
pub mod prelude;
pub mod session;
pub mod ttl;
pub mod types;
pub mod util;
pub mod workflows;
