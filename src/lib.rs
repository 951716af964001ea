//! # Linkdeck
//!
//! A self-hostable start page: bookmarked links grouped into categories,
//! readable by anyone, curated by a single administrator. Usable both as a
//! standalone binary and as a library.
//!
//! ## Library Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use linkdeck::auth::TokenService;
//! use linkdeck::server::{AppState, create_router};
//! use linkdeck::store::{SqliteStore, Store};
//!
//! let store = SqliteStore::new("./data/linkdeck.db").unwrap();
//! store.initialize().unwrap();
//!
//! let state = Arc::new(AppState::new(
//!     Arc::new(store),
//!     TokenService::new("signing-secret"),
//! ));
//! let router = create_router(state);
//! // Serve with axum...
//! ```

pub mod auth;
pub mod config;
pub mod error;
pub mod server;
pub mod store;
pub mod types;
