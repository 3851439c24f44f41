//! vsh-suite: end-to-end UI suite for Virtual Stain Hub.
//!
//! Page objects map screens to [`vsh_probe::Locator`]s; [`specs`] holds the
//! linear test scripts built on them. [`auth::global_setup`] signs in once
//! and saves a session the runner can reuse.
//!
//! ```ignore
//! use std::sync::Arc;
//! use vsh_probe::{BrowserPageFactory, SuiteConfig, SuiteRunner};
//!
//! let config = Arc::new(SuiteConfig::load(None)?);
//! let factory = BrowserPageFactory::launch(Arc::clone(&config)).await?;
//! let report = SuiteRunner::new(config, Arc::new(factory))
//!     .run(&vsh_suite::specs::all())
//!     .await?;
//! ```

#![warn(missing_docs)]

pub mod auth;
pub mod dates;
pub mod fixtures;
pub mod helpers;
pub mod log;
pub mod pages;
pub mod specs;
pub mod test_data;

pub use auth::{global_setup, save_session, DEFAULT_AUTH_FILE};
pub use fixtures::LoginFixture;
pub use helpers::login_to_dashboard;
