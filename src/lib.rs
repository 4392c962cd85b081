//! # Soccer Results Viewer Library
//!
//! Building blocks of a web dashboard for browsing soccer match results:
//! read-only access to a relational `results` table, a cascading
//! division/season/team selection state machine, season aggregation, and
//! HTML/SVG rendering served over HTTP.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use soccer_results::{Config, Database, SelectionEvent, Session};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load(None).await?;
//!     let database = Database::connect(&config.database_path, &config.database).await?;
//!
//!     let mut session = Session::open(&database).await;
//!     session
//!         .dispatch(SelectionEvent::ChooseDivision("Premier".to_string()), &database)
//!         .await;
//!     println!("Seasons: {:?}", session.selection().seasons());
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Modules
//!
//! - [`data_access`]: parameterized lookups against the `results` table
//! - [`selection`]: selection state machine and per-viewer sessions
//! - [`aggregation`]: season record and cumulative points
//! - [`presentation`]: tables, chart and page rendering
//! - [`server`]: axum router and listener
//! - [`config`]: configuration management
//! - [`error`]: error types

pub mod aggregation;
pub mod config;
pub mod constants;
pub mod data_access;
pub mod error;
pub mod presentation;
pub mod selection;
pub mod server;
pub mod testing_utils;

pub use aggregation::{SeasonSummary, cumulative_points, summarize};
pub use config::Config;
pub use data_access::{Database, MatchResult, Outcome};
pub use error::AppError;
pub use presentation::{DashboardView, PointsChart, render_page};
pub use selection::{Selection, SelectionEvent, SelectionState, Session};
pub use server::{AppState, build_router};

/// Current version of the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
