//! Static site freezer for framework templates.
//!
//! Renders templates written for a dynamic web app into plain HTML files,
//! using placeholder stand-ins for the framework's request globals.

pub mod assets;
pub mod builder;
pub mod context;
pub mod links;
pub mod routes;
pub mod templates;

pub use builder::{BuildConfig, BuildError, BuildResult, SkippedPage, StaticBuilder};
pub use context::MockContext;
pub use links::{Layout, LinkRewriter};
pub use routes::{RouteTable, DEFAULT_PAGES, DEFAULT_ROUTES};
