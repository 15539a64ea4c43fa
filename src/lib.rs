//! Design System Generator (DSG) Library
//!
//! Scans a design canvas for recurring visual attributes (solid fill colors,
//! text styles and components) and synthesizes a "design system" page that
//! documents each unique value, deduplicated and sorted by usage.
//!
//! # Module Overview
//!
//! - [`document`] - In-memory host document model (node arena, pages, selection)
//! - [`collector`] - Traversal and aggregation into a [`DesignInventory`]
//! - [`reporter`] - Report page generation
//! - [`layout`] - Auto-layout flow engine
//! - [`fonts`] - Font catalog and load-token registry
//! - [`session`] - Plugin message handling and reselect-and-copy
//! - [`config`] - Configuration file support
//! - [`output`] - JSON output schemas
//!
//! # Example
//!
//! ```no_run
//! use dsg_lib::{load_document, Config, FontCatalog, PluginMessage, Session};
//!
//! # async fn example() -> dsg_lib::Result<()> {
//! let config = Config::default();
//! let fonts = FontCatalog::from_config(&config.fonts).await?;
//! let mut doc = load_document("canvas.json".as_ref()).await?;
//!
//! let mut session = Session::new(&config, &fonts);
//! for reply in session.handle(&mut doc, PluginMessage::GenerateDesignSystem).await {
//!     println!("{}", serde_json::to_string(&reply)?);
//! }
//! # Ok(())
//! # }
//! ```

pub mod collector;
pub mod color;
pub mod config;
pub mod document;
pub mod error;
pub mod fonts;
pub mod layout;
pub mod messages;
pub mod output;
pub mod reporter;
pub mod session;
pub mod viewport;

#[cfg(test)]
mod test_support;

pub use collector::{
    collect, collect_page, CollectOptions, ColorEntry, ComponentEntry, DesignInventory,
    InventoryStats, TextStyleEntry,
};
pub use color::{hex_to_rgb, rgb_to_hex, ColorParseError};
pub use config::Config;
pub use document::{load_document, save_document, Document, DocumentError, NodeId};
pub use error::{DsgError, ErrorCategory, ErrorPayload, Result};
pub use fonts::{FontCatalog, FontError, FontLoader, FontName, FontRegistry, LoadedFont};
pub use layout::apply_layout;
pub use messages::{Notification, NotificationLevel, PluginMessage, UiMessage};
pub use output::{DsgOutput, ErrorOutput, GenerateOutput, ScanOutput, DSG_OUTPUT_VERSION};
pub use reporter::{ReportOutcome, Reporter, CONTAINER_NAME};
pub use session::{reselect_report, ReselectError, ReporterState, Session, SessionState};
pub use viewport::Viewport;
