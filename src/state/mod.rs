//! State management module
//!
//! Local entity mirrors, per-row busy tracking, view-scoped cancellation
//! and the user-facing notice queue.

pub mod cache;
pub mod notices;
pub mod scope;

// Re-export commonly used state components
pub use cache::{BusyGuard, EntityCache, Keyed};
pub use notices::{Notice, NoticeLevel, Notifier};
pub use scope::ViewScope;
