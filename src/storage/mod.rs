//! Storage Layer - SQLite-backed persistence
//!
//! System of record is a single SQLite file with one table:
//! - frames(id, brand, model_code, material, lens_width, bridge_size,
//!   temple_length, color, shape, gender, price, stock, notes, created_at)

pub mod schema;
pub mod sqlite;

pub use sqlite::{BrandTally, DuplicateGroup, FrameStore, InventoryStats};
