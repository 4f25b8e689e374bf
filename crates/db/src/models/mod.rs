//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` request DTO shared by create and update
//! - Filter and response shapes for listing

pub mod song;
