//! Row structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` entity struct matching the database row
//! - A `Deserialize` + `Validate` create DTO for inserts
//! - The client-facing `Serialize` shapes returned by the API

pub mod history_entry;
