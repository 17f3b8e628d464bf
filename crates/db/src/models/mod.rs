//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - A `Deserialize` update DTO (all `Option` fields) for patches
//! - Where the entity is listable, a query struct for filters + pagination

pub mod page;
pub mod password_reset;
pub mod payment;
pub mod payroll;
pub mod pickup;
pub mod recycling;
pub mod role;
pub mod salary_package;
pub mod session;
pub mod subscription;
pub mod system_log;
pub mod user;
pub mod waste_material;
