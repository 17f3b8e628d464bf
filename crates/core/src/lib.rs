//! Domain building blocks for the WasteWise backend.
//!
//! Everything in here is pure: constants, vocabulary enums, validation
//! helpers and small calculations shared by the repository and HTTP layers.
//! The crate has no internal dependencies so any binary or tool can use it.

pub mod error;
pub mod hashing;
pub mod logs;
pub mod money;
pub mod pagination;
pub mod payroll;
pub mod pickup;
pub mod roles;
pub mod subscription;
pub mod tokens;
pub mod types;
pub mod validation;
pub mod waste;
