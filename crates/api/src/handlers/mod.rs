pub mod admin;
pub mod auth;
pub mod logs;
pub mod payments;
pub mod payrolls;
pub mod pickups;
pub mod recycling;
pub mod salary_packages;
pub mod subscriptions;
pub mod waste_materials;
