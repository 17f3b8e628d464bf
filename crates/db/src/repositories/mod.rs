//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod password_reset_repo;
pub mod payment_repo;
pub mod payroll_repo;
pub mod pickup_repo;
pub mod recycling_repo;
pub mod role_repo;
pub mod salary_package_repo;
pub mod session_repo;
pub mod subscription_repo;
pub mod system_log_repo;
pub mod user_repo;
pub mod waste_material_repo;

pub use password_reset_repo::PasswordResetRepo;
pub use payment_repo::PaymentRepo;
pub use payroll_repo::PayrollRepo;
pub use pickup_repo::PickupRepo;
pub use recycling_repo::RecyclingRequestRepo;
pub use role_repo::RoleRepo;
pub use salary_package_repo::SalaryPackageRepo;
pub use session_repo::SessionRepo;
pub use subscription_repo::{SubscribeOutcome, SubscriptionRepo};
pub use system_log_repo::SystemLogRepo;
pub use user_repo::UserRepo;
pub use waste_material_repo::WasteMaterialRepo;
