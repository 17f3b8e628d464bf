//! Fixtures shared by the repository integration tests.

#![allow(dead_code)]

use chrono::NaiveDate;
use sqlx::PgPool;
use wastewise_core::roles::CITIZEN_ROLE_ID;
use wastewise_db::models::pickup::CreatePickup;
use wastewise_db::models::user::{CreateUser, User};
use wastewise_db::repositories::UserRepo;

pub const STAFF_ROLE_ID: i64 = 2;

pub async fn create_user(pool: &PgPool, email: &str, role_id: i64) -> User {
    UserRepo::create(
        pool,
        &CreateUser {
            name: "Test User".to_string(),
            email: email.to_string(),
            phone: None,
            password_hash: "$argon2id$placeholder".to_string(),
            role_id,
        },
    )
    .await
    .unwrap()
}

pub async fn create_citizen(pool: &PgPool, email: &str) -> User {
    create_user(pool, email, CITIZEN_ROLE_ID).await
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn new_pickup(name: &str, service_type: &str) -> CreatePickup {
    CreatePickup {
        full_name: name.to_string(),
        email: format!("{}@example.com", name.to_lowercase().replace(' ', ".")),
        phone: "+15551234567".to_string(),
        waste_types: vec!["plastic".to_string(), "paper".to_string()],
        address: "12 Green Street".to_string(),
        preferred_date: date(2026, 11, 2),
        service_type: service_type.to_string(),
        latitude: Some(-1.2921),
        longitude: Some(36.8219),
        amount_cents: 1500,
        notes: None,
    }
}
