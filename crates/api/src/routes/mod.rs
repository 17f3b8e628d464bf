pub mod admin;
pub mod auth;
pub mod health;
pub mod logs;
pub mod payments;
pub mod payrolls;
pub mod pickups;
pub mod recycling;
pub mod salary_packages;
pub mod subscriptions;
pub mod waste_materials;

use axum::routing::post;
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/register, /auth/login, /auth/refresh        public
/// /auth/forgot-password, /auth/reset-password       public
/// /auth/logout, /auth/me                            authenticated
///
/// /admin/users                                      list, create (admin)
/// /admin/users/{id}                                 get, update, deactivate (admin)
///
/// /pickups                                          create (public), list (staff)
/// /pickups/mine                                     caller's pickups
/// /pickups/{id}                                     get (owner/staff), update (staff), delete (admin)
/// /pickups/{id}/status                              update status (staff)
///
/// /recycling-request                                create (public)
/// /recycling-requests                               list (staff)
/// /recycling-requests/{id}                          get (staff)
/// /recycling-requests/{id}/status                   update status (staff)
///
/// /waste-materials                                  list (public), create (staff)
/// /waste-materials/{id}                             get (public), update (staff), delete (admin)
///
/// /logs                                             write (authenticated), query (admin)
///
/// /subscriptions                                    list (admin)
/// /subscriptions/{id}                               unsubscribe (admin)
///
/// /salary-packages                                  list, create (admin)
/// /salary-packages/{id}                             get, update, delete (admin)
///
/// /payrolls                                         list, generate (admin)
/// /payrolls/{id}                                    get (admin)
/// /payrolls/{id}/pay                                mark paid (admin)
///
/// /create-payment-intent                            create intent (optional auth)
/// /payments                                         list (admin)
/// /payments/webhook                                 signed gateway callback
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/admin", admin::router())
        .nest("/pickups", pickups::router())
        .route(
            "/recycling-request",
            post(handlers::recycling::create_request),
        )
        .nest("/recycling-requests", recycling::router())
        .nest("/waste-materials", waste_materials::router())
        .nest("/logs", logs::router())
        .nest("/subscriptions", subscriptions::router())
        .nest("/salary-packages", salary_packages::router())
        .nest("/payrolls", payrolls::router())
        .route(
            "/create-payment-intent",
            post(handlers::payments::create_payment_intent),
        )
        .nest("/payments", payments::router())
}
