/**
 * API Routes
 *
 * ## Public
 * - `POST /api/auth/register`
 * - `POST /api/auth/login`
 *
 * ## Protected (Bearer token)
 * - `/api/auth/...` - own account, password, avatar, navigation
 * - `/api/users/...` - customers, trainers, expiry check
 * - `/api/staff/...` - receptionist accounts (admin)
 * - `/api/equipment/...` - inventory, images, maintenance history
 * - `/api/maintenance/...` - maintenance records
 * - `/api/schedules/...` - trainer work schedules
 */

use axum::routing::{get, post, put};
use axum::Router;

use crate::backend::auth;
use crate::backend::equipment;
use crate::backend::maintenance;
use crate::backend::members;
use crate::backend::schedule;
use crate::backend::server::state::AppState;
use crate::backend::staff;

/// Routes reachable without a token
pub fn configure_public_routes(router: Router<AppState>) -> Router<AppState> {
    router
        .route("/api/auth/register", post(auth::register))
        .route("/api/auth/login", post(auth::login))
}

/// Routes that need an authenticated caller
///
/// The caller wraps the result in `auth_middleware` with `route_layer`.
pub fn configure_protected_routes(router: Router<AppState>) -> Router<AppState> {
    router
        // Own account
        .route("/api/auth/me", get(auth::get_me).put(auth::update_me))
        .route("/api/auth/me/avatar", post(auth::upload_avatar))
        .route("/api/auth/password", put(auth::change_password))
        .route("/api/auth/navigation", get(auth::get_navigation))
        // Customers
        .route(
            "/api/users/customers",
            get(members::list_customers).post(members::create_customer),
        )
        .route(
            "/api/users/customers/{id}",
            get(members::get_customer)
                .put(members::update_customer)
                .delete(members::delete_customer),
        )
        .route("/api/users/customers/{id}/renew", post(members::renew_membership))
        .route("/api/users/customers/{id}/trainer", put(members::assign_trainer))
        .route("/api/users/customers/{id}/status", put(members::set_customer_status))
        .route("/api/users/my-customers", get(members::my_customers))
        .route("/api/users/check-expired", post(members::check_expired))
        // Trainers
        .route(
            "/api/users/trainers",
            get(members::list_trainers).post(members::create_trainer),
        )
        .route(
            "/api/users/trainers/{id}",
            get(members::get_trainer)
                .put(members::update_trainer)
                .delete(members::delete_trainer),
        )
        // Staff
        .route("/api/staff", get(staff::list_staff).post(staff::create_staff))
        .route(
            "/api/staff/{id}",
            get(staff::get_staff).put(staff::update_staff).delete(staff::delete_staff),
        )
        // Equipment
        .route(
            "/api/equipment",
            get(equipment::list_equipment).post(equipment::create_equipment),
        )
        .route(
            "/api/equipment/{id}",
            get(equipment::get_equipment)
                .put(equipment::update_equipment)
                .delete(equipment::delete_equipment),
        )
        .route("/api/equipment/{id}/image", post(equipment::upload_equipment_image))
        .route("/api/equipment/{id}/maintenance", get(equipment::equipment_maintenance))
        // Maintenance
        .route(
            "/api/maintenance",
            get(maintenance::list_maintenance).post(maintenance::create_maintenance),
        )
        .route("/api/maintenance/upcoming", get(maintenance::upcoming_maintenance))
        .route(
            "/api/maintenance/{id}",
            get(maintenance::get_maintenance)
                .put(maintenance::update_maintenance)
                .delete(maintenance::delete_maintenance),
        )
        // Schedules
        .route("/api/schedules/me", get(schedule::my_schedule))
        .route(
            "/api/schedules/{trainer_id}",
            get(schedule::get_schedule)
                .post(schedule::add_schedule_item)
                .put(schedule::replace_schedule),
        )
        .route(
            "/api/schedules/{trainer_id}/items/{item_id}",
            axum::routing::delete(schedule::delete_schedule_item),
        )
}
