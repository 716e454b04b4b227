//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{admin, auth, bookings, health, locations, stats, users};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Questbook API",
        version = "1.0.0",
        description = "Location-based quiz-game booking platform REST API",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html")
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Auth
        auth::register,
        auth::login,
        auth::forgot_password,
        auth::reset_password,
        auth::me,
        auth::logout,
        // Users
        users::get_profile,
        users::update_profile,
        users::complete_onboarding,
        users::get_user_stats,
        // Locations
        locations::list_locations,
        locations::get_location,
        locations::create_location,
        locations::update_location,
        locations::get_available_slots,
        // Bookings
        bookings::create_booking,
        bookings::get_user_bookings,
        bookings::cancel_booking,
        bookings::get_available_slots,
        bookings::get_booking_stats,
        // Stats
        stats::save_game_stats,
        stats::get_user_game_stats,
        stats::get_user_game_history,
        stats::get_admin_game_stats,
        // Admin
        admin::list_users,
        admin::list_bookings,
        admin::update_booking_status,
    ),
    components(
        schemas(
            // Auth
            crate::models::user::Register,
            crate::models::user::Login,
            crate::models::user::ForgotPassword,
            crate::models::user::AuthResponse,
            auth::ResetPassword,
            auth::Acknowledged,
            // Users
            crate::models::user::User,
            crate::models::user::Profile,
            crate::models::user::ProfileStats,
            crate::models::user::UpdateProfile,
            crate::models::user::CompleteOnboarding,
            crate::models::user::UserStats,
            crate::models::user::Socials,
            crate::models::enums::Role,
            crate::models::enums::Gender,
            crate::models::enums::Occupation,
            // Locations
            crate::models::location::Location,
            crate::models::location::CreateLocation,
            crate::models::location::UpdateLocation,
            crate::models::location::WorkingHours,
            crate::models::location::Game,
            crate::models::location::CreateGame,
            // Bookings
            crate::models::booking::Booking,
            crate::models::booking::BookingDetails,
            crate::models::booking::BookingLocation,
            crate::models::booking::BookingUser,
            crate::models::booking::CreateBooking,
            crate::models::booking::BookingCreated,
            crate::models::booking::UpdateBookingStatus,
            crate::models::booking::AdminBookingQuery,
            crate::models::booking::BookingStats,
            crate::models::booking::Slot,
            crate::models::booking::SlotQuery,
            crate::models::enums::BookingStatus,
            crate::models::enums::GameLanguage,
            // Stats
            crate::models::game_stats::GameStats,
            crate::models::game_stats::SaveGameStats,
            crate::models::game_stats::GameStatsSummary,
            crate::models::game_stats::RecentGame,
            crate::models::game_stats::FavoriteLocation,
            crate::models::game_stats::UserGameStats,
            crate::models::game_stats::AdminStatsQuery,
            crate::models::game_stats::AdminGameStatsEntry,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "auth", description = "Authentication endpoints"),
        (name = "users", description = "User profiles"),
        (name = "locations", description = "Venue catalog and slot availability"),
        (name = "bookings", description = "Slot reservations"),
        (name = "stats", description = "Game session statistics"),
        (name = "admin", description = "Administration")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
