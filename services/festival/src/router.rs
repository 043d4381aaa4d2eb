use axum::{
    Router,
    routing::{delete, get, patch, post},
};
use tower_http::trace::TraceLayer;

use lumiere_core::health::{healthz, readyz};
use lumiere_core::middleware::request_id_layer;

use crate::handlers::{
    admin::{
        create_discount, create_event, dashboard_stats, delete_discount, delete_event,
        discount_stats, get_user, list_discounts, list_submissions, list_users,
        recent_activities, review_payment, update_event, update_user,
    },
    auth::{admin_create_token, check_token, create_token, refresh_token, revoke_token, sign_up},
    discount::validate_discount,
    event::{get_event, list_events},
    submission::{create_submission, get_submission, my_submissions, submit_payment},
    team::{
        create_team, delete_team, event_teams, get_team, join_team, leave_team, my_teams,
        remove_member, toggle_lock,
    },
    user::{get_me, my_discounts, update_me},
};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // Accounts
        .route("/auth/sign-up", post(sign_up))
        // Tokens
        .route("/auth/token", get(check_token))
        .route("/auth/token", post(create_token))
        .route("/auth/token", patch(refresh_token))
        .route("/auth/token", delete(revoke_token))
        .route("/auth/admin/token", post(admin_create_token))
        // Profile
        .route("/users/@me", get(get_me))
        .route("/users/@me", patch(update_me))
        .route("/users/@me/discounts", get(my_discounts))
        // Events
        .route("/events", get(list_events))
        .route("/events/{event_id}", get(get_event))
        .route("/events/{event_id}/teams", get(event_teams))
        // Submissions
        .route("/submissions", post(create_submission))
        .route("/submissions/@me", get(my_submissions))
        .route("/submissions/{submission_id}", get(get_submission))
        .route("/submissions/{submission_id}/payment", post(submit_payment))
        // Teams
        .route("/teams", post(create_team))
        .route("/teams/join", post(join_team))
        .route("/teams/@me", get(my_teams))
        .route("/teams/{team_id}", get(get_team))
        .route("/teams/{team_id}", delete(delete_team))
        .route("/teams/{team_id}/leave", post(leave_team))
        .route("/teams/{team_id}/members/{user_id}", delete(remove_member))
        .route("/teams/{team_id}/lock", patch(toggle_lock))
        // Discounts
        .route("/discounts/validate", post(validate_discount))
        // Admin: users
        .route("/admin/users", get(list_users))
        .route("/admin/users/{user_id}", get(get_user))
        .route("/admin/users/{user_id}", patch(update_user))
        // Admin: submissions
        .route("/admin/submissions", get(list_submissions))
        .route(
            "/admin/submissions/{submission_id}/payment",
            patch(review_payment),
        )
        // Admin: events
        .route("/admin/events", post(create_event))
        .route("/admin/events/{event_id}", patch(update_event))
        .route("/admin/events/{event_id}", delete(delete_event))
        // Admin: discounts
        .route("/admin/discounts", post(create_discount))
        .route("/admin/discounts", get(list_discounts))
        .route("/admin/discounts/stats", get(discount_stats))
        .route("/admin/discounts/{discount_id}", delete(delete_discount))
        // Admin: dashboard
        .route("/admin/stats", get(dashboard_stats))
        .route("/admin/activities", get(recent_activities))
        .layer(TraceLayer::new_for_http())
        .layer(request_id_layer())
        .with_state(state)
}
