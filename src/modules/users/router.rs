use axum::{
    Router, middleware,
    routing::{delete, get, put},
};

use crate::middleware::role::{require_admin, require_self_or_admin};
use crate::modules::users::controller::{
    delete_user, get_me, get_user, get_users, update_user, update_user_role,
};
use crate::state::AppState;

/// Routes under `/api/users`. Expects to be mounted behind `authenticate`.
pub fn init_users_router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(get_users).route_layer(middleware::from_fn(require_admin)),
        )
        .route("/me", get(get_me))
        .route(
            "/{id}",
            get(get_user)
                .patch(update_user)
                .route_layer(middleware::from_fn(require_self_or_admin))
                .merge(delete(delete_user).route_layer(middleware::from_fn(require_admin))),
        )
        .route(
            "/{id}/role",
            put(update_user_role).route_layer(middleware::from_fn(require_admin)),
        )
}
