// src/web/routes.rs
use crate::{
    state::AppState,
    web::{
        auth_handlers, estudante_handlers, mw_auth, mw_estudante, mw_professor,
        professor_handlers,
    },
};
use axum::{
    middleware,
    routing::{get, post},
    Router,
};

pub fn create_router(app_state: AppState) -> Router {
    // --- Rotas Públicas ---
    let public_routes = Router::new()
        .route("/login", get(auth_handlers::show_login_form).post(auth_handlers::handle_login))
        .route("/register", get(auth_handlers::show_register_form).post(auth_handlers::handle_register))
        .route("/logout", get(auth_handlers::handle_logout))
        .route("/", get(|| async { axum::response::Redirect::permanent("/login") }));

    // --- Rotas do Professor ---
    // Exigem login E conta do tipo professor
    let professor_routes = Router::new()
        .route("/professor", get(professor_handlers::show_dashboard))
        .route("/professor/tasks", post(professor_handlers::handle_create_task))
        .route("/task/{id}",
            get(professor_handlers::show_task_detail)
            .post(professor_handlers::handle_update_task)
        )
        .route("/task/{id}/delete", post(professor_handlers::handle_delete_task))
        .route("/task/{id}/edit-themes", get(professor_handlers::show_edit_themes))
        .route("/task/{id}/themes", post(professor_handlers::handle_create_theme))
        .route("/task/{id}/themes/{theme_id}/delete", post(professor_handlers::handle_delete_theme))
        // Aplica APENAS mw_professor aqui (mw_auth será aplicado no router pai)
        .route_layer(middleware::from_fn_with_state(
            app_state.clone(),
            mw_professor::require_professor,
        ));

    // --- Rotas do Estudante ---
    // Exigem login E conta do tipo estudante
    let estudante_routes = Router::new()
        .route("/estudante", get(estudante_handlers::show_dashboard))
        .route("/student/task/{id}", get(estudante_handlers::show_task))
        .route("/student/task/{id}/groups", post(estudante_handlers::handle_register_group))
        .route_layer(middleware::from_fn_with_state(
            app_state.clone(),
            mw_estudante::require_estudante,
        ));

    // --- Rotas Autenticadas (Combinando tudo) ---
    // O require_auth corre primeiro e põe o UserId nas extensões;
    // os middlewares de tipo correm a seguir, rota a rota.
    let authenticated_routes = Router::new()
        .merge(professor_routes)
        .merge(estudante_routes)
        .route_layer(middleware::from_fn_with_state(
            app_state.clone(),
            mw_auth::require_auth,
        ));

    // --- Router Final ---
    Router::new()
        .merge(public_routes)
        .merge(authenticated_routes)
        .with_state(app_state)
}
