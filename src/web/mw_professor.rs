// src/web/mw_professor.rs
use crate::{
    error::AppError,
    models::user::TIPO_PROFESSOR,
    services::user_service,
    state::AppState,
    web::mw_auth::UserId,
};
use axum::{
    extract::{Extension, Request, State},
    middleware::Next,
    response::Response,
};

/// Middleware que verifica se o utilizador logado é professor.
/// Deve ser executado *depois* do middleware `require_auth`.
pub async fn require_professor(
    State(state): State<AppState>,
    Extension(user_id_ext): Extension<UserId>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let user_id = user_id_ext.0;
    tracing::debug!("Professor MW: Verificando tipo para {}", user_id);

    // Busca o utilizador para confirmar o tipo da conta
    match user_service::find_user_by_id(&state.db_pool, &user_id).await {
        Ok(Some(user)) if user.user_type == TIPO_PROFESSOR => {
            tracing::debug!("Professor MW: Acesso concedido para {}", user_id);
            Ok(next.run(request).await)
        }
        Ok(Some(user)) => {
            tracing::warn!(
                "Professor MW: Acesso negado para {} (tipo '{}').",
                user_id,
                user.user_type
            );
            Err(AppError::Unauthorized)
        }
        Ok(None) => {
            // Sessão válida mas conta sumiu da DB
            tracing::warn!("Professor MW: Utilizador {} da sessão não existe na DB.", user_id);
            Err(AppError::Unauthorized)
        }
        Err(e) => {
            tracing::error!("Professor MW: Erro ao buscar utilizador {}: {:?}", user_id, e);
            Err(e)
        }
    }
}
