// src/web/mw_estudante.rs
use crate::{
    error::AppError,
    models::user::TIPO_ESTUDANTE,
    services::user_service,
    state::AppState,
    web::mw_auth::UserId,
};
use axum::{
    extract::{Extension, Request, State},
    middleware::Next,
    response::Response,
};

/// Middleware que verifica se o utilizador logado é estudante.
/// Deve ser executado *depois* do middleware `require_auth`.
pub async fn require_estudante(
    State(state): State<AppState>,
    Extension(user_id_ext): Extension<UserId>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let user_id = user_id_ext.0;
    tracing::debug!("Estudante MW: Verificando tipo para {}", user_id);

    match user_service::find_user_by_id(&state.db_pool, &user_id).await {
        Ok(Some(user)) if user.user_type == TIPO_ESTUDANTE => {
            tracing::debug!("Estudante MW: Acesso concedido para {}", user_id);
            Ok(next.run(request).await)
        }
        Ok(Some(user)) => {
            tracing::warn!(
                "Estudante MW: Acesso negado para {} (tipo '{}').",
                user_id,
                user.user_type
            );
            Err(AppError::Unauthorized)
        }
        Ok(None) => {
            tracing::warn!("Estudante MW: Utilizador {} da sessão não existe na DB.", user_id);
            Err(AppError::Unauthorized)
        }
        Err(e) => {
            tracing::error!("Estudante MW: Erro ao buscar utilizador {}: {:?}", user_id, e);
            Err(e)
        }
    }
}
