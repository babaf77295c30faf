// src/web/mw_auth.rs
use crate::error::AppError;
use axum::{
    extract::Request,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;

// Middleware que verifica se o utilizador está logado
pub async fn require_auth(
    session: Session,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    // Tenta obter o 'user_id' da sessão
    match session.get::<String>("user_id").await {
        Ok(Some(user_id)) => {
            tracing::debug!("Autenticação MW: Utilizador '{}' autenticado. Prosseguindo...", user_id);

            // Guarda o user_id nas extensões para os handlers protegidos
            request.extensions_mut().insert(UserId(user_id));

            Ok(next.run(request).await)
        }
        Ok(None) => {
            // Não há 'user_id' na sessão -> não está logado
            tracing::debug!("Autenticação MW: Não autenticado (sem user_id). Redirecionando para /login");
            Ok(Redirect::to("/login").into_response())
        }
        Err(e) => {
            // Erro ao tentar ler a sessão (ex: problema na DB)
            tracing::error!("Autenticação MW: Erro ao ler sessão: {:?}", e);
            Err(AppError::SessionError(format!("Erro ao verificar sessão: {}", e)))
        }
    }
}

// Struct simples para guardar o user_id nas extensões da requisição
#[derive(Clone, Debug)]
pub struct UserId(pub String);
