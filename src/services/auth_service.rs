// src/services/auth_service.rs
use crate::{
    error::{AppError, AppResult},
    models::user::User,
    services::user_service,
};
use sqlx::SqlitePool;

/// Verifica se a senha fornecida corresponde ao hash guardado.
/// O bcrypt é caro de propósito, por isso corre fora do runtime async.
pub async fn verify_password(password: &str, stored_hash: &str) -> AppResult<bool> {
    let password = password.to_string();
    let stored_hash = stored_hash.to_string();
    tokio::task::spawn_blocking(move || {
        tracing::debug!("Verificando hash bcrypt...");
        bcrypt::verify(&password, &stored_hash)
    })
    .await
    .map_err(|e| {
        tracing::error!("Erro na task spawn_blocking (verify_password): {:?}", e);
        AppError::InternalServerError
    })?
    .map_err(|e| {
        tracing::error!("Erro bcrypt ao verificar senha: {:?}", e);
        AppError::PasswordHashingError
    })
}

/// Gera um hash bcrypt para uma senha.
pub async fn hash_password(password: &str) -> AppResult<String> {
    let password = password.to_string();
    tokio::task::spawn_blocking(move || {
        tracing::debug!("Gerando hash bcrypt...");
        bcrypt::hash(&password, bcrypt::DEFAULT_COST)
    })
    .await
    .map_err(|e| {
        tracing::error!("Erro na task spawn_blocking (hash_password): {:?}", e);
        AppError::InternalServerError
    })?
    .map_err(|e| {
        tracing::error!("Erro bcrypt ao gerar hash: {:?}", e);
        AppError::PasswordHashingError
    })
}

/// Login por e-mail e senha. Devolve o utilizador autenticado ou
/// `InvalidCredentials` — a mesma falha para e-mail desconhecido e senha
/// errada, para não revelar quais e-mails existem.
pub async fn authenticate(db_pool: &SqlitePool, email: &str, password: &str) -> AppResult<User> {
    let user = match user_service::find_user_by_email(db_pool, email).await? {
        Some(u) => u,
        None => {
            tracing::warn!("Login falhou: e-mail não registrado.");
            return Err(AppError::InvalidCredentials);
        }
    };

    if verify_password(password, &user.password_hash).await? {
        Ok(user)
    } else {
        tracing::warn!("Login falhou: senha incorreta para '{}'.", user.email);
        Err(AppError::InvalidCredentials)
    }
}
