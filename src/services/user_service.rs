// src/services/user_service.rs
use crate::{
    error::{AppError, AppResult},
    models::user::User,
};
use sqlx::SqlitePool;
use uuid::Uuid;

/// Busca um utilizador pelo seu id.
pub async fn find_user_by_id(db_pool: &SqlitePool, user_id: &str) -> AppResult<Option<User>> {
    tracing::debug!("Buscando utilizador por id: {}", user_id);
    let user = sqlx::query_as::<_, User>(
        r#"
        SELECT id, email, password_hash, user_type, created_at, updated_at
        FROM users
        WHERE id = ?1
        "#,
    )
    .bind(user_id)
    .fetch_optional(db_pool)
    .await?;
    Ok(user)
}

/// Busca um utilizador pelo e-mail (guardado sempre em minúsculas).
pub async fn find_user_by_email(db_pool: &SqlitePool, email: &str) -> AppResult<Option<User>> {
    let email = email.trim().to_lowercase();
    tracing::debug!("Buscando utilizador por e-mail: {}", email);
    let user = sqlx::query_as::<_, User>(
        r#"
        SELECT id, email, password_hash, user_type, created_at, updated_at
        FROM users
        WHERE email = ?1
        "#,
    )
    .bind(&email)
    .fetch_optional(db_pool)
    .await?;
    Ok(user)
}

/// Cria um utilizador novo (registo). A senha chega "raw" e sai daqui em
/// hash bcrypt; o tipo decide qual dashboard a conta vê.
pub async fn create_user(
    db_pool: &SqlitePool,
    email: &str,
    raw_password: &str,
    user_type: &str,
) -> AppResult<User> {
    let email = email.trim().to_lowercase();
    tracing::info!("Tentando criar utilizador: {}", email);

    // 1. Gera o hash da senha
    let password_hash = crate::services::auth_service::hash_password(raw_password).await?;

    // 2. Insere na tabela 'users'
    let id = Uuid::new_v4().to_string();
    let insert_result = sqlx::query(
        r#"
        INSERT INTO users (id, email, password_hash, user_type)
        VALUES (?1, ?2, ?3, ?4)
        "#,
    )
    .bind(&id)
    .bind(&email)
    .bind(&password_hash)
    .bind(user_type)
    .execute(db_pool)
    .await;

    // Verifica erro de constraint (e-mail duplicado)
    if let Err(sqlx::Error::Database(db_err)) = &insert_result {
        // Códigos comuns de UNIQUE constraint no SQLite
        if db_err
            .code()
            .map_or(false, |c| c == "19" || c == "2067" || c == "1555")
        {
            tracing::warn!("Falha ao criar utilizador: e-mail '{}' já existe.", email);
            return Err(AppError::EmailAlreadyRegistered);
        }
    }
    insert_result?; // Propaga outros erros da inserção

    // 3. Relê o registo completo (vem com os timestamps preenchidos)
    let user = find_user_by_id(db_pool, &id).await?.ok_or_else(|| {
        tracing::error!("CRÍTICO: utilizador '{}' não encontrado logo após o INSERT!", id);
        AppError::InternalServerError
    })?;

    tracing::info!("✅ Utilizador '{}' criado com sucesso.", email);
    Ok(user)
}
