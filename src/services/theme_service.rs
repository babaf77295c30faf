// src/services/theme_service.rs
use crate::{
    error::{AppError, AppResult},
    models::task::Theme,
};
use sqlx::SqlitePool;
use uuid::Uuid;

/// Lista os temas de uma tarefa, disponíveis ou não.
pub async fn list_themes(db_pool: &SqlitePool, task_id: &str) -> AppResult<Vec<Theme>> {
    let temas = sqlx::query_as::<_, Theme>(
        r#"
        SELECT id, task_id, title, description, available
        FROM themes
        WHERE task_id = ?1
        ORDER BY title ASC
        "#,
    )
    .bind(task_id)
    .fetch_all(db_pool)
    .await?;
    Ok(temas)
}

/// Cria um tema para a tarefa. Nasce disponível; título repetido na mesma
/// tarefa é recusado pela constraint UNIQUE.
pub async fn create_theme(
    db_pool: &SqlitePool,
    task_id: &str,
    title: &str,
    description: &str,
) -> AppResult<String> {
    tracing::info!("Criando tema '{}' na tarefa {}", title, task_id);

    let id = Uuid::new_v4().to_string();
    let insert_result = sqlx::query(
        r#"
        INSERT INTO themes (id, task_id, title, description)
        VALUES (?1, ?2, ?3, ?4)
        "#,
    )
    .bind(&id)
    .bind(task_id)
    .bind(title)
    .bind(description)
    .execute(db_pool)
    .await;

    if let Err(sqlx::Error::Database(db_err)) = &insert_result {
        if db_err
            .code()
            .map_or(false, |c| c == "19" || c == "2067" || c == "1555")
        {
            tracing::warn!("Tema '{}' já existe na tarefa {}.", title, task_id);
            return Err(AppError::ThemeTitleTaken);
        }
    }
    insert_result?;

    tracing::info!("✅ Tema '{}' criado (id: {}).", title, id);
    Ok(id)
}

/// Apaga um tema da tarefa. Um tema já escolhido por um grupo não pode
/// ser apagado; o professor tem de desfazer o grupo primeiro.
pub async fn delete_theme(db_pool: &SqlitePool, task_id: &str, theme_id: &str) -> AppResult {
    tracing::info!("Apagando tema {} da tarefa {}", theme_id, task_id);

    let mut tx = db_pool.begin().await?;

    // 1. Recusa se algum grupo já escolheu este tema nesta tarefa; um id
    // de tema de outra tarefa cai no NotFound do passo 2
    let tem_grupo = sqlx::query_scalar::<_, bool>(
        r#"
        SELECT EXISTS(
            SELECT 1
            FROM groups g
            JOIN themes t ON t.id = g.theme_id
            WHERE g.theme_id = ?1 AND t.task_id = ?2
        )
        "#,
    )
    .bind(theme_id)
    .bind(task_id)
    .fetch_one(&mut *tx)
    .await?;

    if tem_grupo {
        tracing::warn!("Tema {} tem grupo registrado; remoção recusada.", theme_id);
        return Err(AppError::ThemeHasGroup);
    }

    // 2. Apaga (escopado à tarefa para não apagar tema de outra)
    let result = sqlx::query("DELETE FROM themes WHERE id = ?1 AND task_id = ?2")
        .bind(theme_id)
        .bind(task_id)
        .execute(&mut *tx)
        .await?;

    if result.rows_affected() == 0 {
        tracing::warn!("Tema {} não encontrado na tarefa {}.", theme_id, task_id);
        return Err(AppError::NotFound);
    }

    tx.commit().await?;
    tracing::info!("🧹 Tema {} apagado.", theme_id);
    Ok(())
}
