// src/services/group_service.rs
use crate::{
    error::{AppError, AppResult},
    models::task::GroupComTema,
};
use sqlx::SqlitePool;
use uuid::Uuid;

/// Lista os grupos de uma tarefa com o título do tema escolhido.
pub async fn list_groups(db_pool: &SqlitePool, task_id: &str) -> AppResult<Vec<GroupComTema>> {
    let grupos = sqlx::query_as::<_, GroupComTema>(
        r#"
        SELECT g.id, g.name, g.members, t.title AS theme_title
        FROM groups g
        JOIN themes t ON g.theme_id = t.id
        WHERE g.task_id = ?1
        ORDER BY g.created_at ASC, g.name ASC
        "#,
    )
    .bind(task_id)
    .fetch_all(db_pool)
    .await?;
    Ok(grupos)
}

/// Registra um grupo numa tarefa, reivindicando um tema disponível.
///
/// A escolha do tema é o ponto sensível: dois grupos podem submeter o
/// mesmo tema ao mesmo tempo. Por isso tudo acontece numa transação que
/// COMEÇA pelo UPDATE condicional - quem marcar `available = 0` primeiro
/// fica com o tema, e o segundo UPDATE afeta zero linhas. Ler antes de
/// escrever deixaria uma janela entre a leitura e a escrita.
pub async fn register_group(
    db_pool: &SqlitePool,
    task_id: &str,
    theme_id: &str,
    name: &str,
    members: &[String],
) -> AppResult<String> {
    tracing::info!(
        "Registrando grupo '{}' na tarefa {} (tema {})",
        name,
        task_id,
        theme_id
    );

    let mut tx = db_pool.begin().await?;

    // 1. Reivindica o tema: só passa se ainda estiver disponível
    let claim = sqlx::query(
        r#"
        UPDATE themes
        SET available = 0
        WHERE id = ?1 AND task_id = ?2 AND available = 1
        "#,
    )
    .bind(theme_id)
    .bind(task_id)
    .execute(&mut *tx)
    .await?;

    if claim.rows_affected() == 0 {
        // Tema inexistente ou já reivindicado? Distingue para a mensagem certa.
        let existe = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM themes WHERE id = ?1 AND task_id = ?2)",
        )
        .bind(theme_id)
        .bind(task_id)
        .fetch_one(&mut *tx)
        .await?;

        if existe {
            tracing::warn!("Tema {} já foi escolhido por outro grupo.", theme_id);
            return Err(AppError::ThemeUnavailable);
        }
        tracing::warn!("Tema {} não existe na tarefa {}.", theme_id, task_id);
        return Err(AppError::NotFound);
    }

    // 2. Insere o grupo com o tema garantido
    let id = Uuid::new_v4().to_string();
    let members_json = serde_json::to_string(members)?;
    sqlx::query(
        r#"
        INSERT INTO groups (id, task_id, theme_id, name, members)
        VALUES (?1, ?2, ?3, ?4, ?5)
        "#,
    )
    .bind(&id)
    .bind(task_id)
    .bind(theme_id)
    .bind(name)
    .bind(&members_json)
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;
    tracing::info!("✅ Grupo '{}' registrado (id: {}).", name, id);
    Ok(id)
}
