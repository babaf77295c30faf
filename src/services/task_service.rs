// src/services/task_service.rs
use crate::{
    error::{AppError, AppResult},
    models::task::{Task, TaskResumo},
};
use sqlx::SqlitePool;
use uuid::Uuid;

/// Cria uma tarefa nova para o professor dono e devolve o id gerado.
/// As listas (materiais e to-do) são serializadas como JSON na coluna TEXT.
#[allow(clippy::too_many_arguments)]
pub async fn create_task(
    db_pool: &SqlitePool,
    owner_id: &str,
    title: &str,
    description: &str,
    due_date: &str,
    instructions: &str,
    criteria: &str,
    materials: &[String],
    todolist: &[String],
) -> AppResult<String> {
    tracing::info!("Criando tarefa '{}' para o professor {}", title, owner_id);

    let id = Uuid::new_v4().to_string();
    let materials_json = serde_json::to_string(materials)?;
    let todolist_json = serde_json::to_string(todolist)?;

    sqlx::query(
        r#"
        INSERT INTO tasks (id, owner_id, title, description, due_date, instructions, criteria, materials, todolist)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
        "#,
    )
    .bind(&id)
    .bind(owner_id)
    .bind(title)
    .bind(description)
    .bind(due_date)
    .bind(instructions)
    .bind(criteria)
    .bind(&materials_json)
    .bind(&todolist_json)
    .execute(db_pool)
    .await?;

    tracing::info!("✅ Tarefa '{}' criada (id: {}).", title, id);
    Ok(id)
}

/// Lista as tarefas de um professor, com contagem de temas e grupos por tarefa.
pub async fn list_tasks_do_professor(
    db_pool: &SqlitePool,
    owner_id: &str,
) -> AppResult<Vec<TaskResumo>> {
    let tarefas = sqlx::query_as::<_, TaskResumo>(
        r#"
        SELECT
            t.id,
            t.title,
            t.due_date,
            (SELECT COUNT(*) FROM themes th WHERE th.task_id = t.id) AS num_temas,
            (SELECT COUNT(*) FROM groups g WHERE g.task_id = t.id) AS num_grupos
        FROM tasks t
        WHERE t.owner_id = ?1
        ORDER BY t.due_date ASC, t.created_at ASC
        "#,
    )
    .bind(owner_id)
    .fetch_all(db_pool)
    .await?;
    Ok(tarefas)
}

/// Lista todas as tarefas (visão do estudante, sem filtro de dono).
pub async fn list_tasks_todas(db_pool: &SqlitePool) -> AppResult<Vec<TaskResumo>> {
    let tarefas = sqlx::query_as::<_, TaskResumo>(
        r#"
        SELECT
            t.id,
            t.title,
            t.due_date,
            (SELECT COUNT(*) FROM themes th WHERE th.task_id = t.id) AS num_temas,
            (SELECT COUNT(*) FROM groups g WHERE g.task_id = t.id) AS num_grupos
        FROM tasks t
        ORDER BY t.due_date ASC, t.created_at ASC
        "#,
    )
    .fetch_all(db_pool)
    .await?;
    Ok(tarefas)
}

/// Busca uma tarefa pelo id, sem restrição de dono (visão do estudante).
pub async fn find_task_by_id(db_pool: &SqlitePool, task_id: &str) -> AppResult<Option<Task>> {
    let tarefa = sqlx::query_as::<_, Task>(
        r#"
        SELECT id, owner_id, title, description, due_date, instructions, criteria,
               materials, todolist, created_at, updated_at
        FROM tasks
        WHERE id = ?1
        "#,
    )
    .bind(task_id)
    .fetch_optional(db_pool)
    .await?;
    Ok(tarefa)
}

/// Busca uma tarefa pelo id, mas só se pertencer ao professor indicado.
pub async fn find_task_do_professor(
    db_pool: &SqlitePool,
    task_id: &str,
    owner_id: &str,
) -> AppResult<Option<Task>> {
    let tarefa = sqlx::query_as::<_, Task>(
        r#"
        SELECT id, owner_id, title, description, due_date, instructions, criteria,
               materials, todolist, created_at, updated_at
        FROM tasks
        WHERE id = ?1 AND owner_id = ?2
        "#,
    )
    .bind(task_id)
    .bind(owner_id)
    .fetch_optional(db_pool)
    .await?;
    Ok(tarefa)
}

/// Atualiza os campos editáveis de uma tarefa (sobrescrita completa).
/// Só o professor dono consegue; para qualquer outro a tarefa "não existe".
#[allow(clippy::too_many_arguments)]
pub async fn update_task(
    db_pool: &SqlitePool,
    task_id: &str,
    owner_id: &str,
    title: &str,
    description: &str,
    due_date: &str,
    instructions: &str,
    criteria: &str,
    materials: &[String],
    todolist: &[String],
) -> AppResult {
    tracing::info!("Atualizando tarefa {} do professor {}", task_id, owner_id);

    let materials_json = serde_json::to_string(materials)?;
    let todolist_json = serde_json::to_string(todolist)?;

    // updated_at fica por conta do trigger
    let result = sqlx::query(
        r#"
        UPDATE tasks
        SET title = ?3, description = ?4, due_date = ?5,
            instructions = ?6, criteria = ?7, materials = ?8, todolist = ?9
        WHERE id = ?1 AND owner_id = ?2
        "#,
    )
    .bind(task_id)
    .bind(owner_id)
    .bind(title)
    .bind(description)
    .bind(due_date)
    .bind(instructions)
    .bind(criteria)
    .bind(&materials_json)
    .bind(&todolist_json)
    .execute(db_pool)
    .await?;

    if result.rows_affected() == 0 {
        tracing::warn!("Tarefa {} não encontrada (ou não pertence ao professor).", task_id);
        return Err(AppError::NotFound);
    }

    tracing::info!("✅ Tarefa {} atualizada.", task_id);
    Ok(())
}

/// Apaga uma tarefa do professor dono. Temas e grupos associados caem
/// junto pelo ON DELETE CASCADE do schema.
pub async fn delete_task(db_pool: &SqlitePool, task_id: &str, owner_id: &str) -> AppResult {
    tracing::info!("Apagando tarefa {} do professor {}", task_id, owner_id);

    let result = sqlx::query("DELETE FROM tasks WHERE id = ?1 AND owner_id = ?2")
        .bind(task_id)
        .bind(owner_id)
        .execute(db_pool)
        .await?;

    if result.rows_affected() == 0 {
        tracing::warn!("Tarefa {} não encontrada (ou não pertence ao professor).", task_id);
        return Err(AppError::NotFound);
    }

    tracing::info!("🧹 Tarefa {} apagada (temas e grupos em cascata).", task_id);
    Ok(())
}
