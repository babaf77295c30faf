// tests/common/mod.rs
//
// Helpers partilhados pelos testes de integração.
#![allow(dead_code)] // nem todos os binários de teste usam todos os helpers

use gestor_tarefas::services::{task_service, theme_service, user_service};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;

/// Pool SQLite em memória com o schema migrado.
/// Uma única conexão: o "sqlite::memory:" de cada conexão nova seria uma
/// base diferente, por isso todos os acessos partilham a mesma.
pub async fn pool_teste() -> SqlitePool {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")
        .expect("opções de conexão de teste")
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await
        .expect("abrir SQLite em memória");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("migrar schema de teste");

    pool
}

/// Cria um professor e devolve o id.
pub async fn seed_professor(pool: &SqlitePool, email: &str) -> String {
    user_service::create_user(pool, email, "senha-segura", "professor")
        .await
        .expect("criar professor de teste")
        .id
}

/// Cria um estudante e devolve o id.
pub async fn seed_estudante(pool: &SqlitePool, email: &str) -> String {
    user_service::create_user(pool, email, "senha-segura", "estudante")
        .await
        .expect("criar estudante de teste")
        .id
}

/// Tarefa mínima para os testes de temas e grupos.
pub async fn seed_task(pool: &SqlitePool, owner_id: &str, title: &str) -> String {
    task_service::create_task(
        pool,
        owner_id,
        title,
        "Descrição de teste",
        "2026-12-01",
        "Instruções de teste",
        "Critérios de teste",
        &[],
        &[],
    )
    .await
    .expect("criar tarefa de teste")
}

/// Tema disponível na tarefa indicada.
pub async fn seed_theme(pool: &SqlitePool, task_id: &str, title: &str) -> String {
    theme_service::create_theme(pool, task_id, title, "Descrição do tema")
        .await
        .expect("criar tema de teste")
}
