// tests/task_tests.rs
//
// CRUD de tarefas e escopo por dono.

mod common;

use common::{pool_teste, seed_professor, seed_task, seed_theme};
use gestor_tarefas::error::AppError;
use gestor_tarefas::services::{group_service, task_service, theme_service};

#[tokio::test]
async fn criar_e_listar_tarefas_do_professor() {
    let pool = pool_teste().await;
    let prof = seed_professor(&pool, "prof@escola.pt").await;
    let outro = seed_professor(&pool, "outro@escola.pt").await;

    task_service::create_task(
        &pool,
        &prof,
        "Trabalho de História",
        "Revolução Industrial",
        "2026-11-20",
        "Ler o capítulo 4",
        "Clareza e fontes",
        &["Manual da disciplina".to_string()],
        &["Escolher tema".to_string(), "Entregar relatório".to_string()],
    )
    .await
    .expect("criar tarefa");
    seed_task(&pool, &outro, "Tarefa de outro professor").await;

    // O dashboard só mostra as tarefas do próprio professor
    let minhas = task_service::list_tasks_do_professor(&pool, &prof)
        .await
        .expect("listar tarefas");
    assert_eq!(minhas.len(), 1);
    assert_eq!(minhas[0].title, "Trabalho de História");
    assert_eq!(minhas[0].num_temas, 0);
    assert_eq!(minhas[0].num_grupos, 0);

    // As listas JSON voltam como Vec<String>
    let tarefa = task_service::find_task_by_id(&pool, &minhas[0].id)
        .await
        .expect("buscar tarefa")
        .expect("tarefa existe");
    assert_eq!(tarefa.materials_list(), vec!["Manual da disciplina".to_string()]);
    assert_eq!(tarefa.todolist_list().len(), 2);
}

#[tokio::test]
async fn estudante_ve_todas_as_tarefas() {
    let pool = pool_teste().await;
    let prof_a = seed_professor(&pool, "a@escola.pt").await;
    let prof_b = seed_professor(&pool, "b@escola.pt").await;
    seed_task(&pool, &prof_a, "Tarefa A").await;
    seed_task(&pool, &prof_b, "Tarefa B").await;

    // A listagem do estudante não filtra por dono
    let todas = task_service::list_tasks_todas(&pool).await.expect("listar todas");
    assert_eq!(todas.len(), 2);
}

#[tokio::test]
async fn atualizar_tarefa_sobrescreve_campos() {
    let pool = pool_teste().await;
    let prof = seed_professor(&pool, "prof@escola.pt").await;
    let task_id = seed_task(&pool, &prof, "Título antigo").await;

    task_service::update_task(
        &pool,
        &task_id,
        &prof,
        "Título novo",
        "Nova descrição",
        "2027-01-15",
        "Novas instruções",
        "Novos critérios",
        &["Slides da aula".to_string()],
        &[],
    )
    .await
    .expect("atualizar tarefa");

    let tarefa = task_service::find_task_by_id(&pool, &task_id)
        .await
        .expect("buscar tarefa")
        .expect("tarefa existe");
    assert_eq!(tarefa.title, "Título novo");
    assert_eq!(tarefa.due_date, "2027-01-15");
    assert_eq!(tarefa.materials_list(), vec!["Slides da aula".to_string()]);
    assert!(tarefa.todolist_list().is_empty());
}

#[tokio::test]
async fn atualizar_tarefa_de_outro_professor_falha() {
    let pool = pool_teste().await;
    let dono = seed_professor(&pool, "dono@escola.pt").await;
    let intruso = seed_professor(&pool, "intruso@escola.pt").await;
    let task_id = seed_task(&pool, &dono, "Tarefa do dono").await;

    let res = task_service::update_task(
        &pool, &task_id, &intruso, "Alterada", "", "2027-01-01", "", "", &[], &[],
    )
    .await;
    assert!(matches!(res, Err(AppError::NotFound)));

    let res = task_service::delete_task(&pool, &task_id, &intruso).await;
    assert!(matches!(res, Err(AppError::NotFound)));

    // A tarefa continua intacta para o dono
    let tarefa = task_service::find_task_do_professor(&pool, &task_id, &dono)
        .await
        .expect("buscar tarefa")
        .expect("tarefa existe");
    assert_eq!(tarefa.title, "Tarefa do dono");
}

#[tokio::test]
async fn apagar_tarefa_remove_temas_e_grupos() {
    let pool = pool_teste().await;
    let prof = seed_professor(&pool, "prof@escola.pt").await;
    let task_id = seed_task(&pool, &prof, "Tarefa completa").await;
    let theme_id = seed_theme(&pool, &task_id, "Tema X").await;
    group_service::register_group(&pool, &task_id, &theme_id, "Grupo 1", &["Rui".to_string()])
        .await
        .expect("registrar grupo");

    task_service::delete_task(&pool, &task_id, &prof).await.expect("apagar tarefa");

    // Cascata: temas e grupos caem junto com a tarefa
    assert!(task_service::find_task_by_id(&pool, &task_id)
        .await
        .expect("buscar tarefa")
        .is_none());
    assert!(theme_service::list_themes(&pool, &task_id)
        .await
        .expect("listar temas")
        .is_empty());
    assert!(group_service::list_groups(&pool, &task_id)
        .await
        .expect("listar grupos")
        .is_empty());
}
