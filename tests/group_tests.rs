// tests/group_tests.rs
//
// Temas e registro de grupos, incluindo a disputa pelo mesmo tema.

mod common;

use common::{pool_teste, seed_professor, seed_task, seed_theme};
use gestor_tarefas::error::AppError;
use gestor_tarefas::services::{group_service, theme_service};

#[tokio::test]
async fn criar_tema_e_recusar_titulo_duplicado() {
    let pool = pool_teste().await;
    let prof = seed_professor(&pool, "prof@escola.pt").await;
    let task_id = seed_task(&pool, &prof, "Tarefa").await;

    seed_theme(&pool, &task_id, "Energia solar").await;

    let repetido =
        theme_service::create_theme(&pool, &task_id, "Energia solar", "Outra descrição").await;
    assert!(matches!(repetido, Err(AppError::ThemeTitleTaken)));

    // O mesmo título numa OUTRA tarefa é permitido
    let outra_task = seed_task(&pool, &prof, "Outra tarefa").await;
    theme_service::create_theme(&pool, &outra_task, "Energia solar", "")
        .await
        .expect("tema em outra tarefa");
}

#[tokio::test]
async fn registrar_grupo_marca_tema_indisponivel() {
    let pool = pool_teste().await;
    let prof = seed_professor(&pool, "prof@escola.pt").await;
    let task_id = seed_task(&pool, &prof, "Tarefa").await;
    let theme_id = seed_theme(&pool, &task_id, "Energia eólica").await;

    let membros = vec!["Ana".to_string(), "Bruno".to_string()];
    group_service::register_group(&pool, &task_id, &theme_id, "Grupo Verde", &membros)
        .await
        .expect("registrar grupo");

    // O tema deixa de estar disponível
    let temas = theme_service::list_themes(&pool, &task_id).await.expect("listar temas");
    assert_eq!(temas.len(), 1);
    assert!(!temas[0].available);

    // E o grupo aparece com o título do tema e os membros
    let grupos = group_service::list_groups(&pool, &task_id).await.expect("listar grupos");
    assert_eq!(grupos.len(), 1);
    assert_eq!(grupos[0].name, "Grupo Verde");
    assert_eq!(grupos[0].theme_title, "Energia eólica");
    assert_eq!(grupos[0].members_list(), membros);
}

#[tokio::test]
async fn segundo_grupo_no_mesmo_tema_e_rejeitado() {
    let pool = pool_teste().await;
    let prof = seed_professor(&pool, "prof@escola.pt").await;
    let task_id = seed_task(&pool, &prof, "Tarefa").await;
    let theme_id = seed_theme(&pool, &task_id, "Tema único").await;

    group_service::register_group(&pool, &task_id, &theme_id, "Primeiro", &["Ana".to_string()])
        .await
        .expect("primeiro grupo");

    let segundo =
        group_service::register_group(&pool, &task_id, &theme_id, "Segundo", &["Rui".to_string()])
            .await;
    assert!(matches!(segundo, Err(AppError::ThemeUnavailable)));

    // Só o primeiro ficou registrado
    let grupos = group_service::list_groups(&pool, &task_id).await.expect("listar grupos");
    assert_eq!(grupos.len(), 1);
    assert_eq!(grupos[0].name, "Primeiro");
}

#[tokio::test]
async fn corrida_pelo_mesmo_tema_tem_um_so_vencedor() {
    let pool = pool_teste().await;
    let prof = seed_professor(&pool, "prof@escola.pt").await;
    let task_id = seed_task(&pool, &prof, "Tarefa disputada").await;
    let theme_id = seed_theme(&pool, &task_id, "Tema disputado").await;

    // Duas submissões simultâneas para o mesmo tema. Os membros ficam em
    // locals porque o join! move as futures para bindings internos.
    let membros_a = ["Ana".to_string()];
    let membros_b = ["Rui".to_string()];
    let (a, b) = tokio::join!(
        group_service::register_group(&pool, &task_id, &theme_id, "Grupo A", &membros_a),
        group_service::register_group(&pool, &task_id, &theme_id, "Grupo B", &membros_b),
    );

    // Exatamente um vence; o outro recebe ThemeUnavailable
    let sucessos = [a.is_ok(), b.is_ok()].iter().filter(|ok| **ok).count();
    assert_eq!(sucessos, 1);
    let derrotado = if a.is_ok() { b } else { a };
    assert!(matches!(derrotado, Err(AppError::ThemeUnavailable)));

    let grupos = group_service::list_groups(&pool, &task_id).await.expect("listar grupos");
    assert_eq!(grupos.len(), 1);

    let temas = theme_service::list_themes(&pool, &task_id).await.expect("listar temas");
    assert!(!temas[0].available);
}

#[tokio::test]
async fn tema_inexistente_da_not_found() {
    let pool = pool_teste().await;
    let prof = seed_professor(&pool, "prof@escola.pt").await;
    let task_id = seed_task(&pool, &prof, "Tarefa").await;

    let res = group_service::register_group(
        &pool,
        &task_id,
        "tema-que-nao-existe",
        "Grupo",
        &["Ana".to_string()],
    )
    .await;
    assert!(matches!(res, Err(AppError::NotFound)));
}

#[tokio::test]
async fn tema_de_outra_tarefa_nao_pode_ser_reivindicado() {
    let pool = pool_teste().await;
    let prof = seed_professor(&pool, "prof@escola.pt").await;
    let task_a = seed_task(&pool, &prof, "Tarefa A").await;
    let task_b = seed_task(&pool, &prof, "Tarefa B").await;
    let theme_em_a = seed_theme(&pool, &task_a, "Tema de A").await;

    // O tema existe, mas pertence à outra tarefa
    let res =
        group_service::register_group(&pool, &task_b, &theme_em_a, "Grupo", &["Ana".to_string()])
            .await;
    assert!(matches!(res, Err(AppError::NotFound)));

    // E continua disponível na tarefa certa
    let temas = theme_service::list_themes(&pool, &task_a).await.expect("listar temas");
    assert!(temas[0].available);
}

#[tokio::test]
async fn apagar_tema_com_grupo_e_recusado() {
    let pool = pool_teste().await;
    let prof = seed_professor(&pool, "prof@escola.pt").await;
    let task_id = seed_task(&pool, &prof, "Tarefa").await;
    let theme_id = seed_theme(&pool, &task_id, "Tema escolhido").await;
    group_service::register_group(&pool, &task_id, &theme_id, "Grupo", &["Ana".to_string()])
        .await
        .expect("registrar grupo");

    let res = theme_service::delete_theme(&pool, &task_id, &theme_id).await;
    assert!(matches!(res, Err(AppError::ThemeHasGroup)));

    // O tema continua lá
    let temas = theme_service::list_themes(&pool, &task_id).await.expect("listar temas");
    assert_eq!(temas.len(), 1);
}

#[tokio::test]
async fn apagar_tema_de_outra_tarefa_da_not_found() {
    let pool = pool_teste().await;
    let prof = seed_professor(&pool, "prof@escola.pt").await;
    let task_a = seed_task(&pool, &prof, "Tarefa A").await;
    let task_b = seed_task(&pool, &prof, "Tarefa B").await;
    let theme_em_b = seed_theme(&pool, &task_b, "Tema de B").await;

    // Mesmo com grupo no tema, pedir a remoção pela tarefa errada é NotFound
    group_service::register_group(&pool, &task_b, &theme_em_b, "Grupo", &["Ana".to_string()])
        .await
        .expect("registrar grupo");

    let res = theme_service::delete_theme(&pool, &task_a, &theme_em_b).await;
    assert!(matches!(res, Err(AppError::NotFound)));

    // O tema da outra tarefa continua lá
    let temas = theme_service::list_themes(&pool, &task_b).await.expect("listar temas");
    assert_eq!(temas.len(), 1);
}

#[tokio::test]
async fn apagar_tema_livre_funciona() {
    let pool = pool_teste().await;
    let prof = seed_professor(&pool, "prof@escola.pt").await;
    let task_id = seed_task(&pool, &prof, "Tarefa").await;
    let theme_id = seed_theme(&pool, &task_id, "Tema livre").await;

    theme_service::delete_theme(&pool, &task_id, &theme_id)
        .await
        .expect("apagar tema livre");

    assert!(theme_service::list_themes(&pool, &task_id)
        .await
        .expect("listar temas")
        .is_empty());

    // Apagar de novo dá NotFound
    let res = theme_service::delete_theme(&pool, &task_id, &theme_id).await;
    assert!(matches!(res, Err(AppError::NotFound)));
}
