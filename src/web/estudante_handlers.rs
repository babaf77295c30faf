// src/web/estudante_handlers.rs
use crate::{
    error::{AppError, AppResult},
    services::{group_service, task_service, theme_service, user_service},
    state::AppState,
    templates::{EstudantePage, StudentTaskPage, TaskView},
    web::{linhas_para_lista, mw_auth::UserId},
};
use askama::Template;
use axum::{
    extract::{Extension, Form, Path, Query, State},
    response::{Html, IntoResponse, Redirect},
};
use serde::Deserialize;
use urlencoding;

// --- Structs para os Formulários ---

#[derive(Deserialize, Debug)]
pub struct GroupForm {
    name: String,
    theme_id: String,
    // Textarea "um membro por linha"
    #[serde(default)]
    members: String,
}

#[derive(Deserialize, Debug)]
pub struct FeedbackParams {
    success: Option<String>,
    error: Option<String>,
}

// --- Handlers ---

/// Handler para GET /estudante - Dashboard do estudante (todas as tarefas)
pub async fn show_dashboard(
    State(state): State<AppState>,
    Extension(user_id_ext): Extension<UserId>,
    Query(params): Query<FeedbackParams>,
) -> AppResult<impl IntoResponse> {
    let user_id = user_id_ext.0;
    tracing::debug!("GET /estudante: Carregando dashboard para {}", user_id);

    let user = user_service::find_user_by_id(&state.db_pool, &user_id)
        .await?
        .ok_or_else(|| {
            tracing::error!("CRÍTICO: user_id '{}' autenticado não encontrado na DB!", user_id);
            AppError::InternalServerError
        })?;

    // Estudantes veem todas as tarefas publicadas
    let tarefas = task_service::list_tasks_todas(&state.db_pool).await?;

    let template = EstudantePage {
        user_email: user.email,
        tarefas,
        success_message: params.success,
        error_message: params.error,
    };

    match template.render() {
        Ok(html) => Ok(Html(html).into_response()),
        Err(e) => {
            tracing::error!("Falha ao renderizar template EstudantePage: {}", e);
            Err(AppError::InternalServerError)
        }
    }
}

/// Handler para GET /student/task/{id} - Detalhe da tarefa (visão do estudante)
pub async fn show_task(
    State(state): State<AppState>,
    Path(task_id): Path<String>,
    Query(params): Query<FeedbackParams>,
) -> AppResult<impl IntoResponse> {
    tracing::debug!("GET /student/task/{}: Carregando tarefa...", task_id);

    // Sem filtro de dono: qualquer estudante pode ver qualquer tarefa
    let tarefa = task_service::find_task_by_id(&state.db_pool, &task_id)
        .await?
        .ok_or(AppError::NotFound)?;

    let temas = theme_service::list_themes(&state.db_pool, &task_id).await?;
    let grupos = group_service::list_groups(&state.db_pool, &task_id).await?;

    let template = StudentTaskPage {
        tarefa: TaskView::from(tarefa),
        temas,
        grupos,
        success_message: params.success,
        error_message: params.error,
    };

    match template.render() {
        Ok(html) => Ok(Html(html).into_response()),
        Err(e) => {
            tracing::error!("Falha ao renderizar template StudentTaskPage: {}", e);
            Err(AppError::InternalServerError)
        }
    }
}

/// Handler para POST /student/task/{id}/groups - Registra um grupo num tema
pub async fn handle_register_group(
    State(state): State<AppState>,
    Path(task_id): Path<String>,
    Form(form): Form<GroupForm>,
) -> AppResult<Redirect> {
    tracing::info!(
        "POST /student/task/{}/groups: Registrando grupo '{}'",
        task_id,
        form.name
    );

    // A tarefa tem de existir; se sumiu, 404 direto
    task_service::find_task_by_id(&state.db_pool, &task_id)
        .await?
        .ok_or(AppError::NotFound)?;

    // Validações básicas
    let members = linhas_para_lista(&form.members);
    let validation_error = if form.name.trim().is_empty() {
        Some("O nome do grupo é obrigatório.")
    } else if form.theme_id.trim().is_empty() {
        Some("Escolha um tema para o grupo.")
    } else if members.is_empty() {
        Some("Indique pelo menos um membro do grupo.")
    } else {
        None
    };

    if let Some(msg) = validation_error {
        tracing::warn!("Registro de grupo falhou: {}", msg);
        let error_msg = urlencoding::encode(msg);
        let redirect_url = format!("/student/task/{}?error={}", task_id, error_msg);
        return Ok(Redirect::to(&redirect_url));
    }

    match group_service::register_group(
        &state.db_pool,
        &task_id,
        form.theme_id.trim(),
        form.name.trim(),
        &members,
    )
    .await
    {
        Ok(_) => {
            let success_msg = urlencoding::encode(&format!(
                "Grupo '{}' registrado com sucesso!",
                form.name.trim()
            ))
            .to_string();
            let redirect_url = format!("/student/task/{}?success={}", task_id, success_msg);
            Ok(Redirect::to(&redirect_url))
        }
        Err(AppError::ThemeUnavailable) => {
            // Outro grupo submeteu o mesmo tema primeiro
            let error_msg = urlencoding::encode("Este tema já foi escolhido por outro grupo.");
            let redirect_url = format!("/student/task/{}?error={}", task_id, error_msg);
            Ok(Redirect::to(&redirect_url))
        }
        Err(AppError::NotFound) => {
            // A tarefa existe, logo foi o tema que sumiu entretanto
            let error_msg = urlencoding::encode("Tema não encontrado.");
            let redirect_url = format!("/student/task/{}?error={}", task_id, error_msg);
            Ok(Redirect::to(&redirect_url))
        }
        Err(e) => {
            tracing::error!("Erro ao registrar grupo na tarefa {}: {:?}", task_id, e);
            let error_msg = urlencoding::encode("Erro ao registrar o grupo na base de dados.");
            let redirect_url = format!("/student/task/{}?error={}", task_id, error_msg);
            Ok(Redirect::to(&redirect_url))
        }
    }
}
