// src/web/professor_handlers.rs
use crate::{
    error::{AppError, AppResult},
    services::{task_service, theme_service, user_service},
    state::AppState,
    templates::{EditThemesPage, ProfessorPage, TaskDetailPage, TaskView},
    web::{linhas_para_lista, mw_auth::UserId},
};
use askama::Template;
use axum::{
    extract::{Extension, Form, Path, Query, State},
    response::{Html, IntoResponse, Redirect},
};
use chrono::NaiveDate;
use serde::Deserialize;
use urlencoding;

// --- Structs para os Formulários ---

#[derive(Deserialize, Debug)]
pub struct TaskForm {
    title: String,
    description: String,
    due_date: String,
    instructions: String,
    criteria: String,
    // Textareas "um item por linha"
    #[serde(default)]
    materials: String,
    #[serde(default)]
    todolist: String,
}

#[derive(Deserialize, Debug)]
pub struct ThemeForm {
    title: String,
    #[serde(default)]
    description: String,
}

#[derive(Deserialize, Debug)]
pub struct FeedbackParams {
    success: Option<String>,
    error: Option<String>,
}

// Validação partilhada entre criar e editar tarefa
fn valida_task_form(form: &TaskForm) -> Option<&'static str> {
    if form.title.trim().is_empty() {
        return Some("O título da tarefa é obrigatório.");
    }
    if NaiveDate::parse_from_str(form.due_date.trim(), "%Y-%m-%d").is_err() {
        return Some("Data de entrega inválida (use AAAA-MM-DD).");
    }
    None
}

// --- Handlers ---

/// Handler para GET /professor - Dashboard do professor
pub async fn show_dashboard(
    State(state): State<AppState>,
    Extension(user_id_ext): Extension<UserId>,
    Query(params): Query<FeedbackParams>,
) -> AppResult<impl IntoResponse> {
    let user_id = user_id_ext.0;
    tracing::debug!("GET /professor: Carregando dashboard para {}", user_id);

    // Busca o e-mail para o cabeçalho da página
    let user = user_service::find_user_by_id(&state.db_pool, &user_id)
        .await?
        .ok_or_else(|| {
            tracing::error!("CRÍTICO: user_id '{}' autenticado não encontrado na DB!", user_id);
            AppError::InternalServerError
        })?;

    // Lista as tarefas deste professor (com contagens de temas/grupos)
    let tarefas = task_service::list_tasks_do_professor(&state.db_pool, &user_id).await?;

    let template = ProfessorPage {
        user_email: user.email,
        tarefas,
        success_message: params.success, // Vem da query string (?success=...)
        error_message: params.error,     // Vem da query string (?error=...)
    };

    match template.render() {
        Ok(html) => Ok(Html(html).into_response()),
        Err(e) => {
            tracing::error!("Falha ao renderizar template ProfessorPage: {}", e);
            Err(AppError::InternalServerError)
        }
    }
}

/// Handler para POST /professor/tasks - Cria uma tarefa nova
pub async fn handle_create_task(
    State(state): State<AppState>,
    Extension(user_id_ext): Extension<UserId>,
    Form(form): Form<TaskForm>,
) -> AppResult<Redirect> {
    let user_id = user_id_ext.0;
    tracing::info!("POST /professor/tasks: Criando tarefa '{}'", form.title);

    // Validações básicas
    if let Some(msg) = valida_task_form(&form) {
        tracing::warn!("Criação de tarefa falhou: {}", msg);
        let error_msg = urlencoding::encode(msg);
        let redirect_url = format!("/professor?error={}", error_msg);
        // Retorna Ok(Redirect) mesmo em caso de erro (padrão Post/Redirect/Get)
        return Ok(Redirect::to(&redirect_url));
    }

    let materials = linhas_para_lista(&form.materials);
    let todolist = linhas_para_lista(&form.todolist);

    match task_service::create_task(
        &state.db_pool,
        &user_id,
        form.title.trim(),
        form.description.trim(),
        form.due_date.trim(),
        form.instructions.trim(),
        form.criteria.trim(),
        &materials,
        &todolist,
    )
    .await
    {
        Ok(_) => {
            let success_msg =
                urlencoding::encode(&format!("Tarefa '{}' criada com sucesso.", form.title.trim()))
                    .to_string();
            let redirect_url = format!("/professor?success={}", success_msg);
            Ok(Redirect::to(&redirect_url))
        }
        Err(e) => {
            tracing::error!("Erro ao criar tarefa '{}': {:?}", form.title, e);
            let error_msg = urlencoding::encode("Erro ao criar a tarefa na base de dados.");
            let redirect_url = format!("/professor?error={}", error_msg);
            Ok(Redirect::to(&redirect_url))
        }
    }
}

/// Handler para GET /task/{id} - Detalhe da tarefa (visão do professor, com edição)
pub async fn show_task_detail(
    State(state): State<AppState>,
    Extension(user_id_ext): Extension<UserId>,
    Path(task_id): Path<String>,
    Query(params): Query<FeedbackParams>,
) -> AppResult<impl IntoResponse> {
    let user_id = user_id_ext.0;
    tracing::debug!("GET /task/{}: Acesso do professor {}", task_id, user_id);

    // Só o professor dono vê esta página; para os restantes é 404
    let tarefa = task_service::find_task_do_professor(&state.db_pool, &task_id, &user_id)
        .await?
        .ok_or(AppError::NotFound)?;

    let template = TaskDetailPage {
        tarefa: TaskView::from(tarefa),
        success_message: params.success,
        error_message: params.error,
    };

    match template.render() {
        Ok(html) => Ok(Html(html).into_response()),
        Err(e) => {
            tracing::error!("Falha ao renderizar template TaskDetailPage: {}", e);
            Err(AppError::InternalServerError)
        }
    }
}

/// Handler para POST /task/{id} - Atualiza a tarefa (sobrescrita completa)
pub async fn handle_update_task(
    State(state): State<AppState>,
    Extension(user_id_ext): Extension<UserId>,
    Path(task_id): Path<String>,
    Form(form): Form<TaskForm>,
) -> AppResult<Redirect> {
    let user_id = user_id_ext.0;
    tracing::info!("POST /task/{}: Processando edição...", task_id);

    if let Some(msg) = valida_task_form(&form) {
        tracing::warn!("Edição da tarefa {} falhou: {}", task_id, msg);
        let error_msg = urlencoding::encode(msg);
        // Redireciona DE VOLTA para a página de detalhe com erro
        let redirect_url = format!("/task/{}?error={}", task_id, error_msg);
        return Ok(Redirect::to(&redirect_url));
    }

    let materials = linhas_para_lista(&form.materials);
    let todolist = linhas_para_lista(&form.todolist);

    match task_service::update_task(
        &state.db_pool,
        &task_id,
        &user_id,
        form.title.trim(),
        form.description.trim(),
        form.due_date.trim(),
        form.instructions.trim(),
        form.criteria.trim(),
        &materials,
        &todolist,
    )
    .await
    {
        Ok(_) => {
            let success_msg = urlencoding::encode("Tarefa atualizada com sucesso.");
            let redirect_url = format!("/task/{}?success={}", task_id, success_msg);
            Ok(Redirect::to(&redirect_url))
        }
        // Tarefa de outro professor (ou inexistente): a página de detalhe
        // também daria 404, por isso propaga em vez de redirecionar
        Err(AppError::NotFound) => Err(AppError::NotFound),
        Err(e) => {
            tracing::error!("Erro ao atualizar tarefa {}: {:?}", task_id, e);
            let error_msg = urlencoding::encode("Erro ao atualizar a tarefa na base de dados.");
            let redirect_url = format!("/task/{}?error={}", task_id, error_msg);
            Ok(Redirect::to(&redirect_url))
        }
    }
}

/// Handler para POST /task/{id}/delete - Apaga a tarefa (e temas/grupos em cascata)
pub async fn handle_delete_task(
    State(state): State<AppState>,
    Extension(user_id_ext): Extension<UserId>,
    Path(task_id): Path<String>,
) -> AppResult<Redirect> {
    let user_id = user_id_ext.0;
    tracing::info!("POST /task/{}/delete: Apagando tarefa...", task_id);

    match task_service::delete_task(&state.db_pool, &task_id, &user_id).await {
        Ok(_) => {
            let success_msg = urlencoding::encode("Tarefa apagada com sucesso.");
            let redirect_url = format!("/professor?success={}", success_msg);
            Ok(Redirect::to(&redirect_url))
        }
        Err(AppError::NotFound) => Err(AppError::NotFound),
        Err(e) => {
            tracing::error!("Erro ao apagar tarefa {}: {:?}", task_id, e);
            let error_msg = urlencoding::encode("Erro ao apagar a tarefa na base de dados.");
            let redirect_url = format!("/professor?error={}", error_msg);
            Ok(Redirect::to(&redirect_url))
        }
    }
}

/// Handler para GET /task/{id}/edit-themes - Gestão dos temas da tarefa
pub async fn show_edit_themes(
    State(state): State<AppState>,
    Extension(user_id_ext): Extension<UserId>,
    Path(task_id): Path<String>,
    Query(params): Query<FeedbackParams>,
) -> AppResult<impl IntoResponse> {
    let user_id = user_id_ext.0;
    tracing::debug!("GET /task/{}/edit-themes: Acesso do professor {}", task_id, user_id);

    let tarefa = task_service::find_task_do_professor(&state.db_pool, &task_id, &user_id)
        .await?
        .ok_or(AppError::NotFound)?;

    let temas = theme_service::list_themes(&state.db_pool, &task_id).await?;

    let template = EditThemesPage {
        task_id: tarefa.id,
        task_title: tarefa.title,
        temas,
        success_message: params.success,
        error_message: params.error,
    };

    match template.render() {
        Ok(html) => Ok(Html(html).into_response()),
        Err(e) => {
            tracing::error!("Falha ao renderizar template EditThemesPage: {}", e);
            Err(AppError::InternalServerError)
        }
    }
}

/// Handler para POST /task/{id}/themes - Cria um tema na tarefa
pub async fn handle_create_theme(
    State(state): State<AppState>,
    Extension(user_id_ext): Extension<UserId>,
    Path(task_id): Path<String>,
    Form(form): Form<ThemeForm>,
) -> AppResult<Redirect> {
    let user_id = user_id_ext.0;
    tracing::info!("POST /task/{}/themes: Criando tema '{}'", task_id, form.title);

    // 1. Confirma que a tarefa pertence a este professor
    task_service::find_task_do_professor(&state.db_pool, &task_id, &user_id)
        .await?
        .ok_or(AppError::NotFound)?;

    // 2. Validação básica
    if form.title.trim().is_empty() {
        let error_msg = urlencoding::encode("O título do tema é obrigatório.");
        let redirect_url = format!("/task/{}/edit-themes?error={}", task_id, error_msg);
        return Ok(Redirect::to(&redirect_url));
    }

    // 3. Cria o tema
    match theme_service::create_theme(
        &state.db_pool,
        &task_id,
        form.title.trim(),
        form.description.trim(),
    )
    .await
    {
        Ok(_) => {
            let success_msg =
                urlencoding::encode(&format!("Tema '{}' criado com sucesso.", form.title.trim()))
                    .to_string();
            let redirect_url = format!("/task/{}/edit-themes?success={}", task_id, success_msg);
            Ok(Redirect::to(&redirect_url))
        }
        Err(AppError::ThemeTitleTaken) => {
            let error_msg = urlencoding::encode("Já existe um tema com este título.");
            let redirect_url = format!("/task/{}/edit-themes?error={}", task_id, error_msg);
            Ok(Redirect::to(&redirect_url))
        }
        Err(e) => {
            tracing::error!("Erro ao criar tema na tarefa {}: {:?}", task_id, e);
            let error_msg = urlencoding::encode("Erro ao criar o tema na base de dados.");
            let redirect_url = format!("/task/{}/edit-themes?error={}", task_id, error_msg);
            Ok(Redirect::to(&redirect_url))
        }
    }
}

/// Handler para POST /task/{id}/themes/{theme_id}/delete - Remove um tema
pub async fn handle_delete_theme(
    State(state): State<AppState>,
    Extension(user_id_ext): Extension<UserId>,
    Path((task_id, theme_id)): Path<(String, String)>,
) -> AppResult<Redirect> {
    let user_id = user_id_ext.0;
    tracing::info!("POST /task/{}/themes/{}/delete: Removendo tema...", task_id, theme_id);

    // Confirma a posse da tarefa antes de mexer nos temas
    task_service::find_task_do_professor(&state.db_pool, &task_id, &user_id)
        .await?
        .ok_or(AppError::NotFound)?;

    match theme_service::delete_theme(&state.db_pool, &task_id, &theme_id).await {
        Ok(_) => {
            let success_msg = urlencoding::encode("Tema removido com sucesso.");
            let redirect_url = format!("/task/{}/edit-themes?success={}", task_id, success_msg);
            Ok(Redirect::to(&redirect_url))
        }
        Err(AppError::ThemeHasGroup) => {
            let error_msg = urlencoding::encode("Este tema já tem um grupo registrado.");
            let redirect_url = format!("/task/{}/edit-themes?error={}", task_id, error_msg);
            Ok(Redirect::to(&redirect_url))
        }
        Err(AppError::NotFound) => {
            let error_msg = urlencoding::encode("Tema não encontrado.");
            let redirect_url = format!("/task/{}/edit-themes?error={}", task_id, error_msg);
            Ok(Redirect::to(&redirect_url))
        }
        Err(e) => {
            tracing::error!("Erro ao remover tema {} da tarefa {}: {:?}", theme_id, task_id, e);
            let error_msg = urlencoding::encode("Erro ao remover o tema na base de dados.");
            let redirect_url = format!("/task/{}/edit-themes?error={}", task_id, error_msg);
            Ok(Redirect::to(&redirect_url))
        }
    }
}
