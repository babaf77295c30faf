// src/web/auth_handlers.rs
use crate::{
    error::{AppError, AppResult},
    models::user::{LoginForm, RegisterForm, TIPO_ESTUDANTE, TIPO_PROFESSOR},
    services::{auth_service, user_service},
    state::AppState,
    templates::{LoginPage, RegisterPage},
};
use askama::Template;
use axum::{
    extract::{Form, State},
    response::{Html, IntoResponse, Redirect},
};
use tower_sessions::Session;

// GET /login (verifica sessão e renderiza explicitamente)
pub async fn show_login_form(
    State(state): State<AppState>,
    session: Session,
) -> impl IntoResponse {
    // Verifica se já existe um 'user_id' na sessão
    if let Some(user_id) = session.get::<String>("user_id").await.ok().flatten() {
        // Já está logado: manda para o dashboard do tipo certo
        if let Ok(Some(user)) = user_service::find_user_by_id(&state.db_pool, &user_id).await {
            tracing::debug!(
                "GET /login: Utilizador já logado, redirecionando para {}",
                user.pagina_inicial()
            );
            return Redirect::to(user.pagina_inicial()).into_response();
        }
    }

    // Se não está logado, renderiza a página de login
    let template = LoginPage { error: None };
    match template.render() {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            tracing::error!("Falha ao renderizar template de login: {}", e);
            (
                axum::http::StatusCode::INTERNAL_SERVER_ERROR,
                "Erro ao carregar a página.",
            )
                .into_response()
        }
    }
}

// POST /login (processamento do formulário)
pub async fn handle_login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> AppResult<impl IntoResponse> {
    tracing::info!("Tentativa de login para: {}", form.email);

    match auth_service::authenticate(&state.db_pool, &form.email, &form.password).await {
        Ok(user) => {
            // 1. Autentica a sessão
            session.cycle_id().await // Gera novo ID de sessão (segurança)
                .map_err(|e| AppError::SessionError(format!("Falha ao rodar ID: {}", e)))?;
            session.insert("user_id", &user.id).await
                .map_err(|e| AppError::SessionError(format!("Falha ao inserir na sessão: {}", e)))?;

            tracing::info!("✅ Login bem-sucedido para: {}", user.email);
            // 2. Redireciona para o dashboard do tipo da conta
            Ok(Redirect::to(user.pagina_inicial()).into_response())
        }
        Err(AppError::InvalidCredentials) => {
            // E-mail desconhecido ou senha errada: mesma mensagem genérica
            tracing::warn!("Falha no login para: {}", form.email);
            let template = LoginPage {
                error: Some("E-mail ou senha inválidos.".to_string()),
            };
            match template.render() {
                Ok(html) => Ok(Html(html).into_response()),
                Err(e) => {
                    tracing::error!("Falha ao renderizar template de login com erro: {}", e);
                    Err(AppError::InternalServerError)
                }
            }
        }
        Err(e) => {
            // Erro de DB ou bcrypt
            tracing::error!("Erro ao autenticar {}: {:?}", form.email, e);
            Err(e)
        }
    }
}

// GET /register
pub async fn show_register_form(
    State(state): State<AppState>,
    session: Session,
) -> impl IntoResponse {
    if let Some(user_id) = session.get::<String>("user_id").await.ok().flatten() {
        if let Ok(Some(user)) = user_service::find_user_by_id(&state.db_pool, &user_id).await {
            tracing::debug!(
                "GET /register: Utilizador já logado, redirecionando para {}",
                user.pagina_inicial()
            );
            return Redirect::to(user.pagina_inicial()).into_response();
        }
    }

    let template = RegisterPage { error: None };
    match template.render() {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            tracing::error!("Falha ao renderizar template de registro: {}", e);
            (
                axum::http::StatusCode::INTERNAL_SERVER_ERROR,
                "Erro ao carregar a página.",
            )
                .into_response()
        }
    }
}

// POST /register (cria a conta e já autentica a sessão)
pub async fn handle_register(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<RegisterForm>,
) -> AppResult<impl IntoResponse> {
    let email = form.email.trim().to_lowercase();
    tracing::info!("Tentativa de registro para: {} (tipo: {})", email, form.tipo);

    // 1. Validações básicas
    let validation_error = if !email.contains('@') || !email.contains('.') {
        Some("E-mail inválido.")
    } else if form.password.len() < 6 {
        Some("A senha deve ter pelo menos 6 caracteres.")
    } else if form.tipo != TIPO_PROFESSOR && form.tipo != TIPO_ESTUDANTE {
        Some("Tipo de conta inválido.")
    } else {
        None
    };

    if let Some(msg) = validation_error {
        tracing::warn!("Registro falhou para {}: {}", email, msg);
        let template = RegisterPage {
            error: Some(msg.to_string()),
        };
        return match template.render() {
            Ok(html) => Ok(Html(html).into_response()),
            Err(e) => {
                tracing::error!("Falha ao renderizar template de registro com erro: {}", e);
                Err(AppError::InternalServerError)
            }
        };
    }

    // 2. Cria a conta
    match user_service::create_user(&state.db_pool, &email, &form.password, &form.tipo).await {
        Ok(user) => {
            // 3. Autentica a sessão já no registro
            session.cycle_id().await
                .map_err(|e| AppError::SessionError(format!("Falha ao rodar ID: {}", e)))?;
            session.insert("user_id", &user.id).await
                .map_err(|e| AppError::SessionError(format!("Falha ao inserir na sessão: {}", e)))?;

            tracing::info!("✅ Registro bem-sucedido para: {}", user.email);
            Ok(Redirect::to(user.pagina_inicial()).into_response())
        }
        Err(AppError::EmailAlreadyRegistered) => {
            tracing::warn!("Registro falhou: e-mail '{}' já em uso.", email);
            let template = RegisterPage {
                error: Some("Este e-mail já está em uso.".to_string()),
            };
            match template.render() {
                Ok(html) => Ok(Html(html).into_response()),
                Err(e) => {
                    tracing::error!("Falha ao renderizar template de registro com erro: {}", e);
                    Err(AppError::InternalServerError)
                }
            }
        }
        Err(e) => {
            tracing::error!("Erro no registro de {}: {:?}", email, e);
            Err(e)
        }
    }
}

// GET /logout
pub async fn handle_logout(session: Session) -> AppResult<Redirect> {
    let user_id: Option<String> = session.get("user_id").await.ok().flatten();

    // Apaga todos os dados da sessão atual
    session.delete().await
        .map_err(|e| AppError::SessionError(format!("Falha ao apagar sessão: {}", e)))?;

    if let Some(id) = user_id {
        tracing::info!("🚪 Utilizador '{}' desligado.", id);
    } else {
        tracing::info!("🚪 Sessão anónima desligada.");
    }

    Ok(Redirect::to("/login"))
}
