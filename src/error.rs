// src/error.rs
use axum::{http::StatusCode, response::Html, response::IntoResponse};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Erro na base de dados: {0}")]
    SqlxError(#[from] sqlx::Error),

    #[error("Erro de migração da base de dados: {0}")]
    SqlxMigrateError(#[from] sqlx::migrate::MigrateError),

    #[error("Erro de variável de ambiente: {0}")]
    EnvVarError(#[from] std::env::VarError),

    // As colunas materials/todolist/members guardam listas em JSON
    #[error("Erro ao serializar lista: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Erro ao processar password")]
    PasswordHashingError,

    #[error("Credenciais inválidas")]
    InvalidCredentials,

    #[error("E-mail já registrado")]
    EmailAlreadyRegistered,

    #[error("Registro não encontrado")]
    NotFound,

    // O tema perdeu a disponibilidade entre o carregamento da página e o
    // envio do formulário (outro grupo chegou primeiro).
    #[error("Tema indisponível")]
    ThemeUnavailable,

    #[error("Tema com grupo registrado")]
    ThemeHasGroup,

    #[error("Título de tema duplicado")]
    ThemeTitleTaken,

    #[error("Erro na sessão: {0}")]
    SessionError(String),

    #[error("Não autorizado")]
    Unauthorized,

    #[error("Erro interno inesperado")]
    InternalServerError,
}

// Como converter AppError numa resposta HTTP
impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        // Loga o erro detalhado no servidor
        tracing::error!("Erro processado: {:?}", self);

        let (status, user_message) = match self {
            AppError::SqlxError(_) | AppError::SqlxMigrateError(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Erro ao aceder aos dados.")
            }
            AppError::EnvVarError(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Erro de configuração.")
            }
            AppError::JsonError(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Erro ao processar os dados enviados.")
            }
            AppError::PasswordHashingError => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Erro ao processar credenciais.")
            }
            // Mensagem genérica de propósito (não revela se o e-mail existe)
            AppError::InvalidCredentials => {
                (StatusCode::UNAUTHORIZED, "E-mail ou senha inválidos.")
            }
            AppError::EmailAlreadyRegistered => {
                (StatusCode::CONFLICT, "Este e-mail já está em uso.")
            }
            AppError::NotFound => (StatusCode::NOT_FOUND, "Registro não encontrado."),
            AppError::ThemeUnavailable => {
                (StatusCode::CONFLICT, "Este tema já foi escolhido por outro grupo.")
            }
            AppError::ThemeHasGroup => {
                (StatusCode::CONFLICT, "Este tema já tem um grupo registrado.")
            }
            AppError::ThemeTitleTaken => {
                (StatusCode::CONFLICT, "Já existe um tema com este título.")
            }
            AppError::SessionError(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Erro na gestão da sua sessão.")
            }
            AppError::Unauthorized => {
                (StatusCode::FORBIDDEN, "Não tem permissão para aceder a esta página.")
            }
            AppError::InternalServerError => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Ocorreu um erro inesperado.")
            }
        };

        // Página HTML simples; as falhas esperadas de formulário nunca chegam
        // aqui (voltam para a própria página com a mensagem).
        (
            status,
            Html(format!(
                r#"
            <!DOCTYPE html><html><head><title>Erro</title><style>body{{font-family:sans-serif;}}</style></head>
            <body><h1>Erro {status_code}</h1><p>{message}</p><a href="javascript:history.back()">Voltar</a></body></html>
         "#,
                status_code = status.as_u16(),
                message = user_message
            )),
        )
            .into_response()
    }
}

// Tipo Result padrão para a aplicação
pub type AppResult<T = ()> = Result<T, AppError>;
