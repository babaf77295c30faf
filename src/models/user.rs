// src/models/user.rs
use chrono::NaiveDateTime;
use serde::Deserialize;
use sqlx::FromRow;

// Os dois tipos de conta que o registo aceita
pub const TIPO_PROFESSOR: &str = "professor";
pub const TIPO_ESTUDANTE: &str = "estudante";

// Representa um utilizador lido da tabela 'users'
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: String,
    pub email: String,
    pub password_hash: String,
    pub user_type: String, // "professor" ou "estudante"
    pub updated_at: Option<NaiveDateTime>,
    pub created_at: Option<NaiveDateTime>,
}

impl User {
    pub fn is_professor(&self) -> bool {
        self.user_type == TIPO_PROFESSOR
    }

    /// Dashboard para onde o utilizador vai depois do login.
    pub fn pagina_inicial(&self) -> &'static str {
        if self.is_professor() {
            "/professor"
        } else {
            "/estudante"
        }
    }
}

// Struct para dados do formulário de login
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

// Struct para dados do formulário de registo
#[derive(Debug, Deserialize)]
pub struct RegisterForm {
    pub email: String,
    pub password: String,
    pub tipo: String, // select com "professor" / "estudante"
}
