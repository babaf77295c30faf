// src/models/task.rs
use chrono::NaiveDateTime;
use sqlx::FromRow;

// --- Estruturas que espelham as Tabelas da DB ---

// Tarefa como está na tabela 'tasks'. As colunas materials/todolist são
// listas de strings guardadas em JSON (ver parse abaixo).
#[derive(Debug, Clone, FromRow)]
pub struct Task {
    pub id: String, // UUID
    pub owner_id: String,
    pub title: String,
    pub description: String,
    pub due_date: String, // YYYY-MM-DD
    pub instructions: String,
    pub criteria: String,
    pub materials: String,
    pub todolist: String,
    pub updated_at: Option<NaiveDateTime>,
    pub created_at: Option<NaiveDateTime>,
}

impl Task {
    pub fn materials_list(&self) -> Vec<String> {
        parse_lista_json(&self.materials)
    }

    pub fn todolist_list(&self) -> Vec<String> {
        parse_lista_json(&self.todolist)
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct Theme {
    pub id: String, // UUID
    pub task_id: String,
    pub title: String,
    pub description: String,
    pub available: bool,
}

// --- Estruturas Auxiliares para Queries ---

/// Linha do dashboard: tarefa com contagem de temas e grupos.
/// Não usamos o model `Task` completo para não arrastar os campos longos.
#[derive(Debug, Clone, FromRow)]
pub struct TaskResumo {
    pub id: String,
    pub title: String,
    pub due_date: String,
    pub num_temas: i64,
    pub num_grupos: i64,
}

/// Grupo com o título do tema já resolvido (JOIN com 'themes'),
/// para exibição na página do estudante.
#[derive(Debug, Clone, FromRow)]
pub struct GroupComTema {
    pub id: String,
    pub name: String,
    pub members: String,
    pub theme_title: String,
}

impl GroupComTema {
    pub fn members_list(&self) -> Vec<String> {
        parse_lista_json(&self.members)
    }
}

// Leitura tolerante: uma coluna JSON corrompida vira lista vazia em vez de
// derrubar a página (a escrita valida sempre via serde_json).
fn parse_lista_json(raw: &str) -> Vec<String> {
    serde_json::from_str(raw).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_lista_json_aceita_lista_valida() {
        assert_eq!(
            parse_lista_json(r#"["Livro do curso","Artigo X"]"#),
            vec!["Livro do curso".to_string(), "Artigo X".to_string()]
        );
    }

    #[test]
    fn parse_lista_json_degrada_para_vazio() {
        assert!(parse_lista_json("").is_empty());
        assert!(parse_lista_json("não é json").is_empty());
        assert!(parse_lista_json("{}").is_empty());
    }
}
