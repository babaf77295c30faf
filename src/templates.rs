// src/templates.rs
use crate::models::task::{GroupComTema, Task, TaskResumo, Theme};
use askama::Template; // Trait necessário para Askama

// Struct para o template `login.html` (ficheiro externo em templates/)
#[derive(Template)]
#[template(path = "login.html")]
pub struct LoginPage {
    // Campo opcional para passar uma mensagem de erro para o template
    pub error: Option<String>,
}

#[derive(Template)]
#[template(path = "register.html")]
pub struct RegisterPage {
    pub error: Option<String>,
}

#[derive(Template)]
#[template(path = "professor.html")]
pub struct ProfessorPage {
    pub user_email: String,
    // Tarefas do professor com contagens de temas/grupos
    pub tarefas: Vec<TaskResumo>,
    // Mensagens de feedback opcionais (vindas da query string)
    pub success_message: Option<String>,
    pub error_message: Option<String>,
}

#[derive(Template)]
#[template(path = "estudante.html")]
pub struct EstudantePage {
    pub user_email: String,
    pub tarefas: Vec<TaskResumo>,
    pub success_message: Option<String>,
    pub error_message: Option<String>,
}

// Struct wrapper para os templates de detalhe: a Task da DB guarda as
// listas como JSON, aqui já chegam como Vec<String> prontas a iterar
#[derive(Clone, Debug)]
pub struct TaskView {
    pub id: String,
    pub title: String,
    pub description: String,
    pub due_date: String,
    pub instructions: String,
    pub criteria: String,
    pub materials: Vec<String>,
    pub todolist: Vec<String>,
}

impl From<Task> for TaskView {
    fn from(t: Task) -> Self {
        let materials = t.materials_list();
        let todolist = t.todolist_list();
        TaskView {
            id: t.id,
            title: t.title,
            description: t.description,
            due_date: t.due_date,
            instructions: t.instructions,
            criteria: t.criteria,
            materials,
            todolist,
        }
    }
}

impl TaskView {
    /// Conteúdo dos textareas de edição (um item por linha)
    pub fn materials_texto(&self) -> String {
        self.materials.join("\n")
    }

    pub fn todolist_texto(&self) -> String {
        self.todolist.join("\n")
    }
}

#[derive(Template)]
#[template(path = "task_detail.html")]
pub struct TaskDetailPage {
    pub tarefa: TaskView,
    pub success_message: Option<String>,
    pub error_message: Option<String>,
}

#[derive(Template)]
#[template(path = "edit_themes.html")]
pub struct EditThemesPage {
    pub task_id: String,
    pub task_title: String,
    pub temas: Vec<Theme>,
    pub success_message: Option<String>,
    pub error_message: Option<String>,
}

#[derive(Template)]
#[template(path = "student_task.html")]
pub struct StudentTaskPage {
    pub tarefa: TaskView,
    pub temas: Vec<Theme>,
    pub grupos: Vec<GroupComTema>,
    pub success_message: Option<String>,
    pub error_message: Option<String>,
}

impl StudentTaskPage {
    /// Ainda há algum tema livre para um grupo novo?
    pub fn tem_tema_disponivel(&self) -> bool {
        self.temas.iter().any(|t| t.available)
    }
}
