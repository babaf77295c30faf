// src/web/mod.rs
pub mod auth_handlers;
pub mod estudante_handlers;
pub mod mw_auth;
pub mod mw_estudante;
pub mod mw_professor;
pub mod professor_handlers;
pub mod routes;

/// Converte um textarea "um item por linha" numa lista limpa
/// (linhas vazias e espaços nas pontas são descartados).
pub fn linhas_para_lista(texto: &str) -> Vec<String> {
    texto
        .lines()
        .map(|linha| linha.trim())
        .filter(|linha| !linha.is_empty())
        .map(|linha| linha.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::linhas_para_lista;

    #[test]
    fn linhas_para_lista_ignora_vazias_e_espacos() {
        let texto = "Ler o capítulo 3\n\n  Preparar slides  \n\n";
        assert_eq!(
            linhas_para_lista(texto),
            vec!["Ler o capítulo 3".to_string(), "Preparar slides".to_string()]
        );
    }

    #[test]
    fn linhas_para_lista_de_texto_vazio_e_vazia() {
        assert!(linhas_para_lista("").is_empty());
        assert!(linhas_para_lista("   \n \n").is_empty());
    }
}
