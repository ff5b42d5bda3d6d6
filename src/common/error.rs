use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::db::DataAccessError;

// Nosso tipo de erro, com `thiserror` para melhor ergonomia.
//
// A taxonomia é curta de propósito: resultado vazio não é erro (vira `[]` ou
// série zerada) e chave estrangeira sem alvo também não (a linha é pulada na
// agregação). Só falha de transporte e entrada inválida chegam até aqui.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    // Falha de rede/banco ao buscar as linhas cruas
    #[error("Falha de acesso aos dados")]
    DataAccess(#[from] DataAccessError),

    // Variante genérica para qualquer outro erro inesperado
    #[error("Erro interno do servidor")]
    InternalServerError(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            // Retorna todos os detalhes da validação.
            AppError::ValidationError(errors) => {
                let mut details = std::collections::HashMap::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages: Vec<String> = field_errors.iter()
                        .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
                        .collect();
                    details.insert(field.to_string(), messages);
                }
                let body = Json(json!({
                    "error": "Um ou mais parâmetros são inválidos.",
                    "details": details,
                }));
                return (StatusCode::BAD_REQUEST, body).into_response();
            }

            // Os demais erros viram 500; a camada de apresentação decide
            // mostrar o estado de "tente de novo". O `tracing` loga a
            // mensagem detalhada que o `thiserror` nos deu.
            ref e => {
                tracing::error!("Erro ao montar os dados do painel: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Ocorreu um erro inesperado.")
            }
        };

        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}
