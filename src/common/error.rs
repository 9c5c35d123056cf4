use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// Nosso tipo de erro, com `thiserror` para melhor ergonomia.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("E-mail já cadastrado")]
    EmailJaCadastrado,

    #[error("As senhas informadas não conferem")]
    SenhasNaoConferem,

    #[error("Credenciais inválidas")]
    CredenciaisInvalidas,

    #[error("Token inválido")]
    TokenInvalido,

    #[error("Acesso negado")]
    AcessoNegado,

    #[error("Usuário não encontrado")]
    UsuarioNaoEncontrado,

    #[error("Administrador não encontrado")]
    AdminNaoEncontrado,

    #[error("Alerta não encontrado")]
    AlertaNaoEncontrado,

    #[error("Abrigo temporário não encontrado")]
    AbrigoNaoEncontrado,

    #[error("Ponto de coleta não encontrado")]
    PontoColetaNaoEncontrado,

    #[error("Participação não encontrada")]
    ParticipacaoNaoEncontrada,

    // Sinal interno: o ID de 4 dígitos proposto colidiu com uma linha existente.
    // O service tenta de novo com outro candidato; nunca deve chegar ao cliente.
    #[error("ID de 4 dígitos já em uso")]
    IdJaEmUso,

    #[error("Espaço de IDs de 4 dígitos esgotado")]
    EspacoDeIdsEsgotado,

    // Variante para erros de banco de dados
    #[error("Erro de banco de dados")]
    DatabaseError(#[from] sqlx::Error),

    // Variante genérica para qualquer outro erro inesperado
    #[error("Erro interno do servidor")]
    InternalServerError(#[from] anyhow::Error),

    #[error("Erro de Bcrypt: {0}")]
    BcryptError(#[from] bcrypt::BcryptError),

    #[error("Erro de JWT: {0}")]
    JwtError(#[from] jsonwebtoken::errors::Error),
}

impl AppError {
    /// Nome da constraint violada, quando o erro do sqlx é uma violação de
    /// unicidade. Os repositórios usam isso para traduzir colisões de chave
    /// primária e de e-mail em variantes específicas.
    pub fn constraint_violada(err: &sqlx::Error) -> Option<String> {
        if let sqlx::Error::Database(db_err) = err {
            if db_err.is_unique_violation() {
                return db_err.constraint().map(|c| c.to_string());
            }
        }
        None
    }

    /// Idem para violações de chave estrangeira (ex.: participação apontando
    /// para um ponto de coleta que não existe).
    pub fn chave_estrangeira_violada(err: &sqlx::Error) -> Option<String> {
        if let sqlx::Error::Database(db_err) = err {
            if db_err.is_foreign_key_violation() {
                return db_err.constraint().map(|c| c.to_string());
            }
        }
        None
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, mensagem) = match self {
            // Devolve todos os detalhes da validação, campo a campo.
            AppError::ValidationError(errors) => {
                let mut detalhes = std::collections::HashMap::new();
                for (campo, erros_do_campo) in errors.field_errors() {
                    let mensagens: Vec<String> = erros_do_campo
                        .iter()
                        .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
                        .collect();
                    detalhes.insert(campo.to_string(), mensagens);
                }
                let body = Json(json!({ "errors": detalhes }));
                return (StatusCode::BAD_REQUEST, body).into_response();
            }

            AppError::EmailJaCadastrado => {
                (StatusCode::BAD_REQUEST, "Este e-mail já está em uso.")
            }
            AppError::SenhasNaoConferem => (
                StatusCode::BAD_REQUEST,
                "A nova senha e a confirmação não conferem.",
            ),
            AppError::CredenciaisInvalidas => {
                (StatusCode::UNAUTHORIZED, "E-mail ou senha inválidos.")
            }
            AppError::TokenInvalido => (
                StatusCode::UNAUTHORIZED,
                "Token de autenticação inválido ou ausente.",
            ),
            AppError::AcessoNegado => (
                StatusCode::FORBIDDEN,
                "Você não tem permissão para executar esta operação.",
            ),

            AppError::UsuarioNaoEncontrado => (StatusCode::NOT_FOUND, "Usuário não encontrado."),
            AppError::AdminNaoEncontrado => {
                (StatusCode::NOT_FOUND, "Administrador não encontrado.")
            }
            AppError::AlertaNaoEncontrado => (StatusCode::NOT_FOUND, "Alerta não encontrado."),
            AppError::AbrigoNaoEncontrado => {
                (StatusCode::NOT_FOUND, "Abrigo temporário não encontrado.")
            }
            AppError::PontoColetaNaoEncontrado => {
                (StatusCode::NOT_FOUND, "Ponto de coleta não encontrado.")
            }
            AppError::ParticipacaoNaoEncontrada => {
                (StatusCode::NOT_FOUND, "Participação não encontrada.")
            }

            // Todos os outros erros (DatabaseError, EspacoDeIdsEsgotado, etc.)
            // viram 500. O detalhe fica apenas no log do servidor.
            ref e => {
                tracing::error!("Erro Interno do Servidor: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Ocorreu um erro inesperado.")
            }
        };

        // Resposta padrão para erros simples que só têm uma mensagem.
        let body = Json(json!({ "errors": { "message": mensagem } }));
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use serde_json::Value;

    async fn corpo_json(resposta: Response) -> Value {
        let bytes = to_bytes(resposta.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn nao_encontrado_vira_404_com_mensagem() {
        let resposta = AppError::PontoColetaNaoEncontrado.into_response();
        assert_eq!(resposta.status(), StatusCode::NOT_FOUND);

        let corpo = corpo_json(resposta).await;
        assert_eq!(
            corpo["errors"]["message"],
            "Ponto de coleta não encontrado."
        );
    }

    #[tokio::test]
    async fn erro_de_validacao_vira_400_com_mapa_de_campos() {
        let mut erros = validator::ValidationErrors::new();
        let mut erro = validator::ValidationError::new("length");
        erro.message = Some("A cidade é obrigatória.".into());
        erros.add("cidade".into(), erro);

        let resposta = AppError::ValidationError(erros).into_response();
        assert_eq!(resposta.status(), StatusCode::BAD_REQUEST);

        let corpo = corpo_json(resposta).await;
        assert_eq!(corpo["errors"]["cidade"][0], "A cidade é obrigatória.");
    }

    #[tokio::test]
    async fn senhas_divergentes_viram_400() {
        let resposta = AppError::SenhasNaoConferem.into_response();
        assert_eq!(resposta.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn esgotamento_de_ids_vira_500_generico() {
        let resposta = AppError::EspacoDeIdsEsgotado.into_response();
        assert_eq!(resposta.status(), StatusCode::INTERNAL_SERVER_ERROR);

        // O cliente nunca vê o motivo real.
        let corpo = corpo_json(resposta).await;
        assert_eq!(corpo["errors"]["message"], "Ocorreu um erro inesperado.");
    }

    #[tokio::test]
    async fn token_invalido_vira_401() {
        let resposta = AppError::TokenInvalido.into_response();
        assert_eq!(resposta.status(), StatusCode::UNAUTHORIZED);
    }
}
