// src/models/auth.rs

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// Os dois domínios de autenticação da aplicação. Um token emitido para um
/// usuário comum nunca abre rotas administrativas, e vice-versa.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Realm {
    Usuario,
    Admin,
}

impl Realm {
    pub fn as_str(&self) -> &'static str {
        match self {
            Realm::Usuario => "usuario",
            Realm::Admin => "admin",
        }
    }
}

// Estrutura de dados ("claims") dentro do JWT
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: i32,      // Subject (ID de 4 dígitos do usuário ou admin)
    pub realm: String, // "usuario" ou "admin"
    pub exp: usize,    // Expiration time (quando o token expira)
    pub iat: usize,    // Issued At (quando o token foi criado)
}

// Dados para login com e-mail e senha (vale para os dois realms)
#[derive(Debug, Deserialize, Validate)]
pub struct LoginPayload {
    #[validate(email(message = "O e-mail fornecido é inválido."))]
    pub email: String,
    #[validate(length(min = 6, max = 72, message = "A senha deve ter entre 6 e 72 caracteres."))]
    pub senha: String,
}

// Dados para login via conta Google já vinculada
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct LoginGooglePayload {
    #[validate(length(min = 1, max = 100, message = "O googleUserId é obrigatório."))]
    pub google_user_id: String,
}

// Troca de senha por e-mail, sem verificação fora de banda.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct EsqueciSenhaPayload {
    #[validate(email(message = "O e-mail fornecido é inválido."))]
    pub email: String,
    #[validate(length(min = 6, max = 72, message = "A nova senha deve ter entre 6 e 72 caracteres."))]
    pub nova_senha: String,
    #[validate(length(min = 6, max = 72, message = "A confirmação deve ter entre 6 e 72 caracteres."))]
    pub confirmacao_senha: String,
}

impl EsqueciSenhaPayload {
    // Nada é persistido quando a confirmação diverge da nova senha.
    pub fn validar_consistencia(&self) -> Result<(), ValidationError> {
        if self.nova_senha != self.confirmacao_senha {
            let mut erro = ValidationError::new("SenhasNaoConferem");
            erro.message = Some("A nova senha e a confirmação não conferem.".into());
            return Err(erro);
        }
        Ok(())
    }
}

// Resposta de autenticação com o token
#[derive(Debug, Serialize)]
pub struct TokenResposta {
    pub token: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn confirmacao_divergente_e_rejeitada() {
        let payload = EsqueciSenhaPayload {
            email: "maria@example.com".to_string(),
            nova_senha: "segredo1".to_string(),
            confirmacao_senha: "segredo2".to_string(),
        };
        assert!(payload.validar_consistencia().is_err());
    }

    #[test]
    fn confirmacao_igual_passa() {
        let payload = EsqueciSenhaPayload {
            email: "maria@example.com".to_string(),
            nova_senha: "segredo1".to_string(),
            confirmacao_senha: "segredo1".to_string(),
        };
        assert!(payload.validar_consistencia().is_ok());
    }

    #[test]
    fn senha_curta_falha_na_validacao_de_campos() {
        let payload = EsqueciSenhaPayload {
            email: "maria@example.com".to_string(),
            nova_senha: "abc".to_string(),
            confirmacao_senha: "abc".to_string(),
        };
        assert!(payload.validate().is_err());
    }
}
