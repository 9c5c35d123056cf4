// src/models/usuario.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::{Validate, ValidationError};

use crate::common::formato_data::data_hora_brasilia;

// Representa um usuário vindo do banco de dados
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Usuario {
    pub id: i32,
    pub nome: String,
    pub email: String,

    #[serde(skip_serializing)] // IMPORTANTE para segurança
    pub senha_hash: Option<String>,
    #[serde(skip_serializing)]
    pub google_user_id: Option<String>,

    pub pais: Option<String>,
    pub estado: Option<String>,
    pub municipio: Option<String>,
    pub bairro: Option<String>,

    #[serde(with = "data_hora_brasilia")]
    pub criado_em: DateTime<Utc>,
    #[serde(with = "data_hora_brasilia")]
    pub atualizado_em: DateTime<Utc>,
}

// Dados para registro de um novo usuário
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegistrarUsuarioPayload {
    #[validate(length(min = 1, max = 100, message = "O nome é obrigatório (máx. 100 caracteres)."))]
    pub nome: String,

    #[validate(
        email(message = "O e-mail fornecido é inválido."),
        length(max = 150, message = "O e-mail deve ter no máximo 150 caracteres.")
    )]
    pub email: String,

    #[validate(length(min = 6, max = 72, message = "A senha deve ter entre 6 e 72 caracteres."))]
    pub senha: Option<String>,

    #[validate(length(min = 1, max = 100, message = "O googleUserId não pode ser vazio."))]
    pub google_user_id: Option<String>,

    #[validate(length(max = 100, message = "O país deve ter no máximo 100 caracteres."))]
    pub pais: Option<String>,
    #[validate(length(max = 100, message = "O estado deve ter no máximo 100 caracteres."))]
    pub estado: Option<String>,
    #[validate(length(max = 100, message = "O município deve ter no máximo 100 caracteres."))]
    pub municipio: Option<String>,
    #[validate(length(max = 100, message = "O bairro deve ter no máximo 100 caracteres."))]
    pub bairro: Option<String>,
}

impl RegistrarUsuarioPayload {
    // Regra: a conta precisa de senha OU de vínculo com o Google.
    pub fn validar_consistencia(&self) -> Result<(), ValidationError> {
        if self.senha.is_none() && self.google_user_id.is_none() {
            let mut erro = ValidationError::new("CredencialObrigatoria");
            erro.message = Some("Informe uma senha ou um googleUserId.".into());
            return Err(erro);
        }
        Ok(())
    }
}

// Atualização do próprio perfil (e-mail e credenciais têm fluxos próprios)
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AtualizarUsuarioPayload {
    #[validate(length(min = 1, max = 100, message = "O nome é obrigatório (máx. 100 caracteres)."))]
    pub nome: String,

    #[validate(length(max = 100, message = "O país deve ter no máximo 100 caracteres."))]
    pub pais: Option<String>,
    #[validate(length(max = 100, message = "O estado deve ter no máximo 100 caracteres."))]
    pub estado: Option<String>,
    #[validate(length(max = 100, message = "O município deve ter no máximo 100 caracteres."))]
    pub municipio: Option<String>,
    #[validate(length(max = 100, message = "O bairro deve ter no máximo 100 caracteres."))]
    pub bairro: Option<String>,
}

// Resposta do registro: o usuário recém-criado e o token de sessão
#[derive(Debug, Serialize)]
pub struct RegistroUsuarioResposta {
    pub token: String,
    pub usuario: Usuario,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload_base() -> RegistrarUsuarioPayload {
        RegistrarUsuarioPayload {
            nome: "Maria Silva".to_string(),
            email: "maria@example.com".to_string(),
            senha: Some("segredo1".to_string()),
            google_user_id: None,
            pais: Some("Brasil".to_string()),
            estado: Some("RS".to_string()),
            municipio: Some("Porto Alegre".to_string()),
            bairro: None,
        }
    }

    #[test]
    fn registro_valido_passa() {
        let payload = payload_base();
        assert!(payload.validate().is_ok());
        assert!(payload.validar_consistencia().is_ok());
    }

    #[test]
    fn registro_sem_nenhuma_credencial_e_rejeitado() {
        let mut payload = payload_base();
        payload.senha = None;
        payload.google_user_id = None;
        assert!(payload.validar_consistencia().is_err());
    }

    #[test]
    fn somente_google_tambem_vale() {
        let mut payload = payload_base();
        payload.senha = None;
        payload.google_user_id = Some("g-10293".to_string());
        assert!(payload.validar_consistencia().is_ok());
    }

    #[test]
    fn email_invalido_e_rejeitado() {
        let mut payload = payload_base();
        payload.email = "nao-e-email".to_string();
        assert!(payload.validate().is_err());
    }

    #[test]
    fn hash_da_senha_nunca_aparece_no_json() {
        let usuario = Usuario {
            id: 1234,
            nome: "Maria".to_string(),
            email: "maria@example.com".to_string(),
            senha_hash: Some("$2b$12$abcdef".to_string()),
            google_user_id: None,
            pais: None,
            estado: None,
            municipio: None,
            bairro: None,
            criado_em: chrono::Utc::now(),
            atualizado_em: chrono::Utc::now(),
        };

        let json = serde_json::to_string(&usuario).unwrap();
        assert!(!json.contains("senha"));
        assert!(!json.contains("$2b$12$"));
    }
}
