// src/models/admin.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use crate::common::formato_data::data_hora_brasilia;

// Administrador: realm de autenticação separado do usuário comum.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Admin {
    pub id: i32,
    pub nome: String,
    pub email: String,

    #[serde(skip_serializing)] // IMPORTANTE para segurança
    pub senha_hash: String,

    #[serde(with = "data_hora_brasilia")]
    pub data_criacao: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct RegistrarAdminPayload {
    #[validate(length(min = 1, max = 100, message = "O nome é obrigatório (máx. 100 caracteres)."))]
    pub nome: String,

    #[validate(
        email(message = "O e-mail fornecido é inválido."),
        length(max = 150, message = "O e-mail deve ter no máximo 150 caracteres.")
    )]
    pub email: String,

    #[validate(length(min = 6, max = 72, message = "A senha deve ter entre 6 e 72 caracteres."))]
    pub senha: String,
}

#[derive(Debug, Serialize)]
pub struct RegistroAdminResposta {
    pub token: String,
    pub admin: Admin,
}
