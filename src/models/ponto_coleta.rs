// src/models/ponto_coleta.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use crate::common::formato_data::{data_hora_brasilia, data_hora_brasilia_opcional};

use super::abrigo::validar_imagem_urls;

// Ponto de coleta de doações.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct PontoDeColetaDeDoacoes {
    pub id: i32,
    pub tipo: String,
    pub descricao: String,

    #[serde(with = "data_hora_brasilia")]
    pub data_inicio: DateTime<Utc>,

    pub cidade: String,
    pub bairro: String,
    pub logradouro: String,

    // Texto livre descrevendo o que já foi arrecadado / o que falta.
    pub estoque: Option<String>,

    pub imagem_urls: Vec<String>,
}

// Participação de um usuário em um ponto de coleta.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ParticipacaoPontoColeta {
    pub id: i32,
    pub ponto_coleta_id: i32,
    pub id_usuario: i32,
    pub forma_de_ajuda: String,
    pub mensagem: Option<String>,
    pub contato: Option<String>,
    pub telefone: String,

    #[serde(with = "data_hora_brasilia")]
    pub data_hora: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CriarPontoColetaPayload {
    #[validate(length(min = 1, max = 50, message = "O tipo é obrigatório (máx. 50 caracteres)."))]
    pub tipo: String,

    #[validate(length(min = 1, max = 500, message = "A descrição é obrigatória (máx. 500 caracteres)."))]
    pub descricao: String,

    // Quando omitido, o início é o momento do cadastro.
    #[serde(default, with = "data_hora_brasilia_opcional")]
    pub data_inicio: Option<DateTime<Utc>>,

    #[validate(length(min = 1, max = 100, message = "A cidade é obrigatória (máx. 100 caracteres)."))]
    pub cidade: String,

    #[validate(length(min = 1, max = 100, message = "O bairro é obrigatório (máx. 100 caracteres)."))]
    pub bairro: String,

    #[validate(length(min = 1, max = 150, message = "O logradouro é obrigatório (máx. 150 caracteres)."))]
    pub logradouro: String,

    #[validate(length(max = 1000, message = "O estoque deve ter no máximo 1000 caracteres."))]
    pub estoque: Option<String>,

    #[serde(default)]
    #[validate(
        length(max = 5, message = "São permitidas no máximo 5 imagens."),
        custom(function = "validar_imagem_urls")
    )]
    pub imagem_urls: Vec<String>,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AtualizarPontoColetaPayload {
    #[validate(length(min = 1, max = 50, message = "O tipo é obrigatório (máx. 50 caracteres)."))]
    pub tipo: String,

    #[validate(length(min = 1, max = 500, message = "A descrição é obrigatória (máx. 500 caracteres)."))]
    pub descricao: String,

    #[validate(length(min = 1, max = 100, message = "A cidade é obrigatória (máx. 100 caracteres)."))]
    pub cidade: String,

    #[validate(length(min = 1, max = 100, message = "O bairro é obrigatório (máx. 100 caracteres)."))]
    pub bairro: String,

    #[validate(length(min = 1, max = 150, message = "O logradouro é obrigatório (máx. 150 caracteres)."))]
    pub logradouro: String,

    #[validate(length(max = 1000, message = "O estoque deve ter no máximo 1000 caracteres."))]
    pub estoque: Option<String>,

    #[serde(default)]
    #[validate(
        length(max = 5, message = "São permitidas no máximo 5 imagens."),
        custom(function = "validar_imagem_urls")
    )]
    pub imagem_urls: Vec<String>,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CriarParticipacaoPayload {
    #[validate(length(min = 1, max = 100, message = "A forma de ajuda é obrigatória (máx. 100 caracteres)."))]
    pub forma_de_ajuda: String,

    #[validate(length(max = 500, message = "A mensagem deve ter no máximo 500 caracteres."))]
    pub mensagem: Option<String>,

    #[validate(length(max = 100, message = "O contato deve ter no máximo 100 caracteres."))]
    pub contato: Option<String>,

    #[validate(length(min = 8, max = 20, message = "O telefone deve ter entre 8 e 20 caracteres."))]
    pub telefone: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_inicio_aceita_o_formato_brasileiro() {
        let json = r#"{
            "tipo": "roupas",
            "descricao": "Coleta de agasalhos",
            "dataInicio": "10/06/2024 08:00",
            "cidade": "Pelotas",
            "bairro": "Centro",
            "logradouro": "Rua XV de Novembro, 100"
        }"#;

        let payload: CriarPontoColetaPayload = serde_json::from_str(json).unwrap();
        assert!(payload.validate().is_ok());
        assert!(payload.data_inicio.is_some());
        assert!(payload.imagem_urls.is_empty());
    }

    #[test]
    fn data_inicio_iso_e_rejeitada() {
        let json = r#"{
            "tipo": "roupas",
            "descricao": "Coleta de agasalhos",
            "dataInicio": "2024-06-10T08:00:00Z",
            "cidade": "Pelotas",
            "bairro": "Centro",
            "logradouro": "Rua XV de Novembro, 100"
        }"#;

        assert!(serde_json::from_str::<CriarPontoColetaPayload>(json).is_err());
    }

    #[test]
    fn telefone_curto_e_rejeitado() {
        let payload = CriarParticipacaoPayload {
            forma_de_ajuda: "voluntariado".to_string(),
            mensagem: None,
            contato: None,
            telefone: "1234".to_string(),
        };
        assert!(payload.validate().is_err());
    }
}
