// src/models/abrigo.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::{Validate, ValidationError};

use crate::common::formato_data::data_hora_brasilia;

pub const STATUS_INICIAL: &str = "ativo";

// Abrigo temporário cadastrado por um administrador.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct AbrigoTemporario {
    pub id: i32,
    pub nome: String,
    pub descricao: String,
    pub cidade_municipio: String,
    pub bairro: String,
    pub logradouro: String,
    pub capacidade: i32,

    // No banco é uma coluna TEXT[]; no JSON, sempre um array de strings.
    pub imagem_urls: Vec<String>,

    #[serde(with = "data_hora_brasilia")]
    pub data_cadastro: DateTime<Utc>,
    pub status: String,
}

// No máximo 5 imagens por cadastro, cada URL com até 500 caracteres.
pub(crate) fn validar_imagem_urls(urls: &Vec<String>) -> Result<(), ValidationError> {
    for url in urls {
        if url.trim().is_empty() || url.len() > 500 {
            let mut erro = ValidationError::new("ImagemUrlInvalida");
            erro.message =
                Some("Cada URL de imagem deve ser não vazia e ter no máximo 500 caracteres.".into());
            return Err(erro);
        }
    }
    Ok(())
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CriarAbrigoPayload {
    #[validate(length(min = 1, max = 100, message = "O nome é obrigatório (máx. 100 caracteres)."))]
    pub nome: String,

    #[validate(length(min = 1, max = 500, message = "A descrição é obrigatória (máx. 500 caracteres)."))]
    pub descricao: String,

    #[validate(length(min = 1, max = 100, message = "A cidade/município é obrigatória (máx. 100 caracteres)."))]
    pub cidade_municipio: String,

    #[validate(length(min = 1, max = 100, message = "O bairro é obrigatório (máx. 100 caracteres)."))]
    pub bairro: String,

    #[validate(length(min = 1, max = 150, message = "O logradouro é obrigatório (máx. 150 caracteres)."))]
    pub logradouro: String,

    #[validate(range(min = 1, message = "A capacidade deve ser maior que zero."))]
    pub capacidade: i32,

    #[serde(default)] // Se o JSON não tiver esse campo, assume lista vazia
    #[validate(
        length(max = 5, message = "São permitidas no máximo 5 imagens."),
        custom(function = "validar_imagem_urls")
    )]
    pub imagem_urls: Vec<String>,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AtualizarAbrigoPayload {
    #[validate(length(min = 1, max = 100, message = "O nome é obrigatório (máx. 100 caracteres)."))]
    pub nome: String,

    #[validate(length(min = 1, max = 500, message = "A descrição é obrigatória (máx. 500 caracteres)."))]
    pub descricao: String,

    #[validate(length(min = 1, max = 100, message = "A cidade/município é obrigatória (máx. 100 caracteres)."))]
    pub cidade_municipio: String,

    #[validate(length(min = 1, max = 100, message = "O bairro é obrigatório (máx. 100 caracteres)."))]
    pub bairro: String,

    #[validate(length(min = 1, max = 150, message = "O logradouro é obrigatório (máx. 150 caracteres)."))]
    pub logradouro: String,

    #[validate(range(min = 1, message = "A capacidade deve ser maior que zero."))]
    pub capacidade: i32,

    #[serde(default)]
    #[validate(
        length(max = 5, message = "São permitidas no máximo 5 imagens."),
        custom(function = "validar_imagem_urls")
    )]
    pub imagem_urls: Vec<String>,

    // "ativo", "lotado", "encerrado"... texto livre.
    #[validate(length(min = 1, max = 20, message = "O status é obrigatório (máx. 20 caracteres)."))]
    pub status: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn payload_base() -> CriarAbrigoPayload {
        CriarAbrigoPayload {
            nome: "Ginásio Municipal".to_string(),
            descricao: "Abrigo com 200 colchões e cozinha comunitária.".to_string(),
            cidade_municipio: "Canoas".to_string(),
            bairro: "Centro".to_string(),
            logradouro: "Av. Guilherme Schell, 5600".to_string(),
            capacidade: 200,
            imagem_urls: vec![
                "https://cdn.example.com/abrigos/1.jpg".to_string(),
                "https://cdn.example.com/abrigos/2.jpg".to_string(),
            ],
        }
    }

    #[test]
    fn payload_valido_passa() {
        assert!(payload_base().validate().is_ok());
    }

    #[test]
    fn mais_de_cinco_imagens_e_rejeitado() {
        let mut payload = payload_base();
        payload.imagem_urls = (0..6)
            .map(|i| format!("https://cdn.example.com/abrigos/{}.jpg", i))
            .collect();
        assert!(payload.validate().is_err());
    }

    #[test]
    fn exatamente_cinco_imagens_passa() {
        let mut payload = payload_base();
        payload.imagem_urls = (0..5)
            .map(|i| format!("https://cdn.example.com/abrigos/{}.jpg", i))
            .collect();
        assert!(payload.validate().is_ok());
    }

    #[test]
    fn url_vazia_e_rejeitada() {
        let mut payload = payload_base();
        payload.imagem_urls = vec!["   ".to_string()];
        assert!(payload.validate().is_err());
    }

    #[test]
    fn capacidade_zero_e_rejeitada() {
        let mut payload = payload_base();
        payload.capacidade = 0;
        assert!(payload.validate().is_err());
    }

    #[test]
    fn imagens_serializam_como_array_json_na_mesma_ordem() {
        let abrigo = AbrigoTemporario {
            id: 4321,
            nome: "Ginásio".to_string(),
            descricao: "desc".to_string(),
            cidade_municipio: "Canoas".to_string(),
            bairro: "Centro".to_string(),
            logradouro: "Av. X".to_string(),
            capacidade: 100,
            imagem_urls: vec!["a.jpg".to_string(), "b.jpg".to_string(), "c.jpg".to_string()],
            data_cadastro: chrono::Utc.with_ymd_and_hms(2024, 5, 5, 17, 30, 0).unwrap(),
            status: STATUS_INICIAL.to_string(),
        };

        let json: serde_json::Value = serde_json::to_value(&abrigo).unwrap();
        assert_eq!(
            json["imagemUrls"],
            serde_json::json!(["a.jpg", "b.jpg", "c.jpg"])
        );
        assert_eq!(json["dataCadastro"], "05/05/2024 14:30");
    }
}
