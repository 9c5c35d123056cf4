// src/models/alerta.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use crate::common::formato_data::{data_hora_brasilia, data_hora_brasilia_opcional};

use super::{abrigo::AbrigoTemporario, ponto_coleta::PontoDeColetaDeDoacoes};

// Que tipo de entidade deu origem ao alerta.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq)]
#[sqlx(type_name = "tipo_origem_alerta", rename_all = "SCREAMING_SNAKE_CASE")] // Banco
#[serde(rename_all = "SCREAMING_SNAKE_CASE")] // JSON
pub enum TipoOrigemAlerta {
    PontoColeta,      // Vira "PONTO_COLETA"
    AbrigoTemporario, // Vira "ABRIGO_TEMPORARIO"
    Manual,
}

// Alerta publicado para a população.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Alerta {
    pub id: i32,
    pub tipo: String,
    pub titulo: String,
    pub descricao: String,
    pub cidade: String,
    pub bairro: Option<String>,
    pub logradouro: Option<String>,

    #[serde(with = "data_hora_brasilia")]
    pub data_hora: DateTime<Utc>,

    // Preenchidos quando o alerta nasceu de um abrigo ou ponto de coleta.
    pub origem_id: Option<i32>,
    pub tipo_origem: Option<TipoOrigemAlerta>,
}

/// Dados de um alerta ainda sem ID, prontos para inserção.
#[derive(Debug, Clone)]
pub struct NovoAlerta {
    pub tipo: String,
    pub titulo: String,
    pub descricao: String,
    pub cidade: String,
    pub bairro: Option<String>,
    pub logradouro: Option<String>,
    pub data_hora: DateTime<Utc>,
    pub origem_id: Option<i32>,
    pub tipo_origem: Option<TipoOrigemAlerta>,
}

impl NovoAlerta {
    /// Alerta que acompanha o cadastro de um abrigo temporário. Nasce na mesma
    /// transação do abrigo: ou os dois existem, ou nenhum.
    pub fn de_abrigo(abrigo: &AbrigoTemporario) -> Self {
        Self {
            tipo: "abrigo".to_string(),
            titulo: format!("Novo abrigo temporário: {}", abrigo.nome),
            descricao: abrigo.descricao.clone(),
            cidade: abrigo.cidade_municipio.clone(),
            bairro: Some(abrigo.bairro.clone()),
            logradouro: Some(abrigo.logradouro.clone()),
            data_hora: abrigo.data_cadastro,
            origem_id: Some(abrigo.id),
            tipo_origem: Some(TipoOrigemAlerta::AbrigoTemporario),
        }
    }

    /// Idem para pontos de coleta de doações.
    pub fn de_ponto_coleta(ponto: &PontoDeColetaDeDoacoes) -> Self {
        Self {
            tipo: "doacao".to_string(),
            titulo: format!("Novo ponto de coleta de doações: {}", ponto.tipo),
            descricao: ponto.descricao.clone(),
            cidade: ponto.cidade.clone(),
            bairro: Some(ponto.bairro.clone()),
            logradouro: Some(ponto.logradouro.clone()),
            data_hora: ponto.data_inicio,
            origem_id: Some(ponto.id),
            tipo_origem: Some(TipoOrigemAlerta::PontoColeta),
        }
    }
}

// Criação manual de alerta (somente administradores).
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CriarAlertaPayload {
    #[validate(length(min = 1, max = 50, message = "O tipo é obrigatório (máx. 50 caracteres)."))]
    pub tipo: String,

    #[validate(length(min = 1, max = 150, message = "O título é obrigatório (máx. 150 caracteres)."))]
    pub titulo: String,

    #[validate(length(min = 1, max = 500, message = "A descrição é obrigatória (máx. 500 caracteres)."))]
    pub descricao: String,

    #[validate(length(min = 1, max = 100, message = "A cidade é obrigatória (máx. 100 caracteres)."))]
    pub cidade: String,

    #[validate(length(max = 100, message = "O bairro deve ter no máximo 100 caracteres."))]
    pub bairro: Option<String>,

    #[validate(length(max = 150, message = "O logradouro deve ter no máximo 150 caracteres."))]
    pub logradouro: Option<String>,

    // Quando omitido, vale o momento da publicação.
    #[serde(default, with = "data_hora_brasilia_opcional")]
    pub data_hora: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AtualizarAlertaPayload {
    #[validate(length(min = 1, max = 50, message = "O tipo é obrigatório (máx. 50 caracteres)."))]
    pub tipo: String,

    #[validate(length(min = 1, max = 150, message = "O título é obrigatório (máx. 150 caracteres)."))]
    pub titulo: String,

    #[validate(length(min = 1, max = 500, message = "A descrição é obrigatória (máx. 500 caracteres)."))]
    pub descricao: String,

    #[validate(length(min = 1, max = 100, message = "A cidade é obrigatória (máx. 100 caracteres)."))]
    pub cidade: String,

    #[validate(length(max = 100, message = "O bairro deve ter no máximo 100 caracteres."))]
    pub bairro: Option<String>,

    #[validate(length(max = 150, message = "O logradouro deve ter no máximo 150 caracteres."))]
    pub logradouro: Option<String>,
}

// Filtro de cidade usado nas listagens de alertas e de pontos de coleta.
#[derive(Debug, Deserialize)]
pub struct FiltroCidade {
    pub cidade: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn abrigo_exemplo() -> AbrigoTemporario {
        AbrigoTemporario {
            id: 4321,
            nome: "Ginásio Municipal".to_string(),
            descricao: "Abrigo com 200 colchões.".to_string(),
            cidade_municipio: "Canoas".to_string(),
            bairro: "Centro".to_string(),
            logradouro: "Av. Guilherme Schell, 5600".to_string(),
            capacidade: 200,
            imagem_urls: vec![],
            data_cadastro: Utc.with_ymd_and_hms(2024, 5, 5, 17, 30, 0).unwrap(),
            status: "ativo".to_string(),
        }
    }

    #[test]
    fn alerta_de_abrigo_aponta_para_a_origem() {
        let abrigo = abrigo_exemplo();
        let novo = NovoAlerta::de_abrigo(&abrigo);

        assert_eq!(novo.tipo, "abrigo");
        assert_eq!(novo.origem_id, Some(4321));
        assert_eq!(novo.tipo_origem, Some(TipoOrigemAlerta::AbrigoTemporario));
        assert_eq!(novo.cidade, "Canoas");
        assert_eq!(novo.data_hora, abrigo.data_cadastro);
        assert!(novo.titulo.contains("Ginásio Municipal"));
    }

    #[test]
    fn alerta_de_ponto_de_coleta_aponta_para_a_origem() {
        let ponto = PontoDeColetaDeDoacoes {
            id: 7777,
            tipo: "alimentos".to_string(),
            descricao: "Arrecadação de alimentos não perecíveis.".to_string(),
            data_inicio: Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap(),
            cidade: "Pelotas".to_string(),
            bairro: "Centro".to_string(),
            logradouro: "Rua XV de Novembro, 100".to_string(),
            estoque: None,
            imagem_urls: vec![],
        };

        let novo = NovoAlerta::de_ponto_coleta(&ponto);
        assert_eq!(novo.origem_id, Some(7777));
        assert_eq!(novo.tipo_origem, Some(TipoOrigemAlerta::PontoColeta));
        assert_eq!(novo.cidade, "Pelotas");
    }

    #[test]
    fn titulo_derivado_cabe_no_limite_da_coluna() {
        let mut abrigo = abrigo_exemplo();
        abrigo.nome = "X".repeat(100); // nome no tamanho máximo permitido
        let novo = NovoAlerta::de_abrigo(&abrigo);
        assert!(novo.titulo.chars().count() <= 150);
    }

    #[test]
    fn tipo_origem_serializa_em_caixa_alta() {
        let json = serde_json::to_string(&TipoOrigemAlerta::AbrigoTemporario).unwrap();
        assert_eq!(json, r#""ABRIGO_TEMPORARIO""#);
        let json = serde_json::to_string(&TipoOrigemAlerta::PontoColeta).unwrap();
        assert_eq!(json, r#""PONTO_COLETA""#);
    }
}
