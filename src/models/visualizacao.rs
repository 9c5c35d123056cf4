// src/models/visualizacao.rs

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

use crate::common::formato_data::data_hora_brasilia;

// Registro de que um usuário descartou (ou visualizou) um alerta.
// Chave composta (usuario_id, alerta_id); some junto com qualquer um dos pais.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct VisualizacaoAlerta {
    pub usuario_id: i32,
    pub alerta_id: i32,

    #[serde(with = "data_hora_brasilia")]
    pub data_descarte: DateTime<Utc>,
}
