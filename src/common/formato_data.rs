// src/common/formato_data.rs

use chrono::{DateTime, FixedOffset, NaiveDateTime, TimeZone, Utc};

/// Formato de data/hora usado em toda a API, no lugar de ISO-8601.
pub const FORMATO_DATA_HORA: &str = "%d/%m/%Y %H:%M";

/// Brasília não observa horário de verão desde 2019; offset fixo de -03:00.
pub fn fuso_brasilia() -> FixedOffset {
    FixedOffset::west_opt(3 * 3600).expect("offset de -03:00 é sempre válido")
}

/// Converte um instante UTC para o texto `dd/MM/yyyy HH:mm` no fuso de Brasília.
pub fn formatar(data: &DateTime<Utc>) -> String {
    data.with_timezone(&fuso_brasilia())
        .format(FORMATO_DATA_HORA)
        .to_string()
}

/// Faz o caminho inverso de [`formatar`]: texto local de Brasília -> UTC.
pub fn interpretar(texto: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    let local = NaiveDateTime::parse_from_str(texto, FORMATO_DATA_HORA)?;
    let com_fuso = fuso_brasilia()
        .from_local_datetime(&local)
        .single()
        .expect("offset fixo nunca é ambíguo");
    Ok(com_fuso.with_timezone(&Utc))
}

/// Módulo serde para campos `DateTime<Utc>`: use com
/// `#[serde(with = "data_hora_brasilia")]`.
pub mod data_hora_brasilia {
    use super::*;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(data: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&formatar(data))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let texto = String::deserialize(deserializer)?;
        interpretar(&texto).map_err(serde::de::Error::custom)
    }
}

/// Variante para `Option<DateTime<Utc>>`; combine com `#[serde(default)]`.
pub mod data_hora_brasilia_opcional {
    use super::*;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(data: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match data {
            Some(d) => serializer.serialize_str(&formatar(d)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<String>::deserialize(deserializer)? {
            Some(texto) => interpretar(&texto)
                .map(Some)
                .map_err(serde::de::Error::custom),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formata_no_fuso_de_brasilia() {
        // 17:30 UTC == 14:30 em Brasília.
        let utc = Utc.with_ymd_and_hms(2024, 5, 5, 17, 30, 0).unwrap();
        assert_eq!(formatar(&utc), "05/05/2024 14:30");
    }

    #[test]
    fn ida_e_volta_exata_para_entradas_validas() {
        let textos = [
            "05/05/2024 14:30",
            "01/01/2000 00:00",
            "31/12/2030 23:59",
            "29/02/2024 12:00",
        ];
        for texto in textos {
            let instante = interpretar(texto).unwrap();
            assert_eq!(formatar(&instante), texto);
        }
    }

    #[test]
    fn rejeita_formatos_estranhos() {
        assert!(interpretar("2024-05-05 14:30").is_err());
        assert!(interpretar("05/05/2024").is_err());
        assert!(interpretar("32/01/2024 10:00").is_err());
        assert!(interpretar("").is_err());
    }

    #[test]
    fn modulo_serde_aplica_o_formato() {
        use serde::{Deserialize, Serialize};

        #[derive(Serialize, Deserialize)]
        struct Registro {
            #[serde(with = "data_hora_brasilia")]
            quando: DateTime<Utc>,
        }

        let registro = Registro {
            quando: Utc.with_ymd_and_hms(2024, 5, 5, 17, 30, 0).unwrap(),
        };

        let json = serde_json::to_string(&registro).unwrap();
        assert_eq!(json, r#"{"quando":"05/05/2024 14:30"}"#);

        let de_volta: Registro = serde_json::from_str(&json).unwrap();
        assert_eq!(de_volta.quando, registro.quando);
    }
}
