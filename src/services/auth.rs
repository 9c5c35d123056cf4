// src/services/auth.rs

use bcrypt::{hash, verify};
use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};

use crate::{
    common::error::AppError,
    models::auth::{Claims, Realm},
};

pub const VALIDADE_TOKEN_DIAS: i64 = 7;

pub fn gerar_token(id: i32, realm: Realm, jwt_secret: &str) -> Result<String, AppError> {
    let agora = Utc::now();
    let expira_em = agora + chrono::Duration::days(VALIDADE_TOKEN_DIAS);

    let claims = Claims {
        sub: id,
        realm: realm.as_str().to_string(),
        exp: expira_em.timestamp() as usize,
        iat: agora.timestamp() as usize,
    };

    Ok(encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(jwt_secret.as_ref()),
    )?)
}

pub fn decodificar_token(token: &str, jwt_secret: &str) -> Result<Claims, AppError> {
    let validation = Validation::default();
    let dados = decode::<Claims>(
        token,
        &DecodingKey::from_secret(jwt_secret.as_ref()),
        &validation,
    )
    .map_err(|_| AppError::TokenInvalido)?;

    Ok(dados.claims)
}

// O bcrypt é caro de propósito; roda fora do runtime assíncrono.
pub async fn gerar_hash_de_senha(senha: &str) -> Result<String, AppError> {
    let senha = senha.to_owned();
    let senha_hash = tokio::task::spawn_blocking(move || hash(&senha, bcrypt::DEFAULT_COST))
        .await
        .map_err(|e| anyhow::anyhow!("Falha na task de hashing: {}", e))??;
    Ok(senha_hash)
}

pub async fn verificar_senha(senha: &str, senha_hash: &str) -> Result<bool, AppError> {
    let senha = senha.to_owned();
    let senha_hash = senha_hash.to_owned();
    let confere = tokio::task::spawn_blocking(move || verify(&senha, &senha_hash))
        .await
        .map_err(|e| anyhow::anyhow!("Falha na task de verificação de senha: {}", e))??;
    Ok(confere)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SEGREDO: &str = "segredo-de-teste";

    #[test]
    fn token_emitido_pode_ser_decodificado() {
        let token = gerar_token(1234, Realm::Usuario, SEGREDO).unwrap();
        let claims = decodificar_token(&token, SEGREDO).unwrap();

        assert_eq!(claims.sub, 1234);
        assert_eq!(claims.realm, "usuario");
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn token_de_admin_carrega_o_realm_certo() {
        let token = gerar_token(9876, Realm::Admin, SEGREDO).unwrap();
        let claims = decodificar_token(&token, SEGREDO).unwrap();
        assert_eq!(claims.realm, "admin");
    }

    #[test]
    fn segredo_errado_e_rejeitado() {
        let token = gerar_token(1234, Realm::Usuario, SEGREDO).unwrap();
        let resultado = decodificar_token(&token, "outro-segredo");
        assert!(matches!(resultado, Err(AppError::TokenInvalido)));
    }

    #[test]
    fn lixo_e_rejeitado() {
        assert!(matches!(
            decodificar_token("nao.e.um.jwt", SEGREDO),
            Err(AppError::TokenInvalido)
        ));
    }
}
