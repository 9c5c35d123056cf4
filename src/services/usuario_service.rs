// src/services/usuario_service.rs

use sqlx::PgPool;

use crate::{
    common::{
        error::AppError,
        id_unico::{inserir_com_retentativa, GeradorDeIds},
    },
    db::UsuarioRepository,
    models::{
        auth::{EsqueciSenhaPayload, Realm},
        usuario::{AtualizarUsuarioPayload, RegistrarUsuarioPayload, Usuario},
    },
    services::auth,
};

#[derive(Clone)]
pub struct UsuarioService {
    usuario_repo: UsuarioRepository,
    gerador_ids: GeradorDeIds,
    jwt_secret: String,
    pool: PgPool,
}

impl UsuarioService {
    pub fn new(
        usuario_repo: UsuarioRepository,
        gerador_ids: GeradorDeIds,
        jwt_secret: String,
        pool: PgPool,
    ) -> Self {
        Self {
            usuario_repo,
            gerador_ids,
            jwt_secret,
            pool,
        }
    }

    pub async fn registrar(
        &self,
        payload: RegistrarUsuarioPayload,
    ) -> Result<(Usuario, String), AppError> {
        // O hashing fica fora da transação: não toca no banco.
        let senha_hash = match payload.senha.as_deref() {
            Some(senha) => Some(auth::gerar_hash_de_senha(senha).await?),
            None => None,
        };

        let mut tx = self.pool.begin().await?;

        let usuario = inserir_com_retentativa(&self.gerador_ids, "usuarios", async |id| {
            self.usuario_repo
                .inserir(
                    &mut *tx,
                    id,
                    &payload.nome,
                    &payload.email,
                    senha_hash.as_deref(),
                    payload.google_user_id.as_deref(),
                    payload.pais.as_deref(),
                    payload.estado.as_deref(),
                    payload.municipio.as_deref(),
                    payload.bairro.as_deref(),
                )
                .await
        })
        .await?;

        tx.commit().await?;

        let token = auth::gerar_token(usuario.id, Realm::Usuario, &self.jwt_secret)?;
        Ok((usuario, token))
    }

    pub async fn login(&self, email: &str, senha: &str) -> Result<String, AppError> {
        let usuario = self
            .usuario_repo
            .buscar_por_email(email)
            .await?
            .ok_or(AppError::CredenciaisInvalidas)?;

        // Conta só-Google não tem senha para conferir.
        let senha_hash = usuario
            .senha_hash
            .as_deref()
            .ok_or(AppError::CredenciaisInvalidas)?;

        if !auth::verificar_senha(senha, senha_hash).await? {
            return Err(AppError::CredenciaisInvalidas);
        }

        auth::gerar_token(usuario.id, Realm::Usuario, &self.jwt_secret)
    }

    pub async fn login_google(&self, google_user_id: &str) -> Result<String, AppError> {
        let usuario = self
            .usuario_repo
            .buscar_por_google_id(google_user_id)
            .await?
            .ok_or(AppError::CredenciaisInvalidas)?;

        auth::gerar_token(usuario.id, Realm::Usuario, &self.jwt_secret)
    }

    // TODO: exigir verificação por e-mail antes de aceitar a troca de senha.
    pub async fn esqueci_senha(&self, payload: &EsqueciSenhaPayload) -> Result<(), AppError> {
        if payload.nova_senha != payload.confirmacao_senha {
            return Err(AppError::SenhasNaoConferem);
        }

        // 404 antes de gastar bcrypt com um e-mail que não existe.
        self.usuario_repo
            .buscar_por_email(&payload.email)
            .await?
            .ok_or(AppError::UsuarioNaoEncontrado)?;

        let senha_hash = auth::gerar_hash_de_senha(&payload.nova_senha).await?;

        let atualizado = self
            .usuario_repo
            .atualizar_senha_por_email(&payload.email, &senha_hash)
            .await?;
        if !atualizado {
            return Err(AppError::UsuarioNaoEncontrado);
        }

        Ok(())
    }

    pub async fn buscar_por_id(&self, id: i32) -> Result<Usuario, AppError> {
        self.usuario_repo
            .buscar_por_id(id)
            .await?
            .ok_or(AppError::UsuarioNaoEncontrado)
    }

    pub async fn listar(&self) -> Result<Vec<Usuario>, AppError> {
        self.usuario_repo.listar().await
    }

    pub async fn atualizar(
        &self,
        id: i32,
        payload: &AtualizarUsuarioPayload,
    ) -> Result<Usuario, AppError> {
        self.usuario_repo
            .atualizar(
                id,
                &payload.nome,
                payload.pais.as_deref(),
                payload.estado.as_deref(),
                payload.municipio.as_deref(),
                payload.bairro.as_deref(),
            )
            .await?
            .ok_or(AppError::UsuarioNaoEncontrado)
    }

    pub async fn deletar(&self, id: i32) -> Result<(), AppError> {
        if !self.usuario_repo.deletar(id).await? {
            return Err(AppError::UsuarioNaoEncontrado);
        }
        Ok(())
    }
}
