// src/config.rs

use sqlx::{postgres::PgPoolOptions, PgPool};
use std::{env, time::Duration};

use crate::{
    common::id_unico::GeradorDeIds,
    db::{
        AbrigoRepository, AdminRepository, AlertaRepository, ParticipacaoRepository,
        PontoColetaRepository, UsuarioRepository, VisualizacaoRepository,
    },
    services::{AbrigoService, AdminService, AlertaService, PontoColetaService, UsuarioService},
};

// O estado compartilhado que será acessível em toda a aplicação
#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub jwt_secret: String,
    pub usuario_service: UsuarioService,
    pub admin_service: AdminService,
    pub alerta_service: AlertaService,
    pub abrigo_service: AbrigoService,
    pub ponto_coleta_service: PontoColetaService,
}

impl AppState {
    // Carrega as configurações e monta o estado da aplicação
    pub async fn new() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL").expect("DATABASE_URL deve ser definida");
        let jwt_secret = env::var("JWT_SECRET").expect("JWT_SECRET deve ser definido");

        // Conecta ao banco de dados, usando '?' para propagar erros
        let db_pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&database_url)
            .await?;

        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

        // --- Monta o gráfico de dependências ---

        // Uma única fonte de aleatoriedade para os IDs de 4 dígitos de todas
        // as tabelas.
        let gerador_ids = GeradorDeIds::novo();

        let usuario_repo = UsuarioRepository::new(db_pool.clone());
        let admin_repo = AdminRepository::new(db_pool.clone());
        let alerta_repo = AlertaRepository::new(db_pool.clone());
        let abrigo_repo = AbrigoRepository::new(db_pool.clone());
        let ponto_repo = PontoColetaRepository::new(db_pool.clone());
        let participacao_repo = ParticipacaoRepository::new(db_pool.clone());
        let visualizacao_repo = VisualizacaoRepository::new(db_pool.clone());

        let usuario_service = UsuarioService::new(
            usuario_repo,
            gerador_ids.clone(),
            jwt_secret.clone(),
            db_pool.clone(),
        );
        let admin_service = AdminService::new(
            admin_repo,
            gerador_ids.clone(),
            jwt_secret.clone(),
            db_pool.clone(),
        );
        let alerta_service = AlertaService::new(
            alerta_repo.clone(),
            visualizacao_repo,
            gerador_ids.clone(),
            db_pool.clone(),
        );
        let abrigo_service = AbrigoService::new(
            abrigo_repo,
            alerta_repo.clone(),
            gerador_ids.clone(),
            db_pool.clone(),
        );
        let ponto_coleta_service = PontoColetaService::new(
            ponto_repo,
            participacao_repo,
            alerta_repo,
            gerador_ids,
            db_pool.clone(),
        );

        Ok(Self {
            db_pool,
            jwt_secret,
            usuario_service,
            admin_service,
            alerta_service,
            abrigo_service,
            ponto_coleta_service,
        })
    }
}
