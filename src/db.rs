pub mod usuario_repo;
pub use usuario_repo::UsuarioRepository;
pub mod admin_repo;
pub use admin_repo::AdminRepository;
pub mod alerta_repo;
pub use alerta_repo::AlertaRepository;
pub mod abrigo_repo;
pub use abrigo_repo::AbrigoRepository;
pub mod ponto_coleta_repo;
pub use ponto_coleta_repo::PontoColetaRepository;
pub mod participacao_repo;
pub use participacao_repo::ParticipacaoRepository;
pub mod visualizacao_repo;
pub use visualizacao_repo::VisualizacaoRepository;
