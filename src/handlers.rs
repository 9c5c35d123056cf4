pub mod abrigos;
pub mod admins;
pub mod alertas;
pub mod auth;
pub mod pontos_coleta;
pub mod usuarios;
