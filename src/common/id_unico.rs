// src/common/id_unico.rs

use std::sync::{Arc, Mutex};

use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::common::error::AppError;

// Faixa dos IDs curtos atribuídos pela aplicação (sempre 4 dígitos).
pub const ID_MINIMO: i32 = 1000;
pub const ID_MAXIMO: i32 = 9999;

// Com apenas 9000 valores possíveis, colisões são esperadas conforme as
// tabelas crescem. O laço de realocação é limitado e avisa cedo.
pub const MAX_TENTATIVAS: u32 = 16;
pub const LIMIAR_AVISO_COLISOES: u32 = 4;

/// Fonte de aleatoriedade única do processo, compartilhada por todos os
/// services. Aceita semente fixa para tornar a geração determinística nos
/// testes.
#[derive(Clone)]
pub struct GeradorDeIds {
    rng: Arc<Mutex<StdRng>>,
}

impl GeradorDeIds {
    pub fn novo() -> Self {
        Self {
            rng: Arc::new(Mutex::new(StdRng::from_entropy())),
        }
    }

    pub fn com_semente(semente: u64) -> Self {
        Self {
            rng: Arc::new(Mutex::new(StdRng::seed_from_u64(semente))),
        }
    }

    /// Propõe um candidato na faixa 1000..=9999. A unicidade é garantida pela
    /// chave primária no banco, não aqui.
    pub fn propor(&self) -> i32 {
        let mut rng = self.rng.lock().expect("mutex do gerador de IDs envenenado");
        rng.gen_range(ID_MINIMO..=ID_MAXIMO)
    }
}

/// Insere uma linha com ID curto, tentando novos candidatos enquanto o banco
/// acusar colisão de chave primária (`AppError::IdJaEmUso`).
///
/// A tentativa de inserção roda dentro da transação do chamador, então até as
/// linhas ainda não commitadas da mesma requisição contam para a unicidade.
pub async fn inserir_com_retentativa<T, F>(
    gerador: &GeradorDeIds,
    tabela: &'static str,
    mut tentar: F,
) -> Result<T, AppError>
where
    F: AsyncFnMut(i32) -> Result<T, AppError>,
{
    let mut tentativas: u32 = 0;

    loop {
        let id = gerador.propor();

        match tentar(id).await {
            Err(AppError::IdJaEmUso) => {
                tentativas += 1;

                if tentativas == LIMIAR_AVISO_COLISOES {
                    tracing::warn!(
                        "⚠️ {} colisões seguidas de ID na tabela '{}'; espaço de 4 dígitos sob pressão.",
                        tentativas,
                        tabela
                    );
                }

                if tentativas >= MAX_TENTATIVAS {
                    tracing::error!(
                        "🔥 Não foi possível alocar ID na tabela '{}' após {} tentativas.",
                        tabela,
                        tentativas
                    );
                    return Err(AppError::EspacoDeIdsEsgotado);
                }
            }
            resultado => return resultado,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn propoe_apenas_ids_de_4_digitos() {
        let gerador = GeradorDeIds::com_semente(7);
        for _ in 0..10_000 {
            let id = gerador.propor();
            assert!((ID_MINIMO..=ID_MAXIMO).contains(&id), "id fora da faixa: {}", id);
        }
    }

    #[test]
    fn mesma_semente_gera_a_mesma_sequencia() {
        let a = GeradorDeIds::com_semente(42);
        let b = GeradorDeIds::com_semente(42);

        let seq_a: Vec<i32> = (0..50).map(|_| a.propor()).collect();
        let seq_b: Vec<i32> = (0..50).map(|_| b.propor()).collect();
        assert_eq!(seq_a, seq_b);
    }

    #[tokio::test]
    async fn realoca_ao_colidir_e_nunca_repete_id_ja_usado() {
        let gerador = GeradorDeIds::com_semente(1);
        let mut usados: HashSet<i32> = HashSet::new();

        // Simula uma tabela: o "insert" falha quando o ID já existe.
        for _ in 0..500 {
            let id = inserir_com_retentativa(&gerador, "teste", async |candidato| {
                if usados.contains(&candidato) {
                    Err(AppError::IdJaEmUso)
                } else {
                    Ok(candidato)
                }
            })
            .await
            .unwrap();

            assert!(usados.insert(id), "id {} atribuído duas vezes", id);
        }

        assert_eq!(usados.len(), 500);
    }

    #[tokio::test]
    async fn desiste_quando_o_espaco_esta_esgotado() {
        let gerador = GeradorDeIds::com_semente(9);

        let resultado: Result<i32, AppError> =
            inserir_com_retentativa(&gerador, "teste", async |_| Err(AppError::IdJaEmUso)).await;

        assert!(matches!(resultado, Err(AppError::EspacoDeIdsEsgotado)));
    }

    #[tokio::test]
    async fn outros_erros_interrompem_sem_retentativa() {
        let gerador = GeradorDeIds::com_semente(3);
        let mut chamadas = 0;

        let resultado: Result<i32, AppError> =
            inserir_com_retentativa(&gerador, "teste", async |_| {
                chamadas += 1;
                Err(AppError::UsuarioNaoEncontrado)
            })
            .await;

        assert!(matches!(resultado, Err(AppError::UsuarioNaoEncontrado)));
        assert_eq!(chamadas, 1);
    }
}
