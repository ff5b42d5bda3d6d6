// src/services/join.rs
//
// Resolução de chaves estrangeiras em memória. O cliente de dados não faz
// join no servidor, então cada serviço busca as entidades referenciadas numa
// segunda ida ao banco e monta um mapa id -> linha. Linha cuja chave não
// aparece no mapa fica de fora da agregação (é pulada, não zerada).

use std::collections::{HashMap, HashSet};
use std::hash::Hash;

// Coleta os valores distintos da chave estrangeira, preservando a ordem de
// primeira aparição (o desempate estável dos rankings depende disso).
pub fn foreign_keys<R, K, F>(rows: &[R], key: F) -> Vec<K>
where
    K: Eq + Hash + Clone,
    F: Fn(&R) -> Option<&K>,
{
    let mut seen = HashSet::new();
    let mut keys = Vec::new();
    for row in rows {
        if let Some(k) = key(row) {
            if seen.insert(k.clone()) {
                keys.push(k.clone());
            }
        }
    }
    keys
}

// Monta o mapa id -> linha da entidade alvo. O mapa vale só para a requisição
// corrente: é a fotografia do momento da busca, sem cache entre requisições.
pub fn build_lookup<T, K, F>(targets: Vec<T>, id: F) -> HashMap<K, T>
where
    K: Eq + Hash,
    F: Fn(&T) -> K,
{
    targets.into_iter().map(|t| (id(&t), t)).collect()
}
