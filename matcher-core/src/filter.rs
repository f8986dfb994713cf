//! # Filtro de Sobreposição — Seleção Gulosa de Spans
//!
//! Os motores podem produzir candidatos que disputam os mesmos tokens
//! (ex: "ácido acetilsalicílico" e "ácido"). Este filtro resolve os
//! conflitos com uma política gulosa, determinística e reprodutível:
//!
//! 1. Ordenação estável por comprimento decrescente — empates preservam a
//!    ordem de chegada (exato/fuzzy antes de regex, cada um em ordem de
//!    descoberta).
//! 2. Varredura: aceita um span se nenhum de seus tokens já foi ocupado
//!    por um span aceito; caso contrário, rejeita.
//! 3. Reordena os aceitos pela posição no documento para apresentação.
//!
//! O resultado é livre de sobreposições por construção, mas não é uma
//! solução ótima global (não maximiza cobertura).

use std::cmp::Reverse;
use std::collections::HashSet;

use crate::span::Span;

/// Seleciona um subconjunto de spans livre de sobreposições.
///
/// Quando o filtro está desabilitado na configuração, o chamador
/// simplesmente não invoca esta função — a identidade é o caminho padrão.
pub fn filter_spans(spans: Vec<Span>) -> Vec<Span> {
    let mut candidates = spans;
    // sort_by_key é estável: empates de comprimento mantêm a ordem de entrada
    candidates.sort_by_key(|span| Reverse(span.len()));

    let mut occupied: HashSet<usize> = HashSet::new();
    let mut accepted = Vec::new();
    for span in candidates {
        if (span.start..span.end).any(|i| occupied.contains(&i)) {
            continue;
        }
        occupied.extend(span.start..span.end);
        accepted.push(span);
    }

    accepted.sort_by_key(|span| span.start);
    accepted
}
