//! # Spans — Intervalos Rotulados de Tokens
//!
//! Um [`Span`] é um intervalo semiaberto `[start, end)` de índices de tokens
//! com um rótulo associado (ex: "medicamento", "dose") e a origem da
//! detecção (exata, fuzzy ou regex).
//!
//! # Exemplo
//! Em "Paciente toma aspirina diariamente", o span da aspirina:
//! `Span { start: 2, end: 3, label: "medicamento", source: Exact }`

use serde::{Deserialize, Serialize};

use crate::doc::Doc;

/// Qual motor produziu a correspondência.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchSource {
    /// Matching exato de sequências de tokens.
    Exact,
    /// Matching aproximado (razão de similaridade acima do limiar).
    Fuzzy,
    /// Padrão regex sobre a visão textual escolhida.
    Regex,
}

/// Intervalo rotulado de tokens sobre um documento.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Span {
    /// Índice do token inicial (inclusivo).
    pub start: usize,
    /// Índice do token final (exclusivo).
    pub end: usize,
    /// Rótulo da detecção (ex: "medicamento", "dose").
    pub label: String,
    /// Motor que produziu a detecção.
    pub source: MatchSource,
}

impl Span {
    pub fn new(start: usize, end: usize, label: impl Into<String>, source: MatchSource) -> Self {
        Self {
            start,
            end,
            label: label.into(),
            source,
        }
    }

    /// Quantidade de tokens cobertos.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    /// Dois spans se sobrepõem se compartilham ao menos um índice de token.
    pub fn overlaps(&self, other: &Span) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// Texto cru coberto pelo span no documento original.
    pub fn text<'a>(&self, doc: &'a Doc) -> &'a str {
        let tokens = &doc.tokens[self.start..self.end];
        match (tokens.first(), tokens.last()) {
            (Some(first), Some(last)) => &doc.text[first.start..last.end],
            _ => "",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlaps() {
        let a = Span::new(0, 3, "a", MatchSource::Exact);
        let b = Span::new(2, 4, "b", MatchSource::Regex);
        let c = Span::new(3, 5, "c", MatchSource::Regex);

        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
        // Intervalos semiabertos: [0,3) e [3,5) não compartilham token
        assert!(!a.overlaps(&c));
    }

    #[test]
    fn test_text_slice() {
        let doc = Doc::from_text("Paciente toma aspirina diariamente.");
        let span = Span::new(1, 3, "x", MatchSource::Exact);
        assert_eq!(span.text(&doc), "toma aspirina");
    }
}
