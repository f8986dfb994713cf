//! # Motor Exato — Matching de Sequências de Tokens
//!
//! Registra padrões como sequências de tokens sob um rótulo e os localiza
//! por igualdade token a token contra a visão textual escolhida (TEXT ou
//! NORM). É o caminho barato do matching de termos: um gazetteer de
//! n-gramas varrido posição a posição.
//!
//! Internamente os rótulos são internados em identificadores numéricos; os
//! matches reportam o identificador e o chamador o resolve de volta para a
//! string via [`PhraseMatcher::resolve`].

use std::ops::Range;

use crate::attr::Attr;
use crate::doc::Doc;

/// Correspondência crua do motor exato: identificador interno do rótulo e
/// intervalo de tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhraseMatch {
    pub label_id: usize,
    pub start: usize,
    pub end: usize,
}

/// Motor de matching exato de frases.
///
/// Construído uma vez na compilação dos padrões e somente lido depois disso.
#[derive(Debug)]
pub struct PhraseMatcher {
    attr: Attr,
    /// Tabela de internação: identificador → rótulo.
    labels: Vec<String>,
    /// Padrões registrados: (identificador do rótulo, tokens do padrão).
    patterns: Vec<(usize, Vec<String>)>,
}

impl PhraseMatcher {
    /// Cria um motor vazio que compara contra o atributo dado.
    pub fn new(attr: Attr) -> Self {
        Self {
            attr,
            labels: Vec::new(),
            patterns: Vec::new(),
        }
    }

    /// Registra uma lista de padrões (cada um já tokenizado) sob um rótulo.
    ///
    /// Padrões vazios são descartados. O registro é independente de ordem
    /// entre rótulos distintos.
    pub fn add(&mut self, label: &str, patterns: Vec<Vec<String>>) {
        let id = self.intern(label);
        for pattern in patterns {
            if !pattern.is_empty() {
                self.patterns.push((id, pattern));
            }
        }
    }

    /// Resolve um identificador interno de volta para o rótulo registrado.
    pub fn resolve(&self, label_id: usize) -> &str {
        &self.labels[label_id]
    }

    /// Quantidade de padrões registrados.
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Varre um intervalo de tokens do documento.
    ///
    /// Os matches são reportados em ordem determinística: posição inicial
    /// crescente e, na mesma posição, ordem de registro dos padrões.
    pub fn find(&self, doc: &Doc, range: Range<usize>) -> Vec<PhraseMatch> {
        let mut matches = Vec::new();
        for start in range.clone() {
            for (label_id, pattern) in &self.patterns {
                let end = start + pattern.len();
                if end > range.end {
                    continue;
                }
                let hit = pattern
                    .iter()
                    .enumerate()
                    .all(|(i, expected)| doc.token_attr(start + i, self.attr) == expected);
                if hit {
                    matches.push(PhraseMatch {
                        label_id: *label_id,
                        start,
                        end,
                    });
                }
            }
        }
        matches
    }

    fn intern(&mut self, label: &str) -> usize {
        if let Some(id) = self.labels.iter().position(|l| l == label) {
            return id;
        }
        self.labels.push(label.to_string());
        self.labels.len() - 1
    }
}
