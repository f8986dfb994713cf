//! # Motor Fuzzy — Matching Aproximado de Termos
//!
//! Variante aproximada do motor de frases: em vez de igualdade exata, cada
//! par de tokens alinhados (padrão × documento) é comparado pela razão de
//! similaridade do `rapidfuzz` (escala 0–100, baseada em distância de
//! edição). Um padrão casa quando **todos** os seus tokens atingem a razão
//! mínima configurada.
//!
//! Isso captura erros de digitação comuns em texto clínico ("asprina" casa
//! com o termo "aspirina" com razão ≈ 93), ao custo de uma varredura
//! materialmente mais cara que a exata.
//!
//! Diferente do motor exato, os matches já reportam o rótulo como string —
//! não há internação numérica a resolver.

use std::ops::Range;

use rapidfuzz::fuzz;
use serde::{Deserialize, Serialize};

use crate::attr::Attr;
use crate::doc::Doc;

/// Parâmetros do matching aproximado.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FuzzyParams {
    /// Razão mínima de similaridade (escala 0–100) que cada par de tokens
    /// alinhados precisa atingir.
    pub min_ratio: f64,
    /// Compara sem diferenciar maiúsculas de minúsculas.
    pub ignore_case: bool,
}

impl Default for FuzzyParams {
    fn default() -> Self {
        Self {
            min_ratio: 90.0,
            ignore_case: true,
        }
    }
}

/// Correspondência do motor fuzzy.
#[derive(Debug, Clone, PartialEq)]
pub struct FuzzyMatch {
    /// Rótulo registrado (reportado diretamente, sem lookup).
    pub label: String,
    pub start: usize,
    pub end: usize,
    /// Menor razão entre os pares de tokens alinhados do match.
    pub ratio: f64,
}

/// Motor de matching aproximado de frases.
#[derive(Debug)]
pub struct FuzzyMatcher {
    attr: Attr,
    params: FuzzyParams,
    patterns: Vec<(String, Vec<String>)>,
}

impl FuzzyMatcher {
    pub fn new(attr: Attr, params: FuzzyParams) -> Self {
        Self {
            attr,
            params,
            patterns: Vec::new(),
        }
    }

    /// Registra uma lista de padrões tokenizados sob um rótulo.
    pub fn add(&mut self, label: &str, patterns: Vec<Vec<String>>) {
        for pattern in patterns {
            if !pattern.is_empty() {
                self.patterns.push((label.to_string(), pattern));
            }
        }
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Varre um intervalo de tokens, na mesma ordem determinística do motor
    /// exato (posição crescente, depois ordem de registro).
    pub fn find(&self, doc: &Doc, range: Range<usize>) -> Vec<FuzzyMatch> {
        let mut matches = Vec::new();
        for start in range.clone() {
            for (label, pattern) in &self.patterns {
                let end = start + pattern.len();
                if end > range.end {
                    continue;
                }
                if let Some(ratio) = self.window_ratio(doc, start, pattern) {
                    matches.push(FuzzyMatch {
                        label: label.clone(),
                        start,
                        end,
                        ratio,
                    });
                }
            }
        }
        matches
    }

    /// Razão mínima entre os pares alinhados da janela, ou `None` se algum
    /// par ficar abaixo do limiar.
    fn window_ratio(&self, doc: &Doc, start: usize, pattern: &[String]) -> Option<f64> {
        let mut worst = 100.0_f64;
        for (i, expected) in pattern.iter().enumerate() {
            let observed = doc.token_attr(start + i, self.attr);
            // `rapidfuzz` devolve a razão normalizada em 0.0–1.0; o motor
            // trabalha na escala 0–100.
            let ratio = if self.params.ignore_case {
                fuzz::ratio(
                    expected.to_lowercase().chars(),
                    observed.to_lowercase().chars(),
                ) * 100.0
            } else {
                fuzz::ratio(expected.chars(), observed.chars()) * 100.0
            };
            if ratio < self.params.min_ratio {
                return None;
            }
            worst = worst.min(ratio);
        }
        Some(worst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pattern(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    fn matcher_with(min_ratio: f64) -> FuzzyMatcher {
        let mut matcher = FuzzyMatcher::new(
            Attr::Text,
            FuzzyParams {
                min_ratio,
                ignore_case: true,
            },
        );
        matcher.add("medicamento", vec![pattern(&["aspirina"])]);
        matcher
    }

    #[test]
    fn test_misspelling_above_threshold() {
        // "asprina" × "aspirina": uma deleção → razão ≈ 93
        let doc = Doc::from_text("Paciente toma asprina diariamente");
        let matches = matcher_with(90.0).find(&doc, 0..doc.len());

        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].label, "medicamento");
        assert_eq!((matches[0].start, matches[0].end), (2, 3));
        assert!(matches[0].ratio >= 90.0 && matches[0].ratio < 100.0);
    }

    #[test]
    fn test_misspelling_below_raised_threshold() {
        let doc = Doc::from_text("Paciente toma asprina diariamente");
        assert!(matcher_with(99.0).find(&doc, 0..doc.len()).is_empty());
    }

    #[test]
    fn test_exact_occurrence_scores_full_ratio() {
        let doc = Doc::from_text("Paciente toma aspirina diariamente");
        let matches = matcher_with(90.0).find(&doc, 0..doc.len());
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].ratio, 100.0);
    }

    #[test]
    fn test_ignore_case() {
        let doc = Doc::from_text("Paciente toma ASPIRINA diariamente");
        assert_eq!(matcher_with(95.0).find(&doc, 0..doc.len()).len(), 1);

        let mut sensitive = FuzzyMatcher::new(
            Attr::Text,
            FuzzyParams {
                min_ratio: 95.0,
                ignore_case: false,
            },
        );
        sensitive.add("medicamento", vec![pattern(&["aspirina"])]);
        assert!(sensitive.find(&doc, 0..doc.len()).is_empty());
    }

    #[test]
    fn test_multiword_pattern_requires_every_token() {
        let mut matcher = FuzzyMatcher::new(Attr::Text, FuzzyParams::default());
        matcher.add("medicamento", vec![pattern(&["acido", "acetilsalicilico"])]);

        // Primeiro token quase igual, segundo completamente diferente
        let doc = Doc::from_text("tomou acids paracetamol ontem");
        assert!(matcher.find(&doc, 0..doc.len()).is_empty());

        let doc = Doc::from_text("tomou acido acetilsalicilco ontem");
        assert_eq!(matcher.find(&doc, 0..doc.len()).len(), 1);
    }
}
