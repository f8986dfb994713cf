//! # Motor Regex — Padrões sobre a Visão Textual
//!
//! Registra listas de expressões regulares sob um rótulo, cada rótulo preso
//! a um atributo (TEXT ou NORM) escolhido individualmente. Na varredura, a
//! visão textual do intervalo é materializada com um mapa de offsets por
//! token e cada match de bytes é convertido de volta para um intervalo de
//! tokens por expansão: o span reportado cobre todo token tocado pelo match.
//!
//! A compilação acontece uma única vez no registro; um padrão que não
//! compila é erro fatal de configuração.

use std::ops::Range;

use regex::Regex;

use crate::attr::Attr;
use crate::doc::Doc;
use crate::error::ConfigError;
use crate::span::{MatchSource, Span};

#[derive(Debug)]
struct RegexEntry {
    label: String,
    attr: Attr,
    patterns: Vec<Regex>,
}

/// Motor de matching por expressões regulares.
#[derive(Debug, Default)]
pub struct RegexMatcher {
    entries: Vec<RegexEntry>,
}

impl RegexMatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compila e registra uma lista de padrões sob um rótulo, preso ao
    /// atributo dado.
    pub fn add(&mut self, label: &str, patterns: &[String], attr: Attr) -> Result<(), ConfigError> {
        let compiled = patterns
            .iter()
            .map(|p| {
                Regex::new(p).map_err(|source| ConfigError::InvalidRegex {
                    label: label.to_string(),
                    source,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        self.entries.push(RegexEntry {
            label: label.to_string(),
            attr,
            patterns: compiled,
        });
        Ok(())
    }

    /// Quantidade de rótulos registrados.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Varre um intervalo de tokens do documento.
    ///
    /// Os spans saem já rotulados, em ordem determinística: rótulos na ordem
    /// de registro, padrões na ordem declarada, matches em ordem posicional.
    pub fn find(&self, doc: &Doc, range: Range<usize>) -> Vec<Span> {
        let mut spans = Vec::new();
        for entry in &self.entries {
            let (view, offsets) = doc.attr_view(range.clone(), entry.attr);
            for regex in &entry.patterns {
                for m in regex.find_iter(&view) {
                    if let Some((first, last)) = align(&offsets, m.start(), m.end()) {
                        spans.push(Span::new(
                            range.start + first,
                            range.start + last,
                            entry.label.clone(),
                            MatchSource::Regex,
                        ));
                    }
                }
            }
        }
        spans
    }
}

/// Converte um intervalo de bytes da visão textual para um intervalo de
/// tokens, expandindo até cobrir todo token que o match toca.
///
/// Retorna `None` quando o match cai inteiramente entre tokens (apenas
/// espaçamento) — não há token a reportar.
fn align(offsets: &[(usize, usize)], start: usize, end: usize) -> Option<(usize, usize)> {
    let mut first = None;
    let mut last = None;
    for (i, &(token_start, token_end)) in offsets.iter().enumerate() {
        if token_end > start && token_start < end {
            if first.is_none() {
                first = Some(i);
            }
            last = Some(i);
        }
    }
    Some((first?, last? + 1))
}
