//! # Documento — o Modelo Hospedeiro do Matching
//!
//! Um [`Doc`] reúne tudo o que o matcher precisa ler de um documento já
//! processado: a sequência ordenada de tokens, as fronteiras de sentença, a
//! lista mutável de entidades e as duas visões textuais (crua e normalizada)
//! de qualquer intervalo de tokens.
//!
//! O matcher lê tudo isso e escreve apenas `ents`, e somente ao final de
//! [`annotate`](crate::matcher::GenericMatcher::annotate).

use std::ops::Range;

use serde::{Deserialize, Serialize};

use crate::attr::Attr;
use crate::span::Span;
use crate::tokenizer::{tokenize, Token};

/// Tokens que encerram uma sentença.
const SENTENCE_ENDERS: &[&str] = &[".", "!", "?"];

/// Documento tokenizado com fronteiras de sentença e lista de entidades.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Doc {
    /// Texto original completo.
    pub text: String,
    /// Tokens em ordem, com offsets de byte no texto original.
    pub tokens: Vec<Token>,
    /// Fronteiras de sentença como intervalos `[início, fim)` de tokens.
    pub sents: Vec<Range<usize>>,
    /// Entidades anotadas sobre o documento. O matcher substitui esta lista
    /// inteira ao anotar.
    pub ents: Vec<Span>,
}

impl Doc {
    /// Constrói um documento a partir do texto bruto: tokeniza e segmenta em
    /// sentenças. A visão normalizada nasce idêntica ao texto cru; execute o
    /// estágio [`normalize`](crate::norm::normalize) para preenchê-la.
    pub fn from_text(text: &str) -> Self {
        let tokens = tokenize(text);
        let sents = sentencize(&tokens);
        Self {
            text: text.to_string(),
            tokens,
            sents,
            ents: Vec::new(),
        }
    }

    /// Quantidade de tokens do documento.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Índice da sentença que contém o token `index`.
    pub fn sent_index_of(&self, index: usize) -> Option<usize> {
        self.sents.iter().position(|s| s.contains(&index))
    }

    /// Visão textual de um único token sob o atributo escolhido.
    pub fn token_attr(&self, index: usize, attr: Attr) -> &str {
        let token = &self.tokens[index];
        match attr {
            Attr::Text => &token.text,
            Attr::Norm => &token.norm,
        }
    }

    /// Visão textual de um intervalo de tokens sob o atributo escolhido.
    ///
    /// Retorna a string da visão e, para cada token do intervalo, o intervalo
    /// de bytes que ele ocupa dentro dela — é esse mapa que permite converter
    /// um match de regex de volta para índices de tokens.
    ///
    /// Para `TEXT` a visão é a fatia exata do texto original (espaçamento
    /// preservado); para `NORM` os tokens normalizados são unidos por um
    /// espaço simples.
    pub fn attr_view(&self, range: Range<usize>, attr: Attr) -> (String, Vec<(usize, usize)>) {
        let tokens = &self.tokens[range];
        if tokens.is_empty() {
            return (String::new(), Vec::new());
        }

        match attr {
            Attr::Text => {
                let base = tokens[0].start;
                let end = tokens[tokens.len() - 1].end;
                let view = self.text[base..end].to_string();
                let offsets = tokens
                    .iter()
                    .map(|t| (t.start - base, t.end - base))
                    .collect();
                (view, offsets)
            }
            Attr::Norm => {
                let mut view = String::new();
                let mut offsets = Vec::with_capacity(tokens.len());
                for token in tokens {
                    if !view.is_empty() {
                        view.push(' ');
                    }
                    let start = view.len();
                    view.push_str(&token.norm);
                    offsets.push((start, view.len()));
                }
                (view, offsets)
            }
        }
    }
}

/// Segmenta a lista de tokens em sentenças: uma fronteira após cada token
/// finalizador (".", "!", "?").
fn sentencize(tokens: &[Token]) -> Vec<Range<usize>> {
    let mut sents = Vec::new();
    let mut start = 0;
    for (i, token) in tokens.iter().enumerate() {
        if SENTENCE_ENDERS.contains(&token.text.as_str()) {
            sents.push(start..i + 1);
            start = i + 1;
        }
    }
    if start < tokens.len() {
        sents.push(start..tokens.len());
    }
    sents
}
