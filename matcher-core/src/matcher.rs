//! # GenericMatcher — Orquestração dos Motores de Matching
//!
//! O orquestrador central do crate. Na construção, resolve os atributos,
//! compila os padrões de termos (tokenizados) e de regex nos motores e
//! congela tudo; por documento, varre os motores (documento inteiro ou
//! apenas as sentenças com entidades pré-existentes), unifica os matches em
//! [`Span`]s rotulados e, opcionalmente, resolve sobreposições com o filtro
//! guloso.
//!
//! ## Fluxo por documento
//!
//! 1. Escopos: documento inteiro, ou sentenças distintas com entidades
//!    (deduplicadas, em ordem de descoberta) no modo `on_ents_only`.
//! 2. Motor de termos (exato ou fuzzy) sobre cada escopo.
//! 3. Motor regex sobre cada escopo — spans de regex sempre depois dos de
//!    termos na sequência resultante; essa ordem é o desempate do filtro.
//! 4. Filtro de sobreposição, se habilitado.
//!
//! O estado compilado é somente-leitura após a construção e pode ser
//! compartilhado entre documentos processados em paralelo
//! ([`annotate_batch`](GenericMatcher::annotate_batch)).

use std::collections::HashSet;
use std::ops::Range;

use rayon::prelude::*;
use tracing::warn;

use crate::attr::{self, Attr, AttrMap};
use crate::config::{to_lists, MatcherConfig};
use crate::doc::Doc;
use crate::error::{ConfigError, ConfigWarning};
use crate::filter::filter_spans;
use crate::fuzzy::FuzzyMatcher;
use crate::norm;
use crate::phrase::PhraseMatcher;
use crate::regexp::RegexMatcher;
use crate::span::{MatchSource, Span};
use crate::tokenizer::tokenize;

/// Motor escolhido para os termos. A escolha é global: não existe fuzzy por
/// rótulo.
#[derive(Debug)]
enum TermEngine {
    Exact(PhraseMatcher),
    Fuzzy(FuzzyMatcher),
}

/// Matcher genérico de termos e regex com estado compilado imutável.
#[derive(Debug)]
pub struct GenericMatcher {
    attrs: AttrMap,
    term_engine: TermEngine,
    regex_engine: RegexMatcher,
    filter_matches: bool,
    on_ents_only: bool,
    warnings: Vec<ConfigWarning>,
}

impl GenericMatcher {
    /// Constrói o matcher a partir da configuração, compilando todos os
    /// padrões. Fail-fast: qualquer valor de atributo inválido ou regex que
    /// não compila aborta aqui, antes de qualquer documento.
    ///
    /// Os avisos não-fatais são registrados via `tracing` e ficam
    /// disponíveis em [`warnings`](Self::warnings).
    pub fn new(config: MatcherConfig) -> Result<Self, ConfigError> {
        let terms = to_lists(config.terms);
        let regex = to_lists(config.regex);

        let regex_labels: Vec<String> = regex.keys().cloned().collect();
        let (attrs, mut warnings) = attr::resolve(&config.attr, &regex_labels, &config.pipeline)?;

        // Compilação dos termos: cada expressão vira uma sequência de tokens
        // na visão do atributo de termos
        let mut term_engine = if config.fuzzy {
            warnings.push(ConfigWarning::FuzzySlow);
            TermEngine::Fuzzy(FuzzyMatcher::new(
                attrs.term,
                config.fuzzy_params.unwrap_or_default(),
            ))
        } else {
            TermEngine::Exact(PhraseMatcher::new(attrs.term))
        };

        for (label, expressions) in &terms {
            let patterns: Vec<Vec<String>> = expressions
                .iter()
                .map(|e| compile_term(e, attrs.term))
                .collect();
            match &mut term_engine {
                TermEngine::Exact(engine) => engine.add(label, patterns),
                TermEngine::Fuzzy(engine) => engine.add(label, patterns),
            }
        }

        // Compilação dos regex: cada rótulo preso ao seu próprio atributo
        let mut regex_engine = RegexMatcher::new();
        for (label, patterns) in &regex {
            regex_engine.add(label, patterns, attrs.regex[label])?;
        }

        for warning in &warnings {
            warn!("{}", warning);
        }

        Ok(Self {
            attrs,
            term_engine,
            regex_engine,
            filter_matches: config.filter_matches,
            on_ents_only: config.on_ents_only,
            warnings,
        })
    }

    /// Avisos não-fatais acumulados na construção.
    pub fn warnings(&self) -> &[ConfigWarning] {
        &self.warnings
    }

    /// Mapeamento de atributos resolvido.
    pub fn attrs(&self) -> &AttrMap {
        &self.attrs
    }

    /// Localiza os spans no documento, em ordem determinística.
    ///
    /// Não modifica o documento. Retorna primeiro todos os spans do motor de
    /// termos (escopos em ordem de descoberta), depois todos os de regex —
    /// ou, com o filtro habilitado, o subconjunto livre de sobreposições em
    /// ordem de documento.
    pub fn process(&self, doc: &Doc) -> Vec<Span> {
        let scopes = self.scopes(doc);

        let mut spans = Vec::new();
        for scope in &scopes {
            match &self.term_engine {
                TermEngine::Exact(engine) => {
                    for m in engine.find(doc, scope.clone()) {
                        // O motor exato reporta identificadores internos;
                        // resolvemos de volta para o rótulo registrado
                        spans.push(Span::new(
                            m.start,
                            m.end,
                            engine.resolve(m.label_id),
                            MatchSource::Exact,
                        ));
                    }
                }
                TermEngine::Fuzzy(engine) => {
                    for m in engine.find(doc, scope.clone()) {
                        spans.push(Span::new(m.start, m.end, m.label, MatchSource::Fuzzy));
                    }
                }
            }
        }
        for scope in &scopes {
            spans.extend(self.regex_engine.find(doc, scope.clone()));
        }

        if self.filter_matches {
            spans = filter_spans(spans);
        }
        spans
    }

    /// Anota o documento: executa [`process`](Self::process) e **substitui**
    /// a lista inteira de entidades pelo resultado.
    ///
    /// Destrutivo por concepção: não funde com as entidades anteriores —
    /// mesmo no modo `on_ents_only`, em que elas definiram o escopo da
    /// varredura, só sobrevivem se os motores as reencontrarem.
    pub fn annotate(&self, doc: &mut Doc) {
        doc.ents = self.process(doc);
    }

    /// Anota um lote de documentos em paralelo.
    ///
    /// O estado compilado é somente-leitura, então é compartilhado entre as
    /// threads sem qualquer bloqueio; cada documento é anotado de forma
    /// independente e atômica.
    pub fn annotate_batch(&self, docs: &mut [Doc]) {
        docs.par_iter_mut().for_each(|doc| self.annotate(doc));
    }

    /// Escopos de varredura do documento.
    ///
    /// Modo normal: o documento inteiro, uma vez. Modo `on_ents_only`: as
    /// sentenças distintas que contêm ao menos uma entidade pré-existente,
    /// deduplicadas pela identidade da sentença (uma sentença com cinco
    /// entidades é visitada uma única vez), em ordem de descoberta. Sem
    /// entidades, nenhuma sentença é visitada.
    fn scopes(&self, doc: &Doc) -> Vec<Range<usize>> {
        if !self.on_ents_only {
            return vec![0..doc.len()];
        }

        let mut seen = HashSet::new();
        let mut scopes = Vec::new();
        for ent in &doc.ents {
            if let Some(index) = doc.sent_index_of(ent.start) {
                if seen.insert(index) {
                    scopes.push(doc.sents[index].clone());
                }
            }
        }
        scopes
    }
}

/// Tokeniza uma expressão de termo na visão do atributo de termos.
///
/// Com atributo NORM, os tokens do padrão passam pela mesma dobra usada nos
/// documentos — os dois lados da comparação ficam no mesmo espaço.
fn compile_term(expression: &str, attr: Attr) -> Vec<String> {
    tokenize(expression)
        .into_iter()
        .map(|token| match attr {
            Attr::Text => token.text,
            Attr::Norm => norm::fold(&token.text),
        })
        .collect()
}
