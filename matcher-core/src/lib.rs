//! # matcher-core — Detecção Configurável de Spans em Texto Clínico
//!
//! Este crate localiza ocorrências de termos de vocabulário (exatas ou
//! aproximadas) e de padrões regex em documentos já tokenizados, converte os
//! matches em spans rotulados e resolve as sobreposições em um conjunto de
//! anotações livre de conflitos.
//!
//! ## Arquitetura do Sistema
//!
//! A configuração é resolvida e compilada uma única vez; cada documento flui
//! pelos motores já congelados:
//!
//! 1.  **Configuração** ([`config`]): formas cruas ("string ou lista",
//!     "valor único ou mapeamento") viram estruturas canônicas tipadas.
//! 2.  **Resolução de atributos** ([`attr`]): decide se cada rótulo compara
//!     contra o texto cru (TEXT) ou a forma normalizada (NORM), validando
//!     fail-fast e acumulando avisos estruturados.
//! 3.  **Compilação de padrões** ([`matcher`]): termos são tokenizados e
//!     registrados no motor exato ([`phrase`]) ou aproximado ([`fuzzy`]);
//!     padrões regex são compilados no motor [`regexp`].
//! 4.  **Orquestração por documento** ([`matcher`]): os motores varrem o
//!     documento inteiro ou apenas as sentenças com entidades
//!     pré-existentes, em ordem determinística.
//! 5.  **Resolução de sobreposições** ([`filter`]): seleção gulosa por
//!     comprimento, com desempate pela ordem de chegada.
//!
//! ## Exemplo de Uso
//!
//! ```rust
//! use matcher_core::{AttrSpec, Doc, GenericMatcher, MatcherConfig, OneOrMany};
//!
//! // 1. Configuração: um rótulo de termo, atributo TEXT, filtro ligado
//! let config = MatcherConfig {
//!     terms: [("medicamento".to_string(), OneOrMany::from("aspirina"))].into(),
//!     attr: AttrSpec::Uniform("TEXT".to_string()),
//!     filter_matches: true,
//!     ..Default::default()
//! };
//!
//! // 2. Construção (compila os padrões; valida fail-fast)
//! let matcher = GenericMatcher::new(config).unwrap();
//!
//! // 3. Anota um documento: a lista de entidades é substituída
//! let mut doc = Doc::from_text("Paciente toma aspirina diariamente.");
//! matcher.annotate(&mut doc);
//!
//! assert_eq!(doc.ents.len(), 1);
//! assert_eq!(doc.ents[0].label, "medicamento");
//! ```
//!
//! ## Módulos Principais
//!
//! - [`matcher`]: orquestrador que conecta compilação, varredura e filtro.
//! - [`doc`]: modelo hospedeiro (tokens, sentenças, entidades, visões
//!   textuais).
//! - [`filter`]: o filtro guloso de sobreposição.
//! - [`norm`]: o estágio que preenche a visão NORM.

pub mod attr;
pub mod config;
pub mod doc;
pub mod error;
pub mod filter;
pub mod fuzzy;
pub mod matcher;
pub mod norm;
pub mod phrase;
pub mod regexp;
pub mod span;
pub mod tokenizer;

pub use attr::{Attr, AttrMap, AttrSpec, TERM_ATTR};
pub use config::{MatcherConfig, OneOrMany};
pub use doc::Doc;
pub use error::{ConfigError, ConfigWarning};
pub use filter::filter_spans;
pub use fuzzy::FuzzyParams;
pub use matcher::GenericMatcher;
pub use norm::{normalize, NORMALIZER_STAGE};
pub use span::{MatchSource, Span};
pub use tokenizer::{tokenize, Token};
