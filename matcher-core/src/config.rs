//! # Configuração do Matcher
//!
//! Superfície de configuração aceita na construção e imutável a partir daí.
//! As coerções de forma da configuração crua ("string ou lista", "valor
//! único ou mapeamento") são resolvidas uma única vez aqui, na fronteira —
//! a lógica interna do matcher só enxerga as formas canônicas tipadas.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::attr::AttrSpec;
use crate::fuzzy::FuzzyParams;

/// Valor de configuração que aceita uma string solta ou uma lista.
///
/// Uma string solta é tratada como lista de um elemento.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

impl OneOrMany {
    /// Forma canônica: sempre uma lista ordenada.
    pub fn into_vec(self) -> Vec<String> {
        match self {
            OneOrMany::One(s) => vec![s],
            OneOrMany::Many(v) => v,
        }
    }
}

impl From<&str> for OneOrMany {
    fn from(s: &str) -> Self {
        OneOrMany::One(s.to_string())
    }
}

impl From<Vec<String>> for OneOrMany {
    fn from(v: Vec<String>) -> Self {
        OneOrMany::Many(v)
    }
}

/// Configuração completa do [`GenericMatcher`](crate::matcher::GenericMatcher).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MatcherConfig {
    /// Rótulo → lista de termos a procurar (matching exato ou fuzzy).
    pub terms: BTreeMap<String, OneOrMany>,
    /// Rótulo → lista de padrões regex. Espaço de nomes independente de
    /// `terms`: um mesmo rótulo pode aparecer nos dois.
    pub regex: BTreeMap<String, OneOrMany>,
    /// Atributo de matching: valor único ou mapeamento por rótulo.
    pub attr: AttrSpec,
    /// Usa o motor aproximado para os termos (global: não há escolha por
    /// rótulo). Emite um aviso de desempenho.
    pub fuzzy: bool,
    /// Parâmetros do motor aproximado; `None` usa os padrões
    /// (razão mínima 90, sem diferenciar maiúsculas).
    pub fuzzy_params: Option<FuzzyParams>,
    /// Aplica o filtro guloso de sobreposição à saída.
    pub filter_matches: bool,
    /// Restringe a varredura às sentenças que contêm entidades
    /// pré-existentes no documento.
    pub on_ents_only: bool,
    /// Nomes dos estágios de pipeline a montante (usado para avisar quando
    /// NORM é solicitado sem estágio de normalização).
    pub pipeline: Vec<String>,
}

/// Resolve o mapeamento cru rótulo → `OneOrMany` na forma canônica
/// rótulo → lista.
pub(crate) fn to_lists(raw: BTreeMap<String, OneOrMany>) -> BTreeMap<String, Vec<String>> {
    raw.into_iter().map(|(k, v)| (k, v.into_vec())).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attr::AttrSpec;

    #[test]
    fn test_one_or_many_coercion() {
        assert_eq!(OneOrMany::from("a").into_vec(), vec!["a"]);
        assert_eq!(
            OneOrMany::Many(vec!["a".into(), "b".into()]).into_vec(),
            vec!["a", "b"]
        );
    }

    #[test]
    fn test_deserialize_scalar_term_and_attr() {
        // String solta para termos, valor único para attr
        let config: MatcherConfig = serde_json::from_str(
            r#"{
                "terms": {"medicamento": "aspirina"},
                "attr": "TEXT"
            }"#,
        )
        .unwrap();

        let terms = to_lists(config.terms);
        assert_eq!(terms["medicamento"], vec!["aspirina"]);
        assert!(matches!(config.attr, AttrSpec::Uniform(ref v) if v == "TEXT"));
        assert!(!config.fuzzy);
        assert!(!config.filter_matches);
    }

    #[test]
    fn test_deserialize_list_and_mapping_forms() {
        let config: MatcherConfig = serde_json::from_str(
            r#"{
                "terms": {"medicamento": ["aspirina", "dipirona"]},
                "regex": {"dose": ["\\d+mg", "\\d+ml"]},
                "attr": {"term_attr": "NORM", "dose": "TEXT"},
                "fuzzy": true,
                "fuzzy_params": {"min_ratio": 85.0},
                "filter_matches": true,
                "on_ents_only": true,
                "pipeline": ["normalizer"]
            }"#,
        )
        .unwrap();

        assert_eq!(to_lists(config.terms)["medicamento"].len(), 2);
        assert_eq!(to_lists(config.regex)["dose"].len(), 2);
        assert!(matches!(config.attr, AttrSpec::PerLabel(_)));

        let params = config.fuzzy_params.unwrap();
        assert_eq!(params.min_ratio, 85.0);
        // Campo omitido em fuzzy_params cai no padrão
        assert!(params.ignore_case);
    }

    #[test]
    fn test_default_config() {
        let config = MatcherConfig::default();
        assert!(config.terms.is_empty());
        assert!(config.regex.is_empty());
        assert!(!config.fuzzy);
        assert!(!config.filter_matches);
        assert!(!config.on_ents_only);
    }
}
