//! # Atributos de Matching — TEXT vs NORM
//!
//! Cada rótulo é comparado contra uma das duas representações textuais do
//! documento:
//!
//! | Atributo | Representação                                    |
//! |----------|--------------------------------------------------|
//! | TEXT     | Texto cru, exatamente como aparece no documento  |
//! | NORM     | Forma normalizada (minúsculas, sem acentos)      |
//!
//! A configuração aceita um valor único (aplicado a todos os rótulos) ou um
//! mapeamento por rótulo. Este módulo resolve essa forma crua em um
//! [`AttrMap`] canônico e imutável, validando os valores e acumulando avisos
//! estruturados — a lógica interna do matcher nunca reinspeciona a forma crua.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigWarning};
use crate::norm::NORMALIZER_STAGE;

/// Chave reservada do mapeamento de atributos que designa o atributo usado
/// pelo matching de termos (os termos compartilham um único atributo,
/// diferente dos regex, que podem escolher individualmente).
pub const TERM_ATTR: &str = "term_attr";

/// Atributo padrão quando o mapeamento não cobre um rótulo.
pub const DEFAULT_ATTR: Attr = Attr::Norm;

/// Representação textual contra a qual um rótulo é comparado.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Attr {
    /// Texto cru do documento.
    Text,
    /// Texto normalizado (preenchido pelo estágio [`normalize`](crate::norm::normalize)).
    Norm,
}

impl Attr {
    /// Nome canônico do atributo ("TEXT" ou "NORM").
    pub fn name(&self) -> &'static str {
        match self {
            Attr::Text => "TEXT",
            Attr::Norm => "NORM",
        }
    }

    /// Interpreta um valor vindo da configuração, sem diferenciar maiúsculas.
    ///
    /// Qualquer valor fora de {TEXT, NORM} é um erro fatal de configuração.
    pub fn parse(key: &str, value: &str) -> Result<Self, ConfigError> {
        match value.to_uppercase().as_str() {
            "TEXT" => Ok(Attr::Text),
            "NORM" => Ok(Attr::Norm),
            _ => Err(ConfigError::UnsupportedAttr {
                key: key.to_string(),
                value: value.to_string(),
            }),
        }
    }
}

/// Forma crua da configuração de atributos: um valor único ou um mapeamento
/// por rótulo (com a chave reservada [`TERM_ATTR`] para os termos).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttrSpec {
    /// Um único atributo aplicado a todos os rótulos de regex e aos termos.
    Uniform(String),
    /// Atributo escolhido rótulo a rótulo; ausências recebem [`DEFAULT_ATTR`].
    PerLabel(BTreeMap<String, String>),
}

impl Default for AttrSpec {
    fn default() -> Self {
        AttrSpec::Uniform(DEFAULT_ATTR.name().to_string())
    }
}

/// Mapeamento de atributos já resolvido e validado.
///
/// Criado uma única vez na construção do matcher e imutável a partir daí.
#[derive(Debug, Clone)]
pub struct AttrMap {
    /// Atributo compartilhado por todos os rótulos de termos.
    pub term: Attr,
    /// Atributo individual de cada rótulo de regex.
    pub regex: BTreeMap<String, Attr>,
}

/// Resolve a forma crua [`AttrSpec`] no [`AttrMap`] canônico.
///
/// Função pura dos seus argumentos: além do mapa resolvido, retorna a lista
/// de avisos não-fatais encontrados (chaves desconhecidas, NORM solicitado
/// sem estágio de normalização no `pipeline`).
pub fn resolve(
    spec: &AttrSpec,
    regex_labels: &[String],
    pipeline: &[String],
) -> Result<(AttrMap, Vec<ConfigWarning>), ConfigError> {
    let mut warnings = Vec::new();

    let map = match spec {
        AttrSpec::Uniform(value) => {
            let attr = Attr::parse(TERM_ATTR, value)?;
            AttrMap {
                term: attr,
                regex: regex_labels
                    .iter()
                    .map(|label| (label.clone(), attr))
                    .collect(),
            }
        }
        AttrSpec::PerLabel(raw) => {
            let term = match raw.get(TERM_ATTR) {
                Some(value) => Attr::parse(TERM_ATTR, value)?,
                None => DEFAULT_ATTR,
            };

            let mut regex = BTreeMap::new();
            for label in regex_labels {
                let attr = match raw.get(label) {
                    Some(value) => Attr::parse(label, value)?,
                    None => DEFAULT_ATTR,
                };
                regex.insert(label.clone(), attr);
            }

            // Chaves fora de regex ∪ {term_attr} são toleradas, mas avisadas
            let unknown: Vec<String> = raw
                .keys()
                .filter(|k| k.as_str() != TERM_ATTR && !regex_labels.contains(k))
                .cloned()
                .collect();
            if !unknown.is_empty() {
                warnings.push(ConfigWarning::UnknownAttrKeys(unknown));
            }

            AttrMap { term, regex }
        }
    };

    let wants_norm = map.term == Attr::Norm || map.regex.values().any(|a| *a == Attr::Norm);
    if wants_norm && !pipeline.iter().any(|stage| stage == NORMALIZER_STAGE) {
        warnings.push(ConfigWarning::NormWithoutNormalizer(
            NORMALIZER_STAGE.to_string(),
        ));
    }

    Ok((map, warnings))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    fn normalizer_pipeline() -> Vec<String> {
        vec![NORMALIZER_STAGE.to_string()]
    }

    #[test]
    fn test_uniform_broadcasts_to_every_label() {
        let spec = AttrSpec::Uniform("TEXT".to_string());
        let (map, warnings) =
            resolve(&spec, &labels(&["dose", "via"]), &normalizer_pipeline()).unwrap();

        assert_eq!(map.term, Attr::Text);
        assert_eq!(map.regex["dose"], Attr::Text);
        assert_eq!(map.regex["via"], Attr::Text);
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_partial_mapping_fills_default() {
        let mut raw = BTreeMap::new();
        raw.insert("dose".to_string(), "TEXT".to_string());
        let spec = AttrSpec::PerLabel(raw);

        let (map, _) = resolve(&spec, &labels(&["dose", "via"]), &normalizer_pipeline()).unwrap();

        // "via" e term_attr ausentes do mapeamento → padrão NORM
        assert_eq!(map.regex["dose"], Attr::Text);
        assert_eq!(map.regex["via"], DEFAULT_ATTR);
        assert_eq!(map.term, DEFAULT_ATTR);
    }

    #[test]
    fn test_values_are_case_insensitive() {
        let spec = AttrSpec::Uniform("norm".to_string());
        let (map, _) = resolve(&spec, &[], &normalizer_pipeline()).unwrap();
        assert_eq!(map.term, Attr::Norm);
    }

    #[test]
    fn test_invalid_uniform_value_is_fatal() {
        let spec = AttrSpec::Uniform("LEMMA".to_string());
        let err = resolve(&spec, &[], &[]).unwrap_err();
        assert!(matches!(err, ConfigError::UnsupportedAttr { .. }));
    }

    #[test]
    fn test_invalid_mapping_value_is_fatal() {
        let mut raw = BTreeMap::new();
        raw.insert("dose".to_string(), "SHAPE".to_string());
        let spec = AttrSpec::PerLabel(raw);

        let err = resolve(&spec, &labels(&["dose"]), &[]).unwrap_err();
        assert!(matches!(err, ConfigError::UnsupportedAttr { .. }));
    }

    #[test]
    fn test_unknown_keys_warn_but_are_ignored() {
        let mut raw = BTreeMap::new();
        raw.insert("dose".to_string(), "TEXT".to_string());
        raw.insert("inexistente".to_string(), "TEXT".to_string());
        let spec = AttrSpec::PerLabel(raw);

        let (map, warnings) =
            resolve(&spec, &labels(&["dose"]), &normalizer_pipeline()).unwrap();

        assert_eq!(map.regex.len(), 1);
        assert_eq!(
            warnings,
            vec![ConfigWarning::UnknownAttrKeys(vec![
                "inexistente".to_string()
            ])]
        );
    }

    #[test]
    fn test_norm_without_normalizer_warns() {
        let spec = AttrSpec::Uniform("NORM".to_string());
        let (_, warnings) = resolve(&spec, &[], &[]).unwrap();
        assert!(warnings
            .iter()
            .any(|w| matches!(w, ConfigWarning::NormWithoutNormalizer(_))));
    }

    #[test]
    fn test_text_only_does_not_warn_about_normalizer() {
        let spec = AttrSpec::Uniform("TEXT".to_string());
        let (_, warnings) = resolve(&spec, &labels(&["dose"]), &[]).unwrap();
        assert!(warnings.is_empty());
    }
}
