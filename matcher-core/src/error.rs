//! # Erros e Avisos de Configuração
//!
//! Toda a validação do matcher acontece no momento da construção (fail-fast):
//! um valor de atributo inválido ou um regex que não compila aborta a criação
//! do [`GenericMatcher`](crate::matcher::GenericMatcher) antes de qualquer
//! documento ser processado.
//!
//! Problemas não-fatais (chaves desconhecidas, NORM sem normalizador, custo do
//! fuzzy) viram [`ConfigWarning`]s estruturados: eles são registrados via
//! `tracing` e ficam disponíveis no matcher construído para inspeção.

use thiserror::Error;

/// Erro fatal de configuração. Interrompe a construção do matcher.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// O valor de atributo não é `TEXT` nem `NORM`.
    #[error("atributo não suportado para '{key}': '{value}' (esperado TEXT ou NORM)")]
    UnsupportedAttr { key: String, value: String },

    /// Um dos padrões regex declarados não compila.
    #[error("padrão regex inválido para o rótulo '{label}'")]
    InvalidRegex {
        label: String,
        #[source]
        source: regex::Error,
    },
}

/// Aviso não-fatal emitido durante a resolução da configuração.
///
/// A construção prossegue normalmente; o aviso apenas sinaliza algo que
/// provavelmente não é o que o usuário queria.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigWarning {
    /// Chaves de `attr` que não correspondem a nenhum rótulo de regex nem à
    /// chave reservada `term_attr`. Elas são ignoradas.
    #[error("chaves de 'attr' fora dos rótulos declarados serão ignoradas: {0:?}")]
    UnknownAttrKeys(Vec<String>),

    /// O atributo NORM foi solicitado, mas nenhum estágio de normalização
    /// consta no pipeline. O matching prossegue sobre o NORM degenerado
    /// (idêntico ao texto cru).
    #[error("o atributo NORM foi solicitado, mas o estágio '{0}' não está no pipeline")]
    NormWithoutNormalizer(String),

    /// Fuzzy matching é muito mais caro que matching exato.
    #[error(
        "fuzzy matching solicitado: o tempo de processamento aumenta \
         consideravelmente (aumentos de ~60x são comuns)"
    )]
    FuzzySlow,
}
