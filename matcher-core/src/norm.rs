//! # Normalização — a Visão NORM dos Tokens
//!
//! Estágio de pipeline que preenche a forma normalizada (`norm`) de cada
//! token: minúsculas e dobra de acentos do português. É essa visão que o
//! atributo `NORM` usa no matching, tornando os padrões robustos a
//! variações de caixa e acentuação ("Ácido" casa com "acido").
//!
//! Se o estágio não for executado, `norm` permanece idêntica ao texto cru —
//! o matching prossegue, mas o resolvedor de atributos avisa.

use crate::doc::Doc;

/// Nome do estágio de normalização, verificado pelo resolvedor de atributos
/// quando NORM é solicitado.
pub const NORMALIZER_STAGE: &str = "normalizer";

/// Dobra um caractere acentuado do português para a forma base.
fn fold_char(c: char) -> char {
    match c {
        'á' | 'à' | 'â' | 'ã' | 'ä' => 'a',
        'é' | 'è' | 'ê' | 'ë' => 'e',
        'í' | 'ì' | 'î' | 'ï' => 'i',
        'ó' | 'ò' | 'ô' | 'õ' | 'ö' => 'o',
        'ú' | 'ù' | 'û' | 'ü' => 'u',
        'ç' => 'c',
        'ñ' => 'n',
        _ => c,
    }
}

/// Normaliza uma string: minúsculas + dobra de acentos.
///
/// Usada tanto para os tokens dos documentos quanto para os tokens dos
/// padrões de termos quando o atributo de termos é NORM — os dois lados da
/// comparação precisam viver no mesmo espaço.
pub fn fold(text: &str) -> String {
    text.to_lowercase().chars().map(fold_char).collect()
}

/// Aplica a normalização a todos os tokens do documento.
pub fn normalize(doc: &mut Doc) {
    for token in &mut doc.tokens {
        token.norm = fold(&token.text);
    }
}
