//! # Tokenizador
//!
//! Divide o texto bruto em tokens preservando os offsets de byte originais,
//! o que permite recuperar a forma de superfície exata de qualquer span.
//!
//! A segmentação parte das fronteiras de palavra Unicode (UAX #29) e aplica
//! em seguida uma passada de fusão para abreviações comuns em textos
//! clínicos ("Dr.", "mg" etc. não perdem o ponto que as acompanha).
//!
//! O tokenizador é consumido em dois pontos: na construção de documentos e
//! na compilação dos padrões de termos (cada termo vira uma sequência de
//! tokens comparável token a token com o documento).

use serde::{Deserialize, Serialize};
use unicode_segmentation::UnicodeSegmentation;

/// Um token extraído do texto original.
///
/// Carrega as duas visões textuais usadas pelo matching: `text` (cru) e
/// `norm` (normalizada). Na tokenização, `norm` nasce idêntica a `text`;
/// o estágio [`normalize`](crate::norm::normalize) a reescreve.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    /// O texto cru do token (ex: "Aspirina", "50mg", ".").
    pub text: String,
    /// A forma normalizada do token (minúsculas, sem acentos).
    pub norm: String,
    /// Índice de byte inicial no texto original (inclusivo).
    pub start: usize,
    /// Índice de byte final no texto original (exclusivo).
    pub end: usize,
    /// Índice sequencial do token na lista (0, 1, 2...).
    pub index: usize,
}

/// Abreviações comuns em textos clínicos que mantêm o ponto colado
const ABBREVIATIONS: &[&str] = &[
    "Dr", "Dra", "Sr", "Sra", "Prof", "Profa", "Enf", "Fisio",
    "mg", "mcg", "ml", "dl", "kg", "gts", "comp", "amp", "cap",
    "sol", "susp", "inj", "inal", "obs", "ex", "etc", "seg", "hs",
];

/// Tokeniza um texto preservando offsets de byte.
pub fn tokenize(text: &str) -> Vec<Token> {
    let mut tokens: Vec<Token> = Vec::new();

    for (offset, word) in text.split_word_bound_indices() {
        if word.trim().is_empty() {
            continue;
        }

        // Funde o ponto de abreviações com o token anterior (ex: "Dr" + "." → "Dr.")
        if word == "." {
            if let Some(prev) = tokens.last_mut() {
                if prev.end == offset && ABBREVIATIONS.contains(&prev.text.as_str()) {
                    prev.text.push('.');
                    prev.norm.push('.');
                    prev.end = offset + 1;
                    continue;
                }
            }
        }

        tokens.push(Token {
            text: word.to_string(),
            norm: word.to_string(),
            start: offset,
            end: offset + word.len(),
            index: 0,
        });
    }

    // Re-indexa os tokens
    for (i, token) in tokens.iter_mut().enumerate() {
        token.index = i;
    }
    tokens
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(tokens: &[Token]) -> Vec<&str> {
        tokens.iter().map(|t| t.text.as_str()).collect()
    }

    #[test]
    fn test_tokenize_basic() {
        let tokens = tokenize("Paciente toma aspirina diariamente.");
        assert_eq!(
            texts(&tokens),
            vec!["Paciente", "toma", "aspirina", "diariamente", "."]
        );
    }

    #[test]
    fn test_tokenize_preserves_offsets() {
        let text = "Tomar 50mg agora";
        let tokens = tokenize(text);
        for token in &tokens {
            assert_eq!(&text[token.start..token.end], token.text);
        }
    }

    #[test]
    fn test_tokenize_dose_stays_single_token() {
        // UAX #29 não quebra entre dígitos e letras: "50mg" é um token só
        let tokens = tokenize("Tomar 50mg agora");
        assert!(texts(&tokens).contains(&"50mg"));
    }

    #[test]
    fn test_tokenize_abbreviation_keeps_dot() {
        let tokens = tokenize("Dr. Silva prescreveu.");
        let texts = texts(&tokens);
        assert_eq!(texts[0], "Dr.");
        // O ponto final da sentença continua separado
        assert_eq!(*texts.last().unwrap(), ".");
    }

    #[test]
    fn test_tokenize_decimal_number() {
        let tokens = tokenize("dose de 1.5 ml");
        assert!(texts(&tokens).contains(&"1.5"));
    }

    #[test]
    fn test_tokenize_empty() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("   ").is_empty());
    }

    #[test]
    fn test_tokenize_indices_are_sequential() {
        let tokens = tokenize("uma frase qualquer");
        for (i, token) in tokens.iter().enumerate() {
            assert_eq!(token.index, i);
        }
    }
}
