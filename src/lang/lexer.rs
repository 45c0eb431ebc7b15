//! Lexer for the command language.
//!
//! Whitespace outside brackets separates words. A word is matched against the
//! keyword table case-insensitively (keeping its original spelling); unmatched
//! words are coerced to numeric or text literals. A `[` switches to a raw
//! bracket mode that consumes everything up to the matching `]`, splitting on
//! `;`: segments are trimmed, empty segments dropped, and each survivor goes
//! through the same numeric-vs-text coercion as bare words. Nested brackets
//! are not part of the grammar; the inner content is consumed as plain
//! characters up to the first `]`.

use crate::lang::token::{Token, TokenKind, Value, lookup_keyword};

pub struct Lexer {
    chars: Vec<char>,
    pos: usize,
}

impl Lexer {
    pub fn new(text: &str) -> Lexer {
        Lexer {
            chars: text.trim().chars().collect(),
            pos: 0,
        }
    }

    fn current(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn advance(&mut self) {
        self.pos += 1;
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.current(), Some(c) if c.is_whitespace()) {
            self.advance();
        }
    }

    /// Reads a word up to whitespace or one of `[` `]` `;`.
    fn read_word(&mut self) -> (String, usize) {
        let start = self.pos;
        let mut word = String::new();
        while let Some(c) = self.current() {
            if c.is_whitespace() || c == '[' || c == ']' || c == ';' {
                break;
            }
            word.push(c);
            self.advance();
        }
        (word, start)
    }

    /// Reads a bracketed parameter list. Assumes the current char is `[`.
    fn read_bracket_content(&mut self) -> (Vec<Value>, usize) {
        let start = self.pos;
        let mut params = Vec::new();
        let mut segment = String::new();

        self.advance(); // consume '['

        while let Some(c) = self.current() {
            if c == ']' {
                break;
            }
            if c == ';' {
                push_segment(&mut params, &segment);
                segment.clear();
            } else {
                segment.push(c);
            }
            self.advance();
        }
        push_segment(&mut params, &segment);

        if self.current() == Some(']') {
            self.advance();
        }

        (params, start)
    }

    /// Tokenizes the whole input, always ending with exactly one end-marker.
    pub fn tokenize(mut self) -> Vec<Token> {
        let mut tokens = Vec::new();

        while self.current().is_some() {
            self.skip_whitespace();
            let Some(c) = self.current() else { break };

            if c == '[' {
                let (params, start) = self.read_bracket_content();
                tokens.push(Token::new(
                    TokenKind::LBracket,
                    Value::Text("[".into()),
                    start,
                ));
                let last = params.len().saturating_sub(1);
                for (i, param) in params.into_iter().enumerate() {
                    let kind = match param {
                        Value::Text(_) => TokenKind::Text,
                        _ => TokenKind::Number,
                    };
                    tokens.push(Token::new(kind, param, start));
                    if i < last {
                        tokens.push(Token::new(
                            TokenKind::Semicolon,
                            Value::Text(";".into()),
                            start,
                        ));
                    }
                }
                tokens.push(Token::new(
                    TokenKind::RBracket,
                    Value::Text("]".into()),
                    start,
                ));
                continue;
            }

            let (word, start) = self.read_word();
            if word.is_empty() {
                // Stray ']' or ';' outside a bracket. Skip it.
                self.advance();
                continue;
            }

            if let Some(kind) = lookup_keyword(&word) {
                // Keywords keep the operator's original spelling.
                tokens.push(Token::new(kind, Value::Text(word), start));
            } else {
                let value = Value::coerce(&word);
                let kind = match value {
                    Value::Text(_) => TokenKind::Text,
                    _ => TokenKind::Number,
                };
                tokens.push(Token::new(kind, value, start));
            }
        }

        tokens.push(Token::new(TokenKind::Eof, Value::Text(String::new()), self.pos));
        tokens
    }
}

fn push_segment(params: &mut Vec<Value>, segment: &str) {
    let trimmed = segment.trim();
    if !trimmed.is_empty() {
        params.push(Value::coerce(trimmed));
    }
}

/// Tokenizes one raw command line.
pub fn tokenize(text: &str) -> Vec<Token> {
    Lexer::new(text).tokenize()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lang::token::{ActionKw, EntityKw};

    #[test]
    fn test_simple_command() {
        let tokens = tokenize("usuario mostrar");
        assert_eq!(tokens.len(), 3);
        assert_eq!(tokens[0].kind, TokenKind::Entity(EntityKw::Usuario));
        assert_eq!(tokens[1].kind, TokenKind::Action(ActionKw::Mostrar));
        assert_eq!(tokens[2].kind, TokenKind::Eof);
    }

    #[test]
    fn test_keyword_preserves_original_case() {
        let tokens = tokenize("USUARIO Mostrar");
        assert_eq!(tokens[0].kind, TokenKind::Entity(EntityKw::Usuario));
        assert_eq!(tokens[0].value, Value::Text("USUARIO".into()));
        assert_eq!(tokens[1].value, Value::Text("Mostrar".into()));
    }

    #[test]
    fn test_bracket_params() {
        let tokens = tokenize("usuario agregar [Juan; juan@mail.com; pass123]");
        let texts: Vec<_> = tokens
            .iter()
            .filter(|t| t.kind == TokenKind::Text)
            .map(|t| t.value.as_text())
            .collect();
        assert_eq!(texts, vec!["Juan", "juan@mail.com", "pass123"]);
        assert!(tokens.iter().any(|t| t.kind == TokenKind::LBracket));
        assert!(tokens.iter().any(|t| t.kind == TokenKind::RBracket));
        assert_eq!(
            tokens.iter().filter(|t| t.kind == TokenKind::Semicolon).count(),
            2
        );
    }

    #[test]
    fn test_bracket_numeric_coercion() {
        let tokens = tokenize("vehiculo agregar [1; SCZ-1234; Toyota; 2020; 45000.5]");
        let numbers: Vec<_> = tokens
            .iter()
            .filter(|t| t.kind == TokenKind::Number)
            .map(|t| t.value.clone())
            .collect();
        assert_eq!(
            numbers,
            vec![Value::Int(1), Value::Int(2020), Value::Float(45000.5)]
        );
    }

    #[test]
    fn test_bracket_empty_segments_dropped() {
        let tokens = tokenize("usuario agregar [a;; ;b]");
        let literals: Vec<_> = tokens
            .iter()
            .filter(|t| t.kind == TokenKind::Text)
            .map(|t| t.value.as_text())
            .collect();
        assert_eq!(literals, vec!["a", "b"]);
    }

    #[test]
    fn test_unterminated_bracket() {
        let tokens = tokenize("usuario ver [5");
        assert!(tokens.iter().any(|t| t.kind == TokenKind::Number));
        assert_eq!(tokens.last().map(|t| t.kind.clone()), Some(TokenKind::Eof));
    }

    #[test]
    fn test_non_ascii_text() {
        let tokens = tokenize("usuario agregar [José María; jose@mail.com]");
        let texts: Vec<_> = tokens
            .iter()
            .filter(|t| t.kind == TokenKind::Text)
            .map(|t| t.value.as_text())
            .collect();
        assert!(texts.contains(&"José María".to_string()));
    }

    #[test]
    fn test_empty_input_yields_only_eof() {
        let tokens = tokenize("");
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].kind, TokenKind::Eof);

        let tokens = tokenize("   ");
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].kind, TokenKind::Eof);
    }
}
