//! Parser for the command language.
//!
//! Grammar:
//!
//! ```text
//! command    := (subtype | entity) action? paramBlock?
//! paramBlock := '[' (literal (';' literal)*)? ']'
//! ```
//!
//! A subtype as first token aliases the user entity: the command's entity is
//! forced to `usuario`, the subtype is recorded, and its original-case
//! spelling is prepended as the first parameter (the `mostrar` handler
//! filters on it). A second token that is not an action keyword leaves the
//! action unset; `Interpreter::validate` rejects such commands rather than
//! the parser. Tokens outside bracket scope after the action are ignored.

use crate::lang::lexer::tokenize;
use crate::lang::token::{ActionKw, EntityKw, SubtypeKw, Token, TokenKind, Value};
use std::fmt;

/// What a command addresses: one of the seven entities, or the reserved
/// system target used by the help command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandTarget {
    Entity(EntityKw),
    System,
}

impl CommandTarget {
    pub fn name(self) -> &'static str {
        match self {
            CommandTarget::Entity(e) => e.name(),
            CommandTarget::System => "system",
        }
    }
}

impl fmt::Display for CommandTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The closed set of dispatchable actions: the six CRUD/report actions plus
/// help.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Mostrar,
    Ver,
    Agregar,
    Modificar,
    Eliminar,
    Reporte,
    Ayuda,
}

impl From<ActionKw> for Action {
    fn from(kw: ActionKw) -> Action {
        match kw {
            ActionKw::Mostrar => Action::Mostrar,
            ActionKw::Ver => Action::Ver,
            ActionKw::Agregar => Action::Agregar,
            ActionKw::Modificar => Action::Modificar,
            ActionKw::Eliminar => Action::Eliminar,
            ActionKw::Reporte => Action::Reporte,
        }
    }
}

impl Action {
    pub fn name(self) -> &'static str {
        match self {
            Action::Mostrar => "mostrar",
            Action::Ver => "ver",
            Action::Agregar => "agregar",
            Action::Modificar => "modificar",
            Action::Eliminar => "eliminar",
            Action::Reporte => "reporte",
            Action::Ayuda => "ayuda",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One parsed instruction. Parameters are bound to entity fields strictly by
/// position, so their order must match the entity's declared field order for
/// `agregar`/`modificar`.
#[derive(Debug, Clone, PartialEq)]
pub struct Command {
    pub entity: CommandTarget,
    pub action: Option<Action>,
    pub params: Vec<Value>,
    pub subtype: Option<SubtypeKw>,
}

impl Command {
    /// The synthetic command behind the `ayuda` special.
    pub fn help() -> Command {
        Command {
            entity: CommandTarget::System,
            action: Some(Action::Ayuda),
            params: Vec::new(),
            subtype: None,
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.entity)?;
        if let Some(action) = self.action {
            write!(f, " {}", action)?;
        }
        if !self.params.is_empty() {
            let rendered: Vec<String> = self.params.iter().map(|p| p.to_string()).collect();
            write!(f, " [{}]", rendered.join("; "))?;
        }
        Ok(())
    }
}

pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    pub fn new(tokens: Vec<Token>) -> Parser {
        let tokens = tokens
            .into_iter()
            .filter(|t| t.kind != TokenKind::Eof)
            .collect();
        Parser { tokens, pos: 0 }
    }

    fn current(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn advance(&mut self) {
        self.pos += 1;
    }

    /// Parses the token stream into a command, or `None` on a malformed one.
    pub fn parse(mut self) -> Option<Command> {
        if self.tokens.len() < 2 {
            return None;
        }

        let entity;
        let mut subtype = None;
        let mut subtype_spelling = None;

        match self.current()?.kind {
            TokenKind::Subtype(st) => {
                subtype = Some(st);
                subtype_spelling = Some(self.current()?.value.clone());
                entity = CommandTarget::Entity(EntityKw::Usuario);
                self.advance();
            }
            TokenKind::Entity(e) => {
                entity = CommandTarget::Entity(e);
                self.advance();
            }
            _ => return None,
        }

        let mut action = None;
        if let Some(token) = self.current()
            && let TokenKind::Action(kw) = token.kind
        {
            action = Some(Action::from(kw));
            self.advance();
        }

        let mut params = Vec::new();
        if let Some(spelling) = subtype_spelling {
            params.push(spelling);
        }

        let mut collecting = false;
        while let Some(token) = self.current() {
            match token.kind {
                TokenKind::LBracket => collecting = true,
                TokenKind::RBracket => collecting = false,
                TokenKind::Semicolon => {}
                _ if collecting => params.push(token.value.clone()),
                _ => {}
            }
            self.advance();
        }

        Some(Command {
            entity,
            action,
            params,
            subtype,
        })
    }
}

/// Tokenizes and parses one raw command line.
pub fn parse_command(text: &str) -> Option<Command> {
    Parser::new(tokenize(text)).parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple() {
        let cmd = parse_command("usuario mostrar").expect("command");
        assert_eq!(cmd.entity, CommandTarget::Entity(EntityKw::Usuario));
        assert_eq!(cmd.action, Some(Action::Mostrar));
        assert!(cmd.params.is_empty());
        assert_eq!(cmd.subtype, None);
    }

    #[test]
    fn test_parse_with_id() {
        let cmd = parse_command("usuario ver [5]").expect("command");
        assert_eq!(cmd.action, Some(Action::Ver));
        assert_eq!(cmd.params, vec![Value::Int(5)]);
    }

    #[test]
    fn test_parse_subtype_prepends_param() {
        let cmd = parse_command("Cliente mostrar").expect("command");
        assert_eq!(cmd.entity, CommandTarget::Entity(EntityKw::Usuario));
        assert_eq!(cmd.subtype, Some(SubtypeKw::Cliente));
        // Original spelling, not the canonical one.
        assert_eq!(cmd.params, vec![Value::Text("Cliente".into())]);
    }

    #[test]
    fn test_parse_unknown_first_token_fails() {
        assert_eq!(parse_command("asdfghjkl"), None);
        assert_eq!(parse_command("mostrar usuario"), None);
    }

    #[test]
    fn test_parse_too_few_tokens_fails() {
        assert_eq!(parse_command("usuario"), None);
        assert_eq!(parse_command(""), None);
    }

    #[test]
    fn test_parse_missing_action_survives() {
        let cmd = parse_command("usuario [5]").expect("command");
        assert_eq!(cmd.action, None);
        assert_eq!(cmd.params, vec![Value::Int(5)]);
    }

    #[test]
    fn test_parse_tokens_outside_brackets_ignored() {
        let cmd = parse_command("usuario ver basura [5] extra").expect("command");
        assert_eq!(cmd.params, vec![Value::Int(5)]);
    }

    #[test]
    fn test_display_round_trips_shape() {
        let cmd = parse_command("usuario agregar [Juan; 5]").expect("command");
        assert_eq!(cmd.to_string(), "usuario agregar [Juan; 5]");
    }
}
