//! Token and keyword definitions for the command language.
//!
//! Keywords form four closed categories (entities, user subtypes, actions,
//! specials). Matching is case-insensitive, but the token keeps the source
//! spelling so downstream consumers can echo what the operator actually wrote.

use std::fmt;

/// The seven managed business entities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKw {
    Usuario,
    Vehiculo,
    Servicio,
    Cita,
    Diagnostico,
    Orden,
    Pago,
}

impl EntityKw {
    pub const ALL: [EntityKw; 7] = [
        EntityKw::Usuario,
        EntityKw::Vehiculo,
        EntityKw::Servicio,
        EntityKw::Cita,
        EntityKw::Diagnostico,
        EntityKw::Orden,
        EntityKw::Pago,
    ];

    /// Canonical (lowercase) keyword spelling.
    pub fn name(self) -> &'static str {
        match self {
            EntityKw::Usuario => "usuario",
            EntityKw::Vehiculo => "vehiculo",
            EntityKw::Servicio => "servicio",
            EntityKw::Cita => "cita",
            EntityKw::Diagnostico => "diagnostico",
            EntityKw::Orden => "orden",
            EntityKw::Pago => "pago",
        }
    }
}

impl fmt::Display for EntityKw {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// User subtypes. They alias the user entity and constrain it by `tipo`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SubtypeKw {
    Cliente,
    Mecanico,
    Secretaria,
    Propietario,
}

impl SubtypeKw {
    pub const ALL: [SubtypeKw; 4] = [
        SubtypeKw::Cliente,
        SubtypeKw::Mecanico,
        SubtypeKw::Secretaria,
        SubtypeKw::Propietario,
    ];

    pub fn name(self) -> &'static str {
        match self {
            SubtypeKw::Cliente => "cliente",
            SubtypeKw::Mecanico => "mecanico",
            SubtypeKw::Secretaria => "secretaria",
            SubtypeKw::Propietario => "propietario",
        }
    }
}

impl fmt::Display for SubtypeKw {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The six CRUD/report action keywords.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionKw {
    Mostrar,
    Ver,
    Agregar,
    Modificar,
    Eliminar,
    Reporte,
}

impl ActionKw {
    pub fn name(self) -> &'static str {
        match self {
            ActionKw::Mostrar => "mostrar",
            ActionKw::Ver => "ver",
            ActionKw::Agregar => "agregar",
            ActionKw::Modificar => "modificar",
            ActionKw::Eliminar => "eliminar",
            ActionKw::Reporte => "reporte",
        }
    }
}

impl fmt::Display for ActionKw {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Session-level special commands, with English aliases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpecialKw {
    Ayuda,
    Salir,
    Limpiar,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    Entity(EntityKw),
    Subtype(SubtypeKw),
    Action(ActionKw),
    Special(SpecialKw),
    LBracket,
    RBracket,
    Semicolon,
    Number,
    Text,
    Eof,
}

/// A literal value carried by a token or bound to a command parameter.
///
/// Bare words and bracket segments are coerced at the lexical stage exactly
/// as the surface grammar defines it: a decimal point selects the float
/// path, otherwise integer, otherwise text.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Int(i64),
    Float(f64),
    Text(String),
}

impl Value {
    /// Coerce a trimmed word into a literal.
    pub fn coerce(word: &str) -> Value {
        if word.contains('.') {
            if let Ok(f) = word.parse::<f64>() {
                return Value::Float(f);
            }
        } else if let Ok(i) = word.parse::<i64>() {
            return Value::Int(i);
        }
        Value::Text(word.to_string())
    }

    /// Interpret the value as an integer id, if possible.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            Value::Float(f) => Some(*f as i64),
            Value::Text(s) => s.trim().parse::<i64>().ok(),
        }
    }

    pub fn as_text(&self) -> String {
        match self {
            Value::Int(i) => i.to_string(),
            Value::Float(f) => f.to_string(),
            Value::Text(s) => s.clone(),
        }
    }

    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Value::Int(i) => serde_json::Value::from(*i),
            Value::Float(f) => serde_json::Value::from(*f),
            Value::Text(s) => serde_json::Value::from(s.clone()),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(i) => write!(f, "{}", i),
            Value::Float(x) => write!(f, "{}", x),
            Value::Text(s) => f.write_str(s),
        }
    }
}

/// One lexed token. `position` is the char offset of the token start in the
/// trimmed input, kept for diagnostics.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub value: Value,
    pub position: usize,
}

impl Token {
    pub fn new(kind: TokenKind, value: Value, position: usize) -> Token {
        Token {
            kind,
            value,
            position,
        }
    }
}

/// Case-insensitive keyword lookup. Returns the token kind for a recognized
/// keyword; literal coercion is the caller's fallback.
pub fn lookup_keyword(word: &str) -> Option<TokenKind> {
    let kind = match word.to_lowercase().as_str() {
        "usuario" => TokenKind::Entity(EntityKw::Usuario),
        "vehiculo" => TokenKind::Entity(EntityKw::Vehiculo),
        "servicio" => TokenKind::Entity(EntityKw::Servicio),
        "cita" => TokenKind::Entity(EntityKw::Cita),
        "diagnostico" => TokenKind::Entity(EntityKw::Diagnostico),
        "orden" => TokenKind::Entity(EntityKw::Orden),
        "pago" => TokenKind::Entity(EntityKw::Pago),
        "cliente" => TokenKind::Subtype(SubtypeKw::Cliente),
        "mecanico" => TokenKind::Subtype(SubtypeKw::Mecanico),
        "secretaria" => TokenKind::Subtype(SubtypeKw::Secretaria),
        "propietario" => TokenKind::Subtype(SubtypeKw::Propietario),
        "mostrar" => TokenKind::Action(ActionKw::Mostrar),
        "ver" => TokenKind::Action(ActionKw::Ver),
        "agregar" => TokenKind::Action(ActionKw::Agregar),
        "modificar" => TokenKind::Action(ActionKw::Modificar),
        "eliminar" => TokenKind::Action(ActionKw::Eliminar),
        "reporte" => TokenKind::Action(ActionKw::Reporte),
        "ayuda" | "help" => TokenKind::Special(SpecialKw::Ayuda),
        "salir" | "exit" => TokenKind::Special(SpecialKw::Salir),
        "limpiar" | "clear" => TokenKind::Special(SpecialKw::Limpiar),
        _ => return None,
    };
    Some(kind)
}
