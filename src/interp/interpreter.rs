//! Command interpreter and dispatcher.
//!
//! `validate` is a pure admissibility check; `interpret` resolves the handler
//! by an exhaustive match over the closed action set, executes it, and
//! normalizes every outcome into the `Outcome` envelope. No error and no
//! collaborator fault ever crosses `interpret` as anything but a failure
//! envelope.

use crate::core::auth;
use crate::core::db;
use crate::core::error::TallerError;
use crate::core::store::{EntityStore, SqliteStore, audit_timestamps};
use crate::interp::schema::{EntitySchema, schema_for};
use crate::interp::validators::validate_param_count;
use crate::lang::parser::{Action, Command, CommandTarget};
use crate::lang::token::EntityKw;
use rusqlite::Connection;
use serde::Serialize;
use serde_json::{Value as JsonValue, json};
use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, Mutex};
use tracing::{error, info};

/// Identity of the operator submitting commands. Read by the interpreter,
/// enforced by nobody here; authorization is a caller concern.
#[derive(Debug, Clone, Default)]
pub struct ExecContext {
    pub user_id: Option<i64>,
    pub nombre: String,
    pub email: String,
    pub tipo: String,
}

/// The uniform result envelope. The interpreter returns nothing else.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Outcome {
    pub success: bool,
    pub message: String,
    pub data: Option<JsonValue>,
}

impl Outcome {
    pub fn ok(message: impl Into<String>, data: Option<JsonValue>) -> Outcome {
        Outcome {
            success: true,
            message: message.into(),
            data,
        }
    }

    pub fn fail(message: impl Into<String>) -> Outcome {
        Outcome {
            success: false,
            message: message.into(),
            data: None,
        }
    }
}

pub type Stores = HashMap<EntityKw, Arc<dyn EntityStore>>;

pub struct Interpreter {
    stores: Stores,
}

impl Interpreter {
    /// Builds the interpreter over a shared connection, one table-driven
    /// store per entity.
    pub fn new(conn: Arc<Mutex<Connection>>) -> Interpreter {
        let mut stores: Stores = HashMap::new();
        for entity in EntityKw::ALL {
            let schema = schema_for(entity);
            stores.insert(
                entity,
                Arc::new(SqliteStore::new(
                    Arc::clone(&conn),
                    schema.table,
                    schema.columns,
                    schema.code_prefix,
                )),
            );
        }
        Interpreter { stores }
    }

    /// Opens the database at `db_path` and builds the interpreter over it.
    pub fn open(db_path: &Path) -> Result<Interpreter, TallerError> {
        let conn = db::db_connect(db_path)?;
        Ok(Interpreter::new(Arc::new(Mutex::new(conn))))
    }

    /// Injects explicit stores. Mainly a test seam for collaborator faults.
    pub fn with_stores(stores: Stores) -> Interpreter {
        Interpreter { stores }
    }

    /// Admissibility of a parsed command: the entity must be backed by a
    /// store (or be the system target), and the action must be set. A parse
    /// that left the action unset is rejected here, not earlier.
    pub fn validate(&self, command: &Command) -> bool {
        let entity_ok = match command.entity {
            CommandTarget::Entity(e) => self.stores.contains_key(&e),
            CommandTarget::System => true,
        };
        entity_ok && command.action.is_some()
    }

    /// Executes one command, returning the uniform envelope. Total: every
    /// fault, including collaborator faults, becomes a failure `Outcome`.
    pub fn interpret(&self, command: &Command, ctx: &ExecContext) -> Outcome {
        if !self.validate(command) {
            return Outcome::fail(format!("Comando inválido: {}", command));
        }
        let Some(action) = command.action else {
            return Outcome::fail(format!("Comando inválido: {}", command));
        };

        info!(
            entity = command.entity.name(),
            action = action.name(),
            operador = %ctx.email,
            "interpretando comando"
        );

        let result = match action {
            Action::Mostrar => self.handle_mostrar(command),
            Action::Ver => self.handle_ver(command),
            Action::Agregar => self.handle_agregar(command),
            Action::Modificar => self.handle_modificar(command),
            Action::Eliminar => self.handle_eliminar(command),
            Action::Reporte => self.handle_reporte(command),
            Action::Ayuda => Ok(handle_ayuda()),
        };

        match result {
            Ok(outcome) => outcome,
            Err(TallerError::Validation(message)) => Outcome::fail(message),
            Err(e) => {
                error!(command = %command, error = %e, "fallo interno del intérprete");
                Outcome::fail(format!("Error interno: {}", e))
            }
        }
    }

    fn entity_of(&self, command: &Command) -> Result<EntityKw, TallerError> {
        match command.entity {
            CommandTarget::Entity(e) => Ok(e),
            CommandTarget::System => Err(TallerError::Validation(format!(
                "Acción no soportada para system: {}",
                command
                    .action
                    .map(|a| a.name())
                    .unwrap_or("(sin acción)")
            ))),
        }
    }

    /// The user store, exposed for the auth layer above the interpreter.
    pub fn user_store(&self) -> Result<&Arc<dyn EntityStore>, TallerError> {
        self.store_of(EntityKw::Usuario)
    }

    fn store_of(&self, entity: EntityKw) -> Result<&Arc<dyn EntityStore>, TallerError> {
        self.stores.get(&entity).ok_or_else(|| {
            TallerError::Internal(format!("entidad sin almacenamiento: {}", entity))
        })
    }

    fn handle_mostrar(&self, command: &Command) -> Result<Outcome, TallerError> {
        let entity = self.entity_of(command)?;
        let store = self.store_of(entity)?;

        let records = match command.subtype {
            Some(subtype) if entity == EntityKw::Usuario => {
                store.find_by_field("tipo", subtype.name())?
            }
            _ => store.find_all()?,
        };

        let message = format!("Se encontraron {} registro(s)", records.len());
        Ok(Outcome::ok(message, Some(json!(records))))
    }

    fn handle_ver(&self, command: &Command) -> Result<Outcome, TallerError> {
        let entity = self.entity_of(command)?;
        validate_param_count(&command.params, 1, entity.name(), "ver")?;
        let Some(id) = command.params[0].as_int() else {
            return Ok(Outcome::fail("El ID debe ser un número entero"));
        };

        match self.store_of(entity)?.find_by_id(id)? {
            Some(record) => Ok(Outcome::ok(
                format!("{} encontrado", capitalize(entity.name())),
                Some(JsonValue::Object(record)),
            )),
            None => Ok(Outcome::fail(format!(
                "No se encontró {} con ID {}",
                entity, id
            ))),
        }
    }

    fn handle_agregar(&self, command: &Command) -> Result<Outcome, TallerError> {
        let entity = self.entity_of(command)?;
        let schema = schema_for(entity);
        validate_param_count(&command.params, schema.fields.len(), entity.name(), "agregar")?;

        let mut bound = bind_fields(schema, &command.params, 0)?;

        if entity == EntityKw::Usuario {
            hash_password_field(&mut bound);
            normalize_tipo_field(&mut bound);
            // The subtype aliases the user entity; its canonical name wins
            // over whatever was bound positionally into `tipo`.
            if let Some(subtype) = command.subtype {
                set_field(&mut bound, "tipo", JsonValue::from(subtype.name()));
            }
        }

        let store = self.store_of(entity)?;
        if let Some(code) = store.generate_code() {
            bound.push(("codigo".to_string(), JsonValue::from(code)));
        }
        if let Some(state) = schema.default_state {
            bound.push(("estado".to_string(), JsonValue::from(state)));
        }
        bound.extend(audit_timestamps());

        match store.create(&bound) {
            Ok(id) => Ok(Outcome::ok(
                format!(
                    "{} creado exitosamente con ID: {}",
                    capitalize(entity.name()),
                    id
                ),
                Some(json!({ "id": id })),
            )),
            Err(e) => Ok(Outcome::fail(format!("Error al crear: {}", e))),
        }
    }

    fn handle_modificar(&self, command: &Command) -> Result<Outcome, TallerError> {
        let entity = self.entity_of(command)?;
        let schema = schema_for(entity);
        validate_param_count(
            &command.params,
            1 + schema.fields.len(),
            entity.name(),
            "modificar",
        )?;
        let Some(id) = command.params[0].as_int() else {
            return Ok(Outcome::fail("El ID debe ser un número entero"));
        };

        let mut bound = bind_fields(schema, &command.params, 1)?;
        if entity == EntityKw::Usuario {
            hash_password_field(&mut bound);
            normalize_tipo_field(&mut bound);
        }
        bound.push((
            "updated_at".to_string(),
            JsonValue::from(db::now_epoch_z()),
        ));

        match self.store_of(entity)?.update(id, &bound) {
            Ok(true) => Ok(Outcome::ok(
                format!("{} actualizado exitosamente", capitalize(entity.name())),
                None,
            )),
            Ok(false) => Ok(Outcome::fail(format!(
                "No se encontró {} con ID {}",
                entity, id
            ))),
            Err(e) => Ok(Outcome::fail(format!("Error al actualizar: {}", e))),
        }
    }

    fn handle_eliminar(&self, command: &Command) -> Result<Outcome, TallerError> {
        let entity = self.entity_of(command)?;
        validate_param_count(&command.params, 1, entity.name(), "eliminar")?;
        let Some(id) = command.params[0].as_int() else {
            return Ok(Outcome::fail("El ID debe ser un número entero"));
        };

        match self.store_of(entity)?.delete(id) {
            Ok(true) => Ok(Outcome::ok(
                format!("{} eliminado exitosamente", capitalize(entity.name())),
                None,
            )),
            Ok(false) => Ok(Outcome::fail(format!(
                "No se encontró {} con ID {}",
                entity, id
            ))),
            Err(e) => Ok(Outcome::fail(format!("Error al eliminar: {}", e))),
        }
    }

    fn handle_reporte(&self, command: &Command) -> Result<Outcome, TallerError> {
        let entity = self.entity_of(command)?;
        let schema = schema_for(entity);
        let store = self.store_of(entity)?;

        let mut data = serde_json::Map::new();
        data.insert("total".to_string(), JsonValue::from(store.count()?));

        if let Some(breakdown) = &schema.breakdown {
            for (value, key) in breakdown.buckets {
                let count = store.count_by_field(breakdown.column, value)?;
                data.insert(key.to_string(), JsonValue::from(count));
            }
        }

        Ok(Outcome::ok(
            format!("Reporte de {}s generado", entity),
            Some(JsonValue::Object(data)),
        ))
    }
}

fn handle_ayuda() -> Outcome {
    Outcome::ok(
        "Ayuda del sistema",
        Some(json!({
            "comandos_disponibles": [
                "usuario mostrar",
                "usuario ver [id]",
                "usuario agregar [nombre; email; password; telefono; direccion; tipo]",
                "vehiculo mostrar",
                "servicio mostrar",
                "cita mostrar",
                "cita reporte",
            ]
        })),
    )
}

/// Binds `params[offset..]` to the schema fields positionally and runs every
/// bound field through its validator, collecting all failures into one
/// aggregated validation error.
fn bind_fields(
    schema: &EntitySchema,
    params: &[crate::lang::token::Value],
    offset: usize,
) -> Result<Vec<(String, JsonValue)>, TallerError> {
    let mut bound = Vec::with_capacity(schema.fields.len());
    let mut errors = Vec::new();

    for (field, param) in schema.fields.iter().zip(&params[offset..]) {
        if let Some(validator) = field.validator
            && !validator(&param.as_text())
        {
            errors.push(format!("{}: valor inválido '{}'", field.name, param));
        }
        bound.push((field.name.to_string(), param.to_json()));
    }

    if errors.is_empty() {
        Ok(bound)
    } else {
        Err(TallerError::Validation(format!(
            "Errores de validación: {}",
            errors.join(", ")
        )))
    }
}

/// Swaps the raw `password` binding for a salted `password_hash`.
fn hash_password_field(bound: &mut Vec<(String, JsonValue)>) {
    if let Some(pos) = bound.iter().position(|(name, _)| name == "password") {
        let (_, raw) = bound.remove(pos);
        let raw = match raw {
            JsonValue::String(s) => s,
            other => other.to_string(),
        };
        bound.insert(
            pos,
            (
                "password_hash".to_string(),
                JsonValue::from(auth::hash_password(&raw)),
            ),
        );
    }
}

/// Stores `tipo` in canonical lowercase. The type validator accepts any
/// casing, but the `mostrar` subtype filter compares the column exactly.
fn normalize_tipo_field(bound: &mut [(String, JsonValue)]) {
    if let Some(slot) = bound.iter_mut().find(|(n, _)| n == "tipo")
        && let JsonValue::String(s) = &mut slot.1
    {
        *s = s.to_lowercase();
    }
}

fn set_field(bound: &mut [(String, JsonValue)], name: &str, value: JsonValue) {
    if let Some(slot) = bound.iter_mut().find(|(n, _)| n == name) {
        slot.1 = value;
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
