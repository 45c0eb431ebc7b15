//! Application settings, loaded from `taller.toml` with environment
//! overrides.
//!
//! Every field has a default so a missing config file is not an error; the
//! `TALLER_DB` variable overrides the database path for ad-hoc runs.

use crate::core::error::TallerError;
use crate::core::schemas;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE_NAME: &str = "taller.toml";

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Settings {
    #[serde(default)]
    pub database: DatabaseSettings,
    #[serde(default)]
    pub operator: OperatorSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseSettings {
    #[serde(default = "default_db_path")]
    pub path: PathBuf,
}

impl Default for DatabaseSettings {
    fn default() -> DatabaseSettings {
        DatabaseSettings {
            path: default_db_path(),
        }
    }
}

fn default_db_path() -> PathBuf {
    PathBuf::from(schemas::TALLER_DB_NAME)
}

/// Identity attached to the execution context. The interpreter reads it but
/// never enforces permissions; it exists for the authorization layer above.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OperatorSettings {
    #[serde(default = "default_operator_nombre")]
    pub nombre: String,
    #[serde(default)]
    pub email: String,
    #[serde(default = "default_operator_tipo")]
    pub tipo: String,
}

impl Default for OperatorSettings {
    fn default() -> OperatorSettings {
        OperatorSettings {
            nombre: default_operator_nombre(),
            email: String::new(),
            tipo: default_operator_tipo(),
        }
    }
}

fn default_operator_nombre() -> String {
    "Operador".to_string()
}

fn default_operator_tipo() -> String {
    "propietario".to_string()
}

impl Settings {
    /// Loads settings from `path` (or `taller.toml` in the working directory
    /// when absent), falling back to defaults when no file exists, then
    /// applies environment overrides.
    pub fn load(path: Option<&Path>) -> Result<Settings, TallerError> {
        let file = path
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from(CONFIG_FILE_NAME));

        let mut settings = if file.exists() {
            let raw = fs::read_to_string(&file)?;
            toml::from_str(&raw)
                .map_err(|e| TallerError::Config(format!("{}: {}", file.display(), e)))?
        } else if path.is_some() {
            // An explicit path that does not exist is an operator mistake.
            return Err(TallerError::Config(format!(
                "no existe el archivo de configuración {}",
                file.display()
            )));
        } else {
            Settings::default()
        };

        if let Ok(db) = env::var("TALLER_DB")
            && !db.is_empty()
        {
            settings.database.path = PathBuf::from(db);
        }

        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_file_absent() {
        let settings = Settings::default();
        assert_eq!(settings.database.path, PathBuf::from("taller.db"));
        assert_eq!(settings.operator.tipo, "propietario");
    }

    #[test]
    fn test_load_from_file() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let file = tmp.path().join(CONFIG_FILE_NAME);
        fs::write(
            &file,
            "[database]\npath = \"data/taller.db\"\n\n[operator]\nnombre = \"Ana\"\nemail = \"ana@taller.bo\"\n",
        )
        .expect("write config");

        let settings = Settings::load(Some(&file)).expect("load");
        assert_eq!(settings.database.path, PathBuf::from("data/taller.db"));
        assert_eq!(settings.operator.nombre, "Ana");
        assert_eq!(settings.operator.email, "ana@taller.bo");
        // Unset fields keep their defaults.
        assert_eq!(settings.operator.tipo, "propietario");
    }

    #[test]
    fn test_explicit_missing_file_is_an_error() {
        let result = Settings::load(Some(Path::new("/nonexistent/taller.toml")));
        assert!(matches!(result, Err(TallerError::Config(_))));
    }
}
