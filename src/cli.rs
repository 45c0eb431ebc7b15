//! CLI definitions and dispatch for the `taller` binary.
//!
//! `init` creates the database, `exec` runs one command and exits, `run`
//! starts the interactive session. The session is the transport seam: the
//! production deployment feeds commands in from a mail daemon, which stays
//! outside this crate.

use crate::core::auth;
use crate::core::config::Settings;
use crate::core::db;
use crate::core::error::TallerError;
use crate::core::output;
use crate::interp::interpreter::{ExecContext, Interpreter, Outcome};
use crate::lang::parser::{Command, parse_command};
use crate::lang::token::{SpecialKw, TokenKind, lookup_keyword};
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Parser, Debug)]
#[clap(
    name = "taller",
    version = env!("CARGO_PKG_VERSION"),
    about = "Sistema de taller mecánico: intérprete de comandos CRUD en español."
)]
pub struct Cli {
    /// Ruta al archivo de configuración (por defecto `taller.toml`).
    #[clap(long, global = true)]
    pub config: Option<PathBuf>,
    #[clap(subcommand)]
    pub command: CliCommand,
}

#[derive(Subcommand, Debug)]
pub enum CliCommand {
    /// Crea la base de datos y aplica el esquema.
    Init,
    /// Sesión interactiva: lee comandos línea por línea.
    Run {
        /// Autenticarse como este usuario (requiere --password).
        #[clap(long)]
        as_email: Option<String>,
        #[clap(long)]
        password: Option<String>,
    },
    /// Ejecuta un solo comando y termina.
    Exec {
        /// Texto del comando, p. ej. "usuario mostrar".
        #[clap(value_name = "COMANDO")]
        text: String,
        #[clap(long, value_enum, default_value = "text")]
        format: OutputFormat,
    },
}

pub fn run(cli: Cli) -> Result<(), TallerError> {
    let settings = Settings::load(cli.config.as_deref())?;

    match cli.command {
        CliCommand::Init => {
            db::initialize_db(&settings.database.path)?;
            println!(
                "Base de datos inicializada en {}",
                settings.database.path.display()
            );
            Ok(())
        }
        CliCommand::Run { as_email, password } => {
            let interpreter = Interpreter::open(&settings.database.path)?;
            let ctx = build_context(&interpreter, &settings, as_email, password)?;
            repl(&interpreter, &ctx)
        }
        CliCommand::Exec { text, format } => {
            let interpreter = Interpreter::open(&settings.database.path)?;
            let ctx = operator_context(&settings);
            let outcome = run_line(&interpreter, &ctx, &text);
            print_outcome(&outcome, format)?;
            if !outcome.success {
                // Outcome already printed, signal failure via exit code only.
                std::process::exit(1);
            }
            Ok(())
        }
    }
}

fn operator_context(settings: &Settings) -> ExecContext {
    ExecContext {
        user_id: None,
        nombre: settings.operator.nombre.clone(),
        email: settings.operator.email.clone(),
        tipo: settings.operator.tipo.clone(),
    }
}

/// Context from `--as-email` credentials, or the configured operator.
fn build_context(
    interpreter: &Interpreter,
    settings: &Settings,
    as_email: Option<String>,
    password: Option<String>,
) -> Result<ExecContext, TallerError> {
    let Some(email) = as_email else {
        return Ok(operator_context(settings));
    };
    let password = password.ok_or_else(|| {
        TallerError::Validation("--as-email requiere --password".to_string())
    })?;

    let users = interpreter.user_store()?;
    let user = auth::authenticate(users.as_ref(), &email, &password)?
        .ok_or_else(|| TallerError::Validation("credenciales inválidas".to_string()))?;

    let field = |key: &str| {
        user.get(key)
            .and_then(|v| v.as_str())
            .unwrap_or_default()
            .to_string()
    };
    Ok(ExecContext {
        user_id: user.get("id").and_then(|v| v.as_i64()),
        nombre: field("nombre"),
        email: field("email"),
        tipo: field("tipo"),
    })
}

/// Resolves the line: specials are handled at this layer, everything else
/// goes through parse → interpret.
fn run_line(interpreter: &Interpreter, ctx: &ExecContext, line: &str) -> Outcome {
    match parse_command(line) {
        Some(command) => interpreter.interpret(&command, ctx),
        None => Outcome::fail(format!(
            "Comando no reconocido: '{}'. Escriba 'ayuda' para ver ejemplos.",
            line.trim()
        )),
    }
}

fn special_of(line: &str) -> Option<SpecialKw> {
    let word = line.trim();
    match lookup_keyword(word) {
        Some(TokenKind::Special(kw)) => Some(kw),
        _ => None,
    }
}

fn repl(interpreter: &Interpreter, ctx: &ExecContext) -> Result<(), TallerError> {
    println!("Taller Mecánico. Escriba 'ayuda' para ver comandos, 'salir' para terminar.");
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("taller> ");
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break; // EOF
        }
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match special_of(line) {
            Some(SpecialKw::Salir) => break,
            Some(SpecialKw::Limpiar) => {
                // ANSI clear screen + cursor home.
                print!("\x1b[2J\x1b[1;1H");
                stdout.flush()?;
                continue;
            }
            Some(SpecialKw::Ayuda) => {
                let outcome = interpreter.interpret(&Command::help(), ctx);
                print_outcome(&outcome, OutputFormat::Text)?;
                continue;
            }
            None => {}
        }

        let outcome = run_line(interpreter, ctx, line);
        print_outcome(&outcome, OutputFormat::Text)?;
    }

    println!("Hasta luego.");
    Ok(())
}

fn print_outcome(outcome: &Outcome, format: OutputFormat) -> Result<(), TallerError> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(outcome)?);
        }
        OutputFormat::Text => {
            if outcome.success {
                println!("{} {}", "✓".green(), outcome.message);
            } else {
                println!("{} {}", "✗".red(), outcome.message);
            }
            if let Some(data) = &outcome.data {
                println!("{}", output::render_data(data));
            }
        }
    }
    Ok(())
}
