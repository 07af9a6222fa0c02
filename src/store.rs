//! Persistencia local del estado del bot
//!
//! El estado completo vive en un único archivo JSON (`.stylebot/state.json`).
//! `serializar` y `deserializar` son funciones puras; `SessionStore` solo
//! agrega la lectura/escritura del archivo.

use crate::ml::patterns::StyleProfile;
use crate::session::{BotState, Message};
use anyhow::Context;
use chrono::{DateTime, SecondsFormat, Utc};
use colored::Colorize;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub fn serializar(state: &BotState) -> anyhow::Result<String> {
    Ok(serde_json::to_string(state)?)
}

pub fn deserializar(content: &str) -> anyhow::Result<BotState> {
    Ok(serde_json::from_str(content)?)
}

pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    /// `state_file` es relativo a `data_dir`
    pub fn new(data_dir: &Path, state_file: &str) -> Self {
        Self {
            path: data_dir.join(state_file),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Carga el estado guardado. Sin archivo, o con un archivo corrupto,
    /// se parte de un estado vacío.
    pub fn cargar(&self) -> BotState {
        let content = match fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(_) => return BotState::default(),
        };

        match deserializar(&content) {
            Ok(state) => state,
            Err(e) => {
                println!(
                    "{}",
                    format!("   ⚠️  Estado guardado ilegible ({}). Se inicia una sesión nueva.", e)
                        .yellow()
                );
                BotState::default()
            }
        }
    }

    pub fn guardar(&self, state: &BotState) -> anyhow::Result<()> {
        if let Some(dir) = self.path.parent() {
            if !dir.exists() {
                fs::create_dir_all(dir)?;
            }
        }
        let content = serializar(state)?;
        fs::write(&self.path, content)
            .with_context(|| format!("No se pudo escribir {}", self.path.display()))?;
        Ok(())
    }
}

/// Respaldo exportado: el estado más la fecha de exportación
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Backup<'a> {
    messages: &'a [Message],
    style_data: &'a StyleProfile,
    is_active: bool,
    export_date: String,
}

/// Campos aceptados al importar; los que faltan toman un valor por defecto
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ImportedBackup {
    messages: Option<Vec<Message>>,
    style_data: Option<StyleProfile>,
    is_active: Option<bool>,
}

/// Genera el JSON del respaldo (indentado a 2 espacios)
pub fn exportar(state: &BotState, fecha: DateTime<Utc>) -> anyhow::Result<String> {
    let backup = Backup {
        messages: &state.messages,
        style_data: &state.style_data,
        is_active: state.is_active,
        export_date: fecha.to_rfc3339_opts(SecondsFormat::Millis, true),
    };
    Ok(serde_json::to_string_pretty(&backup)?)
}

pub fn nombre_respaldo(fecha: DateTime<Utc>) -> String {
    format!("stylebot-backup-{}.json", fecha.timestamp_millis())
}

/// Construye el estado resultante de importar `content` sobre `actual`.
///
/// - `messages` ausente: lista vacía
/// - `styleData` ausente: se conserva el perfil actual
/// - `isActive` ausente: inactivo
///
/// Cualquier JSON inválido (o que no sea un objeto) es un error y `actual`
/// no se toca.
pub fn importar(actual: &BotState, content: &str) -> anyhow::Result<BotState> {
    let value: serde_json::Value =
        serde_json::from_str(content).context("El archivo no es JSON válido")?;
    if !value.is_object() {
        anyhow::bail!("El respaldo debe ser un objeto JSON");
    }

    let data: ImportedBackup =
        serde_json::from_value(value).context("El respaldo no tiene el formato esperado")?;

    Ok(BotState {
        messages: data.messages.unwrap_or_default(),
        style_data: data.style_data.unwrap_or_else(|| actual.style_data.clone()),
        is_active: data.is_active.unwrap_or(false),
    })
}
