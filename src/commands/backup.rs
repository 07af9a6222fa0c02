use super::App;
use crate::store;
use crate::ui;
use chrono::Utc;
use colored::*;
use std::fs;
use std::path::{Path, PathBuf};

/// Escribe el respaldo en `destino` (o en el nombre por defecto dentro del
/// directorio de datos) y devuelve la ruta final.
pub fn exportar(app: &App, destino: Option<&Path>) -> anyhow::Result<PathBuf> {
    let ahora = Utc::now();
    let json = app.leer(|s| store::exportar(s, ahora))??;

    let path = match destino {
        Some(p) => p.to_path_buf(),
        None => app.data_dir.join(store::nombre_respaldo(ahora)),
    };
    fs::write(&path, json)?;
    Ok(path)
}

/// Reemplaza el estado con el contenido de un respaldo.
///
/// Un respaldo inválido dispara exactamente una alerta y deja el estado
/// (en memoria y en disco) sin cambios. Devuelve si se importó.
pub fn aplicar_importacion(app: &App, contenido: &str, alertar: &mut dyn FnMut(&str)) -> bool {
    let nuevo = match app.leer(|actual| store::importar(actual, contenido)) {
        Ok(Ok(estado)) => estado,
        Ok(Err(_)) => {
            alertar("Invalid backup file");
            return false;
        }
        Err(e) => {
            alertar(&e.to_string());
            return false;
        }
    };

    match app.modificar(|s| *s = nuevo) {
        Ok(()) => true,
        Err(e) => {
            alertar(&format!("No se pudo guardar el respaldo importado: {}", e));
            false
        }
    }
}

pub fn handle_export_command(app: &App, output: Option<&Path>) {
    match exportar(app, output) {
        Ok(path) => println!("   ✅ Respaldo exportado en: {}", path.display().to_string().cyan()),
        Err(e) => eprintln!("   ❌ Error al exportar: {}", e),
    }
}

pub fn handle_import_command(app: &App, file: &Path) {
    let contenido = match fs::read_to_string(file) {
        Ok(c) => c,
        Err(_) => {
            ui::alerta("Invalid backup file");
            return;
        }
    };

    if aplicar_importacion(app, &contenido, &mut |m: &str| ui::alerta(m)) {
        let total = app.leer(|s| s.messages.len()).unwrap_or(0);
        println!("   ✅ Respaldo importado ({} mensajes).", total.to_string().green());
    }
}
