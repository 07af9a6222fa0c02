use super::{App, backup, bot, settings};
use crate::scheduler::ReplyScheduler;
use crate::ui::{self, Vista};
use colored::*;
use std::path::PathBuf;

pub fn start_panel(app: &mut App) {
    let activo = app.leer(|s| s.is_active).unwrap_or(false);
    ui::mostrar_banner(activo);
    ui::mostrar_ayuda();

    let scheduler = bot::crear_scheduler(app);

    loop {
        match ui::seleccionar_vista() {
            Vista::Dashboard => vista_dashboard(app, &scheduler),
            Vista::Entrenar => vista_entrenar(app),
            Vista::Ajustes => vista_ajustes(app),
            Vista::Salir => break,
        }
    }

    // Las respuestas ya programadas se entregan antes de salir
    let spinner = ui::crear_progreso("Entregando respuestas pendientes...");
    scheduler.finalizar();
    spinner.finish_and_clear();
    println!("{}", "👋 Hasta luego".bright_green());
}

fn vista_dashboard(app: &App, scheduler: &ReplyScheduler) {
    bot::handle_dashboard_command(app);

    let opciones = ["Enviar mensaje de prueba", "Activar/desactivar bot", "Volver"];
    loop {
        match ui::pedir_opcion("Dashboard", &opciones) {
            Some(0) => {
                let Some(texto) = ui::pedir_texto("💬 Mensaje de prueba") else {
                    continue;
                };
                match bot::enviar_prueba(app, &texto, scheduler) {
                    Ok(true) => println!(
                        "   📨 Enviado. Respuesta en {}s...",
                        app.config.reply_delay_secs
                    ),
                    Ok(false) if !texto.trim().is_empty() => {
                        println!("   📨 Enviado. {}", "El bot está inactivo.".dimmed())
                    }
                    Ok(false) => {}
                    Err(e) => eprintln!("   ❌ {}", e),
                }
            }
            Some(1) => bot::handle_toggle_command(app),
            _ => break,
        }
    }
}

fn vista_entrenar(app: &App) {
    let opciones = [
        "Escribir mensajes de ejemplo",
        "Exportar respaldo",
        "Importar respaldo",
        "Volver",
    ];
    loop {
        match ui::pedir_opcion("Entrenar bot", &opciones) {
            Some(0) => {
                ui::mostrar_instrucciones_entrenamiento();
                match ui::leer_texto_multilinea() {
                    Ok(texto) => bot::reportar_entrenamiento(app, &texto),
                    Err(e) => eprintln!("   ❌ {}", e),
                }
            }
            Some(1) => backup::handle_export_command(app, None),
            Some(2) => {
                if let Some(ruta) = ui::pedir_texto("📂 Archivo de respaldo") {
                    if !ruta.trim().is_empty() {
                        backup::handle_import_command(app, &PathBuf::from(ruta.trim()));
                    }
                }
            }
            _ => break,
        }
    }
}

fn vista_ajustes(app: &mut App) {
    settings::handle_settings_command(app, None);

    let opciones = ["Cambiar espera de respuesta", "Volver"];
    while let Some(0) = ui::pedir_opcion("Ajustes", &opciones) {
        let Some(texto) = ui::pedir_texto("⏳ Segundos (1-30)") else {
            continue;
        };
        match texto.trim().parse::<u64>() {
            Ok(secs) => settings::handle_settings_command(app, Some(secs)),
            Err(_) => eprintln!("   ❌ Valor inválido: {}", texto.trim()),
        }
    }
}
