//! # StyleBot - Auto-Reply Bot que aprende tu estilo
//!
//! Analiza mensajes de ejemplo para construir un perfil de estilo (longitud,
//! emojis, frases comunes, puntuación) y responde mensajes de prueba con
//! respuestas predefinidas adaptadas a ese perfil. Todo es local.

use clap::Parser;
use commands::{App, Cli, Commands};

// Módulos
pub mod commands;
pub mod config;
pub mod ml;
pub mod scheduler;
pub mod session;
pub mod store;
pub mod ui;

fn main() {
    let cli = Cli::parse();

    let data_dir = match cli.dir {
        Some(dir) => dir,
        None => match std::env::current_dir() {
            Ok(dir) => dir,
            Err(e) => {
                eprintln!("❌ No se pudo determinar el directorio actual: {}", e);
                std::process::exit(1);
            }
        },
    };

    if !data_dir.is_dir() {
        eprintln!("❌ El directorio {} no existe.", data_dir.display());
        std::process::exit(1);
    }

    let mut app = App::abrir(&data_dir);
    app.seed = cli.seed;

    match cli.command {
        Some(Commands::Panel) | None => {
            commands::panel::start_panel(&mut app);
        }
        Some(Commands::Dashboard) => {
            commands::bot::handle_dashboard_command(&app);
        }
        Some(Commands::Train { file }) => {
            commands::bot::handle_train_command(&app, file.as_deref());
        }
        Some(Commands::Send { text }) => {
            commands::bot::handle_send_command(&app, &text);
        }
        Some(Commands::Toggle) => {
            commands::bot::handle_toggle_command(&app);
        }
        Some(Commands::Settings { delay }) => {
            commands::settings::handle_settings_command(&mut app, delay);
        }
        Some(Commands::Export { output }) => {
            commands::backup::handle_export_command(&app, output.as_deref());
        }
        Some(Commands::Import { file }) => {
            commands::backup::handle_import_command(&app, &file);
        }
    }
}
