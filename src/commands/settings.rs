use super::App;
use crate::ui;
use colored::*;

/// Cambia la espera de respuesta y la guarda en `.stylebotrc.toml`
pub fn cambiar_delay(app: &mut App, secs: u64) -> anyhow::Result<()> {
    app.config.set_reply_delay(secs)?;
    app.config.save(&app.data_dir)?;
    Ok(())
}

pub fn handle_settings_command(app: &mut App, delay: Option<u64>) {
    if let Some(secs) = delay {
        match cambiar_delay(app, secs) {
            Ok(()) => println!("   ✅ Espera de respuesta: {}s", secs.to_string().green()),
            Err(e) => eprintln!("   ❌ {}", e),
        }
    }

    if let Err(e) = app.leer(|s| ui::mostrar_ajustes(s, &app.config)) {
        eprintln!("   ❌ {}", e);
    }
}
