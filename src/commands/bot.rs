use super::App;
use crate::ml::{RandomPicker, ReplyPicker, SeededPicker};
use crate::scheduler::ReplyScheduler;
use crate::session::Message;
use crate::ui;
use colored::*;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

/// Entrena el bot y guarda el estado. Devuelve los mensajes agregados
/// (0 si el texto estaba vacío; en ese caso no se escribe nada).
pub fn entrenar(app: &App, texto: &str) -> anyhow::Result<usize> {
    if texto.trim().is_empty() {
        return Ok(0);
    }
    app.modificar(|s| s.entrenar(texto))
}

/// Registra un mensaje de prueba y, si el bot está activo, programa la
/// respuesta con la espera configurada. Devuelve si se programó respuesta.
pub fn enviar_prueba(app: &App, texto: &str, scheduler: &ReplyScheduler) -> anyhow::Result<bool> {
    if texto.trim().is_empty() {
        return Ok(false);
    }

    let responder = app.modificar(|s| {
        s.recibir(texto);
        s.debe_responder()
    })?;

    if responder {
        scheduler.programar(texto, Duration::from_secs(app.config.reply_delay_secs));
    }
    Ok(responder)
}

pub fn alternar(app: &App) -> anyhow::Result<bool> {
    app.modificar(|s| s.alternar())
}

/// Scheduler que imprime cada respuesta entregada. Con `--seed` la elección
/// de respuestas es reproducible.
pub fn crear_scheduler(app: &App) -> ReplyScheduler {
    let picker: Box<dyn ReplyPicker> = match app.seed {
        Some(seed) => Box::new(SeededPicker::new(seed)),
        None => Box::new(RandomPicker),
    };
    ReplyScheduler::iniciar(
        Arc::clone(&app.state),
        Arc::clone(&app.store),
        picker,
        |m: &Message| {
            println!("\n🤖 {}", "Respuesta automática:".green().bold());
            ui::mostrar_mensaje(m);
        },
    )
}

pub fn handle_dashboard_command(app: &App) {
    match app.leer(|s| ui::mostrar_dashboard(s)) {
        Ok(()) => {}
        Err(e) => eprintln!("   ❌ {}", e),
    }
}

pub fn handle_train_command(app: &App, file: Option<&Path>) {
    let texto = match file {
        Some(path) => std::fs::read_to_string(path),
        None => {
            ui::mostrar_instrucciones_entrenamiento();
            ui::leer_stdin_completo()
        }
    };

    let texto = match texto {
        Ok(t) => t,
        Err(e) => {
            eprintln!("   ❌ No se pudo leer el texto de entrenamiento: {}", e);
            return;
        }
    };

    reportar_entrenamiento(app, &texto);
}

pub(crate) fn reportar_entrenamiento(app: &App, texto: &str) {
    match entrenar(app, texto) {
        Ok(0) => println!("   {}", "ℹ️  No hay texto para entrenar.".yellow()),
        Ok(n) => {
            println!("   ✅ Bot entrenado con {} mensajes.", n.to_string().green().bold());
            if let Ok(perfil) = app.leer(|s| s.style_data.clone()) {
                println!(
                    "   📏 {} caracteres · 😀 {}% · ✍️  {}",
                    perfil.avg_length, perfil.emoji_usage, perfil.punctuation_style
                );
            }
        }
        Err(e) => eprintln!("   ❌ Error al guardar el entrenamiento: {}", e),
    }
}

pub fn handle_send_command(app: &App, texto: &str) {
    let scheduler = crear_scheduler(app);

    match enviar_prueba(app, texto, &scheduler) {
        Ok(true) => {
            let spinner = ui::crear_progreso(&format!(
                "Escribiendo... ({}s)",
                app.config.reply_delay_secs
            ));
            scheduler.finalizar();
            spinner.finish_and_clear();
        }
        Ok(false) => {
            if texto.trim().is_empty() {
                println!("   {}", "ℹ️  Mensaje vacío, no se envió nada.".yellow());
            } else {
                println!("   📨 Mensaje recibido. {}", "El bot está inactivo: no habrá respuesta.".dimmed());
            }
        }
        Err(e) => eprintln!("   ❌ {}", e),
    }
}

pub fn handle_toggle_command(app: &App) {
    match alternar(app) {
        Ok(activo) => println!("   💬 {}", ui::etiqueta_estado(activo)),
        Err(e) => eprintln!("   ❌ Error al guardar el estado: {}", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    struct PickerFijo;

    impl ReplyPicker for PickerFijo {
        fn pick(&mut self, _len: usize) -> usize {
            0
        }
    }

    fn app_con_delay_minimo(tmp: &TempDir) -> App {
        let mut app = App::abrir(tmp.path());
        // La espera mínima configurable es 1s; para las pruebas se usa 0
        app.config.reply_delay_secs = 0;
        app
    }

    fn scheduler_de_prueba(app: &App) -> ReplyScheduler {
        ReplyScheduler::iniciar(
            Arc::clone(&app.state),
            Arc::clone(&app.store),
            Box::new(PickerFijo),
            |_| {},
        )
    }

    #[test]
    fn test_entrenar_persiste_estado() {
        let tmp = TempDir::new().unwrap();
        let app = App::abrir(tmp.path());

        assert_eq!(entrenar(&app, "hola amigo\nnos vemos").unwrap(), 2);

        let recargado = App::abrir(tmp.path());
        assert_eq!(recargado.leer(|s| s.messages.len()).unwrap(), 2);
    }

    #[test]
    fn test_entrenar_vacio_no_escribe_archivo() {
        let tmp = TempDir::new().unwrap();
        let app = App::abrir(tmp.path());

        assert_eq!(entrenar(&app, "  \n ").unwrap(), 0);
        assert!(!app.store.path().exists());
    }

    #[test]
    fn test_bot_inactivo_nunca_responde() {
        let tmp = TempDir::new().unwrap();
        let app = app_con_delay_minimo(&tmp);
        let scheduler = scheduler_de_prueba(&app);

        assert!(!enviar_prueba(&app, "¿hola?", &scheduler).unwrap());
        scheduler.finalizar();

        let mensajes = app.leer(|s| s.messages.clone()).unwrap();
        assert_eq!(mensajes.len(), 1);
        assert!(!mensajes[0].is_user);
    }

    #[test]
    fn test_bot_activo_responde() {
        let tmp = TempDir::new().unwrap();
        let app = app_con_delay_minimo(&tmp);
        assert!(alternar(&app).unwrap());
        let scheduler = scheduler_de_prueba(&app);

        assert!(enviar_prueba(&app, "¿hola?", &scheduler).unwrap());
        scheduler.finalizar();

        let mensajes = app.leer(|s| s.messages.clone()).unwrap();
        assert_eq!(mensajes.len(), 2);
        assert!(mensajes[1].is_user);
        assert!(mensajes[1].id.starts_with("reply-"));
        // Perfil por defecto: casual, en minúsculas
        assert_eq!(mensajes[1].text, crate::ml::reply::RESPUESTAS[0].to_lowercase());
    }

    #[test]
    fn test_mensaje_vacio_es_no_op() {
        let tmp = TempDir::new().unwrap();
        let app = app_con_delay_minimo(&tmp);
        alternar(&app).unwrap();
        let scheduler = scheduler_de_prueba(&app);

        assert!(!enviar_prueba(&app, "   ", &scheduler).unwrap());
        scheduler.finalizar();
        assert_eq!(app.leer(|s| s.messages.len()).unwrap(), 0);
    }

    #[test]
    fn test_alternar_persiste() {
        let tmp = TempDir::new().unwrap();
        let app = App::abrir(tmp.path());
        alternar(&app).unwrap();

        assert!(App::abrir(tmp.path()).leer(|s| s.is_active).unwrap());
    }

    #[test]
    fn test_alternar_sin_poder_guardar_no_cambia_estado() {
        let tmp = TempDir::new().unwrap();
        let app = App::abrir(tmp.path());
        bloquear_archivo_estado(&app);

        assert!(alternar(&app).is_err());
        assert!(entrenar(&app, "hola\nchau").is_err());
        assert!(!app.leer(|s| s.is_active).unwrap());
        assert_eq!(app.leer(|s| s.messages.len()).unwrap(), 0);
    }

    fn bloquear_archivo_estado(app: &App) {
        std::fs::create_dir_all(app.store.path()).unwrap();
    }
}
