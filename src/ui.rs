//! Módulo de interfaz de usuario
//!
//! Funciones relacionadas con la interacción con el usuario en la terminal:
//! las tres vistas del bot (Dashboard, Entrenar, Ajustes) y los prompts.

use crate::config::{BotConfig, MAX_DELAY_SECS, MIN_DELAY_SECS};
use crate::session::{BotState, MENSAJES_RECIENTES, Message};
use colored::*;
use dialoguer::{Input, Select, theme::ColorfulTheme};
use std::io::{self, BufRead};

const SEPARADOR: &str = "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━";

/// Vistas del panel interactivo
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Vista {
    Dashboard,
    Entrenar,
    Ajustes,
    Salir,
}

impl Vista {
    const TODAS: [Vista; 4] = [Vista::Dashboard, Vista::Entrenar, Vista::Ajustes, Vista::Salir];

    fn etiqueta(&self) -> &'static str {
        match self {
            Vista::Dashboard => "⚡ Dashboard",
            Vista::Entrenar => "🧠 Entrenar bot",
            Vista::Ajustes => "⚙️  Ajustes",
            Vista::Salir => "🚪 Salir",
        }
    }
}

pub fn mostrar_banner(activo: bool) {
    println!();
    println!("{}", "╔══════════════════════════════════════════╗".bright_green());
    println!("{}", "║        💬  StyleBot · Auto-Reply         ║".bright_green().bold());
    println!("{}", "╚══════════════════════════════════════════╝".bright_green());
    println!(
        "{}",
        "   La IA aprende tu estilo y responde por ti".bright_white()
    );
    println!("   Estado: {}", etiqueta_estado(activo));
}

pub fn etiqueta_estado(activo: bool) -> ColoredString {
    if activo {
        "Bot Active ✓".green().bold()
    } else {
        "Bot Inactive".red()
    }
}

/// Muestra la ayuda de comandos disponibles
pub fn mostrar_ayuda() {
    println!("\n{}", SEPARADOR.bright_cyan());
    println!("{}", "⌨️  COMANDOS DISPONIBLES".bright_cyan().bold());
    println!("{}", SEPARADOR.bright_cyan());
    println!("  stylebot panel              {}", "Panel interactivo".dimmed());
    println!("  stylebot dashboard          {}", "Perfil de estilo y últimos mensajes".dimmed());
    println!("  stylebot train [--file F]   {}", "Entrenar con mensajes (uno por línea)".dimmed());
    println!("  stylebot send <texto>       {}", "Enviar un mensaje de prueba".dimmed());
    println!("  stylebot toggle             {}", "Activar/desactivar el bot".dimmed());
    println!("  stylebot settings [--delay] {}", "Ver/cambiar ajustes".dimmed());
    println!("  stylebot export [--output]  {}", "Exportar respaldo JSON".dimmed());
    println!("  stylebot import <archivo>   {}", "Importar respaldo JSON".dimmed());
    println!("{}", SEPARADOR.bright_cyan());
}

/// Permite elegir la vista del panel con las flechas
pub fn seleccionar_vista() -> Vista {
    let etiquetas: Vec<&str> = Vista::TODAS.iter().map(|v| v.etiqueta()).collect();
    let seleccion = Select::with_theme(&ColorfulTheme::default())
        .with_prompt("Elige una vista (↑/↓ y Enter)")
        .default(0)
        .items(&etiquetas)
        .interact();

    match seleccion {
        Ok(i) => Vista::TODAS[i],
        Err(_) => Vista::Salir,
    }
}

pub fn mostrar_dashboard(state: &BotState) {
    let perfil = &state.style_data;

    println!("\n{}", "📊 TU PERFIL DE ESTILO".bright_green().bold());
    println!("{}", SEPARADOR);
    println!("📏 Longitud promedio: {} caracteres", perfil.avg_length.to_string().blue().bold());
    println!("😀 Uso de emojis:     {}%", perfil.emoji_usage.to_string().green().bold());
    println!("✍️  Estilo:            {}", perfil.punctuation_style.to_string().magenta().bold());
    println!("⏱️  Tiempo de resp.:   {}", perfil.response_time);

    println!("\n{}", "💭 Frases comunes".bold());
    if perfil.common_phrases.is_empty() {
        println!("   {}", "Entrena el bot para ver tus frases comunes".dimmed());
    } else {
        for frase in &perfil.common_phrases {
            println!("   • {}", frase.cyan());
        }
    }

    println!("\n{}", "💬 Conversación".bold());
    mostrar_conversacion(state.recientes(MENSAJES_RECIENTES));
    println!("{}", SEPARADOR);
}

pub fn mostrar_conversacion(mensajes: &[Message]) {
    if mensajes.is_empty() {
        println!("   {}", "Sin mensajes todavía".dimmed());
        return;
    }
    for m in mensajes {
        mostrar_mensaje(m);
    }
}

/// Los mensajes propios (y las respuestas del bot) van a la derecha
pub fn mostrar_mensaje(m: &Message) {
    let hora = m.timestamp.format("%H:%M").to_string();
    if m.is_user {
        println!("{:>40} {}", m.text.black().on_bright_green(), hora.dimmed());
    } else {
        println!("{} {}", m.text.black().on_white(), hora.dimmed());
    }
}

pub fn mostrar_instrucciones_entrenamiento() {
    println!("\n{}", "🧠 ENTRENA TU BOT".bright_blue().bold());
    println!("{}", SEPARADOR);
    println!("   1. Copia mensajes que hayas enviado (uno por línea)");
    println!("   2. Cuantos más ejemplos, mejor aprende tu estilo");
    println!("   3. Termina con una línea vacía");
    println!("{}", SEPARADOR);
}

pub fn mostrar_ajustes(state: &BotState, config: &BotConfig) {
    let stats = state.estadisticas();

    println!("\n{}", "⚙️  AJUSTES DEL BOT".bright_yellow().bold());
    println!("{}", SEPARADOR);
    println!(
        "⏳ Espera de respuesta: {}s {}",
        config.reply_delay_secs.to_string().bold(),
        format!("({}-{}s)", MIN_DELAY_SECS, MAX_DELAY_SECS).dimmed()
    );
    println!("🎨 Estilo de respuesta: Match My Style (AI-Generated)");
    println!("   {}", "Custom Templates (Coming Soon)".dimmed());

    println!("\n{}", "📈 Estadísticas".bold());
    println!("   Messages Trained:  {}", stats.mensajes_entrenados.to_string().bold());
    println!("   Auto-Replies Sent: {}", stats.respuestas_enviadas.to_string().bold());
    println!(
        "   Bot Status:        {}",
        if stats.activo { "Active".green().bold() } else { "Inactive".red().bold() }
    );

    println!("\n{}", "ℹ️  Nota de integración".yellow());
    println!(
        "   {}",
        "Esto es una demo: no se conecta a ninguna red de mensajería real.".dimmed()
    );
    println!("{}", SEPARADOR);
}

/// Lee texto de entrenamiento hasta una línea vacía o fin de entrada
pub fn leer_texto_multilinea() -> io::Result<String> {
    let stdin = io::stdin();
    let mut lineas = Vec::new();
    for linea in stdin.lock().lines() {
        let linea = linea?;
        if linea.trim().is_empty() {
            break;
        }
        lineas.push(linea);
    }
    Ok(lineas.join("\n"))
}

/// Lee todo stdin (para `train` sin archivo, p. ej. con una tubería)
pub fn leer_stdin_completo() -> io::Result<String> {
    let mut texto = String::new();
    for linea in io::stdin().lock().lines() {
        texto.push_str(&linea?);
        texto.push('\n');
    }
    Ok(texto)
}

pub fn pedir_texto(prompt: &str) -> Option<String> {
    Input::<String>::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt)
        .allow_empty(true)
        .interact_text()
        .ok()
}

pub fn pedir_opcion(prompt: &str, opciones: &[&str]) -> Option<usize> {
    Select::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt)
        .default(0)
        .items(opciones)
        .interact()
        .ok()
}

/// Helper para mostrar una barra de progreso genérica
pub fn crear_progreso(mensaje: &str) -> indicatif::ProgressBar {
    let pb = indicatif::ProgressBar::new_spinner();
    if let Ok(estilo) = indicatif::ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
        pb.set_style(estilo);
    }
    pb.set_message(mensaje.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb
}

/// Alerta bloqueante para el usuario
pub fn alerta(mensaje: &str) {
    eprintln!("{}", format!("❌ {}", mensaje).red().bold());
}
