use colored::Colorize;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Versión actual de StyleBot (leída desde Cargo.toml en tiempo de compilación)
pub const STYLEBOT_VERSION: &str = env!("CARGO_PKG_VERSION");

pub const CONFIG_FILE: &str = ".stylebotrc.toml";
pub const DEFAULT_STATE_FILE: &str = ".stylebot/state.json";

pub const MIN_DELAY_SECS: u64 = 1;
pub const MAX_DELAY_SECS: u64 = 30;
pub const DEFAULT_DELAY_SECS: u64 = 3;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct BotConfig {
    pub version: String,
    pub reply_delay_secs: u64, // Espera antes de la respuesta automática (1-30)
    pub state_file: String,    // Relativo al directorio de datos
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            version: STYLEBOT_VERSION.to_string(),
            reply_delay_secs: DEFAULT_DELAY_SECS,
            state_file: DEFAULT_STATE_FILE.to_string(),
        }
    }
}

impl BotConfig {
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let toml = toml::to_string_pretty(self)?;
        fs::write(path.join(CONFIG_FILE), toml)?;
        Ok(())
    }

    /// Carga la configuración desde `.stylebotrc.toml`.
    ///
    /// Sin archivo devuelve los valores por defecto. Migra automáticamente
    /// configuraciones de otra versión o sin campo `version`.
    pub fn load(path: &Path) -> Self {
        let config_path = path.join(CONFIG_FILE);
        let content = match fs::read_to_string(&config_path) {
            Ok(c) => c,
            Err(_) => return Self::default(),
        };

        if let Ok(mut config) = toml::from_str::<BotConfig>(&content) {
            if config.version != STYLEBOT_VERSION {
                println!(
                    "{}",
                    format!(
                        "   🔄 Migrando configuración de versión {} a {}...",
                        config.version, STYLEBOT_VERSION
                    )
                    .yellow()
                );
                config = Self::migrar_config(config);
                let _ = config.save(path);
                println!("{}", "   ✅ Configuración migrada exitosamente".green());
            } else {
                config.reply_delay_secs = acotar_delay(config.reply_delay_secs);
            }
            return config;
        }

        // Configuración antigua: campos sueltos, sin versión
        #[derive(Debug, Deserialize)]
        struct BotConfigV0 {
            reply_delay_secs: Option<u64>,
            state_file: Option<String>,
        }

        if let Ok(old_config) = toml::from_str::<BotConfigV0>(&content) {
            println!("{}", "   🔄 Detectada configuración antigua, migrando...".yellow());

            let mut new_config = Self::default();
            if let Some(delay) = old_config.reply_delay_secs {
                new_config.reply_delay_secs = acotar_delay(delay);
            }
            if let Some(state_file) = old_config.state_file.filter(|s| !s.trim().is_empty()) {
                new_config.state_file = state_file;
            }

            let _ = new_config.save(path);
            println!("{}", "   ✅ Configuración migrada exitosamente".green());
            return new_config;
        }

        println!(
            "{}",
            "   ⚠️  No se pudo leer .stylebotrc.toml. Se usan los valores por defecto.".yellow()
        );
        Self::default()
    }

    fn migrar_config(mut config: BotConfig) -> BotConfig {
        config.version = STYLEBOT_VERSION.to_string();
        config.reply_delay_secs = acotar_delay(config.reply_delay_secs);
        if config.state_file.trim().is_empty() {
            config.state_file = DEFAULT_STATE_FILE.to_string();
        }
        config
    }

    /// Cambia la espera de respuesta; falla fuera del rango 1-30
    pub fn set_reply_delay(&mut self, secs: u64) -> anyhow::Result<()> {
        if !(MIN_DELAY_SECS..=MAX_DELAY_SECS).contains(&secs) {
            anyhow::bail!(
                "La espera debe estar entre {} y {} segundos (recibido: {})",
                MIN_DELAY_SECS,
                MAX_DELAY_SECS,
                secs
            );
        }
        self.reply_delay_secs = secs;
        Ok(())
    }
}

fn acotar_delay(secs: u64) -> u64 {
    secs.clamp(MIN_DELAY_SECS, MAX_DELAY_SECS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_sin_archivo_usa_defaults() {
        let tmp = TempDir::new().unwrap();
        let config = BotConfig::load(tmp.path());
        assert_eq!(config, BotConfig::default());
        assert_eq!(config.reply_delay_secs, 3);
    }

    #[test]
    fn test_guardar_y_cargar() {
        let tmp = TempDir::new().unwrap();
        let mut config = BotConfig::default();
        config.set_reply_delay(12).unwrap();
        config.save(tmp.path()).unwrap();

        assert_eq!(BotConfig::load(tmp.path()).reply_delay_secs, 12);
    }

    #[test]
    fn test_delay_fuera_de_rango() {
        let mut config = BotConfig::default();
        assert!(config.set_reply_delay(0).is_err());
        assert!(config.set_reply_delay(31).is_err());
        assert_eq!(config.reply_delay_secs, 3);
        assert!(config.set_reply_delay(30).is_ok());
    }

    #[test]
    fn test_migra_version_anterior() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join(CONFIG_FILE),
            "version = \"0.1.0\"\nreply_delay_secs = 90\nstate_file = \"\"\n",
        )
        .unwrap();

        let config = BotConfig::load(tmp.path());
        assert_eq!(config.version, STYLEBOT_VERSION);
        assert_eq!(config.reply_delay_secs, 30);
        assert_eq!(config.state_file, DEFAULT_STATE_FILE);

        let guardado = fs::read_to_string(tmp.path().join(CONFIG_FILE)).unwrap();
        assert!(guardado.contains(STYLEBOT_VERSION));
    }

    #[test]
    fn test_migra_configuracion_sin_version() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(CONFIG_FILE), "reply_delay_secs = 7\n").unwrap();

        let config = BotConfig::load(tmp.path());
        assert_eq!(config.reply_delay_secs, 7);
        assert_eq!(config.state_file, DEFAULT_STATE_FILE);
    }

    #[test]
    fn test_archivo_invalido_usa_defaults() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(CONFIG_FILE), "esto = = no es toml").unwrap();
        assert_eq!(BotConfig::load(tmp.path()), BotConfig::default());
    }
}
