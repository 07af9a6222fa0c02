pub mod backup;
pub mod bot;
pub mod panel;
pub mod settings;

use crate::config::{BotConfig, MAX_DELAY_SECS, MIN_DELAY_SECS};
use crate::session::BotState;
use crate::store::SessionStore;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

#[derive(Parser)]
#[command(name = "stylebot")]
#[command(about = "Auto-reply bot that learns your texting style", long_about = None)]
pub struct Cli {
    /// Directorio donde se guardan la configuración y el estado
    #[arg(long, global = true)]
    pub dir: Option<PathBuf>,

    /// Semilla para elegir las respuestas de forma reproducible
    #[arg(long, global = true)]
    pub seed: Option<u64>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Panel interactivo (Dashboard, Entrenar, Ajustes)
    Panel,
    /// Muestra el perfil de estilo y los últimos mensajes
    Dashboard,
    /// Entrena el bot con mensajes de ejemplo (uno por línea)
    Train {
        /// Archivo con los mensajes; sin él se lee stdin
        #[arg(long)]
        file: Option<PathBuf>,
    },
    /// Envía un mensaje de prueba y espera la respuesta automática
    Send {
        /// Texto del mensaje entrante
        text: String,
    },
    /// Activa o desactiva el bot
    Toggle,
    /// Muestra los ajustes y estadísticas
    Settings {
        /// Nueva espera de respuesta en segundos
        #[arg(long, value_parser = clap::value_parser!(u64).range(MIN_DELAY_SECS..=MAX_DELAY_SECS))]
        delay: Option<u64>,
    },
    /// Exporta un respaldo JSON
    Export {
        /// Archivo de destino (por defecto stylebot-backup-<ms>.json)
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Importa un respaldo JSON
    Import {
        /// Archivo de respaldo
        file: PathBuf,
    },
}

/// Contexto compartido por todos los comandos
pub struct App {
    pub data_dir: PathBuf,
    pub config: BotConfig,
    pub store: Arc<SessionStore>,
    pub state: Arc<Mutex<BotState>>,
    pub seed: Option<u64>,
}

impl App {
    pub fn abrir(data_dir: &Path) -> Self {
        let config = BotConfig::load(data_dir);
        let store = SessionStore::new(data_dir, &config.state_file);
        let state = store.cargar();

        Self {
            data_dir: data_dir.to_path_buf(),
            config,
            store: Arc::new(store),
            state: Arc::new(Mutex::new(state)),
            seed: None,
        }
    }

    /// Aplica un cambio al estado y lo persiste.
    ///
    /// El cambio se hace sobre una copia: si no se puede guardar, el estado en
    /// memoria queda igual que el del disco.
    pub fn modificar<R>(&self, f: impl FnOnce(&mut BotState) -> R) -> anyhow::Result<R> {
        let mut state = self
            .state
            .lock()
            .map_err(|_| anyhow::anyhow!("Estado de la sesión inaccesible"))?;
        let mut nuevo = state.clone();
        let resultado = f(&mut nuevo);
        self.store.guardar(&nuevo)?;
        *state = nuevo;
        Ok(resultado)
    }

    pub fn leer<R>(&self, f: impl FnOnce(&BotState) -> R) -> anyhow::Result<R> {
        let state = self
            .state
            .lock()
            .map_err(|_| anyhow::anyhow!("Estado de la sesión inaccesible"))?;
        Ok(f(&*state))
    }
}
