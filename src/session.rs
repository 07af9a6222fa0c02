//! Estado de la sesión del bot
//!
//! `BotState` reemplaza al estado global: se pasa explícitamente a cada
//! comando y se persiste completo después de cada cambio.

use crate::ml::patterns::{StyleAnalyzer, StyleProfile};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Cantidad de mensajes que muestra el dashboard
pub const MENSAJES_RECIENTES: usize = 10;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: String,
    pub text: String,
    pub timestamp: DateTime<Utc>,
    pub is_user: bool,
}

impl Message {
    fn nuevo(prefijo: &str, text: &str, is_user: bool) -> Self {
        Self {
            id: format!("{}-{}", prefijo, Uuid::new_v4()),
            text: text.to_string(),
            timestamp: Utc::now(),
            is_user,
        }
    }

    /// Línea de entrenamiento escrita por el usuario
    pub fn entrenamiento(text: &str) -> Self {
        Self::nuevo("train", text, true)
    }

    /// Mensaje de prueba recibido de un contacto
    pub fn entrante(text: &str) -> Self {
        Self::nuevo("msg", text, false)
    }

    /// Respuesta automática (el bot habla como el usuario)
    pub fn respuesta(text: &str) -> Self {
        Self::nuevo("reply", text, true)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BotState {
    pub messages: Vec<Message>,
    pub style_data: StyleProfile,
    pub is_active: bool,
}

/// Contadores del panel de ajustes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionStats {
    pub mensajes_entrenados: usize,
    pub respuestas_enviadas: usize,
    pub activo: bool,
}

impl BotState {
    /// Reentrena el perfil con `texto` y agrega una línea por mensaje.
    ///
    /// Devuelve la cantidad de mensajes agregados; un texto vacío no cambia nada.
    pub fn entrenar(&mut self, texto: &str) -> usize {
        if texto.trim().is_empty() {
            return 0;
        }

        self.style_data = StyleAnalyzer::analyze(texto);

        let nuevos: Vec<Message> = StyleAnalyzer::lineas_utiles(texto)
            .into_iter()
            .map(Message::entrenamiento)
            .collect();
        let cantidad = nuevos.len();
        self.messages.extend(nuevos);
        cantidad
    }

    /// Registra un mensaje entrante. Devuelve `None` si el texto está vacío.
    ///
    /// La respuesta no se agrega aquí: la programa el llamador solo si el bot
    /// está activo (ver `debe_responder`).
    pub fn recibir(&mut self, texto: &str) -> Option<&Message> {
        if texto.trim().is_empty() {
            return None;
        }
        self.messages.push(Message::entrante(texto));
        self.messages.last()
    }

    pub fn debe_responder(&self) -> bool {
        self.is_active
    }

    pub fn agregar_respuesta(&mut self, texto: &str) -> &Message {
        self.messages.push(Message::respuesta(texto));
        // push garantiza que hay al menos un elemento
        &self.messages[self.messages.len() - 1]
    }

    /// Activa/desactiva el bot y devuelve el nuevo estado
    pub fn alternar(&mut self) -> bool {
        self.is_active = !self.is_active;
        self.is_active
    }

    pub fn recientes(&self, n: usize) -> &[Message] {
        let inicio = self.messages.len().saturating_sub(n);
        &self.messages[inicio..]
    }

    pub fn estadisticas(&self) -> SessionStats {
        let entrenados = self.messages.iter().filter(|m| m.is_user).count();
        SessionStats {
            mensajes_entrenados: entrenados,
            respuestas_enviadas: self.messages.len() - entrenados,
            activo: self.is_active,
        }
    }
}
