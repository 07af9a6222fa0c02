//! Módulo de "aprendizaje" local
//!
//! Todo se calcula en el dispositivo con estadísticas simples de texto:
//! no hay modelos ni llamadas a la red.

pub mod patterns;
pub mod reply;

pub use reply::{RandomPicker, ReplyGenerator, ReplyPicker, SeededPicker};
