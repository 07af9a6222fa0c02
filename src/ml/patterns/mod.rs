//! Módulo de detección de patrones de escritura
//!
//! Analiza mensajes de ejemplo para identificar el estilo del usuario:
//! longitud, emojis, frases recurrentes y puntuación.

pub mod style;

pub use style::{PunctuationStyle, StyleAnalyzer, StyleProfile};
