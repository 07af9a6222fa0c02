use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Tiempo de respuesta que se muestra en el perfil (constante)
pub const TIEMPO_RESPUESTA: &str = "2-5 minutes";

/// Cantidad máxima de frases comunes que se guardan en el perfil
pub const MAX_FRASES_COMUNES: usize = 5;

static EMOJI_RE: once_cell::sync::Lazy<regex::Regex> = once_cell::sync::Lazy::new(|| {
    regex::Regex::new(
        r"[\x{1F600}-\x{1F64F}\x{1F300}-\x{1F5FF}\x{1F680}-\x{1F6FF}\x{1F1E0}-\x{1F1FF}\x{2600}-\x{26FF}\x{2700}-\x{27BF}]",
    )
    .expect("regex de emojis válida")
});

/// Estilo de puntuación detectado en el texto de entrenamiento
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PunctuationStyle {
    Formal,
    #[default]
    Casual,
}

impl std::fmt::Display for PunctuationStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PunctuationStyle::Formal => write!(f, "Formal"),
            PunctuationStyle::Casual => write!(f, "Casual"),
        }
    }
}

/// Perfil de estilo de escritura del usuario.
///
/// Se recalcula completo en cada entrenamiento, nunca de forma incremental.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleProfile {
    pub avg_length: u32,
    pub common_phrases: Vec<String>,
    pub emoji_usage: u32, // porcentaje sobre la cantidad de líneas
    pub punctuation_style: PunctuationStyle,
    pub response_time: String,
}

impl Default for StyleProfile {
    fn default() -> Self {
        Self {
            avg_length: 0,
            common_phrases: Vec::new(),
            emoji_usage: 0,
            punctuation_style: PunctuationStyle::Casual,
            response_time: TIEMPO_RESPUESTA.to_string(),
        }
    }
}

/// Analizador de estilo de mensajes
pub struct StyleAnalyzer;

impl StyleAnalyzer {
    /// Analiza un bloque de mensajes (uno por línea) y construye el perfil de estilo.
    ///
    /// Un texto sin líneas útiles devuelve el perfil en cero, nunca un error.
    pub fn analyze(text: &str) -> StyleProfile {
        let lineas = Self::lineas_utiles(text);
        let total_lineas = lineas.len();

        // Longitud en caracteres Unicode: un emoji cuenta 1, no 2 unidades UTF-16
        let total_chars: usize = lineas.iter().map(|l| l.chars().count()).sum();
        let avg_length = proporcion_redondeada(total_chars, total_lineas, 1.0);

        let emojis = Self::contar_emojis(text);
        let emoji_usage = proporcion_redondeada(emojis, total_lineas, 100.0);

        let common_phrases = Self::frases_comunes(text, MAX_FRASES_COMUNES);

        // Formal solo si los signos terminales superan estrictamente la mitad de las líneas
        let signos = text.chars().filter(|c| matches!(c, '.' | '!' | '?')).count();
        let punctuation_style = if signos as f64 > total_lineas as f64 * 0.5 {
            PunctuationStyle::Formal
        } else {
            PunctuationStyle::Casual
        };

        StyleProfile {
            avg_length,
            common_phrases,
            emoji_usage,
            punctuation_style,
            response_time: TIEMPO_RESPUESTA.to_string(),
        }
    }

    /// Líneas con contenido (se descartan las vacías o solo con espacios).
    /// Las líneas se devuelven sin recortar.
    pub fn lineas_utiles(text: &str) -> Vec<&str> {
        text.split('\n').filter(|l| !l.trim().is_empty()).collect()
    }

    pub fn contar_emojis(text: &str) -> usize {
        EMOJI_RE.find_iter(text).count()
    }

    /// Bigramas más frecuentes en minúsculas, de mayor a menor frecuencia.
    /// Los empates conservan el orden de primera aparición.
    pub fn frases_comunes(text: &str, limite: usize) -> Vec<String> {
        let texto = text.to_lowercase();
        let palabras: Vec<&str> = texto.split_whitespace().collect();

        let mut indices: HashMap<String, usize> = HashMap::new();
        let mut conteos: Vec<(String, usize)> = Vec::new();

        for par in palabras.windows(2) {
            let frase = format!("{} {}", par[0], par[1]);
            match indices.get(&frase) {
                Some(&i) => conteos[i].1 += 1,
                None => {
                    indices.insert(frase.clone(), conteos.len());
                    conteos.push((frase, 1));
                }
            }
        }

        // sort_by es estable: los empates quedan en orden de inserción
        conteos.sort_by(|a, b| b.1.cmp(&a.1));
        conteos
            .into_iter()
            .take(limite)
            .map(|(frase, _)| frase)
            .collect()
    }
}

fn proporcion_redondeada(parte: usize, total: usize, escala: f64) -> u32 {
    if total == 0 {
        return 0;
    }
    (parte as f64 * escala / total as f64).round() as u32
}
