//! Generador de respuestas automáticas
//!
//! No genera texto: elige una respuesta predefinida y ajusta la decoración
//! (emoji, minúsculas) según el perfil de estilo aprendido.

use crate::ml::patterns::{PunctuationStyle, StyleProfile};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Respuestas de disponibilidad predefinidas
pub const RESPUESTAS: [&str; 5] = [
    "Hey! I'm not available right now, but I'll get back to you soon",
    "Thanks for reaching out! I'll respond when I can",
    "Got your message! Will reply shortly",
    "Can't respond right now, but I saw your message",
    "I'm away at the moment, will get back to you",
];

/// Emoji que se agrega cuando el usuario usa muchos emojis
pub const EMOJI_RESPUESTA: &str = "😊";

/// Umbral (porcentaje) a partir del cual se agrega el emoji
pub const UMBRAL_EMOJI: u32 = 50;

/// Estrategia de selección de la respuesta.
///
/// `pick` debe devolver un índice en `0..len`.
pub trait ReplyPicker: Send {
    fn pick(&mut self, len: usize) -> usize;
}

/// Selección uniforme con el RNG del hilo
#[derive(Debug, Default)]
pub struct RandomPicker;

impl ReplyPicker for RandomPicker {
    fn pick(&mut self, len: usize) -> usize {
        rand::thread_rng().gen_range(0..len)
    }
}

/// Selección reproducible a partir de una semilla
pub struct SeededPicker {
    rng: StdRng,
}

impl SeededPicker {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl ReplyPicker for SeededPicker {
    fn pick(&mut self, len: usize) -> usize {
        self.rng.gen_range(0..len)
    }
}

pub struct ReplyGenerator;

impl ReplyGenerator {
    /// Genera la respuesta automática para un mensaje entrante.
    ///
    /// El contenido del mensaje entrante no se usa; solo dispara la respuesta.
    /// Si el uso de emojis supera el umbral se agrega el emoji y se conserva el
    /// texto original; si no, el estilo casual pasa la respuesta a minúsculas.
    pub fn generate(_incoming: &str, profile: &StyleProfile, picker: &mut dyn ReplyPicker) -> String {
        let indice = picker.pick(RESPUESTAS.len()).min(RESPUESTAS.len() - 1);
        let base = RESPUESTAS[indice];

        if profile.emoji_usage > UMBRAL_EMOJI {
            return format!("{} {}", base, EMOJI_RESPUESTA);
        }

        if profile.punctuation_style == PunctuationStyle::Casual {
            return base.to_lowercase();
        }

        base.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct PickerFijo(usize);

    impl ReplyPicker for PickerFijo {
        fn pick(&mut self, _len: usize) -> usize {
            self.0
        }
    }

    fn perfil(emoji_usage: u32, estilo: PunctuationStyle) -> StyleProfile {
        StyleProfile {
            emoji_usage,
            punctuation_style: estilo,
            ..StyleProfile::default()
        }
    }

    #[test]
    fn test_estilo_formal_devuelve_respuesta_intacta() {
        let r = ReplyGenerator::generate("hola", &perfil(0, PunctuationStyle::Formal), &mut PickerFijo(2));
        assert_eq!(r, "Got your message! Will reply shortly");
    }

    #[test]
    fn test_estilo_casual_en_minusculas() {
        let r = ReplyGenerator::generate("hola", &perfil(10, PunctuationStyle::Casual), &mut PickerFijo(0));
        assert_eq!(r, "hey! i'm not available right now, but i'll get back to you soon");
    }

    #[test]
    fn test_muchos_emojis_agrega_emoji_sin_minusculas() {
        let r = ReplyGenerator::generate("hola", &perfil(51, PunctuationStyle::Casual), &mut PickerFijo(4));
        assert_eq!(r, "I'm away at the moment, will get back to you 😊");
    }

    #[test]
    fn test_umbral_de_emoji_es_estricto() {
        let r = ReplyGenerator::generate("hola", &perfil(50, PunctuationStyle::Formal), &mut PickerFijo(1));
        assert!(!r.ends_with(EMOJI_RESPUESTA));
    }

    #[test]
    fn test_indice_fuera_de_rango_se_acota() {
        let r = ReplyGenerator::generate("", &perfil(0, PunctuationStyle::Formal), &mut PickerFijo(99));
        assert_eq!(r, RESPUESTAS[4]);
    }

    #[test]
    fn test_picker_con_semilla_es_reproducible() {
        let mut a = SeededPicker::new(42);
        let mut b = SeededPicker::new(42);
        let perfil = perfil(0, PunctuationStyle::Formal);
        for _ in 0..10 {
            assert_eq!(
                ReplyGenerator::generate("x", &perfil, &mut a),
                ReplyGenerator::generate("x", &perfil, &mut b)
            );
        }
    }

    #[test]
    fn test_picker_aleatorio_siempre_en_rango() {
        let mut picker = RandomPicker;
        for _ in 0..100 {
            assert!(picker.pick(RESPUESTAS.len()) < RESPUESTAS.len());
        }
    }
}
