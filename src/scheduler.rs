//! Entrega diferida de respuestas automáticas
//!
//! Un único hilo atiende las respuestas pendientes en orden de llegada. Cada
//! respuesta espera su plazo, se genera con el perfil vigente en ese momento,
//! se agrega a la conversación y se persiste. Las respuestas programadas no se
//! pueden cancelar.

use crate::ml::{ReplyGenerator, ReplyPicker};
use crate::session::{BotState, Message};
use crate::store::SessionStore;
use colored::*;
use std::sync::{Arc, Mutex, mpsc};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

struct ReplyJob {
    due: Instant,
    incoming: String,
}

pub struct ReplyScheduler {
    tx: Option<mpsc::Sender<ReplyJob>>,
    worker: Option<JoinHandle<()>>,
}

impl ReplyScheduler {
    /// Arranca el hilo de respuestas. `on_reply` se invoca fuera del lock con
    /// cada respuesta ya guardada.
    pub fn iniciar<F>(
        state: Arc<Mutex<BotState>>,
        store: Arc<SessionStore>,
        mut picker: Box<dyn ReplyPicker>,
        on_reply: F,
    ) -> Self
    where
        F: Fn(&Message) + Send + 'static,
    {
        let (tx, rx) = mpsc::channel::<ReplyJob>();

        let worker = thread::spawn(move || {
            for job in rx {
                let ahora = Instant::now();
                if job.due > ahora {
                    thread::sleep(job.due - ahora);
                }

                let respuesta = {
                    let Ok(mut s) = state.lock() else {
                        eprintln!("{}", "   ❌ Estado de la sesión inaccesible.".red());
                        break;
                    };
                    let texto = ReplyGenerator::generate(&job.incoming, &s.style_data, picker.as_mut());
                    let msg = s.agregar_respuesta(&texto).clone();
                    if let Err(e) = store.guardar(&s) {
                        eprintln!("   ❌ Error al guardar la respuesta: {}", e);
                    }
                    msg
                };

                on_reply(&respuesta);
            }
        });

        Self {
            tx: Some(tx),
            worker: Some(worker),
        }
    }

    /// Programa la respuesta a `incoming` dentro de `delay`
    pub fn programar(&self, incoming: &str, delay: Duration) {
        let job = ReplyJob {
            due: Instant::now() + delay,
            incoming: incoming.to_string(),
        };
        if let Some(tx) = &self.tx {
            if tx.send(job).is_err() {
                eprintln!("{}", "   ⚠️  El hilo de respuestas ya no está disponible.".yellow());
            }
        }
    }

    /// Espera a que se entreguen todas las respuestas pendientes
    pub fn finalizar(mut self) {
        self.cerrar();
    }

    fn cerrar(&mut self) {
        // Cerrar el canal termina el bucle del hilo cuando se vacía la cola
        self.tx.take();
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }
}

impl Drop for ReplyScheduler {
    fn drop(&mut self) {
        self.cerrar();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ml::reply::RESPUESTAS;
    use tempfile::TempDir;

    struct PickerSecuencial(usize);

    impl ReplyPicker for PickerSecuencial {
        fn pick(&mut self, len: usize) -> usize {
            let i = self.0 % len;
            self.0 += 1;
            i
        }
    }

    fn preparar(tmp: &TempDir) -> (Arc<Mutex<BotState>>, Arc<SessionStore>) {
        let mut state = BotState::default();
        // Perfil formal: las respuestas quedan sin modificar
        state.entrenar("Hola.\nQué tal.");
        state.is_active = true;
        let store = Arc::new(SessionStore::new(tmp.path(), "state.json"));
        (Arc::new(Mutex::new(state)), store)
    }

    #[test]
    fn test_respuestas_en_orden_de_llegada() {
        let tmp = TempDir::new().unwrap();
        let (state, store) = preparar(&tmp);
        let entregadas = Arc::new(Mutex::new(Vec::new()));
        let entregadas_hilo = Arc::clone(&entregadas);

        let scheduler = ReplyScheduler::iniciar(
            Arc::clone(&state),
            Arc::clone(&store),
            Box::new(PickerSecuencial(0)),
            move |m| entregadas_hilo.lock().unwrap().push(m.text.clone()),
        );
        scheduler.programar("uno", Duration::from_millis(30));
        scheduler.programar("dos", Duration::from_millis(0));
        scheduler.finalizar();

        let entregadas = entregadas.lock().unwrap();
        assert_eq!(*entregadas, vec![RESPUESTAS[0].to_string(), RESPUESTAS[1].to_string()]);

        let s = state.lock().unwrap();
        let respuestas: Vec<&Message> = s.messages.iter().filter(|m| m.id.starts_with("reply-")).collect();
        assert_eq!(respuestas.len(), 2);
        assert!(respuestas.iter().all(|m| m.is_user));
    }

    #[test]
    fn test_respuesta_se_persiste() {
        let tmp = TempDir::new().unwrap();
        let (state, store) = preparar(&tmp);

        let scheduler = ReplyScheduler::iniciar(
            Arc::clone(&state),
            Arc::clone(&store),
            Box::new(PickerSecuencial(2)),
            |_| {},
        );
        scheduler.programar("hola", Duration::from_millis(10));
        drop(scheduler);

        let guardado = store.cargar();
        assert_eq!(guardado.messages.last().unwrap().text, RESPUESTAS[2]);
    }

    #[test]
    fn test_respeta_la_espera() {
        let tmp = TempDir::new().unwrap();
        let (state, store) = preparar(&tmp);

        let inicio = Instant::now();
        let scheduler = ReplyScheduler::iniciar(state, store, Box::new(PickerSecuencial(0)), |_| {});
        scheduler.programar("hola", Duration::from_millis(50));
        scheduler.finalizar();

        assert!(inicio.elapsed() >= Duration::from_millis(50));
    }
}
