//! Centro de notificaciones
//!
//! Lista ordenada de avisos transitorios con auto-cierre. Cada temporizador es
//! una tarea de tokio cuyo `AbortHandle` se guarda por id, así que cerrar un
//! aviso cancela su temporizador y cerrarlo dos veces no hace nada.

use serde::Serialize;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError, Weak};
use std::time::Duration;
use tokio::sync::broadcast;
use tokio::task::AbortHandle;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::config::environment::DEFAULT_NOTIFICATION_MS;

const EVENT_CAPACITY: usize = 64;

/// Severidad del aviso
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Success,
    Info,
    Warning,
    Danger,
}

/// Cuándo cerrar automáticamente un aviso
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DismissAfter {
    /// Duración configurada en el centro (4000 ms salvo configuración)
    #[default]
    Default,
    /// Milisegundos; cero o negativo desactiva el auto-cierre
    Millis(i64),
    Never,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct NotificationOptions {
    pub message: String,
    pub title: Option<String>,
    pub severity: Option<Severity>,
    pub dismissible: Option<bool>,
    pub duration: DismissAfter,
}

impl NotificationOptions {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            ..Default::default()
        }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn severity(mut self, severity: Severity) -> Self {
        self.severity = Some(severity);
        self
    }

    pub fn dismissible(mut self, dismissible: bool) -> Self {
        self.dismissible = Some(dismissible);
        self
    }

    pub fn duration(mut self, duration: DismissAfter) -> Self {
        self.duration = duration;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Notification {
    pub id: String,
    pub message: String,
    pub title: Option<String>,
    pub severity: Severity,
    pub dismissible: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum NotificationEvent {
    Shown(Notification),
    Dismissed(String),
    Cleared,
}

struct CenterInner {
    notifications: Mutex<Vec<Notification>>,
    timers: Mutex<HashMap<String, AbortHandle>>,
    events: broadcast::Sender<NotificationEvent>,
    default_duration_ms: i64,
}

#[derive(Clone)]
pub struct NotificationCenter {
    inner: Arc<CenterInner>,
}

impl Default for NotificationCenter {
    fn default() -> Self {
        Self::new(DEFAULT_NOTIFICATION_MS)
    }
}

impl NotificationCenter {
    pub fn new(default_duration_ms: i64) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            inner: Arc::new(CenterInner {
                notifications: Mutex::new(Vec::new()),
                timers: Mutex::new(HashMap::new()),
                events,
                default_duration_ms,
            }),
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<NotificationEvent> {
        self.inner.events.subscribe()
    }

    /// Copia de los avisos visibles, en orden de llegada
    pub fn notifications(&self) -> Vec<Notification> {
        self.inner
            .notifications
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn pending_timers(&self) -> usize {
        self.inner.timers.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn notify(&self, options: NotificationOptions) -> String {
        let id = Uuid::new_v4().to_string();
        let notification = Notification {
            id: id.clone(),
            message: options.message,
            title: options.title,
            severity: options.severity.unwrap_or(Severity::Info),
            dismissible: options.dismissible.unwrap_or(true),
        };

        debug!("🔔 [{:?}] {}", notification.severity, notification.message);
        self.inner
            .notifications
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(notification.clone());
        let _ = self.inner.events.send(NotificationEvent::Shown(notification));

        let millis = match options.duration {
            DismissAfter::Default => Some(self.inner.default_duration_ms),
            DismissAfter::Millis(ms) => Some(ms),
            DismissAfter::Never => None,
        };
        if let Some(ms) = millis.filter(|ms| *ms > 0) {
            self.schedule_dismiss(&id, Duration::from_millis(ms as u64));
        }

        id
    }

    fn schedule_dismiss(&self, id: &str, delay: Duration) {
        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            warn!("⚠️ Sin runtime de tokio, el aviso {} no se cerrará solo", id);
            return;
        };

        let weak: Weak<CenterInner> = Arc::downgrade(&self.inner);
        let timer_id = id.to_string();

        // El lock se mantiene hasta guardar el handle: `expire` no puede
        // adelantarse al registro aunque el retraso sea cero.
        let mut timers = self.inner.timers.lock().unwrap_or_else(PoisonError::into_inner);
        let task = runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            if let Some(inner) = weak.upgrade() {
                NotificationCenter { inner }.expire(&timer_id);
            }
        });
        timers.insert(id.to_string(), task.abort_handle());
    }

    /// Temporizador vencido: su handle ya no hace falta
    fn expire(&self, id: &str) {
        self.inner.timers.lock().unwrap_or_else(PoisonError::into_inner).remove(id);
        self.remove(id);
    }

    fn remove(&self, id: &str) {
        let removed = {
            let mut notifications = self.inner.notifications.lock().unwrap_or_else(PoisonError::into_inner);
            let before = notifications.len();
            notifications.retain(|n| n.id != id);
            notifications.len() != before
        };
        if removed {
            let _ = self.inner.events.send(NotificationEvent::Dismissed(id.to_string()));
        }
    }

    pub fn dismiss(&self, id: &str) {
        if let Some(timer) = self.inner.timers.lock().unwrap_or_else(PoisonError::into_inner).remove(id) {
            timer.abort();
        }
        self.remove(id);
    }

    pub fn clear(&self) {
        let timers: Vec<AbortHandle> = self
            .inner
            .timers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .drain()
            .map(|(_, timer)| timer)
            .collect();
        for timer in timers {
            timer.abort();
        }
        self.inner.notifications.lock().unwrap_or_else(PoisonError::into_inner).clear();
        let _ = self.inner.events.send(NotificationEvent::Cleared);
    }

    pub fn success(&self, message: impl Into<String>) -> String {
        self.notify(NotificationOptions::new(message).severity(Severity::Success))
    }

    pub fn info(&self, message: impl Into<String>) -> String {
        self.notify(NotificationOptions::new(message).severity(Severity::Info))
    }

    pub fn warning(&self, message: impl Into<String>) -> String {
        self.notify(NotificationOptions::new(message).severity(Severity::Warning))
    }

    pub fn danger(&self, message: impl Into<String>) -> String {
        self.notify(NotificationOptions::new(message).severity(Severity::Danger))
    }
}

impl std::fmt::Debug for NotificationCenter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotificationCenter")
            .field("visible", &self.notifications().len())
            .field("pending_timers", &self.pending_timers())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_runtime() {
        let center = NotificationCenter::default();
        let id = center.notify(NotificationOptions::new("Rota salva"));

        let notifications = center.notifications();
        assert_eq!(notifications.len(), 1);
        assert_eq!(notifications[0].id, id);
        assert_eq!(notifications[0].severity, Severity::Info);
        assert!(notifications[0].dismissible);
        assert_eq!(center.pending_timers(), 0);
    }

    #[test]
    fn test_ids_are_unique_and_order_is_kept() {
        let center = NotificationCenter::default();
        let first = center.warning("a");
        let second = center.danger("b");

        assert_ne!(first, second);
        let ids: Vec<String> = center.notifications().into_iter().map(|n| n.id).collect();
        assert_eq!(ids, vec![first, second]);
    }

    #[test]
    fn test_double_dismiss_emits_once() {
        let center = NotificationCenter::default();
        let mut events = center.subscribe();
        let id = center.info("x");

        center.dismiss(&id);
        center.dismiss(&id);

        assert!(matches!(events.try_recv(), Ok(NotificationEvent::Shown(_))));
        assert_eq!(events.try_recv().ok(), Some(NotificationEvent::Dismissed(id)));
        assert!(events.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_non_positive_duration_disables_timer() {
        let center = NotificationCenter::default();
        center.notify(NotificationOptions::new("a").duration(DismissAfter::Millis(0)));
        center.notify(NotificationOptions::new("b").duration(DismissAfter::Millis(-5)));
        center.notify(NotificationOptions::new("c").duration(DismissAfter::Never));

        assert_eq!(center.pending_timers(), 0);
        tokio::time::sleep(Duration::from_secs(60)).await;
        assert_eq!(center.notifications().len(), 3);
    }
}
