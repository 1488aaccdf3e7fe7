use std::time::{Duration, Instant};

use serde::Serialize;

/// Tiempo de vida de una notificación transitoria
const NOTICE_TTL: Duration = Duration::from_secs(4);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Info,
    Success,
    Warning,
}

/// Notificación transitoria con vencimiento absoluto
#[derive(Debug, Clone, Serialize)]
pub struct Notice {
    pub message: String,
    pub level: NoticeLevel,
    #[serde(skip_serializing)]
    expires_at: Instant,
}

/// Cola de notificaciones de la sesión. Cada entrada vence sola; el slot
/// único mutable del diseño original se reemplaza por esta cola.
#[derive(Debug, Clone, Default)]
pub struct NoticeQueue {
    entries: Vec<Notice>,
}

impl NoticeQueue {
    pub fn push(&mut self, level: NoticeLevel, message: impl Into<String>) {
        self.push_at(Instant::now(), level, message);
    }

    fn push_at(&mut self, now: Instant, level: NoticeLevel, message: impl Into<String>) {
        self.entries.push(Notice {
            message: message.into(),
            level,
            expires_at: now + NOTICE_TTL,
        });
    }

    /// Poda las entradas vencidas y devuelve las vigentes.
    pub fn active(&mut self) -> &[Notice] {
        self.active_at(Instant::now())
    }

    fn active_at(&mut self, now: Instant) -> &[Notice] {
        self.entries.retain(|n| n.expires_at > now);
        &self.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn las_notificaciones_vigentes_se_conservan() {
        let t0 = Instant::now();
        let mut cola = NoticeQueue::default();
        cola.push_at(t0, NoticeLevel::Success, "✅ listo");

        let vigentes = cola.active_at(t0 + Duration::from_secs(1));
        assert_eq!(vigentes.len(), 1);
        assert_eq!(vigentes[0].message, "✅ listo");
    }

    #[test]
    fn las_notificaciones_vencidas_se_podan() {
        let t0 = Instant::now();
        let mut cola = NoticeQueue::default();
        cola.push_at(t0, NoticeLevel::Info, "uno");
        cola.push_at(t0 + Duration::from_secs(3), NoticeLevel::Info, "dos");

        let vigentes = cola.active_at(t0 + Duration::from_secs(5));
        assert_eq!(vigentes.len(), 1);
        assert_eq!(vigentes[0].message, "dos");
    }

    #[test]
    fn la_cola_acumula_en_orden() {
        let t0 = Instant::now();
        let mut cola = NoticeQueue::default();
        cola.push_at(t0, NoticeLevel::Info, "uno");
        cola.push_at(t0, NoticeLevel::Warning, "dos");

        let vigentes = cola.active_at(t0);
        assert_eq!(vigentes.len(), 2);
        assert_eq!(vigentes[0].message, "uno");
        assert_eq!(vigentes[1].message, "dos");
    }
}
