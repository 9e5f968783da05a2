use std::sync::Mutex;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
    Info,
}

/// Transient user-facing message (the toast of the web client)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
}

pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);

    fn success(&self, message: &str) {
        self.notify(Notification {
            kind: NotificationKind::Success,
            message: message.to_string(),
        });
    }

    fn error(&self, message: &str) {
        self.notify(Notification {
            kind: NotificationKind::Error,
            message: message.to_string(),
        });
    }

    fn info(&self, message: &str) {
        self.notify(Notification {
            kind: NotificationKind::Info,
            message: message.to_string(),
        });
    }
}

/// Prints notifications for the terminal user and mirrors them to tracing
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, notification: Notification) {
        match notification.kind {
            NotificationKind::Success => {
                tracing::info!("{}", notification.message);
                println!("✅ {}", notification.message);
            }
            NotificationKind::Info => {
                tracing::info!("{}", notification.message);
                println!("ℹ️  {}", notification.message);
            }
            NotificationKind::Error => {
                tracing::error!("{}", notification.message);
                eprintln!("❌ {}", notification.message);
            }
        }
    }
}

/// Keeps every notification in memory, in order
#[derive(Default)]
pub struct RecordingNotifier {
    seen: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn all(&self) -> Vec<Notification> {
        self.seen.lock().map(|v| v.clone()).unwrap_or_default()
    }

    pub fn messages(&self, kind: NotificationKind) -> Vec<String> {
        self.all()
            .into_iter()
            .filter(|n| n.kind == kind)
            .map(|n| n.message)
            .collect()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notification: Notification) {
        if let Ok(mut seen) = self.seen.lock() {
            seen.push(notification);
        }
    }
}

/// Yes/no prompt guarding destructive actions
pub trait Confirmation: Send + Sync {
    fn confirm(&self, prompt: &str) -> bool;
}

/// Fixed answer, for `--yes` and tests
pub struct AutoConfirm(pub bool);

impl Confirmation for AutoConfirm {
    fn confirm(&self, _prompt: &str) -> bool {
        self.0
    }
}

/// Asks on stdin; anything other than s/si/sí/y/yes is a refusal
pub struct StdinConfirm;

impl Confirmation for StdinConfirm {
    fn confirm(&self, prompt: &str) -> bool {
        use std::io::Write;

        print!("{} [s/N] ", prompt);
        if std::io::stdout().flush().is_err() {
            return false;
        }
        let mut answer = String::new();
        if std::io::stdin().read_line(&mut answer).is_err() {
            return false;
        }
        matches!(
            answer.trim().to_lowercase().as_str(),
            "s" | "si" | "sí" | "y" | "yes"
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_keeps_order() {
        let notifier = RecordingNotifier::new();
        notifier.success("uno");
        notifier.error("dos");
        notifier.success("tres");

        assert_eq!(notifier.all().len(), 3);
        assert_eq!(notifier.messages(NotificationKind::Success), vec!["uno", "tres"]);
        assert_eq!(notifier.messages(NotificationKind::Error), vec!["dos"]);
    }

    #[test]
    fn test_auto_confirm() {
        assert!(AutoConfirm(true).confirm("¿Eliminar?"));
        assert!(!AutoConfirm(false).confirm("¿Eliminar?"));
    }
}
