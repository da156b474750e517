use tokio::process::Command;

use super::{Notification, NotificationSink};

/// Spawns an external notifier, `notify-send` style:
/// `[--wait] [--replace-id=<id>] [-i icon] title message`.
///
/// `wait` maps to `--wait`; a non-zero `id` replaces that earlier
/// notification.
/// The child is never awaited. Must be called from inside a tokio runtime.
#[derive(Debug)]
pub struct CommandSink {
    program: String,
}

impl CommandSink {
    pub fn new(program: String) -> Self {
        Self { program }
    }

    fn args(n: &Notification) -> Vec<String> {
        let mut args = Vec::with_capacity(6);
        if n.wait {
            args.push("--wait".to_string());
        }
        if n.id != 0 {
            args.push(format!("--replace-id={}", n.id));
        }
        if let Some(icon) = &n.icon {
            args.push("-i".to_string());
            args.push(icon.display().to_string());
        }
        args.push(n.title.clone());
        args.push(n.message.clone());
        args
    }
}

impl NotificationSink for CommandSink {
    fn notify(&self, n: Notification) {
        let spawned = Command::new(&self.program)
            .args(Self::args(&n))
            .kill_on_drop(false)
            .spawn();
        match spawned {
            // Reap in the background so no zombie is left behind.
            Ok(mut child) => {
                tokio::spawn(async move {
                    let _ = child.wait().await;
                });
            }
            Err(e) => tracing::warn!(program = %self.program, error = %e, "notifier spawn failed"),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    #[test]
    fn args_forward_wait_and_icon() {
        let n = Notification {
            title: "Secure Scuttlebutt".into(),
            message: "hi".into(),
            icon: Some(PathBuf::from("icon.png")),
            wait: true,
            id: 0,
        };
        assert_eq!(
            CommandSink::args(&n),
            vec!["--wait", "-i", "icon.png", "Secure Scuttlebutt", "hi"]
        );
    }

    #[test]
    fn args_forward_replace_id() {
        let n = Notification {
            title: "t".into(),
            message: "m".into(),
            icon: None,
            wait: false,
            id: 7,
        };
        assert_eq!(CommandSink::args(&n), vec!["--replace-id=7", "t", "m"]);
    }

    #[tokio::test]
    async fn missing_program_is_swallowed() {
        let sink = CommandSink::new("definitely-not-a-notifier-binary".into());
        sink.notify(Notification {
            title: "t".into(),
            message: "m".into(),
            icon: None,
            wait: true,
            id: 0,
        });
    }
}
