use std::path::Path;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde::Serialize;

use sbot_host_core::error::{Result, HostError};

pub const GRANT_ITEM: usize = 0;
pub const QUIT_ITEM: usize = 1;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MenuItem {
    pub title: String,
    pub tooltip: String,
    pub checked: bool,
    pub enabled: bool,
}

/// Tray menu as shown to the operator. Icon is base64 of the icon file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrayMenu {
    pub icon: Option<String>,
    pub title: String,
    pub tooltip: String,
    pub items: Vec<MenuItem>,
}

impl TrayMenu {
    pub fn standard(title: &str, granted: bool) -> Self {
        Self {
            icon: None,
            title: title.to_string(),
            tooltip: format!("{title} tray app"),
            items: vec![
                MenuItem {
                    title: "Grant connections".into(),
                    tooltip: "If enabled grant connection for applications".into(),
                    checked: granted,
                    enabled: true,
                },
                MenuItem {
                    title: "Quit".into(),
                    tooltip: "Stop sbot and quit tray application".into(),
                    checked: false,
                    enabled: true,
                },
            ],
        }
    }

    /// Attach an icon; unreadable files leave the menu without one.
    pub fn with_icon_file(mut self, path: &Path) -> Self {
        match std::fs::read(path) {
            Ok(bytes) => self.icon = Some(STANDARD.encode(bytes)),
            Err(e) => tracing::warn!(path = %path.display(), error = %e, "tray icon unreadable"),
        }
        self
    }

    pub fn item(&self, seq_id: usize) -> Option<&MenuItem> {
        self.items.get(seq_id)
    }

    pub fn update_item(&mut self, seq_id: usize, item: MenuItem) -> Result<()> {
        let slot = self
            .items
            .get_mut(seq_id)
            .ok_or_else(|| HostError::BadRequest(format!("no menu item {seq_id}")))?;
        *slot = item;
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    ToggleGrant,
    Quit,
}

impl MenuAction {
    pub fn from_seq_id(seq_id: usize) -> Result<Self> {
        match seq_id {
            GRANT_ITEM => Ok(MenuAction::ToggleGrant),
            QUIT_ITEM => Ok(MenuAction::Quit),
            other => Err(HostError::BadRequest(format!("unknown menu item: {other}"))),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            MenuAction::ToggleGrant => "grant",
            MenuAction::Quit => "quit",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_menu_contract() {
        let m = TrayMenu::standard("Secure Scuttlebutt", false);
        assert_eq!(m.items.len(), 2);
        assert_eq!(m.items[GRANT_ITEM].title, "Grant connections");
        assert!(!m.items[GRANT_ITEM].checked);
        assert_eq!(m.items[QUIT_ITEM].title, "Quit");
        assert!(!m.items[QUIT_ITEM].checked);
    }

    #[test]
    fn seq_ids_map_to_actions() {
        assert_eq!(MenuAction::from_seq_id(0).unwrap(), MenuAction::ToggleGrant);
        assert_eq!(MenuAction::from_seq_id(1).unwrap(), MenuAction::Quit);
        assert_eq!(
            MenuAction::from_seq_id(2).unwrap_err().client_code().as_str(),
            "BAD_REQUEST"
        );
    }

    #[test]
    fn icon_is_base64() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("icon.png");
        std::fs::write(&path, b"png").unwrap();
        let m = TrayMenu::standard("t", false).with_icon_file(&path);
        assert_eq!(m.icon.as_deref(), Some("cG5n"));

        let missing = TrayMenu::standard("t", false).with_icon_file(&dir.path().join("nope.png"));
        assert!(missing.icon.is_none());
    }
}
