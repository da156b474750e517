//! Operator control surface.
//!
//! A fixed two-item tray menu: item 0 toggles the grant flag, item 1 quits
//! after the grace delay. The menu model is rendered over the loopback HTTP
//! listener, which is also where clicks arrive.

pub mod menu;
pub mod surface;

pub use menu::{MenuAction, MenuItem, TrayMenu, GRANT_ITEM, QUIT_ITEM};
pub use surface::{describe_grace, ClickOutcome, OperatorSurface};
