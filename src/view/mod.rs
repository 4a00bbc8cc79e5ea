//! Text rendering of service snapshots. Nothing here touches state.

pub mod format;
pub mod tables;

pub use format::*;
pub use tables::*;

use crate::domain::Identity;
use crate::ui::{Notice, ViewSwitcher};

pub fn render_notice(notice: &Notice) -> String {
    format!("[{}] {}", notice.kind, notice.message)
}

pub fn render_identity(identity: &Identity) -> String {
    format!("Logged in as {} ({})", identity.display_name(), identity.role)
}

/// One line of tab names with the active one bracketed.
pub fn render_tabs(switcher: &ViewSwitcher) -> String {
    switcher
        .views()
        .iter()
        .map(|view| if switcher.is_active(view) { format!("[{view}]") } else { view.to_string() })
        .collect::<Vec<_>>()
        .join("  ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tabs_mark_the_active_panel() {
        let mut panels = ViewSwitcher::new(&["sales", "users", "employees"]);
        assert_eq!(render_tabs(&panels), "[sales]  users  employees");

        panels.switch_view("employees");
        assert_eq!(render_tabs(&panels), "sales  users  [employees]");
    }
}
