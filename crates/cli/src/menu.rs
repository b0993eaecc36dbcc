use core::str::FromStr;

use titanium_core::DomainError;

/// Top-level console actions, in menu order.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum MenuAction {
    Add,
    ListAll,
    Find,
    Remove,
    Exit,
}

impl MenuAction {
    pub const ALL: [MenuAction; 5] = [
        MenuAction::Add,
        MenuAction::ListAll,
        MenuAction::Find,
        MenuAction::Remove,
        MenuAction::Exit,
    ];

    pub fn key(self) -> &'static str {
        match self {
            MenuAction::Add => "1",
            MenuAction::ListAll => "2",
            MenuAction::Find => "3",
            MenuAction::Remove => "4",
            MenuAction::Exit => "5",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            MenuAction::Add => "Add a new device",
            MenuAction::ListAll => "List all devices",
            MenuAction::Find => "Show a device by serial number",
            MenuAction::Remove => "Remove a device",
            MenuAction::Exit => "Exit",
        }
    }
}

impl FromStr for MenuAction {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let choice = s.trim();
        MenuAction::ALL
            .into_iter()
            .find(|action| action.key() == choice)
            .ok_or_else(|| DomainError::invalid_selection(choice))
    }
}
