//! `titanium-cli`
//!
//! **Responsibility:** the operator console for the device registry.
//!
//! The console is a **thin shell**: it collects raw text, hands it to the
//! factories and the registry in `titanium-devices`, and renders the result.
//! Every domain failure is reported and the loop carries on.

pub mod config;
pub mod menu;
pub mod session;

pub use config::Config;
pub use menu::MenuAction;
pub use session::Session;
