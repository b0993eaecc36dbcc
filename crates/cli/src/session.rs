//! Interactive menu loop over the device registry.
//!
//! The session owns the registry for its whole lifetime and is generic over
//! its streams, so tests drive it with in-memory buffers. Domain failures are
//! rendered as `[prefix] ...` lines and never end the session; only stream
//! errors do.

use std::io::{BufRead, Write};

use anyhow::{Context, Result};

use titanium_core::{DomainError, Price};
use titanium_devices::{DeviceBase, DeviceKind, DeviceRegistry, FieldValues, factory_for};

use crate::config::Config;
use crate::menu::MenuAction;

const ACTION_PROMPT: &str = "\nChoose an action (enter the matching number) >> ";
const SERIAL_PROMPT: &str = "Enter serial number: ";
const BRAND_PROMPT: &str = "Enter brand: ";
const PRICE_PROMPT: &str = "Enter price: ";
const RULE: &str = "=======================================";

/// Whether the loop keeps going after an action.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum Flow {
    Continue,
    Exit,
}

pub struct Session<R, W> {
    registry: DeviceRegistry,
    input: R,
    output: W,
    prefix: String,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(config: &Config, input: R, output: W) -> Self {
        Self::with_registry(config, DeviceRegistry::new(), input, output)
    }

    pub fn with_registry(config: &Config, registry: DeviceRegistry, input: R, output: W) -> Self {
        Self {
            registry,
            input,
            output,
            prefix: config.prefix.clone(),
        }
    }

    pub fn registry(&self) -> &DeviceRegistry {
        &self.registry
    }

    pub fn into_parts(self) -> (DeviceRegistry, W) {
        (self.registry, self.output)
    }

    /// Run until the operator picks Exit or the input runs dry.
    pub fn run(&mut self) -> Result<()> {
        loop {
            self.show_menu()?;
            let Some(choice) = self.prompt(ACTION_PROMPT)? else {
                break;
            };

            let flow = match choice.parse::<MenuAction>() {
                Ok(action) => self.dispatch(action)?,
                Err(_) => {
                    tracing::debug!(choice = %choice.trim(), "unknown menu choice");
                    let last = MenuAction::Exit.key();
                    self.status(&format!(
                        "Error: invalid choice. Please enter a number from 1 to {last}."
                    ))?;
                    Flow::Continue
                }
            };

            if flow == Flow::Exit {
                break;
            }
        }

        self.output.flush().context("failed to flush console output")?;
        Ok(())
    }

    fn dispatch(&mut self, action: MenuAction) -> Result<Flow> {
        tracing::debug!(?action, "menu action");
        match action {
            MenuAction::Add => self.add_device(),
            MenuAction::ListAll => self.list_devices().map(|()| Flow::Continue),
            MenuAction::Find => self.find_device(),
            MenuAction::Remove => self.remove_device(),
            MenuAction::Exit => Ok(Flow::Exit),
        }
    }

    fn show_menu(&mut self) -> Result<()> {
        let mut menu = format!("\n============ {} ============\n", self.prefix);
        for action in MenuAction::ALL {
            menu.push_str(&format!("{}. {}\n", action.key(), action.label()));
        }
        menu.push_str(RULE);
        self.line(&menu)
    }

    fn add_device(&mut self) -> Result<Flow> {
        let mut kinds = String::from("\nChoose a device type:");
        for kind in DeviceKind::ALL {
            kinds.push_str(&format!("\n{}. {}", kind.menu_key(), kind.label()));
        }
        self.line(&kinds)?;

        let Some(choice) = self.prompt(ACTION_PROMPT)? else {
            return Ok(Flow::Exit);
        };
        let kind = match choice.parse::<DeviceKind>() {
            Ok(kind) => kind,
            Err(err) => return self.reject(&err),
        };

        let Some(serial_number) = self.prompt(SERIAL_PROMPT)? else {
            return Ok(Flow::Exit);
        };
        // Fail fast before asking for the remaining fields; `add` re-checks.
        if self.registry.contains(&serial_number) {
            return self.reject(&DomainError::duplicate(serial_number));
        }

        let Some(brand) = self.prompt(BRAND_PROMPT)? else {
            return Ok(Flow::Exit);
        };
        let Some(price_text) = self.prompt(PRICE_PROMPT)? else {
            return Ok(Flow::Exit);
        };
        let price = match price_text.parse::<Price>() {
            Ok(price) => price,
            Err(err) => return self.reject(&err),
        };

        let factory = factory_for(kind);
        let mut fields = FieldValues::new();
        for spec in factory.fields() {
            let Some(value) = self.prompt(spec.prompt)? else {
                return Ok(Flow::Exit);
            };
            fields.insert(spec.key, value);
        }

        let base = DeviceBase::new(serial_number, brand, price);
        let added = factory
            .create(base, &fields)
            .and_then(|device| {
                let description = device.describe();
                self.registry.add(device).map(|()| description)
            });

        match added {
            Ok(description) => {
                tracing::info!(%kind, devices = self.registry.len(), "device added");
                self.status("Device added successfully:")?;
                self.line(&description)?;
                Ok(Flow::Continue)
            }
            Err(err) => self.reject(&err),
        }
    }

    fn list_devices(&mut self) -> Result<()> {
        let mut listing = String::from("\nDevice list:");
        for device in self.registry.list_all() {
            listing.push('\n');
            listing.push_str(&device.describe());
        }
        self.line(&listing)
    }

    fn find_device(&mut self) -> Result<Flow> {
        let Some(serial_number) = self.prompt(SERIAL_PROMPT)? else {
            return Ok(Flow::Exit);
        };
        let found = self.registry.find(&serial_number).map(|d| d.describe());
        match found {
            Ok(description) => {
                self.line("\nDevice info:")?;
                self.line(&description)?;
                Ok(Flow::Continue)
            }
            Err(err) => self.reject(&err),
        }
    }

    fn remove_device(&mut self) -> Result<Flow> {
        let Some(serial_number) = self.prompt(SERIAL_PROMPT)? else {
            return Ok(Flow::Exit);
        };
        match self.registry.remove(&serial_number) {
            Ok(device) => {
                tracing::info!(kind = %device.kind(), devices = self.registry.len(), "device removed");
                self.status("Device removed successfully:")?;
                self.line(&device.describe())?;
                Ok(Flow::Continue)
            }
            Err(err) => self.reject(&err),
        }
    }

    /// Report a domain failure; the action is abandoned, the session is not.
    fn reject(&mut self, err: &DomainError) -> Result<Flow> {
        tracing::info!(error = %err, "action rejected");
        let message = match err {
            DomainError::DuplicateIdentifier(serial) => {
                format!("A device with serial number {serial} already exists!")
            }
            DomainError::NotFound(serial) => {
                format!("Device with serial number {serial} not found.")
            }
            DomainError::InvalidSelection(_) => "Invalid choice. Please try again.".to_string(),
            DomainError::MalformedNumeric(raw) => {
                format!("Price must be a number, got {:?}.", raw.trim())
            }
            DomainError::MissingField(key) => format!("Missing value for {key}."),
        };
        self.status(&message)?;
        Ok(Flow::Continue)
    }

    fn status(&mut self, message: &str) -> Result<()> {
        let line = format!("\n[{}] {}", self.prefix, message);
        self.line(&line)
    }

    fn line(&mut self, text: &str) -> Result<()> {
        writeln!(self.output, "{text}").context("failed to write to console")
    }

    /// Show `text` and read one line. `None` means the input is exhausted.
    ///
    /// Only the line terminator is stripped; other whitespace is kept.
    fn prompt(&mut self, text: &str) -> Result<Option<String>> {
        write!(self.output, "{text}").context("failed to write to console")?;
        self.output.flush().context("failed to flush console output")?;

        let mut buf = String::new();
        let read = self
            .input
            .read_line(&mut buf)
            .context("failed to read operator input")?;
        if read == 0 {
            tracing::debug!("operator input closed");
            return Ok(None);
        }

        let trimmed = buf.strip_suffix('\n').unwrap_or(&buf);
        let trimmed = trimmed.strip_suffix('\r').unwrap_or(trimmed);
        Ok(Some(trimmed.to_string()))
    }
}
