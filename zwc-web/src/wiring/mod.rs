//! Hardware wiring configuration
//!
//! GET renders the page from the environment; POST runs one of the page
//! commands (refresh, save profile as, delete profile, apply) and renders the
//! page again with the submitted values overlaid.

pub mod actions;
pub mod form;
pub mod parser;
pub mod presets;
pub mod schema;
pub mod store;

use crate::form::{ConfigPage, FormData};
use form::{WiringFormBuilder, CUSTOM_PROFILE_KEY, SAVEAS_FNAME_KEY};
use store::ProfileStore;
use tracing::{debug, info, warn};
use zwc_common::{EnvStore, OverlayEnv};

pub const PAGE_TITLE: &str = "Wiring";

/// Form field carrying the page command
pub const COMMAND_KEY: &str = "_command";

/// Command submitted with the wiring form
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WiringCommand {
    /// Re-render with the selected profile
    Refresh,
    /// Save the submitted switch setup as a named profile
    SaveAs(String),
    /// Delete the named profile
    Delete(String),
    /// Anything else applies the configuration
    Apply,
}

impl WiringCommand {
    pub fn from_form(data: &FormData) -> Self {
        match data.first_or_empty(COMMAND_KEY) {
            "REFRESH" => WiringCommand::Refresh,
            "SAVEAS" => WiringCommand::SaveAs(data.first_or_empty(SAVEAS_FNAME_KEY).to_string()),
            "DELETE" => WiringCommand::Delete(data.first_or_empty(CUSTOM_PROFILE_KEY).to_string()),
            _ => WiringCommand::Apply,
        }
    }
}

/// Wiring page handler over one profile store
pub struct WiringHandler<'a> {
    store: &'a ProfileStore,
    env: &'a dyn EnvStore,
}

impl<'a> WiringHandler<'a> {
    pub fn new(store: &'a ProfileStore, env: &'a dyn EnvStore) -> Self {
        Self { store, env }
    }

    /// Render the page from the current environment
    pub fn get(&self) -> ConfigPage {
        let current = self.env.get_or_empty(CUSTOM_PROFILE_KEY);
        let profiles = self.store.list();
        let config = WiringFormBuilder::new(self.env, &current, &profiles).build();
        ConfigPage::new(PAGE_TITLE, config)
    }

    /// Run the submitted command and render the resulting page
    ///
    /// Store failures are reported in the page errors; the request itself
    /// never fails.
    pub fn post(&self, data: &FormData) -> ConfigPage {
        let command = WiringCommand::from_form(data);
        info!("Wiring command: {:?}", command);

        let mut errors = Vec::new();
        let mut overlay = OverlayEnv::new(self.env);
        for (key, value) in data.iter_first() {
            if !key.starts_with('_') {
                overlay.set(key, value);
            }
        }

        let mut profiles = self.store.list();
        let current = match command {
            WiringCommand::Refresh => {
                let current = data.first_or_empty(CUSTOM_PROFILE_KEY).to_string();
                debug!("Current custom profile => '{}'", current);
                current
            }
            WiringCommand::SaveAs(name) => {
                match self.store.save(&name, data) {
                    Ok(report) => {
                        if report.skipped > 0 {
                            info!(
                                "Profile '{}': {} non-profile keys not saved",
                                name, report.skipped
                            );
                        }
                        profiles = self.store.list();
                    }
                    Err(e) => {
                        warn!("Can't save wiring custom profile '{}': {}", name, e);
                        errors.push(format!("Can't save profile '{}': {}", name, e));
                    }
                }
                name
            }
            WiringCommand::Delete(name) => {
                if name.is_empty() {
                    errors.push("No custom profile selected".to_string());
                } else if let Err(e) = self.store.delete(&name) {
                    warn!("Can't delete wiring custom profile '{}': {}", name, e);
                    errors.push(format!("Can't delete profile '{}': {}", name, e));
                }
                profiles.remove(&name).to_string()
            }
            WiringCommand::Apply => {
                info!(
                    "Applying {} wiring values; persistence and UI restart are delegated",
                    overlay.len()
                );
                overlay.get_or_empty(CUSTOM_PROFILE_KEY)
            }
        };
        // Keep the selector consistent with the page that is rendered
        overlay.set(CUSTOM_PROFILE_KEY, current.clone());

        let config = WiringFormBuilder::new(&overlay, &current, &profiles).build();
        ConfigPage::new(PAGE_TITLE, config).with_errors(errors)
    }
}
