use itertools::Itertools;

use crate::{
    blob::SourceFile,
    errors::{Result, StashError},
    id::RecordId,
    platform::{PlatformServices, ShareOutcome},
    registry::Registry,
    view::{self, ActionSet, ViewRow},
};

/// One user-triggered event, keyed by stable record id where it targets a
/// record.
///
/// Drivers emit commands and the session applies them; there is no per-row
/// handler wiring in the core.
#[derive(Debug, Clone)]
pub enum Command {
    Ingest(Vec<SourceFile>),
    Duplicate(RecordId),
    Rename(RecordId, String),
    Delete(RecordId),
    TogglePinned(RecordId),
    ToggleShared(RecordId),
    Open(RecordId),
    Download(RecordId),
    Share(RecordId),
    Search(String),
}

/// Transient, dismissible user-facing message emitted alongside a render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Ingested { count: usize, names: String },
    ShareDelivered { name: String },
    /// Share capability absent; the user gets a manual download affordance
    /// for the named record.
    ShareFallback { name: String },
    ShareFailed { name: String, reason: String },
    SharedFlag { name: String, shared: bool },
    /// A rename was rejected; the record keeps its prior name.
    RenameRejected { input: String },
}

/// Rendering surface. Receives the full projected row set after every change
/// plus any notices the change produced; owns all markup and styling.
pub trait DisplayDriver {
    fn render(&mut self, rows: &[ViewRow], total_size: u64);
    fn notify(&mut self, notice: &Notice);
}

/// Drives one session's worth of state: the registry, the active search
/// term and the configured action set.
///
/// Flow is strictly one-way: a command mutates or queries the registry, then
/// the whole view is re-projected to the driver. Commands run to completion
/// one at a time on the caller's thread; there is nothing to lock. The
/// platform share call is fire-and-forget: its outcome becomes a notice and
/// never blocks or reorders registry operations.
pub struct Session<'a, D, P> {
    registry: Registry,
    search_term: String,
    actions: ActionSet,
    driver: &'a mut D,
    platform: &'a P,
}

impl<'a, D: DisplayDriver, P: PlatformServices> Session<'a, D, P> {
    pub fn new(driver: &'a mut D, platform: &'a P) -> Self {
        Session {
            registry: Registry::new(),
            search_term: String::new(),
            actions: ActionSet::default(),
            driver,
            platform,
        }
    }

    /// Replace the default action set with a restricted one.
    pub fn with_actions(mut self, actions: ActionSet) -> Self {
        self.actions = actions;
        self
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn actions(&self) -> &ActionSet {
        &self.actions
    }

    /// Apply one command end-to-end: mutate or query, re-project, notify.
    ///
    /// Unknown ids are benign no-ops except for duplication, whose caller
    /// expects a fresh id back. A rejected rename keeps the prior name and
    /// surfaces a notice instead of an error.
    pub fn apply(&mut self, command: Command) -> Result<()> {
        log::trace!("Applying {:?}", command);

        match command {
            Command::Ingest(sources) => {
                let ids = self.registry.ingest(sources);
                if !ids.is_empty() {
                    let names = ids
                        .iter()
                        .filter_map(|id| self.registry.get(*id))
                        .map(|r| r.name())
                        .join(", ");
                    self.driver.notify(&Notice::Ingested {
                        count: ids.len(),
                        names,
                    });
                }
                self.render();
            }
            Command::Duplicate(id) => {
                self.registry.duplicate(id)?;
                self.render();
            }
            Command::Rename(id, new_name) => {
                match self.registry.rename(id, &new_name) {
                    Ok(()) => self.render(),
                    Err(StashError::InvalidName(input)) => {
                        self.driver
                            .notify(&Notice::RenameRejected { input });
                        // The edit surface closes on commit either way.
                        self.render();
                    }
                    Err(StashError::NotFound(_)) => {}
                    Err(other) => return Err(other),
                }
            }
            Command::Delete(id) => {
                self.registry.delete(id);
                self.render();
            }
            Command::TogglePinned(id) => {
                self.registry.toggle_pinned(id);
                self.render();
            }
            Command::ToggleShared(id) => {
                self.registry.toggle_shared(id);
                if let Some(record) = self.registry.get(id) {
                    let notice = Notice::SharedFlag {
                        name: record.name().to_string(),
                        shared: record.shared(),
                    };
                    self.driver.notify(&notice);
                }
                self.render();
            }
            Command::Open(id) => {
                if let Some(record) = self.registry.get(id) {
                    self.platform.open(record.content(), record.name())?;
                }
            }
            Command::Download(id) => {
                if let Some(record) = self.registry.get(id) {
                    self.platform
                        .download(record.content(), record.name())?;
                }
            }
            Command::Share(id) => {
                if let Some(record) = self.registry.get(id) {
                    let name = record.name().to_string();
                    let notice = match self
                        .platform
                        .share(record.content(), record.name())
                    {
                        ShareOutcome::Delivered => {
                            Notice::ShareDelivered { name }
                        }
                        ShareOutcome::Unsupported => {
                            Notice::ShareFallback { name }
                        }
                        ShareOutcome::Failed(reason) => {
                            Notice::ShareFailed { name, reason }
                        }
                    };
                    self.driver.notify(&notice);
                }
            }
            Command::Search(term) => {
                self.search_term = term;
                self.render();
            }
        }
        Ok(())
    }

    /// Full re-projection of the current registry to the driver.
    fn render(&mut self) {
        let rows = view::project(self.registry.records(), &self.search_term);
        self.driver
            .render(&rows, self.registry.total_size());
    }
}
