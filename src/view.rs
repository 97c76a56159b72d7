use itertools::Itertools;
use serde::Serialize;

use crate::{errors::Result, id::RecordId, record::FileRecord};

/// Per-record operations a display surface may offer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Open,
    Duplicate,
    Rename,
    Download,
    Delete,
    Pin,
    Share,
}

impl Action {
    /// Every action the core implements.
    pub const ALL: [Action; 7] = [
        Action::Open,
        Action::Duplicate,
        Action::Rename,
        Action::Download,
        Action::Delete,
        Action::Pin,
        Action::Share,
    ];
}

/// The set of actions a session exposes per record.
///
/// The rendered action list is configuration, not a hard-coded constant: a
/// driver with no share affordance simply omits [`Action::Share`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionSet(Vec<Action>);

impl Default for ActionSet {
    fn default() -> Self {
        ActionSet(Action::ALL.to_vec())
    }
}

impl ActionSet {
    pub fn new(actions: impl IntoIterator<Item = Action>) -> Self {
        ActionSet(actions.into_iter().unique().collect())
    }

    pub fn contains(&self, action: Action) -> bool {
        self.0.contains(&action)
    }

    pub fn actions(&self) -> &[Action] {
        &self.0
    }
}

/// One displayed row: the record fields a driver needs plus the visibility
/// verdict for the active search term.
#[derive(Debug, Clone, Serialize)]
pub struct ViewRow {
    pub id: RecordId,
    pub name: String,
    pub size: u64,
    pub display_size: String,
    pub pinned: bool,
    pub shared: bool,
    pub visible: bool,
}

/// Project the registry's current order through the active search term.
///
/// Pure: no reordering, no mutation. A row is visible when the term is
/// empty or the record's name contains it case-insensitively.
pub fn project(records: &[FileRecord], search_term: &str) -> Vec<ViewRow> {
    let term = search_term.to_lowercase();

    records
        .iter()
        .map(|record| {
            let visible =
                term.is_empty() || record.name().to_lowercase().contains(&term);
            ViewRow {
                id: record.id(),
                name: record.name().to_string(),
                size: record.size(),
                display_size: format_size(record.size()),
                pinned: record.pinned(),
                shared: record.shared(),
                visible,
            }
        })
        .collect()
}

/// Serialize projected rows for drivers that consume JSON.
pub fn rows_to_json(rows: &[ViewRow]) -> Result<String> {
    Ok(serde_json::to_string(rows)?)
}

const UNIT: f64 = 1024.0;

/// Human-readable size with two decimals.
///
/// Sizes below a megabyte always render in KB, matching the storage-used
/// display (1024 + 2048 bytes formats as "3.00 KB").
pub fn format_size(bytes: u64) -> String {
    let kb = bytes as f64 / UNIT;
    let mb = kb / UNIT;
    let gb = mb / UNIT;
    let tb = gb / UNIT;

    if tb > 1.0 {
        format!("{:.2} TB", tb)
    } else if gb > 1.0 {
        format!("{:.2} GB", gb)
    } else if mb > 1.0 {
        format!("{:.2} MB", mb)
    } else {
        format!("{:.2} KB", kb)
    }
}
