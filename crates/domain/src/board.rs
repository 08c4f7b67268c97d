//! Ordered assignment board entities and the reorder algorithms.
//!
//! The board shows the task elements assigned to one task group model, in
//! `sort_order` rank. Two pure pieces live here: the drag relocation step
//! (remove the dragged item, reinsert it at the hovered position) and the
//! commit payload builder that turns the visual order into dense
//! `sort_order` values for the batch reorder endpoint.

use serde::{Deserialize, Serialize};

use managersol_core::{AppError, AppResult};

/// Column every newly assigned element lands in.
///
/// The reorder protocol never moves items between columns; `column_number`
/// is carried through commits unchanged.
pub const FIRST_COLUMN: i32 = 1;

/// Identifier of a task group model owning board entries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GroupId(String);

impl GroupId {
    /// Creates a group identifier from a backend-assigned value.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the underlying identifier string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl std::fmt::Display for GroupId {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

/// One row linking a task element to a task group model.
///
/// `id` is backend-assigned and may be empty on a partially loaded row;
/// such rows are skipped by the commit payload builder rather than sent
/// with an unusable identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupMembershipItem {
    #[serde(default)]
    id: String,
    #[serde(default, alias = "task_group_model_id")]
    group_id: GroupId,
    sort_order: i32,
    column_number: i32,
    #[serde(default)]
    mandatory: bool,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    description: Option<String>,
}

impl GroupMembershipItem {
    /// Creates a board entry from backend data.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        group_id: GroupId,
        sort_order: i32,
        column_number: i32,
        mandatory: bool,
        title: Option<String>,
        description: Option<String>,
    ) -> Self {
        Self {
            id: id.into(),
            group_id,
            sort_order,
            column_number,
            mandatory,
            title,
            description,
        }
    }

    /// Returns the backend-assigned row identifier; empty when the row has
    /// not been fully loaded.
    #[must_use]
    pub fn id(&self) -> &str {
        self.id.as_str()
    }

    /// Returns the owning group.
    #[must_use]
    pub fn group_id(&self) -> &GroupId {
        &self.group_id
    }

    /// Returns the rank within the group as last confirmed by the backend.
    #[must_use]
    pub fn sort_order(&self) -> i32 {
        self.sort_order
    }

    /// Returns the column the row is placed in.
    #[must_use]
    pub fn column_number(&self) -> i32 {
        self.column_number
    }

    /// Returns whether the element is mandatory within the group.
    #[must_use]
    pub fn mandatory(&self) -> bool {
        self.mandatory
    }

    /// Returns the display title, if any.
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Returns the display description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}

/// One row of a batch reorder request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReorderEntry {
    /// Backend-assigned row identifier.
    pub id: String,
    /// New dense rank, starting at 1.
    pub sort_order: i32,
    /// Column carried through unchanged from the pre-commit row.
    pub column_number: i32,
}

/// A reorder request body together with what was left out of it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReorderPayload {
    /// Rows to persist, in visual order, ranked `1..=entries.len()`.
    pub entries: Vec<ReorderEntry>,
    /// Rows skipped because they had no usable identifier.
    pub skipped: usize,
}

/// Moves the item at `source_index` so it lands at `target_index`.
///
/// This is the single drag-over step: a splice-remove followed by a
/// splice-insert at the hovered item's position, not a swap. Both indices
/// refer to the list as it is when the pointer crosses the boundary.
/// Equal indices are a no-op.
pub fn relocate<T>(items: &mut Vec<T>, source_index: usize, target_index: usize) -> AppResult<()> {
    let len = items.len();
    if source_index >= len || target_index >= len {
        return Err(AppError::Validation(format!(
            "relocate indices ({source_index}, {target_index}) out of bounds for {len} items"
        )));
    }

    if source_index == target_index {
        return Ok(());
    }

    let item = items.remove(source_index);
    items.insert(target_index, item);
    Ok(())
}

/// Builds the batch reorder request from the current visual order.
///
/// Rows with an empty identifier are skipped and counted; the remaining
/// rows get `sort_order` values `1..=M` in visual order with their
/// `column_number` untouched.
#[must_use]
pub fn build_reorder_payload(items: &[GroupMembershipItem]) -> ReorderPayload {
    let mut entries = Vec::with_capacity(items.len());
    let mut skipped = 0_usize;

    for item in items {
        if item.id().is_empty() {
            skipped += 1;
            continue;
        }

        let rank = entries.len() + 1;
        entries.push(ReorderEntry {
            id: item.id().to_owned(),
            sort_order: i32::try_from(rank).unwrap_or(i32::MAX),
            column_number: item.column_number(),
        });
    }

    ReorderPayload { entries, skipped }
}
