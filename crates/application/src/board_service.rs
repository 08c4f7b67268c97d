//! The ordered assignment board state machine.
//!
//! One [`Board`] drives the task-group element list for whichever group the
//! operator has selected: fetch, live drag preview, batch reorder commit,
//! and the self-healing re-fetch that replaces local state with the
//! backend's canonical order after every successful commit.
//!
//! The interaction lifecycle per group is `Idle` → `Loaded` →
//! (`Dragging` ↔ `Loaded`) → `Committing` → `Loaded`. Drag and commit
//! entry points reject calls while a commit is in flight, so two reorder
//! commits for the same group can never overlap from one board instance.


use std::sync::Arc;

use managersol_core::{AppError, AppResult};
use managersol_domain::{
    FIRST_COLUMN, GroupId, GroupMembershipItem, build_reorder_payload, relocate,
};
use tracing::{debug, warn};

use crate::board_ports::{AssignElementInput, BoardGateway};

/// Lifecycle phase of the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardPhase {
    /// No group selected; the list is empty.
    Idle,
    /// A group's rows are loaded in local editable order.
    Loaded,
    /// One row is the active drag source; the list is a live preview.
    Dragging,
    /// A reorder persist request is in flight.
    Committing,
}

/// Result of a successful reorder commit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommitOutcome {
    /// Rows persisted with new dense sort orders.
    pub committed: usize,
    /// Rows left out because they had no usable identifier; informational,
    /// surfaced to the operator alongside the success notice.
    pub skipped: usize,
}

/// Ordered assignment board for one operator.
pub struct Board {
    gateway: Arc<dyn BoardGateway>,
    group: Option<GroupId>,
    items: Vec<GroupMembershipItem>,
    drag_source: Option<String>,
    drag_snapshot: Option<Vec<GroupMembershipItem>>,
    committing: bool,
}

impl Board {
    /// Creates an idle board over a gateway.
    #[must_use]
    pub fn new(gateway: Arc<dyn BoardGateway>) -> Self {
        Self {
            gateway,
            group: None,
            items: Vec::new(),
            drag_source: None,
            drag_snapshot: None,
            committing: false,
        }
    }

    /// Returns the current lifecycle phase.
    #[must_use]
    pub fn phase(&self) -> BoardPhase {
        if self.committing {
            BoardPhase::Committing
        } else if self.drag_source.is_some() {
            BoardPhase::Dragging
        } else if self.group.is_some() {
            BoardPhase::Loaded
        } else {
            BoardPhase::Idle
        }
    }

    /// Returns the selected group, if any.
    #[must_use]
    pub fn group(&self) -> Option<&GroupId> {
        self.group.as_ref()
    }

    /// Returns the rows in their current local order.
    #[must_use]
    pub fn items(&self) -> &[GroupMembershipItem] {
        self.items.as_slice()
    }

    /// Selects a group and loads its rows, or deselects the active group.
    ///
    /// Selecting the already-active group toggles the board back to idle
    /// with an empty list. Any unfinished drag is abandoned.
    pub async fn select_group(&mut self, group_id: GroupId) -> AppResult<()> {
        self.ensure_not_committing()?;
        self.drag_source = None;
        self.drag_snapshot = None;

        if self.group.as_ref() == Some(&group_id) {
            self.group = None;
            self.items.clear();
            return Ok(());
        }

        let mut items = self.gateway.list_items(&group_id).await?;
        items.sort_by_key(GroupMembershipItem::sort_order);
        debug!(group_id = %group_id, count = items.len(), "loaded board rows");
        self.group = Some(group_id);
        self.items = items;
        Ok(())
    }

    /// Begins dragging the row with `item_id`.
    ///
    /// Snapshots the current order so a cancelled drag can restore it.
    pub fn begin_drag(&mut self, item_id: &str) -> AppResult<()> {
        self.ensure_not_committing()?;
        if self.group.is_none() {
            return Err(AppError::Validation("no group selected".to_owned()));
        }
        if item_id.is_empty() {
            return Err(AppError::Validation(
                "cannot drag a row without an identifier".to_owned(),
            ));
        }
        self.index_of(item_id).ok_or_else(|| {
            AppError::NotFound(format!("no board row with id '{item_id}'"))
        })?;

        self.drag_snapshot = Some(self.items.clone());
        self.drag_source = Some(item_id.to_owned());
        Ok(())
    }

    /// Applies one drag-over step: the dragged row is removed and
    /// reinserted at the hovered row's position.
    ///
    /// Called repeatedly as the pointer crosses row boundaries, keeping the
    /// local list a live preview of the final order. Hovering the dragged
    /// row itself is a no-op.
    pub fn drag_over(&mut self, target_id: &str) -> AppResult<()> {
        let source_id = self
            .drag_source
            .clone()
            .ok_or_else(|| AppError::Validation("no drag in progress".to_owned()))?;
        if source_id == target_id {
            return Ok(());
        }

        let source_index = self.index_of(source_id.as_str()).ok_or_else(|| {
            AppError::Internal(format!("drag source '{source_id}' vanished from the list"))
        })?;
        let target_index = self.index_of(target_id).ok_or_else(|| {
            AppError::NotFound(format!("no board row with id '{target_id}'"))
        })?;

        relocate(&mut self.items, source_index, target_index)
    }

    /// Drops the dragged row, committing the previewed order.
    pub async fn drop_item(&mut self) -> AppResult<CommitOutcome> {
        if self.drag_source.is_none() {
            return Err(AppError::Validation("no drag in progress".to_owned()));
        }
        self.drag_source = None;
        self.drag_snapshot = None;
        self.commit().await
    }

    /// Cancels the drag and restores the pre-drag order.
    ///
    /// Only an explicit drop commits; an aborted drag (escape, drop outside
    /// a valid target) discards the preview.
    pub fn cancel_drag(&mut self) {
        if let Some(snapshot) = self.drag_snapshot.take() {
            self.items = snapshot;
        }
        self.drag_source = None;
    }

    /// Persists the current visual order and re-fetches the canonical list.
    ///
    /// Rows without an identifier are skipped and counted. On success the
    /// local list is replaced with the backend's fresh order, masking any
    /// client/server drift. On failure the local order is kept as-is and
    /// the error is returned; there is no automatic retry. The re-fetch is
    /// issued strictly after the persist resolves, never concurrently.
    pub async fn commit(&mut self) -> AppResult<CommitOutcome> {
        self.ensure_not_committing()?;
        let group_id = self
            .group
            .clone()
            .ok_or_else(|| AppError::Validation("no group selected".to_owned()))?;

        let payload = build_reorder_payload(&self.items);
        if payload.skipped > 0 {
            warn!(
                group_id = %group_id,
                skipped = payload.skipped,
                "board rows without identifiers skipped from reorder commit"
            );
        }

        self.committing = true;
        let persisted = self.gateway.reorder_items(&payload.entries).await;
        if let Err(error) = persisted {
            self.committing = false;
            warn!(group_id = %group_id, error = %error, "reorder commit failed");
            return Err(error);
        }

        let refreshed = self.gateway.list_items(&group_id).await;
        self.committing = false;
        let mut items = refreshed?;
        items.sort_by_key(GroupMembershipItem::sort_order);
        self.items = items;

        Ok(CommitOutcome {
            committed: payload.entries.len(),
            skipped: payload.skipped,
        })
    }

    /// Assigns a task element to the selected group.
    ///
    /// New rows always land in the first column; their position comes from
    /// the backend, so the local list is only updated through a full
    /// re-fetch, never by optimistic insertion.
    pub async fn add_item(
        &mut self,
        element_id: impl Into<String>,
        title: Option<String>,
        description: Option<String>,
        mandatory: bool,
    ) -> AppResult<()> {
        self.ensure_not_committing()?;
        let group_id = self
            .group
            .clone()
            .ok_or_else(|| AppError::Validation("no group selected".to_owned()))?;

        let input = AssignElementInput {
            group_id: group_id.clone(),
            element_id: element_id.into(),
            title,
            description,
            mandatory,
            column_number: FIRST_COLUMN,
        };
        let new_id = self.gateway.create_item(&input).await?;
        debug!(group_id = %group_id, item_id = %new_id, "assigned element to group");

        let mut items = self.gateway.list_items(&group_id).await?;
        items.sort_by_key(GroupMembershipItem::sort_order);
        self.items = items;
        Ok(())
    }

    /// Returns a row for read-only display.
    ///
    /// Yields `None` while a drag is in progress, so a click firing
    /// mid-drag cannot open details.
    #[must_use]
    pub fn view_details(&self, item_id: &str) -> Option<&GroupMembershipItem> {
        if self.drag_source.is_some() {
            return None;
        }
        self.items.iter().find(|item| item.id() == item_id)
    }

    fn index_of(&self, item_id: &str) -> Option<usize> {
        self.items.iter().position(|item| item.id() == item_id)
    }

    fn ensure_not_committing(&self) -> AppResult<()> {
        if self.committing {
            return Err(AppError::Conflict(
                "a reorder commit is already in flight for this group".to_owned(),
            ));
        }
        Ok(())
    }
}
