use async_trait::async_trait;
use managersol_core::AppResult;
use managersol_domain::{GroupId, GroupMembershipItem, ReorderEntry};

/// Input payload for assigning a task element to a group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssignElementInput {
    /// Owning task group model.
    pub group_id: GroupId,
    /// Task element definition to assign.
    pub element_id: String,
    /// Optional display title for the membership row.
    pub title: Option<String>,
    /// Optional display description for the membership row.
    pub description: Option<String>,
    /// Whether the element is mandatory within the group.
    pub mandatory: bool,
    /// Column the row is placed in.
    pub column_number: i32,
}

/// Gateway port for the task-group board endpoints.
#[async_trait]
pub trait BoardGateway: Send + Sync {
    /// Fetches the membership rows of one group, in canonical order.
    async fn list_items(&self, group_id: &GroupId) -> AppResult<Vec<GroupMembershipItem>>;

    /// Creates a membership row; the backend assigns id and sort order.
    ///
    /// Returns the new row identifier.
    async fn create_item(&self, input: &AssignElementInput) -> AppResult<String>;

    /// Persists a new order for a group's rows as one batch operation.
    async fn reorder_items(&self, entries: &[ReorderEntry]) -> AppResult<()>;
}
