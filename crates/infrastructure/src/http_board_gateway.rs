use async_trait::async_trait;
use managersol_application::{AssignElementInput, BoardGateway};
use managersol_core::{AppError, AppResult};
use managersol_domain::{GroupId, GroupMembershipItem, ReorderEntry};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// HTTP adapter for the task-group board endpoints.
pub struct HttpBoardGateway {
    http_client: reqwest::Client,
    base_url: String,
    token: String,
}

#[derive(Debug, Serialize)]
struct CreateItemRequest<'a> {
    task_group_model_id: &'a str,
    task_element_id: &'a str,
    title: Option<&'a str>,
    description: Option<&'a str>,
    mandatory: bool,
    column_number: i32,
}

#[derive(Debug, Deserialize)]
struct CreateItemResponse {
    id: String,
}

#[derive(Debug, Serialize)]
struct ReorderRequest<'a> {
    items: &'a [ReorderEntry],
}

impl HttpBoardGateway {
    /// Creates a board gateway bound to a backend and a session token.
    #[must_use]
    pub fn new(
        http_client: reqwest::Client,
        base_url: impl Into<String>,
        token: impl Into<String>,
    ) -> Self {
        Self {
            http_client,
            base_url: base_url.into().trim_end_matches('/').to_owned(),
            token: token.into(),
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    async fn check(&self, response: reqwest::Response) -> AppResult<reqwest::Response> {
        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(AppError::Unauthorized(
                "backend rejected the session token".to_owned(),
            ));
        }
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<response body unavailable>".to_owned());
            return Err(AppError::Transport(format!(
                "board request failed with status {status}: {body}"
            )));
        }
        Ok(response)
    }
}

#[async_trait]
impl BoardGateway for HttpBoardGateway {
    async fn list_items(&self, group_id: &GroupId) -> AppResult<Vec<GroupMembershipItem>> {
        let response = self
            .http_client
            .get(self.endpoint("/task-group-elements"))
            .bearer_auth(self.token.as_str())
            .query(&[("group_id", group_id.as_str())])
            .send()
            .await
            .map_err(|error| AppError::Transport(format!("board list failed: {error}")))?;

        let items: Vec<GroupMembershipItem> = self
            .check(response)
            .await?
            .json()
            .await
            .map_err(|error| {
                AppError::Transport(format!("board list returned malformed rows: {error}"))
            })?;
        debug!(group_id = %group_id, count = items.len(), "fetched board rows");
        Ok(items)
    }

    async fn create_item(&self, input: &AssignElementInput) -> AppResult<String> {
        let request = CreateItemRequest {
            task_group_model_id: input.group_id.as_str(),
            task_element_id: input.element_id.as_str(),
            title: input.title.as_deref(),
            description: input.description.as_deref(),
            mandatory: input.mandatory,
            column_number: input.column_number,
        };

        let response = self
            .http_client
            .post(self.endpoint("/task-group-elements"))
            .bearer_auth(self.token.as_str())
            .json(&request)
            .send()
            .await
            .map_err(|error| AppError::Transport(format!("assign element failed: {error}")))?;

        let created: CreateItemResponse =
            self.check(response).await?.json().await.map_err(|error| {
                AppError::Transport(format!("assign element returned malformed body: {error}"))
            })?;
        Ok(created.id)
    }

    async fn reorder_items(&self, entries: &[ReorderEntry]) -> AppResult<()> {
        let response = self
            .http_client
            .put(self.endpoint("/task-group-elements/reorder"))
            .bearer_auth(self.token.as_str())
            .json(&ReorderRequest { items: entries })
            .send()
            .await
            .map_err(|error| AppError::Transport(format!("reorder commit failed: {error}")))?;

        self.check(response).await?;
        debug!(count = entries.len(), "reorder commit accepted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use managersol_domain::ReorderEntry;

    use super::ReorderRequest;

    #[test]
    fn reorder_request_matches_the_wire_contract() {
        let entries = vec![ReorderEntry {
            id: "m-1".to_owned(),
            sort_order: 1,
            column_number: 2,
        }];
        let encoded =
            serde_json::to_string(&ReorderRequest { items: &entries }).unwrap_or_default();
        assert_eq!(
            encoded,
            r#"{"items":[{"id":"m-1","sort_order":1,"column_number":2}]}"#
        );
    }
}
