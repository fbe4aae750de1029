use crate::client::TaskSaathiClient;
use crate::client::response::{read_empty, read_json};
use crate::domain::listing::Listing;
use crate::domain::task::{NewTask, Task, TaskChanges, TaskQuery, TaskStatus};
use crate::error::Result;
use reqwest::Method;
use serde::Serialize;
use uuid::Uuid;

#[derive(Serialize)]
struct StatusChange {
    status: TaskStatus,
}

impl TaskSaathiClient {
    /// Tasks visible to the signed-in user: the whole company for an
    /// employer, assigned tasks for an employee.
    ///
    /// # Errors
    /// `ClientError::NotAuthenticated`, `ClientError::Http` ("Failed to fetch tasks"),
    /// `ClientError::Network`.
    #[tracing::instrument(skip(self), err(level = "warn"))]
    pub async fn get_tasks(&self, query: &TaskQuery) -> Result<Vec<Task>> {
        let mut url = self.endpoint(&self.profile.tasks_path())?;
        let pairs = query.to_pairs();
        if !pairs.is_empty() {
            url.query_pairs_mut().extend_pairs(pairs);
        }

        let request = self.authorized(Method::GET, url).await?;
        let listing: Listing<Task> = read_json(self.send(request).await?, "Failed to fetch tasks").await?;
        let tasks = listing.into_items();
        tracing::debug!(count = tasks.len(), "tasks fetched");
        Ok(tasks)
    }

    /// Tasks assigned to the signed-in user.
    ///
    /// # Errors
    /// `ClientError::NotAuthenticated`, `ClientError::Http` ("Failed to fetch tasks"),
    /// `ClientError::Network`.
    #[tracing::instrument(skip(self), err(level = "warn"))]
    pub async fn get_my_tasks(&self) -> Result<Vec<Task>> {
        let url = self.endpoint(&self.profile.my_tasks_path())?;
        let request = self.authorized(Method::GET, url).await?;
        let listing: Listing<Task> = read_json(self.send(request).await?, "Failed to fetch tasks").await?;
        Ok(listing.into_items())
    }

    /// Every task of the company the signed-in employer owns.
    ///
    /// # Errors
    /// `ClientError::NotAuthenticated`, `ClientError::Http` ("Failed to fetch company tasks"),
    /// `ClientError::Network`.
    #[tracing::instrument(skip(self), err(level = "warn"))]
    pub async fn get_company_tasks(&self) -> Result<Vec<Task>> {
        let url = self.endpoint(&self.profile.company_tasks_path())?;
        let request = self.authorized(Method::GET, url).await?;
        let listing: Listing<Task> = read_json(self.send(request).await?, "Failed to fetch company tasks").await?;
        Ok(listing.into_items())
    }

    /// # Errors
    /// `ClientError::NotAuthenticated`, `ClientError::Http` ("Failed to create task"),
    /// `ClientError::Network`.
    #[tracing::instrument(skip_all, fields(title = %task.title), err(level = "warn"))]
    pub async fn create_task(&self, task: &NewTask) -> Result<Task> {
        let url = self.endpoint(&self.profile.tasks_path())?;
        let request = self.authorized(Method::POST, url).await?.json(task);
        let created: Task = read_json(self.send(request).await?, "Failed to create task").await?;
        tracing::info!(task_id = %created.id, "task created");
        Ok(created)
    }

    /// # Errors
    /// `ClientError::NotAuthenticated`, `ClientError::Http` ("Failed to update task"),
    /// `ClientError::Network`.
    #[tracing::instrument(skip(self, changes), err(level = "warn"))]
    pub async fn update_task(&self, id: Uuid, changes: &TaskChanges) -> Result<Task> {
        let url = self.endpoint(&self.profile.task_path(id))?;
        let request = self.authorized(Method::PATCH, url).await?.json(changes);
        read_json(self.send(request).await?, "Failed to update task").await
    }

    /// # Errors
    /// `ClientError::NotAuthenticated`, `ClientError::Http` ("Failed to update task status"),
    /// `ClientError::Network`.
    #[tracing::instrument(skip(self), err(level = "warn"))]
    pub async fn update_task_status(&self, id: Uuid, status: TaskStatus) -> Result<Task> {
        let url = self.endpoint(&self.profile.task_status_path(id))?;
        let request = self.authorized(Method::PATCH, url).await?.json(&StatusChange { status });
        read_json(self.send(request).await?, "Failed to update task status").await
    }

    /// Deletes a task. Both `200` and `204` count as success.
    ///
    /// # Errors
    /// `ClientError::NotAuthenticated`, `ClientError::Http` ("Failed to delete task"),
    /// `ClientError::Network`.
    #[tracing::instrument(skip(self), err(level = "warn"))]
    pub async fn delete_task(&self, id: Uuid) -> Result<()> {
        let url = self.endpoint(&self.profile.task_path(id))?;
        let request = self.authorized(Method::DELETE, url).await?;
        read_empty(self.send(request).await?, "Failed to delete task").await?;
        tracing::info!(task_id = %id, "task deleted");
        Ok(())
    }
}
