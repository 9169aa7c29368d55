use crate::entities::*;
use sea_orm::*;

pub mod api;

pub use api::{TodoState, create_todo_router};

#[derive(Debug, PartialEq, Clone, Eq, Hash)]
pub struct Todo {
    id: i32,
    title: String,
    status: Option<String>,
}

impl Todo {
    pub fn new(id: i32, title: String, status: Option<String>) -> Self {
        Self { id, title, status }
    }

    /// Returns the ID of the todo.
    pub fn id(&self) -> i32 {
        self.id
    }

    /// Returns the title of the todo.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the status of the todo, if one has been set.
    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }
}

impl From<todo::Model> for Todo {
    fn from(model: todo::Model) -> Self {
        Todo::new(model.id, model.title, model.status)
    }
}

/// Error type for TodoService operations.
#[derive(Debug, thiserror::Error)]
pub enum TodoServiceError {
    /// Represents a database error.
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),
}

pub struct TodoService<'a> {
    db: &'a sea_orm::DatabaseConnection,
}

impl TodoService<'_> {
    pub fn new(db: &sea_orm::DatabaseConnection) -> TodoService<'_> {
        TodoService { db }
    }

    /// Retrieves all todo entries from the database in insertion order.
    ///
    /// # Returns
    ///
    /// A `Result` containing a vector of `Todo` if successful, or an error otherwise.
    #[tracing::instrument(skip(self))]
    pub async fn get_all_todos(&self) -> Result<Vec<Todo>, TodoServiceError> {
        let todos = todo::Entity::find()
            .order_by_asc(todo::Column::Id)
            .all(self.db)
            .await?
            .into_iter()
            .map(Todo::from)
            .collect();
        Ok(todos)
    }

    /// Creates a new todo entry in the database.
    ///
    /// # Arguments
    ///
    /// * `title` - The title of the todo. Not validated; an empty title is stored as-is.
    ///
    /// # Returns
    ///
    /// A `Result` containing the created `Todo` if successful, or an error otherwise.
    #[tracing::instrument(skip(self))]
    pub async fn create_todo(&self, title: String) -> Result<Todo, TodoServiceError> {
        let active_model = todo::ActiveModel {
            title: ActiveValue::Set(title),
            ..Default::default()
        };
        let created_model = active_model.insert(self.db).await?;
        Ok(Todo::from(created_model))
    }

    /// Overwrites the title and status of the todo entry matching `id`.
    ///
    /// A missing `id` is not an error: the update matches zero rows and the
    /// returned count is 0.
    ///
    /// # Arguments
    ///
    /// * `id` - The ID of the todo entry to update.
    /// * `title` - The new title for the entry.
    /// * `status` - The new status for the entry.
    ///
    /// # Returns
    ///
    /// A `Result` containing the number of rows affected if successful, or an error otherwise.
    #[tracing::instrument(skip(self))]
    pub async fn update_todo_by_id(
        &self,
        id: i32,
        title: String,
        status: String,
    ) -> Result<u64, TodoServiceError> {
        let update = todo::ActiveModel {
            title: ActiveValue::Set(title),
            status: ActiveValue::Set(Some(status)),
            ..Default::default()
        };
        let result = todo::Entity::update_many()
            .set(update)
            .filter(todo::Column::Id.eq(id))
            .exec(self.db)
            .await?;
        Ok(result.rows_affected)
    }

    /// Deletes the todo entry matching `id`.
    ///
    /// Same semantics as update: a missing `id` succeeds with a count of 0.
    ///
    /// # Arguments
    ///
    /// * `id` - The ID of the todo entry to delete.
    ///
    /// # Returns
    ///
    /// A `Result` containing the number of rows affected if successful, or an error otherwise.
    #[tracing::instrument(skip(self))]
    pub async fn delete_todo_by_id(&self, id: i32) -> Result<u64, TodoServiceError> {
        let result = todo::Entity::delete_by_id(id).exec(self.db).await?;
        Ok(result.rows_affected)
    }
}
