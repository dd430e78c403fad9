use serde::{Deserialize, Serialize};

/// Entity kinds whose field sets are known ahead of time.
///
/// Materialization never depends on this table; it only backs the typed
/// projections below. Unknown kinds resolve just the same.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Organization,
    User,
    Comment,
    Project,
    Task,
    Person,
}

#[allow(clippy::should_implement_trait)]
impl EntityKind {
    /// Returns the lower-case tag used as a reference index key.
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Organization => "organization",
            EntityKind::User => "user",
            EntityKind::Comment => "comment",
            EntityKind::Project => "project",
            EntityKind::Task => "task",
            EntityKind::Person => "person",
        }
    }

    /// Parses a `type` tag, ignoring case. Returns `None` for kinds outside
    /// the table.
    pub fn from_str(s: &str) -> Option<EntityKind> {
        match s.to_lowercase().as_str() {
            "organization" => Some(EntityKind::Organization),
            "user" => Some(EntityKind::User),
            "comment" => Some(EntityKind::Comment),
            "project" => Some(EntityKind::Project),
            "task" => Some(EntityKind::Task),
            "person" => Some(EntityKind::Person),
            _ => None,
        }
    }

    /// Field names the server ships for this kind.
    pub fn expected_fields(&self) -> &'static [&'static str] {
        match self {
            EntityKind::Organization => &[
                "permalink", "name", "language", "created_at", "domain", "updated_at",
                "time_zone", "logo_url", "type", "id", "description",
            ],
            EntityKind::User => &[
                "username", "utc_offset", "last_name", "locale", "created_at", "updated_at",
                "time_zone", "avatar_url", "first_name", "type", "id", "biography",
            ],
            EntityKind::Comment => &[
                "body", "hours", "previous_due_on", "user_id", "previous_assigned_id",
                "created_at", "assigned_id", "target_id", "body_html", "updated_at",
                "previous_status", "status", "due_on", "project_id", "type", "id",
                "target_type",
            ],
            EntityKind::Project => &[
                "permalink", "name", "created_at", "archived", "updated_at",
                "organization_id", "owner_user_id", "type", "id",
            ],
            EntityKind::Task => &[
                "status", "watchers", "user_id", "name", "created_at", "assigned_id",
                "first_comment_id", "updated_at", "recent_comment_ids", "comments_count",
                "due_on", "position", "task_list_id", "project_id", "type", "id",
            ],
            EntityKind::Person => &["type", "source_user_id", "role", "id", "user_id"],
        }
    }
}

/// An organization groups projects and users.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Organization {
    pub id: i64,
    pub name: Option<String>,
    pub permalink: Option<String>,
    pub language: Option<String>,
    pub domain: Option<String>,
    pub time_zone: Option<String>,
    pub logo_url: Option<String>,
    pub description: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

/// A Teambox account, as shipped in `references` for any `user_id` field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub locale: Option<String>,
    pub time_zone: Option<String>,
    /// Offset from UTC, as reported by the server.
    pub utc_offset: Option<i64>,
    pub avatar_url: Option<String>,
    pub biography: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

/// A comment on a conversation or task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub id: i64,
    pub body: Option<String>,
    pub body_html: Option<String>,
    /// Time tracked with the comment, in hours.
    pub hours: Option<f64>,
    pub status: Option<i64>,
    pub previous_status: Option<i64>,
    pub due_on: Option<String>,
    pub previous_due_on: Option<String>,
    pub user_id: Option<i64>,
    pub assigned_id: Option<i64>,
    pub previous_assigned_id: Option<i64>,
    pub project_id: Option<i64>,
    pub target_id: Option<i64>,
    /// `Conversation` or `Task`.
    pub target_type: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

/// A project, optionally owned by an organization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: i64,
    pub name: Option<String>,
    pub permalink: Option<String>,
    pub archived: Option<bool>,
    pub organization_id: Option<i64>,
    /// Id of the owning user. Decorates as a reference of type `owner_user`.
    pub owner_user_id: Option<i64>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

/// A task inside a task list.
///
/// `assigned_id` decorates to a reference of type `assigned`, so it resolves
/// only when the response's references carry entries of that type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: i64,
    pub name: Option<String>,
    pub status: Option<i64>,
    pub position: Option<i64>,
    pub due_on: Option<String>,
    pub comments_count: Option<i64>,
    /// Ids of users watching the task.
    pub watchers: Option<Vec<i64>>,
    /// Not a foreign key: the name ends in `_ids`, so it is never decorated.
    pub recent_comment_ids: Option<Vec<i64>>,
    pub user_id: Option<i64>,
    pub assigned_id: Option<i64>,
    pub first_comment_id: Option<i64>,
    pub task_list_id: Option<i64>,
    pub project_id: Option<i64>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

/// Links a user to a project with a role.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Person {
    pub id: i64,
    pub role: Option<i64>,
    pub user_id: Option<i64>,
    pub source_user_id: Option<i64>,
}
