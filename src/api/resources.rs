//! Resource wrappers over [`TeamboxClient`].
//!
//! Each wrapper only formats the resource path (and form body) for one REST
//! route; sending and materialization are the client's job.

use crate::client::TeamboxClient;
use crate::errors::{Result, TeamboxError};
use crate::resolution::{DecoratedRecord, Materialized};

/// Form fields sent with create/update calls.
pub type Form<'f> = &'f [(&'f str, &'f str)];

/// Appends `?key=true|false` when `flag` is set.
fn with_flag(path: String, key: &str, flag: Option<bool>) -> String {
    match flag {
        Some(value) => format!("{}?{}={}", path, key, value),
        None => path,
    }
}

/// Prefixes `path` with `<scope>/<id>/` when an id is given.
fn scoped(scope: &str, id: Option<i64>, path: String) -> String {
    match id {
        Some(id) => format!("{}/{}/{}", scope, id, path),
        None => path,
    }
}

// ---------------------------------------------------------------------------
// Organizations
// ---------------------------------------------------------------------------

/// Organizations group together projects and users (via memberships).
pub struct Organizations<'a> {
    pub(crate) client: &'a TeamboxClient,
}

impl Organizations<'_> {
    /// Creates an organization from form fields such as `name` and `permalink`.
    pub fn create(&self, data: Form) -> Result<Materialized> {
        self.client.post("organizations", data)
    }

    /// Organizations you own or belong to. External organizations (ones that
    /// own a project you are in without you being a member) are only listed
    /// with `external = Some(true)`.
    pub fn index(&self, external: Option<bool>) -> Result<Materialized> {
        let path = with_flag("organizations".to_string(), "external", external);
        self.client.get(&path)
    }

    /// [`index`](Self::index), keeping the organizations matching `predicate`.
    pub fn filter<P>(&self, predicate: P, external: Option<bool>) -> Result<Vec<DecoratedRecord>>
    where
        P: FnMut(&DecoratedRecord) -> bool,
    {
        Ok(self.index(external)?.into_matching(predicate))
    }

    pub fn show(&self, organization: i64) -> Result<Materialized> {
        self.client.get(&format!("organizations/{}", organization))
    }

    pub fn update(&self, organization: i64, data: Form) -> Result<Materialized> {
        self.client.put(&format!("organizations/{}", organization), data)
    }
}

// ---------------------------------------------------------------------------
// Memberships
// ---------------------------------------------------------------------------

/// A membership links a user to an organization.
pub struct Memberships<'a> {
    pub(crate) client: &'a TeamboxClient,
}

impl Memberships<'_> {
    fn path(organization: i64, membership: i64) -> String {
        format!("organizations/{}/memberships/{}", organization, membership)
    }

    /// Removes a member. Requires admin rights in the organization.
    pub fn destroy(&self, organization: i64, membership: i64) -> Result<Materialized> {
        self.client.delete(&Self::path(organization, membership))
    }

    /// Most recent members of the organization.
    pub fn index(&self, organization: i64) -> Result<Materialized> {
        self.client
            .get(&format!("organizations/{}/memberships", organization))
    }

    /// [`index`](Self::index), keeping the members matching `predicate`,
    /// e.g. admins with `role == 30`.
    pub fn filter<P>(&self, predicate: P, organization: i64) -> Result<Vec<DecoratedRecord>>
    where
        P: FnMut(&DecoratedRecord) -> bool,
    {
        Ok(self.index(organization)?.into_matching(predicate))
    }

    pub fn show(&self, organization: i64, membership: i64) -> Result<Materialized> {
        self.client.get(&Self::path(organization, membership))
    }

    /// Changes a member's role: 10 external, 20 participant, 30 admin.
    pub fn update(&self, organization: i64, membership: i64, role: i64) -> Result<Materialized> {
        let role = role.to_string();
        self.client
            .put(&Self::path(organization, membership), &[("role", role.as_str())])
    }
}

// ---------------------------------------------------------------------------
// Projects
// ---------------------------------------------------------------------------

/// Projects hold most other objects. Every route may be scoped to an
/// organization.
pub struct Projects<'a> {
    pub(crate) client: &'a TeamboxClient,
}

impl Projects<'_> {
    fn path(project: i64, organization: Option<i64>) -> String {
        scoped("organizations", organization, format!("projects/{}", project))
    }

    pub fn create(&self, data: Form, organization: Option<i64>) -> Result<Materialized> {
        let path = scoped("organizations", organization, "projects".to_string());
        self.client.post(&path, data)
    }

    /// Projects you own or belong to, optionally within one organization.
    pub fn index(&self, organization: Option<i64>) -> Result<Materialized> {
        let path = scoped("organizations", organization, "projects".to_string());
        self.client.get(&path)
    }

    pub fn filter<P>(&self, predicate: P, organization: Option<i64>) -> Result<Vec<DecoratedRecord>>
    where
        P: FnMut(&DecoratedRecord) -> bool,
    {
        Ok(self.index(organization)?.into_matching(predicate))
    }

    /// Deletes a project. Only its owner may do this.
    pub fn destroy(&self, project: i64, organization: Option<i64>) -> Result<Materialized> {
        self.client.delete(&Self::path(project, organization))
    }

    pub fn show(&self, project: i64, organization: Option<i64>) -> Result<Materialized> {
        self.client.get(&Self::path(project, organization))
    }

    pub fn update(&self, project: i64, data: Form, organization: Option<i64>) -> Result<Materialized> {
        self.client.put(&Self::path(project, organization), data)
    }
}

// ---------------------------------------------------------------------------
// People
// ---------------------------------------------------------------------------

/// A person links a user to a project.
pub struct People<'a> {
    pub(crate) client: &'a TeamboxClient,
}

impl People<'_> {
    fn path(project: i64, person: i64) -> String {
        format!("projects/{}/people/{}", project, person)
    }

    pub fn destroy(&self, project: i64, person: i64) -> Result<Materialized> {
        self.client.delete(&Self::path(project, person))
    }

    /// Most recent people in the project.
    pub fn index(&self, project: i64) -> Result<Materialized> {
        self.client.get(&format!("projects/{}/people", project))
    }

    pub fn filter<P>(&self, predicate: P, project: i64) -> Result<Vec<DecoratedRecord>>
    where
        P: FnMut(&DecoratedRecord) -> bool,
    {
        Ok(self.index(project)?.into_matching(predicate))
    }

    pub fn show(&self, project: i64, person: i64) -> Result<Materialized> {
        self.client.get(&Self::path(project, person))
    }

    /// Changes a person's role: 0 observer, 1 commenter, 2 participant,
    /// 3 admin.
    pub fn update(&self, project: i64, person: i64, role: i64) -> Result<Materialized> {
        let role = role.to_string();
        self.client
            .put(&Self::path(project, person), &[("role", role.as_str())])
    }
}

// ---------------------------------------------------------------------------
// Activities
// ---------------------------------------------------------------------------

/// Activities record what happened in a project. Their responses carry the
/// references needed to rebuild a timeline.
pub struct Activities<'a> {
    pub(crate) client: &'a TeamboxClient,
}

impl Activities<'_> {
    /// Recent activities. `threads = Some(true)` leaves out comments inside
    /// threads.
    pub fn index(&self, project: Option<i64>, threads: Option<bool>) -> Result<Materialized> {
        let path = scoped("projects", project, "activities".to_string());
        self.client.get(&with_flag(path, "threads", threads))
    }

    pub fn filter<P>(
        &self,
        predicate: P,
        project: Option<i64>,
        threads: Option<bool>,
    ) -> Result<Vec<DecoratedRecord>>
    where
        P: FnMut(&DecoratedRecord) -> bool,
    {
        Ok(self.index(project, threads)?.into_matching(predicate))
    }

    pub fn show(&self, activity: i64, project: Option<i64>) -> Result<Materialized> {
        let path = scoped("projects", project, format!("activities/{}", activity));
        self.client.get(&path)
    }
}

// ---------------------------------------------------------------------------
// Comments
// ---------------------------------------------------------------------------

/// Kinds of object a comment can be attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentTargetType {
    Conversation,
    Task,
}

impl CommentTargetType {
    /// Value of the `target_type` query parameter.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Conversation => "Conversation",
            Self::Task => "Task",
        }
    }
}

/// Comments belong to a conversation or a task.
pub struct Comments<'a> {
    pub(crate) client: &'a TeamboxClient,
}

impl Comments<'_> {
    /// Posts a comment on a conversation or, failing that, a task. For time
    /// tracking pass an `hours` field (`12h`, `1.4`, `13m`, `2:15`).
    pub fn create(
        &self,
        data: Form,
        conversation: Option<i64>,
        task: Option<i64>,
        project: Option<i64>,
    ) -> Result<Materialized> {
        let path = match (conversation, task) {
            (Some(conversation), _) => format!("conversations/{}/comments", conversation),
            (None, Some(task)) => format!("tasks/{}/comments", task),
            (None, None) => {
                return Err(TeamboxError::InvalidArgument {
                    message: "a conversation or task id is required".to_string(),
                })
            }
        };
        self.client.post(&scoped("projects", project, path), data)
    }

    pub fn destroy(&self, comment: i64) -> Result<Materialized> {
        self.client.delete(&format!("comments/{}", comment))
    }

    /// Recent comments on the most specific target given, optionally
    /// filtered by target type.
    pub fn index(
        &self,
        task: Option<i64>,
        conversation: Option<i64>,
        project: Option<i64>,
        target_type: Option<CommentTargetType>,
    ) -> Result<Materialized> {
        let path = match (task, conversation) {
            (Some(task), _) => format!("tasks/{}/comments", task),
            (None, Some(conversation)) => format!("conversations/{}/comments", conversation),
            (None, None) => "comments".to_string(),
        };
        let mut path = scoped("projects", project, path);
        if let Some(target_type) = target_type {
            path = format!("{}?target_type={}", path, target_type.as_str());
        }
        self.client.get(&path)
    }

    pub fn filter<P>(
        &self,
        predicate: P,
        task: Option<i64>,
        conversation: Option<i64>,
        project: Option<i64>,
        target_type: Option<CommentTargetType>,
    ) -> Result<Vec<DecoratedRecord>>
    where
        P: FnMut(&DecoratedRecord) -> bool,
    {
        Ok(self
            .index(task, conversation, project, target_type)?
            .into_matching(predicate))
    }

    pub fn show(&self, comment: i64) -> Result<Materialized> {
        self.client.get(&format!("comments/{}", comment))
    }

    /// Edits a comment. The server refuses edits 15 minutes after creation.
    pub fn update(&self, comment: i64, data: Form) -> Result<Materialized> {
        self.client.put(&format!("comments/{}", comment), data)
    }
}

// ---------------------------------------------------------------------------
// Task lists
// ---------------------------------------------------------------------------

/// A task list is a collection of tasks in a project.
pub struct TaskLists<'a> {
    pub(crate) client: &'a TeamboxClient,
}

impl TaskLists<'_> {
    fn path(task_list: i64, project: Option<i64>) -> String {
        scoped("projects", project, format!("task_lists/{}", task_list))
    }

    /// Archives the list, resolving every task in it.
    pub fn archive(&self, project: i64, task_list: i64) -> Result<Materialized> {
        self.client.put(
            &format!("projects/{}/task_lists/{}/archive", project, task_list),
            &[],
        )
    }

    pub fn create(&self, data: Form, project: Option<i64>) -> Result<Materialized> {
        let path = scoped("projects", project, "task_lists".to_string());
        self.client.post(&path, data)
    }

    pub fn destroy(&self, task_list: i64, project: Option<i64>) -> Result<Materialized> {
        self.client.delete(&Self::path(task_list, project))
    }

    /// Recent task lists; `archived` filters by archive state.
    pub fn index(&self, project: Option<i64>, archived: Option<bool>) -> Result<Materialized> {
        let path = scoped("projects", project, "task_lists".to_string());
        self.client.get(&with_flag(path, "archived", archived))
    }

    pub fn filter<P>(
        &self,
        predicate: P,
        project: Option<i64>,
        archived: Option<bool>,
    ) -> Result<Vec<DecoratedRecord>>
    where
        P: FnMut(&DecoratedRecord) -> bool,
    {
        Ok(self.index(project, archived)?.into_matching(predicate))
    }

    /// Reorders a project's task lists to match `order`.
    pub fn reorder(&self, project: i64, order: &[i64]) -> Result<Materialized> {
        let ids = order
            .iter()
            .map(i64::to_string)
            .collect::<Vec<_>>()
            .join(",");
        self.client.put(
            &format!("projects/{}/task_lists/reorder", project),
            &[("task_list_ids", ids.as_str())],
        )
    }

    pub fn show(&self, task_list: i64, project: Option<i64>) -> Result<Materialized> {
        self.client.get(&Self::path(task_list, project))
    }

    pub fn unarchive(&self, project: i64, task_list: i64) -> Result<Materialized> {
        self.client.put(
            &format!("projects/{}/task_lists/{}/unarchive", project, task_list),
            &[],
        )
    }

    /// Updates the name, start date and end date of a task list.
    pub fn update(&self, task_list: i64, data: Form, project: Option<i64>) -> Result<Materialized> {
        self.client.put(&Self::path(task_list, project), data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_flag() {
        assert_eq!(with_flag("activities".into(), "threads", None), "activities");
        assert_eq!(
            with_flag("activities".into(), "threads", Some(false)),
            "activities?threads=false"
        );
    }

    #[test]
    fn test_scoped() {
        assert_eq!(scoped("projects", None, "task_lists".into()), "task_lists");
        assert_eq!(
            scoped("projects", Some(3), "task_lists".into()),
            "projects/3/task_lists"
        );
    }
}
