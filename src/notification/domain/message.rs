//! Notification payloads shown to field employees.

use crate::task::domain::Task;
use minijinja::Environment;
use serde::Serialize;
use serde_json::json;
use thiserror::Error;

/// Tag shared by every itinerary notification so newer ones replace older.
pub const NOTIFICATION_TAG: &str = "maqz-tasks";

const REMINDER_TITLE: &str = "🔔 Maqz Itinerário";
const REMINDER_BODY: &str = "{% if count == 1 %}Você tem 1 tarefa pendente: {{ client }}\
{% else %}Você tem {{ count }} tarefas pendentes ou em andamento{% endif %}";

const ASSIGNMENT_TITLE: &str = "📋 Nova tarefa atribuída!";
const ASSIGNMENT_BODY: &str = "Você recebeu uma nova tarefa: {{ client }}";

/// Failure to render a notification template.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("failed to render notification: {0}")]
pub struct RenderError(pub String);

/// A rendered notification ready for delivery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    title: String,
    body: String,
    tag: String,
}

impl Notification {
    /// Builds the periodic reminder for the caller's open tasks.
    ///
    /// Returns `None` when nothing is open. A single task names its client;
    /// several tasks are summarised by count.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError`] when the body template fails to render.
    pub fn reminder(open_tasks: &[Task]) -> Result<Option<Self>, RenderError> {
        let Some(first) = open_tasks.first() else {
            return Ok(None);
        };
        let context = json!({
            "count": open_tasks.len(),
            "client": first.client().name(),
        });
        let body = render(REMINDER_BODY, context)?;
        Ok(Some(Self::tagged(REMINDER_TITLE, body)))
    }

    /// Builds the notification announcing a new assignment.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError`] when the body template fails to render.
    pub fn assignment(task: &Task) -> Result<Self, RenderError> {
        let body = render(ASSIGNMENT_BODY, json!({ "client": task.client().name() }))?;
        Ok(Self::tagged(ASSIGNMENT_TITLE, body))
    }

    fn tagged(title: &str, body: String) -> Self {
        Self {
            title: title.to_owned(),
            body,
            tag: NOTIFICATION_TAG.to_owned(),
        }
    }

    /// Returns the title line.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the body text.
    #[must_use]
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Returns the replacement tag.
    #[must_use]
    pub fn tag(&self) -> &str {
        &self.tag
    }
}

fn render(template: &str, context: serde_json::Value) -> Result<String, RenderError> {
    let environment = Environment::new();
    environment
        .render_str(template, context)
        .map_err(|error| RenderError(error.to_string()))
}
