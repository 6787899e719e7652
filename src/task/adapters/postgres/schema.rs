//! Diesel schema for task persistence.

diesel::table! {
    /// Field-service task records.
    tasks (id) {
        /// Task identifier.
        id -> Uuid,
        /// Type of field work.
        #[max_length = 50]
        task_type -> Varchar,
        /// Urgency.
        #[max_length = 20]
        priority -> Varchar,
        /// Lifecycle status.
        #[max_length = 50]
        status -> Varchar,
        /// Reason of the latest postponement or cancellation.
        status_justification -> Nullable<Text>,
        /// Client name.
        client_name -> Text,
        /// Client phone.
        client_phone -> Nullable<Text>,
        /// Client address.
        client_address -> Nullable<Text>,
        /// Client postal code.
        client_cep -> Nullable<Text>,
        /// Client time restriction.
        time_limit -> Nullable<Text>,
        /// Machine or equipment.
        machine -> Nullable<Text>,
        /// Planned visit date.
        scheduled_date -> Nullable<Date>,
        /// Planned visit time.
        scheduled_time -> Nullable<Time>,
        /// Latest acceptable completion instant.
        deadline -> Nullable<Timestamptz>,
        /// Monetary value in cents.
        value_cents -> Nullable<Int8>,
        /// Free-text notes.
        observations -> Nullable<Text>,
        /// Creator identity.
        created_by -> Uuid,
        /// Owning sector.
        sector_id -> Nullable<Uuid>,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Task-to-identity assignments.
    task_assignees (task_id, user_id) {
        /// Assigned task.
        task_id -> Uuid,
        /// Assigned identity.
        user_id -> Uuid,
        /// Whether the assignee finished their part.
        completed -> Bool,
        /// When the assignee finished their part.
        completed_at -> Nullable<Timestamptz>,
    }
}

diesel::table! {
    /// Comments left on tasks.
    task_comments (id) {
        /// Comment identifier.
        id -> Uuid,
        /// Commented task.
        task_id -> Uuid,
        /// Author.
        user_id -> Uuid,
        /// Comment text.
        content -> Text,
        /// Creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Append-only task audit trail.
    task_history (id) {
        /// Entry identifier.
        id -> Uuid,
        /// Audited task.
        task_id -> Uuid,
        /// Acting identity.
        user_id -> Uuid,
        /// Action label.
        action -> Text,
        /// Structured action details.
        details -> Jsonb,
        /// Creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::joinable!(task_assignees -> tasks (task_id));
diesel::joinable!(task_comments -> tasks (task_id));
diesel::joinable!(task_history -> tasks (task_id));

diesel::allow_tables_to_appear_in_same_query!(tasks, task_assignees, task_comments, task_history);
