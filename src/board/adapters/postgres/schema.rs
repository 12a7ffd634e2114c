//! Diesel schema for board persistence.

diesel::table! {
    /// Task rows, ranked within one (owner, lane) partition.
    tasks (id) {
        /// Task identifier.
        id -> Uuid,
        /// Owning user identifier.
        user_id -> Uuid,
        /// Task title.
        #[max_length = 255]
        title -> Varchar,
        /// Optional task description.
        description -> Nullable<Text>,
        /// Lane name.
        #[max_length = 20]
        lane -> Varchar,
        /// Rank within the (owner, lane) partition.
        rank -> Int8,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Recorded change events for board tasks.
    task_changes (id) {
        /// Event identifier.
        id -> Uuid,
        /// The task that changed.
        task_id -> Uuid,
        /// The acting user.
        user_id -> Uuid,
        /// Change action name.
        #[max_length = 20]
        action -> Varchar,
        /// Field values before the mutation.
        old_values -> Nullable<Jsonb>,
        /// Field values after the mutation.
        new_values -> Nullable<Jsonb>,
        /// When the mutation happened.
        occurred_at -> Timestamptz,
    }
}
