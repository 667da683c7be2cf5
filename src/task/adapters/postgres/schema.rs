//! Diesel schema for task persistence.

diesel::table! {
    /// Task records with weak references to assignee and team.
    tasks (id) {
        /// Internal task identifier.
        id -> Uuid,
        /// Task title.
        #[max_length = 255]
        title -> Varchar,
        /// Optional free-form description.
        description -> Nullable<Text>,
        /// Optional due date.
        due_date -> Nullable<Timestamptz>,
        /// Task status.
        #[max_length = 50]
        status -> Varchar,
        /// Optional assignee reference.
        assignee_id -> Nullable<Uuid>,
        /// Optional team reference.
        team_id -> Nullable<Uuid>,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}
