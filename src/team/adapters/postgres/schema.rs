//! Diesel schema for team and member persistence.

diesel::table! {
    /// Team records.
    teams (id) {
        /// Internal team identifier.
        id -> Uuid,
        /// Team display name, unique across all teams.
        #[max_length = 255]
        name -> Varchar,
        /// Optional free-form description.
        description -> Nullable<Text>,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Team member records, each owned by exactly one team.
    team_members (id) {
        /// Internal member identifier.
        id -> Uuid,
        /// Member display name.
        #[max_length = 255]
        name -> Varchar,
        /// Normalised email address, unique across all members.
        #[max_length = 255]
        email -> Varchar,
        /// Optional role label.
        #[max_length = 255]
        role -> Nullable<Varchar>,
        /// Identifier of the owning team.
        team_id -> Uuid,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::joinable!(team_members -> teams (team_id));
diesel::allow_tables_to_appear_in_same_query!(teams, team_members);
