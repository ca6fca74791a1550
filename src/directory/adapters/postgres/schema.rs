//! Diesel schema for team and user persistence.

diesel::table! {
    /// Team records.
    teams (team_name) {
        /// Unique team name.
        #[max_length = 255]
        team_name -> Varchar,
    }
}

diesel::table! {
    /// Team members and their reviewer availability.
    users (user_id) {
        /// Unique user identifier.
        #[max_length = 255]
        user_id -> Varchar,
        /// Display name.
        #[max_length = 255]
        username -> Varchar,
        /// Owning team.
        #[max_length = 255]
        team_name -> Varchar,
        /// Reviewer availability flag.
        is_active -> Bool,
    }
}
