//! Diesel schema for directory persistence.

diesel::table! {
    /// Organisational sectors.
    sectors (id) {
        /// Sector identifier.
        id -> Uuid,
        /// Unique display name.
        name -> Text,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Display profiles, one per identity.
    profiles (user_id) {
        /// Owning identity.
        user_id -> Uuid,
        /// Display name.
        name -> Text,
        /// Optional avatar URL.
        avatar_url -> Nullable<Text>,
        /// Optional sector membership.
        sector_id -> Nullable<Uuid>,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Role assignments, at most one per identity.
    user_roles (user_id) {
        /// Owning identity.
        user_id -> Uuid,
        /// Role name.
        #[max_length = 20]
        role -> Varchar,
    }
}

diesel::joinable!(profiles -> sectors (sector_id));

diesel::allow_tables_to_appear_in_same_query!(sectors, profiles, user_roles);
