//! Hand-written diesel schema for the listings database.
//!
//! `users.sui_address`, `users.username`, `users.email` and
//! `properties.token_id` carry unique constraints in the database; the
//! sign-in flow depends on the address constraint for its race safety.

diesel::table! {
    users (id) {
        id -> Int8,
        sui_address -> Text,
        username -> Nullable<Text>,
        email -> Nullable<Text>,
        avatar_url -> Nullable<Text>,
        bio -> Nullable<Text>,
        is_verified -> Bool,
        is_active -> Bool,
        created_at -> Timestamptz,
        updated_at -> Nullable<Timestamptz>,
        last_login -> Nullable<Timestamptz>,
    }
}

diesel::table! {
    properties (id) {
        id -> Int8,
        title -> Text,
        description -> Text,
        price -> Float8,
        currency -> Text,
        location -> Text,
        bedrooms -> Int4,
        bathrooms -> Int4,
        area -> Float8,
        property_type -> Text,
        token_id -> Nullable<Text>,
        owner_address -> Text,
        is_listed -> Bool,
        images -> Array<Text>,
        documents -> Array<Text>,
        created_at -> Timestamptz,
        updated_at -> Nullable<Timestamptz>,
        owner_id -> Int8,
    }
}

diesel::table! {
    user_favorites (user_id, property_id) {
        user_id -> Int8,
        property_id -> Int8,
        created_at -> Timestamptz,
    }
}

diesel::joinable!(properties -> users (owner_id));
diesel::joinable!(user_favorites -> properties (property_id));
diesel::joinable!(user_favorites -> users (user_id));

diesel::allow_tables_to_appear_in_same_query!(users, properties, user_favorites);
