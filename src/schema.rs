// Copyright (c) MySocial Team
// SPDX-License-Identifier: Apache-2.0

// Import diesel table macros
use diesel::allow_tables_to_appear_in_same_query;
use diesel::joinable;
use diesel::table;

table! {
    universes (id) {
        id -> Integer,
        user_id -> Integer,
        name -> Varchar,
        description -> Nullable<Text>,
        created_at -> Timestamptz,
        updated_at -> Nullable<Timestamptz>,
    }
}

table! {
    tweaknow_characters (id) {
        id -> Integer,
        universe_id -> Integer,
        name -> Varchar,
        username -> Varchar,
        bio -> Nullable<Text>,
        location -> Nullable<Varchar>,
        website -> Nullable<Varchar>,
        birth_date -> Nullable<Varchar>,
        pro_category -> Nullable<Varchar>,
        official_mark -> Varchar,
        is_private -> Bool,
        display_followers_count -> Integer,
        display_following_count -> Integer,
        profile_picture -> Nullable<Text>,
        banner_image -> Nullable<Text>,
        created_at -> Timestamptz,
        updated_at -> Nullable<Timestamptz>,
    }
}

// reply_to_tweak_id and quoted_tweak_id carry no FK constraint: replies
// outlive their parent.
table! {
    tweaks (id) {
        id -> Integer,
        universe_id -> Integer,
        character_id -> Integer,
        content -> Text,
        images -> Nullable<Array<Text>>,
        comment_count -> Integer,
        retweet_count -> Integer,
        quote_count -> Integer,
        like_count -> Integer,
        view_count -> Integer,
        source_label -> Varchar,
        custom_date -> Nullable<Timestamptz>,
        reply_to_tweak_id -> Nullable<Integer>,
        quoted_tweak_id -> Nullable<Integer>,
        created_at -> Timestamptz,
        updated_at -> Nullable<Timestamptz>,
    }
}

table! {
    retweets (id) {
        id -> Integer,
        character_id -> Integer,
        tweak_id -> Integer,
        created_at -> Timestamptz,
    }
}

table! {
    character_follows (id) {
        id -> Integer,
        follower_id -> Integer,
        following_id -> Integer,
        created_at -> Timestamptz,
    }
}

table! {
    trends (id) {
        id -> Integer,
        universe_id -> Integer,
        name -> Varchar,
        tweet_count -> Integer,
        header_image -> Nullable<Text>,
        header_text -> Nullable<Text>,
        created_at -> Timestamptz,
    }
}

table! {
    tweak_templates (id) {
        id -> Integer,
        user_id -> Integer,
        name -> Varchar,
        comment_count -> Integer,
        retweet_count -> Integer,
        quote_count -> Integer,
        like_count -> Integer,
        view_count -> Integer,
        source_label -> Varchar,
        created_at -> Timestamptz,
    }
}

joinable!(tweaknow_characters -> universes (universe_id));
joinable!(tweaks -> tweaknow_characters (character_id));
joinable!(retweets -> tweaks (tweak_id));
joinable!(trends -> universes (universe_id));

allow_tables_to_appear_in_same_query!(
    universes,
    tweaknow_characters,
    tweaks,
    retweets,
    character_follows,
    trends,
    tweak_templates,
);
