// Database schema definitions
diesel::table! {
    users (id) {
        id -> Int4,
        username -> Varchar,
        email -> Varchar,
        password_hash -> Varchar,
        role -> Varchar,
        is_active -> Bool,
        last_login -> Nullable<Timestamp>,
        created_at -> Timestamp,
        updated_at -> Timestamp,
    }
}

diesel::table! {
    scholarships (id) {
        id -> Int4,
        title -> Varchar,
        description -> Text,
        amount -> Varchar,
        deadline -> Varchar,
        eligibility -> Text,
        status -> Varchar,
        created_by -> Int4,
        created_at -> Timestamp,
        updated_at -> Timestamp,
    }
}

diesel::table! {
    job_opportunities (id) {
        id -> Int4,
        title -> Varchar,
        description -> Text,
        company -> Varchar,
        location -> Varchar,
        job_type -> Varchar,
        status -> Varchar,
        created_by -> Int4,
        created_at -> Timestamp,
        updated_at -> Timestamp,
    }
}

diesel::table! {
    blog_posts (id) {
        id -> Int4,
        title -> Varchar,
        content -> Text,
        excerpt -> Nullable<Text>,
        category -> Varchar,
        status -> Varchar,
        created_by -> Int4,
        created_at -> Timestamp,
        updated_at -> Timestamp,
    }
}

diesel::table! {
    partner_institutions (id) {
        id -> Int4,
        name -> Varchar,
        country -> Varchar,
        website -> Nullable<Varchar>,
        contact_email -> Nullable<Varchar>,
        is_active -> Bool,
        created_at -> Timestamp,
        updated_at -> Timestamp,
    }
}

diesel::table! {
    team_members (id) {
        id -> Int4,
        name -> Varchar,
        title -> Varchar,
        bio -> Nullable<Text>,
        photo_url -> Nullable<Varchar>,
        email -> Nullable<Varchar>,
        is_active -> Bool,
        created_at -> Timestamp,
        updated_at -> Timestamp,
    }
}

diesel::table! {
    testimonials (id) {
        id -> Int4,
        author_name -> Varchar,
        author_title -> Nullable<Varchar>,
        quote -> Text,
        is_active -> Bool,
        created_at -> Timestamp,
        updated_at -> Timestamp,
    }
}

diesel::table! {
    applications (id) {
        id -> Int4,
        user_id -> Int4,
        scholarship_id -> Nullable<Int4>,
        job_id -> Nullable<Int4>,
        status -> Varchar,
        note -> Nullable<Text>,
        reviewed_by -> Nullable<Int4>,
        reviewed_at -> Nullable<Timestamp>,
        created_at -> Timestamp,
        updated_at -> Timestamp,
    }
}

diesel::table! {
    ai_chat_conversations (id) {
        id -> Int4,
        user_id -> Int4,
        messages -> Jsonb,
        moderation_flags -> Jsonb,
        is_active -> Bool,
        created_at -> Timestamp,
        updated_at -> Timestamp,
    }
}

diesel::table! {
    admin_notifications (id) {
        id -> Int4,
        target_user_id -> Nullable<Int4>,
        title -> Varchar,
        body -> Text,
        entity_type -> Varchar,
        is_read -> Bool,
        created_at -> Timestamp,
    }
}

diesel::table! {
    audit_logs (id) {
        id -> Int4,
        user_id -> Int4,
        action -> Varchar,
        entity_type -> Varchar,
        entity_id -> Int4,
        detail -> Jsonb,
        created_at -> Timestamp,
    }
}

diesel::joinable!(scholarships -> users (created_by));
diesel::joinable!(job_opportunities -> users (created_by));
diesel::joinable!(blog_posts -> users (created_by));
diesel::joinable!(ai_chat_conversations -> users (user_id));
diesel::joinable!(audit_logs -> users (user_id));

diesel::allow_tables_to_appear_in_same_query!(
    users,
    scholarships,
    job_opportunities,
    blog_posts,
    partner_institutions,
    team_members,
    testimonials,
    applications,
    ai_chat_conversations,
    admin_notifications,
    audit_logs,
);
