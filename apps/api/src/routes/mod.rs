pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::state::AppState;
use crate::{advisor, contact, cover_letter, dashboard, interview, resume, users};

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Users & onboarding
        .route("/api/v1/users", post(users::handlers::handle_register))
        .route(
            "/api/v1/users/:user_id",
            get(users::handlers::handle_get_profile).put(users::handlers::handle_update_profile),
        )
        .route(
            "/api/v1/users/:user_id/onboarding",
            get(users::handlers::handle_onboarding_status),
        )
        // Industry insights
        .route(
            "/api/v1/users/:user_id/insights",
            get(dashboard::handlers::handle_get_insights),
        )
        .route(
            "/api/v1/users/:user_id/insights/refresh",
            post(dashboard::handlers::handle_refresh_insights),
        )
        // Interview quizzes & assessments
        .route(
            "/api/v1/quizzes",
            post(interview::handlers::handle_generate_quiz),
        )
        .route(
            "/api/v1/assessments",
            post(interview::handlers::handle_save_assessment),
        )
        .route(
            "/api/v1/users/:user_id/assessments",
            get(interview::handlers::handle_list_assessments),
        )
        .route(
            "/api/v1/interviews/feedback",
            post(interview::handlers::handle_feedback),
        )
        // Resumes
        .route(
            "/api/v1/resumes",
            post(resume::handlers::handle_create_resume),
        )
        .route(
            "/api/v1/resumes/improve",
            post(resume::handlers::handle_improve),
        )
        .route(
            "/api/v1/resumes/latex-edit",
            post(resume::handlers::handle_latex_edit),
        )
        .route(
            "/api/v1/users/:user_id/resumes",
            get(resume::handlers::handle_list_resumes),
        )
        .route(
            "/api/v1/users/:user_id/resumes/:id",
            get(resume::handlers::handle_get_resume)
                .put(resume::handlers::handle_update_resume)
                .delete(resume::handlers::handle_delete_resume),
        )
        .route(
            "/api/v1/users/:user_id/resumes/:id/duplicate",
            post(resume::handlers::handle_duplicate_resume),
        )
        // Cover letters
        .route(
            "/api/v1/cover-letters",
            post(cover_letter::handlers::handle_generate),
        )
        .route(
            "/api/v1/users/:user_id/cover-letters",
            get(cover_letter::handlers::handle_list),
        )
        .route(
            "/api/v1/users/:user_id/cover-letters/:id",
            get(cover_letter::handlers::handle_get).delete(cover_letter::handlers::handle_delete),
        )
        // Advisor
        .route(
            "/api/v1/advisor/skill-gap",
            post(advisor::handlers::handle_skill_gap),
        )
        .route(
            "/api/v1/advisor/resume-review",
            post(advisor::handlers::handle_resume_review),
        )
        .route(
            "/api/v1/advisor/practice",
            post(advisor::handlers::handle_practice),
        )
        .route(
            "/api/v1/leetcode/:username",
            get(advisor::handlers::handle_leetcode_stats),
        )
        // Contact
        .route("/api/v1/contact", post(contact::handle_contact))
        .with_state(state)
}
