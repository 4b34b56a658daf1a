use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::grades::requests::{
    CreateComponentRequest, RecordFeedbackRequest, RecordIndividualGradeRequest,
    RecordTeamGradeRequest,
};
use crate::models::users::entities::UserRole;
use crate::services::grades::GradeService;
use crate::utils::{SafeAssignmentIdI64, SafeTeamIdI64};

// 懒加载的全局 GRADE_SERVICE 实例
static GRADE_SERVICE: Lazy<GradeService> = Lazy::new(GradeService::new_lazy);

// HTTP处理程序
pub async fn create_component(
    req: HttpRequest,
    path: SafeAssignmentIdI64,
    create_data: web::Json<CreateComponentRequest>,
) -> ActixResult<HttpResponse> {
    GRADE_SERVICE
        .create_component(&req, path.0, create_data.into_inner())
        .await
}

pub async fn list_components(
    req: HttpRequest,
    path: SafeAssignmentIdI64,
) -> ActixResult<HttpResponse> {
    GRADE_SERVICE.list_components(&req, path.0).await
}

pub async fn student_grade_view(
    req: HttpRequest,
    path: SafeAssignmentIdI64,
) -> ActixResult<HttpResponse> {
    GRADE_SERVICE.student_grade_view(&req, path.0).await
}

pub async fn record_team_grade(
    req: HttpRequest,
    path: SafeTeamIdI64,
    grade_data: web::Json<RecordTeamGradeRequest>,
) -> ActixResult<HttpResponse> {
    GRADE_SERVICE
        .record_team_grade(&req, path.0, grade_data.into_inner())
        .await
}

pub async fn record_individual_grade(
    req: HttpRequest,
    path: SafeTeamIdI64,
    grade_data: web::Json<RecordIndividualGradeRequest>,
) -> ActixResult<HttpResponse> {
    GRADE_SERVICE
        .record_individual_grade(&req, path.0, grade_data.into_inner())
        .await
}

pub async fn record_feedback(
    req: HttpRequest,
    path: SafeTeamIdI64,
    feedback_data: web::Json<RecordFeedbackRequest>,
) -> ActixResult<HttpResponse> {
    GRADE_SERVICE
        .record_feedback(&req, path.0, feedback_data.into_inner())
        .await
}

pub async fn team_grades_overview(
    req: HttpRequest,
    path: SafeTeamIdI64,
) -> ActixResult<HttpResponse> {
    GRADE_SERVICE.team_grades_overview(&req, path.0).await
}

// 配置路由
pub fn configure_grades_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/assignments/{assignment_id}/grading")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("/components")
                    .route(
                        web::post()
                            .to(create_component)
                            .wrap(middlewares::RequireRole::new_any(UserRole::lecturer_roles())),
                    )
                    .route(web::get().to(list_components)),
            )
            // 学生查询自己的成绩
            .service(web::resource("/me").route(web::get().to(student_grade_view))),
    )
    .service(
        web::scope("/api/v1/teams/{team_id}/grading")
            .wrap(middlewares::RequireRole::new_any(UserRole::lecturer_roles()))
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("/grades")
                    .route(web::post().to(record_team_grade))
                    .route(web::get().to(team_grades_overview)),
            )
            .service(
                web::resource("/grades/individual").route(web::post().to(record_individual_grade)),
            )
            .service(web::resource("/feedback").route(web::post().to(record_feedback))),
    );
}
