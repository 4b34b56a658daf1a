pub mod create_component;
pub mod list_components;
pub mod record_feedback;
pub mod record_individual;
pub mod record_team;
pub mod student_view;
pub mod team_overview;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::errors::CourseTeamError;
use crate::models::grades::requests::{
    CreateComponentRequest, RecordFeedbackRequest, RecordIndividualGradeRequest,
    RecordTeamGradeRequest,
};
use crate::models::{ApiResponse, ErrorCode};
use crate::storage::Storage;

pub struct GradeService {
    storage: Option<Arc<dyn Storage>>,
}

impl GradeService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        if let Some(storage) = &self.storage {
            storage.clone()
        } else {
            request
                .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
                .expect("Storage not found in app data")
                .get_ref()
                .clone()
        }
    }

    // 创建评分项
    pub async fn create_component(
        &self,
        req: &HttpRequest,
        assignment_id: i64,
        create_data: CreateComponentRequest,
    ) -> ActixResult<HttpResponse> {
        create_component::create_component(self, req, assignment_id, create_data).await
    }

    // 列出评分项
    pub async fn list_components(
        &self,
        req: &HttpRequest,
        assignment_id: i64,
    ) -> ActixResult<HttpResponse> {
        list_components::list_components(self, req, assignment_id).await
    }

    // 录入小组评分
    pub async fn record_team_grade(
        &self,
        req: &HttpRequest,
        team_id: i64,
        grade_data: RecordTeamGradeRequest,
    ) -> ActixResult<HttpResponse> {
        record_team::record_team_grade(self, req, team_id, grade_data).await
    }

    // 录入学生个人评分
    pub async fn record_individual_grade(
        &self,
        req: &HttpRequest,
        team_id: i64,
        grade_data: RecordIndividualGradeRequest,
    ) -> ActixResult<HttpResponse> {
        record_individual::record_individual_grade(self, req, team_id, grade_data).await
    }

    // 录入小组总评反馈
    pub async fn record_feedback(
        &self,
        req: &HttpRequest,
        team_id: i64,
        feedback_data: RecordFeedbackRequest,
    ) -> ActixResult<HttpResponse> {
        record_feedback::record_feedback(self, req, team_id, feedback_data).await
    }

    // 学生个人成绩视图
    pub async fn student_grade_view(
        &self,
        req: &HttpRequest,
        assignment_id: i64,
    ) -> ActixResult<HttpResponse> {
        student_view::student_grade_view(self, req, assignment_id).await
    }

    // 讲师视角的小组成绩总览
    pub async fn team_grades_overview(
        &self,
        req: &HttpRequest,
        team_id: i64,
    ) -> ActixResult<HttpResponse> {
        team_overview::team_grades_overview(self, req, team_id).await
    }
}

// 评分写入错误到 HTTP 响应的统一映射
pub(crate) fn grading_error_response(e: CourseTeamError) -> HttpResponse {
    match e {
        CourseTeamError::NotFound(msg) => {
            HttpResponse::NotFound().json(ApiResponse::error_empty(ErrorCode::GradeNotFound, msg))
        }
        CourseTeamError::Validation(msg) => HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::GradeScoreInvalid, msg)),
        e => {
            tracing::error!("Grading operation failed: {}", e);
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::GradeSaveFailed,
                "Grading operation failed",
            ))
        }
    }
}
