pub mod add_member;
pub mod join;
pub mod leave;
pub mod list;
pub mod remove_member;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::errors::CourseTeamError;
use crate::models::teams::requests::{LecturerAddMemberRequest, RemoveMemberQuery};
use crate::models::{ApiResponse, ErrorCode};
use crate::storage::Storage;

pub struct TeamService {
    storage: Option<Arc<dyn Storage>>,
}

impl TeamService {
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

    // 学生加入小组
    pub async fn join_team(&self, req: &HttpRequest, team_id: i64) -> ActixResult<HttpResponse> {
        join::join_team(self, req, team_id).await
    }

    // 学生退出小组
    pub async fn leave_team(&self, req: &HttpRequest, team_id: i64) -> ActixResult<HttpResponse> {
        leave::leave_team(self, req, team_id).await
    }

    // 列出大作业下的小组名单
    pub async fn list_teams(
        &self,
        req: &HttpRequest,
        assignment_id: i64,
    ) -> ActixResult<HttpResponse> {
        list::list_teams(self, req, assignment_id).await
    }

    // 讲师添加/移组成员
    pub async fn add_member(
        &self,
        req: &HttpRequest,
        team_id: i64,
        add_data: LecturerAddMemberRequest,
    ) -> ActixResult<HttpResponse> {
        add_member::add_member(self, req, team_id, add_data).await
    }

    // 讲师移除成员
    pub async fn remove_member(
        &self,
        req: &HttpRequest,
        team_id: i64,
        query: RemoveMemberQuery,
    ) -> ActixResult<HttpResponse> {
        remove_member::remove_member(self, req, team_id, query).await
    }
}

// 成员变更错误到 HTTP 响应的统一映射
pub(crate) fn membership_error_response(e: CourseTeamError) -> HttpResponse {
    match e {
        CourseTeamError::NotFound(msg) => {
            HttpResponse::NotFound().json(ApiResponse::error_empty(ErrorCode::TeamNotFound, msg))
        }
        CourseTeamError::NotEnrolled(msg) => HttpResponse::Forbidden()
            .json(ApiResponse::error_empty(ErrorCode::NotEnrolledInCourse, msg)),
        CourseTeamError::TeamConflict(team_name) => {
            HttpResponse::Conflict().json(ApiResponse::error_empty(
                ErrorCode::TeamAlreadyJoined,
                format!("User is already a member of team {team_name}"),
            ))
        }
        CourseTeamError::TeamCapacity(msg) => {
            HttpResponse::Conflict().json(ApiResponse::error_empty(ErrorCode::TeamFull, msg))
        }
        CourseTeamError::NotAMember(msg) => HttpResponse::NotFound()
            .json(ApiResponse::error_empty(ErrorCode::TeamMemberNotFound, msg)),
        CourseTeamError::Validation(msg) => {
            HttpResponse::BadRequest().json(ApiResponse::error_empty(ErrorCode::BadRequest, msg))
        }
        e => {
            tracing::error!("Team membership operation failed: {}", e);
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::TeamJoinFailed,
                "Team membership operation failed",
            ))
        }
    }
}
