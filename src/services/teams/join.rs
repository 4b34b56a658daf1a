use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::error;

use super::{TeamService, membership_error_response};
use crate::{
    middlewares::RequireJWT,
    models::{ApiResponse, ErrorCode},
    services::access,
};

pub async fn join_team(
    service: &TeamService,
    request: &HttpRequest,
    team_id: i64,
) -> ActixResult<HttpResponse> {
    let user = match RequireJWT::extract_user_claims(request) {
        Some(user) => user,
        None => {
            return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
                ErrorCode::Unauthorized,
                "Unauthorized: missing user",
            )));
        }
    };

    let storage = service.get_storage(request);

    // 先取小组与大作业做时间锁检查，真正的冲突与容量检查在存储事务内
    let team = match storage.get_team_by_id(team_id).await {
        Ok(Some(team)) => team,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::TeamNotFound,
                "Team not found",
            )));
        }
        Err(e) => {
            error!("Error getting team {}: {}", team_id, e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Failed to get team",
                )),
            );
        }
    };

    let assignment = match storage.get_assignment_by_id(team.assignment_id).await {
        Ok(Some(assignment)) => assignment,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::AssignmentNotFound,
                "Assignment not found",
            )));
        }
        Err(e) => {
            error!("Error getting assignment {}: {}", team.assignment_id, e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Failed to get assignment",
                )),
            );
        }
    };

    if let Err(resp) = access::ensure_not_locked(&assignment) {
        return Ok(resp);
    }

    let user_name = user.display_name().to_string();
    match storage.join_team(team_id, user.id, &user_name).await {
        Ok(member) => Ok(HttpResponse::Ok()
            .json(ApiResponse::success(member, "Team joined successfully"))),
        Err(e) => Ok(membership_error_response(e)),
    }
}
