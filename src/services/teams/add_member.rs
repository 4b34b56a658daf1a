use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::error;

use super::{TeamService, membership_error_response};
use crate::{
    middlewares::RequireJWT,
    models::{ApiResponse, ErrorCode, teams::requests::LecturerAddMemberRequest},
    services::access,
};

pub async fn add_member(
    service: &TeamService,
    request: &HttpRequest,
    team_id: i64,
    add_data: LecturerAddMemberRequest,
) -> ActixResult<HttpResponse> {
    let lecturer = match RequireJWT::extract_user_claims(request) {
        Some(user) => user,
        None => {
            return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
                ErrorCode::Unauthorized,
                "Unauthorized: missing user",
            )));
        }
    };

    let storage = service.get_storage(request);

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

    if let Err(resp) = access::ensure_assignment_owner(&storage, &assignment, &lecturer).await {
        return Ok(resp);
    }
    if let Err(resp) = access::ensure_not_locked(&assignment) {
        return Ok(resp);
    }

    // 请求未带名称时回退为目标用户的显示名称
    let user_name = match add_data.user_name {
        Some(name) if !name.trim().is_empty() => name,
        _ => match storage.get_user_by_id(add_data.user_id).await {
            Ok(Some(target)) => target.display_name().to_string(),
            Ok(None) => {
                return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                    ErrorCode::NotFound,
                    "User not found",
                )));
            }
            Err(e) => {
                error!("Error getting user {}: {}", add_data.user_id, e);
                return Ok(
                    HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                        ErrorCode::InternalServerError,
                        "Failed to get user",
                    )),
                );
            }
        },
    };

    match storage
        .add_team_member(team_id, add_data.user_id, &user_name)
        .await
    {
        Ok(member) => Ok(HttpResponse::Ok()
            .json(ApiResponse::success(member, "Member added successfully"))),
        Err(e) => Ok(membership_error_response(e)),
    }
}
