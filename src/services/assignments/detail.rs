use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::error;

use super::AssignmentService;
use crate::{
    middlewares::RequireJWT,
    models::{
        ApiResponse, ErrorCode,
        assignments::responses::AssignmentDetailResponse,
        users::entities::UserRole,
    },
};

pub async fn get_assignment(
    service: &AssignmentService,
    request: &HttpRequest,
    assignment_id: i64,
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

    let assignment = match storage.get_assignment_by_id(assignment_id).await {
        Ok(Some(assignment)) => assignment,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::AssignmentNotFound,
                "Assignment not found",
            )));
        }
        Err(e) => {
            error!("Error getting assignment {}: {}", assignment_id, e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Failed to get assignment",
                )),
            );
        }
    };

    // 学生必须已选课程才能查看名单
    if user.role == UserRole::Student {
        match storage.is_user_enrolled(assignment.course_id, user.id).await {
            Ok(true) => {}
            Ok(false) => {
                return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
                    ErrorCode::NotEnrolledInCourse,
                    "Not enrolled in this course",
                )));
            }
            Err(e) => {
                error!("Error checking enrollment: {}", e);
                return Ok(
                    HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                        ErrorCode::InternalServerError,
                        "Failed to check enrollment",
                    )),
                );
            }
        }
    }

    let teams = match storage.list_teams_with_members(assignment_id).await {
        Ok(teams) => teams,
        Err(e) => {
            error!("Error listing teams for assignment {}: {}", assignment_id, e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Failed to list teams",
                )),
            );
        }
    };

    let locked = assignment.is_locked();
    Ok(HttpResponse::Ok().json(ApiResponse::success(
        AssignmentDetailResponse {
            assignment,
            teams,
            locked,
        },
        "Assignment retrieved successfully",
    )))
}
