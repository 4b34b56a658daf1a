use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::error;

use super::TeamService;
use crate::{
    middlewares::RequireJWT,
    models::{
        ApiResponse, ErrorCode, teams::responses::TeamListResponse, users::entities::UserRole,
    },
};

pub async fn list_teams(
    service: &TeamService,
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

    match storage.list_teams_with_members(assignment_id).await {
        Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            TeamListResponse { items },
            "Teams retrieved successfully",
        ))),
        Err(e) => {
            error!("Error listing teams for assignment {}: {}", assignment_id, e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Failed to list teams",
                )),
            )
        }
    }
}
