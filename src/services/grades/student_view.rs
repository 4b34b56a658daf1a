use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::error;

use super::GradeService;
use crate::{
    middlewares::RequireJWT,
    models::{ApiResponse, ErrorCode, users::entities::UserRole},
};

pub async fn student_grade_view(
    service: &GradeService,
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

    match storage.get_student_grade_view(assignment_id, user.id).await {
        Ok(view) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            view,
            "Grades retrieved successfully",
        ))),
        Err(e) => {
            error!(
                "Error getting student grade view for assignment {}: {}",
                assignment_id, e
            );
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Failed to get grades",
                )),
            )
        }
    }
}
