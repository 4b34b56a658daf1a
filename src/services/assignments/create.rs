use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::error;

use super::AssignmentService;
use crate::{
    middlewares::RequireJWT,
    models::{
        ApiResponse, ErrorCode,
        assignments::requests::CreateAssignmentRequest,
        users::entities::UserRole,
    },
    utils::validate::{validate_academic_year, validate_due_date_order, validate_team_shape},
};

pub async fn create_assignment(
    service: &AssignmentService,
    request: &HttpRequest,
    create_data: CreateAssignmentRequest,
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

    if let Err(msg) = validate_team_shape(create_data.num_teams, create_data.max_members_per_team) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::AssignmentInvalid, msg)));
    }
    if let Err(msg) = validate_academic_year(&create_data.academic_year) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::AssignmentInvalid, msg)));
    }
    if create_data.title.trim().is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::AssignmentInvalid,
            "Assignment title must not be empty",
        )));
    }
    if let Err(msg) = validate_due_date_order(
        create_data.assignment_due_date.map(|d| d.timestamp()),
        create_data.grading_due_date.map(|d| d.timestamp()),
    ) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::AssignmentInvalid, msg)));
    }

    let storage = service.get_storage(request);

    // 只有课程负责讲师（或管理员）能在课程下创建大作业
    let course = match storage.get_course_by_id(create_data.course_id).await {
        Ok(Some(course)) => course,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::CourseNotFound,
                "Course not found",
            )));
        }
        Err(e) => {
            error!("Error getting course {}: {}", create_data.course_id, e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Failed to get course",
                )),
            );
        }
    };
    if user.role != UserRole::Admin && course.lecturer_id != user.id {
        return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::Forbidden,
            "Only the course lecturer may create assignments",
        )));
    }

    match storage.create_assignment(create_data).await {
        Ok(assignment) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            assignment,
            "Assignment created successfully",
        ))),
        Err(e) => {
            error!("Error creating assignment: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Failed to create assignment",
                )),
            )
        }
    }
}
