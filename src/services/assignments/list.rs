use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::error;

use super::AssignmentService;
use crate::{
    middlewares::RequireJWT,
    models::{
        ApiResponse, ErrorCode,
        assignments::requests::{AssignmentListQuery, AssignmentQueryParams},
        users::entities::UserRole,
    },
};

pub async fn list_assignments(
    service: &AssignmentService,
    request: &HttpRequest,
    query: AssignmentQueryParams,
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

    // 学生只能按课程查看，且必须已选该课程；讲师默认只看自己负责的课程
    let mut list_query = AssignmentListQuery {
        page: Some(query.pagination.page),
        size: Some(query.pagination.size),
        course_id: query.course_id,
        lecturer_id: None,
        search: query.search,
    };
    match user.role {
        UserRole::Student => {
            let Some(course_id) = query.course_id else {
                return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                    ErrorCode::BadRequest,
                    "course_id is required",
                )));
            };
            match storage.is_user_enrolled(course_id, user.id).await {
                Ok(true) => {}
                Ok(false) => {
                    return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
                        ErrorCode::NotEnrolledInCourse,
                        "Not enrolled in this course",
                    )));
                }
                Err(e) => {
                    error!("Error checking enrollment: {}", e);
                    return Ok(HttpResponse::InternalServerError().json(
                        ApiResponse::error_empty(
                            ErrorCode::InternalServerError,
                            "Failed to check enrollment",
                        ),
                    ));
                }
            }
        }
        UserRole::Lecturer => {
            list_query.lecturer_id = Some(user.id);
        }
        UserRole::Admin => {}
    }

    match storage.list_assignments_with_pagination(list_query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            response,
            "Assignments retrieved successfully",
        ))),
        Err(e) => {
            error!("Error listing assignments: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Failed to list assignments",
                )),
            )
        }
    }
}
