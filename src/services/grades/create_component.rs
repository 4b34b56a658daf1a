use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, warn};

use super::GradeService;
use crate::{
    middlewares::RequireJWT,
    models::{ApiResponse, ErrorCode, grades::requests::CreateComponentRequest},
    services::access,
    utils::validate::validate_grade_component,
};

pub async fn create_component(
    service: &GradeService,
    request: &HttpRequest,
    assignment_id: i64,
    create_data: CreateComponentRequest,
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

    if let Err(msg) =
        validate_grade_component(&create_data.name, create_data.max_score, create_data.weight)
    {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::ComponentInvalid, msg)));
    }

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

    if let Err(resp) = access::ensure_assignment_owner(&storage, &assignment, &user).await {
        return Ok(resp);
    }

    match storage
        .create_grade_component(assignment_id, create_data)
        .await
    {
        Ok(response) => {
            // 权重之和偏离 100 不拒绝，只提示
            if (response.total_weight - 100.0).abs() > f64::EPSILON {
                warn!(
                    "Assignment {} component weights now total {}",
                    assignment_id, response.total_weight
                );
            }
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                response,
                "Grade component created successfully",
            )))
        }
        Err(e) => {
            error!("Error creating grade component: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::GradeSaveFailed,
                    "Failed to create grade component",
                )),
            )
        }
    }
}
