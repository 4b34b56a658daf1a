use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::error;

use super::AssignmentService;
use crate::{
    errors::CourseTeamError,
    middlewares::RequireJWT,
    models::{ApiResponse, ErrorCode, assignments::requests::UpdateAssignmentRequest},
    services::access,
    utils::validate::validate_due_date_order,
};

pub async fn update_assignment(
    service: &AssignmentService,
    request: &HttpRequest,
    assignment_id: i64,
    update_data: UpdateAssignmentRequest,
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

    if let Some(num_teams) = update_data.num_teams
        && num_teams < 1
    {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::AssignmentInvalid,
            "Number of teams must be at least 1",
        )));
    }
    if let Some(max_members) = update_data.max_members_per_team
        && max_members < 1
    {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::AssignmentInvalid,
            "Max members per team must be at least 1",
        )));
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

    // 按更新后的生效值校验截止日期先后（未提供的字段沿用已存值）
    let effective_assignment_due = update_data
        .assignment_due_date
        .or(assignment.assignment_due_date)
        .map(|d| d.timestamp());
    let effective_grading_due = update_data
        .grading_due_date
        .or(assignment.grading_due_date)
        .map(|d| d.timestamp());
    if let Err(msg) = validate_due_date_order(effective_assignment_due, effective_grading_due) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::AssignmentInvalid, msg)));
    }

    match storage.update_assignment(assignment_id, update_data).await {
        Ok(Some(assignment)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            assignment,
            "Assignment updated successfully",
        ))),
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::AssignmentNotFound,
            "Assignment not found",
        ))),
        // 空小组不足以完成缩容
        Err(CourseTeamError::Validation(msg)) => Ok(HttpResponse::Conflict()
            .json(ApiResponse::error_empty(ErrorCode::TeamResizeFailed, msg))),
        Err(e) => {
            error!("Error updating assignment {}: {}", assignment_id, e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Failed to update assignment",
                )),
            )
        }
    }
}
