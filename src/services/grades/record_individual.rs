use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::error;

use super::{GradeService, grading_error_response};
use crate::{
    middlewares::RequireJWT,
    models::{ApiResponse, ErrorCode, grades::requests::RecordIndividualGradeRequest},
    services::access,
};

pub async fn record_individual_grade(
    service: &GradeService,
    request: &HttpRequest,
    team_id: i64,
    grade_data: RecordIndividualGradeRequest,
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

    if let Err(resp) = access::ensure_assignment_owner(&storage, &assignment, &user).await {
        return Ok(resp);
    }

    match storage
        .record_student_grade(team_id, grade_data, user.id)
        .await
    {
        Ok(grade) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            grade,
            "Individual grade recorded successfully",
        ))),
        Err(e) => Ok(grading_error_response(e)),
    }
}
