//! 服务层共用的权限与时间锁检查

use actix_web::HttpResponse;
use std::sync::Arc;
use tracing::error;

use crate::models::users::entities::{User, UserRole};
use crate::models::{ApiResponse, ErrorCode, assignments::entities::Assignment};
use crate::storage::Storage;

/// 检查请求者是否是该大作业所属课程的负责讲师（Admin 不受限）
///
/// 失败时返回可直接回复的 HttpResponse。
pub(crate) async fn ensure_assignment_owner(
    storage: &Arc<dyn Storage>,
    assignment: &Assignment,
    user: &User,
) -> Result<(), HttpResponse> {
    if user.role == UserRole::Admin {
        return Ok(());
    }

    let course = match storage.get_course_by_id(assignment.course_id).await {
        Ok(Some(course)) => course,
        Ok(None) => {
            return Err(HttpResponse::NotFound().json(ApiResponse::<()>::error_empty(
                ErrorCode::CourseNotFound,
                "Course not found",
            )));
        }
        Err(e) => {
            error!("Error getting course {}: {}", assignment.course_id, e);
            return Err(
                HttpResponse::InternalServerError().json(ApiResponse::<()>::error_empty(
                    ErrorCode::InternalServerError,
                    "Failed to get course",
                )),
            );
        }
    };

    if course.lecturer_id != user.id {
        return Err(HttpResponse::Forbidden().json(ApiResponse::<()>::error_empty(
            ErrorCode::Forbidden,
            "Only the course lecturer may perform this operation",
        )));
    }
    Ok(())
}

/// 检查大作业所属学期是否已被时间锁定（过去学期的成员变更被拒绝）
pub(crate) fn ensure_not_locked(assignment: &Assignment) -> Result<(), HttpResponse> {
    if assignment.is_locked() {
        return Err(HttpResponse::Forbidden().json(ApiResponse::<()>::error_empty(
            ErrorCode::SemesterLocked,
            format!(
                "Team membership is locked for past semester {} {}",
                assignment.academic_year, assignment.semester
            ),
        )));
    }
    Ok(())
}
