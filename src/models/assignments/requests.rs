use serde::Deserialize;
use ts_rs::TS;

use crate::models::common::PaginationQuery;
use crate::utils::academic_term::Semester;

// 创建大作业请求
//
// 创建成功后按 num_teams 批量生成空小组（"Team 1" .. "Team N"）。
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assignment.ts")]
pub struct CreateAssignmentRequest {
    pub course_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub num_teams: i32,
    pub max_members_per_team: i32,
    pub academic_year: String,
    pub semester: Semester,
    pub assignment_due_date: Option<chrono::DateTime<chrono::Utc>>,
    pub grading_due_date: Option<chrono::DateTime<chrono::Utc>>,
}

// 更新大作业请求
//
// num_teams / max_members_per_team 的变更走小组扩缩容语义：
// 扩容追加空小组，缩容只删除空小组（从编号最大的开始），
// 空小组不足以达到目标数量时整个更新失败回滚。
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assignment.ts")]
pub struct UpdateAssignmentRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub num_teams: Option<i32>,
    pub max_members_per_team: Option<i32>,
    pub assignment_due_date: Option<chrono::DateTime<chrono::Utc>>,
    pub grading_due_date: Option<chrono::DateTime<chrono::Utc>>,
}

// 大作业查询参数（来自HTTP请求）
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assignment.ts")]
pub struct AssignmentQueryParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    pub course_id: Option<i64>,
    pub search: Option<String>,
}

// 大作业列表查询参数（用于存储层）
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assignment.ts")]
pub struct AssignmentListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub course_id: Option<i64>,
    pub lecturer_id: Option<i64>,
    pub search: Option<String>,
}
