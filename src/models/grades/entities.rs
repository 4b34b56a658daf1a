use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 评分项
//
// weight 为百分比（0..=100），同一大作业下各评分项权重之和允许不等于 100，
// 创建时仅在响应中回报累计权重供讲师参考。
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/grade.ts")]
pub struct GradeComponent {
    pub id: i64,
    pub assignment_id: i64,
    pub name: String,
    pub description: Option<String>,
    pub max_score: f64,
    pub weight: f64,
    pub rubric: Option<String>,
    pub component_order: i32,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

// 小组评分（应用于小组全体成员）
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/grade.ts")]
pub struct TeamGrade {
    pub id: i64,
    pub team_id: i64,
    pub component_id: i64,
    pub score: f64,
    pub notes: Option<String>,
    pub graded_by: i64,
    pub graded_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

// 学生个人评分（存在时覆盖小组评分）
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/grade.ts")]
pub struct StudentGrade {
    pub id: i64,
    pub team_member_id: i64,
    pub component_id: i64,
    pub score: f64,
    pub notes: Option<String>,
    pub graded_by: i64,
    pub graded_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

// 小组总评反馈
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/grade.ts")]
pub struct TeamFeedbackEntry {
    pub id: i64,
    pub team_id: i64,
    pub assignment_id: i64,
    pub overall_notes: Option<String>,
    pub created_by: i64,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}
