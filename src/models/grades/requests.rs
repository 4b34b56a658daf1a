use serde::Deserialize;
use ts_rs::TS;

// 创建评分项请求
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/grade.ts")]
pub struct CreateComponentRequest {
    pub name: String,
    pub description: Option<String>,
    pub max_score: f64,
    pub weight: f64,
    pub rubric: Option<String>,
    pub component_order: Option<i32>,
}

// 录入小组评分请求（已存在则覆盖）
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/grade.ts")]
pub struct RecordTeamGradeRequest {
    pub component_id: i64,
    pub score: f64,
    pub notes: Option<String>,
}

// 录入学生个人评分请求（已存在则覆盖）
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/grade.ts")]
pub struct RecordIndividualGradeRequest {
    pub team_member_id: i64,
    pub component_id: i64,
    pub score: f64,
    pub notes: Option<String>,
}

// 录入小组总评反馈请求（已存在则覆盖）
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/grade.ts")]
pub struct RecordFeedbackRequest {
    pub overall_notes: Option<String>,
}
