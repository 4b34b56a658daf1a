use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::entities::{GradeComponent, StudentGrade, TeamFeedbackEntry, TeamGrade};

// 创建评分项响应，total_weight 为该大作业下全部评分项的累计权重
#[derive(Debug, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/grade.ts")]
pub struct ComponentCreatedResponse {
    pub component: GradeComponent,
    pub total_weight: f64,
}

// 评分项列表响应
#[derive(Debug, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/grade.ts")]
pub struct ComponentListResponse {
    pub items: Vec<GradeComponent>,
    pub total_weight: f64,
}

// 学生视角下单个评分项的成绩视图
//
// individual_score 存在时覆盖 team_score。
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/grade.ts")]
pub struct ComponentGradeView {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub max_score: f64,
    pub weight: f64,
    pub team_score: Option<f64>,
    pub individual_score: Option<f64>,
    pub notes: Option<String>,
}

// 学生个人成绩视图响应
#[derive(Debug, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/grade.ts")]
pub struct StudentGradeView {
    pub assignment_id: i64,
    // 学生未加入任何小组时为 None
    pub team_id: Option<i64>,
    pub team_name: Option<String>,
    pub components: Vec<ComponentGradeView>,
    pub feedback: Option<TeamFeedbackEntry>,
    // 归一化加权总评（两位小数）；无小组或已覆盖权重为零时为 None
    pub final_grade: Option<f64>,
}

// 成员总评成绩
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/grade.ts")]
pub struct MemberFinalGrade {
    pub team_member_id: i64,
    pub user_id: i64,
    pub user_name: String,
    pub final_grade: Option<f64>,
}

// 讲师视角下单个小组的成绩总览
#[derive(Debug, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/grade.ts")]
pub struct TeamGradesOverview {
    pub team_id: i64,
    pub team_name: String,
    pub components: Vec<GradeComponent>,
    pub team_grades: Vec<TeamGrade>,
    pub student_grades: Vec<StudentGrade>,
    pub feedback: Option<TeamFeedbackEntry>,
    pub member_finals: Vec<MemberFinalGrade>,
    // 仅按小组评分计算的总评（不含个人覆盖）
    pub team_final: Option<f64>,
}
