use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::utils::academic_term::Semester;

// 大作业
//
// 小组在大作业创建时按 num_teams 批量生成；学年学期决定
// 成员变更是否被时间锁定（见 utils::academic_term）。
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assignment.ts")]
pub struct Assignment {
    // 大作业ID
    pub id: i64,
    // 所属课程ID
    pub course_id: i64,
    // 标题
    pub title: String,
    // 描述
    pub description: Option<String>,
    // 小组数量
    pub num_teams: i32,
    // 每组人数上限
    pub max_members_per_team: i32,
    // 学年，如 "2025/2026"
    pub academic_year: String,
    // 学期
    pub semester: Semester,
    // 提交截止时间
    pub assignment_due_date: Option<chrono::DateTime<chrono::Utc>>,
    // 评分截止时间
    pub grading_due_date: Option<chrono::DateTime<chrono::Utc>>,
    // 创建时间
    pub created_at: chrono::DateTime<chrono::Utc>,
    // 更新时间
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl Assignment {
    /// 该大作业所属学期是否已被时间锁定
    pub fn is_locked(&self) -> bool {
        crate::utils::academic_term::is_locked(&self.academic_year, self.semester)
    }
}
