use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 课程
//
// 课程本身的增删改查不在本服务范围内，这里只保留成员资格与
// 讲师归属检查所需的最小属性集。
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/course.ts")]
pub struct Course {
    // 课程ID
    pub id: i64,
    // 课程名称
    pub title: String,
    // 课程描述
    pub description: Option<String>,
    // 负责讲师ID
    pub lecturer_id: i64,
    // 创建时间
    pub created_at: chrono::DateTime<chrono::Utc>,
    // 更新时间
    pub updated_at: chrono::DateTime<chrono::Utc>,
}
