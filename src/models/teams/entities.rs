use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 小组
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/team.ts")]
pub struct Team {
    // 小组ID
    pub id: i64,
    // 所属大作业ID
    pub assignment_id: i64,
    // 小组名称
    pub name: String,
    // 人数上限
    pub max_members: i32,
    // 创建时间
    pub created_at: chrono::DateTime<chrono::Utc>,
}

// 小组成员
//
// 不变量：同一大作业下，一个用户在其所有小组中至多存在一条成员记录。
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/team.ts")]
pub struct TeamMember {
    // 成员记录ID
    pub id: i64,
    // 所属小组ID
    pub team_id: i64,
    // 用户ID
    pub user_id: i64,
    // 用户显示名称（加入时快照）
    pub user_name: String,
    // 加入时间
    pub joined_at: chrono::DateTime<chrono::Utc>,
}

// 小组及其成员名单
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/team.ts")]
pub struct TeamRoster {
    pub team: Team,
    pub members: Vec<TeamMember>,
}

impl TeamRoster {
    pub fn member_count(&self) -> usize {
        self.members.len()
    }

    /// 扩缩容可能让上限低于当前人数，此时视为已满（容忍超员但阻止新加入）
    pub fn is_full(&self) -> bool {
        self.members.len() >= self.team.max_members as usize
    }
}
