use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::entities::TeamRoster;

// 小组列表响应
#[derive(Debug, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/team.ts")]
pub struct TeamListResponse {
    pub items: Vec<TeamRoster>,
}
