use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::entities::Assignment;
use crate::models::PaginationInfo;
use crate::models::teams::entities::TeamRoster;

// 大作业列表响应
#[derive(Debug, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assignment.ts")]
pub struct AssignmentListResponse {
    pub items: Vec<Assignment>,
    pub pagination: PaginationInfo,
}

// 大作业详情响应（含小组名单）
#[derive(Debug, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assignment.ts")]
pub struct AssignmentDetailResponse {
    pub assignment: Assignment,
    pub teams: Vec<TeamRoster>,
    // 该大作业是否处于过去学期（成员变更被锁定）
    pub locked: bool,
}
