use serde::Deserialize;
use ts_rs::TS;

// 讲师添加成员请求
//
// 当该用户已在同一大作业的其他小组时，本操作等价于"移组"：
// 移除旧记录并插入新记录，在同一个事务中完成。
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/team.ts")]
pub struct LecturerAddMemberRequest {
    pub user_id: i64,
    pub user_name: Option<String>,
}

// 讲师移除成员查询参数
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/team.ts")]
pub struct RemoveMemberQuery {
    pub user_id: i64,
}
