//! 大作业存储操作
//!
//! 创建时按 num_teams 批量生成空小组；更新时 num_teams 的变更走
//! 扩缩容语义，全部在一个事务内完成。

use super::SeaOrmStorage;
use crate::entity::assignments::{ActiveModel, Column, Entity as Assignments};
use crate::entity::courses::Column as CourseColumn;
use crate::entity::prelude::{TeamActiveModel, TeamMembers, Teams};
use crate::entity::team_members::Column as MemberColumn;
use crate::entity::teams::Column as TeamColumn;
use crate::errors::{CourseTeamError, Result};
use crate::models::{
    PaginationInfo,
    assignments::{
        entities::Assignment,
        requests::{AssignmentListQuery, CreateAssignmentRequest, UpdateAssignmentRequest},
        responses::AssignmentListResponse,
    },
};
use crate::utils::escape_like_pattern;
use crate::utils::validate::validate_due_date_order;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, JoinType, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, RelationTrait, Set, TransactionTrait,
};

impl SeaOrmStorage {
    /// 创建大作业并批量生成空小组
    pub async fn create_assignment_impl(&self, req: CreateAssignmentRequest) -> Result<Assignment> {
        let now = chrono::Utc::now().timestamp();

        validate_due_date_order(
            req.assignment_due_date.map(|d| d.timestamp()),
            req.grading_due_date.map(|d| d.timestamp()),
        )
        .map_err(CourseTeamError::validation)?;

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| CourseTeamError::database_operation(format!("开启事务失败: {e}")))?;

        let model = ActiveModel {
            course_id: Set(req.course_id),
            title: Set(req.title),
            description: Set(req.description),
            num_teams: Set(req.num_teams),
            max_members_per_team: Set(req.max_members_per_team),
            academic_year: Set(req.academic_year),
            semester: Set(req.semester.to_string()),
            assignment_due_date: Set(req.assignment_due_date.map(|d| d.timestamp())),
            grading_due_date: Set(req.grading_due_date.map(|d| d.timestamp())),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let assignment = model
            .insert(&txn)
            .await
            .map_err(|e| CourseTeamError::database_operation(format!("创建大作业失败: {e}")))?;

        for i in 1..=req.num_teams {
            TeamActiveModel {
                assignment_id: Set(assignment.id),
                name: Set(format!("Team {i}")),
                max_members: Set(req.max_members_per_team),
                created_at: Set(now),
                ..Default::default()
            }
            .insert(&txn)
            .await
            .map_err(|e| CourseTeamError::database_operation(format!("创建小组失败: {e}")))?;
        }

        txn.commit()
            .await
            .map_err(|e| CourseTeamError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(assignment.into_assignment())
    }

    /// 通过 ID 获取大作业
    pub async fn get_assignment_by_id_impl(&self, assignment_id: i64) -> Result<Option<Assignment>> {
        let result = Assignments::find_by_id(assignment_id)
            .one(&self.db)
            .await
            .map_err(|e| CourseTeamError::database_operation(format!("查询大作业失败: {e}")))?;

        Ok(result.map(|m| m.into_assignment()))
    }

    /// 分页列出大作业
    pub async fn list_assignments_with_pagination_impl(
        &self,
        query: AssignmentListQuery,
    ) -> Result<AssignmentListResponse> {
        let page = query.page.unwrap_or(1).max(1) as u64;
        let size = query.size.unwrap_or(10).clamp(1, 100) as u64;

        let mut select = Assignments::find();

        // 课程筛选
        if let Some(course_id) = query.course_id {
            select = select.filter(Column::CourseId.eq(course_id));
        }

        // 讲师筛选（经课程归属）
        if let Some(lecturer_id) = query.lecturer_id {
            select = select
                .join(
                    JoinType::InnerJoin,
                    crate::entity::assignments::Relation::Course.def(),
                )
                .filter(CourseColumn::LecturerId.eq(lecturer_id));
        }

        // 搜索条件
        if let Some(ref search) = query.search
            && !search.trim().is_empty()
        {
            let escaped = escape_like_pattern(search.trim());
            select = select.filter(Column::Title.contains(&escaped));
        }

        // 排序
        select = select.order_by_desc(Column::CreatedAt);

        // 分页查询
        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| CourseTeamError::database_operation(format!("查询大作业总数失败: {e}")))?;

        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| CourseTeamError::database_operation(format!("查询大作业页数失败: {e}")))?;

        let assignments = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| CourseTeamError::database_operation(format!("查询大作业列表失败: {e}")))?;

        Ok(AssignmentListResponse {
            items: assignments
                .into_iter()
                .map(|m| m.into_assignment())
                .collect(),
            pagination: PaginationInfo {
                page: page as i64,
                page_size: size as i64,
                total: total as i64,
                total_pages: pages as i64,
            },
        })
    }

    /// 更新大作业
    ///
    /// num_teams 增大时按现有最大编号继续追加 "Team N"；
    /// 减小时只删除空小组（从 ID 最大的开始），空小组不足则整体失败回滚。
    /// max_members_per_team 显式传入或发生扩缩容时整体重写到全部小组，
    /// 数值与已存值相同也不跳过。
    pub async fn update_assignment_impl(
        &self,
        assignment_id: i64,
        update: UpdateAssignmentRequest,
    ) -> Result<Option<Assignment>> {
        let now = chrono::Utc::now().timestamp();

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| CourseTeamError::database_operation(format!("开启事务失败: {e}")))?;

        let Some(existing) = Assignments::find_by_id(assignment_id)
            .lock_exclusive()
            .one(&txn)
            .await
            .map_err(|e| CourseTeamError::database_operation(format!("查询大作业失败: {e}")))?
        else {
            return Ok(None);
        };

        // 截止日期先后按更新后的生效值校验
        validate_due_date_order(
            update
                .assignment_due_date
                .map(|d| d.timestamp())
                .or(existing.assignment_due_date),
            update
                .grading_due_date
                .map(|d| d.timestamp())
                .or(existing.grading_due_date),
        )
        .map_err(CourseTeamError::validation)?;

        // 小组数量扩缩容
        if let Some(target) = update.num_teams
            && target != existing.num_teams
        {
            let teams = Teams::find()
                .filter(TeamColumn::AssignmentId.eq(assignment_id))
                .order_by_asc(TeamColumn::Id)
                .all(&txn)
                .await
                .map_err(|e| CourseTeamError::database_operation(format!("查询小组失败: {e}")))?;
            let current = teams.len() as i32;

            if target > current {
                let max_members = update
                    .max_members_per_team
                    .unwrap_or(existing.max_members_per_team);
                for i in current + 1..=target {
                    TeamActiveModel {
                        assignment_id: Set(assignment_id),
                        name: Set(format!("Team {i}")),
                        max_members: Set(max_members),
                        created_at: Set(now),
                        ..Default::default()
                    }
                    .insert(&txn)
                    .await
                    .map_err(|e| {
                        CourseTeamError::database_operation(format!("创建小组失败: {e}"))
                    })?;
                }
            } else {
                let mut to_delete = Vec::new();
                let needed = (current - target) as usize;
                // 从编号最大的开始挑选空小组
                for team in teams.iter().rev() {
                    if to_delete.len() == needed {
                        break;
                    }
                    let members = TeamMembers::find()
                        .filter(MemberColumn::TeamId.eq(team.id))
                        .count(&txn)
                        .await
                        .map_err(|e| {
                            CourseTeamError::database_operation(format!("查询小组成员失败: {e}"))
                        })?;
                    if members == 0 {
                        to_delete.push(team.id);
                    }
                }
                if to_delete.len() < needed {
                    return Err(CourseTeamError::validation(format!(
                        "空小组不足：需要删除 {needed} 个小组，但只有 {} 个空小组",
                        to_delete.len()
                    )));
                }
                Teams::delete_many()
                    .filter(TeamColumn::Id.is_in(to_delete))
                    .exec(&txn)
                    .await
                    .map_err(|e| {
                        CourseTeamError::database_operation(format!("删除小组失败: {e}"))
                    })?;
            }
        }

        // 人数上限整体重写到全部小组：只要显式传入或发生扩缩容就执行，
        // 数值与已存值相同时也不跳过
        if update.max_members_per_team.is_some() || update.num_teams.is_some() {
            let effective_max = update
                .max_members_per_team
                .unwrap_or(existing.max_members_per_team);
            Teams::update_many()
                .col_expr(TeamColumn::MaxMembers, Expr::value(effective_max))
                .filter(TeamColumn::AssignmentId.eq(assignment_id))
                .exec(&txn)
                .await
                .map_err(|e| {
                    CourseTeamError::database_operation(format!("更新小组人数上限失败: {e}"))
                })?;
        }

        let mut model = ActiveModel {
            id: Set(assignment_id),
            updated_at: Set(now),
            ..Default::default()
        };

        if let Some(title) = update.title {
            model.title = Set(title);
        }
        if let Some(description) = update.description {
            model.description = Set(Some(description));
        }
        if let Some(num_teams) = update.num_teams {
            model.num_teams = Set(num_teams);
        }
        if let Some(max_members) = update.max_members_per_team {
            model.max_members_per_team = Set(max_members);
        }
        if let Some(due) = update.assignment_due_date {
            model.assignment_due_date = Set(Some(due.timestamp()));
        }
        if let Some(due) = update.grading_due_date {
            model.grading_due_date = Set(Some(due.timestamp()));
        }

        let result = model
            .update(&txn)
            .await
            .map_err(|e| CourseTeamError::database_operation(format!("更新大作业失败: {e}")))?;

        txn.commit()
            .await
            .map_err(|e| CourseTeamError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(Some(result.into_assignment()))
    }

    /// 删除大作业（小组、成员、评分随外键级联删除）
    pub async fn delete_assignment_impl(&self, assignment_id: i64) -> Result<bool> {
        let result = Assignments::delete_by_id(assignment_id)
            .exec(&self.db)
            .await
            .map_err(|e| CourseTeamError::database_operation(format!("删除大作业失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use crate::models::assignments::requests::{
        CreateAssignmentRequest, UpdateAssignmentRequest,
    };
    use crate::utils::academic_term::Semester;

    fn create_request(course_id: i64, num_teams: i32, max_members: i32) -> CreateAssignmentRequest {
        CreateAssignmentRequest {
            course_id,
            title: "Final Project".to_string(),
            description: None,
            num_teams,
            max_members_per_team: max_members,
            academic_year: "2025/2026".to_string(),
            semester: Semester::Ganjil,
            assignment_due_date: None,
            grading_due_date: None,
        }
    }

    fn no_change_update() -> UpdateAssignmentRequest {
        UpdateAssignmentRequest {
            title: None,
            description: None,
            num_teams: None,
            max_members_per_team: None,
            assignment_due_date: None,
            grading_due_date: None,
        }
    }

    #[tokio::test]
    async fn test_create_assignment_generates_teams() {
        let storage = memory_storage().await;
        seed_user(&storage, 1, "lecturer", "lecturer").await;
        seed_course(&storage, 1, 1).await;

        let assignment = storage
            .create_assignment_impl(create_request(1, 3, 4))
            .await
            .unwrap();

        let rosters = storage.list_teams_with_members_impl(assignment.id).await.unwrap();
        assert_eq!(rosters.len(), 3);
        assert_eq!(rosters[0].team.name, "Team 1");
        assert_eq!(rosters[2].team.name, "Team 3");
        assert!(rosters.iter().all(|r| r.members.is_empty()));
        assert!(rosters.iter().all(|r| r.team.max_members == 4));
    }

    #[tokio::test]
    async fn test_resize_grow_appends_teams() {
        let storage = memory_storage().await;
        seed_user(&storage, 1, "lecturer", "lecturer").await;
        seed_course(&storage, 1, 1).await;
        let assignment = storage
            .create_assignment_impl(create_request(1, 2, 4))
            .await
            .unwrap();

        let updated = storage
            .update_assignment_impl(
                assignment.id,
                UpdateAssignmentRequest {
                    num_teams: Some(4),
                    ..no_change_update()
                },
            )
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.num_teams, 4);
        let rosters = storage.list_teams_with_members_impl(assignment.id).await.unwrap();
        assert_eq!(rosters.len(), 4);
        assert_eq!(rosters[3].team.name, "Team 4");
    }

    #[tokio::test]
    async fn test_resize_shrink_deletes_empty_teams_highest_first() {
        let storage = memory_storage().await;
        seed_user(&storage, 1, "lecturer", "lecturer").await;
        seed_user(&storage, 2, "student", "student").await;
        seed_course(&storage, 1, 1).await;
        seed_enrollment(&storage, 1, 2).await;
        let assignment = storage
            .create_assignment_impl(create_request(1, 3, 4))
            .await
            .unwrap();
        let rosters = storage.list_teams_with_members_impl(assignment.id).await.unwrap();

        // 占住 Team 1，缩容应删除编号最大的空小组
        storage
            .join_team_impl(rosters[0].team.id, 2, "student")
            .await
            .unwrap();

        let updated = storage
            .update_assignment_impl(
                assignment.id,
                UpdateAssignmentRequest {
                    num_teams: Some(2),
                    ..no_change_update()
                },
            )
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.num_teams, 2);
        let remaining = storage.list_teams_with_members_impl(assignment.id).await.unwrap();
        assert_eq!(remaining.len(), 2);
        assert_eq!(remaining[0].team.name, "Team 1");
        assert_eq!(remaining[1].team.name, "Team 2");
    }

    #[tokio::test]
    async fn test_resize_shrink_fails_without_enough_empty_teams() {
        let storage = memory_storage().await;
        seed_user(&storage, 1, "lecturer", "lecturer").await;
        seed_user(&storage, 2, "alice", "student").await;
        seed_user(&storage, 3, "bob", "student").await;
        seed_course(&storage, 1, 1).await;
        seed_enrollment(&storage, 1, 2).await;
        seed_enrollment(&storage, 1, 3).await;
        let assignment = storage
            .create_assignment_impl(create_request(1, 2, 4))
            .await
            .unwrap();
        let rosters = storage.list_teams_with_members_impl(assignment.id).await.unwrap();
        storage.join_team_impl(rosters[0].team.id, 2, "alice").await.unwrap();
        storage.join_team_impl(rosters[1].team.id, 3, "bob").await.unwrap();

        let result = storage
            .update_assignment_impl(
                assignment.id,
                UpdateAssignmentRequest {
                    num_teams: Some(1),
                    ..no_change_update()
                },
            )
            .await;

        assert!(result.is_err());
        // 回滚后小组数量不变
        let remaining = storage.list_teams_with_members_impl(assignment.id).await.unwrap();
        assert_eq!(remaining.len(), 2);
    }

    #[tokio::test]
    async fn test_update_max_members_applies_to_all_teams() {
        let storage = memory_storage().await;
        seed_user(&storage, 1, "lecturer", "lecturer").await;
        seed_course(&storage, 1, 1).await;
        let assignment = storage
            .create_assignment_impl(create_request(1, 2, 4))
            .await
            .unwrap();

        storage
            .update_assignment_impl(
                assignment.id,
                UpdateAssignmentRequest {
                    max_members_per_team: Some(6),
                    ..no_change_update()
                },
            )
            .await
            .unwrap()
            .unwrap();

        let rosters = storage.list_teams_with_members_impl(assignment.id).await.unwrap();
        assert!(rosters.iter().all(|r| r.team.max_members == 6));
    }

    #[tokio::test]
    async fn test_create_rejects_grading_due_before_assignment_due() {
        let storage = memory_storage().await;
        seed_user(&storage, 1, "lecturer", "lecturer").await;
        seed_course(&storage, 1, 1).await;

        let mut req = create_request(1, 2, 4);
        req.assignment_due_date = Some(chrono::Utc::now());
        req.grading_due_date = Some(chrono::Utc::now() - chrono::Duration::days(7));

        assert!(storage.create_assignment_impl(req).await.is_err());
    }

    #[tokio::test]
    async fn test_update_rejects_grading_due_before_assignment_due() {
        let storage = memory_storage().await;
        seed_user(&storage, 1, "lecturer", "lecturer").await;
        seed_course(&storage, 1, 1).await;

        let assignment_due = chrono::Utc::now();
        let grading_due = assignment_due + chrono::Duration::days(14);
        let mut req = create_request(1, 2, 4);
        req.assignment_due_date = Some(assignment_due);
        req.grading_due_date = Some(grading_due);
        let assignment = storage.create_assignment_impl(req).await.unwrap();

        // 只改评分截止，且早于已存的提交截止
        let result = storage
            .update_assignment_impl(
                assignment.id,
                UpdateAssignmentRequest {
                    grading_due_date: Some(assignment_due - chrono::Duration::days(7)),
                    ..no_change_update()
                },
            )
            .await;

        assert!(result.is_err());
        let stored = storage
            .get_assignment_by_id_impl(assignment.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(
            stored.grading_due_date.map(|d| d.timestamp()),
            Some(grading_due.timestamp())
        );
    }

    #[tokio::test]
    async fn test_update_rewrites_max_members_even_when_unchanged() {
        use sea_orm::sea_query::Expr;
        use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};

        let storage = memory_storage().await;
        seed_user(&storage, 1, "lecturer", "lecturer").await;
        seed_course(&storage, 1, 1).await;
        let assignment = storage
            .create_assignment_impl(create_request(1, 2, 4))
            .await
            .unwrap();

        // 把小组行改得与大作业不一致，模拟历史漂移
        let skew = || async {
            crate::entity::prelude::Teams::update_many()
                .col_expr(crate::entity::teams::Column::MaxMembers, Expr::value(2))
                .filter(crate::entity::teams::Column::AssignmentId.eq(assignment.id))
                .exec(&storage.db)
                .await
                .unwrap()
        };

        // 数值与已存值相同也要整体重写
        skew().await;
        storage
            .update_assignment_impl(
                assignment.id,
                UpdateAssignmentRequest {
                    max_members_per_team: Some(4),
                    ..no_change_update()
                },
            )
            .await
            .unwrap()
            .unwrap();
        let rosters = storage.list_teams_with_members_impl(assignment.id).await.unwrap();
        assert!(rosters.iter().all(|r| r.team.max_members == 4));

        // 只扩缩容不传该字段时，同样按已存值重写全部小组
        skew().await;
        storage
            .update_assignment_impl(
                assignment.id,
                UpdateAssignmentRequest {
                    num_teams: Some(3),
                    ..no_change_update()
                },
            )
            .await
            .unwrap()
            .unwrap();
        let rosters = storage.list_teams_with_members_impl(assignment.id).await.unwrap();
        assert_eq!(rosters.len(), 3);
        assert!(rosters.iter().all(|r| r.team.max_members == 4));
    }

    #[tokio::test]
    async fn test_list_assignments_paginates() {
        let storage = memory_storage().await;
        seed_user(&storage, 1, "lecturer", "lecturer").await;
        seed_course(&storage, 1, 1).await;
        for _ in 0..3 {
            storage.create_assignment_impl(create_request(1, 1, 4)).await.unwrap();
        }

        let list = storage
            .list_assignments_with_pagination_impl(
                crate::models::assignments::requests::AssignmentListQuery {
                    page: Some(2),
                    size: Some(1),
                    course_id: None,
                    lecturer_id: None,
                    search: None,
                },
            )
            .await
            .unwrap();

        assert_eq!(list.items.len(), 1);
        assert_eq!(list.pagination.page, 2);
        assert_eq!(list.pagination.total, 3);
        assert_eq!(list.pagination.total_pages, 3);
    }

    #[tokio::test]
    async fn test_delete_assignment_cascades() {
        let storage = memory_storage().await;
        seed_user(&storage, 1, "lecturer", "lecturer").await;
        seed_course(&storage, 1, 1).await;
        let assignment = storage
            .create_assignment_impl(create_request(1, 2, 4))
            .await
            .unwrap();

        assert!(storage.delete_assignment_impl(assignment.id).await.unwrap());
        assert!(
            storage
                .get_assignment_by_id_impl(assignment.id)
                .await
                .unwrap()
                .is_none()
        );
        let rosters = storage.list_teams_with_members_impl(assignment.id).await.unwrap();
        assert!(rosters.is_empty());
    }

    #[tokio::test]
    async fn test_list_assignments_filters_by_course() {
        let storage = memory_storage().await;
        seed_user(&storage, 1, "lecturer", "lecturer").await;
        seed_course(&storage, 1, 1).await;
        seed_course(&storage, 2, 1).await;
        storage.create_assignment_impl(create_request(1, 1, 4)).await.unwrap();
        storage.create_assignment_impl(create_request(2, 1, 4)).await.unwrap();

        let list = storage
            .list_assignments_with_pagination_impl(
                crate::models::assignments::requests::AssignmentListQuery {
                    page: None,
                    size: None,
                    course_id: Some(1),
                    lecturer_id: None,
                    search: None,
                },
            )
            .await
            .unwrap();

        assert_eq!(list.items.len(), 1);
        assert_eq!(list.items[0].course_id, 1);
        assert_eq!(list.pagination.total, 1);
    }
}
