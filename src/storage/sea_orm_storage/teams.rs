//! 小组成员存储操作
//!
//! 加入、移组都在单个事务内完成：先锁定目标小组行，再做冲突与容量
//! 检查，最后插入成员记录。并发加入同一小组时后提交的事务会观察到
//! 已提交的成员数，不会超出上限。

use super::SeaOrmStorage;
use crate::entity::prelude::{Assignments, TeamMemberActiveModel, TeamMembers, Teams};
use crate::entity::team_members::Column as MemberColumn;
use crate::entity::teams::Column as TeamColumn;
use crate::errors::{CourseTeamError, Result};
use crate::models::teams::entities::{Team, TeamMember, TeamRoster};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, EntityTrait, JoinType,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, RelationTrait, Set, TransactionTrait,
};

impl SeaOrmStorage {
    /// 通过 ID 获取小组
    pub async fn get_team_by_id_impl(&self, team_id: i64) -> Result<Option<Team>> {
        let result = Teams::find_by_id(team_id)
            .one(&self.db)
            .await
            .map_err(|e| CourseTeamError::database_operation(format!("查询小组失败: {e}")))?;

        Ok(result.map(|m| m.into_team()))
    }

    /// 列出大作业下全部小组及成员名单
    pub async fn list_teams_with_members_impl(
        &self,
        assignment_id: i64,
    ) -> Result<Vec<TeamRoster>> {
        let rows = Teams::find()
            .filter(TeamColumn::AssignmentId.eq(assignment_id))
            .order_by_asc(TeamColumn::Id)
            .find_with_related(TeamMembers)
            .all(&self.db)
            .await
            .map_err(|e| CourseTeamError::database_operation(format!("查询小组名单失败: {e}")))?;

        Ok(rows
            .into_iter()
            .map(|(team, members)| TeamRoster {
                team: team.into_team(),
                members: members.into_iter().map(|m| m.into_team_member()).collect(),
            })
            .collect())
    }

    /// 获取单个小组及成员名单
    pub async fn get_team_roster_impl(&self, team_id: i64) -> Result<Option<TeamRoster>> {
        let Some(team) = Teams::find_by_id(team_id)
            .one(&self.db)
            .await
            .map_err(|e| CourseTeamError::database_operation(format!("查询小组失败: {e}")))?
        else {
            return Ok(None);
        };

        let members = TeamMembers::find()
            .filter(MemberColumn::TeamId.eq(team_id))
            .order_by_asc(MemberColumn::JoinedAt)
            .all(&self.db)
            .await
            .map_err(|e| CourseTeamError::database_operation(format!("查询小组成员失败: {e}")))?;

        Ok(Some(TeamRoster {
            team: team.into_team(),
            members: members.into_iter().map(|m| m.into_team_member()).collect(),
        }))
    }

    /// 学生加入小组
    pub async fn join_team_impl(
        &self,
        team_id: i64,
        user_id: i64,
        user_name: &str,
    ) -> Result<TeamMember> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| CourseTeamError::database_operation(format!("开启事务失败: {e}")))?;

        let team = Self::lock_team(&txn, team_id).await?;
        let assignment = Self::find_assignment(&txn, team.assignment_id).await?;
        Self::ensure_enrolled(&txn, assignment.course_id, user_id).await?;
        Self::ensure_no_membership_in_assignment(&txn, assignment.id, user_id, &team).await?;
        Self::ensure_capacity(&txn, &team).await?;

        let member = Self::insert_member(&txn, team_id, user_id, user_name).await?;

        txn.commit()
            .await
            .map_err(|e| CourseTeamError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(member.into_team_member())
    }

    /// 成员退出/被移出小组
    pub async fn leave_team_impl(&self, team_id: i64, user_id: i64) -> Result<()> {
        let result = TeamMembers::delete_many()
            .filter(
                Condition::all()
                    .add(MemberColumn::TeamId.eq(team_id))
                    .add(MemberColumn::UserId.eq(user_id)),
            )
            .exec(&self.db)
            .await
            .map_err(|e| CourseTeamError::database_operation(format!("退出小组失败: {e}")))?;

        if result.rows_affected == 0 {
            return Err(CourseTeamError::not_a_member(format!(
                "用户 {user_id} 不是该小组成员"
            )));
        }
        Ok(())
    }

    /// 讲师添加成员；用户已在同大作业其他小组时原子移组
    pub async fn add_team_member_impl(
        &self,
        team_id: i64,
        user_id: i64,
        user_name: &str,
    ) -> Result<TeamMember> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| CourseTeamError::database_operation(format!("开启事务失败: {e}")))?;

        let team = Self::lock_team(&txn, team_id).await?;
        let assignment = Self::find_assignment(&txn, team.assignment_id).await?;
        Self::ensure_enrolled(&txn, assignment.course_id, user_id).await?;

        // 已在目标小组则报冲突；在其他小组则移除旧记录后继续
        let existing = TeamMembers::find()
            .join(JoinType::InnerJoin, crate::entity::team_members::Relation::Team.def())
            .filter(TeamColumn::AssignmentId.eq(assignment.id))
            .filter(MemberColumn::UserId.eq(user_id))
            .one(&txn)
            .await
            .map_err(|e| CourseTeamError::database_operation(format!("查询成员记录失败: {e}")))?;

        if let Some(existing) = existing {
            if existing.team_id == team_id {
                return Err(CourseTeamError::team_conflict(team.name));
            }
            TeamMembers::delete_by_id(existing.id)
                .exec(&txn)
                .await
                .map_err(|e| {
                    CourseTeamError::database_operation(format!("移除旧成员记录失败: {e}"))
                })?;
        }

        Self::ensure_capacity(&txn, &team).await?;
        let member = Self::insert_member(&txn, team_id, user_id, user_name).await?;

        txn.commit()
            .await
            .map_err(|e| CourseTeamError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(member.into_team_member())
    }

    /// 获取用户在大作业下的成员记录
    pub async fn get_member_by_assignment_and_user_impl(
        &self,
        assignment_id: i64,
        user_id: i64,
    ) -> Result<Option<TeamMember>> {
        let result = TeamMembers::find()
            .join(JoinType::InnerJoin, crate::entity::team_members::Relation::Team.def())
            .filter(TeamColumn::AssignmentId.eq(assignment_id))
            .filter(MemberColumn::UserId.eq(user_id))
            .one(&self.db)
            .await
            .map_err(|e| CourseTeamError::database_operation(format!("查询成员记录失败: {e}")))?;

        Ok(result.map(|m| m.into_team_member()))
    }

    // 锁定目标小组行
    async fn lock_team<C: ConnectionTrait>(
        conn: &C,
        team_id: i64,
    ) -> Result<crate::entity::teams::Model> {
        Teams::find_by_id(team_id)
            .lock_exclusive()
            .one(conn)
            .await
            .map_err(|e| CourseTeamError::database_operation(format!("查询小组失败: {e}")))?
            .ok_or_else(|| CourseTeamError::not_found(format!("小组 {team_id} 不存在")))
    }

    async fn find_assignment<C: ConnectionTrait>(
        conn: &C,
        assignment_id: i64,
    ) -> Result<crate::entity::assignments::Model> {
        Assignments::find_by_id(assignment_id)
            .one(conn)
            .await
            .map_err(|e| CourseTeamError::database_operation(format!("查询大作业失败: {e}")))?
            .ok_or_else(|| CourseTeamError::not_found(format!("大作业 {assignment_id} 不存在")))
    }

    async fn ensure_enrolled<C: ConnectionTrait>(
        conn: &C,
        course_id: i64,
        user_id: i64,
    ) -> Result<()> {
        use crate::entity::course_enrollments::Column as EnrollmentColumn;
        use crate::entity::prelude::CourseEnrollments;

        let count = CourseEnrollments::find()
            .filter(
                Condition::all()
                    .add(EnrollmentColumn::CourseId.eq(course_id))
                    .add(EnrollmentColumn::UserId.eq(user_id)),
            )
            .count(conn)
            .await
            .map_err(|e| CourseTeamError::database_operation(format!("查询选课记录失败: {e}")))?;

        if count == 0 {
            return Err(CourseTeamError::not_enrolled(format!(
                "用户 {user_id} 未选课程 {course_id}"
            )));
        }
        Ok(())
    }

    // 冲突错误的 message 携带已加入小组的名称
    async fn ensure_no_membership_in_assignment<C: ConnectionTrait>(
        conn: &C,
        assignment_id: i64,
        user_id: i64,
        target: &crate::entity::teams::Model,
    ) -> Result<()> {
        let existing = TeamMembers::find()
            .join(JoinType::InnerJoin, crate::entity::team_members::Relation::Team.def())
            .filter(TeamColumn::AssignmentId.eq(assignment_id))
            .filter(MemberColumn::UserId.eq(user_id))
            .one(conn)
            .await
            .map_err(|e| CourseTeamError::database_operation(format!("查询成员记录失败: {e}")))?;

        if let Some(existing) = existing {
            let name = if existing.team_id == target.id {
                target.name.clone()
            } else {
                Teams::find_by_id(existing.team_id)
                    .one(conn)
                    .await
                    .map_err(|e| {
                        CourseTeamError::database_operation(format!("查询小组失败: {e}"))
                    })?
                    .map(|t| t.name)
                    .unwrap_or_default()
            };
            return Err(CourseTeamError::team_conflict(name));
        }
        Ok(())
    }

    async fn ensure_capacity<C: ConnectionTrait>(
        conn: &C,
        team: &crate::entity::teams::Model,
    ) -> Result<()> {
        let count = TeamMembers::find()
            .filter(MemberColumn::TeamId.eq(team.id))
            .count(conn)
            .await
            .map_err(|e| CourseTeamError::database_operation(format!("查询小组成员失败: {e}")))?;

        if count >= team.max_members as u64 {
            return Err(CourseTeamError::team_capacity(format!(
                "小组 {} 已满员（{}/{}）",
                team.name, count, team.max_members
            )));
        }
        Ok(())
    }

    async fn insert_member<C: ConnectionTrait>(
        conn: &C,
        team_id: i64,
        user_id: i64,
        user_name: &str,
    ) -> Result<crate::entity::team_members::Model> {
        TeamMemberActiveModel {
            team_id: Set(team_id),
            user_id: Set(user_id),
            user_name: Set(user_name.to_string()),
            joined_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        }
        .insert(conn)
        .await
        .map_err(|e| CourseTeamError::database_operation(format!("插入成员记录失败: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::SeaOrmStorage;
    use crate::errors::CourseTeamError;
    use crate::models::assignments::requests::CreateAssignmentRequest;
    use crate::utils::academic_term::Semester;

    async fn seed_assignment(
        storage: &SeaOrmStorage,
        num_teams: i32,
        max_members: i32,
    ) -> Vec<i64> {
        seed_user(storage, 1, "lecturer", "lecturer").await;
        seed_course(storage, 1, 1).await;
        let assignment = storage
            .create_assignment_impl(CreateAssignmentRequest {
                course_id: 1,
                title: "Final Project".to_string(),
                description: None,
                num_teams,
                max_members_per_team: max_members,
                academic_year: "2025/2026".to_string(),
                semester: Semester::Ganjil,
                assignment_due_date: None,
                grading_due_date: None,
            })
            .await
            .unwrap();
        storage
            .list_teams_with_members_impl(assignment.id)
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.team.id)
            .collect()
    }

    #[tokio::test]
    async fn test_join_team() {
        let storage = memory_storage().await;
        let teams = seed_assignment(&storage, 2, 3).await;
        seed_user(&storage, 2, "alice", "student").await;
        seed_enrollment(&storage, 1, 2).await;

        let member = storage.join_team_impl(teams[0], 2, "alice").await.unwrap();
        assert_eq!(member.team_id, teams[0]);
        assert_eq!(member.user_name, "alice");
    }

    #[tokio::test]
    async fn test_join_full_team_rejected() {
        let storage = memory_storage().await;
        let teams = seed_assignment(&storage, 1, 1).await;
        seed_user(&storage, 2, "alice", "student").await;
        seed_user(&storage, 3, "bob", "student").await;
        seed_enrollment(&storage, 1, 2).await;
        seed_enrollment(&storage, 1, 3).await;

        storage.join_team_impl(teams[0], 2, "alice").await.unwrap();
        let err = storage.join_team_impl(teams[0], 3, "bob").await.unwrap_err();
        assert!(matches!(err, CourseTeamError::TeamCapacity(_)));
    }

    #[tokio::test]
    async fn test_concurrent_join_respects_capacity() {
        let storage = memory_storage().await;
        let teams = seed_assignment(&storage, 1, 1).await;
        seed_user(&storage, 2, "alice", "student").await;
        seed_user(&storage, 3, "bob", "student").await;
        seed_enrollment(&storage, 1, 2).await;
        seed_enrollment(&storage, 1, 3).await;

        // 单连接池让两个事务串行执行，后者必须观察到前者已提交的成员
        let s1 = storage.clone();
        let s2 = storage.clone();
        let (a, b) = tokio::join!(
            s1.join_team_impl(teams[0], 2, "alice"),
            s2.join_team_impl(teams[0], 3, "bob"),
        );

        assert_eq!(a.is_ok() as u8 + b.is_ok() as u8, 1);
        let roster = storage.get_team_roster_impl(teams[0]).await.unwrap().unwrap();
        assert_eq!(roster.members.len(), 1);
    }

    #[tokio::test]
    async fn test_join_second_team_conflict_carries_team_name() {
        let storage = memory_storage().await;
        let teams = seed_assignment(&storage, 2, 3).await;
        seed_user(&storage, 2, "alice", "student").await;
        seed_enrollment(&storage, 1, 2).await;

        storage.join_team_impl(teams[0], 2, "alice").await.unwrap();
        let err = storage.join_team_impl(teams[1], 2, "alice").await.unwrap_err();
        match err {
            CourseTeamError::TeamConflict(name) => assert_eq!(name, "Team 1"),
            other => panic!("意外的错误类型: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_join_requires_enrollment() {
        let storage = memory_storage().await;
        let teams = seed_assignment(&storage, 1, 3).await;
        seed_user(&storage, 2, "alice", "student").await;

        let err = storage.join_team_impl(teams[0], 2, "alice").await.unwrap_err();
        assert!(matches!(err, CourseTeamError::NotEnrolled(_)));
    }

    #[tokio::test]
    async fn test_join_missing_team_not_found() {
        let storage = memory_storage().await;
        seed_assignment(&storage, 1, 3).await;
        seed_user(&storage, 2, "alice", "student").await;
        seed_enrollment(&storage, 1, 2).await;

        let err = storage.join_team_impl(999, 2, "alice").await.unwrap_err();
        assert!(matches!(err, CourseTeamError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_leave_team() {
        let storage = memory_storage().await;
        let teams = seed_assignment(&storage, 1, 3).await;
        seed_user(&storage, 2, "alice", "student").await;
        seed_enrollment(&storage, 1, 2).await;

        storage.join_team_impl(teams[0], 2, "alice").await.unwrap();
        storage.leave_team_impl(teams[0], 2).await.unwrap();
        let roster = storage.get_team_roster_impl(teams[0]).await.unwrap().unwrap();
        assert!(roster.members.is_empty());
    }

    #[tokio::test]
    async fn test_leave_team_not_a_member() {
        let storage = memory_storage().await;
        let teams = seed_assignment(&storage, 1, 3).await;
        seed_user(&storage, 2, "alice", "student").await;
        seed_enrollment(&storage, 1, 2).await;

        let err = storage.leave_team_impl(teams[0], 2).await.unwrap_err();
        assert!(matches!(err, CourseTeamError::NotAMember(_)));
    }

    #[tokio::test]
    async fn test_add_member_moves_between_teams_atomically() {
        let storage = memory_storage().await;
        let teams = seed_assignment(&storage, 2, 3).await;
        seed_user(&storage, 2, "alice", "student").await;
        seed_enrollment(&storage, 1, 2).await;

        storage.join_team_impl(teams[0], 2, "alice").await.unwrap();
        let moved = storage.add_team_member_impl(teams[1], 2, "alice").await.unwrap();
        assert_eq!(moved.team_id, teams[1]);

        // 旧记录已删除，大作业下仍只有一条成员记录
        let old = storage.get_team_roster_impl(teams[0]).await.unwrap().unwrap();
        assert!(old.members.is_empty());
        let assignment_id = storage.get_team_by_id_impl(teams[0]).await.unwrap().unwrap().assignment_id;
        let record = storage
            .get_member_by_assignment_and_user_impl(assignment_id, 2)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(record.team_id, teams[1]);
    }

    #[tokio::test]
    async fn test_add_member_to_full_team_keeps_old_membership() {
        let storage = memory_storage().await;
        let teams = seed_assignment(&storage, 2, 1).await;
        seed_user(&storage, 2, "alice", "student").await;
        seed_user(&storage, 3, "bob", "student").await;
        seed_enrollment(&storage, 1, 2).await;
        seed_enrollment(&storage, 1, 3).await;

        storage.join_team_impl(teams[0], 2, "alice").await.unwrap();
        storage.join_team_impl(teams[1], 3, "bob").await.unwrap();

        // 目标小组已满，移组失败后旧记录必须保留
        let err = storage.add_team_member_impl(teams[1], 2, "alice").await.unwrap_err();
        assert!(matches!(err, CourseTeamError::TeamCapacity(_)));
        let roster = storage.get_team_roster_impl(teams[0]).await.unwrap().unwrap();
        assert_eq!(roster.members.len(), 1);
    }

    #[tokio::test]
    async fn test_add_member_already_in_target_team_conflict() {
        let storage = memory_storage().await;
        let teams = seed_assignment(&storage, 1, 3).await;
        seed_user(&storage, 2, "alice", "student").await;
        seed_enrollment(&storage, 1, 2).await;

        storage.join_team_impl(teams[0], 2, "alice").await.unwrap();
        let err = storage.add_team_member_impl(teams[0], 2, "alice").await.unwrap_err();
        assert!(matches!(err, CourseTeamError::TeamConflict(_)));
    }
}
