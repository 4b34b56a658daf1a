//! 评分存储操作
//!
//! 小组评分、个人评分、总评反馈均为幂等覆盖写入（唯一键冲突时更新），
//! 讲师重复提交不会产生副作用。

use super::SeaOrmStorage;
use crate::entity::grade_components::Column as ComponentColumn;
use crate::entity::prelude::{
    GradeComponentActiveModel, GradeComponents, StudentGradeActiveModel, StudentGrades,
    TeamFeedback, TeamFeedbackActiveModel, TeamGradeActiveModel, TeamGrades, TeamMembers,
};
use crate::entity::student_grades::Column as StudentGradeColumn;
use crate::entity::team_feedback::Column as FeedbackColumn;
use crate::entity::team_grades::Column as TeamGradeColumn;
use crate::errors::{CourseTeamError, Result};
use crate::models::grades::{
    aggregate::{self, ComponentScore},
    entities::{StudentGrade, TeamFeedbackEntry, TeamGrade},
    requests::{
        CreateComponentRequest, RecordFeedbackRequest, RecordIndividualGradeRequest,
        RecordTeamGradeRequest,
    },
    responses::{
        ComponentCreatedResponse, ComponentGradeView, ComponentListResponse, MemberFinalGrade,
        StudentGradeView, TeamGradesOverview,
    },
};
use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};
use std::collections::HashMap;

impl SeaOrmStorage {
    /// 创建评分项
    ///
    /// 权重之和不要求等于 100，响应携带当前累计权重供调用方提示。
    pub async fn create_grade_component_impl(
        &self,
        assignment_id: i64,
        req: CreateComponentRequest,
    ) -> Result<ComponentCreatedResponse> {
        if self.get_assignment_by_id_impl(assignment_id).await?.is_none() {
            return Err(CourseTeamError::not_found(format!(
                "大作业 {assignment_id} 不存在"
            )));
        }

        let order = match req.component_order {
            Some(order) => order,
            None => {
                let count = GradeComponents::find()
                    .filter(ComponentColumn::AssignmentId.eq(assignment_id))
                    .count(&self.db)
                    .await
                    .map_err(|e| {
                        CourseTeamError::database_operation(format!("查询评分项数量失败: {e}"))
                    })?;
                count as i32 + 1
            }
        };

        let model = GradeComponentActiveModel {
            assignment_id: Set(assignment_id),
            name: Set(req.name),
            description: Set(req.description),
            max_score: Set(req.max_score),
            weight: Set(req.weight),
            rubric: Set(req.rubric),
            component_order: Set(order),
            created_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let component = model
            .insert(&self.db)
            .await
            .map_err(|e| CourseTeamError::database_operation(format!("创建评分项失败: {e}")))?;

        let total_weight = self.total_component_weight(assignment_id).await?;

        Ok(ComponentCreatedResponse {
            component: component.into_grade_component(),
            total_weight,
        })
    }

    /// 列出评分项
    pub async fn list_grade_components_impl(
        &self,
        assignment_id: i64,
    ) -> Result<ComponentListResponse> {
        let components = GradeComponents::find()
            .filter(ComponentColumn::AssignmentId.eq(assignment_id))
            .order_by_asc(ComponentColumn::ComponentOrder)
            .order_by_asc(ComponentColumn::Id)
            .all(&self.db)
            .await
            .map_err(|e| CourseTeamError::database_operation(format!("查询评分项失败: {e}")))?;

        let total_weight = components.iter().map(|c| c.weight).sum();

        Ok(ComponentListResponse {
            items: components
                .into_iter()
                .map(|m| m.into_grade_component())
                .collect(),
            total_weight,
        })
    }

    /// 录入小组评分（覆盖写入）
    pub async fn record_team_grade_impl(
        &self,
        team_id: i64,
        req: RecordTeamGradeRequest,
        graded_by: i64,
    ) -> Result<TeamGrade> {
        let team = self
            .get_team_by_id_impl(team_id)
            .await?
            .ok_or_else(|| CourseTeamError::not_found(format!("小组 {team_id} 不存在")))?;
        self.ensure_component_in_assignment(req.component_id, team.assignment_id, req.score)
            .await?;

        let now = chrono::Utc::now().timestamp();
        let model = TeamGradeActiveModel {
            team_id: Set(team_id),
            component_id: Set(req.component_id),
            score: Set(req.score),
            notes: Set(req.notes),
            graded_by: Set(graded_by),
            graded_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        TeamGrades::insert(model)
            .on_conflict(
                OnConflict::columns([TeamGradeColumn::TeamId, TeamGradeColumn::ComponentId])
                    .update_columns([
                        TeamGradeColumn::Score,
                        TeamGradeColumn::Notes,
                        TeamGradeColumn::GradedBy,
                        TeamGradeColumn::UpdatedAt,
                    ])
                    .to_owned(),
            )
            .exec(&self.db)
            .await
            .map_err(|e| CourseTeamError::database_operation(format!("录入小组评分失败: {e}")))?;

        let result = TeamGrades::find()
            .filter(
                Condition::all()
                    .add(TeamGradeColumn::TeamId.eq(team_id))
                    .add(TeamGradeColumn::ComponentId.eq(req.component_id)),
            )
            .one(&self.db)
            .await
            .map_err(|e| CourseTeamError::database_operation(format!("查询小组评分失败: {e}")))?
            .ok_or_else(|| CourseTeamError::database_operation("小组评分写入后查询为空"))?;

        Ok(result.into_team_grade())
    }

    /// 录入学生个人评分（覆盖写入）
    pub async fn record_student_grade_impl(
        &self,
        team_id: i64,
        req: RecordIndividualGradeRequest,
        graded_by: i64,
    ) -> Result<StudentGrade> {
        let team = self
            .get_team_by_id_impl(team_id)
            .await?
            .ok_or_else(|| CourseTeamError::not_found(format!("小组 {team_id} 不存在")))?;

        let member = TeamMembers::find_by_id(req.team_member_id)
            .one(&self.db)
            .await
            .map_err(|e| CourseTeamError::database_operation(format!("查询成员记录失败: {e}")))?
            .ok_or_else(|| {
                CourseTeamError::not_found(format!("成员记录 {} 不存在", req.team_member_id))
            })?;
        if member.team_id != team_id {
            return Err(CourseTeamError::validation(format!(
                "成员记录 {} 不属于小组 {team_id}",
                req.team_member_id
            )));
        }
        self.ensure_component_in_assignment(req.component_id, team.assignment_id, req.score)
            .await?;

        let now = chrono::Utc::now().timestamp();
        let model = StudentGradeActiveModel {
            team_member_id: Set(req.team_member_id),
            component_id: Set(req.component_id),
            score: Set(req.score),
            notes: Set(req.notes),
            graded_by: Set(graded_by),
            graded_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        StudentGrades::insert(model)
            .on_conflict(
                OnConflict::columns([
                    StudentGradeColumn::TeamMemberId,
                    StudentGradeColumn::ComponentId,
                ])
                .update_columns([
                    StudentGradeColumn::Score,
                    StudentGradeColumn::Notes,
                    StudentGradeColumn::GradedBy,
                    StudentGradeColumn::UpdatedAt,
                ])
                .to_owned(),
            )
            .exec(&self.db)
            .await
            .map_err(|e| CourseTeamError::database_operation(format!("录入个人评分失败: {e}")))?;

        let result = StudentGrades::find()
            .filter(
                Condition::all()
                    .add(StudentGradeColumn::TeamMemberId.eq(req.team_member_id))
                    .add(StudentGradeColumn::ComponentId.eq(req.component_id)),
            )
            .one(&self.db)
            .await
            .map_err(|e| CourseTeamError::database_operation(format!("查询个人评分失败: {e}")))?
            .ok_or_else(|| CourseTeamError::database_operation("个人评分写入后查询为空"))?;

        Ok(result.into_student_grade())
    }

    /// 录入小组总评反馈（覆盖写入）
    pub async fn record_team_feedback_impl(
        &self,
        team_id: i64,
        req: RecordFeedbackRequest,
        created_by: i64,
    ) -> Result<TeamFeedbackEntry> {
        let team = self
            .get_team_by_id_impl(team_id)
            .await?
            .ok_or_else(|| CourseTeamError::not_found(format!("小组 {team_id} 不存在")))?;

        let now = chrono::Utc::now().timestamp();
        let model = TeamFeedbackActiveModel {
            team_id: Set(team_id),
            assignment_id: Set(team.assignment_id),
            overall_notes: Set(req.overall_notes),
            created_by: Set(created_by),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        TeamFeedback::insert(model)
            .on_conflict(
                OnConflict::columns([FeedbackColumn::TeamId, FeedbackColumn::AssignmentId])
                    .update_columns([
                        FeedbackColumn::OverallNotes,
                        FeedbackColumn::CreatedBy,
                        FeedbackColumn::UpdatedAt,
                    ])
                    .to_owned(),
            )
            .exec(&self.db)
            .await
            .map_err(|e| CourseTeamError::database_operation(format!("录入总评反馈失败: {e}")))?;

        let result = TeamFeedback::find()
            .filter(
                Condition::all()
                    .add(FeedbackColumn::TeamId.eq(team_id))
                    .add(FeedbackColumn::AssignmentId.eq(team.assignment_id)),
            )
            .one(&self.db)
            .await
            .map_err(|e| CourseTeamError::database_operation(format!("查询总评反馈失败: {e}")))?
            .ok_or_else(|| CourseTeamError::database_operation("总评反馈写入后查询为空"))?;

        Ok(result.into_team_feedback())
    }

    /// 学生个人成绩视图
    ///
    /// 未加入小组时仍返回评分项列表，但所有得分与总评均为空。
    pub async fn get_student_grade_view_impl(
        &self,
        assignment_id: i64,
        user_id: i64,
    ) -> Result<StudentGradeView> {
        if self.get_assignment_by_id_impl(assignment_id).await?.is_none() {
            return Err(CourseTeamError::not_found(format!(
                "大作业 {assignment_id} 不存在"
            )));
        }

        let components = self.list_grade_components_impl(assignment_id).await?.items;

        let Some(member) = self
            .get_member_by_assignment_and_user_impl(assignment_id, user_id)
            .await?
        else {
            return Ok(StudentGradeView {
                assignment_id,
                team_id: None,
                team_name: None,
                components: components
                    .into_iter()
                    .map(|c| ComponentGradeView {
                        id: c.id,
                        name: c.name,
                        description: c.description,
                        max_score: c.max_score,
                        weight: c.weight,
                        team_score: None,
                        individual_score: None,
                        notes: None,
                    })
                    .collect(),
                feedback: None,
                final_grade: None,
            });
        };

        let team = self
            .get_team_by_id_impl(member.team_id)
            .await?
            .ok_or_else(|| CourseTeamError::not_found(format!("小组 {} 不存在", member.team_id)))?;

        let team_grades: HashMap<i64, crate::entity::team_grades::Model> = TeamGrades::find()
            .filter(TeamGradeColumn::TeamId.eq(team.id))
            .all(&self.db)
            .await
            .map_err(|e| CourseTeamError::database_operation(format!("查询小组评分失败: {e}")))?
            .into_iter()
            .map(|g| (g.component_id, g))
            .collect();

        let student_grades: HashMap<i64, crate::entity::student_grades::Model> =
            StudentGrades::find()
                .filter(StudentGradeColumn::TeamMemberId.eq(member.id))
                .all(&self.db)
                .await
                .map_err(|e| {
                    CourseTeamError::database_operation(format!("查询个人评分失败: {e}"))
                })?
                .into_iter()
                .map(|g| (g.component_id, g))
                .collect();

        let feedback = TeamFeedback::find()
            .filter(
                Condition::all()
                    .add(FeedbackColumn::TeamId.eq(team.id))
                    .add(FeedbackColumn::AssignmentId.eq(assignment_id)),
            )
            .one(&self.db)
            .await
            .map_err(|e| CourseTeamError::database_operation(format!("查询总评反馈失败: {e}")))?
            .map(|m| m.into_team_feedback());

        let mut views = Vec::with_capacity(components.len());
        let mut scores = Vec::with_capacity(components.len());
        for c in components {
            let team_grade = team_grades.get(&c.id);
            let student_grade = student_grades.get(&c.id);
            // 个人评分存在时其备注一并覆盖
            let notes = student_grade
                .and_then(|g| g.notes.clone())
                .or_else(|| team_grade.and_then(|g| g.notes.clone()));
            scores.push(ComponentScore {
                max_score: c.max_score,
                weight: c.weight,
                team_score: team_grade.map(|g| g.score),
                individual_score: student_grade.map(|g| g.score),
            });
            views.push(ComponentGradeView {
                id: c.id,
                name: c.name,
                description: c.description,
                max_score: c.max_score,
                weight: c.weight,
                team_score: team_grade.map(|g| g.score),
                individual_score: student_grade.map(|g| g.score),
                notes,
            });
        }

        Ok(StudentGradeView {
            assignment_id,
            team_id: Some(team.id),
            team_name: Some(team.name),
            components: views,
            feedback,
            final_grade: aggregate::final_grade(&scores),
        })
    }

    /// 讲师视角的小组成绩总览
    pub async fn get_team_grades_overview_impl(
        &self,
        team_id: i64,
    ) -> Result<Option<TeamGradesOverview>> {
        let Some(roster) = self.get_team_roster_impl(team_id).await? else {
            return Ok(None);
        };

        let components = self
            .list_grade_components_impl(roster.team.assignment_id)
            .await?
            .items;

        let team_grades = TeamGrades::find()
            .filter(TeamGradeColumn::TeamId.eq(team_id))
            .all(&self.db)
            .await
            .map_err(|e| CourseTeamError::database_operation(format!("查询小组评分失败: {e}")))?;

        let member_ids: Vec<i64> = roster.members.iter().map(|m| m.id).collect();
        let student_grades = if member_ids.is_empty() {
            Vec::new()
        } else {
            StudentGrades::find()
                .filter(StudentGradeColumn::TeamMemberId.is_in(member_ids))
                .all(&self.db)
                .await
                .map_err(|e| {
                    CourseTeamError::database_operation(format!("查询个人评分失败: {e}"))
                })?
        };

        let feedback = TeamFeedback::find()
            .filter(
                Condition::all()
                    .add(FeedbackColumn::TeamId.eq(team_id))
                    .add(FeedbackColumn::AssignmentId.eq(roster.team.assignment_id)),
            )
            .one(&self.db)
            .await
            .map_err(|e| CourseTeamError::database_operation(format!("查询总评反馈失败: {e}")))?
            .map(|m| m.into_team_feedback());

        let team_score_by_component: HashMap<i64, f64> =
            team_grades.iter().map(|g| (g.component_id, g.score)).collect();

        // 不含个人覆盖的小组总评
        let team_scores: Vec<ComponentScore> = components
            .iter()
            .map(|c| ComponentScore {
                max_score: c.max_score,
                weight: c.weight,
                team_score: team_score_by_component.get(&c.id).copied(),
                individual_score: None,
            })
            .collect();
        let team_final = aggregate::final_grade(&team_scores);

        // 逐成员应用个人覆盖后的总评
        let member_finals = roster
            .members
            .iter()
            .map(|member| {
                let overrides: HashMap<i64, f64> = student_grades
                    .iter()
                    .filter(|g| g.team_member_id == member.id)
                    .map(|g| (g.component_id, g.score))
                    .collect();
                let scores: Vec<ComponentScore> = components
                    .iter()
                    .map(|c| ComponentScore {
                        max_score: c.max_score,
                        weight: c.weight,
                        team_score: team_score_by_component.get(&c.id).copied(),
                        individual_score: overrides.get(&c.id).copied(),
                    })
                    .collect();
                MemberFinalGrade {
                    team_member_id: member.id,
                    user_id: member.user_id,
                    user_name: member.user_name.clone(),
                    final_grade: aggregate::final_grade(&scores),
                }
            })
            .collect();

        Ok(Some(TeamGradesOverview {
            team_id,
            team_name: roster.team.name,
            components,
            team_grades: team_grades.into_iter().map(|m| m.into_team_grade()).collect(),
            student_grades: student_grades
                .into_iter()
                .map(|m| m.into_student_grade())
                .collect(),
            feedback,
            member_finals,
            team_final,
        }))
    }

    async fn total_component_weight(&self, assignment_id: i64) -> Result<f64> {
        let components = GradeComponents::find()
            .filter(ComponentColumn::AssignmentId.eq(assignment_id))
            .all(&self.db)
            .await
            .map_err(|e| CourseTeamError::database_operation(format!("查询评分项失败: {e}")))?;
        Ok(components.iter().map(|c| c.weight).sum())
    }

    // 校验评分项归属与得分范围（0 <= score <= max_score）
    async fn ensure_component_in_assignment(
        &self,
        component_id: i64,
        assignment_id: i64,
        score: f64,
    ) -> Result<()> {
        let component = GradeComponents::find_by_id(component_id)
            .one(&self.db)
            .await
            .map_err(|e| CourseTeamError::database_operation(format!("查询评分项失败: {e}")))?
            .ok_or_else(|| {
                CourseTeamError::not_found(format!("评分项 {component_id} 不存在"))
            })?;
        if component.assignment_id != assignment_id {
            return Err(CourseTeamError::validation(format!(
                "评分项 {component_id} 不属于大作业 {assignment_id}"
            )));
        }
        if !score.is_finite() || score < 0.0 || score > component.max_score {
            return Err(CourseTeamError::validation(format!(
                "得分必须在 0 到 {} 之间",
                component.max_score
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::SeaOrmStorage;
    use crate::models::assignments::requests::CreateAssignmentRequest;
    use crate::models::grades::requests::{
        CreateComponentRequest, RecordFeedbackRequest, RecordIndividualGradeRequest,
        RecordTeamGradeRequest,
    };
    use crate::utils::academic_term::Semester;

    async fn seed_assignment(storage: &SeaOrmStorage) -> (i64, Vec<i64>) {
        seed_user(storage, 1, "lecturer", "lecturer").await;
        seed_course(storage, 1, 1).await;
        let assignment = storage
            .create_assignment_impl(CreateAssignmentRequest {
                course_id: 1,
                title: "Final Project".to_string(),
                description: None,
                num_teams: 2,
                max_members_per_team: 4,
                academic_year: "2025/2026".to_string(),
                semester: Semester::Ganjil,
                assignment_due_date: None,
                grading_due_date: None,
            })
            .await
            .unwrap();
        let teams = storage
            .list_teams_with_members_impl(assignment.id)
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.team.id)
            .collect();
        (assignment.id, teams)
    }

    fn component_request(name: &str, max_score: f64, weight: f64) -> CreateComponentRequest {
        CreateComponentRequest {
            name: name.to_string(),
            description: None,
            max_score,
            weight,
            rubric: None,
            component_order: None,
        }
    }

    #[tokio::test]
    async fn test_create_component_reports_total_weight() {
        let storage = memory_storage().await;
        let (assignment_id, _) = seed_assignment(&storage).await;

        let first = storage
            .create_grade_component_impl(assignment_id, component_request("Report", 100.0, 70.0))
            .await
            .unwrap();
        assert_eq!(first.total_weight, 70.0);
        assert_eq!(first.component.component_order, 1);

        // 权重和超过 100 也不拒绝，只回报累计值
        let second = storage
            .create_grade_component_impl(assignment_id, component_request("Demo", 50.0, 50.0))
            .await
            .unwrap();
        assert_eq!(second.total_weight, 120.0);
        assert_eq!(second.component.component_order, 2);
    }

    #[tokio::test]
    async fn test_record_team_grade_upsert_is_idempotent() {
        let storage = memory_storage().await;
        let (assignment_id, teams) = seed_assignment(&storage).await;
        let component = storage
            .create_grade_component_impl(assignment_id, component_request("Report", 100.0, 70.0))
            .await
            .unwrap()
            .component;

        let first = storage
            .record_team_grade_impl(
                teams[0],
                RecordTeamGradeRequest {
                    component_id: component.id,
                    score: 80.0,
                    notes: None,
                },
                1,
            )
            .await
            .unwrap();

        let second = storage
            .record_team_grade_impl(
                teams[0],
                RecordTeamGradeRequest {
                    component_id: component.id,
                    score: 90.0,
                    notes: Some("revised".to_string()),
                },
                1,
            )
            .await
            .unwrap();

        assert_eq!(first.id, second.id);
        assert_eq!(second.score, 90.0);
        assert_eq!(second.notes.as_deref(), Some("revised"));
    }

    #[tokio::test]
    async fn test_record_team_grade_rejects_out_of_range_score() {
        let storage = memory_storage().await;
        let (assignment_id, teams) = seed_assignment(&storage).await;
        let component = storage
            .create_grade_component_impl(assignment_id, component_request("Demo", 50.0, 30.0))
            .await
            .unwrap()
            .component;

        for bad_score in [-1.0, 50.5, f64::NAN] {
            let result = storage
                .record_team_grade_impl(
                    teams[0],
                    RecordTeamGradeRequest {
                        component_id: component.id,
                        score: bad_score,
                        notes: None,
                    },
                    1,
                )
                .await;
            assert!(matches!(
                result,
                Err(crate::errors::CourseTeamError::Validation(_))
            ));
        }
    }

    #[tokio::test]
    async fn test_record_grade_rejects_component_from_other_assignment() {
        let storage = memory_storage().await;
        let (assignment_id, teams) = seed_assignment(&storage).await;
        let other = storage
            .create_assignment_impl(CreateAssignmentRequest {
                course_id: 1,
                title: "Midterm Project".to_string(),
                description: None,
                num_teams: 1,
                max_members_per_team: 4,
                academic_year: "2025/2026".to_string(),
                semester: Semester::Ganjil,
                assignment_due_date: None,
                grading_due_date: None,
            })
            .await
            .unwrap();
        let foreign = storage
            .create_grade_component_impl(other.id, component_request("Report", 100.0, 50.0))
            .await
            .unwrap()
            .component;
        let _ = assignment_id;

        let result = storage
            .record_team_grade_impl(
                teams[0],
                RecordTeamGradeRequest {
                    component_id: foreign.id,
                    score: 80.0,
                    notes: None,
                },
                1,
            )
            .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_student_grade_view_weighted_final() {
        let storage = memory_storage().await;
        let (assignment_id, teams) = seed_assignment(&storage).await;
        seed_user(&storage, 2, "alice", "student").await;
        seed_enrollment(&storage, 1, 2).await;
        let member = storage.join_team_impl(teams[0], 2, "alice").await.unwrap();

        let a = storage
            .create_grade_component_impl(assignment_id, component_request("Report", 100.0, 70.0))
            .await
            .unwrap()
            .component;
        let b = storage
            .create_grade_component_impl(assignment_id, component_request("Demo", 50.0, 30.0))
            .await
            .unwrap()
            .component;

        // 小组 A=90（90%），个人覆盖 B=15（30%）：(90*70 + 30*30) / 100 = 72.00
        storage
            .record_team_grade_impl(
                teams[0],
                RecordTeamGradeRequest {
                    component_id: a.id,
                    score: 90.0,
                    notes: None,
                },
                1,
            )
            .await
            .unwrap();
        storage
            .record_student_grade_impl(
                teams[0],
                RecordIndividualGradeRequest {
                    team_member_id: member.id,
                    component_id: b.id,
                    score: 15.0,
                    notes: None,
                },
                1,
            )
            .await
            .unwrap();

        let view = storage
            .get_student_grade_view_impl(assignment_id, 2)
            .await
            .unwrap();
        assert_eq!(view.team_id, Some(teams[0]));
        assert_eq!(view.final_grade, Some(72.0));
        assert_eq!(view.components[0].team_score, Some(90.0));
        assert_eq!(view.components[1].individual_score, Some(15.0));
    }

    #[tokio::test]
    async fn test_student_grade_view_partial_grading() {
        let storage = memory_storage().await;
        let (assignment_id, teams) = seed_assignment(&storage).await;
        seed_user(&storage, 2, "alice", "student").await;
        seed_enrollment(&storage, 1, 2).await;
        storage.join_team_impl(teams[0], 2, "alice").await.unwrap();

        let a = storage
            .create_grade_component_impl(assignment_id, component_request("Report", 100.0, 70.0))
            .await
            .unwrap()
            .component;
        storage
            .create_grade_component_impl(assignment_id, component_request("Demo", 50.0, 30.0))
            .await
            .unwrap();

        // 只评了 70 权重：按已覆盖权重归一化，总评是 90.00 而不是 63.00
        storage
            .record_team_grade_impl(
                teams[0],
                RecordTeamGradeRequest {
                    component_id: a.id,
                    score: 90.0,
                    notes: None,
                },
                1,
            )
            .await
            .unwrap();

        let view = storage
            .get_student_grade_view_impl(assignment_id, 2)
            .await
            .unwrap();
        assert_eq!(view.final_grade, Some(90.0));
    }

    #[tokio::test]
    async fn test_student_grade_view_without_team() {
        let storage = memory_storage().await;
        let (assignment_id, _) = seed_assignment(&storage).await;
        seed_user(&storage, 2, "alice", "student").await;
        seed_enrollment(&storage, 1, 2).await;
        storage
            .create_grade_component_impl(assignment_id, component_request("Report", 100.0, 70.0))
            .await
            .unwrap();

        let view = storage
            .get_student_grade_view_impl(assignment_id, 2)
            .await
            .unwrap();
        assert_eq!(view.team_id, None);
        assert_eq!(view.final_grade, None);
        assert_eq!(view.components.len(), 1);
        assert_eq!(view.components[0].team_score, None);
    }

    #[tokio::test]
    async fn test_feedback_upsert_overwrites() {
        let storage = memory_storage().await;
        let (_, teams) = seed_assignment(&storage).await;

        let first = storage
            .record_team_feedback_impl(
                teams[0],
                RecordFeedbackRequest {
                    overall_notes: Some("good start".to_string()),
                },
                1,
            )
            .await
            .unwrap();
        let second = storage
            .record_team_feedback_impl(
                teams[0],
                RecordFeedbackRequest {
                    overall_notes: Some("well done".to_string()),
                },
                1,
            )
            .await
            .unwrap();

        assert_eq!(first.id, second.id);
        assert_eq!(second.overall_notes.as_deref(), Some("well done"));
    }

    #[tokio::test]
    async fn test_team_grades_overview() {
        let storage = memory_storage().await;
        let (assignment_id, teams) = seed_assignment(&storage).await;
        seed_user(&storage, 2, "alice", "student").await;
        seed_user(&storage, 3, "bob", "student").await;
        seed_enrollment(&storage, 1, 2).await;
        seed_enrollment(&storage, 1, 3).await;
        let alice = storage.join_team_impl(teams[0], 2, "alice").await.unwrap();
        storage.join_team_impl(teams[0], 3, "bob").await.unwrap();

        let a = storage
            .create_grade_component_impl(assignment_id, component_request("Report", 100.0, 70.0))
            .await
            .unwrap()
            .component;
        let b = storage
            .create_grade_component_impl(assignment_id, component_request("Demo", 50.0, 30.0))
            .await
            .unwrap()
            .component;

        storage
            .record_team_grade_impl(
                teams[0],
                RecordTeamGradeRequest {
                    component_id: a.id,
                    score: 90.0,
                    notes: None,
                },
                1,
            )
            .await
            .unwrap();
        storage
            .record_team_grade_impl(
                teams[0],
                RecordTeamGradeRequest {
                    component_id: b.id,
                    score: 40.0,
                    notes: None,
                },
                1,
            )
            .await
            .unwrap();
        // alice 在 B 上有个人覆盖
        storage
            .record_student_grade_impl(
                teams[0],
                RecordIndividualGradeRequest {
                    team_member_id: alice.id,
                    component_id: b.id,
                    score: 15.0,
                    notes: None,
                },
                1,
            )
            .await
            .unwrap();

        let overview = storage
            .get_team_grades_overview_impl(teams[0])
            .await
            .unwrap()
            .unwrap();

        // 小组口径：(90*70 + 80*30) / 100 = 87.00
        assert_eq!(overview.team_final, Some(87.0));
        let alice_final = overview
            .member_finals
            .iter()
            .find(|m| m.user_id == 2)
            .unwrap();
        let bob_final = overview
            .member_finals
            .iter()
            .find(|m| m.user_id == 3)
            .unwrap();
        // alice 覆盖后：(90*70 + 30*30) / 100 = 72.00；bob 沿用小组分
        assert_eq!(alice_final.final_grade, Some(72.0));
        assert_eq!(bob_final.final_grade, Some(87.0));
    }
}
