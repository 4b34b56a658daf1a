use std::sync::Arc;

use crate::models::{
    assignments::{
        entities::Assignment,
        requests::{AssignmentListQuery, CreateAssignmentRequest, UpdateAssignmentRequest},
        responses::AssignmentListResponse,
    },
    courses::entities::Course,
    grades::{
        entities::{StudentGrade, TeamFeedbackEntry, TeamGrade},
        requests::{
            CreateComponentRequest, RecordFeedbackRequest, RecordIndividualGradeRequest,
            RecordTeamGradeRequest,
        },
        responses::{
            ComponentCreatedResponse, ComponentListResponse, StudentGradeView, TeamGradesOverview,
        },
    },
    teams::entities::{Team, TeamMember, TeamRoster},
    users::entities::User,
};

use crate::errors::Result;

pub mod sea_orm_storage;

#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 用户方法
    // 通过ID获取用户信息
    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>>;

    /// 课程方法
    // 通过ID获取课程信息
    async fn get_course_by_id(&self, course_id: i64) -> Result<Option<Course>>;
    // 用户是否已选该课程
    async fn is_user_enrolled(&self, course_id: i64, user_id: i64) -> Result<bool>;

    /// 大作业管理方法
    // 创建大作业，并按 num_teams 批量生成空小组
    async fn create_assignment(&self, req: CreateAssignmentRequest) -> Result<Assignment>;
    // 通过ID获取大作业
    async fn get_assignment_by_id(&self, assignment_id: i64) -> Result<Option<Assignment>>;
    // 列出大作业
    async fn list_assignments_with_pagination(
        &self,
        query: AssignmentListQuery,
    ) -> Result<AssignmentListResponse>;
    // 更新大作业，num_teams 变更走小组扩缩容语义
    async fn update_assignment(
        &self,
        assignment_id: i64,
        update: UpdateAssignmentRequest,
    ) -> Result<Option<Assignment>>;
    // 删除大作业（小组、成员、评分级联删除）
    async fn delete_assignment(&self, assignment_id: i64) -> Result<bool>;

    /// 小组成员管理方法
    // 通过ID获取小组
    async fn get_team_by_id(&self, team_id: i64) -> Result<Option<Team>>;
    // 列出大作业下全部小组及成员名单
    async fn list_teams_with_members(&self, assignment_id: i64) -> Result<Vec<TeamRoster>>;
    // 获取单个小组及成员名单
    async fn get_team_roster(&self, team_id: i64) -> Result<Option<TeamRoster>>;
    // 学生加入小组：容量检查与插入在同一事务内完成
    async fn join_team(&self, team_id: i64, user_id: i64, user_name: &str) -> Result<TeamMember>;
    // 成员退出/被移出小组
    async fn leave_team(&self, team_id: i64, user_id: i64) -> Result<()>;
    // 讲师添加成员；已在同大作业其他小组时原子移组
    async fn add_team_member(
        &self,
        team_id: i64,
        user_id: i64,
        user_name: &str,
    ) -> Result<TeamMember>;
    // 获取用户在大作业下的成员记录
    async fn get_member_by_assignment_and_user(
        &self,
        assignment_id: i64,
        user_id: i64,
    ) -> Result<Option<TeamMember>>;

    /// 评分方法
    // 创建评分项，返回该大作业当前累计权重
    async fn create_grade_component(
        &self,
        assignment_id: i64,
        req: CreateComponentRequest,
    ) -> Result<ComponentCreatedResponse>;
    // 列出评分项
    async fn list_grade_components(&self, assignment_id: i64) -> Result<ComponentListResponse>;
    // 录入小组评分（已存在则覆盖）
    async fn record_team_grade(
        &self,
        team_id: i64,
        req: RecordTeamGradeRequest,
        graded_by: i64,
    ) -> Result<TeamGrade>;
    // 录入学生个人评分（已存在则覆盖）
    async fn record_student_grade(
        &self,
        team_id: i64,
        req: RecordIndividualGradeRequest,
        graded_by: i64,
    ) -> Result<StudentGrade>;
    // 录入小组总评反馈（已存在则覆盖）
    async fn record_team_feedback(
        &self,
        team_id: i64,
        req: RecordFeedbackRequest,
        created_by: i64,
    ) -> Result<TeamFeedbackEntry>;
    // 学生个人成绩视图（含归一化加权总评）
    async fn get_student_grade_view(
        &self,
        assignment_id: i64,
        user_id: i64,
    ) -> Result<StudentGradeView>;
    // 讲师视角的小组成绩总览
    async fn get_team_grades_overview(&self, team_id: i64) -> Result<Option<TeamGradesOverview>>;
}

pub async fn create_storage() -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::new_async().await?;
    Ok(Arc::new(storage))
}
