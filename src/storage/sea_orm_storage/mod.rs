//! SeaORM 存储实现
//!
//! 统一的数据库存储层，支持 SQLite、PostgreSQL 和 MySQL。

mod assignments;
mod courses;
mod grades;
mod teams;
mod users;

use crate::config::AppConfig;
use crate::errors::{CourseTeamError, Result};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::time::Duration;
use tracing::info;

/// SeaORM 存储实现
#[derive(Clone)]
pub struct SeaOrmStorage {
    pub(crate) db: DatabaseConnection,
}

impl SeaOrmStorage {
    /// 创建新的 SeaORM 存储实例
    pub async fn new_async() -> Result<Self> {
        let config = AppConfig::get();
        let db_url = Self::build_database_url(&config.database.url)?;

        // 根据数据库类型选择连接方式
        let db = if db_url.starts_with("sqlite://") {
            Self::connect_sqlite(&db_url, config).await?
        } else {
            Self::connect_generic(&db_url, config).await?
        };

        // 运行迁移
        Migrator::up(&db, None)
            .await
            .map_err(|e| CourseTeamError::database_operation(format!("数据库迁移失败: {e}")))?;

        info!("SeaORM 存储初始化完成，数据库: {}", db_url);

        Ok(Self { db })
    }

    /// SQLite 专用连接（WAL + pragma 优化）
    async fn connect_sqlite(url: &str, config: &AppConfig) -> Result<DatabaseConnection> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{
            SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
        };
        use std::str::FromStr;

        let opt = SqliteConnectOptions::from_str(url)
            .map_err(|e| CourseTeamError::database_config(format!("SQLite URL 解析失败: {e}")))?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(Duration::from_secs(5))
            .pragma("cache_size", "-64000")
            .pragma("temp_store", "memory")
            .pragma("mmap_size", "536870912")
            .pragma("wal_autocheckpoint", "1000");

        let pool = SqlitePoolOptions::new()
            .max_connections(config.database.pool_size)
            .min_connections(1)
            .test_before_acquire(true)
            .acquire_timeout(Duration::from_secs(config.database.timeout))
            .idle_timeout(Duration::from_secs(300))
            .connect_with(opt)
            .await
            .map_err(|e| CourseTeamError::database_connection(format!("SQLite 连接失败: {e}")))?;

        Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
    }

    /// 通用连接（PostgreSQL、MySQL 等）
    async fn connect_generic(url: &str, config: &AppConfig) -> Result<DatabaseConnection> {
        let mut opt = ConnectOptions::new(url);
        opt.max_connections(config.database.pool_size)
            .min_connections(5)
            .connect_timeout(Duration::from_secs(config.database.timeout))
            .acquire_timeout(Duration::from_secs(config.database.timeout))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(1800))
            .sqlx_logging(false)
            .sqlx_logging_level(tracing::log::LevelFilter::Debug);

        Database::connect(opt)
            .await
            .map_err(|e| CourseTeamError::database_connection(format!("无法连接到数据库: {e}")))
    }

    /// 从 URL 自动推断数据库类型并构建连接 URL
    fn build_database_url(url: &str) -> Result<String> {
        if url.starts_with("sqlite://") {
            Ok(url.to_string())
        } else if url.ends_with(".db") || url.ends_with(".sqlite") || url == ":memory:" {
            Ok(format!("sqlite://{}?mode=rwc", url))
        } else if url.starts_with("postgres://")
            || url.starts_with("postgresql://")
            || url.starts_with("mysql://")
            || url.starts_with("mariadb://")
        {
            Ok(url.to_string())
        } else {
            Err(CourseTeamError::database_config(format!(
                "无法从 URL 推断数据库类型: {url}. 支持: sqlite://, postgres://, mysql://, 或 .db/.sqlite 文件路径"
            )))
        }
    }
}

// Storage trait 实现
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
use crate::storage::Storage;
use async_trait::async_trait;

#[async_trait]
impl Storage for SeaOrmStorage {
    // 用户模块
    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>> {
        self.get_user_by_id_impl(id).await
    }

    // 课程模块
    async fn get_course_by_id(&self, course_id: i64) -> Result<Option<Course>> {
        self.get_course_by_id_impl(course_id).await
    }

    async fn is_user_enrolled(&self, course_id: i64, user_id: i64) -> Result<bool> {
        self.is_user_enrolled_impl(course_id, user_id).await
    }

    // 大作业模块
    async fn create_assignment(&self, req: CreateAssignmentRequest) -> Result<Assignment> {
        self.create_assignment_impl(req).await
    }

    async fn get_assignment_by_id(&self, assignment_id: i64) -> Result<Option<Assignment>> {
        self.get_assignment_by_id_impl(assignment_id).await
    }

    async fn list_assignments_with_pagination(
        &self,
        query: AssignmentListQuery,
    ) -> Result<AssignmentListResponse> {
        self.list_assignments_with_pagination_impl(query).await
    }

    async fn update_assignment(
        &self,
        assignment_id: i64,
        update: UpdateAssignmentRequest,
    ) -> Result<Option<Assignment>> {
        self.update_assignment_impl(assignment_id, update).await
    }

    async fn delete_assignment(&self, assignment_id: i64) -> Result<bool> {
        self.delete_assignment_impl(assignment_id).await
    }

    // 小组模块
    async fn get_team_by_id(&self, team_id: i64) -> Result<Option<Team>> {
        self.get_team_by_id_impl(team_id).await
    }

    async fn list_teams_with_members(&self, assignment_id: i64) -> Result<Vec<TeamRoster>> {
        self.list_teams_with_members_impl(assignment_id).await
    }

    async fn get_team_roster(&self, team_id: i64) -> Result<Option<TeamRoster>> {
        self.get_team_roster_impl(team_id).await
    }

    async fn join_team(&self, team_id: i64, user_id: i64, user_name: &str) -> Result<TeamMember> {
        self.join_team_impl(team_id, user_id, user_name).await
    }

    async fn leave_team(&self, team_id: i64, user_id: i64) -> Result<()> {
        self.leave_team_impl(team_id, user_id).await
    }

    async fn add_team_member(
        &self,
        team_id: i64,
        user_id: i64,
        user_name: &str,
    ) -> Result<TeamMember> {
        self.add_team_member_impl(team_id, user_id, user_name).await
    }

    async fn get_member_by_assignment_and_user(
        &self,
        assignment_id: i64,
        user_id: i64,
    ) -> Result<Option<TeamMember>> {
        self.get_member_by_assignment_and_user_impl(assignment_id, user_id)
            .await
    }

    // 评分模块
    async fn create_grade_component(
        &self,
        assignment_id: i64,
        req: CreateComponentRequest,
    ) -> Result<ComponentCreatedResponse> {
        self.create_grade_component_impl(assignment_id, req).await
    }

    async fn list_grade_components(&self, assignment_id: i64) -> Result<ComponentListResponse> {
        self.list_grade_components_impl(assignment_id).await
    }

    async fn record_team_grade(
        &self,
        team_id: i64,
        req: RecordTeamGradeRequest,
        graded_by: i64,
    ) -> Result<TeamGrade> {
        self.record_team_grade_impl(team_id, req, graded_by).await
    }

    async fn record_student_grade(
        &self,
        team_id: i64,
        req: RecordIndividualGradeRequest,
        graded_by: i64,
    ) -> Result<StudentGrade> {
        self.record_student_grade_impl(team_id, req, graded_by)
            .await
    }

    async fn record_team_feedback(
        &self,
        team_id: i64,
        req: RecordFeedbackRequest,
        created_by: i64,
    ) -> Result<TeamFeedbackEntry> {
        self.record_team_feedback_impl(team_id, req, created_by)
            .await
    }

    async fn get_student_grade_view(
        &self,
        assignment_id: i64,
        user_id: i64,
    ) -> Result<StudentGradeView> {
        self.get_student_grade_view_impl(assignment_id, user_id)
            .await
    }

    async fn get_team_grades_overview(&self, team_id: i64) -> Result<Option<TeamGradesOverview>> {
        self.get_team_grades_overview_impl(team_id).await
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::SeaOrmStorage;
    use migration::{Migrator, MigratorTrait};
    use sea_orm::{Set, SqlxSqliteConnector};
    use sea_orm::{ActiveModelTrait, sqlx::sqlite::SqlitePoolOptions};

    /// 内存 SQLite 存储，单连接池让并发事务串行化，结果可复现
    pub async fn memory_storage() -> SeaOrmStorage {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        let db = SqlxSqliteConnector::from_sqlx_sqlite_pool(pool);
        Migrator::up(&db, None).await.unwrap();
        SeaOrmStorage { db }
    }

    pub async fn seed_user(storage: &SeaOrmStorage, id: i64, username: &str, role: &str) {
        let now = chrono::Utc::now().timestamp();
        crate::entity::users::ActiveModel {
            id: Set(id),
            username: Set(username.to_string()),
            profile_name: Set(None),
            role: Set(role.to_string()),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&storage.db)
        .await
        .unwrap();
    }

    pub async fn seed_course(storage: &SeaOrmStorage, id: i64, lecturer_id: i64) {
        let now = chrono::Utc::now().timestamp();
        crate::entity::courses::ActiveModel {
            id: Set(id),
            title: Set(format!("Course {id}")),
            description: Set(None),
            lecturer_id: Set(lecturer_id),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&storage.db)
        .await
        .unwrap();
    }

    pub async fn seed_enrollment(storage: &SeaOrmStorage, course_id: i64, user_id: i64) {
        let now = chrono::Utc::now().timestamp();
        crate::entity::course_enrollments::ActiveModel {
            course_id: Set(course_id),
            user_id: Set(user_id),
            enrolled_at: Set(now),
            ..Default::default()
        }
        .insert(&storage.db)
        .await
        .unwrap();
    }
}
