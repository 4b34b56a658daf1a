use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 创建用户表
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Users::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Users::Username)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Users::ProfileName).string().null())
                    .col(ColumnDef::new(Users::Role).string().not_null())
                    .col(ColumnDef::new(Users::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Users::UpdatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        // 创建课程表
        manager
            .create_table(
                Table::create()
                    .table(Courses::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Courses::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Courses::Title).string().not_null())
                    .col(ColumnDef::new(Courses::Description).text().null())
                    .col(ColumnDef::new(Courses::LecturerId).big_integer().not_null())
                    .col(ColumnDef::new(Courses::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Courses::UpdatedAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Courses::Table, Courses::LecturerId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建选课表
        manager
            .create_table(
                Table::create()
                    .table(CourseEnrollments::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CourseEnrollments::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(CourseEnrollments::CourseId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CourseEnrollments::UserId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CourseEnrollments::EnrolledAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(CourseEnrollments::Table, CourseEnrollments::CourseId)
                            .to(Courses::Table, Courses::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(CourseEnrollments::Table, CourseEnrollments::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_course_enrollments_course_user")
                    .table(CourseEnrollments::Table)
                    .col(CourseEnrollments::CourseId)
                    .col(CourseEnrollments::UserId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // 创建大作业表
        manager
            .create_table(
                Table::create()
                    .table(Assignments::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Assignments::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Assignments::CourseId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Assignments::Title).string().not_null())
                    .col(ColumnDef::new(Assignments::Description).text().null())
                    .col(ColumnDef::new(Assignments::NumTeams).integer().not_null())
                    .col(
                        ColumnDef::new(Assignments::MaxMembersPerTeam)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Assignments::AcademicYear)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Assignments::Semester).string().not_null())
                    .col(
                        ColumnDef::new(Assignments::AssignmentDueDate)
                            .big_integer()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Assignments::GradingDueDate)
                            .big_integer()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Assignments::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Assignments::UpdatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Assignments::Table, Assignments::CourseId)
                            .to(Courses::Table, Courses::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建小组表
        manager
            .create_table(
                Table::create()
                    .table(Teams::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Teams::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Teams::AssignmentId).big_integer().not_null())
                    .col(ColumnDef::new(Teams::Name).string().not_null())
                    .col(ColumnDef::new(Teams::MaxMembers).integer().not_null())
                    .col(ColumnDef::new(Teams::CreatedAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Teams::Table, Teams::AssignmentId)
                            .to(Assignments::Table, Assignments::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建小组成员表
        manager
            .create_table(
                Table::create()
                    .table(TeamMembers::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(TeamMembers::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(TeamMembers::TeamId).big_integer().not_null())
                    .col(ColumnDef::new(TeamMembers::UserId).big_integer().not_null())
                    .col(ColumnDef::new(TeamMembers::UserName).string().not_null())
                    .col(
                        ColumnDef::new(TeamMembers::JoinedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(TeamMembers::Table, TeamMembers::TeamId)
                            .to(Teams::Table, Teams::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(TeamMembers::Table, TeamMembers::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_team_members_team_user")
                    .table(TeamMembers::Table)
                    .col(TeamMembers::TeamId)
                    .col(TeamMembers::UserId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // 创建评分项表
        manager
            .create_table(
                Table::create()
                    .table(GradeComponents::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(GradeComponents::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(GradeComponents::AssignmentId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(GradeComponents::Name).string().not_null())
                    .col(ColumnDef::new(GradeComponents::Description).text().null())
                    .col(
                        ColumnDef::new(GradeComponents::MaxScore)
                            .double()
                            .not_null(),
                    )
                    .col(ColumnDef::new(GradeComponents::Weight).double().not_null())
                    .col(ColumnDef::new(GradeComponents::Rubric).text().null())
                    .col(
                        ColumnDef::new(GradeComponents::ComponentOrder)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(GradeComponents::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(GradeComponents::Table, GradeComponents::AssignmentId)
                            .to(Assignments::Table, Assignments::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建小组评分表
        manager
            .create_table(
                Table::create()
                    .table(TeamGrades::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(TeamGrades::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(TeamGrades::TeamId).big_integer().not_null())
                    .col(
                        ColumnDef::new(TeamGrades::ComponentId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(TeamGrades::Score).double().not_null())
                    .col(ColumnDef::new(TeamGrades::Notes).text().null())
                    .col(ColumnDef::new(TeamGrades::GradedBy).big_integer().not_null())
                    .col(ColumnDef::new(TeamGrades::GradedAt).big_integer().not_null())
                    .col(
                        ColumnDef::new(TeamGrades::UpdatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(TeamGrades::Table, TeamGrades::TeamId)
                            .to(Teams::Table, Teams::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(TeamGrades::Table, TeamGrades::ComponentId)
                            .to(GradeComponents::Table, GradeComponents::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_team_grades_team_component")
                    .table(TeamGrades::Table)
                    .col(TeamGrades::TeamId)
                    .col(TeamGrades::ComponentId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // 创建学生个人评分表（覆盖小组评分）
        manager
            .create_table(
                Table::create()
                    .table(StudentGrades::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(StudentGrades::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(StudentGrades::TeamMemberId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(StudentGrades::ComponentId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(StudentGrades::Score).double().not_null())
                    .col(ColumnDef::new(StudentGrades::Notes).text().null())
                    .col(
                        ColumnDef::new(StudentGrades::GradedBy)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(StudentGrades::GradedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(StudentGrades::UpdatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(StudentGrades::Table, StudentGrades::TeamMemberId)
                            .to(TeamMembers::Table, TeamMembers::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(StudentGrades::Table, StudentGrades::ComponentId)
                            .to(GradeComponents::Table, GradeComponents::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_student_grades_member_component")
                    .table(StudentGrades::Table)
                    .col(StudentGrades::TeamMemberId)
                    .col(StudentGrades::ComponentId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // 创建小组总评反馈表
        manager
            .create_table(
                Table::create()
                    .table(TeamFeedback::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(TeamFeedback::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(TeamFeedback::TeamId).big_integer().not_null())
                    .col(
                        ColumnDef::new(TeamFeedback::AssignmentId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(TeamFeedback::OverallNotes).text().null())
                    .col(
                        ColumnDef::new(TeamFeedback::CreatedBy)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TeamFeedback::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TeamFeedback::UpdatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(TeamFeedback::Table, TeamFeedback::TeamId)
                            .to(Teams::Table, Teams::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(TeamFeedback::Table, TeamFeedback::AssignmentId)
                            .to(Assignments::Table, Assignments::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_team_feedback_team_assignment")
                    .table(TeamFeedback::Table)
                    .col(TeamFeedback::TeamId)
                    .col(TeamFeedback::AssignmentId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(TeamFeedback::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(StudentGrades::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(TeamGrades::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(GradeComponents::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(TeamMembers::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Teams::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Assignments::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(CourseEnrollments::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Courses::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
    Username,
    ProfileName,
    Role,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Courses {
    Table,
    Id,
    Title,
    Description,
    LecturerId,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum CourseEnrollments {
    Table,
    Id,
    CourseId,
    UserId,
    EnrolledAt,
}

#[derive(DeriveIden)]
enum Assignments {
    Table,
    Id,
    CourseId,
    Title,
    Description,
    NumTeams,
    MaxMembersPerTeam,
    AcademicYear,
    Semester,
    AssignmentDueDate,
    GradingDueDate,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Teams {
    Table,
    Id,
    AssignmentId,
    Name,
    MaxMembers,
    CreatedAt,
}

#[derive(DeriveIden)]
enum TeamMembers {
    Table,
    Id,
    TeamId,
    UserId,
    UserName,
    JoinedAt,
}

#[derive(DeriveIden)]
enum GradeComponents {
    Table,
    Id,
    AssignmentId,
    Name,
    Description,
    MaxScore,
    Weight,
    Rubric,
    ComponentOrder,
    CreatedAt,
}

#[derive(DeriveIden)]
enum TeamGrades {
    Table,
    Id,
    TeamId,
    ComponentId,
    Score,
    Notes,
    GradedBy,
    GradedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum StudentGrades {
    Table,
    Id,
    TeamMemberId,
    ComponentId,
    Score,
    Notes,
    GradedBy,
    GradedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum TeamFeedback {
    Table,
    Id,
    TeamId,
    AssignmentId,
    OverallNotes,
    CreatedBy,
    CreatedAt,
    UpdatedAt,
}
