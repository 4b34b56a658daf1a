//! 大作业实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "assignments")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub course_id: i64,
    pub title: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    pub num_teams: i32,
    pub max_members_per_team: i32,
    pub academic_year: String,
    pub semester: String,
    pub assignment_due_date: Option<i64>,
    pub grading_due_date: Option<i64>,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::courses::Entity",
        from = "Column::CourseId",
        to = "super::courses::Column::Id"
    )]
    Course,
    #[sea_orm(has_many = "super::teams::Entity")]
    Teams,
    #[sea_orm(has_many = "super::grade_components::Entity")]
    GradeComponents,
}

impl Related<super::courses::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Course.def()
    }
}

impl Related<super::teams::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Teams.def()
    }
}

impl Related<super::grade_components::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::GradeComponents.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// 从数据库模型转换为业务模型
impl Model {
    pub fn into_assignment(self) -> crate::models::assignments::entities::Assignment {
        use crate::models::assignments::entities::Assignment;
        use crate::utils::academic_term::Semester;
        use chrono::{DateTime, Utc};

        Assignment {
            id: self.id,
            course_id: self.course_id,
            title: self.title,
            description: self.description,
            num_teams: self.num_teams,
            max_members_per_team: self.max_members_per_team,
            academic_year: self.academic_year,
            semester: self
                .semester
                .parse::<Semester>()
                .unwrap_or(Semester::Ganjil),
            assignment_due_date: self
                .assignment_due_date
                .and_then(|ts| DateTime::<Utc>::from_timestamp(ts, 0)),
            grading_due_date: self
                .grading_due_date
                .and_then(|ts| DateTime::<Utc>::from_timestamp(ts, 0)),
            created_at: DateTime::<Utc>::from_timestamp(self.created_at, 0).unwrap_or_default(),
            updated_at: DateTime::<Utc>::from_timestamp(self.updated_at, 0).unwrap_or_default(),
        }
    }
}
