//! 评分项实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "grade_components")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub assignment_id: i64,
    pub name: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    pub max_score: f64,
    pub weight: f64,
    #[sea_orm(column_type = "Text", nullable)]
    pub rubric: Option<String>,
    pub component_order: i32,
    pub created_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::assignments::Entity",
        from = "Column::AssignmentId",
        to = "super::assignments::Column::Id"
    )]
    Assignment,
    #[sea_orm(has_many = "super::team_grades::Entity")]
    TeamGrades,
    #[sea_orm(has_many = "super::student_grades::Entity")]
    StudentGrades,
}

impl Related<super::assignments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Assignment.def()
    }
}

impl Related<super::team_grades::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TeamGrades.def()
    }
}

impl Related<super::student_grades::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::StudentGrades.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// 从数据库模型转换为业务模型
impl Model {
    pub fn into_grade_component(self) -> crate::models::grades::entities::GradeComponent {
        use crate::models::grades::entities::GradeComponent;
        use chrono::{DateTime, Utc};

        GradeComponent {
            id: self.id,
            assignment_id: self.assignment_id,
            name: self.name,
            description: self.description,
            max_score: self.max_score,
            weight: self.weight,
            rubric: self.rubric,
            component_order: self.component_order,
            created_at: DateTime::<Utc>::from_timestamp(self.created_at, 0).unwrap_or_default(),
        }
    }
}
