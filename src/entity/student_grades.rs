//! 学生个人评分实体
//!
//! (team_member_id, component_id) 唯一，存在时覆盖对应的小组评分。

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "student_grades")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub team_member_id: i64,
    pub component_id: i64,
    pub score: f64,
    #[sea_orm(column_type = "Text", nullable)]
    pub notes: Option<String>,
    pub graded_by: i64,
    pub graded_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::team_members::Entity",
        from = "Column::TeamMemberId",
        to = "super::team_members::Column::Id"
    )]
    TeamMember,
    #[sea_orm(
        belongs_to = "super::grade_components::Entity",
        from = "Column::ComponentId",
        to = "super::grade_components::Column::Id"
    )]
    Component,
}

impl Related<super::team_members::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TeamMember.def()
    }
}

impl Related<super::grade_components::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Component.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// 从数据库模型转换为业务模型
impl Model {
    pub fn into_student_grade(self) -> crate::models::grades::entities::StudentGrade {
        use crate::models::grades::entities::StudentGrade;
        use chrono::{DateTime, Utc};

        StudentGrade {
            id: self.id,
            team_member_id: self.team_member_id,
            component_id: self.component_id,
            score: self.score,
            notes: self.notes,
            graded_by: self.graded_by,
            graded_at: DateTime::<Utc>::from_timestamp(self.graded_at, 0).unwrap_or_default(),
            updated_at: DateTime::<Utc>::from_timestamp(self.updated_at, 0).unwrap_or_default(),
        }
    }
}
