//! 课程与选课存储操作
//!
//! 课程 CRUD 与选课名单维护由外部服务负责，这里只做归属与成员资格查询。

use super::SeaOrmStorage;
use crate::entity::course_enrollments::Column as EnrollmentColumn;
use crate::entity::prelude::{CourseEnrollments, Courses};
use crate::errors::{CourseTeamError, Result};
use crate::models::courses::entities::Course;
use sea_orm::{ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter};

impl SeaOrmStorage {
    /// 通过 ID 获取课程
    pub async fn get_course_by_id_impl(&self, course_id: i64) -> Result<Option<Course>> {
        let result = Courses::find_by_id(course_id)
            .one(&self.db)
            .await
            .map_err(|e| CourseTeamError::database_operation(format!("查询课程失败: {e}")))?;

        Ok(result.map(|m| m.into_course()))
    }

    /// 用户是否已选该课程
    pub async fn is_user_enrolled_impl(&self, course_id: i64, user_id: i64) -> Result<bool> {
        let count = CourseEnrollments::find()
            .filter(
                Condition::all()
                    .add(EnrollmentColumn::CourseId.eq(course_id))
                    .add(EnrollmentColumn::UserId.eq(user_id)),
            )
            .count(&self.db)
            .await
            .map_err(|e| CourseTeamError::database_operation(format!("查询选课记录失败: {e}")))?;

        Ok(count > 0)
    }
}
