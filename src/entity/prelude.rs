//! 预导入模块，方便使用

pub use super::assignments::{
    ActiveModel as AssignmentActiveModel, Entity as Assignments, Model as AssignmentModel,
};
pub use super::course_enrollments::{
    ActiveModel as CourseEnrollmentActiveModel, Entity as CourseEnrollments,
    Model as CourseEnrollmentModel,
};
pub use super::courses::{ActiveModel as CourseActiveModel, Entity as Courses, Model as CourseModel};
pub use super::grade_components::{
    ActiveModel as GradeComponentActiveModel, Entity as GradeComponents,
    Model as GradeComponentModel,
};
pub use super::student_grades::{
    ActiveModel as StudentGradeActiveModel, Entity as StudentGrades, Model as StudentGradeModel,
};
pub use super::team_feedback::{
    ActiveModel as TeamFeedbackActiveModel, Entity as TeamFeedback, Model as TeamFeedbackModel,
};
pub use super::team_grades::{
    ActiveModel as TeamGradeActiveModel, Entity as TeamGrades, Model as TeamGradeModel,
};
pub use super::team_members::{
    ActiveModel as TeamMemberActiveModel, Entity as TeamMembers, Model as TeamMemberModel,
};
pub use super::teams::{ActiveModel as TeamActiveModel, Entity as Teams, Model as TeamModel};
pub use super::users::{ActiveModel as UserActiveModel, Entity as Users, Model as UserModel};
