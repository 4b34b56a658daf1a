/// API 业务错误码
///
/// 按域分段：1xxx 通用，2xxx 课程，3xxx 大作业，4xxx 小组，5xxx 评分。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ErrorCode {
    Success = 0,

    // 通用
    BadRequest = 1000,
    Unauthorized = 1001,
    Forbidden = 1002,
    NotFound = 1003,
    InternalServerError = 1004,

    // 课程
    CourseNotFound = 2001,
    NotEnrolledInCourse = 2002,

    // 大作业
    AssignmentNotFound = 3001,
    AssignmentInvalid = 3002,
    SemesterLocked = 3003,
    TeamResizeFailed = 3004,

    // 小组
    TeamNotFound = 4001,
    TeamFull = 4002,
    TeamAlreadyJoined = 4003,
    TeamMemberNotFound = 4004,
    TeamJoinFailed = 4005,

    // 评分
    ComponentNotFound = 5001,
    ComponentInvalid = 5002,
    GradeScoreInvalid = 5003,
    GradeSaveFailed = 5004,
    GradeNotFound = 5005,
}
