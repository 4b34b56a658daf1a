//! 统一错误处理模块
//!
//! 使用宏自动生成错误类型，支持错误代码和类型名称。

use std::fmt;

/// 定义错误类型的宏
///
/// 自动生成：
/// - enum 定义
/// - code() 方法 - 返回错误代码
/// - error_type() 方法 - 返回错误类型名称
/// - message() 方法 - 返回错误详情
/// - 便捷构造函数
macro_rules! define_courseteam_errors {
    ($(
        $variant:ident($code:literal, $type_name:literal)
    ),* $(,)?) => {
        #[derive(Debug, Clone)]
        pub enum CourseTeamError {
            $($variant(String),)*
        }

        impl CourseTeamError {
            /// 获取错误代码
            pub fn code(&self) -> &'static str {
                match self {
                    $(CourseTeamError::$variant(_) => $code,)*
                }
            }

            /// 获取错误类型名称
            pub fn error_type(&self) -> &'static str {
                match self {
                    $(CourseTeamError::$variant(_) => $type_name,)*
                }
            }

            /// 获取错误详情
            pub fn message(&self) -> &str {
                match self {
                    $(CourseTeamError::$variant(msg) => msg,)*
                }
            }
        }

        // 生成便捷构造函数
        paste::paste! {
            impl CourseTeamError {
                $(
                    pub fn [<$variant:snake>]<T: Into<String>>(msg: T) -> Self {
                        CourseTeamError::$variant(msg.into())
                    }
                )*
            }
        }
    };
}

define_courseteam_errors! {
    DatabaseConfig("E001", "Database Configuration Error"),
    DatabaseConnection("E002", "Database Connection Error"),
    DatabaseOperation("E003", "Database Operation Error"),
    Validation("E004", "Validation Error"),
    NotFound("E005", "Resource Not Found"),
    Serialization("E006", "Serialization Error"),
    DateParse("E007", "Date Parse Error"),
    Authorization("E008", "Authorization Error"),
    // 小组成员管理错误，TeamConflict 的 message 携带已加入小组的名称
    TeamCapacity("E009", "Team Capacity Error"),
    TeamConflict("E010", "Team Membership Conflict"),
    NotAMember("E011", "Not A Team Member"),
    NotEnrolled("E012", "Not Enrolled In Course"),
    SemesterLocked("E013", "Past Semester Locked"),
}

impl CourseTeamError {
    /// 格式化为彩色输出（用于开发环境）
    #[cfg(debug_assertions)]
    pub fn format_colored(&self) -> String {
        format!(
            "\x1b[1;31m[ERROR]\x1b[0m \x1b[33m{}\x1b[0m \x1b[31m{}\x1b[0m\n  {}",
            self.code(),
            self.error_type(),
            self.message()
        )
    }

    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for CourseTeamError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for CourseTeamError {}

// 为常见的错误类型实现 From trait
impl From<sea_orm::DbErr> for CourseTeamError {
    fn from(err: sea_orm::DbErr) -> Self {
        CourseTeamError::DatabaseOperation(err.to_string())
    }
}

impl From<std::io::Error> for CourseTeamError {
    fn from(err: std::io::Error) -> Self {
        CourseTeamError::DatabaseOperation(err.to_string())
    }
}

impl From<serde_json::Error> for CourseTeamError {
    fn from(err: serde_json::Error) -> Self {
        CourseTeamError::Serialization(err.to_string())
    }
}

impl From<chrono::ParseError> for CourseTeamError {
    fn from(err: chrono::ParseError) -> Self {
        CourseTeamError::DateParse(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, CourseTeamError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(CourseTeamError::database_config("test").code(), "E001");
        assert_eq!(CourseTeamError::validation("test").code(), "E004");
        assert_eq!(CourseTeamError::team_capacity("test").code(), "E009");
        assert_eq!(CourseTeamError::semester_locked("test").code(), "E013");
    }

    #[test]
    fn test_error_types() {
        assert_eq!(
            CourseTeamError::team_conflict("Team 1").error_type(),
            "Team Membership Conflict"
        );
        assert_eq!(
            CourseTeamError::not_enrolled("test").error_type(),
            "Not Enrolled In Course"
        );
    }

    #[test]
    fn test_conflict_message_carries_team_name() {
        let err = CourseTeamError::team_conflict("Team 3");
        assert_eq!(err.message(), "Team 3");
    }

    #[test]
    fn test_format_simple() {
        let err = CourseTeamError::validation("weight out of range");
        let formatted = err.format_simple();
        assert!(formatted.contains("Validation Error"));
        assert!(formatted.contains("weight out of range"));
    }
}
