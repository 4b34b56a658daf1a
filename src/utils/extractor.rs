//! 路径参数安全提取器
//!
//! 从请求路径中提取 i64 ID，解析失败或非正数时返回统一格式的 400 响应，
//! 避免在每个处理程序中重复做参数校验。

use crate::models::{ApiResponse, ErrorCode};
use actix_web::{HttpResponse, error::InternalError};

/// 定义一个从路径参数提取正整数 ID 的提取器
#[macro_export]
macro_rules! define_safe_i64_extractor {
    ($name:ident, $param:literal) => {
        pub struct $name(pub i64);

        impl actix_web::FromRequest for $name {
            type Error = actix_web::Error;
            type Future = std::future::Ready<Result<Self, Self::Error>>;

            fn from_request(
                req: &actix_web::HttpRequest,
                _payload: &mut actix_web::dev::Payload,
            ) -> Self::Future {
                let parsed = req
                    .match_info()
                    .get($param)
                    .and_then(|raw| raw.parse::<i64>().ok())
                    .filter(|id| *id > 0);

                std::future::ready(match parsed {
                    Some(id) => Ok($name(id)),
                    None => Err($crate::utils::extractor::bad_id_error($param)),
                })
            }
        }
    };
}

/// 构造路径 ID 无效的 400 错误
pub fn bad_id_error(param: &str) -> actix_web::Error {
    let response = HttpResponse::BadRequest().json(ApiResponse::error_empty(
        ErrorCode::BadRequest,
        format!("Invalid path parameter: {param}"),
    ));
    InternalError::from_response(format!("Invalid path parameter: {param}"), response).into()
}

define_safe_i64_extractor!(SafeCourseIdI64, "course_id");
define_safe_i64_extractor!(SafeAssignmentIdI64, "assignment_id");
define_safe_i64_extractor!(SafeTeamIdI64, "team_id");
define_safe_i64_extractor!(SafeComponentIdI64, "component_id");
