//! 请求参数错误处理器
//!
//! 将 actix 默认的 JSON/Query 解析错误转换为统一的 ApiResponse 格式。

use crate::models::{ApiResponse, ErrorCode};
use actix_web::{HttpRequest, HttpResponse, error::InternalError};

pub fn json_error_handler(
    err: actix_web::error::JsonPayloadError,
    _req: &HttpRequest,
) -> actix_web::Error {
    let message = format!("Invalid JSON payload: {err}");
    let response = HttpResponse::BadRequest().json(ApiResponse::error_empty(
        ErrorCode::BadRequest,
        message.clone(),
    ));
    InternalError::from_response(message, response).into()
}

pub fn query_error_handler(
    err: actix_web::error::QueryPayloadError,
    _req: &HttpRequest,
) -> actix_web::Error {
    let message = format!("Invalid query parameters: {err}");
    let response = HttpResponse::BadRequest().json(ApiResponse::error_empty(
        ErrorCode::BadRequest,
        message.clone(),
    ));
    InternalError::from_response(message, response).into()
}
