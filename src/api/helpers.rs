//! API 帮助函数

use actix_web::HttpResponse;
use actix_web::http::StatusCode;
use serde::Serialize;

use crate::errors::ScangateError;

use super::error_code::ErrorCode;
use super::types::ApiResponse;

/// 构建 JSON 响应
pub fn json_response<T: Serialize>(
    status: StatusCode,
    code: ErrorCode,
    message: impl Into<String>,
    data: Option<T>,
) -> HttpResponse {
    HttpResponse::build(status)
        .append_header(("Content-Type", "application/json; charset=utf-8"))
        .json(ApiResponse {
            code: code as i32,
            message: message.into(),
            data,
        })
}

/// 构建成功响应
pub fn success_response<T: Serialize>(data: T) -> HttpResponse {
    json_response(StatusCode::OK, ErrorCode::Success, "OK", Some(data))
}

/// 构建错误响应
pub fn error_response(status: StatusCode, error_code: ErrorCode, message: &str) -> HttpResponse {
    json_response::<()>(status, error_code, message, None)
}

/// 从 ScangateError 构建错误响应（自动映射 HTTP 状态码和 ErrorCode）
pub fn error_from_scangate(err: &ScangateError) -> HttpResponse {
    error_response(err.http_status(), ErrorCode::from(err), err.message())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_response() {
        let response = success_response("data");
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[test]
    fn test_error_response_not_found() {
        let response = error_response(StatusCode::NOT_FOUND, ErrorCode::NotFound, "missing");
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_error_from_scangate_maps_status() {
        let validation = ScangateError::validation("empty field");
        assert_eq!(
            error_from_scangate(&validation).status(),
            StatusCode::BAD_REQUEST
        );

        let backend = ScangateError::database_operation("boom");
        assert_eq!(
            error_from_scangate(&backend).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
