//! 统一 API 错误码定义

use serde_repr::{Deserialize_repr, Serialize_repr};

use crate::errors::ScangateError;

/// API 错误码枚举
///
/// 按千位分域：
/// - 0: 成功
/// - 1000-1099: 通用错误
/// - 3000-3099: code 错误
/// - 4000-4099: 导出错误
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize_repr, Deserialize_repr)]
#[repr(i32)]
pub enum ErrorCode {
    Success = 0,

    // 通用错误 1000-1099
    BadRequest = 1000,
    Unauthorized = 1001,
    NotFound = 1004,
    InternalServerError = 1005,

    // code 错误 3000-3099
    CodeNotFound = 3000,

    // 导出错误 4000-4099
    ExportFailed = 4001,
}

impl From<&ScangateError> for ErrorCode {
    fn from(err: &ScangateError) -> Self {
        match err {
            ScangateError::Validation(_) => ErrorCode::BadRequest,
            ScangateError::NotFound(_) => ErrorCode::NotFound,
            ScangateError::Serialization(_) => ErrorCode::ExportFailed,
            _ => ErrorCode::InternalServerError,
        }
    }
}
