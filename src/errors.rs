use actix_web::http::StatusCode;
use std::fmt;

#[derive(Debug, Clone)]
pub enum ScangateError {
    Configuration(String),
    DatabaseConnection(String),
    DatabaseOperation(String),
    FileOperation(String),
    Validation(String),
    NotFound(String),
    Serialization(String),
    QrRender(String),
}

impl ScangateError {
    /// 获取错误代码
    pub fn code(&self) -> &'static str {
        match self {
            ScangateError::Configuration(_) => "E001",
            ScangateError::DatabaseConnection(_) => "E002",
            ScangateError::DatabaseOperation(_) => "E003",
            ScangateError::FileOperation(_) => "E004",
            ScangateError::Validation(_) => "E005",
            ScangateError::NotFound(_) => "E006",
            ScangateError::Serialization(_) => "E007",
            ScangateError::QrRender(_) => "E008",
        }
    }

    /// 获取错误类型名称
    pub fn error_type(&self) -> &'static str {
        match self {
            ScangateError::Configuration(_) => "Configuration Error",
            ScangateError::DatabaseConnection(_) => "Database Connection Error",
            ScangateError::DatabaseOperation(_) => "Database Operation Error",
            ScangateError::FileOperation(_) => "File Operation Error",
            ScangateError::Validation(_) => "Validation Error",
            ScangateError::NotFound(_) => "Resource Not Found",
            ScangateError::Serialization(_) => "Serialization Error",
            ScangateError::QrRender(_) => "QR Render Error",
        }
    }

    /// 获取错误详情
    pub fn message(&self) -> &str {
        match self {
            ScangateError::Configuration(msg) => msg,
            ScangateError::DatabaseConnection(msg) => msg,
            ScangateError::DatabaseOperation(msg) => msg,
            ScangateError::FileOperation(msg) => msg,
            ScangateError::Validation(msg) => msg,
            ScangateError::NotFound(msg) => msg,
            ScangateError::Serialization(msg) => msg,
            ScangateError::QrRender(msg) => msg,
        }
    }

    /// HTTP 状态码映射
    pub fn http_status(&self) -> StatusCode {
        match self {
            ScangateError::Validation(_) => StatusCode::BAD_REQUEST,
            ScangateError::NotFound(_) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for ScangateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for ScangateError {}

// 便捷的构造函数
impl ScangateError {
    pub fn configuration<T: Into<String>>(msg: T) -> Self {
        ScangateError::Configuration(msg.into())
    }

    pub fn database_connection<T: Into<String>>(msg: T) -> Self {
        ScangateError::DatabaseConnection(msg.into())
    }

    pub fn database_operation<T: Into<String>>(msg: T) -> Self {
        ScangateError::DatabaseOperation(msg.into())
    }

    pub fn file_operation<T: Into<String>>(msg: T) -> Self {
        ScangateError::FileOperation(msg.into())
    }

    pub fn validation<T: Into<String>>(msg: T) -> Self {
        ScangateError::Validation(msg.into())
    }

    pub fn not_found<T: Into<String>>(msg: T) -> Self {
        ScangateError::NotFound(msg.into())
    }

    pub fn serialization<T: Into<String>>(msg: T) -> Self {
        ScangateError::Serialization(msg.into())
    }

    pub fn qr_render<T: Into<String>>(msg: T) -> Self {
        ScangateError::QrRender(msg.into())
    }
}

// 为常见的错误类型实现 From trait
impl From<sea_orm::DbErr> for ScangateError {
    fn from(err: sea_orm::DbErr) -> Self {
        ScangateError::DatabaseOperation(err.to_string())
    }
}

impl From<std::io::Error> for ScangateError {
    fn from(err: std::io::Error) -> Self {
        ScangateError::FileOperation(err.to_string())
    }
}

impl From<serde_json::Error> for ScangateError {
    fn from(err: serde_json::Error) -> Self {
        ScangateError::Serialization(err.to_string())
    }
}

impl From<csv::Error> for ScangateError {
    fn from(err: csv::Error) -> Self {
        ScangateError::Serialization(err.to_string())
    }
}

impl From<image::ImageError> for ScangateError {
    fn from(err: image::ImageError) -> Self {
        ScangateError::QrRender(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ScangateError>;
