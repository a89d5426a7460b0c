//! 统一错误类型模块
//!
//! 提供 otprs 库中所有操作的错误类型定义。

use std::fmt;

/// otprs 库的统一结果类型
pub type Result<T> = std::result::Result<T, Error>;

/// otprs 库的错误类型
#[derive(Debug)]
pub enum Error {
    /// 配置错误
    Config(ConfigError),

    /// 验证错误
    Validation(ValidationError),

    /// 加密错误
    Crypto(CryptoError),

    /// 其他错误
    Other(String),
}

impl Error {
    /// 创建一个验证错误
    pub fn validation(msg: impl Into<String>) -> Self {
        Error::Validation(ValidationError::Custom(msg.into()))
    }
}

/// 配置相关错误
///
/// 只会在构造引擎时出现，不会在生成或验证验证码时出现。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// 算法不支持
    UnsupportedAlgorithm(String),
    /// 无效的配置值
    InvalidValue { key: String, message: String },
}

/// 验证相关错误
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// 无法解码的密钥文本
    InvalidSecret(String),
    /// 时间步长为零
    ZeroPeriod,
    /// 自定义验证错误
    Custom(String),
}

/// 加密相关错误
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CryptoError {
    /// 随机数生成失败
    RngFailed(String),
    /// 密钥无效
    InvalidKey(String),
}

// ============================================================================
// Display 实现
// ============================================================================

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Config(e) => write!(f, "Config error: {}", e),
            Error::Validation(e) => write!(f, "Validation error: {}", e),
            Error::Crypto(e) => write!(f, "Crypto error: {}", e),
            Error::Other(msg) => write!(f, "Error: {}", msg),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::UnsupportedAlgorithm(alg) => {
                write!(f, "unsupported algorithm: {}", alg)
            }
            ConfigError::InvalidValue { key, message } => {
                write!(f, "invalid configuration value for '{}': {}", key, message)
            }
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::InvalidSecret(text) => {
                write!(f, "invalid base32 secret: {}", text)
            }
            ValidationError::ZeroPeriod => write!(f, "period must be at least 1 second"),
            ValidationError::Custom(msg) => write!(f, "{}", msg),
        }
    }
}

impl fmt::Display for CryptoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CryptoError::RngFailed(msg) => write!(f, "random number generation failed: {}", msg),
            CryptoError::InvalidKey(msg) => write!(f, "invalid key: {}", msg),
        }
    }
}

// ============================================================================
// std::error::Error 实现
// ============================================================================

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        None
    }
}

impl std::error::Error for ConfigError {}
impl std::error::Error for ValidationError {}
impl std::error::Error for CryptoError {}

// ============================================================================
// From 实现 - 方便错误转换
// ============================================================================

impl From<ConfigError> for Error {
    fn from(err: ConfigError) -> Self {
        Error::Config(err)
    }
}

impl From<ValidationError> for Error {
    fn from(err: ValidationError) -> Self {
        Error::Validation(err)
    }
}

impl From<CryptoError> for Error {
    fn from(err: CryptoError) -> Self {
        Error::Crypto(err)
    }
}

impl From<String> for Error {
    fn from(msg: String) -> Self {
        Error::Other(msg)
    }
}

impl From<&str> for Error {
    fn from(msg: &str) -> Self {
        Error::Other(msg.to_string())
    }
}
