//! # OtpRS
//!
//! 一次性密码 (OTP) 引擎库，兼容 HOTP (RFC 4226) 与 TOTP (RFC 6238)。
//!
//! ## 功能特性
//!
//! - **HOTP**: 基于计数器的一次性密码生成与验证
//! - **TOTP**: 基于时间的一次性密码生成与验证，支持时钟偏差窗口
//! - **密钥管理**: 密码学安全的密钥生成与 Base32 编解码
//! - **多算法**: 支持 HMAC-SHA1/SHA256/SHA512
//! - **常量时间比较**: 验证码比较防止时序攻击
//!
//! ## TOTP 示例
//!
//! ```rust
//! use otprs::Otp;
//!
//! // 创建引擎并自动生成密钥
//! let otp = Otp::with_defaults().unwrap();
//!
//! // 将 otp.secret().base32() 交给用户录入认证器应用
//!
//! // 生成当前验证码
//! let code = otp.totp().unwrap();
//!
//! // 验证用户输入的码（允许前后各一个时间步的偏差）
//! assert!(otp.totp_verify(&code).unwrap());
//! ```
//!
//! ## HOTP 示例
//!
//! ```rust
//! use otprs::{Otp, OtpConfig, OtpAlgorithm};
//!
//! let otp = Otp::new(
//!     OtpConfig::new()
//!         .with_algorithm(OtpAlgorithm::SHA1)
//!         .with_digits(8),
//! )
//! .unwrap();
//!
//! // 计数器由调用方维护，验证成功后自行推进
//! let code = otp.hotp(0).unwrap();
//! assert!(otp.hotp_verify(&code, 0).unwrap());
//! ```

pub mod error;
pub mod otp;
pub mod random;

pub use error::{Error, Result};

// ============================================================================
// OTP 相关导出
// ============================================================================

pub use otp::algorithm::OtpAlgorithm;
pub use otp::engine::{Otp, OtpConfig, TotpVerifyResult};
pub use otp::secret::{OtpSecret, RECOMMENDED_SECRET_LENGTH};

// ============================================================================
// 随机数与比较函数导出
// ============================================================================

pub use random::{constant_time_compare, constant_time_compare_str, generate_random_bytes};
