//! 一次性密码 (OTP) 模块
//!
//! 提供兼容认证器应用的一次性密码生成与验证。
//!
//! ## 支持的模式
//!
//! - **HOTP**: 基于计数器的一次性密码 (RFC 4226)
//! - **TOTP**: 基于时间的一次性密码 (RFC 6238，Google Authenticator 兼容)
//!
//! ## 示例
//!
//! ```rust
//! use otprs::otp::engine::{Otp, OtpConfig};
//! use otprs::otp::secret::OtpSecret;
//!
//! // 从存储中恢复密钥并创建引擎
//! let secret = OtpSecret::from_base32("GEZDGNBVGY3TQOJQGEZDGNBVGY3TQOJQ").unwrap();
//! let otp = Otp::new(OtpConfig::new().with_secret(secret)).unwrap();
//!
//! // 生成并验证当前验证码
//! let code = otp.totp().unwrap();
//! assert!(otp.totp_verify(&code).unwrap());
//! ```

pub mod algorithm;
pub mod engine;
pub mod secret;

pub use algorithm::OtpAlgorithm;
pub use engine::{Otp, OtpConfig, TotpVerifyResult};
pub use secret::{OtpSecret, RECOMMENDED_SECRET_LENGTH};
