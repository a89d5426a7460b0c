//! OTP 引擎模块
//!
//! 单一引擎同时提供 HOTP (RFC 4226) 与 TOTP (RFC 6238) 的生成和验证，
//! 两者共用同一个计数器到验证码的派生原语（HMAC 动态截断）。
//!
//! ## 示例
//!
//! ```rust
//! use otprs::otp::engine::{Otp, OtpConfig};
//!
//! // 创建引擎并自动生成密钥
//! let otp = Otp::with_defaults().unwrap();
//!
//! // 生成当前 TOTP 码
//! let code = otp.totp().unwrap();
//!
//! // 验证用户输入的码
//! assert!(otp.totp_verify(&code).unwrap());
//! ```

use std::time::{SystemTime, UNIX_EPOCH};

use crate::error::{ConfigError, Error, Result, ValidationError};
use crate::otp::algorithm::{hmac_digest, OtpAlgorithm};
use crate::otp::secret::{OtpSecret, RECOMMENDED_SECRET_LENGTH};
use crate::random::constant_time_compare;

/// OTP 引擎配置
///
/// 所有字段在 [`Otp::new`] 中校验；非法取值返回配置错误而不是 panic。
#[derive(Debug, Clone)]
pub struct OtpConfig {
    /// 哈希算法
    pub algorithm: OtpAlgorithm,

    /// 验证码位数，默认 6 位
    pub digits: u32,

    /// TOTP 时间步长（秒），默认 30 秒
    pub period: u64,

    /// 密钥；为空时构造引擎会自动生成随机密钥
    pub secret: Option<OtpSecret>,

    /// 自动生成密钥时的长度（字节），默认 20 字节（160 位）
    pub secret_length: usize,
}

impl Default for OtpConfig {
    fn default() -> Self {
        Self {
            algorithm: OtpAlgorithm::SHA1,
            digits: 6,
            period: 30,
            secret: None,
            secret_length: RECOMMENDED_SECRET_LENGTH,
        }
    }
}

impl OtpConfig {
    /// 创建新的配置
    pub fn new() -> Self {
        Self::default()
    }

    /// 设置哈希算法
    pub fn with_algorithm(mut self, algorithm: OtpAlgorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    /// 设置验证码位数
    pub fn with_digits(mut self, digits: u32) -> Self {
        self.digits = digits;
        self
    }

    /// 设置时间步长（秒）
    pub fn with_period(mut self, period: u64) -> Self {
        self.period = period;
        self
    }

    /// 设置密钥
    pub fn with_secret(mut self, secret: OtpSecret) -> Self {
        self.secret = Some(secret);
        self
    }

    /// 设置自动生成密钥的长度
    pub fn with_secret_length(mut self, length: usize) -> Self {
        self.secret_length = length;
        self
    }
}

/// TOTP 验证结果
#[derive(Debug, Clone)]
pub struct TotpVerifyResult {
    /// 是否验证成功
    pub valid: bool,

    /// 匹配的时间步偏移量（0 表示当前步，负数表示过去，正数表示未来）
    pub step_offset: i64,
}

/// OTP 引擎
///
/// 一个实例持有算法、位数、时间步长和密钥；构造之后全部不可变，
/// 所有方法都是只读的纯计算，可以在多个线程间安全共享。
#[derive(Debug, Clone)]
pub struct Otp {
    algorithm: OtpAlgorithm,
    digits: u32,
    period: u64,
    secret: OtpSecret,
}

impl Otp {
    /// 使用给定配置创建引擎
    ///
    /// 配置中未提供密钥时会自动生成随机密钥。
    ///
    /// # Errors
    ///
    /// 位数不在 1 到 10 之间、时间步长为零或自动生成密钥长度小于
    /// 16 字节时返回 [`ConfigError::InvalidValue`]；随机源失败时返回
    /// 加密错误。
    pub fn new(config: OtpConfig) -> Result<Self> {
        if config.digits < 1 || config.digits > 10 {
            return Err(Error::Config(ConfigError::InvalidValue {
                key: "digits".to_string(),
                message: format!("must be between 1 and 10, got {}", config.digits),
            }));
        }

        if config.period == 0 {
            return Err(Error::Config(ConfigError::InvalidValue {
                key: "period".to_string(),
                message: "must be at least 1 second".to_string(),
            }));
        }

        if config.secret_length < 16 {
            return Err(Error::Config(ConfigError::InvalidValue {
                key: "secret_length".to_string(),
                message: format!("must be at least 16 bytes, got {}", config.secret_length),
            }));
        }

        let secret = match config.secret {
            Some(secret) => secret,
            None => OtpSecret::generate(config.secret_length)?,
        };

        Ok(Self {
            algorithm: config.algorithm,
            digits: config.digits,
            period: config.period,
            secret,
        })
    }

    /// 使用默认配置创建引擎，并自动生成随机密钥
    pub fn with_defaults() -> Result<Self> {
        Self::new(OtpConfig::default())
    }

    /// 获取哈希算法
    pub fn algorithm(&self) -> OtpAlgorithm {
        self.algorithm
    }

    /// 获取验证码位数
    pub fn digits(&self) -> u32 {
        self.digits
    }

    /// 获取时间步长（秒）
    pub fn period(&self) -> u64 {
        self.period
    }

    /// 获取密钥
    pub fn secret(&self) -> &OtpSecret {
        &self.secret
    }

    /// 生成 HOTP 验证码 (RFC 4226)
    ///
    /// # Arguments
    ///
    /// * `counter` - 计数器值，由调用方维护
    pub fn hotp(&self, counter: u64) -> Result<String> {
        self.derive_code(counter)
    }

    /// 验证 HOTP 验证码
    ///
    /// 只检查给定的计数器值，不做窗口搜索；验证成功后推进计数器
    /// 是调用方的责任，本引擎不保存计数器状态。
    pub fn hotp_verify(&self, code: &str, counter: u64) -> Result<bool> {
        if code.len() != self.digits as usize {
            return Ok(false);
        }

        let expected = self.derive_code(counter)?;
        Ok(constant_time_compare(code.as_bytes(), expected.as_bytes()))
    }

    /// 生成当前时间的 TOTP 验证码 (RFC 6238)
    pub fn totp(&self) -> Result<String> {
        self.totp_at(current_timestamp_ms())
    }

    /// 生成指定时间的 TOTP 验证码
    ///
    /// # Arguments
    ///
    /// * `timestamp_ms` - Unix 毫秒时间戳
    pub fn totp_at(&self, timestamp_ms: u64) -> Result<String> {
        self.derive_code(self.counter_at(timestamp_ms, self.period))
    }

    /// 以临时时间步长生成指定时间的 TOTP 验证码
    ///
    /// `period` 只对本次调用生效，不会改写实例配置。
    ///
    /// # Errors
    ///
    /// `period` 为零时返回 [`ValidationError::ZeroPeriod`]。
    pub fn totp_at_with_period(&self, timestamp_ms: u64, period: u64) -> Result<String> {
        if period == 0 {
            return Err(Error::Validation(ValidationError::ZeroPeriod));
        }
        self.derive_code(self.counter_at(timestamp_ms, period))
    }

    /// 验证当前时间的 TOTP 验证码
    ///
    /// 允许前后各一个时间步的时钟偏差。
    pub fn totp_verify(&self, code: &str) -> Result<bool> {
        self.totp_verify_at(code, current_timestamp_ms(), 1)
    }

    /// 验证指定时间的 TOTP 验证码
    ///
    /// # Arguments
    ///
    /// * `code` - 用户输入的验证码
    /// * `timestamp_ms` - Unix 毫秒时间戳
    /// * `window` - 前后各容忍的时间步数量；0 表示只检查当前步
    pub fn totp_verify_at(&self, code: &str, timestamp_ms: u64, window: u64) -> Result<bool> {
        let result = self.totp_verify_with_result(code, timestamp_ms, window)?;
        Ok(result.valid)
    }

    /// 验证 TOTP 验证码并返回详细结果
    pub fn totp_verify_with_result(
        &self,
        code: &str,
        timestamp_ms: u64,
        window: u64,
    ) -> Result<TotpVerifyResult> {
        // 检查码的长度
        if code.len() != self.digits as usize {
            return Ok(TotpVerifyResult {
                valid: false,
                step_offset: 0,
            });
        }

        let base_counter = self.counter_at(timestamp_ms, self.period);

        // 在允许的时间窗口内从最早到最晚逐步检查
        for offset in -(window as i64)..=(window as i64) {
            // 计数器不能为负；起始时间过早导致下溢的偏移直接跳过
            let check_counter = match base_counter.checked_add_signed(offset) {
                Some(counter) => counter,
                None => continue,
            };

            let expected = self.derive_code(check_counter)?;
            if constant_time_compare(code.as_bytes(), expected.as_bytes()) {
                return Ok(TotpVerifyResult {
                    valid: true,
                    step_offset: offset,
                });
            }
        }

        Ok(TotpVerifyResult {
            valid: false,
            step_offset: 0,
        })
    }

    /// 获取当前验证码的剩余有效时间（秒）
    pub fn time_remaining(&self) -> u64 {
        let seconds = current_timestamp_ms() / 1000;
        self.period - (seconds % self.period)
    }

    // ========================================================================
    // 内部方法
    // ========================================================================

    /// 将毫秒时间戳换算为时间步计数器
    fn counter_at(&self, timestamp_ms: u64, period: u64) -> u64 {
        timestamp_ms / 1000 / period
    }

    /// 计数器到验证码的派生 (RFC 4226 §5.3)
    fn derive_code(&self, counter: u64) -> Result<String> {
        let counter_bytes = counter.to_be_bytes();
        let digest = hmac_digest(self.algorithm, self.secret.raw(), &counter_bytes)?;

        // 动态截断：取末字节低 4 位作为偏移，读出 31 位大端整数
        let offset = (digest.last().unwrap() & 0x0f) as usize;
        let binary = ((digest[offset] & 0x7f) as u32) << 24
            | (digest[offset + 1] as u32) << 16
            | (digest[offset + 2] as u32) << 8
            | (digest[offset + 3] as u32);

        // 取模得到指定位数的码
        let modulo = 10u64.pow(self.digits);
        let code = (binary as u64) % modulo;

        // 左填充零
        Ok(format!(
            "{:0width$}",
            code,
            width = self.digits as usize
        ))
    }
}

/// 获取当前 Unix 毫秒时间戳
fn current_timestamp_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("Time went backwards")
        .as_millis() as u64
}
