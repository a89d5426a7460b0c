//! OTP 密钥模块
//!
//! 密钥是不可变的值类型：原始字节加上规范的 Base32 文本编码。
//! 构造之后不可修改，更换密钥需要创建新的引擎实例。

use base32::{decode as base32_decode, encode as base32_encode, Alphabet};

use crate::error::{Error, Result, ValidationError};
use crate::random::generate_random_bytes;

/// 推荐的密钥长度（字节），即 RFC 4226 建议的 160 位
pub const RECOMMENDED_SECRET_LENGTH: usize = 20;

/// OTP 密钥
///
/// 同时持有原始字节和 Base32 编码文本，两者始终保持一致。
#[derive(Debug, Clone)]
pub struct OtpSecret {
    raw: Vec<u8>,
    base32: String,
}

impl OtpSecret {
    /// 生成指定长度的随机密钥
    ///
    /// 使用操作系统的密码学安全随机数生成器；随机源失败时直接报错，
    /// 不会退化为弱随机源。
    pub fn generate(length: usize) -> Result<Self> {
        let bytes = generate_random_bytes(length)?;
        Ok(Self::from_bytes(bytes))
    }

    /// 从原始字节创建
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        let base32 = base32_encode(Alphabet::Rfc4648 { padding: false }, &bytes);
        Self { raw: bytes, base32 }
    }

    /// 从 Base32 字符串创建
    ///
    /// 输入中的空格和连字符会被去除，字母统一转为大写。
    pub fn from_base32(text: &str) -> Result<Self> {
        let clean = text.replace([' ', '-'], "").to_uppercase();
        let raw = base32_decode(Alphabet::Rfc4648 { padding: false }, &clean)
            .ok_or_else(|| Error::Validation(ValidationError::InvalidSecret(text.to_string())))?;
        Ok(Self { raw, base32: clean })
    }

    /// 原始密钥字节
    pub fn raw(&self) -> &[u8] {
        &self.raw
    }

    /// Base32 编码的密钥文本（用于存储和显示）
    pub fn base32(&self) -> &str {
        &self.base32
    }
}
