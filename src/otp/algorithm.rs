//! OTP 哈希算法模块
//!
//! 定义支持的 HMAC 哈希算法以及对应的摘要计算。

use std::str::FromStr;

use hmac::{Hmac, Mac};
use sha1::Sha1;
use sha2::{Sha256, Sha512};

use crate::error::{ConfigError, CryptoError, Error, Result};

/// OTP 哈希算法
///
/// 封闭枚举，只支持 RFC 4226/6238 认可的三种 HMAC 算法；
/// 不支持的算法名称在解析阶段即报错，不会进入生成阶段。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OtpAlgorithm {
    /// SHA-1（默认，最广泛支持）
    #[default]
    SHA1,
    /// SHA-256
    SHA256,
    /// SHA-512
    SHA512,
}

impl OtpAlgorithm {
    /// 获取算法名称
    pub fn as_str(&self) -> &'static str {
        match self {
            OtpAlgorithm::SHA1 => "SHA1",
            OtpAlgorithm::SHA256 => "SHA256",
            OtpAlgorithm::SHA512 => "SHA512",
        }
    }

    /// 对应 HMAC 摘要的字节长度
    pub fn digest_length(&self) -> usize {
        match self {
            OtpAlgorithm::SHA1 => 20,
            OtpAlgorithm::SHA256 => 32,
            OtpAlgorithm::SHA512 => 64,
        }
    }
}

impl FromStr for OtpAlgorithm {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_uppercase().as_str() {
            "SHA1" | "SHA-1" => Ok(OtpAlgorithm::SHA1),
            "SHA256" | "SHA-256" => Ok(OtpAlgorithm::SHA256),
            "SHA512" | "SHA-512" => Ok(OtpAlgorithm::SHA512),
            _ => Err(Error::Config(ConfigError::UnsupportedAlgorithm(
                s.to_string(),
            ))),
        }
    }
}

/// 使用指定算法计算 HMAC 摘要
pub(crate) fn hmac_digest(
    algorithm: OtpAlgorithm,
    key: &[u8],
    message: &[u8],
) -> Result<Vec<u8>> {
    let digest = match algorithm {
        OtpAlgorithm::SHA1 => {
            let mut mac = Hmac::<Sha1>::new_from_slice(key).map_err(|_| {
                Error::Crypto(CryptoError::InvalidKey("invalid hmac key".to_string()))
            })?;
            mac.update(message);
            mac.finalize().into_bytes().to_vec()
        }
        OtpAlgorithm::SHA256 => {
            let mut mac = Hmac::<Sha256>::new_from_slice(key).map_err(|_| {
                Error::Crypto(CryptoError::InvalidKey("invalid hmac key".to_string()))
            })?;
            mac.update(message);
            mac.finalize().into_bytes().to_vec()
        }
        OtpAlgorithm::SHA512 => {
            let mut mac = Hmac::<Sha512>::new_from_slice(key).map_err(|_| {
                Error::Crypto(CryptoError::InvalidKey("invalid hmac key".to_string()))
            })?;
            mac.update(message);
            mac.finalize().into_bytes().to_vec()
        }
    };

    Ok(digest)
}
