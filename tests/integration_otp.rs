//! 集成测试：一次性密码 (OTP)
//!
//! 测试 HOTP/TOTP 的生成验证流程和密钥管理。

use otprs::otp::algorithm::OtpAlgorithm;
use otprs::otp::engine::{Otp, OtpConfig};
use otprs::otp::secret::OtpSecret;

/// 测试 TOTP 基本流程
#[test]
fn test_totp_basic_flow() {
    // 1. 为用户创建引擎，自动生成密钥
    let otp = Otp::with_defaults().expect("Engine construction should succeed");

    assert!(
        !otp.secret().base32().is_empty(),
        "Secret should not be empty"
    );

    // 2. 生成当前 TOTP 码
    let code = otp.totp().expect("Code generation should succeed");

    // TOTP 码应该是 6 位数字
    assert_eq!(code.len(), 6, "TOTP code should be 6 digits");
    assert!(
        code.chars().all(|c| c.is_ascii_digit()),
        "TOTP code should only contain digits"
    );

    // 3. 验证生成的码
    let is_valid = otp.totp_verify(&code).expect("Verification should work");
    assert!(is_valid, "Generated code should be valid");

    // 4. 错误码应该验证失败
    let wrong_code = "000000";
    let is_wrong_valid = otp
        .totp_verify(wrong_code)
        .expect("Verification should work");
    // 注意：有极小概率 000000 恰好是当前有效码
    if code != wrong_code {
        assert!(!is_wrong_valid, "Wrong code should fail verification");
    }
}

/// 测试 HOTP 基本流程，计数器由调用方推进
#[test]
fn test_hotp_basic_flow() {
    let otp = Otp::with_defaults().expect("Engine construction should succeed");

    // 使用计数器 0 生成码
    let code_0 = otp.hotp(0).expect("Code generation should succeed");
    assert_eq!(code_0.len(), 6, "HOTP code should be 6 digits");

    // 验证计数器 0 的码
    let is_valid = otp
        .hotp_verify(&code_0, 0)
        .expect("Verification should work");
    assert!(is_valid, "Code for counter 0 should be valid");

    // 计数器 1 应该生成不同的码
    let code_1 = otp.hotp(1).unwrap();
    assert_ne!(
        code_0, code_1,
        "Different counters should produce different codes"
    );

    // 用错误的计数器验证应该失败
    let wrong_counter_result = otp.hotp_verify(&code_0, 1).unwrap();
    assert!(!wrong_counter_result, "Code should fail with wrong counter");
}

/// 测试 HOTP 计数器序列
#[test]
fn test_hotp_counter_sequence() {
    let otp = Otp::with_defaults().unwrap();

    // 模拟调用方维护计数器：每次验证成功后自行加一
    let mut counter = 0u64;
    for _ in 0..5 {
        let code = otp.hotp(counter).unwrap();
        let is_valid = otp.hotp_verify(&code, counter).unwrap();
        assert!(is_valid, "Code should be valid for its counter");
        counter += 1;
    }
    assert_eq!(counter, 5);

    // 生成的一系列码应该各不相同
    let codes: Vec<String> = (0..10).map(|c| otp.hotp(c).unwrap()).collect();
    let unique_codes: std::collections::HashSet<_> = codes.iter().collect();
    assert_eq!(unique_codes.len(), codes.len(), "All codes should be unique");
}

/// 测试自定义配置
#[test]
fn test_otp_configuration() {
    let config = OtpConfig::new()
        .with_digits(8) // 8 位码
        .with_period(60) // 60 秒周期
        .with_algorithm(OtpAlgorithm::SHA256);

    let otp = Otp::new(config).unwrap();

    assert_eq!(otp.digits(), 8);
    assert_eq!(otp.period(), 60);
    assert_eq!(otp.algorithm(), OtpAlgorithm::SHA256);

    // 生成的码应该是 8 位
    let code = otp.totp().unwrap();
    assert_eq!(code.len(), 8, "Code should be 8 digits with custom config");

    // 验证应该工作
    let is_valid = otp.totp_verify(&code).unwrap();
    assert!(is_valid, "Code should be valid with custom config");
}

/// 测试非法配置被构造拒绝
#[test]
fn test_invalid_configuration_rejected() {
    assert!(
        Otp::new(OtpConfig::new().with_digits(0)).is_err(),
        "Zero digits should fail construction"
    );
    assert!(
        Otp::new(OtpConfig::new().with_period(0)).is_err(),
        "Zero period should fail construction"
    );
    assert!(
        "MD5".parse::<OtpAlgorithm>().is_err(),
        "Unsupported algorithm should fail parsing"
    );
}

/// 测试密钥从 base32 恢复
#[test]
fn test_secret_restore() {
    let original = Otp::with_defaults().unwrap();
    let base32_string = original.secret().base32().to_string();

    // 从 base32 恢复密钥并创建新引擎
    let restored_secret =
        OtpSecret::from_base32(&base32_string).expect("Secret should be restored from base32");
    let restored = Otp::new(OtpConfig::new().with_secret(restored_secret)).unwrap();

    // 两个引擎对同一计数器生成的码应该相同
    for counter in 0..5 {
        assert_eq!(
            original.hotp(counter).unwrap(),
            restored.hotp(counter).unwrap(),
            "Restored secret should generate same code at counter {}",
            counter
        );
    }
}

/// 测试 RFC 4226 与 RFC 6238 测试向量的端到端一致性
#[test]
fn test_rfc_vectors_end_to_end() {
    // RFC 测试密钥的 Base32 形式（ASCII "12345678901234567890"）
    let secret = OtpSecret::from_base32("GEZDGNBVGY3TQOJQGEZDGNBVGY3TQOJQ").unwrap();

    // HOTP：6 位，计数器 0
    let hotp_engine = Otp::new(OtpConfig::new().with_secret(secret.clone())).unwrap();
    assert_eq!(hotp_engine.hotp(0).unwrap(), "755224");
    assert!(hotp_engine.hotp_verify("755224", 0).unwrap());

    // TOTP：8 位，59 秒
    let totp_engine = Otp::new(
        OtpConfig::new()
            .with_digits(8)
            .with_secret(secret),
    )
    .unwrap();
    assert_eq!(totp_engine.totp_at(59_000).unwrap(), "94287082");
    assert!(totp_engine.totp_verify_at("94287082", 59_000, 0).unwrap());
}

/// 测试时钟偏差窗口下的登录流程
#[test]
fn test_totp_skew_window_flow() {
    let secret = OtpSecret::from_base32("GEZDGNBVGY3TQOJQGEZDGNBVGY3TQOJQ").unwrap();
    let otp = Otp::new(OtpConfig::new().with_secret(secret)).unwrap();

    let server_time_ms = 1_700_000_010_000u64;

    // 客户端时钟慢了 25 秒，生成的可能是上一个时间步的码
    let client_code = otp.totp_at(server_time_ms - 25_000).unwrap();
    assert!(
        otp.totp_verify_at(&client_code, server_time_ms, 1).unwrap(),
        "Code from a slightly slow clock should verify within window 1"
    );

    // 过期太久的码被拒绝
    let stale_code = otp.totp_at(server_time_ms - 90_000).unwrap();
    if stale_code != otp.totp_at(server_time_ms).unwrap() {
        assert!(
            !otp.totp_verify_at(&stale_code, server_time_ms, 1).unwrap(),
            "Stale code should fail verification"
        );
    }
}
