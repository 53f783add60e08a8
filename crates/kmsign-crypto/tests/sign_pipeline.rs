//! # Sign Pipeline Integration Tests
//!
//! Drives [`sign_file`] end to end against a stub backend that returns a
//! fixed signature for one known digest, and checks what ends up on disk.

use kmsign_crypto::{
    sign_file, sha256_digest, BackendError, FileDigest, KeyId, MessageType, SignConfig,
    SignError, SignRequest, Signature, SigningAlgorithm, SigningBackend,
};

/// Returns `signature` for `expected`, and a KMS-style error otherwise.
struct StubKms {
    expected: FileDigest,
    signature: Vec<u8>,
}

impl SigningBackend for StubKms {
    fn sign(&self, request: &SignRequest) -> Result<Signature, BackendError> {
        if request.message_type != MessageType::Digest {
            return Err(BackendError::Request("ValidationException: message type".into()));
        }
        if request.digest != self.expected {
            return Err(BackendError::Request("KMSInvalidSignatureException".into()));
        }
        Ok(Signature::new(self.signature.clone()))
    }

    fn backend_name(&self) -> &str {
        "StubKms"
    }
}

/// Always fails as if KMS rejected the credentials.
struct DeniedKms;

impl SigningBackend for DeniedKms {
    fn sign(&self, _request: &SignRequest) -> Result<Signature, BackendError> {
        Err(BackendError::Request(
            "AccessDeniedException: not authorized to perform kms:Sign".into(),
        ))
    }

    fn backend_name(&self) -> &str {
        "DeniedKms"
    }
}

#[test]
fn abc_signed_by_stub_writes_exact_signature() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("abc.txt");
    let output = dir.path().join("abc.sig");
    std::fs::write(&input, b"abc").unwrap();

    let backend = StubKms {
        expected: sha256_digest(b"abc"),
        signature: vec![0x01, 0x02, 0x03],
    };
    let outcome = sign_file(&SignConfig::new(&input, &output), &backend, |_| {}).unwrap();

    assert!(outcome.digest.to_hex().starts_with("ba7816bf"));
    assert_eq!(std::fs::read(&output).unwrap(), vec![0x01, 0x02, 0x03]);
}

#[test]
fn existing_output_is_overwritten_on_success() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("bin");
    let output = dir.path().join("bin.sig");
    std::fs::write(&input, b"release build").unwrap();
    std::fs::write(&output, b"stale signature from an older build").unwrap();

    let backend = StubKms {
        expected: sha256_digest(b"release build"),
        signature: vec![0xAA; 256],
    };
    sign_file(&SignConfig::new(&input, &output), &backend, |_| {}).unwrap();

    assert_eq!(std::fs::read(&output).unwrap(), vec![0xAA; 256]);
}

#[test]
fn missing_input_leaves_output_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("out.sig");
    std::fs::write(&output, b"previous").unwrap();

    let backend = StubKms {
        expected: sha256_digest(b"abc"),
        signature: vec![1],
    };
    let config = SignConfig::new(dir.path().join("missing.bin"), &output);
    let err = sign_file(&config, &backend, |_| {}).unwrap_err();

    assert!(matches!(err, SignError::FileAccess { .. }));
    assert_eq!(std::fs::read(&output).unwrap(), b"previous");
}

#[test]
fn missing_input_creates_no_output() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("out.sig");

    let config = SignConfig::new(dir.path().join("missing.bin"), &output);
    let err = sign_file(&config, &DeniedKms, |_| {}).unwrap_err();

    assert!(matches!(err, SignError::FileAccess { .. }));
    assert!(!output.exists());
}

#[test]
fn remote_failure_leaves_existing_output_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("bin");
    let output = dir.path().join("bin.sig");
    std::fs::write(&input, b"payload").unwrap();
    std::fs::write(&output, b"previous").unwrap();

    let err = sign_file(&SignConfig::new(&input, &output), &DeniedKms, |_| {}).unwrap_err();

    assert!(matches!(err, SignError::RemoteService(_)));
    assert!(format!("{err}").contains("AccessDeniedException"));
    assert_eq!(std::fs::read(&output).unwrap(), b"previous");
}

#[test]
fn explicit_key_and_algorithm_flow_through() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("bin");
    std::fs::write(&input, b"payload").unwrap();

    let mut config = SignConfig::new(&input, dir.path().join("bin.sig"));
    config.key_id = KeyId::new("arn:aws:kms:ap-northeast-1:111122223333:key/ec-key");
    config.algorithm = SigningAlgorithm::new("ECDSA_SHA_256");

    let backend = StubKms {
        expected: sha256_digest(b"payload"),
        signature: vec![0x30, 0x44],
    };
    let outcome = sign_file(&config, &backend, |_| {}).unwrap();

    assert_eq!(outcome.region, "ap-northeast-1");
    assert_eq!(outcome.signature_len, 2);
}
