
use rsa::pkcs1v15::{Signature, VerifyingKey};
use rsa::pkcs8::DecodePublicKey;
use rsa::signature::Verifier;
use rsa::RsaPublicKey;
use sha2::Sha256;
use urlsign_core::hash::base64_decode;
use urlsign_google::{parse_private_key_pem, UrlSigner};

pub const CLIENT_EMAIL: &str = "svc@example.com";

pub fn testdata(name: &str) -> String {
    format!(
        "{}/../../testdata/services/google/{name}",
        env!("CARGO_MANIFEST_DIR")
    )
}

/// Build a signer from the fixture key.
pub fn init_signer() -> UrlSigner {
    let _ = env_logger::builder().is_test(true).try_init();

    let pem = std::fs::read_to_string(testdata("test_private_key.pem"))
        .expect("test private key must exist");
    let key = parse_private_key_pem(&pem).expect("test private key must be valid");
    UrlSigner::new(key, CLIENT_EMAIL)
}

/// Verify a base64 signature against the fixture public key.
pub fn verify_signature(msg: &str, signature: &str) -> bool {
    let pem = std::fs::read_to_string(testdata("test_public_key.pem"))
        .expect("test public key must exist");
    let public_key = RsaPublicKey::from_public_key_pem(&pem).expect("public key must be valid");
    let verifying_key = VerifyingKey::<Sha256>::new(public_key);

    let Ok(raw) = base64_decode(signature) else {
        return false;
    };
    let Ok(signature) = Signature::try_from(raw.as_slice()) else {
        return false;
    };
    verifying_key.verify(msg.as_bytes(), &signature).is_ok()
}
