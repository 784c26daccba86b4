//! Shell (SSH) transport validation and defaulting
//!
//! Applies defaults for unset optional fields and requires at least one
//! usable credential. Also provides the URL-safe encoding used to embed
//! raw public-key bytes in text-only channels such as instance metadata.

use tracing::debug;

use crate::config::Config;
use crate::error::ValidationError;

/// Default SSH port, also used for the bastion relay
pub const DEFAULT_SSH_PORT: u16 = 22;

/// Default connection timeout in seconds
pub const DEFAULT_SSH_TIMEOUT_SECS: u64 = 300;

/// Default number of handshake attempts before giving up
pub const DEFAULT_HANDSHAKE_ATTEMPTS: u32 = 10;

/// Default keep-alive interval in seconds
pub const DEFAULT_KEEP_ALIVE_SECS: u64 = 5;

/// Apply shell-transport defaults and collect field errors.
///
/// Non-short-circuiting: every independent problem is reported.
pub(crate) fn prepare(config: &mut Config) -> Vec<ValidationError> {
    if config.ssh_port == 0 {
        config.ssh_port = DEFAULT_SSH_PORT;
    }
    if config.ssh_timeout == 0 {
        config.ssh_timeout = DEFAULT_SSH_TIMEOUT_SECS;
    }
    if config.ssh_handshake_attempts == 0 {
        config.ssh_handshake_attempts = DEFAULT_HANDSHAKE_ATTEMPTS;
    }
    if config.ssh_keep_alive_interval == 0 {
        config.ssh_keep_alive_interval = DEFAULT_KEEP_ALIVE_SECS;
    }

    let mut errors = Vec::new();

    // Must have at least one way to authenticate
    if !is_set(&config.ssh_password)
        && !is_set(&config.ssh_private_key_file)
        && !config.ssh_agent_auth
    {
        errors.push(ValidationError::missing_auth(
            "one of ssh_password, ssh_private_key_file, or ssh_agent_auth must be specified",
        ));
    }

    if is_set(&config.ssh_bastion_host) {
        if config.ssh_bastion_port == 0 {
            config.ssh_bastion_port = DEFAULT_SSH_PORT;
        }
        if !config.ssh_bastion_agent_auth
            && !is_set(&config.ssh_bastion_password)
            && !is_set(&config.ssh_bastion_private_key_file)
        {
            errors.push(ValidationError::missing_field(
                "ssh_bastion_password or ssh_bastion_private_key_file",
            ));
        }
    }

    debug!(
        port = config.ssh_port,
        timeout_secs = config.ssh_timeout,
        handshake_attempts = config.ssh_handshake_attempts,
        "resolved ssh defaults"
    );

    errors
}

/// Whether an optional string field holds a usable value.
/// Empty strings count as absent (templates often resolve to "").
pub(crate) fn is_set(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|v| !v.is_empty())
}

/// Percent-encode raw public-key bytes for text-only channels.
///
/// The output contains only unreserved URL characters and `%XX` escapes,
/// so it is safe inside a path segment. This is purely a text-safety
/// transform; no key-format validation happens here.
pub fn encode_public_key(key: &[u8]) -> String {
    urlencoding::encode_binary(key).into_owned()
}

/// Reverse of [`encode_public_key`]: `decode_public_key(&encode_public_key(b)) == b`
/// for every byte sequence `b`.
pub fn decode_public_key(encoded: &str) -> Vec<u8> {
    urlencoding::decode_binary(encoded.as_bytes()).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ssh_config() -> Config {
        Config {
            ssh_username: "root".to_string(),
            ssh_password: Some("secret".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_defaults_applied() {
        let mut config = ssh_config();
        let errors = prepare(&mut config);
        assert!(errors.is_empty());
        assert_eq!(config.ssh_port, 22);
        assert_eq!(config.ssh_timeout, 300);
        assert_eq!(config.ssh_handshake_attempts, 10);
        assert_eq!(config.ssh_keep_alive_interval, 5);
    }

    #[test]
    fn test_explicit_port_kept() {
        let mut config = ssh_config();
        config.ssh_port = 2222;
        let errors = prepare(&mut config);
        assert!(errors.is_empty());
        assert_eq!(config.ssh_port, 2222);
    }

    #[test]
    fn test_missing_credential() {
        let mut config = Config {
            ssh_username: "root".to_string(),
            ..Default::default()
        };
        let errors = prepare(&mut config);
        assert_eq!(errors.len(), 1);
        assert!(matches!(
            errors[0],
            ValidationError::MissingAuthentication(_)
        ));
    }

    #[test]
    fn test_empty_password_counts_as_absent() {
        let mut config = ssh_config();
        config.ssh_password = Some(String::new());
        let errors = prepare(&mut config);
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn test_agent_auth_is_a_credential() {
        let mut config = Config {
            ssh_username: "root".to_string(),
            ssh_agent_auth: true,
            ..Default::default()
        };
        assert!(prepare(&mut config).is_empty());
    }

    #[test]
    fn test_bastion_defaults_and_auth() {
        let mut config = ssh_config();
        config.ssh_bastion_host = Some("jump.example.com".to_string());
        config.ssh_bastion_password = Some("hunter2".to_string());
        let errors = prepare(&mut config);
        assert!(errors.is_empty());
        assert_eq!(config.ssh_bastion_port, 22);
    }

    #[test]
    fn test_bastion_without_credential() {
        let mut config = ssh_config();
        config.ssh_bastion_host = Some("jump.example.com".to_string());
        let errors = prepare(&mut config);
        assert_eq!(errors.len(), 1);
        assert!(errors[0]
            .to_string()
            .contains("ssh_bastion_password or ssh_bastion_private_key_file"));
    }

    #[test]
    fn test_encode_public_key_round_trip() {
        let key = b"ecdsa-sha2-nistp521 AAAAE2VjZHNh+base64/bytes==\n";
        let encoded = encode_public_key(key);
        assert!(!encoded.contains('\n'));
        assert!(!encoded.contains('/'));
        assert_eq!(decode_public_key(&encoded), key.to_vec());
    }

    #[test]
    fn test_encode_public_key_edge_cases() {
        for bytes in [
            &b""[..],
            &b"\n\r\n"[..],
            &b"\x00\x01\x02\xff"[..],
            "snake \u{1f40d} key".as_bytes(),
        ] {
            let encoded = encode_public_key(bytes);
            assert!(encoded.is_ascii());
            assert_eq!(decode_public_key(&encoded), bytes.to_vec());
        }
    }
}
