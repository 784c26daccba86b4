//! WinRM (remote-management) transport validation and defaulting
//!
//! The port derivation and NTLM decorator selection here feed the WinRM
//! client in the connection layer; this module itself never touches the
//! network.

use tracing::debug;

use crate::config::Config;
use crate::error::ValidationError;

/// Default WinRM HTTP port
pub const DEFAULT_WINRM_PORT: u16 = 5985;

/// Default WinRM HTTPS port
pub const DEFAULT_WINRM_SSL_PORT: u16 = 5986;

/// Default operation timeout in seconds
pub const DEFAULT_WINRM_TIMEOUT_SECS: u64 = 1800;

/// Selects the wrapper applied to the WinRM client's transport.
///
/// Stored as data in the config rather than as a closure; the
/// connection layer resolves it to a constructor call via [`build`]
/// when it opens the connection.
///
/// [`build`]: TransportDecorator::build
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportDecorator {
    /// Challenge-response authentication wrapper
    Ntlm,
}

impl TransportDecorator {
    /// Build the transport wrapper this decorator selects.
    ///
    /// Callable any number of times; every call yields a value equal to
    /// a freshly constructed wrapper.
    pub fn build(self) -> NtlmTransport {
        match self {
            TransportDecorator::Ntlm => NtlmTransport::default(),
        }
    }
}

/// NTLM-flavored transport wrapper handed to the WinRM client.
///
/// Carries no state of its own today; the client derives the actual
/// challenge-response exchange from the configured credentials.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NtlmTransport;

/// Apply remote-management defaults and collect field errors.
pub(crate) fn prepare(config: &mut Config) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if config.winrm_username.is_empty() {
        errors.push(ValidationError::missing_field("winrm_username"));
    }

    // An explicitly set port always wins; SSL only picks the default.
    if config.winrm_port == 0 {
        config.winrm_port = if config.winrm_use_ssl {
            DEFAULT_WINRM_SSL_PORT
        } else {
            DEFAULT_WINRM_PORT
        };
    }

    if config.winrm_timeout == 0 {
        config.winrm_timeout = DEFAULT_WINRM_TIMEOUT_SECS;
    }

    if config.winrm_use_ntlm {
        config.winrm_transport_decorator = Some(TransportDecorator::Ntlm);
    }

    debug!(
        port = config.winrm_port,
        use_ssl = config.winrm_use_ssl,
        use_ntlm = config.winrm_use_ntlm,
        "resolved winrm defaults"
    );

    errors
}

#[cfg(test)]
mod tests {
    use super::*;

    fn winrm_config() -> Config {
        Config {
            winrm_username: "admin".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_missing_username() {
        let mut config = Config::default();
        let errors = prepare(&mut config);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0], ValidationError::missing_field("winrm_username"));
    }

    #[test]
    fn test_timeout_default() {
        let mut config = winrm_config();
        assert!(prepare(&mut config).is_empty());
        assert_eq!(config.winrm_timeout, 1800);
    }

    #[test]
    fn test_no_ntlm_leaves_decorator_unset() {
        let mut config = winrm_config();
        assert!(prepare(&mut config).is_empty());
        assert!(config.winrm_transport_decorator.is_none());
    }

    #[test]
    fn test_decorator_builds_equal_wrappers() {
        let decorator = TransportDecorator::Ntlm;
        assert_eq!(decorator.build(), NtlmTransport::default());
        assert_eq!(decorator.build(), decorator.build());
    }
}
