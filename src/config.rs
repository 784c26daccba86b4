//! Communicator configuration and the `prepare` validation entry point
//!
//! A `Config` is built raw by the caller (field values possibly coming
//! from resolved template expressions), normalized in place by
//! [`Config::prepare`] once per build step, and then handed read-only to
//! the connection layer.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ValidationError;
use crate::ssh;
use crate::template::InterpolationContext;
use crate::winrm::{self, TransportDecorator};

/// The recognized communicator kinds.
///
/// Dispatch on the kind is exhaustive; a template string outside this
/// set never reaches the per-kind validators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommunicatorKind {
    /// No remote transport; nothing to validate
    None,
    /// Shell transport over SSH
    Ssh,
    /// Windows remote-management transport
    Winrm,
}

impl FromStr for CommunicatorKind {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "none" => Ok(CommunicatorKind::None),
            "ssh" => Ok(CommunicatorKind::Ssh),
            "winrm" => Ok(CommunicatorKind::Winrm),
            other => Err(ValidationError::unsupported_kind(other)),
        }
    }
}

impl fmt::Display for CommunicatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            CommunicatorKind::None => "none",
            CommunicatorKind::Ssh => "ssh",
            CommunicatorKind::Winrm => "winrm",
        })
    }
}

/// Connection descriptor for one build step.
///
/// Field names mirror the template keys, so a provisioning template
/// deserializes straight into this struct. Zero and empty values mean
/// "unset"; `prepare` fills in the kind-specific defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Raw communicator kind as written in the template; empty = unset
    #[serde(rename = "communicator")]
    pub kind: String,

    // SSH
    /// Host to connect to; usually filled in by the builder at runtime
    pub ssh_host: String,

    /// SSH port (0 = unset, defaults to 22)
    pub ssh_port: u16,

    /// Username for authentication
    pub ssh_username: String,

    /// Password for password authentication
    pub ssh_password: Option<String>,

    /// Path to the private key file for key authentication
    pub ssh_private_key_file: Option<String>,

    /// Raw public-key bytes, e.g. for injection into instance metadata
    pub ssh_public_key: Vec<u8>,

    /// Authenticate via the local SSH agent
    pub ssh_agent_auth: bool,

    /// Disable forwarding of the agent to the remote side
    pub ssh_disable_agent_forwarding: bool,

    /// Bastion/relay host to hop through, if any
    pub ssh_bastion_host: Option<String>,

    /// Bastion port (0 = unset, defaults to 22)
    pub ssh_bastion_port: u16,

    /// Username on the bastion
    pub ssh_bastion_username: Option<String>,

    /// Password on the bastion
    pub ssh_bastion_password: Option<String>,

    /// Private key file for the bastion
    pub ssh_bastion_private_key_file: Option<String>,

    /// Authenticate to the bastion via the local SSH agent
    pub ssh_bastion_agent_auth: bool,

    /// Connection timeout in seconds (0 = unset, defaults to 300)
    pub ssh_timeout: u64,

    /// Handshake attempts before giving up (0 = unset, defaults to 10)
    pub ssh_handshake_attempts: u32,

    /// Keep-alive interval in seconds (0 = unset, defaults to 5)
    pub ssh_keep_alive_interval: u64,

    // WinRM
    /// Username for authentication
    pub winrm_username: String,

    /// Password for authentication
    pub winrm_password: Option<String>,

    /// Host override; usually filled in by the builder at runtime
    pub winrm_host: Option<String>,

    /// WinRM port (0 = unset, defaults to 5985, or 5986 with SSL)
    pub winrm_port: u16,

    /// Connect over HTTPS
    pub winrm_use_ssl: bool,

    /// Use NTLM challenge-response authentication
    pub winrm_use_ntlm: bool,

    /// Operation timeout in seconds (0 = unset, defaults to 1800)
    pub winrm_timeout: u64,

    /// Derived by `prepare`; present exactly when NTLM is requested
    #[serde(skip)]
    pub winrm_transport_decorator: Option<TransportDecorator>,
}

impl Config {
    /// Validate and normalize the configuration in place.
    ///
    /// Defaults the kind to `ssh` when unset, dispatches to the
    /// kind-specific validator, and returns every problem found in
    /// discovery order. An empty vector means the config is ready for
    /// the connection layer. The interpolation context is opaque here:
    /// its expressions were resolved into the field values before this
    /// runs.
    ///
    /// Intended to be called once per build step; the in-place
    /// defaulting is not synchronized for concurrent calls on the same
    /// instance.
    pub fn prepare(&mut self, _ctx: Option<&InterpolationContext>) -> Vec<ValidationError> {
        if self.kind.is_empty() {
            self.kind = CommunicatorKind::Ssh.to_string();
        }

        let kind = match self.kind.parse::<CommunicatorKind>() {
            Ok(kind) => kind,
            // Unknown kind: report it and skip all further validation
            Err(err) => return vec![err],
        };

        debug!(communicator = %kind, "preparing communicator config");

        match kind {
            CommunicatorKind::None => Vec::new(),
            CommunicatorKind::Ssh => ssh::prepare(self),
            CommunicatorKind::Winrm => winrm::prepare(self),
        }
    }

    /// The resolved kind, if the raw value parses
    pub fn resolved_kind(&self) -> Option<CommunicatorKind> {
        self.kind.parse().ok()
    }

    /// Port for the selected communicator (0 for `none`)
    pub fn port(&self) -> u16 {
        match self.resolved_kind() {
            Some(CommunicatorKind::Ssh) => self.ssh_port,
            Some(CommunicatorKind::Winrm) => self.winrm_port,
            _ => 0,
        }
    }

    /// Username for the selected communicator
    pub fn username(&self) -> &str {
        match self.resolved_kind() {
            Some(CommunicatorKind::Ssh) => &self.ssh_username,
            Some(CommunicatorKind::Winrm) => &self.winrm_username,
            _ => "",
        }
    }

    /// Password for the selected communicator, if set
    pub fn password(&self) -> Option<&str> {
        match self.resolved_kind() {
            Some(CommunicatorKind::Ssh) => self.ssh_password.as_deref(),
            Some(CommunicatorKind::Winrm) => self.winrm_password.as_deref(),
            _ => None,
        }
    }

    /// Public key percent-encoded for text-only channels
    pub fn ssh_public_key_url_encoded(&self) -> String {
        ssh::encode_public_key(&self.ssh_public_key)
    }

    /// Set the communicator kind
    pub fn with_kind(mut self, kind: CommunicatorKind) -> Self {
        self.kind = kind.to_string();
        self
    }

    /// Set the SSH username
    pub fn with_ssh_username(mut self, username: impl Into<String>) -> Self {
        self.ssh_username = username.into();
        self
    }

    /// Set SSH password authentication
    pub fn with_ssh_password(mut self, password: impl Into<String>) -> Self {
        self.ssh_password = Some(password.into());
        self
    }

    /// Set SSH private-key-file authentication
    pub fn with_ssh_private_key_file(mut self, path: impl Into<String>) -> Self {
        self.ssh_private_key_file = Some(path.into());
        self
    }

    /// Set the WinRM username
    pub fn with_winrm_username(mut self, username: impl Into<String>) -> Self {
        self.winrm_username = username.into();
        self
    }

    /// Set the WinRM password
    pub fn with_winrm_password(mut self, password: impl Into<String>) -> Self {
        self.winrm_password = Some(password.into());
        self
    }
}
