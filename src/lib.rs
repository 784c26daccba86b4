//! Communicator configuration core for build and provisioning tooling
//!
//! This crate validates and normalizes the configuration that selects
//! and parameterizes a remote command-execution transport before a
//! connection is attempted. It supports three communicator kinds:
//!
//! - `none` - no remote transport
//! - `ssh` - shell transport authenticated via password, private key,
//!   or agent forwarding, optionally through a bastion relay
//! - `winrm` - Windows remote-management transport, optionally over SSL
//!   and optionally with NTLM authentication
//!
//! # What it does
//!
//! - Applies kind-specific defaults in place (SSH port 22, WinRM port
//!   5985/5986 depending on SSL, timeouts, handshake attempts)
//! - Enforces consistency rules and reports *every* violation found in
//!   one pass, rather than stopping at the first
//! - Selects the WinRM transport decorator when NTLM is requested
//! - Percent-encodes raw public-key bytes for text-only channels such
//!   as instance metadata
//!
//! It opens no connections, performs no authentication, and does no
//! I/O; template interpolation and the transports themselves live in
//! the surrounding tool.
//!
//! # Example
//!
//! ```
//! use communicator::{CommunicatorKind, Config};
//!
//! let mut config = Config::default()
//!     .with_kind(CommunicatorKind::Winrm)
//!     .with_winrm_username("admin");
//!
//! let errors = config.prepare(None);
//! assert!(errors.is_empty());
//! assert_eq!(config.winrm_port, 5985);
//! ```

pub mod config;
pub mod error;
pub mod ssh;
pub mod template;
pub mod winrm;

// Re-exports for convenience
pub use config::{CommunicatorKind, Config};
pub use error::{Result, ValidationError};
pub use ssh::{decode_public_key, encode_public_key};
pub use template::InterpolationContext;
pub use winrm::{NtlmTransport, TransportDecorator};
