//! Thruk Client - typed access to the Thruk configuration REST API
//!
//! Reads, creates and deletes Naemon configuration objects through a Thruk
//! site and drives the discard / save / reload / check cycle.
//!
//! ```no_run
//! use thruk_client::{ClientConfig, Command, ThrukClient};
//!
//! # async fn run() -> thruk_client::Result<()> {
//! let config = ClientConfig::new("https://localhost", "demo", "omdadmin", "omdadmin")
//!     .with_insecure_skip_verify(true);
//! let client = ThrukClient::new(&config)?;
//!
//! let id = client
//!     .create(Command::new("commands.cfg", "check_ssh", "$USER1$/check_ssh $HOSTADDRESS$"))
//!     .await?;
//! let command: Command = client.fetch(&id).await?;
//! assert_eq!(command.command_name.as_deref(), Some("check_ssh"));
//!
//! if client.validate().await {
//!     client.save().await?;
//!     client.reload().await?;
//! } else {
//!     client.discard().await?;
//! }
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod io;
pub mod object;
pub mod views;

pub use client::ThrukClient;
pub use config::{load_config, ClientConfig};
pub use error::{Result, ThrukError};
pub use io::{HttpClient, HttpResponse, ReqwestHttpClient};
pub use object::{AttrValue, CheckResult, ConfigObject, ObjectMeta, ReloadResult};
pub use views::{Command, ConfigView, Host, ObjectKind, Service, Servicegroup};
