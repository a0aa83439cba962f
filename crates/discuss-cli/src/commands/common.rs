//! Shared command plumbing: configuration, store, node and actor flags

use anyhow::{bail, Context as _, Result};
use clap::Args;
use discuss_core::access::{Actor, Capabilities, Node};
use discuss_core::api::{self, ApiRequest, ApiResponse};
use discuss_core::comment::User;
use discuss_core::config::Config;
use discuss_core::thread::ThreadStore;
use discuss_core::types::UserId;
use discuss_storage::FileSystemStorage;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Default configuration location, relative to the working directory
pub const DEFAULT_CONFIG_PATH: &str = ".discuss/config.toml";

/// Loaded configuration plus resolved paths
#[derive(Debug)]
pub struct Context {
    pub config: Config,
    pub config_path: PathBuf,
    pub data_dir: PathBuf,
}

impl Context {
    /// Load configuration, falling back to defaults when no file exists
    pub fn load(config_path: Option<&Path>, data_dir: Option<&Path>) -> Result<Self> {
        let (config, config_path) = match config_path {
            Some(path) => {
                let config = Config::load(path)
                    .with_context(|| format!("Failed to load config {}", path.display()))?;
                (config, path.to_path_buf())
            }
            None => {
                let path = PathBuf::from(DEFAULT_CONFIG_PATH);
                let config = if path.exists() {
                    Config::load(&path)
                        .with_context(|| format!("Failed to load config {}", path.display()))?
                } else {
                    debug!("No config at {}, using defaults", path.display());
                    Config::default()
                };
                (config, path)
            }
        };

        let data_dir = data_dir
            .map(Path::to_path_buf)
            .unwrap_or_else(|| config.storage.data_dir.clone());

        Ok(Self {
            config,
            config_path,
            data_dir,
        })
    }

    /// Open the file-backed thread store
    pub fn open_store(&self) -> Result<ThreadStore> {
        let storage = if self.data_dir.as_os_str().is_empty() {
            FileSystemStorage::default_location()
                .context("Failed to open comment storage in the user data directory")?
        } else {
            FileSystemStorage::new(&self.data_dir).with_context(|| {
                format!("Failed to open comment storage at {}", self.data_dir.display())
            })?
        };
        Ok(ThreadStore::new(storage).with_config(&self.config)?)
    }

    /// Run one API request and print its body
    pub fn call(&self, node: &NodeArgs, actor: &ActorArgs, request: ApiRequest) -> Result<()> {
        let store = self.open_store()?;
        let response = api::handle(&store, &node.node(), &actor.actor(), &request);
        print_response(&response)
    }
}

/// Flags describing the node a thread hangs off
#[derive(Debug, Clone, Args)]
pub struct NodeArgs {
    /// Node id
    #[arg(long, env = "DISCUSS_NODE", default_value = "root")]
    pub node: String,

    /// Contributor user id (repeatable)
    #[arg(long = "contributor")]
    pub contributors: Vec<String>,

    /// Treat commenting as disabled on the node
    #[arg(long)]
    pub comments_disabled: bool,
}

impl NodeArgs {
    pub fn node(&self) -> Node {
        let mut node = Node::new(&self.node);
        for id in &self.contributors {
            node = node.with_contributor(UserId::new(id));
        }
        if self.comments_disabled {
            node = node.with_comment_level(None);
        }
        node
    }
}

/// Flags describing who is acting
#[derive(Debug, Clone, Args)]
pub struct ActorArgs {
    /// Acting user id; omit to act anonymously
    #[arg(long, env = "DISCUSS_USER")]
    pub user: Option<String>,

    /// Display name of the acting user
    #[arg(long)]
    pub name: Option<String>,

    /// Email of the acting user (for avatars)
    #[arg(long)]
    pub email: Option<String>,

    /// Acting user has edit rights on the node
    #[arg(long)]
    pub moderator: bool,

    /// Acting user may view but not comment
    #[arg(long)]
    pub read_only: bool,
}

impl ActorArgs {
    pub fn capabilities(&self) -> Capabilities {
        Capabilities {
            can_view: true,
            can_comment: !self.read_only,
            can_edit: self.moderator,
        }
    }

    pub fn actor(&self) -> Actor {
        let capabilities = self.capabilities();
        match &self.user {
            Some(id) => {
                let name = self.name.clone().unwrap_or_else(|| id.clone());
                let mut user = User::new(id.clone(), name);
                if let Some(email) = &self.email {
                    user = user.with_email(email.clone());
                }
                Actor::new(user, capabilities)
            }
            None => Actor::anonymous(capabilities),
        }
    }
}

/// Print a successful body as JSON, or fail with the error message
pub fn print_response(response: &ApiResponse) -> Result<()> {
    if response.is_success() {
        println!("{}", serde_json::to_string_pretty(&response.body)?);
        return Ok(());
    }

    let message = response
        .body
        .get("message")
        .and_then(|m| m.as_str())
        .unwrap_or("request failed");
    bail!("{} (status {})", message, response.status)
}
