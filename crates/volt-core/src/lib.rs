pub mod error;
pub mod layout;
pub mod platform;
pub mod repos;

pub use error::{Result, VoltError};
pub use layout::{clone_url, decode_repos_path, encode_dir_name, exists, LayoutConfig};
pub use platform::HostOs;
pub use repos::{normalize_local_repos, normalize_repos, ReposPath, ReposPathList};
