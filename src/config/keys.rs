//! Names of the recognized configuration options.

/// Prefix shared by every option read from the environment.
pub const ENV_PREFIX: &str = "AUTH0_";

/// Root of the directory tree to read from or write to.
pub const INPUT_FILE: &str = "AUTH0_INPUT_FILE";
/// Base against which a relative input path is resolved.
pub const BASE_PATH: &str = "AUTH0_BASE_PATH";
pub const CONFIG_FILE: &str = "AUTH0_CONFIG_FILE";
pub const KEYWORD_REPLACE_MAPPINGS: &str = "AUTH0_KEYWORD_REPLACE_MAPPINGS";
pub const CLIENT_SECRET: &str = "AUTH0_CLIENT_SECRET";

pub const ADDITIONAL_CLIENTS_DIRECTORY: &str = "AUTH0_ADDITIONAL_CLIENTS_DIRECTORY";
pub const ADDITIONAL_RESOURCE_SERVERS_DIRECTORY: &str = "AUTH0_ADDITIONAL_RESOURCE_SERVERS_DIRECTORY";
pub const ADDITIONAL_RULES_DIRECTORY: &str = "AUTH0_ADDITIONAL_RULES_DIRECTORY";

/// Enables the post-deploy database connection fix-up.
pub const ALLOW_AUTO_ENABLE_DATABASE_CONNECTION: &str =
    "AUTH0_ALLOW_AUTO_ENABLE_DATABASE_CONNECTION";
pub const DATABASE_CONNECTION_ID: &str = "AUTH0_DATABASE_CONNECTION_ID";
/// Client metadata key whose value `"true"` marks a client for the fix-up.
pub const DATABASE_CONNECTION_CLIENT_METAKEY: &str = "AUTH0_DATABASE_CONNECTION_CLIENT_METAKEY";

pub const DEFAULT_DATABASE_CONNECTION_CLIENT_METAKEY: &str = "auto_enable_database_connection";
