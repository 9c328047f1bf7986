//! Isolated environment for command tests
//!
//! Commands load their configuration through the layered loader, which reads
//! the user's config file and `TOOL_CBD_*` variables. Tests run inside a
//! `figment::Jail` with the environment cleared and an empty config file, so
//! the host setup never leaks into them.

use std::future::Future;
use std::path::PathBuf;

use crate::cli::args::{CommonArgs, OutputFormat};

/// Name of the empty config file created in the jail
pub const CONFIG_FILE: &str = "config.toml";

/// Run an async command test in a clean jail
///
/// The closure receives JSON-output common flags pointing at the jail's
/// config file and a `data` directory inside it, plus the jail directory.
pub fn isolated<F, Fut>(test: F)
where
    F: FnOnce(CommonArgs, PathBuf) -> Fut,
    Fut: Future<Output = ()>,
{
    figment::Jail::expect_with(|jail| {
        jail.clear_env();
        jail.create_file(CONFIG_FILE, "")?;

        let dir = jail.directory().to_path_buf();
        let common = CommonArgs {
            config_file: Some(dir.join(CONFIG_FILE)),
            data_dir: Some(dir.join("data")),
            output_format: OutputFormat::Json,
            ..CommonArgs::default()
        };

        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| e.to_string())?;
        runtime.block_on(test(common, dir));
        Ok(())
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::commands::shared::load_configuration;

    #[test]
    fn test_isolated_runs_with_clean_environment() {
        isolated(|common, dir| async move {
            assert_eq!(std::env::vars_os().count(), 0);
            assert!(dir.join(CONFIG_FILE).is_file());

            let config = load_configuration(&common).unwrap();
            assert_eq!(config.storage.data_dir, dir.join("data"));
            assert_eq!(
                config.upload.max_upload_bytes,
                crate::constants::DEFAULT_MAX_UPLOAD_BYTES
            );
        });
    }
}
