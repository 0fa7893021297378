//! `latest-capture resolve` command.

use crate::config::Config;
use crate::context::ServiceContext;
use crate::resolver::{self, Resolution};

/// Execute the `resolve` command.
///
/// Prints `<date>/<file>` and the relative path of the latest capture. Finding
/// nothing is reported but is not a failure.
///
/// # Errors
///
/// Returns an error string if the capture tree cannot be listed.
pub fn run_with_context(ctx: &ServiceContext, config: &Config) -> Result<(), String> {
    match resolver::resolve(ctx.fs.as_ref(), &config.root).map_err(|e| e.to_string())? {
        Resolution::Found(artifact) => {
            println!("{}/{}", artifact.date_folder, artifact.file_name);
            println!("{}", artifact.relative_path);
        }
        Resolution::NotFound => println!("No image found under {}", config.root.display()),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_for(root: &std::path::Path) -> Config {
        let vars = HashMap::from([(
            crate::config::ROOT_VAR.to_string(),
            root.display().to_string(),
        )]);
        Config::from_lookup(|key| vars.get(key).cloned()).unwrap()
    }

    #[test]
    fn resolve_command_with_capture() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("20240101")).unwrap();
        std::fs::write(dir.path().join("20240101/0000.jpg"), b"jpeg").unwrap();

        let result = run_with_context(&ServiceContext::live(), &config_for(dir.path()));
        assert!(result.is_ok());
    }

    #[test]
    fn resolve_command_empty_root() {
        let dir = tempfile::tempdir().unwrap();
        let result = run_with_context(&ServiceContext::live(), &config_for(dir.path()));
        assert!(result.is_ok());
    }
}
