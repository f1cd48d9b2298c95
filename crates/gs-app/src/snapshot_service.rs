//! Loading and saving network snapshots and solver configuration.

use std::path::Path;

use gs_network::{Network, from_json_str, to_json_string};
use gs_solver::DcConfig;

use crate::error::{AppError, AppResult};

/// Load a network from a JSON snapshot file.
pub fn load_network(path: &Path) -> AppResult<Network> {
    let content = std::fs::read_to_string(path).map_err(|e| AppError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    parse_network(&content)
}

/// Parse a network from JSON snapshot text.
pub fn parse_network(json: &str) -> AppResult<Network> {
    Ok(from_json_str(json)?)
}

/// Save a network as a JSON snapshot file.
pub fn save_network(path: &Path, network: &Network) -> AppResult<()> {
    let content = to_json_string(network)?;

    std::fs::write(path, content).map_err(|e| AppError::FileWrite {
        path: path.to_path_buf(),
        source: e,
    })?;

    Ok(())
}

/// Load solver configuration from a YAML file. Missing fields take their defaults.
pub fn load_config(path: &Path) -> AppResult<DcConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| AppError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    serde_yaml::from_str(&content)
        .map_err(|e| AppError::Config(format!("Failed to parse config YAML: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_reports_snapshot_errors() {
        let err = parse_network("{ not json").unwrap_err();
        assert!(matches!(err, AppError::Snapshot(_)));
    }

    #[test]
    fn parse_reports_dangling_lines() {
        let json = r#"{
            "nodes": { "1": { "id": "1", "injection": 1.0 } },
            "lines": { "L1": { "id": "L1", "from_node": "1", "to_node": "9" } }
        }"#;
        let err = parse_network(json).unwrap_err();
        assert!(matches!(err, AppError::Network(_)));
    }

    #[test]
    fn missing_file_is_read_error() {
        let path = std::env::temp_dir().join("gs_app_definitely_missing.json");
        let _ = std::fs::remove_file(&path);
        assert!(matches!(
            load_network(&path),
            Err(AppError::FileRead { .. })
        ));
    }

    #[test]
    fn partial_config_uses_defaults() {
        let path = std::env::temp_dir().join("gs_app_partial_config.yaml");
        std::fs::write(&path, "slack: \"2\"\n").unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.slack.as_ref().map(|s| s.as_str()), Some("2"));
        assert_eq!(config.pivot_tol, DcConfig::default().pivot_tol);

        std::fs::remove_file(&path).ok();
    }
}
