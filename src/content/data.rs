//! Global data files (_data directory)

use anyhow::Result;
use indexmap::IndexMap;
use std::fs;
use std::path::Path;

/// Load every data file in the data directory
///
/// Each `.yml`/`.yaml`/`.json` file is exposed to templates under its file
/// stem. Files that fail to parse are logged and skipped. Insertion order
/// follows directory order.
pub fn load_global_data(data_dir: &Path) -> Result<IndexMap<String, serde_json::Value>> {
    let mut data = IndexMap::new();

    if !data_dir.exists() {
        return Ok(data);
    }

    let mut entries: Vec<_> = fs::read_dir(data_dir)?.filter_map(|e| e.ok()).collect();
    entries.sort_by_key(|e| e.file_name());

    for entry in entries {
        let path = entry.path();
        if !path.is_file() {
            continue;
        }

        let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
            continue;
        };
        let ext = path.extension().and_then(|e| e.to_str());

        let parsed = match ext {
            Some("yml") | Some("yaml") => fs::read_to_string(&path)
                .map_err(anyhow::Error::from)
                .and_then(|s| serde_yaml::from_str::<serde_json::Value>(&s).map_err(Into::into)),
            Some("json") => fs::read_to_string(&path)
                .map_err(anyhow::Error::from)
                .and_then(|s| serde_json::from_str::<serde_json::Value>(&s).map_err(Into::into)),
            _ => continue,
        };

        match parsed {
            Ok(value) => {
                data.insert(stem.to_string(), value);
            }
            Err(e) => {
                tracing::warn!("Failed to load data file {:?}: {}", path, e);
            }
        }
    }

    Ok(data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_yaml_and_json() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("site.yml"), "name: Test\nlinks:\n  - a\n  - b\n").unwrap();
        fs::write(tmp.path().join("nav.json"), r#"[{"label": "Home", "url": "/"}]"#).unwrap();

        let data = load_global_data(tmp.path()).unwrap();
        assert_eq!(data.len(), 2);
        assert_eq!(data["site"]["name"], "Test");
        assert_eq!(data["nav"][0]["label"], "Home");
    }

    #[test]
    fn test_missing_dir_is_empty() {
        let tmp = TempDir::new().unwrap();
        let data = load_global_data(&tmp.path().join("_data")).unwrap();
        assert!(data.is_empty());
    }

    #[test]
    fn test_bad_file_skipped() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("ok.yml"), "a: 1").unwrap();
        fs::write(tmp.path().join("bad.json"), "{not json").unwrap();

        let data = load_global_data(tmp.path()).unwrap();
        assert_eq!(data.len(), 1);
        assert!(data.contains_key("ok"));
    }
}
