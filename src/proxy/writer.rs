//! Output file writer

use crate::Result;
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

/// Write the deduplicated address set to a file, one address per line.
///
/// Overwrites any existing file. An empty set produces an empty file; that
/// is still a successful run.
pub fn write_addresses<P: AsRef<Path>>(path: P, addresses: &BTreeSet<String>) -> Result<()> {
    let content = addresses.iter().cloned().collect::<Vec<_>>().join("\n");
    fs::write(path, content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    fn temp_path(name: &str) -> std::path::PathBuf {
        env::temp_dir().join(name)
    }

    #[test]
    fn test_writes_one_address_per_line() {
        let path = temp_path("proxy_harvest_writer_test.txt");
        let addresses: BTreeSet<String> = ["1.2.3.4:80", "1.1.1.1:8080"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        write_addresses(&path, &addresses).unwrap();
        let content = fs::read_to_string(&path).unwrap();
        // BTreeSet iteration is sorted, so output is reproducible
        assert_eq!(content, "1.1.1.1:8080\n1.2.3.4:80");
        fs::remove_file(&path).ok();
    }

    #[test]
    fn test_empty_set_writes_empty_file() {
        let path = temp_path("proxy_harvest_writer_empty_test.txt");
        write_addresses(&path, &BTreeSet::new()).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "");
        fs::remove_file(&path).ok();
    }

    #[test]
    fn test_overwrites_existing_file() {
        let path = temp_path("proxy_harvest_writer_overwrite_test.txt");
        fs::write(&path, "stale contents").unwrap();
        let addresses: BTreeSet<String> = ["9.9.9.9:53".to_string()].into_iter().collect();
        write_addresses(&path, &addresses).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "9.9.9.9:53");
        fs::remove_file(&path).ok();
    }
}
