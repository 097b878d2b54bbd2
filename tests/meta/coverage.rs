//! Keeps `tests/unit` a one-to-one mirror of `src`

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;
    use std::fs;
    use std::io;
    use std::path::Path;

    // Crate roots and module declarations carry no behavior of their own
    fn is_module_scaffolding(relative: &str) -> bool {
        relative == "lib.rs" || relative == "main.rs" || relative.ends_with("mod.rs")
    }

    fn rust_files(dir: &Path, base: &Path, found: &mut BTreeSet<String>) -> io::Result<()> {
        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            if path.is_dir() {
                rust_files(&path, base, found)?;
            } else if path.extension().is_some_and(|ext| ext == "rs") {
                let relative = path
                    .strip_prefix(base)
                    .map_err(|error| io::Error::other(error.to_string()))?;
                found.insert(relative.to_string_lossy().replace('\\', "/"));
            }
        }
        Ok(())
    }

    fn mirrored(root: &str) -> BTreeSet<String> {
        let base = Path::new(root);
        let mut found = BTreeSet::new();
        let scanned = rust_files(base, base, &mut found);
        assert!(scanned.is_ok(), "Failed to scan {root}: {scanned:?}");
        found
            .into_iter()
            .filter(|relative| !is_module_scaffolding(relative))
            .collect()
    }

    // Tests every source file has a unit test file at the same relative path
    // Verified by deleting tests/unit/growing/regrow.rs
    #[test]
    fn test_every_source_file_has_unit_tests() {
        let tests = mirrored("tests/unit");
        let missing: Vec<String> = mirrored("src")
            .into_iter()
            .filter(|relative| !tests.contains(relative))
            .map(|relative| format!("  - src/{relative} -> tests/unit/{relative}"))
            .collect();

        assert!(
            missing.is_empty(),
            "Source files without unit tests:\n{}",
            missing.join("\n")
        );
    }

    // Tests no unit test file outlives its source file
    #[test]
    fn test_every_unit_test_has_a_source_file() {
        let sources = mirrored("src");
        let orphaned: Vec<String> = mirrored("tests/unit")
            .into_iter()
            .filter(|relative| !sources.contains(relative))
            .map(|relative| format!("  - tests/unit/{relative}"))
            .collect();

        assert!(
            orphaned.is_empty(),
            "Unit test files without a source file:\n{}",
            orphaned.join("\n")
        );
    }

    // Tests every non-scaffolding test file declares at least one test
    #[test]
    fn test_test_files_contain_tests() {
        let base = Path::new("tests");
        let mut found = BTreeSet::new();
        let scanned = rust_files(base, base, &mut found);
        assert!(scanned.is_ok(), "Failed to scan tests: {scanned:?}");

        let empty: Vec<String> = found
            .into_iter()
            .filter(|relative| {
                let name = relative.rsplit('/').next().unwrap_or(relative);
                !is_module_scaffolding(name)
            })
            .filter(|relative| {
                fs::read_to_string(base.join(relative))
                    .map_or(true, |content| !content.contains("#[test]"))
            })
            .map(|relative| format!("  - tests/{relative}"))
            .collect();

        assert!(
            empty.is_empty(),
            "Test files without any #[test] function:\n{}",
            empty.join("\n")
        );
    }
}
