use src_normalize::utils::run_batch;
use src_normalize::{ConfigManager, ConfigProvider, ConsoleReporter, NormalizeEngine, ReportFormat};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn setup_tree() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir_all(dir.path().join("include")).unwrap();
    fs::create_dir_all(dir.path().join("src")).unwrap();
    dir
}

fn write_file(root: &Path, rel: &str, content: &str) -> PathBuf {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn test_full_normalize_workflow() {
    let tree = setup_tree();

    // 1. Lay out a small library tree with drifted guards and includes.
    let inx = write_file(
        tree.path(),
        "include/inxlib/inx.hpp",
        "#ifndef INX_HPP\n#define INX_HPP\ntypedef int inx_t;\n#endif\n",
    );
    let bits = write_file(
        tree.path(),
        "include/inxlib/util/bits.hpp",
        "/*\n * zlib license\n */\n\n#ifndef INXLIB_UTIL_BITS_HPP\n#define INXLIB_UTIL_BITS_HPP\nint popcount(int);\n#endif // INXLIB_UTIL_BITS_HPP\n",
    );
    let math = write_file(
        tree.path(),
        "include/inxlib/util/math.hpp",
        "#ifndef MATH_HPP\n#define MATH_HPP\n#include <inxlib/util/bits.hpp>\n#include \"inx.hpp\"\nint clamp(int);\n#endif\n",
    );
    let main_cpp = write_file(
        tree.path(),
        "src/search/main.cpp",
        "#include \"math.hpp\"\n#include <algorithm>\n\nint main() { return 0; }\n",
    );
    let math_original = fs::read_to_string(&math).unwrap();

    // 2. Set up the configuration; the defaults match this tree layout.
    let manager = ConfigManager::new_at(tree.path().to_path_buf());
    manager.initialize().unwrap();
    assert!(manager.get_config_path().unwrap().exists());

    // 3. Normalize the whole batch.
    let engine = NormalizeEngine::new(manager.resolve().unwrap());
    let files = vec![inx.clone(), bits.clone(), math.clone(), main_cpp.clone()];
    let mut reporter = ConsoleReporter::new();
    let report = run_batch(&engine, &files, &mut reporter);

    assert!(!report.has_failures());
    assert_eq!(report.files.len(), 4);
    assert_eq!(report.total_replacements(), 9);
    assert_eq!(report.total_issues(), 1);

    // 4. Verify the rewritten files.
    assert_eq!(
        fs::read_to_string(&inx).unwrap(),
        "#ifndef INXLIB_INX_HPP\n#define INXLIB_INX_HPP\ntypedef int inx_t;\n#endif // INXLIB_INX_HPP\n"
    );
    // Already canonical: untouched apart from the rewrite itself.
    assert_eq!(
        fs::read_to_string(&bits).unwrap(),
        "/*\n * zlib license\n */\n\n#ifndef INXLIB_UTIL_BITS_HPP\n#define INXLIB_UTIL_BITS_HPP\nint popcount(int);\n#endif // INXLIB_UTIL_BITS_HPP\n"
    );
    assert_eq!(
        fs::read_to_string(&math).unwrap(),
        "#ifndef INXLIB_UTIL_MATH_HPP\n#define INXLIB_UTIL_MATH_HPP\n#include \"bits.hpp\"\n#include <inxlib/inx.hpp>\nint clamp(int);\n#endif // INXLIB_UTIL_MATH_HPP\n"
    );
    assert_eq!(
        fs::read_to_string(&main_cpp).unwrap(),
        "#include <inxlib/util/math.hpp>\n#include <algorithm>\n\nint main() { return 0; }\n"
    );

    // 5. Backups hold the pre-rewrite bytes.
    assert_eq!(
        fs::read_to_string(math.with_file_name("math.hpp.backup")).unwrap(),
        math_original
    );

    // 6. The structured report serializes and names the processed files.
    let json = report.render(ReportFormat::Json).unwrap();
    assert!(json.contains("math.hpp"));
    assert!(json.contains("file algorithm not found in include tree"));
    let yaml = report.render(ReportFormat::Yaml).unwrap();
    assert!(yaml.contains("replacements"));

    // 7. A second pass over the normalized tree changes nothing.
    let before: Vec<String> = files
        .iter()
        .map(|f| fs::read_to_string(f).unwrap())
        .collect();
    let report = run_batch(&engine, &files, &mut reporter);
    assert_eq!(report.total_replacements(), 0);
    assert_eq!(report.total_issues(), 1);
    let after: Vec<String> = files
        .iter()
        .map(|f| fs::read_to_string(f).unwrap())
        .collect();
    assert_eq!(before, after);
}

#[test]
fn test_failures_do_not_stop_the_batch() {
    let tree = setup_tree();
    let stray = write_file(tree.path(), "tools/gen.cpp", "int gen();\n");
    let good = write_file(tree.path(), "src/ok.cpp", "int main() { return 0; }\n");
    let missing = tree.path().join("src/not_there.cpp");

    let manager = ConfigManager::new_at(tree.path().to_path_buf());
    manager.initialize().unwrap();
    let engine = NormalizeEngine::new(manager.resolve().unwrap());

    let files = vec![stray.clone(), missing.clone(), good.clone()];
    let mut reporter = ConsoleReporter::new();
    let report = run_batch(&engine, &files, &mut reporter);

    assert_eq!(report.files.len(), 1);
    assert_eq!(report.failures.len(), 2);
    assert!(report.failures[0].error.contains("outside the header root"));
    assert!(report.failures[1].error.contains("failed to resolve"));

    // The stray file was never touched, and the good one went through.
    assert_eq!(fs::read_to_string(&stray).unwrap(), "int gen();\n");
    assert!(!stray.with_file_name("gen.cpp.backup").exists());
    assert!(good.with_file_name("ok.cpp.backup").exists());
}
