use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

const FIXTURE_SUFFIX: &str = ".test.toml";

#[derive(Debug, Deserialize)]
pub struct FixtureFile {
    /// Human-readable description of the whole file.
    #[serde(default)]
    pub description: Option<String>,

    #[serde(default, rename = "case")]
    pub cases: Vec<FixtureCase>,
}

#[derive(Debug, Deserialize)]
pub struct FixtureCase {
    /// Human-readable case description. Defaults to the template.
    #[serde(default)]
    pub description: Option<String>,

    pub template: String,

    #[serde(default)]
    pub inputs: Vec<String>,

    /// Expected expansion, compared exactly.
    #[serde(default)]
    pub expect_output: Option<String>,

    /// Expected error; the error's Display string must equal this.
    #[serde(default)]
    pub expect_error: Option<String>,
}

impl FixtureCase {
    fn label(&self) -> String {
        self.description
            .clone()
            .unwrap_or_else(|| format!("{:?} {:?}", self.template, self.inputs))
    }

    /// Run the case. Returns `Some(reason)` on failure.
    fn check(&self) -> Option<String> {
        let result = dicer_interpreter::expand(&self.template, &self.inputs);

        match (&self.expect_error, &self.expect_output, result) {
            (Some(expected), _, Err(err)) => {
                let actual = err.to_string();
                (actual != *expected).then(|| {
                    format!("error mismatch\n  expected: {}\n  actual:   {}", expected, actual)
                })
            }
            (Some(expected), _, Ok(output)) => Some(format!(
                "expected error \"{}\", but expansion succeeded with {:?}",
                expected, output
            )),
            (None, Some(expected), Ok(output)) => (output != *expected).then(|| {
                format!(
                    "output mismatch\n  expected: {:?}\n  actual:   {:?}",
                    expected, output
                )
            }),
            (None, _, Err(err)) => Some(format!("unexpected error: {}", err)),
            (None, None, Ok(_)) => None,
        }
    }
}

pub enum TestOutcome {
    Pass,
    Fail(String),
}

pub struct TestResult {
    pub path: PathBuf,
    pub label: String,
    pub outcome: TestOutcome,
}

fn load_fixture(path: &Path) -> Result<FixtureFile, String> {
    let content =
        std::fs::read_to_string(path).map_err(|e| format!("cannot read file: {}", e))?;
    toml::from_str(&content).map_err(|e| format!("TOML parse error: {}", e))
}

fn file_label(path: &Path) -> String {
    path.file_name()
        .and_then(|s| s.to_str())
        .and_then(|s| s.strip_suffix(FIXTURE_SUFFIX))
        .unwrap_or("?")
        .to_string()
}

/// Run every case in one fixture file.
fn run_fixture_file(path: &Path) -> Vec<TestResult> {
    let fixture = match load_fixture(path) {
        Ok(f) => f,
        Err(reason) => {
            return vec![TestResult {
                path: path.to_path_buf(),
                label: file_label(path),
                outcome: TestOutcome::Fail(reason),
            }];
        }
    };

    debug!(
        path = %path.display(),
        description = fixture.description.as_deref().unwrap_or(""),
        cases = fixture.cases.len(),
        "running fixture file"
    );

    if fixture.cases.is_empty() {
        return vec![TestResult {
            path: path.to_path_buf(),
            label: file_label(path),
            outcome: TestOutcome::Fail("fixture has no [[case]] entries".into()),
        }];
    }

    fixture
        .cases
        .iter()
        .map(|case| TestResult {
            path: path.to_path_buf(),
            label: case.label(),
            outcome: match case.check() {
                None => TestOutcome::Pass,
                Some(reason) => TestOutcome::Fail(reason),
            },
        })
        .collect()
}

/// Discover fixture files grouped by category (subfolder relative to root).
/// Files directly in `root` get category "" (uncategorized).
fn discover_categorized(root: &Path) -> BTreeMap<String, Vec<PathBuf>> {
    let mut categories: BTreeMap<String, Vec<PathBuf>> = BTreeMap::new();
    collect_fixtures(root, root, &mut categories);
    for files in categories.values_mut() {
        files.sort();
    }
    categories
}

fn collect_fixtures(dir: &Path, root: &Path, out: &mut BTreeMap<String, Vec<PathBuf>>) {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            collect_fixtures(&path, root, out);
        } else if let Some(name) = path.file_name().and_then(|n| n.to_str())
            && name.ends_with(FIXTURE_SUFFIX)
        {
            let category = path
                .parent()
                .and_then(|p| p.strip_prefix(root).ok())
                .map(|p| p.to_string_lossy().replace('\\', "/"))
                .unwrap_or_default();
            out.entry(category).or_default().push(path);
        }
    }
}

/// List available categories for the given fixture path.
pub fn list_categories(path: &Path) {
    if path.is_file() {
        eprintln!("(single file, no categories)");
        return;
    }

    let categories = discover_categorized(path);
    if categories.is_empty() {
        eprintln!("no {} files found in {}", FIXTURE_SUFFIX, path.display());
        return;
    }

    eprintln!("available categories:");
    for (cat, files) in &categories {
        let label = if cat.is_empty() { "(root)" } else { cat.as_str() };
        eprintln!("  {} ({} files)", label, files.len());
    }
}

fn pass_label(no_color: bool) -> &'static str {
    if no_color { "PASS" } else { "\x1b[32mPASS\x1b[0m" }
}

fn fail_label(no_color: bool) -> &'static str {
    if no_color { "FAIL" } else { "\x1b[31mFAIL\x1b[0m" }
}

fn bold(s: &str, no_color: bool) -> String {
    if no_color {
        s.to_string()
    } else {
        format!("\x1b[1m{}\x1b[0m", s)
    }
}

/// Keep only the requested categories (and their subcategories).
fn filter_categories<'a>(
    all: &'a BTreeMap<String, Vec<PathBuf>>,
    requested: &[String],
) -> BTreeMap<&'a str, &'a Vec<PathBuf>> {
    if requested.is_empty() {
        return all.iter().map(|(k, v)| (k.as_str(), v)).collect();
    }

    let mut filtered = BTreeMap::new();
    for req in requested {
        let req = req.trim_matches('/');
        let mut found = false;
        for (cat, files) in all {
            if cat == req || cat.starts_with(&format!("{}/", req)) {
                filtered.insert(cat.as_str(), files);
                found = true;
            }
        }
        if !found {
            eprintln!(
                "warning: category '{}' not found (available: {})",
                req,
                all.keys()
                    .map(|k| if k.is_empty() { "(root)" } else { k.as_str() })
                    .collect::<Vec<_>>()
                    .join(", ")
            );
        }
    }
    filtered
}

/// Run all fixture files under `path` (or a single file).
/// If `categories` is non-empty, only run fixtures in those categories.
/// Returns exit code: 0 = all pass, 1 = any failure.
pub fn run_tests(path: &Path, no_color: bool, categories: &[String]) -> i32 {
    // Single file mode: one uncategorized group, filters ignored
    let all_categories = if path.is_file() {
        BTreeMap::from([(String::new(), vec![path.to_path_buf()])])
    } else {
        discover_categorized(path)
    };

    if all_categories.is_empty() {
        eprintln!("no {} files found in {}", FIXTURE_SUFFIX, path.display());
        return 1;
    }

    let run_categories = if path.is_file() {
        filter_categories(&all_categories, &[])
    } else {
        filter_categories(&all_categories, categories)
    };

    if run_categories.is_empty() {
        eprintln!("no matching categories found");
        return 1;
    }

    let mut passed = 0usize;
    let mut failures: Vec<TestResult> = Vec::new();

    for (cat, files) in &run_categories {
        let header = if cat.is_empty() { "(root)" } else { *cat };
        eprintln!();
        eprintln!("{}", bold(header, no_color));

        for file in *files {
            for result in run_fixture_file(file) {
                match &result.outcome {
                    TestOutcome::Pass => {
                        passed += 1;
                        eprintln!("  {}  {}", pass_label(no_color), result.label);
                    }
                    TestOutcome::Fail(_) => {
                        eprintln!("  {}  {}", fail_label(no_color), result.label);
                        failures.push(result);
                    }
                }
            }
        }
    }

    if !failures.is_empty() {
        eprintln!();
        eprintln!("failures:");
        for f in &failures {
            eprintln!();
            eprintln!("  --- {} ({}) ---", f.path.display(), f.label);
            if let TestOutcome::Fail(reason) = &f.outcome {
                for line in reason.lines() {
                    eprintln!("  {}", line);
                }
            }
        }
    }

    eprintln!();
    let failed = failures.len();
    if failed == 0 {
        let ok = if no_color { "ok" } else { "\x1b[32mok\x1b[0m" };
        eprintln!("test result: {}. {} passed, 0 failed", ok, passed);
        0
    } else {
        let bad = if no_color { "FAILED" } else { "\x1b[31mFAILED\x1b[0m" };
        eprintln!(
            "test result: {}. {} passed, {} failed (of {})",
            bad,
            passed,
            failed,
            passed + failed
        );
        1
    }
}
