use std::fs;
use std::path::Path;

use serde::Serialize;

use shopfront_core::config::{AppConfig, LoadOptions};
use shopfront_core::domain::product::Product;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
enum CheckStatus {
    Pass,
    Fail,
    Skipped,
}

#[derive(Debug, Serialize)]
struct DoctorCheck {
    name: &'static str,
    status: CheckStatus,
    details: String,
}

#[derive(Debug, Serialize)]
struct DoctorReport {
    overall_status: CheckStatus,
    summary: String,
    checks: Vec<DoctorCheck>,
}

pub fn run(json_output: bool) -> String {
    let report = build_report();

    if json_output {
        return serde_json::to_string_pretty(&report).unwrap_or_else(|error| {
            format!(
                "{{\"overall_status\":\"fail\",\"summary\":\"doctor serialization failed\",\"error\":\"{}\"}}",
                escape_json(&error.to_string())
            )
        });
    }

    render_human(&report)
}

fn build_report() -> DoctorReport {
    let mut checks = Vec::new();

    match AppConfig::load(LoadOptions::default()) {
        Ok(config) => {
            checks.push(DoctorCheck {
                name: "config_validation",
                status: CheckStatus::Pass,
                details: "configuration loaded and validated".to_string(),
            });
            checks.push(check_catalog_file(&config.catalog.data_path));
            checks.push(check_frontend_entry(&config.catalog.frontend_dir));
        }
        Err(error) => {
            checks.push(DoctorCheck {
                name: "config_validation",
                status: CheckStatus::Fail,
                details: error.to_string(),
            });
            checks.push(DoctorCheck {
                name: "catalog_file",
                status: CheckStatus::Skipped,
                details: "skipped because configuration did not load".to_string(),
            });
            checks.push(DoctorCheck {
                name: "frontend_entry",
                status: CheckStatus::Skipped,
                details: "skipped because configuration did not load".to_string(),
            });
        }
    }

    let all_pass = checks.iter().all(|check| check.status == CheckStatus::Pass);
    let overall_status = if all_pass { CheckStatus::Pass } else { CheckStatus::Fail };
    let summary = if all_pass {
        "doctor: all readiness checks passed".to_string()
    } else {
        "doctor: one or more readiness checks failed".to_string()
    };

    DoctorReport { overall_status, summary, checks }
}

fn check_catalog_file(path: &Path) -> DoctorCheck {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(error) => {
            return DoctorCheck {
                name: "catalog_file",
                status: CheckStatus::Fail,
                details: format!("could not read `{}`: {error}", path.display()),
            };
        }
    };

    match serde_json::from_str::<Vec<Product>>(&raw) {
        Ok(products) => DoctorCheck {
            name: "catalog_file",
            status: CheckStatus::Pass,
            details: format!("`{}` holds {} product(s)", path.display(), products.len()),
        },
        Err(error) => DoctorCheck {
            name: "catalog_file",
            status: CheckStatus::Fail,
            details: format!("`{}` is not a product array: {error}", path.display()),
        },
    }
}

fn check_frontend_entry(frontend_dir: &Path) -> DoctorCheck {
    let entry = frontend_dir.join("index.html");
    if entry.is_file() {
        DoctorCheck {
            name: "frontend_entry",
            status: CheckStatus::Pass,
            details: format!("entry document present at `{}`", entry.display()),
        }
    } else {
        DoctorCheck {
            name: "frontend_entry",
            status: CheckStatus::Fail,
            details: format!("no entry document at `{}`", entry.display()),
        }
    }
}

fn render_human(report: &DoctorReport) -> String {
    let mut lines = Vec::new();
    lines.push(report.summary.clone());

    for check in &report.checks {
        let marker = match check.status {
            CheckStatus::Pass => "ok",
            CheckStatus::Fail => "fail",
            CheckStatus::Skipped => "skip",
        };
        lines.push(format!("- [{marker}] {}: {}", check.name, check.details));
    }

    lines.join("\n")
}

fn escape_json(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::{check_catalog_file, check_frontend_entry, CheckStatus};

    #[test]
    fn malformed_catalog_file_fails_the_check() {
        let dir = TempDir::new().expect("tempdir");
        let path = dir.path().join("products.json");
        std::fs::write(&path, "{ not an array").expect("fixture should write");

        let check = check_catalog_file(&path);
        assert_eq!(check.status, CheckStatus::Fail);
    }

    #[test]
    fn valid_catalog_file_reports_the_product_count() {
        let dir = TempDir::new().expect("tempdir");
        let path = dir.path().join("products.json");
        std::fs::write(&path, r#"[{"id":"p1","name":"Mug","price":8.0,"stock":1}]"#)
            .expect("fixture should write");

        let check = check_catalog_file(&path);
        assert_eq!(check.status, CheckStatus::Pass);
        assert!(check.details.contains("1 product(s)"));
    }

    #[test]
    fn missing_frontend_entry_fails_the_check() {
        let dir = TempDir::new().expect("tempdir");

        let check = check_frontend_entry(dir.path());
        assert_eq!(check.status, CheckStatus::Fail);
    }

    #[test]
    fn present_frontend_entry_passes() {
        let dir = TempDir::new().expect("tempdir");
        std::fs::write(dir.path().join("index.html"), "<!doctype html>")
            .expect("fixture should write");

        let check = check_frontend_entry(dir.path());
        assert_eq!(check.status, CheckStatus::Pass);
    }
}
