use serde::Serialize;
use wellnest_agent::GeminiClient;
use wellnest_core::config::{AppConfig, LoadOptions};
use wellnest_core::Catalog;

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
            checks.push(check_gateway_credential(&config));
            checks.push(check_catalog(&config));
        }
        Err(error) => {
            checks.push(DoctorCheck {
                name: "config_validation",
                status: CheckStatus::Fail,
                details: error.to_string(),
            });
            for name in ["gateway_credential", "catalog_load"] {
                checks.push(DoctorCheck {
                    name,
                    status: CheckStatus::Skipped,
                    details: "skipped because configuration did not load".to_string(),
                });
            }
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

// Offline: builds the client without sending a request.
fn check_gateway_credential(config: &AppConfig) -> DoctorCheck {
    match GeminiClient::new(&config.llm) {
        Ok(client) => DoctorCheck {
            name: "gateway_credential",
            status: CheckStatus::Pass,
            details: format!("client ready for `{}`", client.endpoint()),
        },
        Err(error) => DoctorCheck {
            name: "gateway_credential",
            status: CheckStatus::Fail,
            details: error.to_string(),
        },
    }
}

fn check_catalog(config: &AppConfig) -> DoctorCheck {
    let source = config
        .catalog
        .path
        .as_ref()
        .map(|path| format!("`{}`", path.display()))
        .unwrap_or_else(|| "builtin catalog".to_string());

    match Catalog::from_config(&config.catalog) {
        Ok(catalog) if catalog.is_empty() => DoctorCheck {
            name: "catalog_load",
            status: CheckStatus::Fail,
            details: format!("{source} has no products"),
        },
        Ok(catalog) => DoctorCheck {
            name: "catalog_load",
            status: CheckStatus::Pass,
            details: format!("loaded {} products from {source}", catalog.len()),
        },
        Err(error) => {
            DoctorCheck { name: "catalog_load", status: CheckStatus::Fail, details: error.to_string() }
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
