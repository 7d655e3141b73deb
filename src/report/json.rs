//! Machine-readable renderer
//!
//! The only format intended for programmatic re-consumption: a flat list
//! of result records serialized verbatim. Field names are stable across
//! versions (`check_id`, `check_name`, `category`, `status`, `message`,
//! `result_key`, `recommendations`, `detail`, `execution_time`,
//! `metadata`).

use crate::error::AuditResult;
use crate::models::CheckResult;

pub fn render(results: &[CheckResult]) -> AuditResult<String> {
    let mut out = serde_json::to_string_pretty(results)?;
    out.push('\n');
    Ok(out)
}
