//! Generates the built-in routing table from `config/routing.toml`.
//!
//! The TOML file is validated here so that the crate never has to parse or
//! reject its own defaults at runtime. The checks mirror
//! `RoutingConfig::validate` in `src/config.rs`; keep the two in step.

use std::collections::HashSet;
use std::env;
use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use toml::{Table, Value};

const CONFIG_PATH: &str = "config/routing.toml";

fn main() {
    println!("cargo:rerun-if-changed={CONFIG_PATH}");

    let raw = fs::read_to_string(CONFIG_PATH)
        .unwrap_or_else(|e| panic!("cannot read {CONFIG_PATH}: {e}"));
    let table: Table = raw
        .parse()
        .unwrap_or_else(|e| panic!("invalid TOML in {CONFIG_PATH}: {e}"));

    let mut out = String::new();
    out.push_str("// @generated by build.rs from config/routing.toml\n\n");
    out.push_str("pub(crate) fn builtin_routing() -> RoutingConfig {\n");
    out.push_str("    RoutingConfig {\n");

    // Category rules
    out.push_str("        categories: vec![\n");
    let mut seen = HashSet::new();
    for entry in array_of_tables(&table, "category") {
        let keys = string_list(entry, "keys", "category");
        for key in &keys {
            let normalized = key.trim().to_lowercase();
            if normalized.is_empty() {
                panic!("{CONFIG_PATH}: empty category key");
            }
            if !seen.insert(normalized.clone()) {
                panic!("{CONFIG_PATH}: duplicate category key '{normalized}'");
            }
        }
        writeln!(
            out,
            "            CategoryRuleConfig {{ keys: {}, department: {}, priority: {}, reason: String::from({:?}) }},",
            vec_literal(&keys),
            department_path(string_field(entry, "department", "category")),
            priority_path(string_field(entry, "priority", "category")),
            string_field(entry, "reason", "category"),
        )
        .unwrap();
    }
    out.push_str("        ],\n");

    // Keyword groups
    out.push_str("        keyword_groups: vec![\n");
    for (index, entry) in array_of_tables(&table, "keyword_group").iter().enumerate() {
        let keywords = string_list(entry, "keywords", "keyword_group");
        if keywords.iter().all(|k| k.trim().is_empty()) {
            panic!("{CONFIG_PATH}: keyword_group #{index} has no keywords");
        }
        writeln!(
            out,
            "            KeywordGroupConfig {{ department: {}, priority: {}, reason: String::from({:?}), keywords: {} }},",
            department_path(string_field(entry, "department", "keyword_group")),
            priority_path(string_field(entry, "priority", "keyword_group")),
            string_field(entry, "reason", "keyword_group"),
            vec_literal(&keywords),
        )
        .unwrap();
    }
    out.push_str("        ],\n");

    // Geographic families
    out.push_str("        geographic_rules: vec![\n");
    for entry in array_of_tables(&table, "geographic_rule") {
        let name = string_field(entry, "name", "geographic_rule");
        let markers = string_list(entry, "markers", "geographic_rule");
        if markers.is_empty() || markers.iter().any(|m| m.trim().is_empty()) {
            panic!("{CONFIG_PATH}: geographic_rule '{name}' has an empty marker");
        }
        writeln!(
            out,
            "            GeographicRuleConfig {{ name: String::from({:?}), markers: {}, priority: {}, urban_reason: String::from({:?}), rural_reason: String::from({:?}) }},",
            name,
            vec_literal(&markers),
            priority_path(string_field(entry, "priority", "geographic_rule")),
            string_field(entry, "urban_reason", "geographic_rule"),
            string_field(entry, "rural_reason", "geographic_rule"),
        )
        .unwrap();
    }
    out.push_str("        ],\n");

    // Localities
    let localities = table
        .get("localities")
        .and_then(Value::as_table)
        .unwrap_or_else(|| panic!("{CONFIG_PATH}: missing [localities]"));
    writeln!(
        out,
        "        localities: LocalityConfig {{ urban: {}, rural: {} }},",
        vec_literal(&string_list(localities, "urban", "localities")),
        vec_literal(&string_list(localities, "rural", "localities")),
    )
    .unwrap();

    out.push_str("    }\n}\n");

    let out_dir = env::var("OUT_DIR").expect("OUT_DIR is set by cargo");
    let dest = Path::new(&out_dir).join("routing_tables.rs");
    fs::write(&dest, out).unwrap_or_else(|e| panic!("cannot write {}: {e}", dest.display()));
}

fn array_of_tables<'a>(table: &'a Table, key: &str) -> Vec<&'a Table> {
    match table.get(key) {
        None => Vec::new(),
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| {
                item.as_table()
                    .unwrap_or_else(|| panic!("{CONFIG_PATH}: [[{key}]] entries must be tables"))
            })
            .collect(),
        Some(_) => panic!("{CONFIG_PATH}: '{key}' must be an array of tables"),
    }
}

fn string_field<'a>(table: &'a Table, key: &str, section: &str) -> &'a str {
    table
        .get(key)
        .and_then(Value::as_str)
        .unwrap_or_else(|| panic!("{CONFIG_PATH}: [{section}] missing string field '{key}'"))
}

fn string_list(table: &Table, key: &str, section: &str) -> Vec<String> {
    table
        .get(key)
        .and_then(Value::as_array)
        .unwrap_or_else(|| panic!("{CONFIG_PATH}: [{section}] missing list field '{key}'"))
        .iter()
        .map(|v| {
            v.as_str()
                .map(str::to_string)
                .unwrap_or_else(|| panic!("{CONFIG_PATH}: [{section}] '{key}' must hold strings"))
        })
        .collect()
}

fn vec_literal(items: &[String]) -> String {
    let parts: Vec<String> = items
        .iter()
        .map(|s| format!("String::from({s:?})"))
        .collect();
    format!("vec![{}]", parts.join(", "))
}

fn department_path(raw: &str) -> &'static str {
    match raw {
        "cdp" => "Department::DataProtectionAuthority",
        "dsc" => "Department::CybercrimeDivision",
        "police" => "Department::Police",
        "gendarmerie" => "Department::Gendarmerie",
        other => panic!("{CONFIG_PATH}: unknown department '{other}'"),
    }
}

fn priority_path(raw: &str) -> &'static str {
    match raw {
        "low" => "Priority::Low",
        "medium" => "Priority::Medium",
        "high" => "Priority::High",
        "urgent" => "Priority::Urgent",
        other => panic!("{CONFIG_PATH}: unknown priority '{other}'"),
    }
}
