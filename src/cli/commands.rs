use std::sync::Arc;

use crate::cli::config::{AppConfig, SourceArgs};
use crate::descriptor::error::DescriptorError;
use crate::descriptor::tree::{CatalogEntry, DescriptorTree, FieldShape};
use crate::driver::memory::MemoryDriver;
use crate::driver::session::ProcessDriver;
use crate::driver::snapshot::ElementSnapshot;
use crate::driver::Driver;
use crate::path::identifier::Identifier;
use crate::path::type_name::TypeName;
use crate::report::console::format_console_report;
use crate::report::junit::generate_junit_xml;
use crate::report::report_model::TestSuiteReport;
use crate::spec::runner::TestRunner;
use crate::spec::spec_model::TestSpec;
use crate::trace::logger::TraceLogger;

// ============================================================================
// keys subcommand
// ============================================================================

pub fn cmd_keys(descriptors: &str, root: Option<&str>, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let tree = load_descriptors(descriptors)?;
    let root = match root {
        Some(name) => TypeName::parse(name),
        None => tree.root().cloned().ok_or(DescriptorError::MissingRoot)?,
    };

    let entries = tree.catalog(&root)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
    } else {
        print!("{}", format_catalog(&root, &entries));
    }
    Ok(())
}

/// One line per addressable node: accessor, type, then the identifiers a
/// lookup accepts (`prefix` marks list prefixes).
pub fn format_catalog(root: &TypeName, entries: &[CatalogEntry]) -> String {
    let mut out = format!("{}\n", root);
    let width = entries.iter().map(|e| e.accessor.len()).max().unwrap_or(0);

    for entry in entries {
        let ids: Vec<&str> = entry.identifiers.iter().map(Identifier::as_str).collect();
        let ids = match (entry.shape, ids.is_empty()) {
            (_, true) => "(group)".to_string(),
            (FieldShape::List, false) => format!("prefix {}", ids.join(" | ")),
            (FieldShape::Single, false) => ids.join(" | "),
        };
        out.push_str(&format!(
            "  {:width$}  {:<24}  {}\n",
            entry.accessor,
            entry.type_name.display_name(),
            ids,
            width = width
        ));
    }
    out
}

// ============================================================================
// inspect subcommand
// ============================================================================

pub fn cmd_inspect(source: &SourceArgs, config: &AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    let driver = build_driver(source, config)?;
    let tree = driver.snapshot()?;
    print!("{}", tree.debug_tree());

    let mut ids = Vec::new();
    collect_identifiers(&tree, &mut ids);
    if !ids.is_empty() {
        println!("\nIdentifiers:");
        for id in ids {
            let id = Identifier::new(id);
            match id.split() {
                (base, Some(item)) => println!("  {}  [item {}]", base, item),
                (base, None) => println!("  {}", base),
            }
        }
    }
    Ok(())
}

fn collect_identifiers(node: &ElementSnapshot, out: &mut Vec<String>) {
    if let Some(id) = &node.identifier {
        out.push(id.clone());
    }
    for child in &node.children {
        collect_identifiers(child, out);
    }
}

// ============================================================================
// run subcommand
// ============================================================================

/// Run test specs and return whether all passed.
pub fn cmd_run(
    descriptors: &str,
    spec_path: &str,
    source: &SourceArgs,
    format: &str,
    output: Option<&str>,
    config: &AppConfig,
) -> Result<bool, Box<dyn std::error::Error>> {
    let tree = load_descriptors(descriptors)?;
    let specs = load_specs(spec_path)?;

    if specs.is_empty() {
        tracing::warn!(path = spec_path, "no test specs found");
        return Ok(true);
    }

    tracing::info!(count = specs.len(), "running test specs");

    let driver = build_driver(source, config)?;
    let mut runner = TestRunner::new(&tree, driver)
        .with_options(config.wait.options())
        .stop_on_failure(config.wait.fail_fast);
    if let Some(path) = &config.trace.path {
        runner = runner.with_trace(Arc::new(TraceLogger::new(path)));
    }

    let start = std::time::Instant::now();
    let results: Vec<_> = specs
        .iter()
        .map(|spec| {
            tracing::info!(spec = %spec.name, "running");
            runner.run(spec)
        })
        .collect();
    let duration = start.elapsed().as_millis();

    let report = TestSuiteReport::from_results("screen-keys run", results).with_duration(duration);
    let all_passed = report.all_passed();

    let output_content = match format {
        "junit" => generate_junit_xml(&report),
        _ => format_console_report(&report),
    };

    match output {
        Some(path) => std::fs::write(path, &output_content)?,
        None => print!("{}", output_content),
    }

    Ok(all_passed)
}

/// Load test specs from a single YAML file or a directory of YAML files.
pub fn load_specs(path: &str) -> Result<Vec<TestSpec>, Box<dyn std::error::Error>> {
    let metadata = std::fs::metadata(path)?;
    if metadata.is_dir() {
        let mut specs = Vec::new();
        for entry in std::fs::read_dir(path)? {
            let p = entry?.path();
            if p.extension().is_some_and(|e| e == "yaml" || e == "yml") {
                let content = std::fs::read_to_string(&p)?;
                let spec: TestSpec = serde_yaml::from_str(&content)?;
                specs.push(spec);
            }
        }
        // Sort by name for deterministic order
        specs.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(specs)
    } else {
        let content = std::fs::read_to_string(path)?;
        let spec: TestSpec = serde_yaml::from_str(&content)?;
        Ok(vec![spec])
    }
}

// ============================================================================
// Helpers
// ============================================================================

pub fn load_descriptors(path: &str) -> Result<DescriptorTree, Box<dyn std::error::Error>> {
    let content = std::fs::read_to_string(path)?;
    Ok(DescriptorTree::from_yaml(&content)?)
}

/// Driver for `source`: a recorded snapshot, the bridge given on the command
/// line, or the bridge from the config file.
pub fn build_driver(source: &SourceArgs, config: &AppConfig) -> Result<Arc<dyn Driver>, Box<dyn std::error::Error>> {
    if let Some(path) = &source.snapshot {
        let content = std::fs::read_to_string(path)?;
        let tree: ElementSnapshot = serde_json::from_str(&content)?;
        return Ok(Arc::new(MemoryDriver::new(tree)));
    }

    let (command, args) = match (&source.bridge, &config.bridge.command) {
        (Some(command), _) => (command.clone(), Vec::new()),
        (None, Some(command)) => (command.clone(), config.bridge.args.clone()),
        (None, None) => return Err("no element source: pass --snapshot or --bridge, or set bridge.command".into()),
    };

    Ok(Arc::new(ProcessDriver::launch(&command, &args)?))
}

/// Resolve the default wait timeout: CLI flag over config.
pub fn apply_timeout(config: &mut AppConfig, timeout: Option<f64>) {
    if let Some(secs) = timeout {
        config.wait.timeout_secs = secs.max(0.0);
    }
}
