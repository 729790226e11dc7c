//! Node.js setup script emitter.
//!
//! The emitted program has no dependencies beyond Node's standard modules.
//! The tree and the setup plan are embedded as JSON text passed to
//! `JSON.parse`, so every entry name (including `__proto__`) becomes an own
//! property. Running the script needs no network access except for the
//! install commands themselves.

use snapgen_core::{
    application::{ApplicationError, ports::ScriptEmitter},
    domain::Snapshot,
    error::SnapgenResult,
};
use tracing::instrument;

pub const DEFAULT_SCRIPT_NAME: &str = "setup-project.js";

/// Emits a standalone `node` program that recreates the snapshot.
#[derive(Debug, Clone, Copy, Default)]
pub struct NodeScriptEmitter;

impl NodeScriptEmitter {
    pub fn new() -> Self {
        Self
    }
}

impl ScriptEmitter for NodeScriptEmitter {
    #[instrument(skip_all)]
    fn emit(&self, snapshot: &Snapshot) -> SnapgenResult<String> {
        let tree = embedded_json(&snapshot.root)?;
        let plan = embedded_json(&snapshot.setup)?;

        let mut script = String::with_capacity(tree.len() + plan.len() + RUNTIME.len() + 512);
        script.push_str("#!/usr/bin/env node\n");
        script.push_str(&format!(
            "// Generated by {} at {}.\n",
            snapshot.generator,
            snapshot.generated_at.to_rfc3339()
        ));
        script.push_str("// Run this file with `node` inside an empty directory to recreate the project.\n");
        script.push_str("'use strict';\n\n");
        script.push_str("const fs = require('fs');\n");
        script.push_str("const path = require('path');\n");
        script.push_str("const { execSync } = require('child_process');\n\n");
        script.push_str("const projectStructure = JSON.parse(");
        script.push_str(&tree);
        script.push_str(");\n\n");
        script.push_str("const setupPlan = JSON.parse(");
        script.push_str(&plan);
        script.push_str(");\n");
        script.push_str(RUNTIME);

        Ok(script)
    }

    fn default_file_name(&self) -> &'static str {
        DEFAULT_SCRIPT_NAME
    }
}

/// Serialize `value` to JSON, then quote that text as a JS string literal.
fn embedded_json<T: serde::Serialize>(value: &T) -> SnapgenResult<String> {
    serde_json::to_string(value)
        .and_then(|text| serde_json::to_string(&text))
        .map_err(|e| {
            ApplicationError::EmissionFailed {
                reason: format!("failed to serialise snapshot: {e}"),
            }
            .into()
        })
}

/// Fixed part of the script: materialization and setup steps.
const RUNTIME: &str = r#"
function createStructure(basePath, structure) {
  for (const [name, content] of Object.entries(structure)) {
    const fullPath = path.join(basePath, name);

    if (typeof content === 'object' && content !== null) {
      if (!fs.existsSync(fullPath)) {
        fs.mkdirSync(fullPath, { recursive: true });
        console.log(`Created directory: ${fullPath}`);
      }
      createStructure(fullPath, content);
    } else {
      fs.writeFileSync(fullPath, content);
      console.log(`Created file: ${fullPath}`);
    }
  }
}

function resolveRelative(relative) {
  return path.join(process.cwd(), ...relative.split('/').filter(Boolean));
}

function conditionHolds(condition) {
  const target = resolveRelative(condition.path);
  if (!fs.existsSync(target)) {
    return false;
  }
  const stats = fs.statSync(target);
  return condition.kind === 'directory_exists' ? stats.isDirectory() : stats.isFile();
}

function printFallback() {
  if (setupPlan.fallback.length === 0) {
    return;
  }
  console.error('You can finish the setup manually:');
  for (const line of setupPlan.fallback) {
    console.error(line);
  }
}

function runStep(step) {
  console.log(`${step.description}...`);
  try {
    execSync(step.command, { cwd: resolveRelative(step.working_dir), stdio: 'inherit' });
  } catch (error) {
    console.error(`${step.description} failed:`, error.message);
    printFallback();
    process.exit(1);
  }
  console.log(`${step.description}: done`);
}

function main() {
  try {
    console.log('Creating project structure...');
    createStructure(process.cwd(), projectStructure);
    console.log('Project structure created.');
  } catch (err) {
    console.error('Failed to create the project:', err.message);
    process.exit(1);
  }

  for (const step of setupPlan.steps) {
    if (conditionHolds(step.when)) {
      runStep(step);
    }
  }

  console.log('\nAll done!');
  if (setupPlan.next_steps.length > 0) {
    console.log('Start the services with:');
    for (const line of setupPlan.next_steps) {
      console.log(line);
    }
  }
}

main();
"#;
