mod diagnostics;
mod listener;

pub use diagnostics::{CrashReport, DiagnosticSink, StderrDiagnostics};
pub use listener::{FileProcessListener, ProgressListener};

use std::any::Any;
use std::panic::AssertUnwindSafe;

use indexmap::IndexMap;
use rayon::prelude::*;

use crate::rule::{Finding, RuleContext};
use crate::ruleset::RuleManager;
use crate::syntax::SourceFile;

/// The merged report: rule-set id → ordered finding list.
///
/// Within one file, findings follow rule-visit order; across files, lists
/// are concatenated in input order regardless of which task finished first.
pub type FindingsByRuleSet = IndexMap<String, Vec<Finding>>;

/// Runs the applicable rule list against every input file, in parallel,
/// and merges the per-file results into one report.
///
/// The engine is scoped to exactly one analysis run over one fixed file
/// set: rule lists and configuration are resolved once at construction and
/// shared read-only across all concurrent file tasks.
pub struct Engine {
    rule_manager: RuleManager,
    listeners: Vec<Box<dyn FileProcessListener>>,
    diagnostics: Box<dyn DiagnosticSink>,
    thread_pool: Option<rayon::ThreadPool>,
}

impl Engine {
    #[must_use]
    pub fn new(rule_manager: RuleManager) -> Self {
        Self {
            rule_manager,
            listeners: Vec::new(),
            diagnostics: Box::new(StderrDiagnostics),
            thread_pool: None,
        }
    }

    #[must_use]
    pub fn with_listeners(mut self, listeners: Vec<Box<dyn FileProcessListener>>) -> Self {
        self.listeners = listeners;
        self
    }

    #[must_use]
    pub fn with_diagnostics(mut self, diagnostics: Box<dyn DiagnosticSink>) -> Self {
        self.diagnostics = diagnostics;
        self
    }

    /// Uses an explicit worker pool instead of the global one.
    #[must_use]
    pub fn with_thread_pool(mut self, pool: rayon::ThreadPool) -> Self {
        self.thread_pool = Some(pool);
        self
    }

    /// Analyzes the whole batch and returns the merged report.
    ///
    /// This is a collect-all barrier: every file task runs to completion
    /// (success or caught failure) before any result is observable. A file
    /// whose analysis fails contributes an empty finding map after its crash
    /// report is written to the diagnostic sink; the run itself never aborts.
    #[must_use]
    pub fn run(&self, files: &[SourceFile]) -> FindingsByRuleSet {
        match &self.thread_pool {
            Some(pool) => pool.install(|| self.run_batch(files)),
            None => self.run_batch(files),
        }
    }

    fn run_batch(&self, files: &[SourceFile]) -> FindingsByRuleSet {
        let outcomes: Vec<_> = files
            .par_iter()
            .map(|file| self.analyze_guarded(file))
            .collect();

        // Merge reducer over explicit per-file outcomes: failures map to the
        // empty-findings case deterministically.
        let mut report = FindingsByRuleSet::new();
        for outcome in outcomes {
            match outcome {
                Ok(file_findings) => merge_findings(&mut report, file_findings),
                Err(crash) => self.diagnostics.crash(&crash),
            }
        }
        report
    }

    /// Isolates one file's analysis at the task boundary.
    ///
    /// A rule-level panic is not isolated below the file level: it discards
    /// all findings already collected for this file, not just its own.
    fn analyze_guarded(&self, file: &SourceFile) -> Result<FindingsByRuleSet, CrashReport> {
        std::panic::catch_unwind(AssertUnwindSafe(|| self.analyze_file(file)))
            .map_err(|payload| CrashReport::new(file.absolute_path(), panic_cause(&*payload)))
    }

    fn analyze_file(&self, file: &SourceFile) -> FindingsByRuleSet {
        for listener in &self.listeners {
            listener.on_process(file);
        }

        let mut file_findings = FindingsByRuleSet::new();
        for rule in self.rule_manager.applicable_rules(file) {
            let mut ctx = RuleContext::new();
            rule.visit(file, &mut ctx);
            let rule_set_id = self.rule_manager.rule_set_for_rule_id(rule.id());
            file_findings
                .entry(rule_set_id.to_owned())
                .or_default()
                .extend(ctx.into_findings());
        }

        for listener in &self.listeners {
            listener.on_process_complete(file, &file_findings);
        }
        file_findings
    }
}

fn merge_findings(report: &mut FindingsByRuleSet, file_findings: FindingsByRuleSet) {
    for (rule_set_id, findings) in file_findings {
        report.entry(rule_set_id).or_default().extend(findings);
    }
}

fn panic_cause(payload: &(dyn Any + Send)) -> String {
    payload.downcast_ref::<&str>().map_or_else(
        || {
            payload
                .downcast_ref::<String>()
                .cloned()
                .unwrap_or_else(|| "unknown panic payload".to_string())
        },
        ToString::to_string,
    )
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
