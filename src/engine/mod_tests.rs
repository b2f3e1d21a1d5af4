use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use super::*;
use crate::config::{Config, from_toml_str};
use crate::rule::{Debt, Entity, Issue, Rule, Severity};
use crate::ruleset::{RuleManager, RuleSet, RuleSetProvider, TestPattern};
use crate::syntax::{NodeKind, SyntaxNode};

/// Reports one finding per file.
struct OneFinding {
    issue: Issue,
}

impl OneFinding {
    fn arc(id: &str) -> Arc<dyn Rule> {
        Arc::new(Self {
            issue: Issue::new(id, Severity::Style, "one per file", Debt::FIVE_MINS),
        })
    }
}

impl Rule for OneFinding {
    fn issue(&self) -> &Issue {
        &self.issue
    }

    fn visit(&self, file: &SourceFile, ctx: &mut RuleContext) {
        ctx.report(Finding::new(&self.issue, Entity::from_file(file)));
    }
}

/// Reports once, then panics for file paths containing "broken".
struct PanicsAfterReport {
    issue: Issue,
}

impl PanicsAfterReport {
    fn arc() -> Arc<dyn Rule> {
        Arc::new(Self {
            issue: Issue::new(
                "PanicsAfterReport",
                Severity::Defect,
                "reports then fails",
                Debt::FIVE_MINS,
            ),
        })
    }
}

impl Rule for PanicsAfterReport {
    fn issue(&self) -> &Issue {
        &self.issue
    }

    fn visit(&self, file: &SourceFile, ctx: &mut RuleContext) {
        ctx.report(Finding::new(&self.issue, Entity::from_file(file)));
        if file.absolute_path().to_string_lossy().contains("broken") {
            panic!("rule blew up mid-visit");
        }
    }
}

struct FixedProvider {
    id: &'static str,
    rules: fn() -> Vec<Arc<dyn Rule>>,
}

impl RuleSetProvider for FixedProvider {
    fn build_rule_set(&self, _config: &Config) -> Option<RuleSet> {
        Some(RuleSet::new(self.id, (self.rules)()))
    }
}

/// Collects crash reports for assertions.
#[derive(Clone, Default)]
struct CollectingSink {
    crashes: Arc<Mutex<Vec<CrashReport>>>,
}

impl DiagnosticSink for CollectingSink {
    fn crash(&self, report: &CrashReport) {
        self.crashes.lock().unwrap().push(report.clone());
    }
}

#[derive(Clone, Default)]
struct CountingListener {
    started: Arc<AtomicUsize>,
    completed: Arc<AtomicUsize>,
    findings_seen: Arc<AtomicUsize>,
}

impl FileProcessListener for CountingListener {
    fn on_process(&self, _file: &SourceFile) {
        self.started.fetch_add(1, Ordering::SeqCst);
    }

    fn on_process_complete(&self, _file: &SourceFile, findings: &FindingsByRuleSet) {
        self.completed.fetch_add(1, Ordering::SeqCst);
        let count: usize = findings.values().map(Vec::len).sum();
        self.findings_seen.fetch_add(count, Ordering::SeqCst);
    }
}

fn file(path: &str) -> SourceFile {
    SourceFile::new(path, "", SyntaxNode::new(NodeKind::Block))
}

fn manager(providers: Vec<Box<dyn RuleSetProvider>>, config_toml: &str) -> RuleManager {
    let config = from_toml_str(config_toml).unwrap();
    let test_pattern = TestPattern::from_config(&config).unwrap();
    RuleManager::new(&providers, &config, test_pattern)
}

fn style_provider() -> Box<dyn RuleSetProvider> {
    Box::new(FixedProvider {
        id: "style",
        rules: || vec![OneFinding::arc("OneFinding")],
    })
}

const STYLE_ACTIVE: &str = "[style.OneFinding]\nactive = true";

#[test]
fn no_active_rules_yields_empty_report() {
    let engine = Engine::new(manager(vec![style_provider()], ""));

    let report = engine.run(&[file("/src/a.kt"), file("/src/b.kt")]);
    assert!(report.is_empty());
}

#[test]
fn one_finding_per_file_per_rule() {
    let engine = Engine::new(manager(vec![style_provider()], STYLE_ACTIVE));

    let report = engine.run(&[file("/src/a.kt"), file("/src/b.kt"), file("/src/c.kt")]);
    assert_eq!(report["style"].len(), 3);
}

#[test]
fn rules_of_one_set_append_in_rule_order_within_a_file() {
    let provider = Box::new(FixedProvider {
        id: "style",
        rules: || vec![OneFinding::arc("First"), OneFinding::arc("Second")],
    });
    let engine = Engine::new(manager(
        vec![provider],
        "[style.First]\nactive = true\n[style.Second]\nactive = true",
    ));

    let report = engine.run(&[file("/src/a.kt")]);
    let ids: Vec<&str> = report["style"].iter().map(|f| f.issue.id.as_str()).collect();
    assert_eq!(ids, vec!["First", "Second"]);
}

#[test]
fn excluded_rule_set_contributes_nothing_for_test_files() {
    let config = r#"
        [test-pattern]
        patterns = [".*/test/.*"]
        exclude-rule-sets = ["style"]

        [style.OneFinding]
        active = true
    "#;
    let engine = Engine::new(manager(vec![style_provider()], config));

    let report = engine.run(&[
        file("/project/src/main/Foo.kt"),
        file("/project/src/test/FooTest.kt"),
    ]);

    // Only the normal file contributes.
    assert_eq!(report["style"].len(), 1);
    assert_eq!(
        report["style"][0].entity.path.to_string_lossy(),
        "/project/src/main/Foo.kt"
    );
}

#[test]
fn failing_rule_discards_partial_findings_and_reports_one_crash() {
    let provider = Box::new(FixedProvider {
        id: "bugs",
        rules: || vec![PanicsAfterReport::arc()],
    });
    let sink = CollectingSink::default();
    let engine = Engine::new(manager(
        vec![provider],
        "[bugs.PanicsAfterReport]\nactive = true",
    ))
    .with_diagnostics(Box::new(sink.clone()));

    let report = engine.run(&[file("/src/broken.kt")]);

    // The rule reported once before panicking; the whole file's partial
    // results are discarded at the task boundary.
    assert!(report.get("bugs").is_none_or(Vec::is_empty));

    let crashes = sink.crashes.lock().unwrap();
    assert_eq!(crashes.len(), 1);
    assert_eq!(crashes[0].path.to_string_lossy(), "/src/broken.kt");
    assert!(crashes[0].cause.contains("rule blew up mid-visit"));
}

#[test]
fn failing_files_do_not_affect_succeeding_files() {
    let provider = Box::new(FixedProvider {
        id: "bugs",
        rules: || vec![PanicsAfterReport::arc()],
    });
    let sink = CollectingSink::default();
    let engine = Engine::new(manager(
        vec![provider],
        "[bugs.PanicsAfterReport]\nactive = true",
    ))
    .with_diagnostics(Box::new(sink.clone()));

    let files = vec![
        file("/src/a.kt"),
        file("/src/broken1.kt"),
        file("/src/b.kt"),
        file("/src/broken2.kt"),
        file("/src/c.kt"),
    ];
    let report = engine.run(&files);

    // 5 files, 2 engineered to fail: exactly 3 findings survive.
    assert_eq!(report["bugs"].len(), 3);
    assert_eq!(sink.crashes.lock().unwrap().len(), 2);
}

#[test]
fn listeners_are_invoked_once_per_file() {
    let listener = CountingListener::default();
    let engine = Engine::new(manager(vec![style_provider()], STYLE_ACTIVE))
        .with_listeners(vec![Box::new(listener.clone())]);

    let _ = engine.run(&[file("/src/a.kt"), file("/src/b.kt")]);

    assert_eq!(listener.started.load(Ordering::SeqCst), 2);
    assert_eq!(listener.completed.load(Ordering::SeqCst), 2);
    // on_process_complete saw each file's one finding.
    assert_eq!(listener.findings_seen.load(Ordering::SeqCst), 2);
}

#[test]
fn runs_on_an_explicit_thread_pool() {
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(2)
        .build()
        .unwrap();
    let engine = Engine::new(manager(vec![style_provider()], STYLE_ACTIVE)).with_thread_pool(pool);

    let files: Vec<SourceFile> = (0..16).map(|i| file(&format!("/src/f{i}.kt"))).collect();
    let report = engine.run(&files);

    assert_eq!(report["style"].len(), 16);
}

#[test]
fn progress_listener_counts_completed_files() {
    let progress = ProgressListener::new(2, true);
    let engine = Engine::new(manager(vec![style_provider()], STYLE_ACTIVE))
        .with_listeners(vec![Box::new(progress.clone())]);

    let _ = engine.run(&[file("/src/a.kt"), file("/src/b.kt")]);
    progress.finish();

    assert_eq!(progress.completed(), 2);
}
