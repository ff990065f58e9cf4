// tests/pipeline_test.rs
use git_release_notes::analyzer::ChangelogAnalyzer;
use git_release_notes::boundary::BoundaryWarning;
use git_release_notes::changelog::{render_changelog, Links, ReleaseNotes};
use git_release_notes::cli::{run_release_notes, ReleaseNotesArgs, WorkflowResult};
use git_release_notes::config::Config;
use git_release_notes::domain::{VersionType, CATEGORIES};
use git_release_notes::git::{MockRepository, RemoteCoordinates};
use semver::Version;

fn coordinates() -> RemoteCoordinates {
    RemoteCoordinates::new("acme", "widgets")
}

fn history() -> MockRepository {
    let mut repo = MockRepository::new();
    repo.commit("0000000000000000", "chore: bootstrap", Some("dev"));
    repo.add_tag("v1.4.2", "0000000000000000");
    repo.commit("1111111111111111", "fix(core): Correct Thing (#3)", Some("alice"))
        .commit("2222222222222222", "feat: JIRA-7 add thing", None)
        .commit("3333333333333333", "2.1.0 release prep", Some("bob"))
        .commit("4444444444444444", "wat is this", Some("bob"))
        .commit(
            "5555555555555555",
            "Merge PR (#8)\n\n* feat: add X\n* fix: bug Y\n",
            Some("carol"),
        );
    repo
}

fn run(repo: &MockRepository, args: ReleaseNotesArgs, config: Config) -> WorkflowResult {
    run_release_notes(repo, &args, &config, &coordinates()).expect("workflow should succeed")
}

#[test]
fn test_end_to_end_markdown() {
    let result = run(&history(), ReleaseNotesArgs::default(), Config::default());

    let expected = "\
**:bookmark: Release**
- 2.1.0 release prep - [33333333](https://github.com/acme/widgets/commit/3333333333333333) ([@bob](https://github.com/bob))

**:sparkles: Features**
- JIRA-7 add thing - [22222222](https://github.com/acme/widgets/commit/2222222222222222)
- Add X - [55555555](https://github.com/acme/widgets/commit/5555555555555555) ([@carol](https://github.com/carol))

**:bug: Fixes**
- Correct Thing (#3) - [11111111](https://github.com/acme/widgets/commit/1111111111111111) ([@alice](https://github.com/alice))
- Bug Y - [55555555](https://github.com/acme/widgets/commit/5555555555555555) ([@carol](https://github.com/carol))

**:link: Others**
- Wat is this - [44444444](https://github.com/acme/widgets/commit/4444444444444444) ([@bob](https://github.com/bob))
- Merge PR (#8) - [55555555](https://github.com/acme/widgets/commit/5555555555555555) ([@carol](https://github.com/carol))";

    assert_eq!(result.notes.changes, expected);
    assert_eq!(result.notes.next_version_type, VersionType::Minor);
    assert_eq!(result.next_version, Version::new(1, 5, 0));
    assert_eq!(result.next_tag, "v1.5.0");
    assert_eq!(result.base, "v1.4.2");
    assert_eq!(result.head, "HEAD");
}

#[test]
fn test_change_shas_follow_render_order() {
    let result = run(&history(), ReleaseNotesArgs::default(), Config::default());
    assert_eq!(
        result.notes.change_shas,
        vec![
            "3333333333333333",
            "2222222222222222",
            "5555555555555555",
            "1111111111111111",
            "5555555555555555",
            "4444444444444444",
            "5555555555555555",
        ]
    );
}

#[test]
fn test_references_and_links() {
    let result = run(&history(), ReleaseNotesArgs::default(), Config::default());
    assert_eq!(result.notes.pull_request_ids, vec!["3", "8"]);
    assert_eq!(result.notes.task_ids, vec!["JIRA-7"]);
    assert_eq!(
        result.notes.tasks,
        "[JIRA-7](https://acme.atlassian.net/browse/JIRA-7)"
    );
    assert_eq!(
        result.notes.pull_requests,
        "[#3](https://github.com/acme/widgets/pull/3), [#8](https://github.com/acme/widgets/pull/8)"
    );
}

#[test]
fn test_custom_task_prefix_and_base_url() {
    let mut repo = MockRepository::new();
    repo.commit("a", "fix: TASK-1 and JIRA-2", None);
    let config = Config {
        task_prefix: "TASK-".to_string(),
        task_base_url: Some("https://tracker.example/issues".to_string()),
        ..Config::default()
    };

    let result = run(&repo, ReleaseNotesArgs::default(), config);
    assert_eq!(result.notes.task_ids, vec!["TASK-1"]);
    assert_eq!(
        result.notes.tasks,
        "[TASK-1](https://tracker.example/issues/TASK-1)"
    );
}

#[test]
fn test_totality_every_flat_commit_in_one_bucket() {
    let repo = history();
    let commits = git_release_notes::git::CommitSource::commits_between(&repo, "v1.4.2", "HEAD")
        .unwrap();
    let flat: usize = commits.iter().map(|c| c.normalize().len()).sum();

    let analysis = ChangelogAnalyzer::new("JIRA-", None).unwrap().analyze(&commits);
    assert_eq!(analysis.classified(), flat);
    assert_eq!(analysis.buckets.iter().count(), CATEGORIES.len());
}

#[test]
fn test_analyze_range_uses_source() {
    let analysis = ChangelogAnalyzer::new("JIRA-", None)
        .unwrap()
        .analyze_range(&history(), "v1.4.2", "3333333333333333")
        .unwrap();
    assert_eq!(analysis.buckets.count("fix"), 1);
    assert_eq!(analysis.buckets.count("feat"), 1);
    assert_eq!(analysis.buckets.count("release"), 1);
}

#[test]
fn test_rendering_is_idempotent() {
    let analysis = ChangelogAnalyzer::new("JIRA-", None)
        .unwrap()
        .analyze_range(&history(), "v1.4.2", "HEAD")
        .unwrap();
    assert_eq!(render_changelog(&analysis.buckets), render_changelog(&analysis.buckets));

    let links = Links::new("https://github.com", "acme", "widgets", None);
    assert_eq!(
        ReleaseNotes::from_analysis(&analysis, &links, false),
        ReleaseNotes::from_analysis(&analysis, &links, false)
    );
}

#[test]
fn test_major_marker_forces_major() {
    let mut repo = history();
    repo.commit("6666666666666666", "fix: drop legacy endpoints #MAJOR", None);

    let result = run(&repo, ReleaseNotesArgs::default(), Config::default());
    assert_eq!(result.notes.next_version_type, VersionType::Major);
    assert_eq!(result.next_tag, "v2.0.0");
}

#[test]
fn test_fix_only_is_patch() {
    let mut repo = MockRepository::new();
    repo.commit("root", "initial import", None)
        .commit("a", "fix: one", None)
        .commit("b", "docs: two", None);
    let config = Config {
        base_ref: "root".to_string(),
        ..Config::default()
    };

    let result = run(&repo, ReleaseNotesArgs::default(), config);
    assert_eq!(result.notes.next_version_type, VersionType::Patch);
    // no release tag yet
    assert_eq!(result.next_tag, "v0.1.0");
    assert_eq!(result.base, "root");
    assert!(result.warnings.contains(&BoundaryWarning::NoReleaseTag {
        prefix: "v".to_string(),
        fallback: "root".to_string(),
    }));
}

#[test]
fn test_prerelease_is_caller_forced() {
    let args = ReleaseNotesArgs {
        prerelease: true,
        ..ReleaseNotesArgs::default()
    };
    let result = run(&history(), args, Config::default());
    assert_eq!(result.notes.next_version_type, VersionType::Prerelease);
    assert_eq!(result.next_tag, "v1.4.3-rc.0");
}

#[test]
fn test_explicit_release_tag_as_head() {
    let mut repo = history();
    repo.add_tag("v3.0.0", "4444444444444444");
    let args = ReleaseNotesArgs {
        base: Some("v1.4.2".to_string()),
        head: Some("v3.0.0".to_string()),
        prerelease: false,
    };

    let result = run(&repo, args, Config::default());
    assert_eq!(result.next_tag, "v3.0.0");
    assert_eq!(result.notes.change_shas.len(), 4);
}

#[test]
fn test_scope_filter_via_app() {
    let mut repo = MockRepository::new();
    repo.commit("a", "init", None);
    repo.add_tag("api@1.0.0", "a");
    repo.commit("b", "feat(ui): x", None)
        .commit("c", "feat(api): y", None)
        .commit("d", "fix(api): z", None);
    let config = Config {
        app: Some("api".to_string()),
        ..Config::default()
    };

    let result = run(&repo, ReleaseNotesArgs::default(), config);
    assert_eq!(result.base, "api@1.0.0");
    assert_eq!(result.next_tag, "api@1.1.0");
    assert!(result.notes.changes.contains("- Y - [c]"));
    assert!(result.notes.changes.contains("- Z - [d]"));
    assert!(!result.notes.changes.contains("- X"));
}

#[test]
fn test_scope_excluding_everything() {
    let mut repo = MockRepository::new();
    repo.commit("a", "feat(ui): x", None).commit("b", "fix: y", None);
    let config = Config {
        commit_scope: Some("api".to_string()),
        ..Config::default()
    };
    let args = ReleaseNotesArgs {
        base: Some(String::new()),
        ..ReleaseNotesArgs::default()
    };

    let result = run(&repo, args, config);
    assert_eq!(result.notes.changes, "");
    assert_eq!(result.notes.next_version_type, VersionType::Patch);
    assert!(result.warnings.contains(&BoundaryWarning::ScopeExcludedAll {
        scope: "api".to_string(),
        skipped: 2,
    }));
}

#[test]
fn test_empty_range() {
    let args = ReleaseNotesArgs {
        base: Some("5555555555555555".to_string()),
        ..ReleaseNotesArgs::default()
    };
    let result = run(&history(), args, Config::default());

    assert_eq!(result.notes.changes, "");
    assert_eq!(result.notes.tasks, "");
    assert_eq!(result.notes.pull_requests, "");
    assert_eq!(result.notes.next_version_type, VersionType::Patch);
    assert!(matches!(
        result.warnings.as_slice(),
        [BoundaryWarning::NoCommits { .. }]
    ));
}

#[test]
fn test_source_failure_propagates() {
    let args = ReleaseNotesArgs {
        base: Some("missing".to_string()),
        ..ReleaseNotesArgs::default()
    };
    let err = run_release_notes(&history(), &args, &Config::default(), &coordinates()).unwrap_err();
    assert!(err.to_string().contains("missing"));
}

#[test]
fn test_unparsable_release_tag_is_reported() {
    let mut repo = MockRepository::new();
    repo.commit("a", "fix: x", None).commit("b", "fix: y", None);
    repo.add_tag("vnext", "a");

    let args = ReleaseNotesArgs {
        base: Some("a".to_string()),
        ..ReleaseNotesArgs::default()
    };
    let result = run(&repo, args, Config::default());
    assert!(result
        .warnings
        .iter()
        .any(|w| matches!(w, BoundaryWarning::UnparsableTag { tag, .. } if tag == "vnext")));
}

#[test]
fn test_major_marker_in_crlf_message() {
    let mut repo = history();
    repo.commit("6666666666666666", "feat: new api #MAJOR\r\n\r\nbody", None);

    let result = run(&repo, ReleaseNotesArgs::default(), Config::default());
    assert_eq!(result.notes.next_version_type, VersionType::Major);
    assert_eq!(result.next_tag, "v2.0.0");
}

#[test]
fn test_non_ascii_text_is_left_alone() {
    let mut repo = MockRepository::new();
    repo.commit("root", "initial import", None)
        .commit("a", "日本語: テスト (#١٢)", None);
    let args = ReleaseNotesArgs {
        base: Some("root".to_string()),
        ..ReleaseNotesArgs::default()
    };

    let result = run(&repo, args, Config::default());
    assert_eq!(
        result.notes.changes,
        "**:link: Others**\n- 日本語: テスト (#١٢) - [a](https://github.com/acme/widgets/commit/a)"
    );
    assert!(result.notes.pull_request_ids.is_empty());
}
