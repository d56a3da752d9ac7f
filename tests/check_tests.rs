//! End-to-end checks: list file -> checker -> findings and reports

use std::path::PathBuf;

use yvc::config::IgnoreConfig;
use yvc::output::format_finding;
use yvc::{CheckReport, Checker, Config};

fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn fixture_checker(ignore: IgnoreConfig) -> Checker {
    let mut checker = Checker::new(ignore);
    checker.load_lists(&[fixture_path("vlist")]).unwrap();
    checker
}

#[test]
fn test_fixture_loads_every_well_formed_entry() {
    let checker = fixture_checker(IgnoreConfig::default());
    assert_eq!(checker.len(), 13);
}

#[test]
fn test_vulnerable_packages_are_found() {
    let checker = fixture_checker(IgnoreConfig::default());

    let vulnerable = [
        "cfengine-1.5.3nb2",
        "pine-4.21",
        "ap-php-4.0.4",
        "apache-2.0.32",
        "kdenetwork-3.0.4nb1",
        "mozilla-bin-1.7.9",
        "gnupg-devel-1.9.23",
        "dia-0.87",
        "acroread7-7.0.9",
        "php-5.0.8",
        "php-5.2.0",
        "python24-2.4nb3",
        "ruby18-base-1.8.6.111",
        "/usr/pkgsrc/packages/All/pine-4.20",
    ];
    for package in vulnerable {
        assert_eq!(
            checker.check_package(package).len(),
            1,
            "expected exactly one finding for {}",
            package
        );
    }
}

#[test]
fn test_safe_packages_are_not_reported() {
    let checker = fixture_checker(IgnoreConfig::default());

    let safe = [
        "cfengine-1.5.3nb3",
        "pine-4.22",
        "ap-php-4.0.5",
        "apache-2.0.40",
        "kdenetwork-3.0.4nb2",
        "mozilla-1.7.10",
        "gnupg-devel-1.9.22",
        "dialog-1.0.20050911",
        "acroread8-8.1.2",
        "php-4.4.9",
        "php-5.3.3",
        "python24-2.4nb4",
        "ruby18-base-1.8.6.114",
        "zsh-5.9",
        "cfengine",
    ];
    for package in safe {
        assert!(
            checker.check_package(package).is_empty(),
            "unexpected finding for {}",
            package
        );
    }
}

#[test]
fn test_ignore_rules_from_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join("config.toml");
    std::fs::write(
        &config_path,
        format!(
            "vlists = [{:?}]\n\n[ignore]\nseverities = [\"low\"]\ntypes = [\"buffer-overflow\"]\n",
            fixture_path("vlist").display().to_string()
        ),
    )
    .unwrap();

    let config = Config::load(Some(&config_path)).unwrap();
    let mut checker = Checker::new(config.ignore.clone());
    let loaded = checker.load_lists(&config.vlists).unwrap();

    assert_eq!(loaded, 11);
    assert!(checker.check_package("dia-0.87").is_empty());
    assert!(checker.check_package("gnupg-devel-1.9.23").is_empty());
    assert_eq!(checker.check_package("pine-4.21").len(), 1);
}

#[test]
fn test_report_over_many_packages() {
    let checker = fixture_checker(IgnoreConfig::default());
    let packages = vec![
        "pine-4.20".to_string(),
        "zsh-5.9".to_string(),
        "dia-0.90".to_string(),
        "pine-4.20".to_string(),
    ];

    let mut report = CheckReport::new();
    for findings in checker.check_all(&packages) {
        report.record(findings);
    }

    assert_eq!(report.packages_checked, 4);
    assert_eq!(report.findings.len(), 3);
    assert_eq!(report.vulnerable_packages(), 2);
    assert!(report.is_vulnerable());

    assert_eq!(
        format_finding(&report.findings[0]),
        "Package pine-4.20 has a remote-root-shell S1 vulnerability, see: \
         ftp://ftp.FreeBSD.org/pub/FreeBSD/CERT/advisories/FreeBSD-SA-00:59.pine.asc"
    );

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["packages_checked"], 4);
    assert_eq!(json["findings"][0]["package"], "pine-4.20");
    assert_eq!(json["findings"][0]["type"], "remote-root-shell");
    assert_eq!(json["findings"][0]["severity"], "S1");
    assert_eq!(json["findings"][1]["package"], "dia-0.90");
    assert_eq!(json["findings"][1]["severity"], "low");
}

#[test]
fn test_matches_is_usable_without_a_list() {
    assert!(yvc::matches("mozilla{,-bin,-gtk2,-gtk2-bin}<1.7.10", "mozilla-gtk2-1.7.9"));
    assert!(!yvc::matches("mozilla{,-bin,-gtk2,-gtk2-bin}<1.7.10", "mozilla-gtk2-1.7.10"));
    assert!(yvc::matches("foo-{1,2}.*", "foo-2.7"));
    assert!(!yvc::matches("foo>=1.0<", "foo-1.5"));
}
