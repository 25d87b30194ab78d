use std::fs;
use std::path::Path;

use pretty_assertions::assert_eq;
use tempfile::TempDir;
use ut_metadata::{MetadataError, ReassignPolicy, find_records, reassign_tree};

const DEPARTING: &str = "jdoe@gentoo.org";

fn record(maintainers: &[&str]) -> String {
    let mut text = String::from(
        "<?xml version='1.0' encoding='UTF-8'?>\n\
         <!DOCTYPE pkgmetadata SYSTEM \"https://www.gentoo.org/dtd/metadata.dtd\">\n\
         <pkgmetadata>\n",
    );
    for email in maintainers {
        text.push_str(&format!(
            "\t<maintainer type=\"person\">\n\t\t<email>{email}</email>\n\t</maintainer>\n"
        ));
    }
    text.push_str("</pkgmetadata>\n");
    text
}

fn write(root: &Path, package: &str, text: &str) {
    let dir = root.join(package);
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("metadata.xml"), text).unwrap();
}

fn read(root: &Path, package: &str) -> String {
    fs::read_to_string(root.join(package).join("metadata.xml")).unwrap()
}

fn policy() -> ReassignPolicy {
    ReassignPolicy::new("gentoo.org", "proxy-maint@gentoo.org")
}

fn fixture() -> TempDir {
    let dir = TempDir::new().unwrap();
    let root = dir.path();
    write(root, "dev-libs/orphan", &record(&[DEPARTING]));
    write(root, "dev-libs/shared", &record(&[DEPARTING, "other@gentoo.org"]));
    write(
        root,
        "app-misc/proxied",
        &record(&[DEPARTING, "user@example.com", "proxy-maint@gentoo.org"]),
    );
    write(
        root,
        "app-misc/sponsored",
        &record(&[DEPARTING, "proxy-maint@gentoo.org"]),
    );
    write(root, "app-misc/unrelated", &record(&["other@gentoo.org"]));
    // Not category/package depth; must be ignored.
    fs::write(root.join("metadata.xml"), record(&[DEPARTING])).unwrap();
    write(root, ".git/objects", &record(&[DEPARTING]));
    dir
}

#[test]
fn only_package_level_records_are_found() {
    let dir = fixture();
    let found: Vec<String> = find_records(dir.path())
        .unwrap()
        .iter()
        .map(|p| p.strip_prefix(dir.path()).unwrap().display().to_string())
        .collect();

    assert_eq!(
        found,
        vec![
            "app-misc/proxied/metadata.xml",
            "app-misc/sponsored/metadata.xml",
            "app-misc/unrelated/metadata.xml",
            "dev-libs/orphan/metadata.xml",
            "dev-libs/shared/metadata.xml",
        ]
    );
}

#[test]
fn tree_is_reassigned_and_reported() {
    let dir = fixture();
    let root = dir.path();
    let unrelated_before = read(root, "app-misc/unrelated");

    let report = reassign_tree(root, DEPARTING, &policy()).unwrap();

    assert_eq!(
        report.touched.iter().map(String::as_str).collect::<Vec<_>>(),
        vec!["app-misc/proxied", "app-misc/sponsored", "dev-libs/orphan", "dev-libs/shared"]
    );
    assert_eq!(
        report.summary_lines(),
        vec!["Packages up for grabs:", "app-misc/sponsored", "dev-libs/orphan"]
    );

    let proxied = read(root, "app-misc/proxied");
    assert!(proxied.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<!DOCTYPE"));
    assert!(!proxied.contains(DEPARTING));
    assert!(proxied.contains("proxy-maint@gentoo.org"));
    assert!(proxied.contains("<pkgmetadata>\n\t<maintainer type=\"person\">\n\t\t<email>user@example.com"));

    let sponsored = read(root, "app-misc/sponsored");
    assert!(!sponsored.contains("proxy-maint"));
    assert!(sponsored.contains("<pkgmetadata>\n\t<!-- maintainer-needed -->\n</pkgmetadata>\n"));

    let shared = read(root, "dev-libs/shared");
    assert!(!shared.contains(DEPARTING));
    assert!(shared.contains("other@gentoo.org"));
    assert!(!shared.contains("maintainer-needed"));

    assert_eq!(read(root, "app-misc/unrelated"), unrelated_before);
    assert!(fs::read_to_string(root.join("metadata.xml")).unwrap().contains(DEPARTING));
}

#[test]
fn second_run_changes_nothing() {
    let dir = fixture();
    reassign_tree(dir.path(), DEPARTING, &policy()).unwrap();
    let report = reassign_tree(dir.path(), DEPARTING, &policy()).unwrap();
    assert_eq!(report.summary_lines(), vec!["No packages reassigned"]);
}

#[test]
fn broken_record_names_the_file() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "dev-libs/broken", "<pkgmetadata><maintainer>");

    let err = reassign_tree(dir.path(), DEPARTING, &policy()).unwrap_err();
    assert!(matches!(err, MetadataError::Xml { .. }));
    assert!(err.to_string().contains("dev-libs/broken/metadata.xml"));
}
