//! Optional metadata lint run over reassigned packages.

use std::collections::BTreeSet;
use std::path::Path;

use ut_core::process::{CommandRunner, Invocation, ProcessError};

use crate::error::MetadataError;

/// `pkgcheck scan -c PackageMetadataXmlCheck <packages>` in `root`.
#[must_use]
pub fn lint_invocation(root: &Path, packages: &BTreeSet<String>) -> Invocation {
    Invocation::new("pkgcheck")
        .args(["scan", "-c", "PackageMetadataXmlCheck"])
        .args(packages.iter().cloned())
        .current_dir(root)
        .inherit_stdout()
}

/// Lint `packages`. Findings are printed by pkgcheck itself; a non-zero
/// exit is logged and reported as `false`. Nothing runs for an empty set.
///
/// # Errors
///
/// Returns [`MetadataError::Lint`] if pkgcheck cannot be started.
pub fn run_linter(
    runner: &dyn CommandRunner,
    root: &Path,
    packages: &BTreeSet<String>,
) -> Result<bool, MetadataError> {
    if packages.is_empty() {
        return Ok(true);
    }
    match runner.run(&lint_invocation(root, packages)) {
        Ok(_) => Ok(true),
        Err(ProcessError::Failed { command, code }) => {
            tracing::warn!(%command, ?code, "pkgcheck reported problems");
            Ok(false)
        }
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use ut_core::process::ScriptedRunner;

    fn packages() -> BTreeSet<String> {
        ["dev-libs/b", "app-misc/a"].map(String::from).into()
    }

    #[test]
    fn packages_are_passed_sorted_from_repo_root() {
        let runner = ScriptedRunner::new();
        assert!(run_linter(&runner, Path::new("/repo"), &packages()).unwrap());

        let calls = runner.calls();
        assert_eq!(
            calls[0].to_string(),
            "pkgcheck scan -c PackageMetadataXmlCheck app-misc/a dev-libs/b"
        );
        assert_eq!(calls[0].current_dir.as_deref(), Some(Path::new("/repo")));
    }

    #[test]
    fn lint_failure_is_not_fatal() {
        let runner = ScriptedRunner::new().fail(1);
        assert!(!run_linter(&runner, Path::new("/repo"), &packages()).unwrap());
    }

    #[test]
    fn nothing_to_lint() {
        let runner = ScriptedRunner::new();
        assert!(run_linter(&runner, Path::new("/repo"), &BTreeSet::new()).unwrap());
        assert!(runner.calls().is_empty());
    }
}
