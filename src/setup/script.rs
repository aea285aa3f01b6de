//! Setup-script and help-banner generation.
//!
//! Renders the templates with the enumerated substitution table and writes
//! the results into the scratch directory, marking the setup script
//! executable so makeself can run it as the archive entry point.

use std::path::{Path, PathBuf};

use handlebars::Handlebars;

use crate::error::{ErrorExt as _, Result};
use crate::setup::params::SetupParams;
use crate::setup::template::{HELP_TEMPLATE, SETUP_TEMPLATE};

/// File name of the generated setup script inside the payload.
pub const SETUP_SCRIPT_NAME: &str = "setup";

/// File name of the help/banner text inside the payload.
pub const HELP_HEADER_NAME: &str = "help.txt";

/// Render the setup script into `output_dir` and mark it executable.
///
/// Returns the path to the generated script.
pub async fn generate_setup_script(
    params: &SetupParams,
    output_dir: &Path,
) -> Result<PathBuf> {
    let content = render(SETUP_SCRIPT_NAME, SETUP_TEMPLATE, params)?;

    let script_path = output_dir.join(SETUP_SCRIPT_NAME);
    tokio::fs::write(&script_path, &content)
        .await
        .fs_context("writing setup script", &script_path)?;

    // makeself invokes ./setup directly, so the executable bit matters.
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        tokio::fs::set_permissions(&script_path, std::fs::Permissions::from_mode(0o755))
            .await
            .fs_context("marking setup script executable", &script_path)?;
    }

    Ok(script_path)
}

/// Render the help/banner text into `output_dir`.
///
/// The file doubles as the makeself `--help-header` and as an in-payload
/// banner, so it is written into the scratch directory like the rest of the
/// payload.
pub async fn write_help_header(params: &SetupParams, output_dir: &Path) -> Result<PathBuf> {
    let content = render(HELP_HEADER_NAME, HELP_TEMPLATE, params)?;

    let help_path = output_dir.join(HELP_HEADER_NAME);
    tokio::fs::write(&help_path, &content)
        .await
        .fs_context("writing help header", &help_path)?;

    Ok(help_path)
}

/// Render one template with the substitution table.
fn render(name: &str, template: &str, params: &SetupParams) -> Result<String> {
    let mut handlebars = Handlebars::new();
    handlebars.register_escape_fn(handlebars::no_escape);
    handlebars.set_strict_mode(true);
    handlebars.register_template_string(name, template)?;

    let rendered = handlebars.render(name, &params.substitution_table())?;
    Ok(rendered)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::config::{Arch, BuildConfig};

    fn params() -> SetupParams {
        let config = BuildConfig::new("1.4.2.7".to_string(), "2".to_string());
        SetupParams::new(&config, Arch::X64)
    }

    #[test]
    fn rendered_script_has_no_unexpanded_placeholders() {
        let content = render(SETUP_SCRIPT_NAME, SETUP_TEMPLATE, &params()).unwrap();
        assert!(!content.contains("{{"));
        assert!(!content.contains("}}"));
    }

    #[test]
    fn rendered_script_keeps_the_installer_contract() {
        let content = render(SETUP_SCRIPT_NAME, SETUP_TEMPLATE, &params()).unwrap();

        // Fail-fast shell, versioned display text
        assert!(content.starts_with("#!/bin/sh\n"));
        assert!(content.contains("set -e"));
        assert!(content.contains("kestrel 1.4.2.7"));

        // Decision record computed once, before any mutation
        assert!(content.contains("readonly IS_ROOT HAS_SYSTEMD IS_UPGRADE USER_EXISTS"));

        // Declined confirmations abort without changes
        assert!(content.contains("Aborting installation."));

        // Non-absolute prefixes are fatal
        assert!(content.contains("must be an absolute path"));

        // Upgrade-safe data extraction, wholesale code replacement
        assert!(content.contains("--skip-old-files"));
        assert!(content.contains("rm -rf \"$CODE_DIR\""));

        // Runtime configuration instead of patched-in paths
        assert!(content.contains("conf/install.env"));
        assert!(content.contains("KESTREL_HOME"));

        // Best-effort TLS bootstrap
        assert!(content.contains("Warning: TLS certificate generation failed"));

        // Uninstall notes are always written
        assert!(content.contains("UNINSTALL.txt"));
    }

    #[test]
    fn uninstall_notes_keep_their_comment_header() {
        // The template embeds shell lines that print `"#`-prefixed comments;
        // they must survive rendering verbatim.
        let content = render(SETUP_SCRIPT_NAME, SETUP_TEMPLATE, &params()).unwrap();
        assert!(content.contains(
            r##"echo "# Commands that reverse this $RELEASE $VERSION installation.""##
        ));
        assert!(content.contains(
            r##"echo "# Review before running; data under $DATA_DIR is deleted for good.""##
        ));
    }

    #[test]
    fn rendered_help_names_release_version_and_arch() {
        let content = render(HELP_HEADER_NAME, HELP_TEMPLATE, &params()).unwrap();
        assert!(content.contains("kestrel 1.4.2.7"));
        assert!(content.contains("linux-x64"));
        assert!(content.contains("--noexec"));
    }

    #[tokio::test]
    async fn generated_script_is_executable() {
        let dir = tempfile::tempdir().unwrap();
        let script = generate_setup_script(&params(), dir.path()).await.unwrap();

        assert!(script.is_file());
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mode = std::fs::metadata(&script).unwrap().permissions().mode();
            assert_eq!(mode & 0o111, 0o111);
        }
    }

    #[tokio::test]
    async fn generated_script_parses_as_shell() {
        let dir = tempfile::tempdir().unwrap();
        let script = generate_setup_script(&params(), dir.path()).await.unwrap();

        let checked = std::process::Command::new("sh").arg("-n").arg(&script).status();
        match checked {
            Ok(status) => assert!(status.success(), "sh -n rejected the generated script"),
            // No shell on this host; nothing to verify.
            Err(_) => {}
        }
    }
}
