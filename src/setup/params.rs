//! Named parameters for the setup-script template.
//!
//! The substitution table is the single, enumerated list of values the
//! builder injects into the generated script; everything else the script
//! needs is decided at install time on the target host.

use std::collections::BTreeMap;

use crate::builder::config::{Arch, BuildConfig, DEFAULT_PREFIX, UNIT_NAME};

/// Parameters substituted into the setup-script and help templates.
#[derive(Clone, Debug)]
pub struct SetupParams {
    /// Release name; also the default service user on the target host.
    pub release: String,
    /// Release version string.
    pub version: String,
    /// Architecture tag for display text.
    pub arch_label: &'static str,
    /// Superuser installation prefix.
    pub default_prefix: &'static str,
    /// systemd unit name installed on superuser installs.
    pub unit_name: &'static str,
}

impl SetupParams {
    /// Derive the parameters for one architecture's installer.
    pub fn new(config: &BuildConfig, arch: Arch) -> Self {
        Self {
            release: config.release.clone(),
            version: config.version.clone(),
            arch_label: arch.label(),
            default_prefix: DEFAULT_PREFIX,
            unit_name: UNIT_NAME,
        }
    }

    /// The enumerated substitution table handed to the template engine.
    pub fn substitution_table(&self) -> BTreeMap<&'static str, String> {
        let mut data = BTreeMap::new();
        data.insert("release", self.release.clone());
        data.insert("version", self.version.clone());
        data.insert("arch", self.arch_label.to_string());
        data.insert("service_user", self.release.clone());
        data.insert("unit_name", self.unit_name.to_string());
        data.insert("default_prefix", self.default_prefix.to_string());
        data.insert("env_prefix", self.release.to_uppercase());
        data
    }
}
