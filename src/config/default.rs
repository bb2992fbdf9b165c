// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Default configuration values.

use std::path::PathBuf;

use super::schema::{
    BenchConfig, EngineConfig, LinuxProfileConfig, ProfileConfig, ReportConfig,
};

/// Get the default configuration.
pub fn default_config() -> BenchConfig {
    BenchConfig {
        engine: EngineConfig::default(),
        report: ReportConfig::default(),
        database: Some(profile(
            "Oracle",
            "CIS Oracle Database 11g R2 Benchmark",
            "catalogues/oracle.csv",
        )),
        windows: Some(profile(
            "2012",
            "CIS Microsoft Windows Server 2012 R2 Benchmark",
            "catalogues/windows2012.csv",
        )),
        linux: default_linux_profiles(),
        source: None,
    }
}

/// Linux profiles in detection order.
pub fn default_linux_profiles() -> Vec<LinuxProfileConfig> {
    vec![
        linux(
            "etc/redhat-release",
            profile(
                "RedHat",
                "CIS Red Hat Enterprise Linux 7 Benchmark",
                "catalogues/redhat.csv",
            ),
        ),
        linux(
            "etc/SuSE-release",
            profile(
                "SuSE",
                "CIS SUSE Linux Enterprise 12 Benchmark",
                "catalogues/suse.csv",
            ),
        ),
        linux(
            "etc/lsb-release",
            profile("LSB", "CIS Ubuntu Linux Benchmark", "catalogues/lsb.csv"),
        ),
        linux(
            "etc/debian_version",
            profile(
                "Debian",
                "CIS Debian Linux Benchmark",
                "catalogues/debian.csv",
            ),
        ),
    ]
}

fn profile(name: &str, benchmark: &str, catalogue: &str) -> ProfileConfig {
    ProfileConfig {
        name: name.to_string(),
        benchmark: benchmark.to_string(),
        catalogue: PathBuf::from(catalogue),
    }
}

fn linux(release_file: &str, profile: ProfileConfig) -> LinuxProfileConfig {
    LinuxProfileConfig {
        release_file: PathBuf::from(release_file),
        profile,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_linux_order() {
        let names: Vec<_> = default_linux_profiles()
            .into_iter()
            .map(|l| l.profile.name)
            .collect();
        assert_eq!(names, vec!["RedHat", "SuSE", "LSB", "Debian"]);
    }

    #[test]
    fn test_shipped_config_parseable() {
        let shipped = include_str!("../../benchit.toml");
        let config: BenchConfig = toml::from_str(shipped).expect("Shipped config should parse");
        assert_eq!(config.linux.len(), default_linux_profiles().len());
        assert!(config.windows.is_some());
    }
}
