// src/core/properties.rs

//! Maps the recognized test options onto the MSBuild properties of the VSTest target.

use crate::{
    cli::Cli,
    constants::{
        PROP_FRAMEWORK, PROP_LIST_TESTS, PROP_LOGGER, PROP_PARENT_PROCESS_ID, PROP_PLATFORM,
        PROP_PORT, PROP_SETTINGS, PROP_TEST_ADAPTER_PATH, PROP_TEST_CASE_FILTER, PROP_TESTS,
    },
    core::{commons::wrap_value, paths},
    models::BuildProperty,
};

/// Translates the parsed options into MSBuild properties for the VSTest target.
///
/// One property per option that was given, none for options that were not, always
/// in the same order. The positional project is not a property and is ignored here.
pub fn build_properties(cli: &Cli) -> Vec<BuildProperty> {
    let mut properties = Vec::new();

    if let Some(settings) = &cli.settings {
        properties.push(BuildProperty::new(PROP_SETTINGS, paths::expand_home(settings)));
    }
    if let Some(tests) = &cli.tests {
        properties.push(BuildProperty::new(PROP_TESTS, tests));
    }
    if let Some(adapter_path) = &cli.test_adapter_path {
        properties.push(BuildProperty::new(
            PROP_TEST_ADAPTER_PATH,
            paths::expand_home(adapter_path),
        ));
    }
    if let Some(platform) = &cli.platform {
        properties.push(BuildProperty::new(PROP_PLATFORM, platform));
    }
    if let Some(framework) = &cli.framework {
        properties.push(BuildProperty::new(PROP_FRAMEWORK, framework));
    }
    if let Some(filter) = &cli.test_case_filter {
        properties.push(BuildProperty::new(PROP_TEST_CASE_FILTER, filter));
    }
    if !cli.logger.is_empty() {
        properties.push(BuildProperty::new(PROP_LOGGER, logger_value(&cli.logger)));
    }
    if cli.list_tests {
        properties.push(BuildProperty::new(PROP_LIST_TESTS, "true"));
    }
    if let Some(pid) = cli.parent_process_id {
        properties.push(BuildProperty::new(PROP_PARENT_PROCESS_ID, pid.to_string()));
    }
    if let Some(port) = cli.port {
        properties.push(BuildProperty::new(PROP_PORT, port.to_string()));
    }

    log::debug!("Build properties: {:?}", properties);
    properties
}

// MSBuild splits unquoted property values on `;`, so any value containing one is quoted.
fn logger_value(loggers: &[String]) -> String {
    let joined = loggers.join(";");
    if joined.contains(';') {
        wrap_value(&joined)
    } else {
        joined
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn rendered(cli: &Cli) -> Vec<String> {
        build_properties(cli).iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_no_options_no_properties() {
        let cli = Cli {
            project: Some(PathBuf::from("App.csproj")),
            ..Default::default()
        };
        assert!(build_properties(&cli).is_empty());
    }

    #[test]
    fn test_every_option_maps_to_one_property() {
        let cli = Cli {
            project: None,
            settings: Some("run.runsettings".to_string()),
            tests: Some("TestMethod1".to_string()),
            test_adapter_path: Some("adapters".to_string()),
            platform: Some("x86".to_string()),
            framework: Some(".NETCoreApp,Version=v1.0".to_string()),
            test_case_filter: Some("Priority = 1".to_string()),
            logger: vec!["trx".to_string()],
            list_tests: true,
            parent_process_id: Some(1234),
            port: Some(5678),
        };

        assert_eq!(
            rendered(&cli),
            vec![
                "/p:VSTestSetting=run.runsettings",
                "/p:VSTestTests=TestMethod1",
                "/p:VSTestTestAdapterPath=adapters",
                "/p:VSTestPlatform=x86",
                "/p:VSTestFramework=.NETCoreApp,Version=v1.0",
                "/p:VSTestTestCaseFilter=Priority = 1",
                "/p:VSTestLogger=trx",
                "/p:VSTestListTests=true",
                "/p:VSTestParentProcessId=1234",
                "/p:VSTestPort=5678",
            ]
        );
    }

    #[test]
    fn test_each_option_alone() {
        let cases: Vec<(Cli, &str)> = vec![
            (
                Cli {
                    platform: Some("ARM".to_string()),
                    ..Default::default()
                },
                "VSTestPlatform",
            ),
            (
                Cli {
                    list_tests: true,
                    ..Default::default()
                },
                "VSTestListTests",
            ),
            (
                Cli {
                    port: Some(1),
                    ..Default::default()
                },
                "VSTestPort",
            ),
        ];

        for (cli, expected) in cases {
            let properties = build_properties(&cli);
            assert_eq!(properties.len(), 1, "{expected}");
            assert_eq!(properties[0].name, expected);
        }
    }

    #[test]
    fn test_multiple_loggers_become_one_quoted_property() {
        let cli = Cli {
            logger: vec!["trx".to_string(), "console;verbosity=normal".to_string()],
            ..Default::default()
        };
        assert_eq!(
            rendered(&cli),
            vec!["/p:VSTestLogger=\"trx;console;verbosity=normal\""]
        );
    }

    #[test]
    fn test_single_logger_with_parameters_is_quoted() {
        let single = Cli {
            logger: vec!["trx;LogFileName=a.trx".to_string()],
            ..Default::default()
        };
        let split = Cli {
            logger: vec!["trx".to_string(), "LogFileName=a.trx".to_string()],
            ..Default::default()
        };

        assert_eq!(
            rendered(&single),
            vec!["/p:VSTestLogger=\"trx;LogFileName=a.trx\""]
        );
        assert_eq!(rendered(&single), rendered(&split));
    }

    #[test]
    fn test_settings_path_tilde_is_expanded() {
        let cli = Cli {
            settings: Some("~/ci.runsettings".to_string()),
            ..Default::default()
        };
        let properties = build_properties(&cli);
        assert!(!properties[0].value.starts_with('~'));
        assert!(properties[0].value.ends_with("ci.runsettings"));
    }
}
