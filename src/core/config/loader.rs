use std::collections::HashMap;
use std::env;

use tracing::debug;

use super::ConfigError;

pub struct ConfigLoader {
    assigned: HashMap<String, String>,
    vars: Vec<(String, String)>,
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self {
            assigned: HashMap::new(),
            vars: Vec::new(),
        }
    }

    pub fn parse(mut self, content: &str) -> Result<Vec<(String, String)>, ConfigError> {
        for (index, line) in content.lines().enumerate() {
            self.process_line(index + 1, line)?;
        }
        Ok(self.vars)
    }

    fn process_line(&mut self, number: usize, line: &str) -> Result<(), ConfigError> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(());
        }

        if let Some(definition) = line.strip_prefix("export ") {
            self.process_env_var(number, definition)
        } else if line.starts_with("PATH=") {
            self.process_env_var(number, line)
        } else {
            debug!(line = number, "ignoring unsupported rc line");
            Ok(())
        }
    }

    fn process_env_var(&mut self, number: usize, definition: &str) -> Result<(), ConfigError> {
        let Some((name, value)) = definition.split_once('=') else {
            debug!(line = number, "export without '=' ignored");
            return Ok(());
        };

        let name = name.trim();
        if name.is_empty() {
            return Err(ConfigError::InvalidLine {
                line: number,
                reason: "empty variable name",
            });
        }

        let mut value = value.trim();
        if value.len() >= 2 && value.starts_with('"') && value.ends_with('"') {
            value = &value[1..value.len() - 1];
        }

        let expanded = self.expand_value(value);
        self.assigned.insert(name.to_string(), expanded.clone());
        self.vars.push((name.to_string(), expanded));
        Ok(())
    }

    fn expand_value(&self, value: &str) -> String {
        let mut result = value.to_string();
        for var in ["HOME", "PATH"] {
            let placeholder = format!("${}", var);
            if result.contains(&placeholder) {
                let current = self
                    .assigned
                    .get(var)
                    .cloned()
                    .or_else(|| env::var(var).ok())
                    .unwrap_or_default();
                result = result.replace(&placeholder, &current);
            }
        }
        result
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(content: &str) -> Vec<(String, String)> {
        ConfigLoader::new().parse(content).unwrap()
    }

    fn pair(name: &str, value: &str) -> (String, String) {
        (name.to_string(), value.to_string())
    }

    #[test]
    fn test_process_env_var() {
        assert_eq!(
            parse("export TEST_VAR=\"hello world\""),
            vec![pair("TEST_VAR", "hello world")]
        );
    }

    #[test]
    fn test_comments_and_blank_lines() {
        let content = "# leading comment\n\n   \nexport A=1\n  # indented comment\n";
        assert_eq!(parse(content), vec![pair("A", "1")]);
    }

    #[test]
    fn test_unsupported_lines_are_skipped() {
        let content = "alias ll='ls -la'\nexport NOEQUALS\nexport B=2";
        assert_eq!(parse(content), vec![pair("B", "2")]);
    }

    #[test]
    fn test_path_expansion_chains() {
        let content = "PATH=/opt/one\nexport PATH=\"/opt/two:$PATH\"";
        assert_eq!(
            parse(content),
            vec![pair("PATH", "/opt/one"), pair("PATH", "/opt/two:/opt/one")]
        );
    }

    #[test]
    fn test_home_expansion_uses_environment() {
        let home = env::var("HOME").unwrap_or_default();
        assert_eq!(
            parse("export TOOLS=$HOME/tools"),
            vec![pair("TOOLS", &format!("{}/tools", home))]
        );
    }

    #[test]
    fn test_empty_name_is_rejected() {
        let err = ConfigLoader::new().parse("export A=1\nexport =value").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidLine { line: 2, .. }));
    }

    #[test]
    fn test_lone_quote_kept() {
        assert_eq!(parse("export Q=\""), vec![pair("Q", "\"")]);
    }
}
