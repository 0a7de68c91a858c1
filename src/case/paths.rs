use std::path::{Path, PathBuf};

use super::CaseConfig;

/// Input, output and browser locations for one case
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CasePaths {
    case: String,
    input_dir: PathBuf,
    output_dir: PathBuf,
    browser_dir: String,
}

impl CasePaths {
    /// Build the paths of `case` under the configured roots
    pub fn new(
        case: impl Into<String>,
        input_root: &Path,
        output_root: &Path,
        browser_root: &str,
    ) -> Self {
        let case = case.into();
        let browser_root = browser_root.trim_start_matches("./").trim_matches('/');
        let browser_dir = if browser_root.is_empty() {
            format!("./{}", case)
        } else {
            format!("./{}/{}", browser_root, case)
        };
        Self {
            input_dir: input_root.join(&case),
            output_dir: output_root.join(&case),
            browser_dir,
            case,
        }
    }

    /// Paths of `case` under the roots of a configuration
    pub fn from_config(config: &CaseConfig, case: &str) -> Self {
        Self::new(
            case,
            &config.paths.input_root,
            config.output_root(),
            &config.paths.browser_root,
        )
    }

    /// Case name
    pub fn case(&self) -> &str {
        &self.case
    }

    /// Input file inside the case directory
    pub fn input(&self, relative: &Path) -> PathBuf {
        self.input_dir.join(relative)
    }

    /// Output file inside the case output directory
    pub fn output(&self, relative: &Path) -> PathBuf {
        self.output_dir.join(relative)
    }

    /// Output directory of a component
    pub fn component_dir(&self, component: &str) -> PathBuf {
        self.output_dir.join(component)
    }

    /// Browser URL of a component directory
    pub fn component_url(&self, component: &str) -> String {
        format!("{}/{}", self.browser_dir, component)
    }
}
