use std::path::Path;

use anyhow::anyhow;
use config::{Config, File};
use serde::Deserialize;
use serde_json::Value;

use crate::tool::CmakeTool;

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct Settings {
    /// Command line used to run cmake; may carry leading arguments
    pub cmake_path: String,
    pub hover: bool,
    pub completion: bool,
}

impl Settings {
    /// Layer the user settings file, the workspace `.cmake-help` file and the
    /// command line override over the defaults.
    pub fn new(root_dir: Option<&Path>, cmake_path: Option<&str>) -> anyhow::Result<Settings> {
        let expanded = shellexpand::tilde("~/.config/cmake-help/settings");
        let mut builder =
            Config::builder().add_source(File::with_name(&expanded).required(false));

        if let Some(root_dir) = root_dir {
            builder = builder.add_source(
                File::with_name(&format!(
                    "{}/.cmake-help",
                    root_dir
                        .to_str()
                        .ok_or(anyhow!("Can't convert root_dir to str"))?
                ))
                .required(false),
            );
        }

        let settings = builder
            .set_default("cmake_path", "cmake")?
            .set_default("hover", true)?
            .set_default("completion", true)?
            .set_override_option("cmake_path", cmake_path)?
            .build()
            .map_err(|err| anyhow!("Build err: {err}"))?;

        let settings = settings.try_deserialize::<Settings>()?;

        anyhow::Ok(settings)
    }

    /// Apply a `workspace/didChangeConfiguration` payload of the form
    /// `{"cmake": {"cmakePath": "..."}}`. Returns whether anything changed.
    pub fn apply_client_settings(&mut self, value: &Value) -> bool {
        let section = value.get("cmake").unwrap_or(value);
        let mut changed = false;

        if let Some(path) = section.get("cmakePath").and_then(Value::as_str) {
            changed |= self.cmake_path != path;
            self.cmake_path = path.to_string();
        }
        if let Some(hover) = section.get("hover").and_then(Value::as_bool) {
            changed |= self.hover != hover;
            self.hover = hover;
        }
        if let Some(completion) = section.get("completion").and_then(Value::as_bool) {
            changed |= self.completion != completion;
            self.completion = completion;
        }

        changed
    }

    /// The tool as currently configured.
    pub fn tool(&self) -> CmakeTool {
        CmakeTool::new(self.cmake_path.clone())
    }
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            cmake_path: "cmake".to_string(),
            hover: true,
            completion: true,
        }
    }
}
