use std::fmt::Display;

use garde::Validate;
use serde::{Deserialize, Serialize};

#[derive(Validate, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    #[garde(ascii, length(min = 1))]
    pub level: String,
    #[garde(inner(ascii, length(min = 1)))]
    pub filter: Vec<String>,
    #[garde(skip)]
    pub format: Format,
    #[garde(skip)]
    pub ansi: bool,
}

impl Display for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{{ level: {}, filter: [{}], format: {}, ansi: {} }}",
            self.level,
            self.filter.join(","),
            self.format,
            self.ansi
        )
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            filter: vec![],
            format: Format::default(),
            ansi: false,
        }
    }
}

#[derive(Debug, strum::Display, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Format {
    Full,
    #[default]
    Compact,
}
