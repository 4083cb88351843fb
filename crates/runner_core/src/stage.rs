use std::fmt;

/// Operator-selected step. Stages never chain on their own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Launch,
    Inspect,
    Fetch,
}

impl Stage {
    pub fn label(self) -> &'static str {
        match self {
            Stage::Launch => "launch",
            Stage::Inspect => "inspect",
            Stage::Fetch => "fetch",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
