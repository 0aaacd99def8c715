/// High‑level semantic role of a view, similar to ARIA roles.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Role {
    Text,
    Button,
    Container,
}

/// Semantics attached to a `View`. Hosts use the label to find nodes
/// ("click the thing that says X") without a layout pass.
#[derive(Clone, Debug, PartialEq)]
pub struct Semantics {
    pub role: Role,
    /// Human‑readable label. For buttons, this is the announced name.
    pub label: Option<String>,
    pub enabled: bool,
}

impl Semantics {
    pub fn new(role: Role) -> Self {
        Self {
            role,
            label: None,
            enabled: true,
        }
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}
