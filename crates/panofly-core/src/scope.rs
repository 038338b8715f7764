use serde::{Deserialize, Serialize};

use panofly_api::Xpath;
use panofly_api::xpath::template_prefix;

/// Where in the device hierarchy an operation applies.
///
/// A non-empty `template` takes precedence over `template_stack`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Scope {
    #[serde(default)]
    pub template: String,
    #[serde(default)]
    pub template_stack: String,
}

impl Scope {
    pub fn new(template: impl Into<String>, template_stack: impl Into<String>) -> Self {
        Self {
            template: template.into(),
            template_stack: template_stack.into(),
        }
    }

    pub fn template(template: impl Into<String>) -> Self {
        Self::new(template, "")
    }

    pub fn template_stack(template_stack: impl Into<String>) -> Self {
        Self::new("", template_stack)
    }

    /// Neither a template nor a template stack was named.
    pub fn is_empty(&self) -> bool {
        self.template.is_empty() && self.template_stack.is_empty()
    }

    /// Deployment-context segments every path in this scope starts with.
    pub fn prefix(&self) -> Xpath {
        template_prefix(&self.template, &self.template_stack)
    }
}

impl std::fmt::Display for Scope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.template.is_empty() {
            write!(f, "template-stack {:?}", self.template_stack)
        } else {
            write!(f, "template {:?}", self.template)
        }
    }
}
