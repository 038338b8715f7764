// ── Configuration tree addressing ──
//
// Xpaths are kept as ordered segments until the moment they are rendered
// onto the wire, so callers can strip trailing segments without string
// surgery.

use std::fmt;

/// Hostname every device-local config subtree lives under.
pub const LOCALHOST: &str = "localhost.localdomain";

/// An ordered list of xpath segments, rendered as `/a/b/c`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Xpath(Vec<String>);

impl Xpath {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn push(&mut self, segment: impl Into<String>) {
        self.0.push(segment.into());
    }

    /// Append segments, builder style.
    pub fn join<I, S>(mut self, segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.0.extend(segments.into_iter().map(Into::into));
        self
    }

    /// Drop the last `n` segments (saturating at the root).
    pub fn strip(mut self, n: usize) -> Self {
        let keep = self.0.len().saturating_sub(n);
        self.0.truncate(keep);
        self
    }

    pub fn segments(&self) -> &[String] {
        &self.0
    }

    pub fn last(&self) -> Option<&str> {
        self.0.last().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Xpath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for segment in &self.0 {
            write!(f, "/{segment}")?;
        }
        Ok(())
    }
}

impl From<Vec<String>> for Xpath {
    fn from(segments: Vec<String>) -> Self {
        Self(segments)
    }
}

impl<S: Into<String>> FromIterator<S> for Xpath {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

/// Render a name predicate.
///
/// No names address every entry (`entry`); one or more names produce an
/// or-joined predicate (`entry[@name='a' or @name='b']`).
pub fn as_entry_xpath<S: AsRef<str>>(names: &[S]) -> String {
    if names.is_empty() {
        return "entry".into();
    }
    let predicate = names
        .iter()
        .map(|n| format!("@name='{}'", n.as_ref()))
        .collect::<Vec<_>>()
        .join(" or ");
    format!("entry[{predicate}]")
}

/// Render a member predicate (`member[text()='a' or text()='b']`).
pub fn as_member_xpath<S: AsRef<str>>(names: &[S]) -> String {
    if names.is_empty() {
        return "member".into();
    }
    let predicate = names
        .iter()
        .map(|n| format!("text()='{}'", n.as_ref()))
        .collect::<Vec<_>>()
        .join(" or ");
    format!("member[{predicate}]")
}

/// `config / devices / entry[@name='localhost.localdomain']`
pub fn device_root() -> Xpath {
    Xpath::new().join([
        "config".to_owned(),
        "devices".to_owned(),
        as_entry_xpath(&[LOCALHOST]),
    ])
}

/// Deployment-context prefix for template-scoped configuration.
///
/// A non-empty template wins; otherwise the template stack is addressed.
/// Emptiness of both is the caller's concern.
pub fn template_prefix(tmpl: &str, ts: &str) -> Xpath {
    let root = device_root();
    if tmpl.is_empty() {
        root.join(["template-stack".to_owned(), as_entry_xpath(&[ts])])
    } else {
        root.join(["template".to_owned(), as_entry_xpath(&[tmpl])])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entry_predicate_shapes() {
        let none: [&str; 0] = [];
        assert_eq!(as_entry_xpath(&none), "entry");
        assert_eq!(as_entry_xpath(&["eth1/1"]), "entry[@name='eth1/1']");
        assert_eq!(
            as_entry_xpath(&["eth1/1", "eth1/2"]),
            "entry[@name='eth1/1' or @name='eth1/2']"
        );
    }

    #[test]
    fn member_predicate_shapes() {
        assert_eq!(
            as_member_xpath(&["a", "b"]),
            "member[text()='a' or text()='b']"
        );
    }

    #[test]
    fn template_wins_over_stack() {
        let path = template_prefix("tmpl1", "stack1");
        assert_eq!(
            path.to_string(),
            "/config/devices/entry[@name='localhost.localdomain']/template/entry[@name='tmpl1']"
        );
    }

    #[test]
    fn stack_used_when_template_empty() {
        let path = template_prefix("", "stack1");
        assert_eq!(path.last(), Some("entry[@name='stack1']"));
        assert_eq!(path.segments()[3], "template-stack");
    }

    #[test]
    fn strip_saturates() {
        let path = Xpath::new().join(["a", "b", "c"]);
        assert_eq!(path.clone().strip(1).to_string(), "/a/b");
        assert_eq!(path.clone().strip(2).to_string(), "/a");
        assert!(path.strip(9).is_empty());
    }
}
