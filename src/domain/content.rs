//! Capability contract for node payloads.

/// Payload carried by every tree node.
///
/// The tree never inspects content beyond these hooks. `Clone` is required
/// because copy-on-conflict and [`Tree::copy`](crate::Tree::copy) duplicate
/// whole subtrees.
pub trait NodeContent: Clone {
    /// Textual rendering of the payload; empty by default.
    fn to_content_string(&self) -> String {
        String::new()
    }

    /// Kind of the node, used by kind-filtered queries and rendering.
    ///
    /// Defaults to the unqualified type name.
    fn node_name(&self) -> String {
        let full = std::any::type_name::<Self>();
        let base = full.split('<').next().unwrap_or(full);
        base.rsplit("::").next().unwrap_or(base).to_string()
    }
}

impl NodeContent for String {
    fn to_content_string(&self) -> String {
        self.clone()
    }
}

impl NodeContent for &'static str {
    fn to_content_string(&self) -> String {
        (*self).to_string()
    }

    fn node_name(&self) -> String {
        "str".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone)]
    struct Marker;

    impl NodeContent for Marker {}

    #[test]
    fn given_default_hooks_when_called_then_uses_short_type_name_and_empty_content() {
        assert_eq!(Marker.node_name(), "Marker");
        assert_eq!(Marker.to_content_string(), "");
    }

    #[test]
    fn given_string_content_when_rendered_then_returns_itself() {
        let s = String::from("token");
        assert_eq!(s.to_content_string(), "token");
        assert_eq!(s.node_name(), "String");
    }
}
