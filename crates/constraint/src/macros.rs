//! Declarative macros for building paths and constraint trees.

// ============================================================================
// PATH MACRO
// ============================================================================

/// Builds a [`Path`](crate::foundation::Path) from keys and indices.
///
/// ```
/// use nebula_constraint::path;
///
/// assert_eq!(path!["form", "items", 0, "name"].to_string(), "form.items[0].name");
/// assert!(path![].is_empty());
/// ```
#[macro_export]
macro_rules! path {
    () => {
        $crate::foundation::Path::root()
    };
    ($($segment:expr),+ $(,)?) => {
        <$crate::foundation::Path as ::core::iter::FromIterator<$crate::foundation::PathSegment>>::from_iter([
            $($crate::foundation::PathSegment::from($segment)),+
        ])
    };
}

// ============================================================================
// HAS_PROPERTIES MACRO
// ============================================================================

/// Builds a [`HasProperties`](crate::constraints::HasProperties) node.
///
/// Each field takes a single constraint or a bracketed list of them; list
/// entries may mix kinds.
///
/// ```
/// use nebula_constraint::constraints::{Each, Exists, Length, OneOf};
/// use nebula_constraint::has_properties;
///
/// let form = has_properties! {
///     "nickname" => [Exists, Length::min(4)],
///     "variant" => OneOf::new(["filled", "outline"]),
///     "tags" => Each::new(Length::max(12)),
/// };
///
/// assert_eq!(form.len(), 3);
/// assert_eq!(form.get("nickname").map(<[_]>::len), Some(2));
/// ```
#[macro_export]
macro_rules! has_properties {
    (@fields $node:expr;) => {
        $node
    };
    (@fields $node:expr; $key:expr => [$($constraint:expr),* $(,)?] $(, $($rest:tt)*)?) => {
        $crate::has_properties!(@fields
            $node.field(
                $key,
                <$crate::constraints::Constraints as ::core::iter::FromIterator<$crate::constraints::Constraint>>::from_iter([
                    $($crate::constraints::Constraint::from($constraint)),*
                ]),
            );
            $($($rest)*)?
        )
    };
    (@fields $node:expr; $key:expr => $constraint:expr $(, $($rest:tt)*)?) => {
        $crate::has_properties!(@fields
            $node.field($key, $crate::constraints::Constraint::from($constraint));
            $($($rest)*)?
        )
    };
    ($($fields:tt)*) => {
        $crate::has_properties!(@fields $crate::constraints::HasProperties::new(); $($fields)*)
    };
}

#[cfg(test)]
mod tests {
    use crate::constraints::{Constraint, Exists, Length};
    use crate::foundation::PathSegment;

    #[test]
    fn path_segments() {
        let path = path!["a", 2usize];
        assert_eq!(
            path.segments(),
            &[PathSegment::Key("a".into()), PathSegment::Index(2)]
        );
    }

    #[test]
    fn has_properties_keeps_declaration_order() {
        let node = has_properties! {
            "b" => Length::min(1),
            "a" => [Exists, Length::max(3)],
            "c" => [],
        };

        let names: Vec<&str> = node.fields().map(|(name, _)| name).collect();
        assert_eq!(names, ["b", "a", "c"]);
        assert!(matches!(node.get("a"), Some([Constraint::Exists(_), Constraint::Rule(_)])));
        assert_eq!(node.get("c").map(<[_]>::len), Some(0));
    }

    #[test]
    fn empty_node() {
        assert!(has_properties! {}.is_empty());
    }
}
