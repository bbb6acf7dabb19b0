//! The `Fragment` composite type.

use std::fmt;

use permafrost_secret::Secret;

/// One node in the command-fragment tree.
///
/// A fragment composes with plain strings and other fragments the way
/// §4.5's table describes: `EqualDelimited`'s right side is plain or
/// secret, `CommaDelimited`'s items are plain, secret, or `EqualDelimited`,
/// and `SpaceDelimited`'s items may additionally be `CommaDelimited`. The
/// type does not enforce that nesting structurally — any fragment can
/// nest any other — callers are expected to follow the shapes the table
/// describes; `display`/`reveal_args` behave correctly regardless of shape.
#[derive(Clone)]
pub enum Fragment {
    /// A plain, non-secret string token.
    Plain(String),
    /// A masking secret atom: displays as `**********`, reveals to the
    /// clear value.
    Secret(Secret<String>),
    /// `left=right`, with `right` masked in `display` if it is or contains
    /// a secret.
    EqualDelimited(Box<Fragment>, Box<Fragment>),
    /// Comma-joined fragments, rendered as a single token
    /// (e.g. `user=u,password=**********`).
    CommaDelimited(Vec<Fragment>),
    /// Space-joined fragments. At the top level, this is the fragment
    /// handed to [`Fragment::reveal_args`] to obtain an argv vector.
    SpaceDelimited(Vec<Fragment>),
}

impl Fragment {
    /// A plain string token.
    pub fn plain(value: impl Into<String>) -> Self {
        Fragment::Plain(value.into())
    }

    /// A masking secret token.
    pub fn secret(value: impl Into<String>) -> Self {
        Fragment::Secret(Secret::new(value.into()))
    }

    /// `left=right`.
    pub fn equal(left: Fragment, right: Fragment) -> Self {
        Fragment::EqualDelimited(Box::new(left), Box::new(right))
    }

    /// Comma-joined fragments.
    pub fn comma(items: impl IntoIterator<Item = Fragment>) -> Self {
        Fragment::CommaDelimited(items.into_iter().collect())
    }

    /// Space-joined fragments.
    pub fn space(items: impl IntoIterator<Item = Fragment>) -> Self {
        Fragment::SpaceDelimited(items.into_iter().collect())
    }

    /// Renders this fragment with every secret masked as `**********`.
    /// This is the only rendering logging is permitted to use.
    pub fn display(&self) -> String {
        match self {
            Fragment::Plain(s) => s.clone(),
            Fragment::Secret(_) => "**********".to_string(),
            Fragment::EqualDelimited(left, right) => {
                format!("{}={}", left.display(), right.display())
            }
            Fragment::CommaDelimited(items) => join(items, ",", Fragment::display),
            Fragment::SpaceDelimited(items) => join(items, " ", Fragment::display),
        }
    }

    /// Renders this fragment with every secret in clear, as a single
    /// string. Used internally by composite fragments and by
    /// [`Fragment::reveal_args`] for non-`SpaceDelimited` fragments.
    fn reveal_string(&self) -> String {
        match self {
            Fragment::Plain(s) => s.clone(),
            Fragment::Secret(s) => s.reveal().clone(),
            Fragment::EqualDelimited(left, right) => {
                format!("{}={}", left.reveal_string(), right.reveal_string())
            }
            Fragment::CommaDelimited(items) => join(items, ",", Fragment::reveal_string),
            Fragment::SpaceDelimited(items) => join(items, " ", Fragment::reveal_string),
        }
    }

    /// Reveals this fragment as the argument vector handed to the OS
    /// process-spawn call.
    ///
    /// For a top-level `SpaceDelimited`, each item becomes one argv
    /// element (matching how a shell would split the command on spaces,
    /// except that a `CommaDelimited`/`EqualDelimited` item stays a single
    /// element, since it represents one option's value, e.g.
    /// `-o user=u,password=s3cr3t`). Any other fragment reveals to a
    /// single-element vector.
    pub fn reveal_args(&self) -> Vec<String> {
        match self {
            Fragment::SpaceDelimited(items) => {
                items.iter().map(Fragment::reveal_string).collect()
            }
            other => vec![other.reveal_string()],
        }
    }
}

fn join(items: &[Fragment], sep: &str, render: impl Fn(&Fragment) -> String) -> String {
    items
        .iter()
        .map(render)
        .collect::<Vec<_>>()
        .join(sep)
}

impl fmt::Display for Fragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display())
    }
}

impl fmt::Debug for Fragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Fragment({})", self.display())
    }
}
