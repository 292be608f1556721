/// How a primary key is populated when an insert omits it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AutoStrategy {
    /// Monotonically increasing integer, starting at 1.
    Increment,

    /// Random v4 UUID, stored as its hyphenated string form.
    Uuid,
}
