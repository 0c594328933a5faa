use indexmap::IndexMap;
use indexmap::map::Iter;

/// Value carried by a single rsync option entry.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum OptionValue {
    /// The option is present without a value (`-a`, `--inplace`).
    Flag,
    /// The option carries one value (`--max-size=1009`).
    Scalar(String),
    /// The option is repeated once per value (`--chmod=a --chmod=b`).
    Repeated(Vec<String>),
}

impl OptionValue {
    /// Reports whether the entry is a bare flag.
    #[must_use]
    pub const fn is_flag(&self) -> bool {
        matches!(self, Self::Flag)
    }

    /// Returns the values carried by the entry in rendering order.
    ///
    /// A [`Flag`](Self::Flag) yields an empty slice.
    #[must_use]
    pub fn values(&self) -> &[String] {
        match self {
            Self::Flag => &[],
            Self::Scalar(value) => std::slice::from_ref(value),
            Self::Repeated(values) => values,
        }
    }
}

impl From<&str> for OptionValue {
    fn from(value: &str) -> Self {
        Self::Scalar(value.to_owned())
    }
}

impl From<String> for OptionValue {
    fn from(value: String) -> Self {
        Self::Scalar(value)
    }
}

impl From<Vec<String>> for OptionValue {
    fn from(values: Vec<String>) -> Self {
        Self::Repeated(values)
    }
}

impl From<Option<String>> for OptionValue {
    fn from(value: Option<String>) -> Self {
        value.map_or(Self::Flag, Self::Scalar)
    }
}

/// Insertion-ordered mapping from option name to [`OptionValue`].
///
/// Re-inserting an existing name replaces its value in place, so the
/// name keeps the position it was first added at. Removing a name leaves
/// the relative order of the remaining entries untouched.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct OptionMap {
    entries: IndexMap<String, OptionValue>,
}

impl OptionMap {
    /// Creates an empty map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces `name`, returning the previous value.
    pub fn insert(&mut self, name: impl Into<String>, value: OptionValue) -> Option<OptionValue> {
        self.entries.insert(name.into(), value)
    }

    /// Removes `name`, returning its value.
    pub fn remove(&mut self, name: &str) -> Option<OptionValue> {
        self.entries.shift_remove(name)
    }

    /// Returns the value stored for `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&OptionValue> {
        self.entries.get(name)
    }

    /// Reports whether `name` has been set.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Reports whether the map holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over the entries in insertion order.
    pub fn iter(&self) -> Iter<'_, String, OptionValue> {
        self.entries.iter()
    }

    /// Copies every entry of `other` into `self`, overwriting same-named entries.
    pub fn merge(&mut self, other: &Self) {
        for (name, value) in other {
            self.entries.insert(name.clone(), value.clone());
        }
    }
}

impl<'a> IntoIterator for &'a OptionMap {
    type Item = (&'a String, &'a OptionValue);
    type IntoIter = Iter<'a, String, OptionValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K: Into<String>> FromIterator<(K, OptionValue)> for OptionMap {
    fn from_iter<I: IntoIterator<Item = (K, OptionValue)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (name, value) in iter {
            map.insert(name, value);
        }
        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(map: &OptionMap) -> Vec<&str> {
        map.iter().map(|(name, _)| name.as_str()).collect()
    }

    #[test]
    fn iteration_follows_insertion_order() {
        let mut map = OptionMap::new();
        map.insert("z", OptionValue::Flag);
        map.insert("max-size", OptionValue::from("1009"));
        map.insert("a", OptionValue::Flag);

        assert_eq!(names(&map), vec!["z", "max-size", "a"]);
    }

    #[test]
    fn reinsert_keeps_original_position() {
        let mut map = OptionMap::new();
        map.insert("a", OptionValue::Flag);
        map.insert("rsh", OptionValue::from("ssh"));
        map.insert("z", OptionValue::Flag);

        let previous = map.insert("a", OptionValue::from("x"));

        assert_eq!(previous, Some(OptionValue::Flag));
        assert_eq!(names(&map), vec!["a", "rsh", "z"]);
        assert_eq!(map.get("a"), Some(&OptionValue::from("x")));
    }

    #[test]
    fn remove_preserves_remaining_order() {
        let mut map: OptionMap = [("a", OptionValue::Flag), ("v", OptionValue::Flag)]
            .into_iter()
            .chain([("z", OptionValue::Flag)])
            .collect();

        assert_eq!(map.remove("v"), Some(OptionValue::Flag));
        assert_eq!(names(&map), vec!["a", "z"]);
        assert!(map.remove("missing").is_none());
    }

    #[test]
    fn merge_overwrites_in_place_and_appends_new_names() {
        let mut base: OptionMap = [("a", OptionValue::Flag), ("rsh", OptionValue::from("ssh"))]
            .into_iter()
            .collect();
        let overrides: OptionMap = [("rsh", OptionValue::from("rsh")), ("inplace", OptionValue::Flag)]
            .into_iter()
            .collect();

        base.merge(&overrides);

        assert_eq!(names(&base), vec!["a", "rsh", "inplace"]);
        assert_eq!(base.get("rsh"), Some(&OptionValue::from("rsh")));
    }

    #[test]
    fn values_expose_each_shape() {
        assert!(OptionValue::Flag.values().is_empty());
        assert_eq!(OptionValue::from("x").values(), ["x".to_owned()]);
        let repeated = OptionValue::from(vec!["a".to_owned(), "b".to_owned()]);
        assert_eq!(repeated.values().len(), 2);
        assert!(OptionValue::from(None).is_flag());
    }
}
