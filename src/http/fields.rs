/// An ordered, case-insensitive name/value map.
///
/// Used for both request headers and query parameters. Names keep the
/// spelling of their last occurrence; lookups ignore ASCII case. The map is
/// built once from an iterator and never mutated afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldMap {
    entries: Vec<(String, String)>,
}

/// Request and response headers.
pub type Headers = FieldMap;

/// Decoded query string parameters.
pub type QueryParams = FieldMap;

impl FieldMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Looks up a value by name, ignoring ASCII case.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for FieldMap
where
    K: Into<String>,
    V: Into<String>,
{
    /// Later duplicates replace earlier ones but keep the earlier position.
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut entries: Vec<(String, String)> = Vec::new();

        for (key, value) in iter {
            let key = key.into();
            let value = value.into();

            match entries.iter_mut().find(|(k, _)| k.eq_ignore_ascii_case(&key)) {
                Some(slot) => *slot = (key, value),
                None => entries.push((key, value)),
            }
        }

        Self { entries }
    }
}
