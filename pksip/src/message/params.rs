use std::fmt;

/// An ordered collection of `;name=value` (or valueless `;name`) parameters,
/// as found on a [`super::Uri`] or a SIP header.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Params(Vec<(String, Option<String>)>);

impl Params {
    /// Creates an empty parameter list.
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Returns `true` if no parameters are present.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of parameters.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Inserts or replaces a parameter, matching the name case-insensitively.
    pub fn set(&mut self, name: &str, value: Option<&str>) {
        if let Some(entry) = self.0.iter_mut().find(|(k, _)| k.eq_ignore_ascii_case(name)) {
            entry.1 = value.map(str::to_owned);
        } else {
            self.0.push((name.to_owned(), value.map(str::to_owned)));
        }
    }

    /// Looks up a parameter value by name, case-insensitively.
    ///
    /// Returns `Some(None)` for a valueless parameter present in the list,
    /// and `None` if the parameter isn't present at all.
    pub fn get(&self, name: &str) -> Option<Option<&str>> {
        self.0
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_deref())
    }

    /// Returns `true` if a parameter with this name is present, regardless of value.
    pub fn contains(&self, name: &str) -> bool {
        self.0.iter().any(|(k, _)| k.eq_ignore_ascii_case(name))
    }

    /// Removes a parameter by name, returning its value if it was present.
    pub fn remove(&mut self, name: &str) -> Option<Option<String>> {
        let idx = self.0.iter().position(|(k, _)| k.eq_ignore_ascii_case(name))?;
        Some(self.0.remove(idx).1)
    }

    /// Iterates over `(name, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_deref()))
    }
}

impl fmt::Display for Params {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (name, value) in &self.0 {
            match value {
                Some(v) => write!(f, ";{name}={v}")?,
                None => write!(f, ";{name}")?,
            }
        }
        Ok(())
    }
}

impl<const N: usize> From<[(&str, &str); N]> for Params {
    fn from(pairs: [(&str, &str); N]) -> Self {
        Self(pairs.into_iter().map(|(k, v)| (k.to_owned(), Some(v.to_owned()))).collect())
    }
}
