//! Form-encoded request parameters.
//!
//! Fields keep their arrival order. Lookups return the first value for a key,
//! and an empty value is indistinguishable from an absent one.

/// Name of the field carrying the action to invoke.
pub const ACTION_FIELD: &str = "Action";

/// The parameter set of one request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params {
    pairs: Vec<(String, String)>,
}

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses an `application/x-www-form-urlencoded` payload.
    ///
    /// # Example
    ///
    /// ```
    /// use elbsim_common::Params;
    ///
    /// let params = Params::parse(b"LoadBalancerName=my%20lb&Path=");
    /// assert_eq!(params.get("LoadBalancerName"), Some("my lb"));
    /// assert_eq!(params.get("Path"), None);
    /// ```
    pub fn parse(input: &[u8]) -> Self {
        let mut params = Self::new();
        params.extend_from(input);
        params
    }

    /// Appends the fields of another form-encoded payload.
    pub fn extend_from(&mut self, input: &[u8]) {
        self.pairs.extend(form_urlencoded::parse(input).into_owned());
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.pairs.push((key.into(), value.into()));
    }

    /// Builder form of [`Params::insert`].
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    /// First value for `key`, or `None` when absent or empty.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
            .filter(|v| !v.is_empty())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn action(&self) -> Option<&str> {
        self.get(ACTION_FIELD)
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Encodes the parameters back into a form payload.
    pub fn to_form(&self) -> String {
        form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.pairs.iter())
            .finish()
    }
}

impl<K, V> FromIterator<(K, V)> for Params
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            pairs: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

/// Key of the `index`th (1-based) element of a repeated structure,
/// e.g. `Instances.member.2.InstanceId`.
pub fn member_key(prefix: &str, index: usize, field: &str) -> String {
    format!("{}.member.{}.{}", prefix, index, field)
}
