//! Ordered, case-insensitive header multimap.
//!
//! Unlike `http::HeaderMap`, [`Headers`] keeps the exact spelling of header names
//! and serializes entries in insertion order, which is what ends up on the wire.

use crate::protocol::PayloadSize;
use std::fmt;

pub const CONTENT_LENGTH: &str = "Content-Length";
pub const TRANSFER_ENCODING: &str = "Transfer-Encoding";
pub const SET_COOKIE: &str = "Set-Cookie";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Headers {
    entries: Vec<(String, String)>,
}

impl Headers {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the first value stored under `name`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries.iter().find(|(key, _)| key.eq_ignore_ascii_case(name)).map(|(_, value)| value.as_str())
    }

    /// Returns every value stored under `name`, in insertion order.
    pub fn get_all<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.entries.iter().filter(move |(key, _)| key.eq_ignore_ascii_case(name)).map(|(_, value)| value.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|(key, _)| key.eq_ignore_ascii_case(name))
    }

    /// Sets `name` to a single `value`.
    ///
    /// The first existing entry keeps its position (and its spelling) and takes the
    /// new value; any later entries with the same name are dropped. A new name is
    /// appended at the end.
    pub fn insert<N, V>(&mut self, name: N, value: V)
    where
        N: Into<String>,
        V: Into<String>,
    {
        let name = name.into();
        let value = value.into();

        match self.entries.iter().position(|(key, _)| key.eq_ignore_ascii_case(&name)) {
            Some(index) => {
                self.entries[index].1 = value;
                let mut current = 0;
                self.entries.retain(|(key, _)| {
                    let keep = current <= index || !key.eq_ignore_ascii_case(&name);
                    current += 1;
                    keep
                });
            }
            None => self.entries.push((name, value)),
        }
    }

    /// Adds an entry without touching existing ones.
    pub fn append<N, V>(&mut self, name: N, value: V)
    where
        N: Into<String>,
        V: Into<String>,
    {
        self.entries.push((name.into(), value.into()));
    }

    /// Removes every entry stored under `name`, returning the first value.
    pub fn remove(&mut self, name: &str) -> Option<String> {
        let mut removed = None;
        self.entries.retain_mut(|(key, value)| {
            if !key.eq_ignore_ascii_case(name) {
                return true;
            }
            if removed.is_none() {
                removed = Some(std::mem::take(value));
            }
            false
        });
        removed
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(key, value)| (key.as_str(), value.as_str()))
    }

    /// Makes the framing headers agree with `payload_size`: a `Content-Length` for
    /// buffered payloads, `Transfer-Encoding: chunked` otherwise, never both.
    pub fn set_framing(&mut self, payload_size: PayloadSize) {
        match payload_size.content_length() {
            Some(length) => {
                self.remove(TRANSFER_ENCODING);
                self.insert(CONTENT_LENGTH, length.to_string());
            }
            None => {
                self.remove(CONTENT_LENGTH);
                self.insert(TRANSFER_ENCODING, "chunked");
            }
        }
    }
}

impl<N, V> FromIterator<(N, V)> for Headers
where
    N: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (N, V)>>(iter: I) -> Self {
        let mut headers = Headers::new();
        for (name, value) in iter {
            headers.append(name, value);
        }
        headers
    }
}

impl<N, V> Extend<(N, V)> for Headers
where
    N: Into<String>,
    V: Into<String>,
{
    fn extend<I: IntoIterator<Item = (N, V)>>(&mut self, iter: I) {
        for (name, value) in iter {
            self.append(name, value);
        }
    }
}

impl fmt::Display for Headers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (name, value) in self.iter() {
            writeln!(f, "{name}: {value}")?;
        }
        Ok(())
    }
}
