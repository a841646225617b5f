use crate::codec::header::INIT_HEADER_SIZE;

/// Default upper bound for a single pull from a streamed body.
pub const DEFAULT_READ_SIZE: usize = 2014;

/// Tuning knobs shared by [`RequestSerializer`](super::RequestSerializer) and
/// [`ResponseSerializer`](super::ResponseSerializer).
///
/// ```
/// use courier_http::serializer::SerializerConfig;
///
/// let config = SerializerConfig::new().read_size(8 * 1024);
/// assert_eq!(config.get_read_size(), 8 * 1024);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SerializerConfig {
    read_size: usize,
    header_capacity: usize,
}

impl SerializerConfig {
    pub fn new() -> Self {
        Self { read_size: DEFAULT_READ_SIZE, header_capacity: INIT_HEADER_SIZE }
    }

    /// Maximum bytes requested per pull from a reader body. Zero is raised to one.
    #[must_use]
    pub fn read_size(mut self, read_size: usize) -> Self {
        self.read_size = read_size.max(1);
        self
    }

    /// Initial reservation of the buffer the message head is encoded into.
    #[must_use]
    pub fn header_capacity(mut self, header_capacity: usize) -> Self {
        self.header_capacity = header_capacity;
        self
    }

    pub fn get_read_size(&self) -> usize {
        self.read_size
    }

    pub fn get_header_capacity(&self) -> usize {
        self.header_capacity
    }
}

impl Default for SerializerConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = SerializerConfig::default();
        assert_eq!(config.get_read_size(), 2014);
        assert_eq!(config.get_header_capacity(), 4 * 1024);
    }

    #[test]
    fn zero_read_size_is_raised() {
        assert_eq!(SerializerConfig::new().read_size(0).get_read_size(), 1);
    }
}
