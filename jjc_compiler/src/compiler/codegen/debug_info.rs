use std::collections::HashMap;

/// Placeholder at index 0, shaped like a real `context@uri@line` entry.
pub const SENTINEL: &str = "??@??@??";

/// Append-only table of `context@uri@line` strings. The inverse map
/// makes interning idempotent, so each distinct location occupies one
/// slot no matter how often it is pushed.
pub struct DebugInfo {
    entries: Vec<String>,
    index: HashMap<String, usize>,
}
impl DebugInfo {
    pub fn new() -> Self {
        DebugInfo {
            entries: vec![SENTINEL.to_string()],
            index: HashMap::new(),
        }
    }
    pub fn intern(&mut self, message: String) -> usize {
        if let Some(&index) = self.index.get(&message) {
            return index;
        }
        let index = self.entries.len();
        self.index.insert(message.clone(), index);
        self.entries.push(message);
        index
    }
    pub fn entries(&self) -> &[String] {
        &self.entries
    }
}
impl Default for DebugInfo {
    fn default() -> Self {
        DebugInfo::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sentinel_occupies_index_zero() {
        let info = DebugInfo::new();

        assert_eq!(info.entries(), &[SENTINEL.to_string()]);
    }
    #[test]
    fn interning_is_idempotent() {
        let mut info = DebugInfo::new();

        let first = info.intern(".main@a.jj@3".to_string());
        let second = info.intern(".main@a.jj@4".to_string());
        let again = info.intern(".main@a.jj@3".to_string());

        assert_eq!(first, 1);
        assert_eq!(second, 2);
        assert_eq!(again, first);
        assert_eq!(info.entries().len(), 3);
    }
}
