/// Allocates `gen-<n>` identifiers for records without a natural key.
///
/// Owned by one normalization pass and dropped with it, so ids are unique
/// within a loaded store but not stable across restarts.
#[derive(Debug, Default)]
pub struct IdGenerator {
    next: u64,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_id(&mut self) -> String {
        self.next += 1;
        format!("gen-{}", self.next)
    }
}
