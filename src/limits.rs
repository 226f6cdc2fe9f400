/// Default maximum nesting depth limit.
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Default maximum element count of a single dynamic container when no message size is known.
///
/// This is a safety limit; adjust explicitly for your deployment.
pub const DEFAULT_MAX_CONTAINER_LEN: usize = 1 << 24;

/// Decode-time resource limits.
///
/// Depth counts nested records, containers, and owning pointers. Deep pointer trees decode
/// recursively, so the depth bound is what keeps hostile input from exhausting the stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeLimits {
    /// Maximum total input length in bytes.
    pub max_input_bytes: usize,
    /// Maximum nesting depth.
    pub max_depth: usize,
    /// Maximum declared length of one sequence, set, map, or string.
    ///
    /// Unlike the remaining-input check this applies under `UNCHECKED` as well, and it is the
    /// only bound on containers of elements that may occupy zero bytes.
    pub max_container_len: usize,
}

impl DecodeLimits {
    /// Limits sized for a single message of at most `max_message_bytes`.
    #[must_use]
    pub const fn for_bytes(max_message_bytes: usize) -> Self {
        Self {
            max_input_bytes: max_message_bytes,
            max_depth: DEFAULT_MAX_DEPTH,
            max_container_len: max_message_bytes,
        }
    }

    /// No input size bound; default depth and container bounds.
    #[must_use]
    pub const fn unbounded() -> Self {
        Self {
            max_input_bytes: usize::MAX,
            max_depth: DEFAULT_MAX_DEPTH,
            max_container_len: DEFAULT_MAX_CONTAINER_LEN,
        }
    }
}

impl Default for DecodeLimits {
    fn default() -> Self {
        Self::unbounded()
    }
}
