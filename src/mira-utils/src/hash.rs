//! String hashing for reflection dictionary keys.

/// Implementation of the [DJB2] hash function.
///
/// Used to derive stable numeric identifiers from the display names
/// of reflected types and members. Collision handling is left to the
/// caller; within a single type's member table, names are expected
/// to be unique anyway.
///
/// [DJB2]: https://theartincode.stanis.me/008-djb2/
#[inline]
pub const fn djb2(input: &str) -> u32 {
    let bytes = input.as_bytes();
    let mut state: u32 = 5381;

    let mut i = 0;
    while i < bytes.len() {
        // state * 33 + bytes[i]
        state = (state << 5)
            .wrapping_add(state)
            .wrapping_add(bytes[i] as u32);

        i += 1;
    }

    state
}
