// SPDX-License-Identifier: MPL-2.0
//! Short identifiers for toasts created without a caller-supplied id.
//!
//! Ids are two groups of three base-36 digits (`[0-9a-z]{6}`), about
//! 2.2 billion values. They are not cryptographically unique; the store
//! rejects or regenerates on collision.

use super::record::ToastId;
use rand::Rng;

const ALPHABET: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Number of values a three-digit base-36 group can hold.
const GROUP_SPACE: u32 = 36 * 36 * 36;

/// Length of a generated id.
pub const ID_LEN: usize = 6;

/// Generates an id from the thread-local RNG.
#[must_use]
pub fn generate() -> ToastId {
    generate_with(&mut rand::thread_rng())
}

/// Generates an id from the given RNG.
pub fn generate_with<R: Rng + ?Sized>(rng: &mut R) -> ToastId {
    let mut id = String::with_capacity(ID_LEN);
    push_group(&mut id, rng.gen_range(0..GROUP_SPACE));
    push_group(&mut id, rng.gen_range(0..GROUP_SPACE));
    ToastId::from(id)
}

/// Appends `value` as exactly three zero-padded base-36 digits.
fn push_group(out: &mut String, mut value: u32) {
    let mut digits = [b'0'; 3];
    for slot in digits.iter_mut().rev() {
        *slot = ALPHABET[(value % 36) as usize];
        value /= 36;
    }
    out.extend(digits.iter().map(|&b| char::from(b)));
}
