//! Payload masking
//!
//! Masking is a plain XOR with the 4-byte key repeated over the payload, so
//! the same function masks and unmasks.

/// Hook called for every byte unmasked by the frame reader
///
/// Arguments are: byte index, masked byte, key byte, unmasked byte.
pub type UnmaskTrace = fn(usize, u8, u8, u8);


/// Apply (or remove) mask in place
pub fn apply_mask(data: &mut [u8], key: [u8; 4]) {
    for (idx, byte) in data.iter_mut().enumerate() {
        *byte ^= key[idx % 4];
    }
}

/// Same as `apply_mask` but reports every byte to the hook
pub fn apply_mask_traced(data: &mut [u8], key: [u8; 4],
    hook: Option<UnmaskTrace>)
{
    match hook {
        None => apply_mask(data, key),
        Some(hook) => {
            for (idx, byte) in data.iter_mut().enumerate() {
                let masked = *byte;
                *byte ^= key[idx % 4];
                hook(idx, masked, key[idx % 4], *byte);
            }
        }
    }
}

/// An unmask hook that logs every step at `trace` level
pub fn log_unmask(idx: usize, masked: u8, key: u8, clear: u8) {
    trace!("unmask [{}] {:08b} ^ {:08b} = {:08b} {:?}",
        idx, masked, key, clear, clear as char);
}
