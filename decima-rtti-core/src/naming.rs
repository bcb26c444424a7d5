//! Display names, symbol names and the binary type id derived from them

use crate::{RttiError, RttiKind, TypeHandle, TypeRegistry};

/// Seed used by the engine when hashing symbol names
const BINARY_TYPE_ID_SEED: u64 = 42;

impl TypeRegistry {
    /// Human readable name; wrappers render as `Array<Ref<Foo>>`
    pub fn full_type_name(&self, handle: TypeHandle) -> Result<String, RttiError> {
        let rtti = self.try_get(handle)?;

        Ok(match rtti.kind() {
            RttiKind::Container(container) => format!(
                "{}<{}>",
                container.name(),
                self.full_type_name(container.contained)?
            ),
            RttiKind::Pod(pod) => format!("POD({})", pod.size),
            _ => rtti.type_name().to_owned(),
        })
    }

    /// Identifier-safe name; wrappers render as `Array_Ref_Foo`
    pub fn symbol_name(&self, handle: TypeHandle) -> Result<String, RttiError> {
        let rtti = self.try_get(handle)?;

        Ok(match rtti.kind() {
            RttiKind::Container(container) => {
                let wrapper = match container.name() {
                    "cptr" => "CPtr",
                    other => other,
                };
                format!("{}_{}", wrapper, self.symbol_name(container.contained)?)
            }
            RttiKind::Pod(pod) => format!("POD{}", pod.size),
            _ => rtti.type_name().to_owned(),
        })
    }

    /// Id under which core binary files refer to this type
    pub fn core_binary_type_id(&self, handle: TypeHandle) -> Result<u64, RttiError> {
        let symbol = self.symbol_name(handle)?;
        let (low, _) = murmur3_x64_128(symbol.as_bytes(), BINARY_TYPE_ID_SEED);
        Ok(low)
    }
}

const C1: u64 = 0x87c3_7b91_1142_53d5;
const C2: u64 = 0x4cf5_ad43_2745_937f;

fn fmix64(mut k: u64) -> u64 {
    k ^= k >> 33;
    k = k.wrapping_mul(0xff51_afd7_ed55_8ccd);
    k ^= k >> 33;
    k = k.wrapping_mul(0xc4ce_b9fe_1a85_ec53);
    k ^= k >> 33;
    k
}

fn mix_k1(k1: u64) -> u64 {
    k1.wrapping_mul(C1).rotate_left(31).wrapping_mul(C2)
}

fn mix_k2(k2: u64) -> u64 {
    k2.wrapping_mul(C2).rotate_left(33).wrapping_mul(C1)
}

fn read_le(bytes: &[u8]) -> u64 {
    bytes
        .iter()
        .rev()
        .fold(0u64, |acc, byte| (acc << 8) | u64::from(*byte))
}

/// MurmurHash3, x64 128-bit variant; returns `(h1, h2)`
pub(crate) fn murmur3_x64_128(data: &[u8], seed: u64) -> (u64, u64) {
    let mut h1 = seed;
    let mut h2 = seed;

    let mut blocks = data.chunks_exact(16);
    for block in &mut blocks {
        let (k1, k2) = block.split_at(8);

        h1 ^= mix_k1(read_le(k1));
        h1 = h1
            .rotate_left(27)
            .wrapping_add(h2)
            .wrapping_mul(5)
            .wrapping_add(0x52dc_e729);

        h2 ^= mix_k2(read_le(k2));
        h2 = h2
            .rotate_left(31)
            .wrapping_add(h1)
            .wrapping_mul(5)
            .wrapping_add(0x3849_5ab5);
    }

    let tail = blocks.remainder();
    if tail.len() > 8 {
        h2 ^= mix_k2(read_le(&tail[8..]));
    }
    if !tail.is_empty() {
        h1 ^= mix_k1(read_le(&tail[..tail.len().min(8)]));
    }

    let len = data.len() as u64;
    h1 ^= len;
    h2 ^= len;

    h1 = h1.wrapping_add(h2);
    h2 = h2.wrapping_add(h1);

    h1 = fmix64(h1);
    h2 = fmix64(h2);

    h1 = h1.wrapping_add(h2);
    h2 = h2.wrapping_add(h1);

    (h1, h2)
}

#[cfg(test)]
mod tests {
    use super::murmur3_x64_128;

    #[test]
    fn empty_input_with_zero_seed_hashes_to_zero() {
        assert_eq!(murmur3_x64_128(b"", 0), (0, 0));
    }

    #[test]
    fn matches_reference_vector() {
        let (h1, h2) = murmur3_x64_128(b"The quick brown fox jumps over the lazy dog", 0);
        assert_eq!(h1, 0xe34b_bc7b_bc07_1b6c);
        assert_eq!(h2, 0x7a43_3ca9_c49a_9347);
    }

    #[test]
    fn seed_changes_the_hash() {
        assert_ne!(murmur3_x64_128(b"Array_int", 0), murmur3_x64_128(b"Array_int", 42));
    }
}
