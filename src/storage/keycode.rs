//! Order-preserving key encoding
//!
//! Keys are encoded with bincode using big-endian fixed-width integers, so
//! byte-wise comparison of encoded keys matches the logical order of their
//! fields. Enum variants are prefixed by their index as a u32, strings by
//! their length as a u64. A prefix enum whose variants mirror the key enum
//! therefore encodes to a byte prefix of every matching key.

use bincode::Options;
use serde::{Serialize, de::DeserializeOwned};

use crate::error::Result;

fn options() -> impl Options {
    bincode::DefaultOptions::new()
        .with_big_endian()
        .with_fixint_encoding()
}

pub fn serialize_key<T: Serialize + ?Sized>(key: &T) -> Result<Vec<u8>> {
    Ok(options().serialize(key)?)
}

pub fn deserialize_key<T: DeserializeOwned>(data: &[u8]) -> Result<T> {
    Ok(options().deserialize(data)?)
}
