//! Content hashing for the parse cache key. Distinct from the incremental
//! scanner's xxh3-128 file hash: this one is a fast 64-bit hash of
//! in-memory source bytes, keyed alongside the language discriminant
//! (`parsers::cache::ParseCache`).

/// Hash file content for use as a parse-cache key.
pub fn hash_content(source: &[u8]) -> u64 {
    xxhash_rust::xxh3::xxh3_64(source)
}
